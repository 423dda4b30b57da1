use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Component maxima for pre-scaled marks: test1 and test2 are entered out of
/// 20, exam out of 60, so a full total is a direct sum out of 100.
pub const TEST_MAX: f64 = 20.0;
pub const EXAM_MAX: f64 = 60.0;

/// Half-up integer rounding used everywhere the engine rounds:
/// `Int(x + 0.5)`.
pub fn round_half_up(x: f64) -> i64 {
    (x + 0.5).floor() as i64
}

#[derive(Debug, Clone, Serialize)]
pub struct CalcError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl CalcError {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(code: &str, message: impl Into<String>, details: serde_json::Value) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: Some(details),
        }
    }
}

/// One row of the grading table. Bounds are inclusive on both ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeBand {
    pub symbol: String,
    pub min: i64,
    pub max: i64,
    pub point: i64,
    pub remark: String,
}

fn band(symbol: &str, min: i64, max: i64, point: i64, remark: &str) -> GradeBand {
    GradeBand {
        symbol: symbol.to_string(),
        min,
        max,
        point,
        remark: remark.to_string(),
    }
}

/// The active grading table, held high-to-low. Construction validates that
/// the bands descend contiguously and cover 0..=100, so a lookup on a
/// clamped total lands in exactly one band.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradingScale {
    bands: Vec<GradeBand>,
}

impl Default for GradingScale {
    fn default() -> Self {
        GradingScale {
            bands: vec![
                band("A", 80, 100, 5, "Excellent"),
                band("B", 70, 79, 4, "Very Good"),
                band("C", 60, 69, 3, "Good"),
                band("D", 50, 59, 2, "Satisfactory"),
                band("E", 40, 49, 1, "Poor"),
                band("F", 0, 39, 0, "Fail"),
            ],
        }
    }
}

impl GradingScale {
    pub fn new(bands: Vec<GradeBand>) -> Result<GradingScale, CalcError> {
        if bands.is_empty() {
            return Err(CalcError::new("bad_scale", "scale needs at least one band"));
        }
        for b in &bands {
            if b.min > b.max {
                return Err(CalcError::with_details(
                    "bad_scale",
                    "band min exceeds its max",
                    serde_json::json!({ "symbol": b.symbol }),
                ));
            }
        }
        if bands[0].max != 100 {
            return Err(CalcError::new("bad_scale", "top band must reach 100"));
        }
        if bands[bands.len() - 1].min != 0 {
            return Err(CalcError::new("bad_scale", "bottom band must reach 0"));
        }
        for w in bands.windows(2) {
            if w[0].min != w[1].max + 1 {
                return Err(CalcError::with_details(
                    "bad_scale",
                    "bands must descend contiguously with no gaps or overlaps",
                    serde_json::json!({ "upper": w[0].symbol, "lower": w[1].symbol }),
                ));
            }
        }
        for (i, b) in bands.iter().enumerate() {
            if bands[..i].iter().any(|o| o.symbol == b.symbol) {
                return Err(CalcError::with_details(
                    "bad_scale",
                    "duplicate grade symbol",
                    serde_json::json!({ "symbol": b.symbol }),
                ));
            }
        }
        Ok(GradingScale { bands })
    }

    /// Optional startup override: a JSON array of bands, same shape as
    /// `gradingScale.set` accepts over IPC.
    pub fn from_json_file(path: &Path) -> anyhow::Result<GradingScale> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read grading scale file {}", path.display()))?;
        let bands: Vec<GradeBand> = serde_json::from_str(&text)
            .with_context(|| format!("parse grading scale file {}", path.display()))?;
        GradingScale::new(bands).map_err(|e| anyhow::anyhow!("{}: {}", e.code, e.message))
    }

    pub fn bands(&self) -> &[GradeBand] {
        &self.bands
    }

    pub fn band_for(&self, total: i64) -> &GradeBand {
        let t = total.clamp(0, 100);
        match self.bands.iter().find(|b| t >= b.min && t <= b.max) {
            Some(b) => b,
            // Unreachable for a constructed scale; the bottom band reaches 0.
            None => &self.bands[self.bands.len() - 1],
        }
    }
}

/// Boundary check the aggregation itself does not repeat: every IPC entry
/// point runs this before `compute_result` sees the components.
pub fn validate_components(test1: f64, test2: f64, exam: f64) -> Result<(), CalcError> {
    let checks = [
        ("test1", test1, TEST_MAX),
        ("test2", test2, TEST_MAX),
        ("exam", exam, EXAM_MAX),
    ];
    for (name, value, max) in checks {
        if !value.is_finite() || value < 0.0 || value > max {
            return Err(CalcError::with_details(
                "out_of_range",
                format!("{name} must be between 0 and {max}"),
                serde_json::json!({ "component": name, "value": value, "max": max }),
            ));
        }
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradedTotal {
    pub total: i64,
    pub grade: String,
    pub point: i64,
    pub remark: String,
}

/// Pure aggregation over already-validated components. Inputs are not
/// re-clamped here; the summed total is bounded to [0,100].
pub fn compute_result(scale: &GradingScale, test1: f64, test2: f64, exam: f64) -> GradedTotal {
    let total = round_half_up(test1 + test2 + exam).clamp(0, 100);
    let b = scale.band_for(total);
    GradedTotal {
        total,
        grade: b.symbol.clone(),
        point: b.point,
        remark: b.remark.clone(),
    }
}
