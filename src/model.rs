use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Academic period within a session. Every session has exactly these three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Term {
    First,
    Second,
    Third,
}

impl Term {
    pub const ALL: [Term; 3] = [Term::First, Term::Second, Term::Third];
}

/// Linear result lifecycle. No skips, no cycles; `published` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultStatus {
    Draft,
    Submitted,
    Approved,
    Published,
}

impl ResultStatus {
    pub fn next(self) -> Option<ResultStatus> {
        match self {
            ResultStatus::Draft => Some(ResultStatus::Submitted),
            ResultStatus::Submitted => Some(ResultStatus::Approved),
            ResultStatus::Approved => Some(ResultStatus::Published),
            ResultStatus::Published => None,
        }
    }

    pub fn can_advance_to(self, to: ResultStatus) -> bool {
        self.next() == Some(to)
    }
}

/// One student's raw marks for one subject in one term. Components arrive
/// pre-scaled: test1 and test2 out of 20, exam out of 60.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentScore {
    pub student_id: String,
    pub subject_id: String,
    pub class_id: String,
    pub term: Term,
    pub session: String,
    pub test1: f64,
    pub test2: f64,
    pub exam: f64,
}

/// Derived from an `AssessmentScore`; grade is always recomputed from the
/// total under the active scale, never stored independently.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedResult {
    pub result_id: String,
    pub student_id: String,
    pub subject_id: String,
    pub class_id: String,
    pub term: Term,
    pub session: String,
    pub total_score: i64,
    pub grade: String,
    pub grade_point: i64,
    pub remark: String,
    pub status: ResultStatus,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub admission_number: String,
    pub name: String,
    pub class_id: String,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub code: String,
    pub name: String,
}

/// A previously computed per-subject percentage, as handed over by the
/// result store for aggregation. The daemon never writes these back.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectResult {
    pub student_id: String,
    pub subject_code: String,
    pub term: Term,
    pub session: String,
    pub percentage: f64,
}

/// One student's full-session rollup. A view, recomputed on demand; ordered
/// maps keep repeated builds byte-identical once serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadsheetRow {
    pub student_id: String,
    pub admission_number: String,
    pub student_name: String,
    pub term_scores: BTreeMap<Term, BTreeMap<String, f64>>,
    pub cumulative_scores: BTreeMap<String, i64>,
    pub total_average: i64,
    pub grade: String,
    pub position: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_progression_is_linear() {
        assert_eq!(ResultStatus::Draft.next(), Some(ResultStatus::Submitted));
        assert_eq!(
            ResultStatus::Submitted.next(),
            Some(ResultStatus::Approved)
        );
        assert_eq!(ResultStatus::Approved.next(), Some(ResultStatus::Published));
        assert_eq!(ResultStatus::Published.next(), None);
    }

    #[test]
    fn status_advance_rejects_skips_and_backwards() {
        assert!(ResultStatus::Draft.can_advance_to(ResultStatus::Submitted));
        assert!(!ResultStatus::Draft.can_advance_to(ResultStatus::Approved));
        assert!(!ResultStatus::Approved.can_advance_to(ResultStatus::Draft));
        assert!(!ResultStatus::Published.can_advance_to(ResultStatus::Published));
    }

    #[test]
    fn term_serializes_to_plain_names() {
        assert_eq!(
            serde_json::to_string(&Term::First).expect("serialize"),
            "\"First\""
        );
        let t: Term = serde_json::from_str("\"Third\"").expect("deserialize");
        assert_eq!(t, Term::Third);
    }
}
