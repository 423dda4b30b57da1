use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    pub id: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedEntry {
    pub id: String,
    pub score: f64,
    pub position: usize,
}

/// Standard competition ranking: descending by score, tied scores share a
/// position, the next distinct score skips ahead by the tie-group size.
/// The sort is stable, so tied entries keep their input order. Caller data
/// is never mutated; output is a fresh annotated list.
pub fn competition_rank(entries: &[ScoreEntry]) -> Vec<RankedEntry> {
    let mut sorted: Vec<&ScoreEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    let mut out: Vec<RankedEntry> = Vec::with_capacity(sorted.len());
    for (i, e) in sorted.iter().enumerate() {
        let position = if i > 0 && e.score == sorted[i - 1].score {
            out[i - 1].position
        } else {
            i + 1
        };
        out.push(RankedEntry {
            id: e.id.clone(),
            score: e.score,
            position,
        });
    }
    out
}
