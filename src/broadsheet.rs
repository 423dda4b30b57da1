use std::collections::BTreeMap;
use std::collections::HashMap;

use crate::calc::{round_half_up, GradingScale};
use crate::model::{BroadsheetRow, Student, Subject, SubjectResult, Term};
use crate::rank::{competition_rank, ScoreEntry};

/// Builds the per-class, per-session broadsheet: one row per active student,
/// sorted descending by total average with competition-ranked positions.
///
/// A subject with no recorded score in any term is omitted from
/// `cumulativeScores` entirely; a 0 in `termScores` means "not yet recorded"
/// and is excluded from averaging rather than counted as a zero mark.
pub fn build_broadsheet(
    students: &[Student],
    results: &[SubjectResult],
    subjects: &[Subject],
    class_id: &str,
    session: &str,
    scale: &GradingScale,
) -> Vec<BroadsheetRow> {
    let mut rows: Vec<BroadsheetRow> = Vec::new();

    for student in students {
        if student.class_id != class_id || !student.active {
            continue;
        }
        let own: Vec<&SubjectResult> = results
            .iter()
            .filter(|r| r.student_id == student.id && r.session == session)
            .collect();

        let mut term_scores: BTreeMap<Term, BTreeMap<String, f64>> = BTreeMap::new();
        for term in Term::ALL {
            term_scores.insert(term, BTreeMap::new());
        }
        let mut cumulative_scores: BTreeMap<String, i64> = BTreeMap::new();

        for subject in subjects {
            let mut recorded: Vec<f64> = Vec::new();
            for term in Term::ALL {
                let pct = own
                    .iter()
                    .find(|r| r.term == term && r.subject_code == subject.code)
                    .map(|r| r.percentage)
                    .unwrap_or(0.0);
                if let Some(grid) = term_scores.get_mut(&term) {
                    grid.insert(subject.code.clone(), pct);
                }
                if pct > 0.0 {
                    recorded.push(pct);
                }
            }
            if !recorded.is_empty() {
                let mean = recorded.iter().sum::<f64>() / recorded.len() as f64;
                cumulative_scores.insert(subject.code.clone(), round_half_up(mean));
            }
        }

        let total_average = if cumulative_scores.is_empty() {
            0
        } else {
            let sum: i64 = cumulative_scores.values().sum();
            round_half_up(sum as f64 / cumulative_scores.len() as f64)
        };

        rows.push(BroadsheetRow {
            student_id: student.id.clone(),
            admission_number: student.admission_number.clone(),
            student_name: student.name.clone(),
            term_scores,
            cumulative_scores,
            total_average,
            grade: scale.band_for(total_average).symbol.clone(),
            position: 0,
        });
    }

    // One ranking policy everywhere: the same competition ranking the
    // rank.positions surface uses, stable for tied averages.
    let entries: Vec<ScoreEntry> = rows
        .iter()
        .map(|r| ScoreEntry {
            id: r.student_id.clone(),
            score: r.total_average as f64,
        })
        .collect();
    let ranked = competition_rank(&entries);

    let mut by_id: HashMap<String, BroadsheetRow> = rows
        .into_iter()
        .map(|r| (r.student_id.clone(), r))
        .collect();
    let mut ordered: Vec<BroadsheetRow> = Vec::with_capacity(ranked.len());
    for r in ranked {
        if let Some(mut row) = by_id.remove(&r.id) {
            row.position = r.position;
            ordered.push(row);
        }
    }
    ordered
}
