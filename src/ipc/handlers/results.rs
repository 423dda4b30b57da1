use crate::calc::{self, CalcError};
use crate::ipc::error::{err, err_calc, ok};
use crate::ipc::types::{AppState, Request};
use crate::model::{AssessmentScore, ComputedResult, ResultStatus};
use serde_json::json;
use uuid::Uuid;

fn compute_one(state: &AppState, score: &AssessmentScore) -> Result<ComputedResult, CalcError> {
    calc::validate_components(score.test1, score.test2, score.exam)?;
    let graded = calc::compute_result(&state.scale, score.test1, score.test2, score.exam);
    // A fresh id per computation: a re-save supersedes the previous record
    // instead of mutating it.
    Ok(ComputedResult {
        result_id: Uuid::new_v4().to_string(),
        student_id: score.student_id.clone(),
        subject_id: score.subject_id.clone(),
        class_id: score.class_id.clone(),
        term: score.term,
        session: score.session.clone(),
        total_score: graded.total,
        grade: graded.grade,
        grade_point: graded.point,
        remark: graded.remark,
        status: ResultStatus::Draft,
    })
}

fn handle_compute(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(raw) = req.params.get("score") else {
        return err(&req.id, "bad_params", "missing params.score", None);
    };
    let score: AssessmentScore = match serde_json::from_value(raw.clone()) {
        Ok(v) => v,
        Err(e) => {
            return err(
                &req.id,
                "bad_params",
                format!("params.score is not an assessment score: {e}"),
                None,
            )
        }
    };

    match compute_one(state, &score) {
        Ok(result) => ok(&req.id, json!({ "result": result })),
        Err(e) => err_calc(&req.id, e),
    }
}

fn handle_compute_batch(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(raw) = req.params.get("scores") else {
        return err(&req.id, "bad_params", "missing params.scores", None);
    };
    let scores: Vec<AssessmentScore> = match serde_json::from_value(raw.clone()) {
        Ok(v) => v,
        Err(e) => {
            return err(
                &req.id,
                "bad_params",
                format!("params.scores is not a score list: {e}"),
                None,
            )
        }
    };

    // One bad row does not abort the batch; each entry reports its own
    // outcome under its input index.
    let mut outcomes: Vec<serde_json::Value> = Vec::with_capacity(scores.len());
    let mut computed = 0_usize;
    let mut rejected = 0_usize;
    for (index, score) in scores.iter().enumerate() {
        match compute_one(state, score) {
            Ok(result) => {
                computed += 1;
                outcomes.push(json!({ "index": index, "ok": true, "result": result }));
            }
            Err(e) => {
                rejected += 1;
                outcomes.push(json!({ "index": index, "ok": false, "error": e }));
            }
        }
    }

    ok(
        &req.id,
        json!({
            "computed": computed,
            "rejected": rejected,
            "outcomes": outcomes
        }),
    )
}

fn handle_advance_status(_state: &mut AppState, req: &Request) -> serde_json::Value {
    let from: ResultStatus = match req
        .params
        .get("status")
        .map(|v| serde_json::from_value(v.clone()))
    {
        Some(Ok(v)) => v,
        _ => return err(&req.id, "bad_params", "missing or invalid params.status", None),
    };
    let to: ResultStatus = match req
        .params
        .get("to")
        .map(|v| serde_json::from_value(v.clone()))
    {
        Some(Ok(v)) => v,
        _ => return err(&req.id, "bad_params", "missing or invalid params.to", None),
    };

    if !from.can_advance_to(to) {
        return err(
            &req.id,
            "bad_transition",
            "result status can only advance one step: draft, submitted, approved, published",
            Some(json!({ "from": from, "to": to })),
        );
    }
    ok(&req.id, json!({ "status": to }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "results.compute" => Some(handle_compute(state, req)),
        "results.computeBatch" => Some(handle_compute_batch(state, req)),
        "results.advanceStatus" => Some(handle_advance_status(state, req)),
        _ => None,
    }
}
