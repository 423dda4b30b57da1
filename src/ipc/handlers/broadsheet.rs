use crate::broadsheet::build_broadsheet;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::model::{Student, Subject, SubjectResult};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BuildParams {
    #[serde(default)]
    students: Vec<Student>,
    #[serde(default)]
    results: Vec<SubjectResult>,
    #[serde(default)]
    subjects: Vec<Subject>,
    class_id: String,
    session: String,
}

fn handle_build(state: &mut AppState, req: &Request) -> serde_json::Value {
    let params: BuildParams = match serde_json::from_value(req.params.clone()) {
        Ok(v) => v,
        Err(e) => return err(&req.id, "bad_params", format!("bad broadsheet params: {e}"), None),
    };

    let rows = build_broadsheet(
        &params.students,
        &params.results,
        &params.subjects,
        &params.class_id,
        &params.session,
        &state.scale,
    );
    // Subjects ride along as the renderer's column headers.
    ok(
        &req.id,
        json!({
            "classId": params.class_id,
            "session": params.session,
            "subjects": params.subjects,
            "rows": rows
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "broadsheet.build" => Some(handle_build(state, req)),
        _ => None,
    }
}
