use crate::calc::{GradeBand, GradingScale};
use crate::ipc::error::{err, err_calc, ok};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "gradingBands": state.scale.bands().len()
        }),
    )
}

fn handle_scale_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, json!({ "bands": state.scale.bands() }))
}

fn handle_scale_set(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(raw) = req.params.get("bands") else {
        return err(&req.id, "bad_params", "missing params.bands", None);
    };
    let bands: Vec<GradeBand> = match serde_json::from_value(raw.clone()) {
        Ok(v) => v,
        Err(e) => {
            return err(
                &req.id,
                "bad_params",
                format!("params.bands is not a band list: {e}"),
                None,
            )
        }
    };

    // Validate before installing; a rejected scale leaves the old one active.
    match GradingScale::new(bands) {
        Ok(scale) => {
            let count = scale.bands().len();
            state.scale = scale;
            ok(&req.id, json!({ "gradingBands": count }))
        }
        Err(e) => err_calc(&req.id, e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "gradingScale.get" => Some(handle_scale_get(state, req)),
        "gradingScale.set" => Some(handle_scale_set(state, req)),
        _ => None,
    }
}
