use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::rank::{competition_rank, ScoreEntry};
use serde_json::json;

fn handle_positions(req: &Request) -> serde_json::Value {
    let Some(raw) = req.params.get("entries") else {
        return err(&req.id, "bad_params", "missing params.entries", None);
    };
    let entries: Vec<ScoreEntry> = match serde_json::from_value(raw.clone()) {
        Ok(v) => v,
        Err(e) => {
            return err(
                &req.id,
                "bad_params",
                format!("params.entries is not an entry list: {e}"),
                None,
            )
        }
    };

    let ranked = competition_rank(&entries);
    ok(&req.id, json!({ "entries": ranked }))
}

pub fn try_handle(_state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "rank.positions" => Some(handle_positions(req)),
        _ => None,
    }
}
