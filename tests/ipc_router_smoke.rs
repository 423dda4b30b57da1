mod test_support;

use serde_json::json;
use test_support::{request, request_ok, spawn_sidecar};

#[test]
fn router_dispatch_smoke_covers_handler_families() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let health = request_ok(&mut stdin, &mut reader, "1", "health", json!({}));
    assert_eq!(
        health.get("gradingBands").and_then(|v| v.as_u64()),
        Some(6)
    );

    let _ = request_ok(&mut stdin, &mut reader, "2", "gradingScale.get", json!({}));

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "results.compute",
        json!({
            "score": {
                "studentId": "s1",
                "subjectId": "math",
                "classId": "jss1",
                "term": "First",
                "session": "2024/2025",
                "test1": 15.0,
                "test2": 16.0,
                "exam": 40.0
            }
        }),
    );

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "results.computeBatch",
        json!({ "scores": [] }),
    );

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "results.advanceStatus",
        json!({ "status": "draft", "to": "submitted" }),
    );

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "6",
        "rank.positions",
        json!({ "entries": [] }),
    );

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "7",
        "broadsheet.build",
        json!({
            "students": [],
            "results": [],
            "subjects": [],
            "classId": "jss1",
            "session": "2024/2025"
        }),
    );

    let unknown = request(
        &mut stdin,
        &mut reader,
        "8",
        "attendance.monthOpen",
        json!({}),
    );
    assert_eq!(unknown.get("ok").and_then(|v| v.as_bool()), Some(false));
    assert_eq!(
        unknown
            .get("error")
            .and_then(|e| e.get("code"))
            .and_then(|v| v.as_str()),
        Some("not_implemented")
    );

    drop(stdin);
    let _ = child.wait();
}
