mod broadsheet;
mod calc;
mod ipc;
mod model;
mod rank;

use std::io::{self, BufRead, Write};
use std::path::Path;

fn startup_scale() -> anyhow::Result<calc::GradingScale> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--scale" {
            let Some(path) = args.next() else {
                anyhow::bail!("--scale requires a file path");
            };
            return calc::GradingScale::from_json_file(Path::new(&path));
        }
    }
    Ok(calc::GradingScale::default())
}

fn main() {
    let scale = match startup_scale() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("resultsd: {e:#}");
            std::process::exit(2);
        }
    };
    let mut state = ipc::AppState { scale };

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: ipc::Request = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                // Can't reply without id; ignore.
                let _ = writeln!(
                    stdout,
                    "{{\"ok\":false,\"error\":{{\"code\":\"bad_json\",\"message\":\"{}\"}}}}",
                    e
                );
                let _ = stdout.flush();
                continue;
            }
        };

        let resp = ipc::handle_request(&mut state, req);
        let _ = writeln!(
            stdout,
            "{}",
            serde_json::to_string(&resp).unwrap_or_else(|_| "{\"ok\":false}".to_string())
        );
        let _ = stdout.flush();
    }
}
