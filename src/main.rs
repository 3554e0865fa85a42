use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;

use anyhow::Result;
use serde_json::json;

use intellistream::config::Config;
use intellistream::logging::{json_log, obj, v_num, v_str};
use intellistream::server::{format_response, parse_request_line, route, App};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();
    json_log(
        "system",
        obj(&[
            ("event", v_str("startup")),
            ("port", v_num(config.port as f64)),
            ("seed_latency_ms", v_num(config.seed_latency_ms as f64)),
        ]),
    );

    let mut app = App::boot(config.clone())?;
    // Initial snapshot load; the simulated fetch delay applies here too.
    app.data.reload(&app.provider).await;

    let listener = TcpListener::bind(format!("127.0.0.1:{}", config.port))?;
    println!("IntelliStream server running at http://localhost:{}", config.port);
    println!();
    println!("Endpoints:");
    println!("  GET /api/health                          - Health check");
    println!("  GET /api/state                           - Snapshot + session summary");
    println!("  GET /api/session                         - Session state and permissions");
    println!("  GET /api/session/domain?set=<name>       - Switch active domain");
    println!("  GET /api/session/role?set=<role>         - Switch active role");
    println!("  GET /api/overview                        - Operational overview");
    println!("  GET /api/executive                       - Executive cockpit");
    println!("  GET /api/datasets                        - Dataset catalog");
    println!("  GET /api/dataset/<domain>/<schema>/<ds>  - Dataset report");
    println!("  GET /api/explainability                  - Scenario book");
    println!("  GET /api/explainability/project?...      - What-if projection");
    println!("  GET /api/monitoring                      - Monitoring summary");
    println!("  GET /api/audit                           - Audit trail");
    println!();

    for stream in listener.incoming() {
        let mut stream = match stream {
            Ok(s) => s,
            Err(_) => continue,
        };

        let buf_reader = BufReader::new(&stream);
        let request_line = buf_reader.lines().next();
        let request = match request_line {
            Some(Ok(line)) => line,
            _ => continue,
        };

        let (status, body) = match parse_request_line(&request) {
            Some(req) => route(&mut app, &req),
            None => (400, json!({"error": "only GET is supported"})),
        };

        let response = format_response(status, &body);
        let _ = stream.write_all(response.as_bytes());

        // Apply session events (domain switches trigger the reload) and
        // persist prefs/audit before accepting the next request.
        app.sync().await;
    }

    Ok(())
}
