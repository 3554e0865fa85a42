//! End-to-end smoke: boot the app shell, walk every domain through the main
//! routes, and verify the session/reload wiring holds together.

use intellistream::config::Config;
use intellistream::model::{DomainName, Role};
use intellistream::server::{parse_request_line, route, App};
use serde_json::Value;
use tempfile::TempDir;

fn test_config(sqlite_path: String) -> Config {
    Config {
        port: 0,
        seed_latency_ms: 0,
        sqlite_path,
        default_domain: DomainName::Travel,
        default_role: Role::Admin,
    }
}

async fn booted_app(dir: &TempDir) -> App {
    let path = dir.path().join("session.sqlite");
    let config = test_config(path.to_string_lossy().into_owned());
    let mut app = App::boot(config).unwrap();
    app.data.reload(&app.provider).await;
    app
}

fn get(app: &mut App, target: &str) -> (u16, Value) {
    let req = parse_request_line(&format!("GET {} HTTP/1.1", target)).unwrap();
    route(app, &req)
}

#[tokio::test]
async fn all_pages_render_for_every_domain() {
    let dir = TempDir::new().unwrap();
    let mut app = booted_app(&dir).await;

    for domain in DomainName::ALL {
        let (status, _) = get(&mut app, &format!("/api/session/domain?set={}", domain.as_str()));
        assert_eq!(status, 200);
        app.sync().await;

        for path in ["/api/overview", "/api/executive", "/api/datasets", "/api/explainability"] {
            let (status, body) = get(&mut app, path);
            assert_eq!(status, 200, "{} failed for {}", path, domain.as_str());
            assert_eq!(body["domain"], domain.as_str());
        }

        // The scenario book always offers three explorable scenarios.
        let (_, book) = get(&mut app, "/api/explainability");
        assert_eq!(book["scenarios"].as_array().unwrap().len(), 3);
    }
}

#[tokio::test]
async fn untouched_projection_equals_baseline_when_defaults_are_zero() {
    let dir = TempDir::new().unwrap();
    let mut app = booted_app(&dir).await;

    get(&mut app, "/api/session/domain?set=Healthcare");
    app.sync().await;

    let (status, body) = get(
        &mut app,
        "/api/explainability/project?scenario=Optimize%20ER%20Wait%20Times",
    );
    assert_eq!(status, 200);
    assert_eq!(body["baseline"], body["simulated"]);

    let metrics = body["metrics"].as_array().unwrap();
    assert_eq!(metrics.len(), 4);
    assert_eq!(metrics[2]["simulated"], 45.0);
    assert_eq!(metrics[3]["simulated"], 950.0);
}

#[tokio::test]
async fn dataset_report_roundtrip_and_not_found() {
    let dir = TempDir::new().unwrap();
    let mut app = booted_app(&dir).await;

    get(&mut app, "/api/session/domain?set=BFSI");
    app.sync().await;

    // Handwritten record.
    let (status, body) = get(&mut app, "/api/dataset/BFSI/RiskCompliance/aml_alerts");
    assert_eq!(status, 200);
    assert_eq!(body["detail"]["schema"], "RiskCompliance");

    // Catalogued but synthesized.
    let (status, body) = get(&mut app, "/api/dataset/BFSI/Loans/loan_portfolio");
    assert_eq!(status, 200);
    assert!(body["detail"]["description"]
        .as_str()
        .unwrap()
        .starts_with("Auto-generated detail"));

    // Not in the catalog: page-level not-found.
    let (status, body) = get(&mut app, "/api/dataset/BFSI/Loans/shadow_book");
    assert_eq!(status, 404);
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn session_prefs_survive_restart() {
    let dir = TempDir::new().unwrap();

    {
        let mut app = booted_app(&dir).await;
        get(&mut app, "/api/session/domain?set=Telco");
        get(&mut app, "/api/session/role?set=analyst");
        app.sync().await;
    }

    // Same sqlite path, fresh process: prefs come back.
    let app = booted_app(&dir).await;
    assert_eq!(app.session.domain(), DomainName::Telco);
    assert_eq!(app.session.role(), Role::Analyst);
}

#[tokio::test]
async fn audit_trail_accumulates_across_requests() {
    let dir = TempDir::new().unwrap();
    let mut app = booted_app(&dir).await;

    get(&mut app, "/api/session/domain?set=Telco");
    app.sync().await;
    get(&mut app, "/api/dataset/Telco/Customers/churn_history");
    get(&mut app, "/api/session/role?set=engineer");
    app.sync().await;

    let (_, audit) = get(&mut app, "/api/audit");
    let entries = audit["entries"].as_array().unwrap();
    assert!(entries.len() >= 3);
    // Newest first.
    assert_eq!(entries[0]["action"], "switch_role");
    let actions: Vec<_> = entries.iter().map(|e| e["action"].as_str().unwrap()).collect();
    assert!(actions.contains(&"view_dataset"));
    assert!(actions.contains(&"switch_domain"));
}

#[tokio::test]
async fn monitoring_summary_is_static() {
    let dir = TempDir::new().unwrap();
    let mut app = booted_app(&dir).await;
    let (status, body) = get(&mut app, "/api/monitoring");
    assert_eq!(status, 200);
    assert_eq!(body["active_pipelines"], 247);
    assert_eq!(body["sla_compliance_pct"], 99.2);
}
