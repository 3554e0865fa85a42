//! JSON-over-HTTP surface for the dashboard views.
//!
//! Request-line routing over a plain TCP listener: a single-threaded accept
//! loop, one request handled to completion at a time, no interleaving. The
//! route handlers only read the stores and enqueue session events; the shell
//! (`App::sync`) drains those events between requests and performs the
//! actual data reload, so dispatch stays strictly sequential.

use anyhow::Result;
use serde_json::{json, Value};

use crate::config::Config;
use crate::logging::{json_log, log, obj, params_hash, v_bool, v_num, v_str, Level, LogDomain};
use crate::model::{AuditEntityKind, DomainName, Role};
use crate::pages;
use crate::scenario::SliderValues;
use crate::seed::SeedProvider;
use crate::session::{AppEvent, SessionStore};
use crate::storage::SessionDb;
use crate::store::DataStore;

pub struct App {
    pub config: Config,
    pub provider: SeedProvider,
    pub session: SessionStore,
    pub data: DataStore,
    pub db: Option<SessionDb>,
}

impl App {
    /// Builds the application shell: validated seed provider, session state
    /// restored from local storage when present, empty data store. The
    /// caller performs the initial snapshot load.
    pub fn boot(config: Config) -> Result<Self> {
        let provider = SeedProvider::new(config.seed_latency_ms)
            .map_err(|e| anyhow::anyhow!("seed validation failed: {}", e))?;

        let db = match SessionDb::new(&config.sqlite_path) {
            Ok(mut db) => match db.init() {
                Ok(()) => Some(db),
                Err(err) => {
                    json_log("storage", obj(&[("error", v_str(&err.to_string()))]));
                    None
                }
            },
            Err(err) => {
                json_log("storage", obj(&[("error", v_str(&err.to_string()))]));
                None
            }
        };

        let prefs = db
            .as_ref()
            .and_then(|db| db.load_prefs().ok().flatten());
        let session = match prefs {
            Some(prefs) => {
                json_log(
                    "session",
                    obj(&[
                        ("event", v_str("restored")),
                        ("domain", v_str(prefs.domain.as_str())),
                        ("role", v_str(prefs.role.as_str())),
                    ]),
                );
                SessionStore::from_prefs(prefs)
            }
            None => SessionStore::new(config.default_domain, config.default_role),
        };

        Ok(Self {
            config,
            provider,
            session,
            data: DataStore::new(),
            db,
        })
    }

    /// Drains pending session events and applies their consequences: a
    /// domain change triggers a data reload; every drain persists the
    /// session prefs and audit trail (best effort).
    pub async fn sync(&mut self) {
        for event in self.session.drain_events() {
            match event {
                AppEvent::DomainChanged(domain) => {
                    json_log(
                        "session",
                        obj(&[
                            ("event", v_str("domain_changed")),
                            ("domain", v_str(domain.as_str())),
                        ]),
                    );
                    self.data.reload(&self.provider).await;
                }
                AppEvent::RoleChanged(role) => {
                    json_log(
                        "session",
                        obj(&[
                            ("event", v_str("role_changed")),
                            ("role", v_str(role.as_str())),
                        ]),
                    );
                }
            }
        }
        if let Some(db) = self.db.as_mut() {
            let now = crate::logging::ts_now();
            if let Err(err) = db.persist_prefs(&self.session.prefs(), &now) {
                json_log("storage", obj(&[("error", v_str(&err.to_string()))]));
            }
            let entries: Vec<_> = self.session.audit_entries().cloned().collect();
            if let Err(err) = db.persist_audit(&entries) {
                json_log("storage", obj(&[("error", v_str(&err.to_string()))]));
            }
        }
    }
}

// =============================================================================
// Request parsing
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl Request {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Parses a `GET /path?query HTTP/1.1` request line. Anything that is not a
/// GET is rejected up front.
pub fn parse_request_line(line: &str) -> Option<Request> {
    let mut parts = line.split_whitespace();
    if parts.next()? != "GET" {
        return None;
    }
    let target = parts.next()?;
    let (path, query) = match target.split_once('?') {
        Some((p, q)) => (p, q),
        None => (target, ""),
    };
    let query = query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((k, v)) => (percent_decode(k), percent_decode(v)),
            None => (percent_decode(pair), String::new()),
        })
        .collect();
    Some(Request {
        path: percent_decode(path),
        query,
    })
}

/// Minimal percent decoding ('+' as space, %XX hex escapes). Bad escapes
/// pass through verbatim.
pub fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' => {
                let hex = bytes.get(i + 1..i + 3);
                match hex.and_then(|h| u8::from_str_radix(std::str::from_utf8(h).ok()?, 16).ok()) {
                    Some(byte) => {
                        out.push(byte);
                        i += 3;
                    }
                    None => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

// =============================================================================
// Routing
// =============================================================================

fn not_found(what: &str) -> (u16, Value) {
    (404, json!({"error": format!("{} not found", what)}))
}

fn bad_request(msg: String) -> (u16, Value) {
    (400, json!({"error": msg}))
}

/// Dispatches one parsed request against the stores. Pure reads plus event
/// enqueues; no awaiting here.
pub fn route(app: &mut App, req: &Request) -> (u16, Value) {
    log(
        Level::Debug,
        LogDomain::Http,
        "request",
        obj(&[
            ("path", v_str(&req.path)),
            ("params", v_str(&params_hash(&format!("{:?}", req.query)))),
        ]),
    );

    match req.path.as_str() {
        "/api/health" => (200, json!({"status": "ok"})),
        "/api/state" => (200, pages::state_payload(&app.data, &app.session)),
        "/api/session" => (200, pages::session_payload(&app.session)),
        "/api/session/domain" => match req.param("set") {
            Some(raw) => match DomainName::parse(raw) {
                Some(domain) => {
                    let previous = app.session.domain();
                    app.session.set_domain(domain);
                    app.session.record_audit(
                        "switch_domain",
                        AuditEntityKind::Session,
                        domain.as_str(),
                        json!({"from": previous.as_str()}),
                    );
                    (200, pages::session_payload(&app.session))
                }
                None => bad_request(format!("unknown domain '{}'", raw)),
            },
            None => bad_request("missing 'set' parameter".to_string()),
        },
        "/api/session/sidebar" => match req.param("set") {
            Some("true") => {
                app.session.set_sidebar_collapsed(true);
                (200, pages::session_payload(&app.session))
            }
            Some("false") => {
                app.session.set_sidebar_collapsed(false);
                (200, pages::session_payload(&app.session))
            }
            _ => bad_request("expected set=true or set=false".to_string()),
        },
        "/api/session/role" => match req.param("set") {
            Some(raw) => match Role::parse(raw) {
                Some(role) => {
                    app.session.set_role(role);
                    app.session.record_audit(
                        "switch_role",
                        AuditEntityKind::Session,
                        role.as_str(),
                        json!({}),
                    );
                    (200, pages::session_payload(&app.session))
                }
                None => bad_request(format!("unknown role '{}'", raw)),
            },
            None => bad_request("missing 'set' parameter".to_string()),
        },
        "/api/overview" => match pages::overview(&app.data, &app.session) {
            Some(page) => (200, page),
            None => (503, json!({"error": "snapshot not loaded"})),
        },
        "/api/executive" => match pages::executive(&app.data, &app.session) {
            Some(page) => (200, page),
            None => (503, json!({"error": "snapshot not loaded"})),
        },
        "/api/datasets" => {
            if let Some(schema) = req.param("schema") {
                app.session.set_selected_schema(schema);
            }
            match pages::datasets(&app.data, &app.session) {
                Some(page) => (200, page),
                None => (503, json!({"error": "snapshot not loaded"})),
            }
        }
        "/api/monitoring" => (200, pages::monitoring()),
        "/api/explainability" => match pages::explainability(&app.data, &app.session) {
            Some(page) => (200, page),
            None => not_found("scenario book"),
        },
        "/api/explainability/project" => {
            let name = match req.param("scenario") {
                Some(name) => name.to_string(),
                None => return bad_request("missing 'scenario' parameter".to_string()),
            };
            let mut sliders = SliderValues::new();
            for (key, value) in &req.query {
                if key == "scenario" {
                    continue;
                }
                if let Ok(v) = value.parse::<f64>() {
                    sliders.set(key, v);
                }
            }
            json_log(
                "scenario",
                obj(&[
                    ("scenario", v_str(&name)),
                    ("sliders_touched", v_num((req.query.len().saturating_sub(1)) as f64)),
                    ("untouched_defaults", v_bool(sliders.is_empty())),
                ]),
            );
            match pages::explainability_projection(&app.data, &app.session, &name, &sliders) {
                Some(page) => (200, page),
                None => not_found("scenario"),
            }
        }
        "/api/audit" => (200, pages::audit(&app.session)),
        path if path.starts_with("/api/dataset/") => {
            let rest = &path["/api/dataset/".len()..];
            let segments: Vec<&str> = rest.split('/').collect();
            if segments.len() != 3 {
                return bad_request("expected /api/dataset/<domain>/<schema>/<dataset>".to_string());
            }
            let domain = match DomainName::parse(segments[0]) {
                Some(d) => d,
                None => return not_found("dataset"),
            };
            match pages::dataset_report(&app.data, domain, segments[1], segments[2]) {
                Some(page) => {
                    app.session.record_audit(
                        "view_dataset",
                        AuditEntityKind::Dataset,
                        &format!("{}-{}-{}", segments[0], segments[1], segments[2]),
                        json!({}),
                    );
                    (200, page)
                }
                None => not_found("dataset"),
            }
        }
        _ => not_found("route"),
    }
}

// =============================================================================
// Response framing
// =============================================================================

fn status_text(status: u16) -> &'static str {
    match status {
        200 => "200 OK",
        400 => "400 BAD REQUEST",
        404 => "404 NOT FOUND",
        503 => "503 SERVICE UNAVAILABLE",
        _ => "500 INTERNAL SERVER ERROR",
    }
}

pub fn format_response(status: u16, body: &Value) -> String {
    let body = body.to_string();
    format!(
        "HTTP/1.1 {}\r\n\
         Content-Type: application/json\r\n\
         Access-Control-Allow-Origin: *\r\n\
         Content-Length: {}\r\n\r\n{}",
        status_text(status),
        body.len(),
        body
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn booted_app() -> App {
        let config = Config {
            port: 0,
            seed_latency_ms: 0,
            sqlite_path: ":memory:".to_string(),
            default_domain: DomainName::Telco,
            default_role: Role::Admin,
        };
        let mut app = App::boot(config).unwrap();
        app.data.reload(&app.provider).await;
        app
    }

    fn get(app: &mut App, target: &str) -> (u16, Value) {
        let req = parse_request_line(&format!("GET {} HTTP/1.1", target)).unwrap();
        route(app, &req)
    }

    #[test]
    fn request_line_parsing() {
        let req = parse_request_line("GET /api/overview HTTP/1.1").unwrap();
        assert_eq!(req.path, "/api/overview");
        assert!(req.query.is_empty());

        let req = parse_request_line("GET /api/session/domain?set=Telco HTTP/1.1").unwrap();
        assert_eq!(req.param("set"), Some("Telco"));

        assert!(parse_request_line("POST /api/overview HTTP/1.1").is_none());
    }

    #[test]
    fn percent_decoding() {
        assert_eq!(percent_decode("Reduce%20Dropped%20Calls"), "Reduce Dropped Calls");
        assert_eq!(percent_decode("a+b"), "a b");
        assert_eq!(percent_decode("100%25"), "100%");
        // Bad escapes pass through.
        assert_eq!(percent_decode("%zz"), "%zz");
        assert_eq!(percent_decode("%2"), "%2");
    }

    #[tokio::test]
    async fn health_and_state() {
        let mut app = booted_app().await;
        let (status, body) = get(&mut app, "/api/health");
        assert_eq!(status, 200);
        assert_eq!(body["status"], "ok");

        let (status, body) = get(&mut app, "/api/state");
        assert_eq!(status, 200);
        assert_eq!(body["domains"], 5);
        assert!(body["snapshot_hash"].is_string());
    }

    #[tokio::test]
    async fn domain_switch_enqueues_reload_and_audits() {
        let mut app = booted_app().await;
        let (status, body) = get(&mut app, "/api/session/domain?set=Healthcare");
        assert_eq!(status, 200);
        assert_eq!(body["domain"], "Healthcare");

        // The event is pending until the shell syncs.
        app.sync().await;
        let (_, page) = get(&mut app, "/api/overview");
        assert_eq!(page["domain"], "Healthcare");

        let (_, audit) = get(&mut app, "/api/audit");
        assert_eq!(audit["entries"][0]["action"], "switch_domain");
    }

    #[tokio::test]
    async fn invalid_domain_is_rejected() {
        let mut app = booted_app().await;
        let (status, body) = get(&mut app, "/api/session/domain?set=Retail");
        assert_eq!(status, 400);
        assert!(body["error"].as_str().unwrap().contains("Retail"));
    }

    #[tokio::test]
    async fn dataset_routes() {
        let mut app = booted_app().await;
        let (status, body) =
            get(&mut app, "/api/dataset/Telco/Customers/customer_master");
        assert_eq!(status, 200);
        assert_eq!(body["detail"]["dataset"], "customer_master");

        let (status, _) = get(&mut app, "/api/dataset/Telco/Customers/ghost");
        assert_eq!(status, 404);

        let (status, _) = get(&mut app, "/api/dataset/Nowhere/X/y");
        assert_eq!(status, 404);
    }

    #[tokio::test]
    async fn projection_route_runs_engine() {
        let mut app = booted_app().await;
        let (status, body) = get(
            &mut app,
            "/api/explainability/project?scenario=Reduce%20Dropped%20Calls%20by%2010%25&dropped_calls_delta=-10",
        );
        assert_eq!(status, 200);
        let simulated = body["simulated"].as_f64().unwrap();
        assert!((simulated - 22.145).abs() < 1e-9);

        let (status, _) = get(&mut app, "/api/explainability/project?scenario=Nope");
        assert_eq!(status, 404);
    }

    #[tokio::test]
    async fn datasets_schema_selection_sticks() {
        let mut app = booted_app().await;
        let (_, body) = get(&mut app, "/api/datasets?schema=Network");
        assert_eq!(body["selected_schema"], "Network");
        // Selection persists across requests until changed.
        let (_, body) = get(&mut app, "/api/datasets");
        assert_eq!(body["selected_schema"], "Network");
    }

    #[tokio::test]
    async fn sidebar_toggle() {
        let mut app = booted_app().await;
        let (_, body) = get(&mut app, "/api/session/sidebar?set=true");
        assert_eq!(body["sidebar_collapsed"], true);
        let (status, _) = get(&mut app, "/api/session/sidebar?set=maybe");
        assert_eq!(status, 400);
    }

    #[tokio::test]
    async fn role_switch_updates_permissions() {
        let mut app = booted_app().await;
        let (_, body) = get(&mut app, "/api/session/role?set=viewer");
        assert_eq!(body["permissions"]["can_manage_rbac"], false);
        let (_, body) = get(&mut app, "/api/session/role?set=security_admin");
        assert_eq!(body["permissions"]["can_manage_rbac"], true);
    }

    #[test]
    fn response_framing() {
        let body = json!({"ok": true});
        let resp = format_response(200, &body);
        assert!(resp.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(resp.contains("Content-Type: application/json"));
        assert!(resp.ends_with(&body.to_string()));
    }
}
