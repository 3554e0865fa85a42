//! Page payload assembly: one pure function per router-mounted view.
//!
//! These functions read the stores and return the JSON the view renders.
//! All aggregation the pages need (counts, at-risk lists, KPI deltas)
//! happens here; the stores stay dumb lookups.

use serde_json::{json, Value};

use crate::model::{DatasetStatus, DomainName};
use crate::scenario::{project, secondary_metrics, SliderValues};
use crate::session::SessionStore;
use crate::store::DataStore;

/// Fixed intraday incident trend shown on the executive cockpit.
const INCIDENT_TREND: [(&str, u32, u32); 7] = [
    ("00:00", 2, 8),
    ("04:00", 1, 3),
    ("08:00", 4, 2),
    ("12:00", 3, 5),
    ("16:00", 6, 4),
    ("20:00", 2, 6),
    ("24:00", 1, 3),
];

pub fn session_payload(session: &SessionStore) -> Value {
    json!({
        "domain": session.domain().as_str(),
        "role": session.role().as_str(),
        "selected_schema": session.selected_schema(),
        "sidebar_collapsed": session.sidebar_collapsed(),
        "permissions": session.permissions(),
    })
}

pub fn state_payload(data: &DataStore, session: &SessionStore) -> Value {
    let (domains, datasets, hash) = match data.snapshot() {
        Some(snapshot) => (
            snapshot.domains.len(),
            snapshot.dataset_count(),
            Some(snapshot.content_hash()),
        ),
        None => (0, 0, None),
    };
    json!({
        "loaded": data.is_loaded(),
        "loading": data.is_loading(),
        "domains": domains,
        "datasets": datasets,
        "snapshot_hash": hash,
        "session": session_payload(session),
    })
}

/// Operational overview: schema/dataset counts plus the at-risk list for the
/// active domain. Degraded datasets count as at risk.
pub fn overview(data: &DataStore, session: &SessionStore) -> Option<Value> {
    let domain = data.current_domain(session.domain())?;
    let total_schemas = domain.schemas.len();
    let total_datasets: usize = domain.schemas.iter().map(|s| s.datasets.len()).sum();
    let at_risk: Vec<Value> = domain
        .schemas
        .iter()
        .flat_map(|s| {
            s.datasets
                .iter()
                .filter(|d| d.status != DatasetStatus::Healthy)
                .map(move |d| {
                    json!({
                        "schema": &s.name,
                        "dataset": &d.name,
                        "status": d.status.as_str(),
                        "owner": &d.owner,
                    })
                })
        })
        .collect();

    Some(json!({
        "domain": domain.name.as_str(),
        "total_schemas": total_schemas,
        "total_datasets": total_datasets,
        "at_risk_count": at_risk.len(),
        "at_risk": at_risk,
        "kpis": domain.kpis,
    }))
}

/// Executive cockpit: KPI cards with their (fixed) deltas, trust score by
/// schema and the incident trend.
pub fn executive(data: &DataStore, session: &SessionStore) -> Option<Value> {
    let domain = data.current_domain(session.domain())?;
    let kpis = &domain.kpis;

    let card = |title: &str, value: f64, delta: f64, trend: &str, subtitle: &str| {
        json!({
            "title": title,
            "value": value,
            "delta": delta,
            "trend": trend,
            "subtitle": subtitle,
        })
    };

    let trust_by_schema: Vec<Value> = domain
        .schemas
        .iter()
        .map(|s| json!({"name": &s.name, "trust_score": s.trust_score}))
        .collect();

    let incident_trend: Vec<Value> = INCIDENT_TREND
        .iter()
        .map(|(time, incidents, resolved)| {
            json!({"time": time, "incidents": incidents, "resolved": resolved})
        })
        .collect();

    Some(json!({
        "domain": domain.name.as_str(),
        "cards": [
            card("Reliability", kpis.reliability, 2.0, "up", "System uptime"),
            card("Governance", kpis.governance, -1.0, "down", "Policy compliance"),
            card("Data Coverage", kpis.data_coverage, 3.0, "up", "Schema coverage"),
            card("Model Uptime", kpis.model_uptime, 0.0, "stable", "ML availability"),
        ],
        "trust_score_by_schema": trust_by_schema,
        "incident_trend": incident_trend,
        "incidents_last_7d": kpis.incidents_last_7d,
    }))
}

/// Dataset catalog for the active domain.
pub fn datasets(data: &DataStore, session: &SessionStore) -> Option<Value> {
    let domain = data.current_domain(session.domain())?;
    let schemas: Vec<Value> = domain
        .schemas
        .iter()
        .map(|s| {
            json!({
                "name": &s.name,
                "trust_score": s.trust_score,
                "datasets": &s.datasets,
            })
        })
        .collect();
    Some(json!({
        "domain": domain.name.as_str(),
        "selected_schema": session.selected_schema(),
        "schemas": schemas,
    }))
}

/// Dataset report. `None` when the dataset is not in the catalog (the page
/// renders its not-found state).
pub fn dataset_report(
    data: &DataStore,
    domain: DomainName,
    schema: &str,
    dataset: &str,
) -> Option<Value> {
    let detail = data.dataset_detail(domain, schema, dataset)?;
    let trust_now = detail.trust_score_trend_30d.last().copied().unwrap_or(0.0);
    let pii_columns = detail.columns.iter().filter(|c| c.pii).count();
    let run_failures = detail
        .pipeline_runs
        .iter()
        .filter(|r| r.status != crate::model::RunStatus::Success)
        .count();
    Some(json!({
        "trust_score_now": trust_now,
        "pii_columns": pii_columns,
        "run_failures": run_failures,
        "detail": detail,
    }))
}

/// Scenario book for the active domain's explainability sandbox.
pub fn explainability(data: &DataStore, session: &SessionStore) -> Option<Value> {
    let book = data.scenario_book(session.domain())?;
    Some(json!({
        "domain": session.domain().as_str(),
        "model": &book.model,
        "decision_label": &book.decision_label,
        "baseline_value": book.baseline_value,
        "scenarios": &book.scenarios,
    }))
}

/// Runs the projection engine for one scenario of the active domain's book
/// and returns the simulated value plus the secondary metric panel.
pub fn explainability_projection(
    data: &DataStore,
    session: &SessionStore,
    scenario_name: &str,
    sliders: &SliderValues,
) -> Option<Value> {
    let book = data.scenario_book(session.domain())?;
    let scenario = book.scenario(scenario_name)?;
    let baseline = book.baseline_value;
    let simulated = project(scenario, sliders, baseline);
    let metrics = secondary_metrics(sliders, baseline, simulated);
    Some(json!({
        "domain": session.domain().as_str(),
        "scenario": &scenario.name,
        "decision_label": &book.decision_label,
        "baseline": baseline,
        "simulated": simulated,
        "metrics": metrics,
        "key_drivers": &scenario.key_drivers,
    }))
}

/// Monitoring summary. Fixed demo telemetry.
pub fn monitoring() -> Value {
    json!({
        "active_pipelines": 247,
        "active_pipelines_delta_pct": 12,
        "open_incidents": 3,
        "auto_fixes_this_week": 156,
        "auto_fixes_delta_pct": 24,
        "sla_compliance_pct": 99.2,
    })
}

pub fn audit(session: &SessionStore) -> Value {
    let entries: Vec<_> = session.audit_entries().collect();
    json!({
        "count": entries.len(),
        "entries": entries,
    })
}
