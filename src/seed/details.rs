//! Handwritten dataset detail records.
//!
//! Only a representative subset of the catalog carries a full handwritten
//! record; every other catalogued dataset is synthesized from the base
//! template at lookup time (see `seed::synthesize_detail`).

use std::collections::BTreeMap;

use crate::model::{DatasetColumn, DatasetDetail, PipelineRun, QualityRow, RunStatus};

fn strs(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn trend(f: impl Fn(usize) -> f64) -> Vec<f64> {
    (0..30).map(|i| (f(i) * 100.0).round() / 100.0).collect()
}

fn tag_map(entries: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), strs(v)))
        .collect()
}

fn columns(rows: &[(&str, &str, &str, bool)]) -> Vec<DatasetColumn> {
    rows.iter()
        .map(|(name, datatype, description, pii)| DatasetColumn {
            name: name.to_string(),
            datatype: datatype.to_string(),
            description: description.to_string(),
            pii: *pii,
        })
        .collect()
}

fn quality(rows: &[(&str, f64, f64, f64, f64, &str)]) -> Vec<QualityRow> {
    rows.iter()
        .map(|(column, null_pct, dup_pct, outlier_pct, fmt_pct, fix)| QualityRow {
            column: column.to_string(),
            null_pct: *null_pct,
            dup_pct: *dup_pct,
            outlier_pct: *outlier_pct,
            format_violations_pct: *fmt_pct,
            suggested_fix: fix.to_string(),
        })
        .collect()
}

fn run(run_id: &str, started: &str, duration_min: u32) -> PipelineRun {
    PipelineRun {
        run_id: run_id.to_string(),
        started: started.to_string(),
        duration_min,
        status: RunStatus::Success,
        issue: None,
        fix: None,
    }
}

fn run_fixed(run_id: &str, started: &str, duration_min: u32, issue: &str, fix: &str) -> PipelineRun {
    PipelineRun {
        run_id: run_id.to_string(),
        started: started.to_string(),
        duration_min,
        status: RunStatus::FixedByAgent,
        issue: Some(issue.to_string()),
        fix: Some(fix.to_string()),
    }
}

fn run_failed(run_id: &str, started: &str, duration_min: u32, issue: &str) -> PipelineRun {
    PipelineRun {
        run_id: run_id.to_string(),
        started: started.to_string(),
        duration_min,
        status: RunStatus::Failed,
        issue: Some(issue.to_string()),
        fix: None,
    }
}

/// The Travel pricing record doubles as the synthesis template for datasets
/// without a handwritten entry.
pub fn base_detail() -> DatasetDetail {
    DatasetDetail {
        domain: "Travel".to_string(),
        schema: "Pricing".to_string(),
        dataset: "daily_fares".to_string(),
        description: "Aggregated daily economy class fares by route/date/channel for top metro pairs.".to_string(),
        tags: strs(&["pricing", "economy", "metro-routes"]),
        owners: strs(&["revops@datacorp.com", "governance@datacorp.com"]),
        trust_score_trend_30d: trend(|i| 80.0 + (i % 6) as f64),
        domain_tags: strs(&["Travel", "Aviation", "Airline Operations"]),
        functional_tags: strs(&["Revenue Management", "Pricing", "Demand Forecasting"]),
        column_tags: tag_map(&[
            ("flight_date", &["Date", "Partition Key"]),
            ("origin", &["IATA Code", "Dimension"]),
            ("destination", &["IATA Code", "Dimension"]),
            ("rbd", &["Booking Class"]),
            ("channel", &["Sales Channel"]),
            ("fare_amount", &["Metric", "Currency"]),
            ("pnr_id", &["PII", "Masked Identifier"]),
        ]),
        column_issues: tag_map(&[("fare_amount", &["Outliers above 99th percentile"])]),
        columns: columns(&[
            ("flight_date", "DATE", "Flight departure date", false),
            ("origin", "STRING", "IATA origin code", false),
            ("destination", "STRING", "IATA destination code", false),
            ("rbd", "STRING", "Booking class", false),
            ("channel", "STRING", "Direct/OTA", false),
            ("fare_amount", "FLOAT", "Eco fare in local currency", false),
            ("pnr_id", "STRING", "Masked booking reference", true),
        ]),
        quality_report: quality(&[
            ("flight_date", 0.1, 0.0, 0.0, 0.0, "Fill missing dates"),
            ("origin", 0.0, 0.0, 0.0, 0.3, "Validate IATA code"),
            ("destination", 0.0, 0.0, 0.0, 0.2, "Validate IATA code"),
            ("fare_amount", 0.0, 0.0, 1.5, 0.0, "Winsorize outliers"),
            ("pnr_id", 0.0, 0.0, 0.0, 0.0, "Mask using SHA256"),
        ]),
        pipeline_runs: vec![
            run("R-240901-01", "2025-09-01 01:00", 18),
            run_fixed("R-240902-02", "2025-09-02 01:00", 22, "Schema Drift", "Added column promo_flag STRING"),
            run("R-240903-03", "2025-09-03 01:00", 17),
        ],
    }
}

fn telco_customer_master() -> DatasetDetail {
    DatasetDetail {
        domain: "Telco".to_string(),
        schema: "Customers".to_string(),
        dataset: "customer_master".to_string(),
        description: "Master customer profile for subscribers: demographics, subscription plan, status, consent flags and contact details. Used by CRM, billing and personalization.".to_string(),
        tags: strs(&["customers", "profile", "account", "pii"]),
        owners: strs(&["crm@telco.com", "governance@telco.com"]),
        trust_score_trend_30d: trend(|i| 90.0 + (i as f64 / 4.0).sin() * 2.0),
        domain_tags: strs(&["Telecom", "Customer Data"]),
        functional_tags: strs(&["CRM", "Personalization", "Customer Analytics"]),
        column_tags: tag_map(&[
            ("customer_id", &["Primary Key", "Identifier"]),
            ("first_name", &["PII", "Name"]),
            ("last_name", &["PII", "Name"]),
            ("email", &["PII", "Contact"]),
            ("phone", &["PII", "Contact", "E.164"]),
            ("plan_type", &["Subscription", "Categorical"]),
            ("billing_type", &["Subscription Type", "Postpaid/Prepaid"]),
            ("activation_date", &["Date", "Lifecycle"]),
            ("last_active_date", &["Date", "Activity"]),
            ("monthly_arpu", &["KPI", "Monetary"]),
            ("consent_pdpa", &["Flag", "Privacy Consent"]),
            ("address_region", &["Geography"]),
            ("segment", &["Derived", "Customer Segment"]),
        ]),
        column_issues: tag_map(&[
            ("email", &["Invalid domain formats found", "MX check failing for 2.3%"]),
            ("phone", &["Non-standard country codes in 1.1%"]),
            ("monthly_arpu", &["Occasional negative values due to refunds"]),
        ]),
        columns: columns(&[
            ("customer_id", "STRING", "Unique internal customer ID (UUID)", false),
            ("first_name", "STRING", "Given name of customer", true),
            ("last_name", "STRING", "Family name of customer", true),
            ("email", "STRING", "Primary email address (normalized to lowercase)", true),
            ("phone", "STRING", "Primary mobile in E.164 format", true),
            ("plan_type", "STRING", "Plan category (Prepaid/Postpaid)", false),
            ("billing_type", "STRING", "Billing arrangement: prepaid/postpaid", false),
            ("activation_date", "DATE", "Activation date for current subscription", false),
            ("last_active_date", "DATE", "Last activity/touchpoint date", false),
            ("monthly_arpu", "FLOAT", "Average revenue per user — monthly (local currency)", false),
            ("consent_pdpa", "BOOLEAN", "Customer PDPA / consent flag for marketing", false),
            ("address_region", "STRING", "Regional grouping for network operations", false),
            ("segment", "STRING", "Customer segment label generated by analytics", false),
        ]),
        quality_report: quality(&[
            ("customer_id", 0.0, 0.05, 0.0, 0.0, "Ensure UUID uniqueness and backfill missing keys"),
            ("email", 0.8, 0.4, 0.0, 1.2, "Normalize domain and validate MX record"),
            ("phone", 0.2, 0.3, 0.0, 1.1, "Standardize to E.164 and remove country code anomalies"),
            ("plan_type", 0.0, 0.0, 0.0, 0.1, "Validate allowed values (Prepaid/Postpaid)"),
            ("monthly_arpu", 0.0, 0.0, 0.4, 0.0, "Cap negative ARPU from refund adjustments"),
            ("consent_pdpa", 0.0, 0.0, 0.0, 0.0, "Backfill consent flags from CRM where available"),
        ]),
        pipeline_runs: vec![
            run("CUST-20251101-01", "2025-11-01 02:00", 12),
            run("CUST-20251102-02", "2025-11-02 02:00", 15),
            run_fixed(
                "CUST-20251103-03",
                "2025-11-03 02:00",
                30,
                "Format Violations in phone",
                "Standardized to E.164 using regex and country mapping",
            ),
        ],
    }
}

fn telco_churn_history() -> DatasetDetail {
    DatasetDetail {
        domain: "Telco".to_string(),
        schema: "Customers".to_string(),
        dataset: "churn_history".to_string(),
        description: "Records of churn events: date, reason, customer profile snapshot and retention attempts. Used by retention teams and churn models.".to_string(),
        tags: strs(&["churn", "retention", "events"]),
        owners: strs(&["analytics@telco.com", "retention@telco.com"]),
        trust_score_trend_30d: trend(|i| 82.0 + (i as f64 / 5.0).cos() * 3.0),
        domain_tags: strs(&["Telecom", "Customer Experience"]),
        functional_tags: strs(&["Retention", "Churn Prediction", "CX Analytics"]),
        column_tags: tag_map(&[
            ("churn_id", &["Primary Key", "Event ID"]),
            ("customer_id", &["Foreign Key"]),
            ("churn_date", &["Date", "Event Timestamp"]),
            ("churn_channel", &["Categorical", "Channel"]),
            ("churn_reason", &["Categorical", "Reason"]),
            ("retention_contacted", &["Boolean", "Retention Action"]),
            ("retention_outcome", &["Categorical", "Outcome"]),
            ("prior_3m_avg_usage", &["Metric", "Behavior"]),
            ("prior_3m_avg_calls", &["Metric", "Behavior"]),
        ]),
        column_issues: tag_map(&[
            ("churn_reason", &["High proportion of 'Unknown' (5%)", "Free text responses need classification"]),
            ("retention_outcome", &["Nulls where contact not attempted"]),
        ]),
        columns: columns(&[
            ("churn_id", "STRING", "Unique churn event id", false),
            ("customer_id", "STRING", "Customer id (FK to customer_master)", false),
            ("churn_date", "DATE", "Date of churn event", false),
            ("churn_channel", "STRING", "Channel of churn (SIM return, voluntary, port-out)", false),
            ("churn_reason", "STRING", "Primary reason recorded (e.g., cost, network, churn-for-better-offer)", false),
            ("retention_contacted", "BOOLEAN", "Whether retention team attempted contact", false),
            ("retention_outcome", "STRING", "Outcome of retention attempt (kept/partial-offer/failed)", false),
            ("prior_3m_avg_usage", "FLOAT", "Average data usage last 3 months (GB)", false),
            ("prior_3m_avg_calls", "FLOAT", "Average calls last 3 months", false),
        ]),
        quality_report: quality(&[
            ("churn_id", 0.0, 0.0, 0.0, 0.0, "Ensure unique event ids"),
            ("customer_id", 0.0, 0.0, 0.0, 0.0, "Validate referential integrity with customer_master"),
            ("churn_reason", 2.1, 0.0, 0.0, 0.0, "Map free-text to standard taxonomy"),
            ("retention_outcome", 12.3, 0.0, 0.0, 0.0, "Mark 'not contacted' explicitly"),
        ]),
        pipeline_runs: vec![
            run("CHURN-20251101-01", "2025-11-01 03:00", 8),
            run("CHURN-20251105-02", "2025-11-05 03:00", 12),
            run_failed("CHURN-20251108-03", "2025-11-08 03:00", 16, "Source API timeout"),
        ],
    }
}

fn telco_tower_performance() -> DatasetDetail {
    DatasetDetail {
        domain: "Telco".to_string(),
        schema: "Network".to_string(),
        dataset: "tower_performance".to_string(),
        description: "Per tower telemetry and KPI summary (uptime, latency, packet loss, signal_strength). Used for network reliability and capacity planning.".to_string(),
        tags: strs(&["network", "telemetry", "tower"]),
        owners: strs(&["infra@telco.com", "network.ops@telco.com"]),
        trust_score_trend_30d: trend(|i| 78.0 + (i as f64 / 4.0).sin() * 3.0),
        domain_tags: strs(&["Telecom", "Infrastructure"]),
        functional_tags: strs(&["Network Reliability", "Capacity Planning", "NOC"]),
        column_tags: tag_map(&[
            ("tower_id", &["Primary Key", "Infrastructure ID"]),
            ("region", &["Geographic Attribute"]),
            ("site_type", &["Macro/Micro/Small Cell"]),
            ("uptime_pct", &["KPI", "Reliability Metric"]),
            ("avg_latency_ms", &["Performance Metric"]),
            ("packet_loss_pct", &["Performance Metric"]),
            ("signal_strength_dbm", &["Network Metric", "Quality Indicator"]),
            ("last_maintenance_date", &["Date", "Lifecycle"]),
            ("active_users", &["Metric", "Load Indicator"]),
        ]),
        column_issues: tag_map(&[
            ("packet_loss_pct", &["Sparse telemetry during maintenance windows (5%)"]),
            ("avg_latency_ms", &["Spikes during peak hours require aggregation smoothing"]),
        ]),
        columns: columns(&[
            ("tower_id", "STRING", "Unique tower/site identifier", false),
            ("region", "STRING", "Region or state code", false),
            ("site_type", "STRING", "Macro/Micro/Small cell classification", false),
            ("uptime_pct", "FLOAT", "Uptime percentage for reporting window", false),
            ("avg_latency_ms", "FLOAT", "Average network latency at tower", false),
            ("packet_loss_pct", "FLOAT", "Packet loss percentage", false),
            ("signal_strength_dbm", "FLOAT", "Average signal strength in dBm", false),
            ("last_maintenance_date", "DATE", "Date of last scheduled maintenance", false),
            ("active_users", "INT", "Number of active users attached to tower", false),
        ]),
        quality_report: quality(&[
            ("tower_id", 0.0, 0.0, 0.0, 0.0, "Standardize tower ID format"),
            ("uptime_pct", 0.0, 0.0, 0.2, 0.0, "Clip values to 0-100"),
            ("avg_latency_ms", 0.4, 0.0, 0.5, 0.0, "Aggregate/smooth telemetry spikes"),
            ("signal_strength_dbm", 0.0, 0.0, 0.7, 0.0, "Flag towers with < -100 dBm for investigation"),
        ]),
        pipeline_runs: vec![
            run("TOWER-20251101-01", "2025-11-01 00:15", 45),
            run("TOWER-20251103-02", "2025-11-03 00:20", 60),
            run_fixed(
                "TOWER-20251106-03",
                "2025-11-06 00:10",
                120,
                "Missing telemetry partitions",
                "Backfilled partitions from backup S3",
            ),
        ],
    }
}

fn hospitality_guest_feedback() -> DatasetDetail {
    DatasetDetail {
        domain: "Hospitality".to_string(),
        schema: "CustomerExperience".to_string(),
        dataset: "guest_feedback".to_string(),
        description: "Guest feedback and review dataset aggregated from post-stay surveys and online review platforms. Includes satisfaction scores and NLP sentiment tags.".to_string(),
        tags: strs(&["guest", "feedback", "reviews"]),
        owners: strs(&["cx@hospitality.com", "analytics@hospitality.com"]),
        trust_score_trend_30d: trend(|i| 85.0 + (i as f64 / 2.0).sin() * 2.0),
        domain_tags: strs(&["Hospitality", "CX"]),
        functional_tags: strs(&["Sentiment Analysis", "Reputation Management"]),
        column_tags: tag_map(&[
            ("review_id", &["Primary Key"]),
            ("property_id", &["Foreign Key"]),
            ("guest_id", &["Foreign Key"]),
            ("satisfaction_score", &["Metric", "0–10"]),
            ("sentiment_score", &["Metric", "-1 to 1"]),
            ("platform", &["Categorical"]),
            ("review_text", &["Free Text"]),
            ("created_at", &["Timestamp"]),
        ]),
        column_issues: tag_map(&[("sentiment_score", &["Low correlation with manual tags (0.9%)"])]),
        columns: columns(&[
            ("review_id", "STRING", "Unique review ID", false),
            ("property_id", "STRING", "Linked hotel property", false),
            ("guest_id", "STRING", "Guest identifier (masked)", true),
            ("satisfaction_score", "INT", "Guest satisfaction score (0–10)", false),
            ("sentiment_score", "FLOAT", "AI-predicted sentiment score (-1 to +1)", false),
            ("platform", "STRING", "Source of review (Survey, OTA, Social)", false),
            ("review_text", "STRING", "Free-text review content", true),
            ("created_at", "TIMESTAMP", "Date/time of review creation", false),
        ]),
        quality_report: quality(&[
            ("satisfaction_score", 0.3, 0.0, 0.2, 0.0, "Ensure valid 0–10 scale"),
            ("sentiment_score", 0.0, 0.0, 0.9, 0.0, "Retrain sentiment model quarterly"),
        ]),
        pipeline_runs: vec![
            run("GUEST-20251101-01", "2025-11-01 10:00", 25),
            run_fixed("GUEST-20251104-02", "2025-11-04 10:30", 28, "Sentiment model drift", "Re-scored reviews"),
        ],
    }
}

fn healthcare_insurance_claims() -> DatasetDetail {
    DatasetDetail {
        domain: "Healthcare".to_string(),
        schema: "Claims".to_string(),
        dataset: "insurance_claims".to_string(),
        description: "Processed insurance claims with billing codes, claim amounts, status, adjudication dates, and denial reasons. Used for revenue cycle management.".to_string(),
        tags: strs(&["claims", "insurance", "billing"]),
        owners: strs(&["finance@healthcare.com", "claims@healthcare.com"]),
        trust_score_trend_30d: trend(|i| 87.0 + (i as f64 / 4.0).cos() * 2.0),
        domain_tags: strs(&["Healthcare", "Insurance"]),
        functional_tags: strs(&["Revenue Cycle", "Claims Analytics"]),
        column_tags: tag_map(&[
            ("claim_id", &["Primary Key"]),
            ("patient_id", &["Foreign Key"]),
            ("procedure_code", &["CPT", "Procedure Code"]),
            ("billed_amount_usd", &["Metric", "Currency"]),
            ("approved_amount_usd", &["Metric", "Currency"]),
            ("claim_status", &["Enum", "Approved/Denied/Pending"]),
            ("denial_reason", &["Categorical"]),
            ("adjudicated_date", &["Date"]),
            ("insurer_name", &["Categorical"]),
        ]),
        column_issues: tag_map(&[
            ("denial_reason", &["Missing in 8% of denied claims"]),
            ("claim_status", &["Non-standard status codes (0.7%)"]),
        ]),
        columns: columns(&[
            ("claim_id", "STRING", "Unique insurance claim ID", false),
            ("patient_id", "STRING", "Linked patient ID", true),
            ("procedure_code", "STRING", "CPT or ICD-10-PCS procedure code", false),
            ("billed_amount_usd", "FLOAT", "Claimed amount billed (USD)", false),
            ("approved_amount_usd", "FLOAT", "Amount approved by insurer", false),
            ("claim_status", "STRING", "Current claim status", false),
            ("denial_reason", "STRING", "If denied, reason provided", false),
            ("adjudicated_date", "DATE", "Date claim was adjudicated", false),
            ("insurer_name", "STRING", "Insurance provider name", false),
        ]),
        quality_report: quality(&[
            ("claim_id", 0.0, 0.0, 0.0, 0.0, "Ensure unique claim keys"),
            ("claim_status", 0.0, 0.0, 0.7, 0.0, "Normalize status enums"),
            ("denial_reason", 8.0, 0.0, 0.0, 0.0, "Backfill denial reasons via audit notes"),
        ]),
        pipeline_runs: vec![
            run("CLAIM-20251101-01", "2025-11-01 10:00", 18),
            run_fixed("CLAIM-20251105-02", "2025-11-05 10:00", 25, "Enum mismatch", "Mapped 'Processing' → 'Pending'"),
        ],
    }
}

fn bfsi_aml_alerts() -> DatasetDetail {
    DatasetDetail {
        domain: "BFSI".to_string(),
        schema: "RiskCompliance".to_string(),
        dataset: "aml_alerts".to_string(),
        description: "Anti-money laundering (AML) alerts dataset with transaction IDs, customer risk score, alert type, and resolution status.".to_string(),
        tags: strs(&["aml", "fraud", "compliance"]),
        owners: strs(&["compliance@bank.com", "risk@bank.com"]),
        trust_score_trend_30d: trend(|i| 83.0 + (i as f64 / 3.0).cos() * 2.0),
        domain_tags: strs(&["Banking", "Risk"]),
        functional_tags: strs(&["AML", "Compliance", "Fraud Detection"]),
        column_tags: tag_map(&[
            ("alert_id", &["Primary Key"]),
            ("customer_id", &["Foreign Key"]),
            ("txn_id", &["Foreign Key"]),
            ("alert_type", &["Categorical", "Structuring/High Value/Blacklist"]),
            ("risk_score", &["Metric", "0–100"]),
            ("alert_status", &["Enum", "Open/Closed/Under Review"]),
            ("investigator_id", &["Internal ID"]),
            ("resolution_date", &["Date"]),
        ]),
        column_issues: BTreeMap::new(),
        columns: columns(&[
            ("alert_id", "STRING", "Unique AML alert identifier", false),
            ("customer_id", "STRING", "Linked customer identifier", true),
            ("txn_id", "STRING", "Linked transaction ID", false),
            ("alert_type", "STRING", "Type of AML alert triggered", false),
            ("risk_score", "FLOAT", "Computed AML risk score", false),
            ("alert_status", "STRING", "Current alert workflow status", false),
            ("investigator_id", "STRING", "Assigned investigator ID", false),
            ("resolution_date", "DATE", "Date alert was resolved", false),
        ]),
        quality_report: quality(&[
            ("alert_status", 0.0, 0.0, 0.5, 0.0, "Restrict to enum (Open/Closed/Under Review)"),
            ("risk_score", 0.0, 0.0, 0.4, 0.0, "Clip scores 0–100"),
        ]),
        pipeline_runs: vec![
            run("AML-20251101-01", "2025-11-01 02:30", 25),
            run_fixed("AML-20251105-02", "2025-11-05 03:00", 28, "Enum mismatch", "Mapped 'In Progress' → 'Under Review'"),
        ],
    }
}

/// Handwritten detail records, keyed by composite `Domain-Schema-dataset` id.
pub fn all_details() -> BTreeMap<String, DatasetDetail> {
    let mut details = BTreeMap::new();
    for detail in [
        base_detail(),
        telco_customer_master(),
        telco_churn_history(),
        telco_tower_performance(),
        hospitality_guest_feedback(),
        healthcare_insurance_claims(),
        bfsi_aml_alerts(),
    ] {
        details.insert(detail.composite_key(), detail);
    }
    details
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::split_composite_key;

    #[test]
    fn keys_match_embedded_identity() {
        for (key, detail) in all_details() {
            let (domain, schema, dataset) = split_composite_key(&key).unwrap();
            assert_eq!(domain, detail.domain);
            assert_eq!(schema, detail.schema);
            assert_eq!(dataset, detail.dataset);
        }
    }

    #[test]
    fn trust_trends_are_30_points() {
        for detail in all_details().values() {
            assert_eq!(detail.trust_score_trend_30d.len(), 30);
            assert!(detail
                .trust_score_trend_30d
                .iter()
                .all(|v| (0.0..=100.0).contains(v)));
        }
    }

    #[test]
    fn failed_runs_carry_an_issue() {
        for detail in all_details().values() {
            for run in &detail.pipeline_runs {
                match run.status {
                    RunStatus::Success => assert!(run.issue.is_none()),
                    RunStatus::FixedByAgent => {
                        assert!(run.issue.is_some() && run.fix.is_some())
                    }
                    RunStatus::Failed => assert!(run.issue.is_some()),
                }
            }
        }
    }
}
