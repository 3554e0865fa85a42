//! Core data model for the IntelliStream demo snapshot.
//!
//! Everything here is plain data: the domain catalog (domains → schemas →
//! datasets), per-dataset detail reports, role permissions and audit entries.
//! The snapshot is rebuilt from seed data on every load and never mutated in
//! place.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::scenario::ScenarioBook;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DomainName {
    Travel,
    Telco,
    Hospitality,
    Healthcare,
    #[serde(rename = "BFSI")]
    Bfsi,
}

impl DomainName {
    pub const ALL: [DomainName; 5] = [
        DomainName::Travel,
        DomainName::Telco,
        DomainName::Hospitality,
        DomainName::Healthcare,
        DomainName::Bfsi,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DomainName::Travel => "Travel",
            DomainName::Telco => "Telco",
            DomainName::Hospitality => "Hospitality",
            DomainName::Healthcare => "Healthcare",
            DomainName::Bfsi => "BFSI",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Travel" => Some(DomainName::Travel),
            "Telco" => Some(DomainName::Telco),
            "Hospitality" => Some(DomainName::Hospitality),
            "Healthcare" => Some(DomainName::Healthcare),
            "BFSI" => Some(DomainName::Bfsi),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetStatus {
    Healthy,
    AtRisk,
    Degraded,
}

impl DatasetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetStatus::Healthy => "healthy",
            DatasetStatus::AtRisk => "at_risk",
            DatasetStatus::Degraded => "degraded",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub name: String,
    pub status: DatasetStatus,
    pub rows: u64,
    pub owner: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schema {
    pub name: String,
    pub trust_score: f64,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DomainKpis {
    pub reliability: f64,
    pub governance: f64,
    pub data_coverage: f64,
    pub model_uptime: f64,
    pub incidents_last_7d: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Domain {
    pub name: DomainName,
    pub schemas: Vec<Schema>,
    pub kpis: DomainKpis,
}

// =============================================================================
// Dataset detail report
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetColumn {
    pub name: String,
    pub datatype: String,
    pub description: String,
    pub pii: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityRow {
    pub column: String,
    pub null_pct: f64,
    pub dup_pct: f64,
    pub outlier_pct: f64,
    pub format_violations_pct: f64,
    pub suggested_fix: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Success,
    FixedByAgent,
    Failed,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Success => "success",
            RunStatus::FixedByAgent => "fixed_by_agent",
            RunStatus::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineRun {
    pub run_id: String,
    pub started: String,
    pub duration_min: u32,
    pub status: RunStatus,
    pub issue: Option<String>,
    pub fix: Option<String>,
}

/// Enriched per-dataset record shown on the dataset report page.
///
/// Keyed in the snapshot by the composite `Domain-Schema-dataset` id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetDetail {
    pub domain: String,
    pub schema: String,
    pub dataset: String,
    pub description: String,
    pub tags: Vec<String>,
    pub owners: Vec<String>,
    pub trust_score_trend_30d: Vec<f64>,
    pub domain_tags: Vec<String>,
    pub functional_tags: Vec<String>,
    pub column_tags: BTreeMap<String, Vec<String>>,
    pub column_issues: BTreeMap<String, Vec<String>>,
    pub columns: Vec<DatasetColumn>,
    pub quality_report: Vec<QualityRow>,
    pub pipeline_runs: Vec<PipelineRun>,
}

impl DatasetDetail {
    pub fn composite_key(&self) -> String {
        format!("{}-{}-{}", self.domain, self.schema, self.dataset)
    }
}

/// Splits a `Domain-Schema-dataset` composite key. Dataset names may contain
/// `-`, so only the first two separators are structural.
pub fn split_composite_key(key: &str) -> Option<(&str, &str, &str)> {
    let mut parts = key.splitn(3, '-');
    let domain = parts.next()?;
    let schema = parts.next()?;
    let dataset = parts.next()?;
    if domain.is_empty() || schema.is_empty() || dataset.is_empty() {
        return None;
    }
    Some((domain, schema, dataset))
}

// =============================================================================
// Roles and permissions
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Viewer,
    Analyst,
    Engineer,
    GovernanceLead,
    ComplianceOfficer,
    PlatformManager,
    SecurityAdmin,
    Admin,
}

impl Role {
    pub const ALL: [Role; 8] = [
        Role::Viewer,
        Role::Analyst,
        Role::Engineer,
        Role::GovernanceLead,
        Role::ComplianceOfficer,
        Role::PlatformManager,
        Role::SecurityAdmin,
        Role::Admin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Viewer => "viewer",
            Role::Analyst => "analyst",
            Role::Engineer => "engineer",
            Role::GovernanceLead => "governance_lead",
            Role::ComplianceOfficer => "compliance_officer",
            Role::PlatformManager => "platform_manager",
            Role::SecurityAdmin => "security_admin",
            Role::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Role::ALL.iter().copied().find(|r| r.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePermissions {
    pub can_mark_false_positive: bool,
    pub can_save_scenarios: bool,
    pub can_simulate_retry: bool,
    pub can_edit_thresholds: bool,
    pub can_create_trust_override: bool,
    pub can_view_fairness: bool,
    pub can_manage_connectors: bool,
    pub can_manage_rbac: bool,
}

// =============================================================================
// Audit trail
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEntityKind {
    Dataset,
    Pipeline,
    Prediction,
    Policy,
    Scenario,
    Session,
}

impl AuditEntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditEntityKind::Dataset => "dataset",
            AuditEntityKind::Pipeline => "pipeline",
            AuditEntityKind::Prediction => "prediction",
            AuditEntityKind::Policy => "policy",
            AuditEntityKind::Scenario => "scenario",
            AuditEntityKind::Session => "session",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: String,
    pub timestamp: String,
    pub action: String,
    pub role: Role,
    pub entity_kind: AuditEntityKind,
    pub entity_id: String,
    pub details: serde_json::Value,
}

// =============================================================================
// Assembled snapshot
// =============================================================================

/// The full in-memory data snapshot: the domain catalog, handwritten detail
/// records, the base detail template used for synthesis, and one scenario
/// book per domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub domains: Vec<Domain>,
    pub base_detail: DatasetDetail,
    pub details: BTreeMap<String, DatasetDetail>,
    pub scenario_books: BTreeMap<String, ScenarioBook>,
}

impl Snapshot {
    pub fn domain(&self, name: DomainName) -> Option<&Domain> {
        self.domains.iter().find(|d| d.name == name)
    }

    pub fn dataset_count(&self) -> usize {
        self.domains
            .iter()
            .flat_map(|d| &d.schemas)
            .map(|s| s.datasets.len())
            .sum()
    }

    /// Content hash of the snapshot, for audit manifests and the state
    /// endpoint. Stable across runs because the snapshot is pure seed data.
    pub fn content_hash(&self) -> String {
        use sha2::{Digest, Sha256};
        let bytes = serde_json::to_vec(self).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_name_round_trip() {
        for d in DomainName::ALL {
            assert_eq!(DomainName::parse(d.as_str()), Some(d));
        }
        assert_eq!(DomainName::parse("telco"), None);
    }

    #[test]
    fn role_round_trip() {
        for r in Role::ALL {
            assert_eq!(Role::parse(r.as_str()), Some(r));
        }
        assert_eq!(Role::parse("superuser"), None);
    }

    #[test]
    fn composite_key_splits_on_first_two_dashes() {
        let (d, s, n) = split_composite_key("Telco-Customers-customer_master").unwrap();
        assert_eq!((d, s, n), ("Telco", "Customers", "customer_master"));

        // Dataset names may themselves contain dashes.
        let (d, s, n) = split_composite_key("Travel-Pricing-daily-fares").unwrap();
        assert_eq!((d, s, n), ("Travel", "Pricing", "daily-fares"));

        assert!(split_composite_key("Telco-Customers").is_none());
        assert!(split_composite_key("Telco--x").is_none());
    }
}
