//! Session state: active domain, role, schema selection and the audit trail.
//!
//! Mutations never reach into the data store. Setters enqueue `AppEvent`s
//! which the application shell drains after each request and turns into
//! data-store reloads, so the stores stay decoupled and all dispatch stays
//! strictly sequential.

use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::logging::{json_log, obj, ts_now, v_str};
use crate::model::{AuditEntityKind, AuditEntry, DomainName, Role, RolePermissions};

/// Audit entries kept in memory. Oldest entries are dropped past this.
const AUDIT_CAP: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    DomainChanged(DomainName),
    RoleChanged(Role),
}

/// Boolean capability flags per role, verbatim from the product's RBAC
/// matrix. Permissions are a total function of the role.
pub fn permissions_for(role: Role) -> RolePermissions {
    use crate::model::Role::*;
    match role {
        Viewer => RolePermissions {
            can_mark_false_positive: false,
            can_save_scenarios: false,
            can_simulate_retry: false,
            can_edit_thresholds: false,
            can_create_trust_override: false,
            can_view_fairness: false,
            can_manage_connectors: false,
            can_manage_rbac: false,
        },
        Analyst => RolePermissions {
            can_mark_false_positive: true,
            can_save_scenarios: true,
            can_simulate_retry: false,
            can_edit_thresholds: false,
            can_create_trust_override: false,
            can_view_fairness: false,
            can_manage_connectors: false,
            can_manage_rbac: false,
        },
        Engineer => RolePermissions {
            can_mark_false_positive: true,
            can_save_scenarios: true,
            can_simulate_retry: true,
            can_edit_thresholds: true,
            can_create_trust_override: false,
            can_view_fairness: false,
            can_manage_connectors: false,
            can_manage_rbac: false,
        },
        GovernanceLead => RolePermissions {
            can_mark_false_positive: true,
            can_save_scenarios: true,
            can_simulate_retry: false,
            can_edit_thresholds: true,
            can_create_trust_override: true,
            can_view_fairness: false,
            can_manage_connectors: false,
            can_manage_rbac: false,
        },
        ComplianceOfficer => RolePermissions {
            can_mark_false_positive: false,
            can_save_scenarios: false,
            can_simulate_retry: false,
            can_edit_thresholds: false,
            can_create_trust_override: false,
            can_view_fairness: true,
            can_manage_connectors: false,
            can_manage_rbac: false,
        },
        PlatformManager => RolePermissions {
            can_mark_false_positive: true,
            can_save_scenarios: true,
            can_simulate_retry: false,
            can_edit_thresholds: false,
            can_create_trust_override: false,
            can_view_fairness: false,
            can_manage_connectors: true,
            can_manage_rbac: false,
        },
        SecurityAdmin => RolePermissions {
            can_mark_false_positive: false,
            can_save_scenarios: false,
            can_simulate_retry: false,
            can_edit_thresholds: false,
            can_create_trust_override: false,
            can_view_fairness: true,
            can_manage_connectors: false,
            can_manage_rbac: true,
        },
        Admin => RolePermissions {
            can_mark_false_positive: true,
            can_save_scenarios: true,
            can_simulate_retry: true,
            can_edit_thresholds: true,
            can_create_trust_override: true,
            can_view_fairness: true,
            can_manage_connectors: true,
            can_manage_rbac: true,
        },
    }
}

/// Persisted slice of the session (the rest is rebuilt on boot).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionPrefs {
    pub domain: DomainName,
    pub role: Role,
    pub sidebar_collapsed: bool,
}

pub struct SessionStore {
    domain: DomainName,
    role: Role,
    selected_schema: String,
    sidebar_collapsed: bool,
    events: VecDeque<AppEvent>,
    audit: VecDeque<AuditEntry>,
}

impl SessionStore {
    pub fn new(domain: DomainName, role: Role) -> Self {
        Self {
            domain,
            role,
            selected_schema: "Customers".to_string(),
            sidebar_collapsed: false,
            events: VecDeque::new(),
            audit: VecDeque::new(),
        }
    }

    pub fn from_prefs(prefs: SessionPrefs) -> Self {
        let mut store = Self::new(prefs.domain, prefs.role);
        store.sidebar_collapsed = prefs.sidebar_collapsed;
        store
    }

    pub fn prefs(&self) -> SessionPrefs {
        SessionPrefs {
            domain: self.domain,
            role: self.role,
            sidebar_collapsed: self.sidebar_collapsed,
        }
    }

    pub fn domain(&self) -> DomainName {
        self.domain
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn selected_schema(&self) -> &str {
        &self.selected_schema
    }

    pub fn sidebar_collapsed(&self) -> bool {
        self.sidebar_collapsed
    }

    pub fn permissions(&self) -> RolePermissions {
        permissions_for(self.role)
    }

    pub fn set_domain(&mut self, domain: DomainName) {
        self.domain = domain;
        self.events.push_back(AppEvent::DomainChanged(domain));
    }

    pub fn set_role(&mut self, role: Role) {
        self.role = role;
        self.events.push_back(AppEvent::RoleChanged(role));
    }

    pub fn set_selected_schema(&mut self, schema: &str) {
        self.selected_schema = schema.to_string();
    }

    pub fn set_sidebar_collapsed(&mut self, collapsed: bool) {
        self.sidebar_collapsed = collapsed;
    }

    /// Takes every pending event, oldest first. The shell consumes these and
    /// drives the data-store reload.
    pub fn drain_events(&mut self) -> Vec<AppEvent> {
        self.events.drain(..).collect()
    }

    pub fn record_audit(
        &mut self,
        action: &str,
        entity_kind: AuditEntityKind,
        entity_id: &str,
        details: serde_json::Value,
    ) {
        let entry = AuditEntry {
            id: new_audit_id(),
            timestamp: ts_now(),
            action: action.to_string(),
            role: self.role,
            entity_kind,
            entity_id: entity_id.to_string(),
            details,
        };
        json_log(
            "audit",
            obj(&[
                ("action", v_str(&entry.action)),
                ("entity_kind", v_str(entity_kind.as_str())),
                ("entity_id", v_str(entity_id)),
                ("role", v_str(self.role.as_str())),
            ]),
        );
        self.audit.push_front(entry);
        self.audit.truncate(AUDIT_CAP);
    }

    /// Newest first.
    pub fn audit_entries(&self) -> impl Iterator<Item = &AuditEntry> {
        self.audit.iter()
    }
}

fn new_audit_id() -> String {
    let ms = chrono::Utc::now().timestamp_millis();
    let suffix: u32 = rand::thread_rng().gen();
    format!("audit_{}_{:08x}", ms, suffix)
}
