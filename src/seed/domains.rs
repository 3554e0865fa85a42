//! Domain catalog seed: five business domains, each with schemas, datasets
//! and a KPI block. Values are fixed demo content.

use crate::model::{Dataset, DatasetStatus, Domain, DomainKpis, DomainName, Schema};

fn datasets(rows: &[(&str, DatasetStatus, u64, &str)]) -> Vec<Dataset> {
    rows.iter()
        .map(|(name, status, rows, owner)| Dataset {
            name: name.to_string(),
            status: *status,
            rows: *rows,
            owner: owner.to_string(),
        })
        .collect()
}

fn schema(name: &str, trust_score: f64, rows: &[(&str, DatasetStatus, u64, &str)]) -> Schema {
    Schema {
        name: name.to_string(),
        trust_score,
        datasets: datasets(rows),
    }
}

use crate::model::DatasetStatus::{AtRisk, Degraded, Healthy};

fn travel() -> Domain {
    Domain {
        name: DomainName::Travel,
        schemas: vec![
            schema("Pricing", 84.0, &[
                ("daily_fares", Healthy, 125_430, "revops@datacorp.com"),
                ("competitor_prices", AtRisk, 88_116, "revops@datacorp.com"),
            ]),
            schema("Operations", 86.0, &[
                ("flight_load_summary", Healthy, 24_120, "ops@datacorp.com"),
            ]),
            schema("Bookings", 87.0, &[
                ("booking_transactions", Healthy, 518_420, "finance@datacorp.com"),
            ]),
            schema("CustomerExperience", 83.0, &[
                ("nps_survey_responses", AtRisk, 18_560, "cx@datacorp.com"),
            ]),
        ],
        kpis: DomainKpis {
            reliability: 91.0,
            governance: 88.0,
            data_coverage: 90.0,
            model_uptime: 98.2,
            incidents_last_7d: 2,
        },
    }
}

fn telco() -> Domain {
    Domain {
        name: DomainName::Telco,
        schemas: vec![
            schema("Customers", 88.0, &[
                ("customer_master", Healthy, 1_250_000, "crm@telco.com"),
                ("churn_history", AtRisk, 11_840, "analytics@telco.com"),
            ]),
            schema("Network", 82.0, &[
                ("tower_performance", Healthy, 756_000, "infra@telco.com"),
                ("service_outages", Degraded, 1_840, "network.ops@telco.com"),
            ]),
            schema("Billing", 86.0, &[
                ("billing_summary", Healthy, 61_200, "finance@telco.com"),
                ("credit_risk_profiles", AtRisk, 21_200, "risk@telco.com"),
            ]),
        ],
        kpis: DomainKpis {
            reliability: 92.0,
            governance: 89.0,
            data_coverage: 90.0,
            model_uptime: 97.8,
            incidents_last_7d: 4,
        },
    }
}

fn hospitality() -> Domain {
    Domain {
        name: DomainName::Hospitality,
        schemas: vec![
            schema("Operations", 85.0, &[
                ("hotel_performance", Healthy, 15_420, "ops@hospitality.com"),
            ]),
            schema("Bookings", 86.0, &[
                ("reservations", Healthy, 44_210, "pms@hospitality.com"),
            ]),
            schema("Finance", 88.0, &[
                ("revenue_summary", Healthy, 13_800, "finance@hospitality.com"),
            ]),
            schema("CustomerExperience", 84.0, &[
                ("guest_feedback", AtRisk, 17_800, "cx@hospitality.com"),
            ]),
        ],
        kpis: DomainKpis {
            reliability: 90.0,
            governance: 89.0,
            data_coverage: 88.0,
            model_uptime: 97.9,
            incidents_last_7d: 3,
        },
    }
}

fn healthcare() -> Domain {
    Domain {
        name: DomainName::Healthcare,
        schemas: vec![
            schema("Clinical", 87.0, &[
                ("patient_records", Healthy, 225_000, "clinicalops@healthcare.com"),
            ]),
            schema("Claims", 85.0, &[
                ("insurance_claims", AtRisk, 43_210, "claims@healthcare.com"),
            ]),
            schema("Operations", 84.0, &[
                ("bed_occupancy", Healthy, 31_200, "ops@healthcare.com"),
            ]),
            schema("PatientExperience", 86.0, &[
                ("satisfaction_survey", AtRisk, 17_800, "cx@healthcare.com"),
            ]),
        ],
        kpis: DomainKpis {
            reliability: 89.0,
            governance: 88.0,
            data_coverage: 87.0,
            model_uptime: 97.5,
            incidents_last_7d: 5,
        },
    }
}

fn bfsi() -> Domain {
    Domain {
        name: DomainName::Bfsi,
        schemas: vec![
            schema("Accounts", 88.0, &[
                ("customer_accounts", Healthy, 245_000, "crm@bank.com"),
            ]),
            schema("Loans", 86.0, &[
                ("loan_portfolio", Healthy, 78_500, "risk@bank.com"),
            ]),
            schema("Transactions", 85.0, &[
                ("payment_transactions", AtRisk, 520_000, "payments@bank.com"),
            ]),
            schema("RiskCompliance", 83.0, &[
                ("aml_alerts", Healthy, 11_800, "compliance@bank.com"),
            ]),
        ],
        kpis: DomainKpis {
            reliability: 90.0,
            governance: 89.0,
            data_coverage: 88.0,
            model_uptime: 97.1,
            incidents_last_7d: 6,
        },
    }
}

pub fn all_domains() -> Vec<Domain> {
    vec![travel(), telco(), hospitality(), healthcare(), bfsi()]
}
