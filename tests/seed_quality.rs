//! Seed data quality gates: the snapshot that ships must validate, and every
//! catalogued dataset must resolve to a detail record one way or another.

use intellistream::model::{split_composite_key, DomainName};
use intellistream::seed::{build_snapshot, validate_snapshot, SeedProvider};
use intellistream::store::DataStore;

#[test]
fn shipped_seed_validates() {
    validate_snapshot(&build_snapshot()).unwrap();
}

#[test]
fn every_domain_has_schemas_and_a_scenario_book() {
    let snapshot = build_snapshot();
    for name in DomainName::ALL {
        let domain = snapshot.domain(name).unwrap();
        assert!(!domain.schemas.is_empty(), "{} has no schemas", name.as_str());
        let book = &snapshot.scenario_books[name.as_str()];
        assert!(!book.scenarios.is_empty());
        assert!(book.baseline_value > 0.0);
    }
}

#[test]
fn handwritten_detail_keys_parse_and_point_into_catalog() {
    let snapshot = build_snapshot();
    for key in snapshot.details.keys() {
        let (domain, schema, dataset) = split_composite_key(key).unwrap();
        let domain = DomainName::parse(domain).unwrap();
        let found = snapshot
            .domain(domain)
            .unwrap()
            .schemas
            .iter()
            .find(|s| s.name == schema)
            .map(|s| s.datasets.iter().any(|d| d.name == dataset))
            .unwrap_or(false);
        assert!(found, "detail '{}' points outside the catalog", key);
    }
}

#[tokio::test]
async fn every_catalogued_dataset_resolves_to_a_detail() {
    let provider = SeedProvider::new(0).unwrap();
    let mut store = DataStore::new();
    store.reload(&provider).await;

    let snapshot = build_snapshot();
    let mut handwritten = 0usize;
    let mut synthesized = 0usize;
    for domain in &snapshot.domains {
        for schema in &domain.schemas {
            for dataset in &schema.datasets {
                let detail = store
                    .dataset_detail(domain.name, &schema.name, &dataset.name)
                    .unwrap_or_else(|| {
                        panic!("{}/{}/{} unresolvable", domain.name.as_str(), schema.name, dataset.name)
                    });
                assert_eq!(detail.domain, domain.name.as_str());
                assert_eq!(detail.schema, schema.name);
                assert_eq!(detail.dataset, dataset.name);
                assert_eq!(detail.trust_score_trend_30d.len(), 30);
                if detail.description.starts_with("Auto-generated detail") {
                    synthesized += 1;
                } else {
                    handwritten += 1;
                }
            }
        }
    }
    assert_eq!(handwritten, snapshot.details.len());
    assert!(synthesized > 0, "expected some synthesized details");
}

#[test]
fn scenario_control_names_are_unique_per_scenario() {
    let snapshot = build_snapshot();
    for book in snapshot.scenario_books.values() {
        for scenario in &book.scenarios {
            let mut names: Vec<_> = scenario
                .what_if_controls
                .iter()
                .map(|c| c.name.as_str())
                .collect();
            names.sort_unstable();
            let before = names.len();
            names.dedup();
            assert_eq!(before, names.len(), "dup control in '{}'", scenario.name);
        }
    }
}

#[test]
fn key_drivers_carry_signed_shap_values() {
    let snapshot = build_snapshot();
    for book in snapshot.scenario_books.values() {
        for scenario in &book.scenarios {
            assert!(!scenario.key_drivers.is_empty());
            for driver in &scenario.key_drivers {
                assert!(driver.shap.is_finite());
                assert!(driver.shap.abs() <= 1.0, "SHAP out of range in '{}'", scenario.name);
            }
        }
    }
}
