//! Seed data provider: the in-memory stand-in for a real data service.
//!
//! The snapshot is assembled from static seed content (domain catalog,
//! dataset details, scenario books) and handed out behind the `DataProvider`
//! trait so the rest of the system never depends on where the data came
//! from. The seed implementation simulates fetch latency with a fixed delay
//! that resolves unconditionally.

mod details;
mod domains;
mod scenarios;

use async_trait::async_trait;
use tokio::time::{sleep, Duration};

use crate::model::{split_composite_key, DatasetDetail, DomainName, RunStatus, Snapshot};
use crate::scenario::validate_book;

pub use details::base_detail;

/// Source of the application snapshot. One in-memory seed implementation
/// exists today; a real backend would slot in behind the same trait.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Fetches the full snapshot. Infallible by design: seed data cannot
    /// fail to load, and the artificial delay always resolves.
    async fn fetch_snapshot(&self) -> Snapshot;
}

/// Builds the full seed snapshot. Pure assembly, no validation.
pub fn build_snapshot() -> Snapshot {
    Snapshot {
        domains: domains::all_domains(),
        base_detail: details::base_detail(),
        details: details::all_details(),
        scenario_books: scenarios::all_books(),
    }
}

/// Fail-fast validation of the assembled seed, run once at boot.
///
/// Malformed seed content is a programming-time error: abort loudly here
/// rather than guarding arithmetic at every call site.
pub fn validate_snapshot(snapshot: &Snapshot) -> Result<(), String> {
    for (industry, book) in &snapshot.scenario_books {
        validate_book(industry, book)?;
        if DomainName::parse(industry).is_none() {
            return Err(format!("scenario book keyed by unknown domain '{}'", industry));
        }
    }
    for name in DomainName::ALL {
        if !snapshot.scenario_books.contains_key(name.as_str()) {
            return Err(format!("domain '{}' has no scenario book", name.as_str()));
        }
        if snapshot.domain(name).is_none() {
            return Err(format!("domain '{}' missing from catalog", name.as_str()));
        }
    }

    for (key, detail) in &snapshot.details {
        let (domain, schema, dataset) = split_composite_key(key)
            .ok_or_else(|| format!("detail key '{}' is not Domain-Schema-dataset", key))?;
        if detail.domain != domain || detail.schema != schema || detail.dataset != dataset {
            return Err(format!("detail key '{}' disagrees with its record", key));
        }
        let domain_name = DomainName::parse(domain)
            .ok_or_else(|| format!("detail key '{}' names unknown domain", key))?;
        let in_catalog = snapshot
            .domain(domain_name)
            .into_iter()
            .flat_map(|d| &d.schemas)
            .filter(|s| s.name == schema)
            .flat_map(|s| &s.datasets)
            .any(|d| d.name == dataset);
        if !in_catalog {
            return Err(format!("detail '{}' not present in the catalog", key));
        }
        if detail.trust_score_trend_30d.len() != 30 {
            return Err(format!("detail '{}' trust trend is not 30 points", key));
        }
    }
    Ok(())
}

/// Derives a detail record from the base template for a catalogued dataset
/// without a handwritten entry: identity swapped in, trust trend jittered,
/// run ids renamed after the dataset.
pub fn synthesize_detail(
    base: &DatasetDetail,
    domain: &str,
    schema: &str,
    dataset: &str,
) -> DatasetDetail {
    let mut detail = base.clone();
    detail.domain = domain.to_string();
    detail.schema = schema.to_string();
    detail.dataset = dataset.to_string();
    detail.description = format!(
        "Auto-generated detail for {} in {}/{}.",
        dataset, domain, schema
    );
    detail.trust_score_trend_30d = jitter_trend(&base.trust_score_trend_30d);
    detail.pipeline_runs = base
        .pipeline_runs
        .iter()
        .enumerate()
        .map(|(i, run)| {
            let mut run = run.clone();
            if i == 1 {
                run.run_id = format!("{}-FIX-01", dataset);
                run.status = RunStatus::FixedByAgent;
                run.issue = Some("Auto schema alignment".to_string());
                run.fix = Some("Added missing column(s)".to_string());
            } else {
                run.run_id = format!("{}-RUN-{:02}", dataset, i + 1);
            }
            run
        })
        .collect();
    detail
}

fn jitter_trend(trend: &[f64]) -> Vec<f64> {
    trend
        .iter()
        .enumerate()
        .map(|(i, v)| {
            if i % 6 == 0 {
                v - 1.0
            } else if i % 7 == 0 {
                v + 1.0
            } else {
                *v
            }
        })
        .collect()
}

/// In-memory seed provider with a simulated fetch delay.
pub struct SeedProvider {
    latency: Duration,
}

impl SeedProvider {
    /// Validates the seed once up front; a bad seed never gets served.
    pub fn new(latency_ms: u64) -> Result<Self, String> {
        validate_snapshot(&build_snapshot())?;
        Ok(Self {
            latency: Duration::from_millis(latency_ms),
        })
    }
}

#[async_trait]
impl DataProvider for SeedProvider {
    async fn fetch_snapshot(&self) -> Snapshot {
        sleep(self.latency).await;
        build_snapshot()
    }
}
