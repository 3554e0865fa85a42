//! Data access store: owns the current snapshot and the lookup helpers the
//! page layer consumes. Reloads go through the `DataProvider` trait; nothing
//! here knows whether the data is seed content or a real backend.

use crate::logging::{json_log, obj, v_num, v_str};
use crate::model::{Dataset, DatasetDetail, Domain, DomainName, Schema, Snapshot};
use crate::scenario::ScenarioBook;
use crate::seed::{synthesize_detail, DataProvider};

#[derive(Default)]
pub struct DataStore {
    snapshot: Option<Snapshot>,
    loading: bool,
}

impl DataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.snapshot.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    /// Fetches a fresh snapshot from the provider and swaps it in. The fetch
    /// cannot fail; the only suspension point is the provider's artificial
    /// latency.
    pub async fn reload(&mut self, provider: &dyn DataProvider) {
        self.loading = true;
        json_log("data", obj(&[("event", v_str("reload_started"))]));
        let snapshot = provider.fetch_snapshot().await;
        json_log(
            "data",
            obj(&[
                ("event", v_str("reload_complete")),
                ("domains", v_num(snapshot.domains.len() as f64)),
                ("datasets", v_num(snapshot.dataset_count() as f64)),
            ]),
        );
        self.snapshot = Some(snapshot);
        self.loading = false;
    }

    pub fn current_domain(&self, name: DomainName) -> Option<&Domain> {
        self.snapshot.as_ref().and_then(|s| s.domain(name))
    }

    pub fn schemas_by_domain(&self, name: DomainName) -> &[Schema] {
        self.current_domain(name)
            .map(|d| d.schemas.as_slice())
            .unwrap_or(&[])
    }

    pub fn datasets_by_schema(&self, domain: DomainName, schema: &str) -> &[Dataset] {
        self.schemas_by_domain(domain)
            .iter()
            .find(|s| s.name == schema)
            .map(|s| s.datasets.as_slice())
            .unwrap_or(&[])
    }

    /// Resolves a dataset's detail record: the handwritten one when present,
    /// a synthesized one for any other catalogued dataset, `None` when the
    /// dataset is not in the catalog at all.
    pub fn dataset_detail(
        &self,
        domain: DomainName,
        schema: &str,
        dataset: &str,
    ) -> Option<DatasetDetail> {
        let snapshot = self.snapshot.as_ref()?;
        let key = format!("{}-{}-{}", domain.as_str(), schema, dataset);
        if let Some(detail) = snapshot.details.get(&key) {
            return Some(detail.clone());
        }
        let catalogued = self
            .datasets_by_schema(domain, schema)
            .iter()
            .any(|d| d.name == dataset);
        if !catalogued {
            return None;
        }
        Some(synthesize_detail(
            &snapshot.base_detail,
            domain.as_str(),
            schema,
            dataset,
        ))
    }

    pub fn scenario_book(&self, domain: DomainName) -> Option<&ScenarioBook> {
        self.snapshot
            .as_ref()
            .and_then(|s| s.scenario_books.get(domain.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::SeedProvider;

    async fn loaded_store() -> DataStore {
        let provider = SeedProvider::new(0).unwrap();
        let mut store = DataStore::new();
        store.reload(&provider).await;
        store
    }

    #[tokio::test]
    async fn store_starts_empty_and_loads() {
        let store = DataStore::new();
        assert!(!store.is_loaded());
        assert!(store.current_domain(DomainName::Telco).is_none());

        let store = loaded_store().await;
        assert!(store.is_loaded());
        assert!(!store.is_loading());
        assert_eq!(store.schemas_by_domain(DomainName::Telco).len(), 3);
    }

    #[tokio::test]
    async fn dataset_lookup_by_schema() {
        let store = loaded_store().await;
        let datasets = store.datasets_by_schema(DomainName::Telco, "Customers");
        let names: Vec<_> = datasets.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["customer_master", "churn_history"]);
        assert!(store
            .datasets_by_schema(DomainName::Telco, "NoSuchSchema")
            .is_empty());
    }

    #[tokio::test]
    async fn detail_prefers_handwritten_record() {
        let store = loaded_store().await;
        let detail = store
            .dataset_detail(DomainName::Telco, "Customers", "customer_master")
            .unwrap();
        assert!(detail.description.contains("Master customer profile"));
    }

    #[tokio::test]
    async fn detail_synthesizes_for_catalogued_dataset() {
        let store = loaded_store().await;
        // billing_summary is catalogued but has no handwritten record.
        let detail = store
            .dataset_detail(DomainName::Telco, "Billing", "billing_summary")
            .unwrap();
        assert!(detail.description.starts_with("Auto-generated detail"));
        assert_eq!(detail.domain, "Telco");
    }

    #[tokio::test]
    async fn detail_is_none_for_unknown_dataset() {
        let store = loaded_store().await;
        assert!(store
            .dataset_detail(DomainName::Telco, "Customers", "no_such_table")
            .is_none());
    }
}
