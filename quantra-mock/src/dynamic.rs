use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use quantra_core::{DataProvider, QuantraError};
use quantra_types::{CoverageRequest, DataQuery, DataRow, DatasetDefinition};

/// Instruction for how a method should behave for a given dataset.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(QuantraError),
    /// Hang indefinitely (simulate a stalled backend).
    Hang,
}

#[derive(Default)]
struct InternalState {
    query_rules: HashMap<String, MockBehavior<Vec<DataRow>>>,
    coverage_rules: HashMap<String, MockBehavior<Vec<DataRow>>>,
    definition_rules: HashMap<String, MockBehavior<DatasetDefinition>>,
    query_log: Vec<(String, DataQuery)>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for `query` and `query_last` calls against a dataset.
    pub async fn set_query_behavior(
        &self,
        dataset_id: impl Into<String>,
        behavior: MockBehavior<Vec<DataRow>>,
    ) {
        let mut guard = self.state.lock().await;
        guard.query_rules.insert(dataset_id.into(), behavior);
    }

    /// Set the behavior for `coverage` calls against a dataset.
    pub async fn set_coverage_behavior(
        &self,
        dataset_id: impl Into<String>,
        behavior: MockBehavior<Vec<DataRow>>,
    ) {
        let mut guard = self.state.lock().await;
        guard.coverage_rules.insert(dataset_id.into(), behavior);
    }

    /// Set the behavior for `definition` calls against a dataset.
    pub async fn set_definition_behavior(
        &self,
        dataset_id: impl Into<String>,
        behavior: MockBehavior<DatasetDefinition>,
    ) {
        let mut guard = self.state.lock().await;
        guard.definition_rules.insert(dataset_id.into(), behavior);
    }

    /// Return a copy of the query log: one entry per `query`/`query_last` call.
    pub async fn query_log(&self) -> Vec<(String, DataQuery)> {
        let guard = self.state.lock().await;
        guard.query_log.clone()
    }

    /// Clear all configured behaviors and the query log.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.query_rules.clear();
        guard.coverage_rules.clear();
        guard.definition_rules.clear();
        guard.query_log.clear();
    }
}

/// A data provider that defers all behavior to an external controller.
pub struct DynamicMockProvider {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockProvider {
    /// Create a new dynamic mock provider and its controller.
    #[must_use]
    pub fn new_with_controller() -> (Arc<dyn DataProvider>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { state });
        (me as Arc<dyn DataProvider>, controller)
    }

    fn unknown_dataset(dataset_id: &str) -> QuantraError {
        QuantraError::invalid_arg(format!("unknown dataset {dataset_id}"))
    }
}

async fn resolve<T>(behavior: Option<MockBehavior<T>>, dataset_id: &str) -> Result<T, QuantraError>
where
    T: Send,
{
    match behavior {
        Some(MockBehavior::Return(value)) => Ok(value),
        Some(MockBehavior::Fail(e)) => Err(e),
        Some(MockBehavior::Hang) => {
            std::future::pending::<()>().await;
            unreachable!()
        }
        None => Err(DynamicMockProvider::unknown_dataset(dataset_id)),
    }
}

#[async_trait]
impl DataProvider for DynamicMockProvider {
    async fn query(
        &self,
        dataset_id: &str,
        query: &DataQuery,
    ) -> Result<Vec<DataRow>, QuantraError> {
        // Snapshot the behavior without holding the lock across await points.
        let behavior = {
            let mut guard = self.state.lock().await;
            guard
                .query_log
                .push((dataset_id.to_string(), query.clone()));
            guard.query_rules.get(dataset_id).cloned()
        };
        resolve(behavior, dataset_id).await
    }

    async fn query_last(
        &self,
        dataset_id: &str,
        query: &DataQuery,
    ) -> Result<Vec<DataRow>, QuantraError> {
        self.query(dataset_id, query).await
    }

    async fn coverage(
        &self,
        dataset_id: &str,
        _request: &CoverageRequest,
    ) -> Result<Vec<DataRow>, QuantraError> {
        let behavior = {
            let guard = self.state.lock().await;
            guard.coverage_rules.get(dataset_id).cloned()
        };
        resolve(behavior, dataset_id).await
    }

    async fn definition(&self, dataset_id: &str) -> Result<DatasetDefinition, QuantraError> {
        let behavior = {
            let guard = self.state.lock().await;
            guard.definition_rules.get(dataset_id).cloned()
        };
        resolve(behavior, dataset_id).await
    }
}
