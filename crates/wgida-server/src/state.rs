//! Shared dashboard state behind the API.

use crate::DashboardError;
use std::sync::Arc;
use tokio::sync::RwLock;
use wgida_core::{
    AggregateContext, DatasetStore, FamilyValues, FilterEngine, SelectionUpdate, Snapshot,
};

/// Dashboard state: the loaded store, the live selection, and the snapshot
/// plus lookup context installed by the most recent submit.
///
/// A new submit replaces both snapshot and context under the state lock —
/// last write wins, which is all the cancellation the synchronous
/// aggregation needs.
#[derive(Debug)]
pub struct Dashboard {
    engine: FilterEngine,
    snapshot: Option<Snapshot>,
    context: Option<AggregateContext>,
}

/// Shared dashboard handle used by the warp filters.
pub type SharedDashboard = Arc<RwLock<Dashboard>>;

/// Wrap a store for the API.
pub fn shared_dashboard(store: DatasetStore) -> SharedDashboard {
    Arc::new(RwLock::new(Dashboard::new(store)))
}

impl Dashboard {
    /// New dashboard with everything selected and no snapshot yet.
    pub fn new(store: DatasetStore) -> Self {
        Self {
            engine: FilterEngine::new(store),
            snapshot: None,
            context: None,
        }
    }

    pub fn store(&self) -> &DatasetStore {
        self.engine.store()
    }

    /// The currently selected values per family.
    pub fn selected_values(&self) -> FamilyValues {
        self.engine.selected_values()
    }

    /// Apply a partial selection update. Does not recompute anything.
    pub fn apply(&mut self, update: &SelectionUpdate) {
        self.engine.apply(update);
    }

    /// Recompute the filtered set and install the new snapshot and lookup
    /// context, superseding the previous ones.
    pub fn submit(&mut self) -> &Snapshot {
        let snapshot = self.engine.submit();
        self.context = Some(AggregateContext::build(&snapshot));
        self.snapshot.insert(snapshot)
    }

    /// The installed snapshot, or the fail-fast error when nothing has been
    /// submitted yet.
    pub fn snapshot(&self) -> Result<&Snapshot, DashboardError> {
        self.snapshot.as_ref().ok_or(DashboardError::NoSnapshot)
    }

    /// Snapshot plus lookup context, for the keyed metric views.
    pub fn view(&self) -> Result<(&Snapshot, &AggregateContext), DashboardError> {
        match (&self.snapshot, &self.context) {
            (Some(snapshot), Some(context)) => Ok((snapshot, context)),
            _ => Err(DashboardError::NoSnapshot),
        }
    }
}
