//! # WGIDA Server
//!
//! REST API for the WGIDA dashboard. The rendering layer is an external
//! collaborator: it fetches filter values and numeric chart series from
//! these routes and binds them to charts by their stable ids; no chart
//! configuration lives on this side.
//!
//! ## Routes
//!
//! Everything is mounted under `/api/v1/dashboard`:
//!
//! | Route                        | Method | Purpose                              |
//! |------------------------------|--------|--------------------------------------|
//! | `/health`                    | GET    | Liveness + run count                 |
//! | `/dataset`                   | GET    | Load state summary                   |
//! | `/dataset/values`            | GET    | Distinct filter values per family    |
//! | `/filters`                   | GET    | Current selection                    |
//! | `/filters`                   | PUT    | Replace (part of) the selection      |
//! | `/filters/submit`            | POST   | Recompute and install a snapshot     |
//! | `/runs`                      | GET    | Paginated run listing (snapshot)     |
//! | `/metrics/precision-recall`  | GET    | Sliding + whole-simulation columns   |
//! | `/metrics/communication`     | GET    | Message/payload stacked columns      |
//! | `/metrics/heatmaps`          | GET    | Shift×window, window×threshold grids |
//! | `/metrics/stacked-areas`     | GET    | Per-threshold / per-window overhead  |
//!
//! Metric and run routes answer `409 no_snapshot` until the first submit;
//! dataset routes work over the empty store without error.

pub mod api;
pub mod state;

pub use api::{dashboard_routes, handle_rejection};
pub use state::{shared_dashboard, Dashboard, SharedDashboard};

/// Errors surfaced by the dashboard state.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// A metric or run listing was requested before any filter submit.
    #[error("no snapshot installed: submit a filter selection first")]
    NoSnapshot,
}
