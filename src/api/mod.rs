//! HTTP API module for the Policy Impact Engine.
//!
//! This module provides the REST endpoints that let a form front-end list
//! the registered regimes and compute their impact on a household.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::HouseholdRequest;
pub use response::{ApiError, ComparisonResponse, DisplayAmounts, ImpactResponse, RegimeSummary};
pub use state::AppState;
