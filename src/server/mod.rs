//! HTTP transport: `GET /health`, `POST /suggest`, `POST /needs`.

pub mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::{get, post};
use tracing::info;

use crate::error::Result;
use crate::models::{Catalog, SearchParams};
use crate::planner::PairingTable;

pub use handlers::{NO_MEAL_MESSAGE, SuggestRequest, SuggestResponse};

/// Default wall-clock budget for one search.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(5);

/// Immutable inputs shared by every request.
#[derive(Debug)]
pub struct AppState {
    pub catalog: Catalog,
    pub pairings: PairingTable,
    pub defaults: SearchParams,
    pub deadline: Duration,
}

impl AppState {
    pub fn new(catalog: Catalog, pairings: PairingTable) -> Self {
        Self {
            catalog,
            pairings,
            defaults: SearchParams::default(),
            deadline: DEFAULT_DEADLINE,
        }
    }

    pub fn with_defaults(mut self, defaults: SearchParams) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }
}

pub type SharedState = Arc<AppState>;

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/suggest", post(handlers::suggest_meal))
        .route("/needs", post(handlers::nutrition_needs))
        .with_state(state)
}

/// Bind and serve until the process exits.
pub async fn serve(addr: SocketAddr, state: SharedState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        %addr,
        items = state.catalog.len(),
        rules = state.pairings.len(),
        "listening"
    );
    axum::serve(listener, router(state)).await?;
    Ok(())
}
