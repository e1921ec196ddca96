//! Vibe Matcher Server - HTTP API over the vibe matcher
//!
//! Loads the catalog and embedding model once at startup, builds the item vectors, and serves
//! ranked matches over JSON.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /` - API information
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe (503 if the matcher failed to load)
//! - `GET /metrics` - Prometheus metrics
//! - `POST /api/v1/match` - Rank the catalog against `{"query": "...", "top_n": 3}`
//! - `POST /api/v1/smoke` - Run the configured smoke queries
//! - `GET /api/v1/catalog` - List catalog items with their glyphs
//! - `GET /api/v1/metadata` - Version, uptime, model name
//!
//! Errors are returned as `{"error": {"code": "...", "message": "..."}}`.

pub mod config;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::{EngineState, ServerState};
