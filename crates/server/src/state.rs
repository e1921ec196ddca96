use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use matcher::VibeMatcher;
use std::sync::Arc;
use vibematcher::{load_matcher, VibeConfig, FATAL_LOAD_MESSAGE};

/// Whether the matcher came up at startup.
#[derive(Clone)]
pub enum EngineState {
    Ready(Arc<VibeMatcher>),
    /// Load failed; the server keeps answering health probes and reports this on every API call.
    Failed(String),
}

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Application config (model, catalog, defaults, smoke cases)
    pub app: Arc<VibeConfig>,

    /// Matcher, loaded once at startup
    pub engine: EngineState,
}

impl ServerState {
    /// Load the application config and bring the matcher up.
    ///
    /// A config error is returned to the caller. A model or catalog failure is not: the state is
    /// built in [`EngineState::Failed`] so clients see the fatal message instead of a dead port.
    pub async fn initialize(config: ServerConfig) -> ServerResult<Self> {
        let app = VibeConfig::load(config.app_config.as_deref())
            .map_err(|e| ServerError::Config(e.to_string()))?;

        let engine = match load_matcher(&app).await {
            Ok(matcher) => {
                tracing::info!(
                    model = matcher.model_name(),
                    items = matcher.catalog().len(),
                    "matcher ready"
                );
                EngineState::Ready(Arc::new(matcher))
            }
            Err(err) => {
                tracing::error!(error = %err, "{FATAL_LOAD_MESSAGE}");
                EngineState::Failed(err.to_string())
            }
        };

        Ok(Self {
            config: Arc::new(config),
            app: Arc::new(app),
            engine,
        })
    }

    /// State around an already-built matcher.
    pub fn with_matcher(config: ServerConfig, app: VibeConfig, matcher: VibeMatcher) -> Self {
        Self {
            config: Arc::new(config),
            app: Arc::new(app),
            engine: EngineState::Ready(Arc::new(matcher)),
        }
    }

    /// State for a matcher that failed to load.
    pub fn failed(config: ServerConfig, app: VibeConfig, reason: impl Into<String>) -> Self {
        Self {
            config: Arc::new(config),
            app: Arc::new(app),
            engine: EngineState::Failed(reason.into()),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.engine, EngineState::Ready(_))
    }

    /// The matcher, or a 503 carrying the fatal load message.
    pub fn matcher(&self) -> ServerResult<Arc<VibeMatcher>> {
        match &self.engine {
            EngineState::Ready(matcher) => Ok(Arc::clone(matcher)),
            EngineState::Failed(_) => Err(ServerError::Unavailable(FATAL_LOAD_MESSAGE.to_string())),
        }
    }
}

/// Server metadata for health checks
#[derive(Debug, serde::Serialize)]
pub struct ServerMetadata {
    pub version: String,
    pub uptime_seconds: u64,
    pub model: String,
    pub catalog_items: usize,
}
