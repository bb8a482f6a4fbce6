use engine::EngineError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no snapshot given: pass --snapshot or set `snapshot` in the config file")]
    MissingSnapshot,
    #[error("unknown member: {0}")]
    UnknownMember(String),
    #[error("invalid {kind} #{index}: {source}")]
    Document {
        kind: &'static str,
        index: usize,
        #[source]
        source: EngineError,
    },
    #[error(transparent)]
    Engine(#[from] EngineError),
}
