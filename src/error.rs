/// Errors surfaced by the binder and its document hosts.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid class name {name:?}: {reason}")]
    InvalidClassName { name: String, reason: &'static str },
    #[error("marker and expanded class are both {0:?}")]
    SameClass(String),
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("browser api error: {0}")]
    Host(String),
}
