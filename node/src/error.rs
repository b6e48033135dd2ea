use thiserror::Error;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("registry error: {0}")]
    Registry(#[from] hqa_registry::RegistryError),

    #[error("config error: {0}")]
    Config(String),

    #[error("persistence error: {0}")]
    Persistence(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
