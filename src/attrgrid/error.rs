use thiserror::Error;

#[derive(Error, Debug)]
pub enum AttrgridError {
    #[error("Unknown attribute '{attribute}' for model {model}")]
    UnknownAttribute { attribute: String, model: String },

    #[error("Unknown model: {0}")]
    UnknownModel(String),

    #[error("Record has no member '{0}'")]
    UnknownMember(String),

    #[error("Accessor error: {0}")]
    Accessor(String),

    #[error("Definition error: {0}")]
    Definition(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AttrgridError>;
