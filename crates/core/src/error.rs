#[derive(Debug, thiserror::Error)]
pub enum LabelError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to create profile directory: {0}")]
    ProfileDirCreation(std::io::Error),
    #[error("failed to write profile file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to read file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to remove profile file: {0}")]
    FileRemove(std::io::Error),
    #[error("failed to serialize profile: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize profile: {0}")]
    Deserialization(serde_json::Error),
    #[error("failed to serialize YAML: {0}")]
    YamlSerialization(serde_yaml::Error),
    #[error("taxonomy schema mismatch at {path}: {message}")]
    TaxonomySchema { path: String, message: String },
    #[error("health profile not found: {0}")]
    ProfileNotFound(String),
    #[error("profile store lock poisoned")]
    StorePoisoned,
    #[error("invalid text: {0}")]
    Text(#[from] cleanlabel_types::TextError),
}

pub type LabelResult<T> = std::result::Result<T, LabelError>;
