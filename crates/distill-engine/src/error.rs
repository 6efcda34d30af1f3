#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Parsed document has no body element")]
    MissingBody,
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
}
