use thiserror::Error;

#[derive(Debug, Error)]
pub enum SynthyxError {
    /// Invalid scoring configuration (modifier parameters, objective shape).
    /// Raised at construction, never at call time.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The structure string could not be parsed by the chemistry toolkit.
    /// Public scoring entry points convert this into their documented
    /// fallback value instead of propagating it.
    #[error("Unparseable structure: {0}")]
    Parse(String),

    /// A molecular formula token could not be parsed.
    #[error("Malformed molecular formula: {0}")]
    Formula(String),

    /// Tanimoto comparison between fingerprints of different families.
    #[error("Fingerprint family mismatch: {0} vs {1}")]
    FamilyMismatch(String, String),

    #[error("Artifact load error: {0}")]
    ArtifactLoad(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, SynthyxError>;
