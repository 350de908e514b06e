/// Errors raised by either store implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No row with the given id.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// An occupy was refused because another entry claimed the spot first.
    #[error("Parking spot {id} is already occupied")]
    SpotTaken { id: String },

    /// Reading or writing the local snapshot failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The local snapshot or a remote payload could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The HTTP request to the remote backend failed (network, DNS, TLS).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote backend answered with a non-2xx status.
    #[error("Remote backend error ({status}): {body}")]
    Backend { status: u16, body: String },

    /// Fixture data could not be generated.
    #[error("Fixture generation failed: {0}")]
    Seed(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}
