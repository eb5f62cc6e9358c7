use thiserror::Error;

use crate::domain::entities::user::RemoteUser;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("remote source answered HTTP {status} for {url}")]
    Status { status: u16, url: String },
    #[error("request to {url} failed: {message}")]
    Network { url: String, message: String },
    #[error("remote source unavailable: {0}")]
    Unavailable(String),
}

/// Envelope shared by every source operation. `total` counts the records
/// matching the criteria, not the whole dataset.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceEnvelope {
    pub records: Vec<RemoteUser>,
    pub total: usize,
    pub offset: usize,
    pub limit: usize,
}

/// Read-only paginated user directory.
pub trait UserSource: Send + Sync {
    fn list(&self, limit: usize, offset: usize) -> Result<SourceEnvelope, TransportError>;

    fn search(
        &self,
        query: &str,
        limit: usize,
        offset: usize,
    ) -> Result<SourceEnvelope, TransportError>;

    fn filter_by_field(
        &self,
        field: &str,
        value: &str,
        limit: usize,
        offset: usize,
    ) -> Result<SourceEnvelope, TransportError>;
}
