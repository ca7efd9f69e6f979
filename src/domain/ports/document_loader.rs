use crate::domain::{errors::DomainError, FetchedDocument};
use async_trait::async_trait;

#[async_trait]
pub trait DocumentLoader: Send + Sync {
    /// Fetches the document behind `url` and returns its extracted text.
    async fn fetch(&self, url: &str) -> Result<FetchedDocument, DomainError>;
}
