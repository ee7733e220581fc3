use async_trait::async_trait;

use crate::location::{PostalCode, PostalCodeDetail};
use crate::ports::errors::RemoteStoreError;

#[async_trait]
pub trait PostalCodeDirectoryPort: Send + Sync {
    async fn list_postal_codes(&self) -> Result<Vec<PostalCode>, RemoteStoreError>;

    /// `Ok(None)` when no document exists for `code`.
    async fn get_postal_code_detail(
        &self,
        code: &PostalCode,
    ) -> Result<Option<PostalCodeDetail>, RemoteStoreError>;
}
