//! Postal-code directory lookups. Both use cases degrade to "nothing found"
//! when the backend is unreachable.

use std::sync::Arc;

use sp_core::ports::PostalCodeDirectoryPort;
use sp_core::{PostalCode, PostalCodeDetail};
use tracing::{info_span, warn, Instrument};

pub struct ListPostalCodes {
    directory: Arc<dyn PostalCodeDirectoryPort>,
}

impl ListPostalCodes {
    pub fn new(directory: Arc<dyn PostalCodeDirectoryPort>) -> Self {
        Self { directory }
    }

    /// Known postal codes, sorted and deduplicated.
    pub async fn execute(&self) -> Vec<PostalCode> {
        let span = info_span!("usecase.list_postal_codes.execute");

        async move {
            match self.directory.list_postal_codes().await {
                Ok(mut codes) => {
                    codes.sort();
                    codes.dedup();
                    codes
                }
                Err(err) => {
                    warn!(error = %err, "Failed to list postal codes");
                    Vec::new()
                }
            }
        }
        .instrument(span)
        .await
    }
}

pub struct GetPostalCodeDetail {
    directory: Arc<dyn PostalCodeDirectoryPort>,
}

impl GetPostalCodeDetail {
    pub fn new(directory: Arc<dyn PostalCodeDirectoryPort>) -> Self {
        Self { directory }
    }

    #[tracing::instrument(name = "usecase.get_postal_code_detail.execute", skip(self, code), fields(code = %code))]
    pub async fn execute(&self, code: &PostalCode) -> Option<PostalCodeDetail> {
        match self.directory.get_postal_code_detail(code).await {
            Ok(detail) => detail,
            Err(err) => {
                warn!(error = %err, "Failed to load postal code detail");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::test_support::MockPostalCodeDirectory;
    use mockall::predicate::eq;
    use sp_core::ports::RemoteStoreError;
    use sp_core::{Coordinates, StoreLocation};
    use std::collections::BTreeMap;

    #[tokio::test]
    async fn test_list_sorts_and_dedups() {
        let mut directory = MockPostalCodeDirectory::new();
        directory.expect_list_postal_codes().returning(|| {
            Ok(vec![
                PostalCode::from("22030"),
                PostalCode::from("20151"),
                PostalCode::from("22030"),
            ])
        });
        let uc = ListPostalCodes::new(Arc::new(directory));

        let codes = uc.execute().await;

        assert_eq!(codes, vec![PostalCode::from("20151"), PostalCode::from("22030")]);
    }

    #[tokio::test]
    async fn test_list_is_empty_on_failure() {
        let mut directory = MockPostalCodeDirectory::new();
        directory
            .expect_list_postal_codes()
            .returning(|| Err(RemoteStoreError::Status {
                status: 403,
                body: "denied".to_string(),
            }));
        let uc = ListPostalCodes::new(Arc::new(directory));

        assert!(uc.execute().await.is_empty());
    }

    #[tokio::test]
    async fn test_detail_passes_through_found_document() {
        let mut stores = BTreeMap::new();
        stores.insert(
            "Target".to_string(),
            StoreLocation {
                coordinates: Some(Coordinates::new(38.85, -77.30)),
                address: None,
            },
        );
        let detail = PostalCodeDetail { stores };
        let expected = detail.clone();

        let mut directory = MockPostalCodeDirectory::new();
        directory
            .expect_get_postal_code_detail()
            .with(eq(PostalCode::from("22030")))
            .returning(move |_| Ok(Some(detail.clone())));
        let uc = GetPostalCodeDetail::new(Arc::new(directory));

        assert_eq!(uc.execute(&PostalCode::from("22030")).await, Some(expected));
    }

    #[tokio::test]
    async fn test_detail_is_none_on_failure() {
        let mut directory = MockPostalCodeDirectory::new();
        directory
            .expect_get_postal_code_detail()
            .returning(|_| Err(RemoteStoreError::Transport("timeout".to_string())));
        let uc = GetPostalCodeDetail::new(Arc::new(directory));

        assert!(uc.execute(&PostalCode::from("99999")).await.is_none());
    }
}
