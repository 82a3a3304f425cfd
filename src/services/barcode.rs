//! Barcode issuance service
//!
//! Composes the persisted sequence counters with the pure EAN-13 codec.
//! Each `issue` call consumes exactly one sequence value; values consumed
//! by callers that later fail or are cancelled are never returned to the
//! pool, so gaps in issued codes are expected. EAN-13 capacity is large
//! relative to realistic issuance volume.

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    barcode,
    config::BarcodeConfig,
    error::{AppError, AppResult},
    models::barcode::BarcodeCategory,
};

/// Persistence seam for the per-category counters.
///
/// `get_next` must be a single atomic increment-and-read: every concurrent
/// caller within a category sees a distinct, strictly increasing value.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SequenceStore: Send + Sync {
    async fn get_next(&self, category: BarcodeCategory) -> AppResult<(u64, u16)>;

    async fn set_prefix(
        &self,
        category: BarcodeCategory,
        prefix: u16,
        description: &str,
    ) -> AppResult<()>;
}

#[derive(Clone)]
pub struct BarcodeService {
    store: Arc<dyn SequenceStore>,
    config: BarcodeConfig,
}

impl BarcodeService {
    pub fn new(store: Arc<dyn SequenceStore>, config: BarcodeConfig) -> Self {
        Self { store, config }
    }

    /// Mint a fresh EAN-13 for `category`.
    ///
    /// Overflow of the 9-digit sequence body is terminal for the category:
    /// the error is returned as-is (no retry, no automatic prefix rotation)
    /// and an operator must rotate the prefix via [`set_prefix`].
    ///
    /// The issuer guarantees a fresh sequence value, not global uniqueness:
    /// collisions with externally entered factory barcodes are caught by
    /// the storage uniqueness constraint.
    ///
    /// [`set_prefix`]: BarcodeService::set_prefix
    pub async fn issue(&self, category: BarcodeCategory) -> AppResult<String> {
        let (sequence, prefix) = self.store.get_next(category).await?;

        if sequence > barcode::SEQUENCE_CAPACITY {
            return Err(AppError::SequenceOverflow {
                category: category.to_string(),
                prefix,
            });
        }

        barcode::assemble(prefix, sequence)
            .map_err(|e| AppError::Internal(format!("failed to assemble barcode: {}", e)))
    }

    /// Administrative prefix rotation. The new prefix must lie inside the
    /// configured issuance range.
    pub async fn set_prefix(
        &self,
        category: BarcodeCategory,
        prefix: u16,
        description: &str,
    ) -> AppResult<()> {
        if !self.config.contains(prefix) {
            return Err(AppError::Validation(format!(
                "prefix {} is outside the configured issuance range {}-{}",
                prefix, self.config.prefix_min, self.config.prefix_max
            )));
        }

        self.store.set_prefix(category, prefix, description).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicU64, Ordering};

    fn service(store: MockSequenceStore) -> BarcodeService {
        BarcodeService::new(Arc::new(store), BarcodeConfig::default())
    }

    #[tokio::test]
    async fn test_issue_formats_prefix_and_sequence() {
        let mut store = MockSequenceStore::new();
        store
            .expect_get_next()
            .withf(|c| *c == BarcodeCategory::Location)
            .returning(|_| Ok((42, 210)));

        let code = service(store).issue(BarcodeCategory::Location).await.unwrap();
        assert_eq!(code, "2100000000425");
        assert!(barcode::validate(&code));
    }

    #[tokio::test]
    async fn test_issue_overflow_is_terminal() {
        let mut store = MockSequenceStore::new();
        store
            .expect_get_next()
            .returning(|_| Ok((barcode::SEQUENCE_CAPACITY + 1, 200)));

        let err = service(store).issue(BarcodeCategory::Book).await.unwrap_err();
        match err {
            AppError::SequenceOverflow { category, prefix } => {
                assert_eq!(category, "book");
                assert_eq!(prefix, 200);
            }
            other => panic!("expected SequenceOverflow, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_issue_at_capacity_succeeds() {
        let mut store = MockSequenceStore::new();
        store
            .expect_get_next()
            .returning(|_| Ok((barcode::SEQUENCE_CAPACITY, 200)));

        let code = service(store).issue(BarcodeCategory::Book).await.unwrap();
        assert!(code.starts_with("200999999999"));
    }

    #[tokio::test]
    async fn test_issue_propagates_store_errors() {
        let mut store = MockSequenceStore::new();
        store
            .expect_get_next()
            .returning(|c| Err(AppError::SequenceNotConfigured(c.to_string())));

        let err = service(store).issue(BarcodeCategory::Book).await.unwrap_err();
        assert!(matches!(err, AppError::SequenceNotConfigured(_)));
    }

    #[tokio::test]
    async fn test_set_prefix_rejects_out_of_range() {
        let mut store = MockSequenceStore::new();
        store.expect_set_prefix().never();

        let err = service(store)
            .set_prefix(BarcodeCategory::Book, 300, "rotated")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_set_prefix_accepts_configured_range() {
        let mut store = MockSequenceStore::new();
        store
            .expect_set_prefix()
            .withf(|c, p, d| *c == BarcodeCategory::Book && *p == 250 && d == "rotated")
            .returning(|_, _, _| Ok(()));

        service(store)
            .set_prefix(BarcodeCategory::Book, 250, "rotated")
            .await
            .unwrap();
    }

    /// Counter backed by a fetch-and-increment, standing in for the
    /// `UPDATE ... RETURNING` the real store runs.
    struct AtomicStore {
        counter: AtomicU64,
    }

    #[async_trait]
    impl SequenceStore for AtomicStore {
        async fn get_next(&self, _category: BarcodeCategory) -> AppResult<(u64, u16)> {
            Ok((self.counter.fetch_add(1, Ordering::SeqCst) + 1, 200))
        }

        async fn set_prefix(
            &self,
            _category: BarcodeCategory,
            _prefix: u16,
            _description: &str,
        ) -> AppResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_concurrent_issuance_yields_distinct_codes() {
        let service = BarcodeService::new(
            Arc::new(AtomicStore { counter: AtomicU64::new(0) }),
            BarcodeConfig::default(),
        );

        let mut handles = Vec::new();
        for _ in 0..8 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                let mut codes = Vec::new();
                for _ in 0..50 {
                    codes.push(service.issue(BarcodeCategory::Book).await.unwrap());
                }
                codes
            }));
        }

        let mut all = HashSet::new();
        for handle in handles {
            for code in handle.await.unwrap() {
                assert!(barcode::validate(&code));
                assert!(all.insert(code), "issued barcode twice");
            }
        }
        assert_eq!(all.len(), 400);
    }
}
