//! Per-user join of orders and transactions.

use std::sync::Arc;
use tracing::debug;

use crate::application::error::PipelineError;
use crate::domain::consolidation::UserConsolidated;
use crate::domain::entities::User;
use crate::infrastructure::ledger::{OrderSource, TransactionSource};

/// Fetches a user's orders and transactions concurrently and joins them.
pub struct UserConsolidationFetcher {
    orders: Arc<dyn OrderSource>,
    transactions: Arc<dyn TransactionSource>,
}

impl UserConsolidationFetcher {
    pub fn new(orders: Arc<dyn OrderSource>, transactions: Arc<dyn TransactionSource>) -> Self {
        Self {
            orders,
            transactions,
        }
    }

    /// Builds the consolidated view of one user.
    ///
    /// Both fetches are in flight at the same time. The first one to fail
    /// cancels the other and its error becomes the result; there is no
    /// partially filled [`UserConsolidated`].
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Fetch`] if either fetch fails.
    pub async fn consolidate(&self, user: User) -> Result<UserConsolidated, PipelineError> {
        let (orders, transactions) = tokio::try_join!(
            self.orders.fetch_orders(user.id),
            self.transactions.fetch_transactions(user.id),
        )
        .map_err(|source| PipelineError::Fetch {
            user_id: user.id,
            source,
        })?;

        debug!(
            user_id = user.id,
            orders = orders.len(),
            transactions = transactions.len(),
            "User data consolidated"
        );

        Ok(UserConsolidated::new(user, orders, transactions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{OrderRecord, TransactionRecord};
    use crate::infrastructure::ledger::{
        LedgerError, LedgerResult, MockOrderSource, MockTransactionSource,
    };
    use async_trait::async_trait;
    use std::time::Duration;
    use tokio::time::Instant;

    struct SlowLedger(Duration);

    #[async_trait]
    impl OrderSource for SlowLedger {
        async fn fetch_orders(&self, user_id: i64) -> LedgerResult<Vec<OrderRecord>> {
            tokio::time::sleep(self.0).await;
            Ok(vec![OrderRecord::new(1, user_id, 1.0, "BTC")])
        }
    }

    #[async_trait]
    impl TransactionSource for SlowLedger {
        async fn fetch_transactions(&self, user_id: i64) -> LedgerResult<Vec<TransactionRecord>> {
            tokio::time::sleep(self.0).await;
            Ok(vec![TransactionRecord::new(1, user_id, 1.0, "deposit")])
        }
    }

    #[tokio::test]
    async fn test_consolidate_joins_both_fetches() {
        let mut orders = MockOrderSource::new();
        orders
            .expect_fetch_orders()
            .withf(|id| *id == 5)
            .times(1)
            .returning(|id| Ok(vec![OrderRecord::new(1, id, 10.0, "BTC")]));

        let mut transactions = MockTransactionSource::new();
        transactions
            .expect_fetch_transactions()
            .withf(|id| *id == 5)
            .times(1)
            .returning(|id| {
                Ok(vec![
                    TransactionRecord::new(1, id, 10.0, "deposit"),
                    TransactionRecord::new(2, id, 20.0, "deposit"),
                ])
            });

        let fetcher = UserConsolidationFetcher::new(Arc::new(orders), Arc::new(transactions));
        let user = User::new(5, "eve@acme.test", 1);

        let consolidated = fetcher.consolidate(user.clone()).await.unwrap();

        assert_eq!(consolidated.user(), &user);
        assert_eq!(consolidated.orders().len(), 1);
        assert_eq!(consolidated.transactions().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_transactions_fetch_fails_whole_user() {
        let mut orders = MockOrderSource::new();
        orders.expect_fetch_orders().returning(|_| Ok(vec![]));

        let mut transactions = MockTransactionSource::new();
        transactions
            .expect_fetch_transactions()
            .returning(|_| Err(LedgerError::Request("connection refused".to_string())));

        let fetcher = UserConsolidationFetcher::new(Arc::new(orders), Arc::new(transactions));

        let err = fetcher
            .consolidate(User::new(8, "x@acme.test", 1))
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::Fetch { user_id: 8, .. }));
    }

    #[tokio::test]
    async fn test_failed_orders_fetch_fails_whole_user() {
        let mut orders = MockOrderSource::new();
        orders.expect_fetch_orders().returning(|_| {
            Err(LedgerError::Status {
                status: 500,
                body: "boom".to_string(),
            })
        });

        let mut transactions = MockTransactionSource::new();
        transactions
            .expect_fetch_transactions()
            .returning(|_| Ok(vec![]));

        let fetcher = UserConsolidationFetcher::new(Arc::new(orders), Arc::new(transactions));

        let result = fetcher.consolidate(User::new(2, "y@acme.test", 1)).await;

        assert!(matches!(
            result,
            Err(PipelineError::Fetch {
                source: LedgerError::Status { status: 500, .. },
                ..
            })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetches_run_concurrently() {
        let ledger = Arc::new(SlowLedger(Duration::from_millis(500)));
        let fetcher = UserConsolidationFetcher::new(ledger.clone(), ledger);

        let started = Instant::now();
        fetcher
            .consolidate(User::new(1, "a@acme.test", 1))
            .await
            .unwrap();

        assert!(started.elapsed() < Duration::from_millis(1000));
    }
}
