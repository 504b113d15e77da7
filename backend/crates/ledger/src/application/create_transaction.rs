//! Create Transaction Use Case

use std::sync::Arc;

use kernel::context::RequestContext;
use kernel::id::UserId;
use rust_decimal::Decimal;

use crate::domain::entities::{Transaction, TransactionFields};
use crate::domain::repository::TransactionRepository;
use crate::domain::value_objects::{Cents, Merchant, TransactionDate};
use crate::error::LedgerResult;

/// Unvalidated transaction fields as received from the client
#[derive(Debug, Clone)]
pub struct TransactionInput {
    pub date: String,
    pub merchant: String,
    pub amount: Decimal,
    pub detailed_category: i32,
}

impl TransactionInput {
    /// Validate date, merchant and amount; dollars become cents here
    pub fn into_fields(self) -> LedgerResult<TransactionFields> {
        Ok(TransactionFields {
            date: TransactionDate::parse(&self.date)?.into_inner(),
            merchant: Merchant::new(&self.merchant)?,
            amount: Cents::from_dollars(self.amount)?.nonzero()?,
            detailed_category: self.detailed_category,
        })
    }
}

/// Create transaction use case
pub struct CreateTransactionUseCase<R>
where
    R: TransactionRepository,
{
    repo: Arc<R>,
}

impl<R> CreateTransactionUseCase<R>
where
    R: TransactionRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        ctx: &RequestContext,
        user_id: &UserId,
        input: TransactionInput,
    ) -> LedgerResult<Transaction> {
        let fields = input.into_fields()?;
        let transaction = self.repo.create(&Transaction::new(*user_id, fields)).await?;

        tracing::info!(
            request_id = %ctx.request_id,
            user_id = %user_id,
            transaction_id = %transaction.id,
            "Transaction created"
        );

        Ok(transaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LedgerError;

    fn input(date: &str, merchant: &str, amount: Decimal) -> TransactionInput {
        TransactionInput {
            date: date.to_string(),
            merchant: merchant.to_string(),
            amount,
            detailed_category: 40,
        }
    }

    #[test]
    fn test_into_fields_converts_amount() {
        let fields = input("2025-03-05", " costco ", Decimal::new(12598, 2))
            .into_fields()
            .unwrap();
        assert_eq!(fields.amount, Cents::new(12598));
        assert_eq!(fields.merchant.as_str(), "costco");
    }

    #[test]
    fn test_into_fields_rejections() {
        assert!(matches!(
            input("03/05/2025", "costco", Decimal::ONE).into_fields(),
            Err(LedgerError::InvalidDateFormat)
        ));
        assert!(matches!(
            input("2025-03-05", "   ", Decimal::ONE).into_fields(),
            Err(LedgerError::InvalidMerchant)
        ));
        assert!(matches!(
            input("2025-03-05", "costco", Decimal::new(4, 3)).into_fields(),
            Err(LedgerError::InvalidAmount)
        ));
    }
}
