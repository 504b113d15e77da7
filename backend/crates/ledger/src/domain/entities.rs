//! Domain Entities
//!
//! Core business entities for the ledger domain.

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{TransactionId, UserId};

use crate::domain::services::Cursor;
use crate::domain::value_objects::{Cents, Merchant};

/// A single ledger line owned by one user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub id: TransactionId,
    pub user_id: UserId,
    pub date: NaiveDate,
    pub merchant: Merchant,
    /// Never zero
    pub amount: Cents,
    pub detailed_category: i32,
    /// Server-set; not part of ordering
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction from validated fields
    pub fn new(user_id: UserId, fields: TransactionFields) -> Self {
        Self {
            id: TransactionId::new(),
            user_id,
            date: fields.date,
            merchant: fields.merchant,
            amount: fields.amount,
            detailed_category: fields.detailed_category,
            updated_at: Utc::now(),
        }
    }

    /// Keyset position of this row
    pub fn cursor(&self) -> Cursor {
        Cursor {
            date: self.date,
            id: self.id,
        }
    }

    /// Replace the user-editable fields
    pub fn apply(&mut self, fields: TransactionFields, now: DateTime<Utc>) {
        self.date = fields.date;
        self.merchant = fields.merchant;
        self.amount = fields.amount;
        self.detailed_category = fields.detailed_category;
        self.updated_at = now;
    }
}

/// Validated, user-editable fields (create and full update)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionFields {
    pub date: NaiveDate,
    pub merchant: Merchant,
    pub amount: Cents,
    pub detailed_category: i32,
}

/// Detailed category joined with its primary category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub primary_id: i32,
    pub primary_name: String,
}

/// Seeded category table: (detailed id, detailed name, primary id, primary name)
pub const DEFAULT_CATEGORIES: &[(i32, &str, i32, &str)] = &[
    (10, "Salary", 1, "Income"),
    (11, "Interest", 1, "Income"),
    (12, "Refund", 1, "Income"),
    (20, "Transfer In", 2, "Transfer"),
    (21, "Transfer Out", 2, "Transfer"),
    (30, "Rent", 3, "Housing"),
    (31, "Utilities", 3, "Housing"),
    (40, "Groceries", 4, "Food and Drink"),
    (41, "Restaurants", 4, "Food and Drink"),
    (42, "Coffee", 4, "Food and Drink"),
    (50, "Gas", 5, "Transportation"),
    (51, "Public Transit", 5, "Transportation"),
    (52, "Rideshare", 5, "Transportation"),
    (60, "General Merchandise", 6, "Shopping"),
    (61, "Clothing", 6, "Shopping"),
    (62, "Electronics", 6, "Shopping"),
    (70, "Pharmacy", 7, "Health"),
    (71, "Medical", 7, "Health"),
    (80, "Streaming", 8, "Entertainment"),
    (81, "Events", 8, "Entertainment"),
    (90, "Fees", 9, "Other"),
    (91, "Miscellaneous", 9, "Other"),
];

impl Category {
    pub fn defaults() -> Vec<Category> {
        DEFAULT_CATEGORIES
            .iter()
            .map(|&(id, name, primary_id, primary_name)| Category {
                id,
                name: name.to_string(),
                primary_id,
                primary_name: primary_name.to_string(),
            })
            .collect()
    }
}
