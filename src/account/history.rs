//! Append only log of transactions applied to one account
use super::transactions::TransactionKind;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Single effective balance change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRecord {
    /// deposit or withdrawal
    pub kind: TransactionKind,
    /// money moved by the transaction
    pub amount: Decimal,
    /// moment the transaction was applied
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of transactions. Insertion order is the order of execution
#[derive(Debug, Clone, Default)]
pub struct History {
    records: Vec<HistoryRecord>,
}

impl History {
    pub(crate) fn record(&mut self, record: HistoryRecord) {
        self.records.push(record);
    }

    /// all records, oldest first
    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    /// number of recorded transactions of given `kind`
    pub fn count(&self, kind: TransactionKind) -> usize {
        self.records.iter().filter(|r| r.kind == kind).count()
    }

    #[allow(missing_docs)]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[allow(missing_docs)]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
