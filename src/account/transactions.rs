//! Represents transactions
use super::{bank_account::BankAccount, history::HistoryRecord};
use crate::errors::ValidationErr;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Money movement requested against an account
///
/// Transaction is the only writer of account [`super::History`], a record is appended only when
/// the account accepted the operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transaction {
    /// increase balance
    Deposit(Decimal),
    /// decrease balance
    Withdrawal(Decimal),
}

impl Transaction {
    #[allow(missing_docs)]
    pub fn kind(&self) -> TransactionKind {
        match self {
            Transaction::Deposit(_) => TransactionKind::Deposit,
            Transaction::Withdrawal(_) => TransactionKind::Withdrawal,
        }
    }

    #[allow(missing_docs)]
    pub fn amount(&self) -> Decimal {
        match self {
            Transaction::Deposit(amount) | Transaction::Withdrawal(amount) => *amount,
        }
    }

    /// try to apply transaction to `account`.
    ///
    /// On error account is left untouched and nothing is recorded.
    pub fn apply(&self, account: &mut BankAccount) -> Result<(), ValidationErr> {
        match self {
            Transaction::Deposit(amount) => account.deposit(*amount)?,
            Transaction::Withdrawal(amount) => account.withdraw(*amount)?,
        }

        account.history_mut().record(HistoryRecord {
            kind: self.kind(),
            amount: self.amount(),
            timestamp: Utc::now(),
        });
        Ok(())
    }
}

/// Tag of [`Transaction`] kept in history
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Deposit => f.write_str("Deposit"),
            TransactionKind::Withdrawal => f.write_str("Withdrawal"),
        }
    }
}
