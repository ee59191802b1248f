//! Possible errors

use crate::{amount::NegativeAmountErr, AccountNumber, TaxId};
use rust_decimal::Decimal;
use thiserror::Error;

/// Group errors for account balance
#[allow(missing_docs)]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BalanceErr {
    #[error("not enough funds available for this operation")]
    InsufficientFunds,
    #[error("balance would exceed the largest supported amount")]
    Overflow,
}

/// Checking account withdrawal limits
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LimitErr {
    /// account already recorded `cap` withdrawals
    #[error("withdrawal limit of {cap} operations reached")]
    WithdrawalCountReached {
        /// configured number of allowed withdrawals
        cap: usize,
    },
    /// single withdrawal is bigger than allowed
    #[error("withdrawal exceeds the per operation limit of {limit}")]
    CeilingExceeded {
        /// configured maximum of a single withdrawal
        limit: Decimal,
    },
}

/// Group all errors that can occurs when money operation is validated against account
#[allow(missing_docs)]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationErr {
    #[error("amount must be greater than zero")]
    NonPositiveAmount,
    #[error(transparent)]
    Amount(#[from] NegativeAmountErr),
    #[error(transparent)]
    Balance(#[from] BalanceErr),
    #[error(transparent)]
    Limit(#[from] LimitErr),
}

/// Lookup by identifier failed
#[allow(missing_docs)]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NotFoundErr {
    #[error("customer with tax id {0} not found")]
    Customer(TaxId),
    #[error("customer with tax id {0} has no accounts")]
    NoAccounts(TaxId),
    #[error("account {0} not found")]
    Account(AccountNumber),
}

/// Group all errors returned by [`crate::ledger::Ledger`] operations
#[allow(missing_docs)]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerErr {
    #[error("operation rejected: {0}")]
    Validation(#[from] ValidationErr),
    #[error(transparent)]
    NotFound(#[from] NotFoundErr),
    #[error("tax id {0} already registered")]
    DuplicateTaxId(TaxId),
    #[error("no account numbers left")]
    AccountNumbersExhausted,
}

impl From<BalanceErr> for LedgerErr {
    fn from(e: BalanceErr) -> Self {
        ValidationErr::from(e).into()
    }
}

impl From<LimitErr> for LedgerErr {
    fn from(e: LimitErr) -> Self {
        ValidationErr::from(e).into()
    }
}
