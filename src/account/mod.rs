//! Account traits and structs
use crate::{AccountNumber, TaxId};
use rust_decimal::Decimal;

pub(crate) mod balance;
pub(crate) mod bank_account;
pub(crate) mod history;
pub(crate) mod transactions;

pub use bank_account::{AccountKind, BankAccount, CheckingLimits};
pub use history::{History, HistoryRecord};
pub use transactions::{Transaction, TransactionKind};

/// Represent basic account information and balance
pub trait Account {
    /// unique number of account
    fn number(&self) -> AccountNumber;
    /// branch that holds account
    fn branch(&self) -> &str;
    /// tax id of the owning customer
    fn owner(&self) -> &TaxId;
    /// amount of money available for withdraw
    fn balance(&self) -> Decimal;
    /// transactions applied to this account
    fn history(&self) -> &History;
}
