//! Minimal in-memory banking ledger: customers, checking accounts and their transaction history

#![deny(missing_docs)]

pub mod account;
pub mod amount;
pub mod config;
pub mod csv;
pub mod customer;
pub mod errors;
pub mod ledger;

/// Account number. Unique across the whole [`ledger::Ledger`], assigned sequentially from 1
pub type AccountNumber = u32;
/// Customer tax identifier (CPF). Unique across all customers
pub type TaxId = String;

/// Branch code shared by every account
pub const BRANCH: &str = "0001";
