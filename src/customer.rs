//! Bank customers
use crate::{
    account::{BankAccount, Transaction},
    errors::ValidationErr,
    AccountNumber, TaxId,
};
use chrono::NaiveDate;

/// Personal data of an individual customer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Individual {
    /// unique customer identifier
    pub tax_id: TaxId,
    #[allow(missing_docs)]
    pub full_name: String,
    #[allow(missing_docs)]
    pub birth_date: NaiveDate,
}

/// Customer with address and numbers of owned accounts in order of opening
#[derive(Debug, Clone)]
pub struct Customer {
    profile: Individual,
    address: String,
    accounts: Vec<AccountNumber>,
}

impl Customer {
    /// Create customer without accounts
    pub fn new(profile: Individual, address: String) -> Self {
        Self {
            profile,
            address,
            accounts: Vec::new(),
        }
    }

    #[allow(missing_docs)]
    pub fn tax_id(&self) -> &TaxId {
        &self.profile.tax_id
    }

    #[allow(missing_docs)]
    pub fn full_name(&self) -> &str {
        &self.profile.full_name
    }

    #[allow(missing_docs)]
    pub fn birth_date(&self) -> NaiveDate {
        self.profile.birth_date
    }

    #[allow(missing_docs)]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// numbers of owned accounts, oldest first
    pub fn accounts(&self) -> &[AccountNumber] {
        &self.accounts
    }

    /// `true` if account with `number` belongs to this customer
    pub fn owns(&self, number: AccountNumber) -> bool {
        self.accounts.contains(&number)
    }

    /// Register opened account. Numbers are unique so duplicates are not checked
    pub fn add_account(&mut self, number: AccountNumber) {
        self.accounts.push(number);
    }

    /// Run `transaction` against one of customer accounts
    pub fn execute(
        &self,
        account: &mut BankAccount,
        transaction: &Transaction,
    ) -> Result<(), ValidationErr> {
        transaction.apply(account)
    }
}
