//! Directory of all customers and accounts

use crate::{
    account::{Account, BankAccount, HistoryRecord, Transaction},
    config::LedgerConfig,
    csv::AccountSummary,
    customer::{Customer, Individual},
    errors::{LedgerErr, NotFoundErr},
    AccountNumber, TaxId,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Account history together with current balance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    #[allow(missing_docs)]
    pub number: AccountNumber,
    /// applied transactions, oldest first
    pub records: Vec<HistoryRecord>,
    #[allow(missing_docs)]
    pub balance: Decimal,
}

/// Owns every customer (by tax id) and every account (by number).
///
/// All operations are synchronous and must be called from one place at a time.
#[derive(Debug, Default)]
pub struct Ledger {
    config: LedgerConfig,
    customers: BTreeMap<TaxId, Customer>,
    accounts: BTreeMap<AccountNumber, BankAccount>,
}

impl Ledger {
    /// Create empty ledger that opens accounts with limits from `config`
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            config,
            customers: BTreeMap::new(),
            accounts: BTreeMap::new(),
        }
    }

    #[allow(missing_docs)]
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// all customers ordered by tax id
    pub fn customers(&self) -> impl Iterator<Item = &Customer> {
        self.customers.values()
    }

    /// all accounts ordered by number
    pub fn accounts(&self) -> impl Iterator<Item = &BankAccount> {
        self.accounts.values()
    }

    /// Add new individual customer. Tax id must not be registered yet
    pub fn register_customer(
        &mut self,
        full_name: impl Into<String>,
        address: impl Into<String>,
        tax_id: impl Into<TaxId>,
        birth_date: NaiveDate,
    ) -> Result<&Customer, LedgerErr> {
        let tax_id = tax_id.into();
        if self.customers.contains_key(&tax_id) {
            warn!(tax_id = %tax_id, "tax id already registered");
            return Err(LedgerErr::DuplicateTaxId(tax_id));
        }

        let profile = Individual {
            tax_id: tax_id.clone(),
            full_name: full_name.into(),
            birth_date,
        };
        info!(tax_id = %tax_id, "customer registered");
        let customer = self
            .customers
            .entry(tax_id)
            .or_insert_with(|| Customer::new(profile, address.into()));
        Ok(&*customer)
    }

    /// Open checking account for registered customer.
    ///
    /// Account number is the count of all existing accounts plus one.
    pub fn open_account(&mut self, tax_id: &str) -> Result<&BankAccount, LedgerErr> {
        let customer = self
            .customers
            .get_mut(tax_id)
            .ok_or_else(|| NotFoundErr::Customer(tax_id.into()))?;

        let number = next_account_number(self.accounts.len())?;
        let account = BankAccount::checking(
            number,
            customer.tax_id().clone(),
            self.config.checking_limits(),
        );
        customer.add_account(number);
        info!(tax_id, account = number, "account opened");

        Ok(&*self.accounts.entry(number).or_insert(account))
    }

    /// Customer with given `tax_id`
    pub fn find_customer(&self, tax_id: &str) -> Result<&Customer, NotFoundErr> {
        self.customers
            .get(tax_id)
            .ok_or_else(|| NotFoundErr::Customer(tax_id.into()))
    }

    /// Account `number` of `customer`
    pub fn find_account(
        &self,
        customer: &Customer,
        number: AccountNumber,
    ) -> Result<&BankAccount, NotFoundErr> {
        check_owner(customer, number)?;
        self.accounts
            .get(&number)
            .ok_or(NotFoundErr::Account(number))
    }

    /// Deposit `amount` into account `number` owned by `tax_id`
    pub fn deposit(
        &mut self,
        tax_id: &str,
        number: AccountNumber,
        amount: Decimal,
    ) -> Result<(), LedgerErr> {
        self.execute(tax_id, number, Transaction::Deposit(amount))
    }

    /// Withdraw `amount` from account `number` owned by `tax_id`
    pub fn withdraw(
        &mut self,
        tax_id: &str,
        number: AccountNumber,
        amount: Decimal,
    ) -> Result<(), LedgerErr> {
        self.execute(tax_id, number, Transaction::Withdrawal(amount))
    }

    /// Resolve customer and account then let customer run `transaction`
    pub fn execute(
        &mut self,
        tax_id: &str,
        number: AccountNumber,
        transaction: Transaction,
    ) -> Result<(), LedgerErr> {
        let customer = self
            .customers
            .get(tax_id)
            .ok_or_else(|| NotFoundErr::Customer(tax_id.into()))?;
        check_owner(customer, number)?;
        let account = self
            .accounts
            .get_mut(&number)
            .ok_or(NotFoundErr::Account(number))?;

        let kind = transaction.kind();
        let amount = transaction.amount();
        match customer.execute(account, &transaction) {
            Ok(()) => {
                info!(tax_id, account = number, %kind, %amount, "transaction applied");
                Ok(())
            }
            Err(e) => {
                warn!(tax_id, account = number, %kind, %amount, reason = %e, "transaction rejected");
                Err(e.into())
            }
        }
    }

    /// History and balance of account `number` owned by `tax_id`
    pub fn statement(&self, tax_id: &str, number: AccountNumber) -> Result<Statement, LedgerErr> {
        let customer = self.find_customer(tax_id)?;
        let account = self.find_account(customer, number)?;
        debug!(tax_id, account = number, "statement requested");

        Ok(Statement {
            number,
            records: account.history().records().to_vec(),
            balance: account.balance(),
        })
    }

    /// Summaries of all accounts ordered by number
    pub fn list_accounts(&self) -> Vec<AccountSummary> {
        self.accounts
            .values()
            .map(|acc| {
                let owner = self
                    .customers
                    .get(acc.owner())
                    .map(|c| c.full_name())
                    .unwrap_or_default();
                AccountSummary::new(acc, owner)
            })
            .collect()
    }
}

/// number of account opened after `count` existing ones
fn next_account_number(count: usize) -> Result<AccountNumber, LedgerErr> {
    count
        .checked_add(1)
        .and_then(|n| AccountNumber::try_from(n).ok())
        .ok_or(LedgerErr::AccountNumbersExhausted)
}

fn check_owner(customer: &Customer, number: AccountNumber) -> Result<(), NotFoundErr> {
    if customer.accounts().is_empty() {
        return Err(NotFoundErr::NoAccounts(customer.tax_id().clone()));
    }
    if !customer.owns(number) {
        return Err(NotFoundErr::Account(number));
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::{next_account_number, Ledger};
    use crate::{
        account::{Account, TransactionKind},
        config::LedgerConfig,
        errors::{BalanceErr, LedgerErr, LimitErr, NotFoundErr, ValidationErr},
        AccountNumber,
    };
    use chrono::NaiveDate;
    use rand::Rng;
    use rust_decimal::Decimal;

    fn birth() -> NaiveDate {
        NaiveDate::from_ymd_opt(1985, 6, 15).unwrap()
    }

    /// Ledger with customers "111", "222", "333" and no accounts
    fn new_test_ledger() -> Ledger {
        let mut l = Ledger::default();
        l.register_customer("Ana", "Street 1", "111", birth()).unwrap();
        l.register_customer("Bruno", "Street 2", "222", birth()).unwrap();
        l.register_customer("Carla", "Street 3", "333", birth()).unwrap();
        l
    }

    #[test]
    fn find_customer_scans_whole_directory() {
        let l = new_test_ledger();

        let c = l.find_customer("333").unwrap();
        assert_eq!(c.full_name(), "Carla");
        assert_eq!(c.address(), "Street 3");
        assert_eq!(l.find_customer("222").unwrap().full_name(), "Bruno");
        assert_eq!(
            l.find_customer("444").unwrap_err(),
            NotFoundErr::Customer("444".into())
        );
    }

    #[test]
    fn duplicate_tax_id() {
        let mut l = new_test_ledger();
        let e = l
            .register_customer("Other", "Street 9", "222", birth())
            .unwrap_err();

        assert_eq!(e, LedgerErr::DuplicateTaxId("222".into()));
        assert_eq!(l.find_customer("222").unwrap().full_name(), "Bruno");
        assert_eq!(l.customers().count(), 3);
    }

    #[test]
    fn account_numbers_are_sequential_across_customers() {
        let mut l = new_test_ledger();
        assert_eq!(l.open_account("111").unwrap().number(), 1);
        assert_eq!(l.open_account("333").unwrap().number(), 2);
        assert_eq!(l.open_account("111").unwrap().number(), 3);

        assert_eq!(l.find_customer("111").unwrap().accounts(), &[1, 3]);
        assert_eq!(l.find_customer("333").unwrap().accounts(), &[2]);
        assert_eq!(l.open_account("999").unwrap_err(), NotFoundErr::Customer("999".into()).into());
        assert_eq!(l.accounts().count(), 3);
    }

    #[test]
    fn account_numbers_never_wrap() {
        assert_eq!(next_account_number(0).unwrap(), 1);
        assert_eq!(
            next_account_number(AccountNumber::MAX as usize - 1).unwrap(),
            AccountNumber::MAX
        );
        assert_eq!(
            next_account_number(AccountNumber::MAX as usize).unwrap_err(),
            LedgerErr::AccountNumbersExhausted
        );
        assert_eq!(
            next_account_number(usize::MAX).unwrap_err(),
            LedgerErr::AccountNumbersExhausted
        );
    }

    #[test]
    fn deposit_overflow_is_rejected() {
        let mut l = new_test_ledger();
        l.open_account("111").unwrap();
        l.deposit("111", 1, Decimal::MAX).unwrap();

        let e = l.deposit("111", 1, Decimal::MAX).unwrap_err();
        assert_eq!(e, BalanceErr::Overflow.into());

        let s = l.statement("111", 1).unwrap();
        assert_eq!(s.balance, Decimal::MAX);
        assert_eq!(s.records.len(), 1);
    }

    #[test]
    fn lookup_errors() {
        let mut l = new_test_ledger();
        l.open_account("111").unwrap();
        let amount = Decimal::new(10, 0);

        assert_eq!(
            l.deposit("999", 1, amount).unwrap_err(),
            NotFoundErr::Customer("999".into()).into()
        );
        assert_eq!(
            l.deposit("222", 1, amount).unwrap_err(),
            NotFoundErr::NoAccounts("222".into()).into()
        );
        assert_eq!(
            l.withdraw("111", 2, amount).unwrap_err(),
            NotFoundErr::Account(2).into()
        );
        assert_eq!(
            l.statement("111", 5).unwrap_err(),
            NotFoundErr::Account(5).into()
        );
    }

    #[test]
    fn cannot_touch_account_of_other_customer() {
        let mut l = new_test_ledger();
        l.open_account("111").unwrap();
        l.open_account("222").unwrap();

        let e = l.deposit("222", 1, Decimal::new(10, 0)).unwrap_err();
        assert_eq!(e, NotFoundErr::Account(1).into());
    }

    #[test]
    fn deposit_withdraw_and_statement() {
        let mut l = new_test_ledger();
        l.open_account("111").unwrap();

        let e = l.withdraw("111", 1, Decimal::new(10, 0)).unwrap_err();
        assert_eq!(e, BalanceErr::InsufficientFunds.into());

        l.deposit("111", 1, Decimal::new(100, 0)).unwrap();
        let e = l.withdraw("111", 1, Decimal::new(600, 0)).unwrap_err();
        assert_eq!(
            e,
            LimitErr::CeilingExceeded {
                limit: Decimal::new(500, 0)
            }
            .into()
        );
        l.withdraw("111", 1, Decimal::new(2550, 2)).unwrap();

        let s = l.statement("111", 1).unwrap();
        assert_eq!(s.balance, Decimal::new(7450, 2));
        let kinds: Vec<_> = s.records.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![TransactionKind::Deposit, TransactionKind::Withdrawal]);

        // reading twice gives same result
        assert_eq!(s, l.statement("111", 1).unwrap());
    }

    #[test]
    fn configured_limits_apply_to_new_accounts() {
        let mut l = Ledger::new(LedgerConfig {
            withdrawal_limit: Decimal::new(50, 0),
            withdrawal_cap: 1,
        });
        l.register_customer("Ana", "Street 1", "111", birth()).unwrap();
        l.open_account("111").unwrap();
        l.deposit("111", 1, Decimal::new(1000, 0)).unwrap();

        l.withdraw("111", 1, Decimal::new(51, 0)).unwrap_err();
        l.withdraw("111", 1, Decimal::new(50, 0)).unwrap();
        let e = l.withdraw("111", 1, Decimal::new(1, 0)).unwrap_err();
        assert_eq!(e, LimitErr::WithdrawalCountReached { cap: 1 }.into());
    }

    #[test]
    fn negative_amounts_are_rejected() {
        let mut l = new_test_ledger();
        l.open_account("111").unwrap();

        let e = l.deposit("111", 1, Decimal::new(-1, 0)).unwrap_err();
        assert!(matches!(e, LedgerErr::Validation(ValidationErr::Amount(_))));
        let e = l.withdraw("111", 1, Decimal::new(-1, 0)).unwrap_err();
        assert_eq!(e, ValidationErr::NonPositiveAmount.into());
        assert!(l.statement("111", 1).unwrap().records.is_empty());
    }

    #[test]
    fn list_accounts_in_number_order() {
        let mut l = new_test_ledger();
        assert!(l.list_accounts().is_empty());

        l.open_account("333").unwrap();
        l.open_account("111").unwrap();

        let list = l.list_accounts();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].number, 1);
        assert_eq!(list[0].owner, "Carla");
        assert_eq!(list[1].number, 2);
        assert_eq!(list[1].owner, "Ana");
        assert!(list.iter().all(|s| s.branch == "0001"));
    }

    #[test]
    fn random_operations_keep_invariants() {
        let mut rng = rand::thread_rng();
        let mut l = new_test_ledger();
        for tax_id in ["111", "222", "333"] {
            l.open_account(tax_id).unwrap();
        }

        let mut succeeded = [0usize; 3];
        for _ in 0..2000 {
            let idx = rng.gen_range(0..3);
            let tax_id = ["111", "222", "333"][idx];
            let number = idx as u32 + 1;
            let amount = Decimal::new(rng.gen_range(-100..80_000), 2);

            let result = if rng.gen_bool(0.5) {
                l.deposit(tax_id, number, amount)
            } else {
                l.withdraw(tax_id, number, amount)
            };
            if result.is_ok() {
                succeeded[idx] += 1;
            }

            let acc = l.accounts().nth(idx).unwrap();
            assert!(acc.balance() >= Decimal::ZERO);
            assert!(acc.history().count(TransactionKind::Withdrawal) <= 3);
        }

        for (idx, acc) in l.accounts().enumerate() {
            assert_eq!(acc.history().len(), succeeded[idx]);
            let recomputed: Decimal = acc
                .history()
                .records()
                .iter()
                .map(|r| match r.kind {
                    TransactionKind::Deposit => r.amount,
                    TransactionKind::Withdrawal => -r.amount,
                })
                .sum();
            assert_eq!(recomputed, acc.balance());
        }
    }
}
