use super::{balance::Balance, history::History, transactions::TransactionKind, Account};
use crate::{
    amount::Amount,
    errors::{LimitErr, ValidationErr},
    AccountNumber, TaxId, BRANCH,
};
use rust_decimal::Decimal;

/// Withdrawal restrictions of checking account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckingLimits {
    /// maximum amount of single withdrawal
    pub withdrawal_limit: Decimal,
    /// maximum number of withdrawals recorded in history.
    ///
    /// Counted over the whole account history, it is never reset.
    pub withdrawal_cap: usize,
}

impl Default for CheckingLimits {
    fn default() -> Self {
        Self {
            withdrawal_limit: Decimal::new(500, 0),
            withdrawal_cap: 3,
        }
    }
}

/// Kind of account decides which checks run before the balance is touched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountKind {
    /// only balance rules
    Basic,
    /// balance rules guarded by withdrawal limits
    Checking(CheckingLimits),
}

impl AccountKind {
    fn check_withdrawal(&self, amount: &Decimal, history: &History) -> Result<(), LimitErr> {
        let limits = match self {
            AccountKind::Basic => return Ok(()),
            AccountKind::Checking(limits) => limits,
        };

        if history.count(TransactionKind::Withdrawal) >= limits.withdrawal_cap {
            return Err(LimitErr::WithdrawalCountReached {
                cap: limits.withdrawal_cap,
            });
        }

        if *amount > limits.withdrawal_limit {
            return Err(LimitErr::CeilingExceeded {
                limit: limits.withdrawal_limit,
            });
        }

        Ok(())
    }
}

/// Account balance, identity and transactions history
#[derive(Debug, Clone)]
pub struct BankAccount {
    number: AccountNumber,
    owner: TaxId,
    kind: AccountKind,
    balance: Balance,
    history: History,
}

impl BankAccount {
    /// Create new empty account of `kind` owned by customer with `owner` tax id
    pub fn new(number: AccountNumber, owner: TaxId, kind: AccountKind) -> Self {
        Self {
            number,
            owner,
            kind,
            balance: Default::default(),
            history: Default::default(),
        }
    }

    /// New account without withdrawal limits
    pub fn basic(number: AccountNumber, owner: TaxId) -> Self {
        Self::new(number, owner, AccountKind::Basic)
    }

    /// New checking account with given `limits`
    pub fn checking(number: AccountNumber, owner: TaxId, limits: CheckingLimits) -> Self {
        Self::new(number, owner, AccountKind::Checking(limits))
    }

    #[allow(missing_docs)]
    pub fn kind(&self) -> &AccountKind {
        &self.kind
    }

    /// increase balance. Zero is accepted and changes nothing.
    ///
    /// Does not record anything, see [`super::Transaction::apply`]
    pub(crate) fn deposit(&mut self, amount: Decimal) -> Result<(), ValidationErr> {
        let amount = Amount::try_from(amount)?;
        self.balance.deposit(&amount)?;
        Ok(())
    }

    /// decrease balance if account rules allows it.
    ///
    /// Does not record anything, see [`super::Transaction::apply`]
    pub(crate) fn withdraw(&mut self, amount: Decimal) -> Result<(), ValidationErr> {
        self.kind.check_withdrawal(&amount, &self.history)?;

        if amount <= Decimal::ZERO {
            return Err(ValidationErr::NonPositiveAmount);
        }
        let amount = Amount::try_from(amount)?;
        self.balance.try_withdraw(&amount)?;
        Ok(())
    }

    pub(crate) fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }
}

impl Account for BankAccount {
    fn number(&self) -> AccountNumber {
        self.number
    }

    fn branch(&self) -> &str {
        BRANCH
    }

    fn owner(&self) -> &TaxId {
        &self.owner
    }

    fn balance(&self) -> Decimal {
        self.balance.available()
    }

    fn history(&self) -> &History {
        &self.history
    }
}
