//! Ledger settings

use crate::account::CheckingLimits;
use anyhow::Context;
use rust_decimal::Decimal;
use std::{env, str::FromStr};

/// Environment variable with maximum amount of a single withdrawal
pub const WITHDRAWAL_LIMIT_VAR: &str = "LEDGER_WITHDRAWAL_LIMIT";
/// Environment variable with maximum number of withdrawals per account
pub const WITHDRAWAL_CAP_VAR: &str = "LEDGER_WITHDRAWAL_CAP";

/// Limits applied to every account opened by the ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    /// maximum amount of a single withdrawal
    pub withdrawal_limit: Decimal,
    /// maximum number of withdrawals recorded for one account
    pub withdrawal_cap: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        let limits = CheckingLimits::default();
        Self {
            withdrawal_limit: limits.withdrawal_limit,
            withdrawal_cap: limits.withdrawal_cap,
        }
    }
}

impl LedgerConfig {
    /// read config from environment, unset variables keep default values
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Some(raw) = lookup(WITHDRAWAL_LIMIT_VAR) {
            let limit = Decimal::from_str(raw.trim())
                .with_context(|| format!("{WITHDRAWAL_LIMIT_VAR} is not a decimal: {raw}"))?;
            anyhow::ensure!(
                !limit.is_sign_negative(),
                "{WITHDRAWAL_LIMIT_VAR} can not be negative"
            );
            config.withdrawal_limit = limit;
        }

        if let Some(raw) = lookup(WITHDRAWAL_CAP_VAR) {
            config.withdrawal_cap = raw
                .trim()
                .parse()
                .with_context(|| format!("{WITHDRAWAL_CAP_VAR} is not a count: {raw}"))?;
        }

        Ok(config)
    }

    /// limits for newly opened checking account
    pub fn checking_limits(&self) -> CheckingLimits {
        CheckingLimits {
            withdrawal_limit: self.withdrawal_limit,
            withdrawal_cap: self.withdrawal_cap,
        }
    }
}
