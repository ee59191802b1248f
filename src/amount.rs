//! Protect before using negative amount for deposits and withdraws.

use std::{borrow::Borrow, ops::Deref};

use rust_decimal::Decimal;
use thiserror::Error;

/// Represent non negative financial amount of money
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Amount(Decimal);

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("amount is negative")]
/// represent error when transaction want to operate on negative amount of money
pub struct NegativeAmountErr;

impl TryFrom<Decimal> for Amount {
    type Error = NegativeAmountErr;
    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        // `-0` is still zero
        if value.is_sign_negative() && !value.is_zero() {
            Err(NegativeAmountErr)
        } else {
            Ok(Self(value.abs()))
        }
    }
}

impl Borrow<Decimal> for Amount {
    fn borrow(&self) -> &Decimal {
        &self.0
    }
}

impl Deref for Amount {
    type Target = Decimal;
    fn deref(&self) -> &Self::Target {
        self.borrow()
    }
}
