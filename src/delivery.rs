//! Delivery fees

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Order value at which delivery becomes free, in major currency units.
pub const FREE_DELIVERY_THRESHOLD: i64 = 80;

/// Flat delivery fee charged below the threshold, in major currency units.
pub const STANDARD_DELIVERY_FEE: i64 = 15;

/// Errors from applying a delivery policy.
#[derive(Debug, Error, PartialEq)]
pub enum DeliveryError {
    /// A currency differs from the policy currency.
    #[error("Amount has currency {0}, but delivery policy has currency {1}")]
    CurrencyMismatch(&'static str, &'static str),

    /// A total left the representable amount range.
    #[error("Delivery total exceeds the representable amount range")]
    AmountOverflow,
}

/// Delivery pricing for a storefront: a flat fee, waived at or above a
/// free-delivery threshold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeliveryPolicy {
    free_over: Money<'static, Currency>,
    fee: Money<'static, Currency>,
}

impl DeliveryPolicy {
    /// The standard storefront policy: a 15-unit fee, free at or above 80.
    pub fn standard(currency: &'static Currency) -> Self {
        DeliveryPolicy {
            free_over: Money::from_major(FREE_DELIVERY_THRESHOLD, currency),
            fee: Money::from_major(STANDARD_DELIVERY_FEE, currency),
        }
    }

    /// Create a policy with a custom threshold and fee.
    ///
    /// # Errors
    ///
    /// Returns a [`DeliveryError::CurrencyMismatch`] when the threshold and
    /// fee currencies differ.
    pub fn new(
        free_over: Money<'static, Currency>,
        fee: Money<'static, Currency>,
    ) -> Result<Self, DeliveryError> {
        if free_over.currency() != fee.currency() {
            return Err(DeliveryError::CurrencyMismatch(
                fee.currency().iso_alpha_code,
                free_over.currency().iso_alpha_code,
            ));
        }

        Ok(DeliveryPolicy { free_over, fee })
    }

    /// Order value at which the fee is waived.
    pub fn free_over(&self) -> &Money<'static, Currency> {
        &self.free_over
    }

    /// The flat fee charged below the threshold.
    pub fn flat_fee(&self) -> &Money<'static, Currency> {
        &self.fee
    }

    /// Get the currency of the policy.
    pub fn currency(&self) -> &'static Currency {
        self.free_over.currency()
    }

    /// Delivery fee for a subtotal: zero at or above the threshold, the
    /// flat fee below it.
    ///
    /// # Errors
    ///
    /// Returns a [`DeliveryError::CurrencyMismatch`] when the subtotal
    /// currency differs from the policy currency.
    pub fn fee(
        &self,
        subtotal: &Money<'_, Currency>,
    ) -> Result<Money<'static, Currency>, DeliveryError> {
        self.check_currency(subtotal)?;

        if subtotal.amount() >= self.free_over.amount() {
            Ok(Money::from_minor(0, self.currency()))
        } else {
            Ok(self.fee)
        }
    }

    /// Subtotal plus delivery fee.
    ///
    /// # Errors
    ///
    /// Returns a [`DeliveryError`] on currency mismatch or when the total
    /// cannot be represented.
    pub fn grand_total(
        &self,
        subtotal: &Money<'_, Currency>,
    ) -> Result<Money<'static, Currency>, DeliveryError> {
        let fee = self.fee(subtotal)?;

        let total = subtotal
            .amount()
            .checked_add(*fee.amount())
            .ok_or(DeliveryError::AmountOverflow)?;

        Ok(Money::from_decimal(total, self.currency()))
    }

    /// Amount still needed before delivery becomes free.
    ///
    /// Returns `None` once the fee is already waived.
    ///
    /// # Errors
    ///
    /// Returns a [`DeliveryError::CurrencyMismatch`] when the subtotal
    /// currency differs from the policy currency.
    pub fn remaining_for_free_delivery(
        &self,
        subtotal: &Money<'_, Currency>,
    ) -> Result<Option<Money<'static, Currency>>, DeliveryError> {
        self.check_currency(subtotal)?;

        if subtotal.amount() >= self.free_over.amount() {
            return Ok(None);
        }

        let gap = self
            .free_over
            .amount()
            .checked_sub(*subtotal.amount())
            .ok_or(DeliveryError::AmountOverflow)?;

        Ok(Some(Money::from_decimal(gap, self.currency())))
    }

    fn check_currency(&self, amount: &Money<'_, Currency>) -> Result<(), DeliveryError> {
        if amount.currency() == self.free_over.currency() {
            Ok(())
        } else {
            Err(DeliveryError::CurrencyMismatch(
                amount.currency().iso_alpha_code,
                self.free_over.currency().iso_alpha_code,
            ))
        }
    }
}
