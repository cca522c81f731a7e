//! Receipt

use std::io;

use rust_decimal::RoundingStrategy;
use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::{Cart, CartError},
    delivery::{DeliveryError, DeliveryPolicy},
};

/// Errors that can occur when building or printing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Error calculating the cart totals.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Error applying the delivery policy.
    #[error(transparent)]
    Delivery(#[from] DeliveryError),

    /// IO error
    #[error("IO error")]
    IO,
}

/// One rendered line of the receipt.
#[derive(Clone, Debug)]
pub struct ReceiptLine<'a> {
    name: String,
    unit_price: Money<'a, Currency>,
    quantity: u32,
    line_total: Money<'a, Currency>,
}

impl<'a> ReceiptLine<'a> {
    /// Product name on the line.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Price of a single unit.
    #[must_use]
    pub fn unit_price(&self) -> &Money<'a, Currency> {
        &self.unit_price
    }

    /// Number of units on the line.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price times quantity, rounded for display.
    #[must_use]
    pub fn line_total(&self) -> &Money<'a, Currency> {
        &self.line_total
    }
}

/// Final receipt for a cart: lines, subtotal, delivery fee and grand
/// total, plus the gap still to cover before delivery becomes free.
///
/// Amounts are rounded to two decimal places for display; the underlying
/// cart arithmetic stays unrounded.
#[derive(Clone, Debug)]
pub struct Receipt<'a> {
    lines: SmallVec<[ReceiptLine<'a>; 10]>,
    subtotal: Money<'a, Currency>,
    delivery_fee: Money<'a, Currency>,
    grand_total: Money<'a, Currency>,
    free_delivery_gap: Option<Money<'a, Currency>>,
    currency: &'static Currency,
}

impl<'a> Receipt<'a> {
    /// Build a receipt from a cart and a delivery policy.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if a total cannot be represented or the
    /// cart and policy currencies disagree.
    pub fn for_cart(cart: &Cart<'a>, policy: &DeliveryPolicy) -> Result<Self, ReceiptError> {
        let mut lines = SmallVec::new();

        for line in cart.iter() {
            let line_total = line
                .line_total()
                .ok_or(ReceiptError::Cart(CartError::AmountOverflow))?;

            lines.push(ReceiptLine {
                name: line.name().to_string(),
                unit_price: *line.unit_price(),
                quantity: line.quantity(),
                line_total: display_rounded(&line_total),
            });
        }

        let subtotal = display_rounded(&cart.subtotal()?);
        let delivery_fee = policy.fee(&subtotal)?;
        let grand_total = policy.grand_total(&subtotal)?;
        let free_delivery_gap = policy.remaining_for_free_delivery(&subtotal)?;

        Ok(Receipt {
            lines,
            subtotal,
            delivery_fee,
            grand_total,
            free_delivery_gap,
            currency: cart.currency(),
        })
    }

    /// Rendered lines, in cart order.
    #[must_use]
    pub fn lines(&self) -> &[ReceiptLine<'a>] {
        &self.lines
    }

    /// Total cost of the lines before the delivery fee.
    #[must_use]
    pub fn subtotal(&self) -> &Money<'a, Currency> {
        &self.subtotal
    }

    /// Delivery fee applied to this order.
    #[must_use]
    pub fn delivery_fee(&self) -> &Money<'a, Currency> {
        &self.delivery_fee
    }

    /// Subtotal plus delivery fee.
    #[must_use]
    pub fn grand_total(&self) -> &Money<'a, Currency> {
        &self.grand_total
    }

    /// Amount still to order before delivery becomes free, if any.
    #[must_use]
    pub fn free_delivery_gap(&self) -> Option<&Money<'a, Currency>> {
        self.free_delivery_gap.as_ref()
    }

    /// Currency used for all monetary values.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Prints the receipt.
    ///
    /// # Errors
    ///
    /// Returns an error if the receipt cannot be printed.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        if self.lines.is_empty() {
            writeln!(out, "\nYour cart is empty. Add dishes from the menu to get started.")
                .map_err(|_err| ReceiptError::IO)?;

            return Ok(());
        }

        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Unit Price", "Qty", "Line Total"]);

        for (idx, line) in self.lines.iter().enumerate() {
            builder.push_record([
                format!("#{:<3}", idx + 1),
                line.name.clone(),
                format!("{}", line.unit_price),
                line.quantity.to_string(),
                format!("{}", line.line_total),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(2..5), Alignment::right());

        writeln!(out, "\n{table}").map_err(|_err| ReceiptError::IO)?;

        self.write_summary(&mut out)
    }

    fn write_summary(&self, out: &mut impl io::Write) -> Result<(), ReceiptError> {
        writeln!(out, " Subtotal: {}", self.subtotal).map_err(|_err| ReceiptError::IO)?;
        writeln!(out, " Delivery: {}", self.delivery_fee).map_err(|_err| ReceiptError::IO)?;

        match &self.free_delivery_gap {
            Some(gap) => {
                writeln!(out, " Add {gap} more for free delivery").map_err(|_err| ReceiptError::IO)?;
            }
            None => {
                writeln!(out, " Free delivery unlocked").map_err(|_err| ReceiptError::IO)?;
            }
        }

        writeln!(out, " \x1b[1mTotal:\x1b[0m {}", self.grand_total)
            .map_err(|_err| ReceiptError::IO)
    }
}

fn display_rounded<'a>(money: &Money<'a, Currency>) -> Money<'a, Currency> {
    let rounded = money
        .amount()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    Money::from_decimal(rounded, money.currency())
}
