//! Line items

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};

/// A product and quantity pair held in a cart.
///
/// The name is the uniqueness key within a cart; the quantity is always at
/// least one. A line whose quantity would reach zero is removed from the
/// cart rather than stored.
#[derive(Clone, Debug, PartialEq)]
pub struct LineItem<'a> {
    name: String,
    unit_price: Money<'a, Currency>,
    quantity: u32,
}

impl<'a> LineItem<'a> {
    /// Creates a line for a single unit of the product.
    pub fn new(name: impl Into<String>, unit_price: Money<'a, Currency>) -> Self {
        Self {
            name: name.into(),
            unit_price,
            quantity: 1,
        }
    }

    /// Creates a line with an explicit quantity.
    ///
    /// Returns `None` when `quantity` is zero; stored lines always carry at
    /// least one unit.
    pub fn with_quantity(
        name: impl Into<String>,
        unit_price: Money<'a, Currency>,
        quantity: u32,
    ) -> Option<Self> {
        if quantity == 0 {
            return None;
        }

        Some(Self {
            name: name.into(),
            unit_price,
            quantity,
        })
    }

    /// Returns the product name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Consumes the line, returning its product name.
    pub fn into_name(self) -> String {
        self.name
    }

    /// Returns the price of a single unit.
    pub fn unit_price(&self) -> &Money<'a, Currency> {
        &self.unit_price
    }

    /// Returns the number of units on the line.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Price of the whole line, unit price times quantity.
    ///
    /// Returns `None` when the multiplication cannot be represented.
    pub fn line_total(&self) -> Option<Money<'a, Currency>> {
        let amount = self
            .unit_price
            .amount()
            .checked_mul(Decimal::from(self.quantity))?;

        Some(Money::from_decimal(amount, self.unit_price.currency()))
    }

    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        debug_assert!(quantity > 0, "stored lines always carry at least one unit");

        self.quantity = quantity;
    }
}
