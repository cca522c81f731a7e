//! Cart

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::items::LineItem;

/// Errors related to cart construction or mutation.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// A line's currency differs from the cart currency.
    #[error("Line \"{name}\" has currency {line}, but cart has currency {cart}")]
    CurrencyMismatch {
        /// Product name on the offending line.
        name: String,
        /// Currency code of the offending line.
        line: &'static str,
        /// Currency code of the cart.
        cart: &'static str,
    },

    /// A line carries a negative unit price.
    #[error("Line \"{0}\" has a negative unit price")]
    NegativePrice(String),

    /// Two lines share the same product name.
    #[error("Line \"{0}\" appears more than once")]
    DuplicateName(String),

    /// No line exists at the given index.
    #[error("Line {0} not found")]
    LineNotFound(usize),

    /// A quantity adjustment left the representable range.
    #[error("Quantity for \"{0}\" exceeds the representable range")]
    QuantityOverflow(String),

    /// A total left the representable amount range.
    #[error("Cart total exceeds the representable amount range")]
    AmountOverflow,
}

/// An ordered list of line items, keyed by product name.
///
/// Lines keep their insertion order; adding a product that is already in
/// the cart bumps its quantity instead of appending a duplicate line.
#[derive(Clone, Debug, PartialEq)]
pub struct Cart<'a> {
    items: Vec<LineItem<'a>>,
    currency: &'static Currency,
}

impl<'a> Cart<'a> {
    /// Create a new empty cart in the given currency.
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            items: Vec::new(),
            currency,
        }
    }

    /// Create a new cart with the given lines.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] when a line's currency differs from the cart
    /// currency, a unit price is negative, or two lines share a name.
    pub fn with_items(
        items: impl Into<Vec<LineItem<'a>>>,
        currency: &'static Currency,
    ) -> Result<Self, CartError> {
        let items = items.into();

        for (i, line) in items.iter().enumerate() {
            validate_line(line, currency)?;

            if items
                .iter()
                .take(i)
                .any(|earlier| earlier.name() == line.name())
            {
                return Err(CartError::DuplicateName(line.name().to_string()));
            }
        }

        Ok(Cart { items, currency })
    }

    /// Add one unit of a product.
    ///
    /// A line with the same name absorbs the unit; otherwise a new line is
    /// appended at the end of the cart.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] when the price currency differs from the
    /// cart currency, the price is negative, or the existing quantity
    /// cannot grow any further.
    pub fn add(&mut self, name: &str, unit_price: Money<'a, Currency>) -> Result<(), CartError> {
        let candidate = LineItem::new(name, unit_price);

        validate_line(&candidate, self.currency)?;

        if let Some(line) = self.items.iter_mut().find(|line| line.name() == name) {
            let quantity = line
                .quantity()
                .checked_add(1)
                .ok_or_else(|| CartError::QuantityOverflow(name.to_string()))?;

            line.set_quantity(quantity);
        } else {
            self.items.push(candidate);
        }

        Ok(())
    }

    /// Increase the quantity of the line at `index` by one.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] when no line exists at `index` or the
    /// quantity cannot grow any further.
    pub fn increase(&mut self, index: usize) -> Result<(), CartError> {
        let line = self
            .items
            .get_mut(index)
            .ok_or(CartError::LineNotFound(index))?;

        let quantity = line
            .quantity()
            .checked_add(1)
            .ok_or_else(|| CartError::QuantityOverflow(line.name().to_string()))?;

        line.set_quantity(quantity);

        Ok(())
    }

    /// Decrease the quantity of the line at `index` by one.
    ///
    /// A line whose quantity reaches zero is removed entirely and returned;
    /// carts never hold a zero-quantity line.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError::LineNotFound`] when no line exists at `index`.
    pub fn decrease(&mut self, index: usize) -> Result<Option<LineItem<'a>>, CartError> {
        let line = self
            .items
            .get_mut(index)
            .ok_or(CartError::LineNotFound(index))?;

        let quantity = line.quantity();

        if quantity > 1 {
            line.set_quantity(quantity - 1);

            return Ok(None);
        }

        Ok(Some(self.items.remove(index)))
    }

    /// Remove the line at `index`, returning it.
    ///
    /// The relative order of the remaining lines is preserved.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError::LineNotFound`] when no line exists at `index`.
    pub fn remove(&mut self, index: usize) -> Result<LineItem<'a>, CartError> {
        if index >= self.items.len() {
            return Err(CartError::LineNotFound(index));
        }

        Ok(self.items.remove(index))
    }

    /// Get a line by its index.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError::LineNotFound`] when no line exists at `index`.
    pub fn get(&self, index: usize) -> Result<&LineItem<'a>, CartError> {
        self.items.get(index).ok_or(CartError::LineNotFound(index))
    }

    /// Iterate over the lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem<'a>> {
        self.items.iter()
    }

    /// Calculate the subtotal of the cart.
    ///
    /// An empty cart totals to zero in the cart currency.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError::AmountOverflow`] if the sum cannot be
    /// represented.
    pub fn subtotal(&self) -> Result<Money<'a, Currency>, CartError> {
        let mut total = Decimal::ZERO;

        for line in &self.items {
            let line_total = line.line_total().ok_or(CartError::AmountOverflow)?;

            total = total
                .checked_add(*line_total.amount())
                .ok_or(CartError::AmountOverflow)?;
        }

        Ok(Money::from_decimal(total, self.currency))
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.items
            .iter()
            .map(|line| u64::from(line.quantity()))
            .sum()
    }

    /// Get the number of lines in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the currency of the cart.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

fn validate_line(line: &LineItem<'_>, currency: &'static Currency) -> Result<(), CartError> {
    let line_currency = line.unit_price().currency();

    if line_currency != currency {
        return Err(CartError::CurrencyMismatch {
            name: line.name().to_string(),
            line: line_currency.iso_alpha_code,
            cart: currency.iso_alpha_code,
        });
    }

    if line.unit_price().amount() < &Decimal::ZERO {
        return Err(CartError::NegativePrice(line.name().to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso};
    use testresult::TestResult;

    use super::*;

    fn shekels(minor: i64) -> Money<'static, iso::Currency> {
        Money::from_minor(minor, iso::ILS)
    }

    #[test]
    fn new_cart_is_empty() {
        let cart = Cart::new(iso::ILS);

        assert!(cart.is_empty());
        assert_eq!(cart.currency(), iso::ILS);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn adding_same_name_twice_merges_into_one_line() -> TestResult {
        let mut cart = Cart::new(iso::ILS);

        cart.add("Classic Bagel", shekels(1200))?;
        cart.add("Classic Bagel", shekels(1200))?;

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(0)?.quantity(), 2);
        assert_eq!(cart.item_count(), 2);

        Ok(())
    }

    #[test]
    fn adding_distinct_names_appends_in_order() -> TestResult {
        let mut cart = Cart::new(iso::ILS);

        cart.add("Classic Bagel", shekels(1200))?;
        cart.add("Iced Coffee", shekels(1250))?;

        assert_eq!(cart.get(0)?.name(), "Classic Bagel");
        assert_eq!(cart.get(1)?.name(), "Iced Coffee");

        Ok(())
    }

    #[test]
    fn add_rejects_currency_mismatch() {
        let mut cart = Cart::new(iso::ILS);

        let result = cart.add("Classic Bagel", Money::from_minor(1200, iso::USD));

        assert_eq!(
            result,
            Err(CartError::CurrencyMismatch {
                name: "Classic Bagel".to_string(),
                line: "USD",
                cart: "ILS",
            })
        );
    }

    #[test]
    fn add_rejects_negative_price() {
        let mut cart = Cart::new(iso::ILS);

        let result = cart.add("Classic Bagel", shekels(-1));

        assert_eq!(
            result,
            Err(CartError::NegativePrice("Classic Bagel".to_string()))
        );
    }

    #[test]
    fn with_items_rejects_duplicate_names() {
        let items = [
            LineItem::new("Classic Bagel", shekels(1200)),
            LineItem::new("Classic Bagel", shekels(1300)),
        ];

        let result = Cart::with_items(items, iso::ILS);

        assert_eq!(
            result,
            Err(CartError::DuplicateName("Classic Bagel".to_string()))
        );
    }

    #[test]
    fn increase_bumps_quantity() -> TestResult {
        let mut cart = Cart::new(iso::ILS);

        cart.add("Classic Bagel", shekels(1200))?;
        cart.increase(0)?;

        assert_eq!(cart.get(0)?.quantity(), 2);

        Ok(())
    }

    #[test]
    fn decrease_removes_line_at_quantity_one() -> TestResult {
        let mut cart = Cart::new(iso::ILS);

        cart.add("Classic Bagel", shekels(1200))?;
        cart.add("Iced Coffee", shekels(1250))?;

        let removed = cart.decrease(0)?;

        assert_eq!(
            removed.as_ref().map(LineItem::name),
            Some("Classic Bagel")
        );
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(0)?.name(), "Iced Coffee");

        Ok(())
    }

    #[test]
    fn decrease_above_one_keeps_the_line() -> TestResult {
        let mut cart = Cart::new(iso::ILS);

        cart.add("Classic Bagel", shekels(1200))?;
        cart.increase(0)?;

        let removed = cart.decrease(0)?;

        assert_eq!(removed, None);
        assert_eq!(cart.get(0)?.quantity(), 1);

        Ok(())
    }

    #[test]
    fn remove_preserves_relative_order_of_the_rest() -> TestResult {
        let mut cart = Cart::new(iso::ILS);

        cart.add("Classic Bagel", shekels(1200))?;
        cart.add("Lox Sandwich", shekels(4200))?;
        cart.add("Iced Coffee", shekels(1250))?;

        let removed = cart.remove(1)?;

        assert_eq!(removed.name(), "Lox Sandwich");
        assert_eq!(cart.get(0)?.name(), "Classic Bagel");
        assert_eq!(cart.get(1)?.name(), "Iced Coffee");

        Ok(())
    }

    #[test]
    fn out_of_range_indexes_error_without_corrupting_state() -> TestResult {
        let mut cart = Cart::new(iso::ILS);

        cart.add("Classic Bagel", shekels(1200))?;

        let before = cart.clone();

        assert_eq!(cart.increase(5), Err(CartError::LineNotFound(5)));
        assert_eq!(cart.decrease(5), Err(CartError::LineNotFound(5)));
        assert_eq!(cart.remove(5), Err(CartError::LineNotFound(5)));
        assert_eq!(cart, before);

        Ok(())
    }

    #[test]
    fn subtotal_sums_line_totals() -> TestResult {
        let mut cart = Cart::new(iso::ILS);

        cart.add("Dish A", shekels(1000))?;
        cart.increase(0)?;
        cart.add("Dish B", shekels(550))?;

        assert_eq!(cart.subtotal()?, shekels(2550));

        Ok(())
    }

    #[test]
    fn subtotal_of_empty_cart_is_zero() -> TestResult {
        let cart = Cart::new(iso::ILS);

        assert_eq!(cart.subtotal()?, shekels(0));

        Ok(())
    }
}
