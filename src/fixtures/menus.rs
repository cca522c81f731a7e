//! Menu fixtures

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, ILS, USD},
};
use serde::Deserialize;

use crate::{
    fixtures::FixtureError,
    menu::{Menu, MenuItem, MenuSection},
};

/// Wrapper for a menu in YAML
#[derive(Debug, Deserialize)]
pub struct MenuFixture {
    /// Menu sections in display order
    pub sections: Vec<SectionFixture>,
}

/// Menu Section Fixture
#[derive(Debug, Deserialize)]
pub struct SectionFixture {
    /// Section id used by category filters
    pub id: String,

    /// Section display title
    pub title: String,

    /// Dishes in the section
    pub items: Vec<ItemFixture>,
}

/// Menu Item Fixture
#[derive(Debug, Deserialize)]
pub struct ItemFixture {
    /// Dish name
    pub name: String,

    /// Dish description
    pub description: String,

    /// Dish price (e.g., "12.00 ILS")
    pub price: String,
}

impl TryFrom<MenuFixture> for Menu<'static> {
    type Error = FixtureError;

    fn try_from(fixture: MenuFixture) -> Result<Self, Self::Error> {
        let mut currency: Option<&'static Currency> = None;
        let mut sections = Vec::with_capacity(fixture.sections.len());

        for section_fixture in fixture.sections {
            let mut items = Vec::with_capacity(section_fixture.items.len());

            for item_fixture in section_fixture.items {
                let (minor_units, item_currency) = parse_price(&item_fixture.price)?;

                if let Some(existing) = currency {
                    if existing != item_currency {
                        return Err(FixtureError::CurrencyMismatch(
                            existing.iso_alpha_code.to_string(),
                            item_currency.iso_alpha_code.to_string(),
                        ));
                    }
                } else {
                    currency = Some(item_currency);
                }

                items.push(MenuItem::new(
                    item_fixture.name,
                    item_fixture.description,
                    Money::from_minor(minor_units, item_currency),
                ));
            }

            sections.push(MenuSection::new(
                section_fixture.id,
                section_fixture.title,
                items,
            ));
        }

        let currency = currency.ok_or(FixtureError::NoCurrency)?;

        Ok(Menu::with_sections(sections, currency)?)
    }
}

/// Parse price string (e.g., "12.00 ILS") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    if parts.len() != 2 {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    }

    let amount = parts
        .first()
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency_code = parts
        .get(1)
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = match *currency_code {
        "ILS" => ILS,
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    Ok((minor_units, currency))
}
