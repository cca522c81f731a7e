//! Menu

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Errors related to menu construction.
#[derive(Debug, Error, PartialEq)]
pub enum MenuError {
    /// An item's currency differs from the menu currency.
    #[error("Item \"{0}\" has currency {1}, but menu has currency {2}")]
    CurrencyMismatch(String, &'static str, &'static str),
}

/// A dish on the menu.
#[derive(Clone, Debug, PartialEq)]
pub struct MenuItem<'a> {
    name: String,
    description: String,
    price: Money<'a, Currency>,
}

impl<'a> MenuItem<'a> {
    /// Creates a new menu item.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: Money<'a, Currency>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price,
        }
    }

    /// Returns the dish name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the dish description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the dish price.
    pub fn price(&self) -> &Money<'a, Currency> {
        &self.price
    }

    fn matches(&self, lowercase_term: &str) -> bool {
        self.name.to_lowercase().contains(lowercase_term)
            || self.description.to_lowercase().contains(lowercase_term)
    }
}

/// A titled group of dishes, addressable by id from category filters.
#[derive(Clone, Debug, PartialEq)]
pub struct MenuSection<'a> {
    id: String,
    title: String,
    items: Vec<MenuItem<'a>>,
}

impl<'a> MenuSection<'a> {
    /// Creates a new menu section.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        items: impl Into<Vec<MenuItem<'a>>>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            items: items.into(),
        }
    }

    /// Returns the section id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the section display title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the dishes in the section, in display order.
    pub fn items(&self) -> &[MenuItem<'a>] {
        &self.items
    }
}

/// Which sections a browsing view should show.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SectionFilter {
    /// Every section is visible.
    All,

    /// Only the section with this id is visible.
    Section(String),
}

impl SectionFilter {
    /// Whether a section with the given id is visible under this filter.
    pub fn shows(&self, section_id: &str) -> bool {
        match self {
            SectionFilter::All => true,
            SectionFilter::Section(id) => id == section_id,
        }
    }
}

impl From<&str> for SectionFilter {
    fn from(action: &str) -> Self {
        if action == "all" {
            SectionFilter::All
        } else {
            SectionFilter::Section(action.to_string())
        }
    }
}

/// A section together with the items visible under a filter or search.
#[derive(Clone, Debug)]
pub struct SectionView<'m, 'a> {
    section: &'m MenuSection<'a>,
    items: Vec<&'m MenuItem<'a>>,
}

impl<'m, 'a> SectionView<'m, 'a> {
    /// Returns the underlying section.
    pub fn section(&self) -> &'m MenuSection<'a> {
        self.section
    }

    /// Returns the visible items, in display order.
    pub fn items(&self) -> &[&'m MenuItem<'a>] {
        &self.items
    }
}

/// An ordered menu of sections, all priced in one currency.
#[derive(Clone, Debug, PartialEq)]
pub struct Menu<'a> {
    sections: Vec<MenuSection<'a>>,
    currency: &'static Currency,
}

impl<'a> Menu<'a> {
    /// Create a new empty menu in the given currency.
    pub fn new(currency: &'static Currency) -> Self {
        Menu {
            sections: Vec::new(),
            currency,
        }
    }

    /// Create a menu with the given sections.
    ///
    /// # Errors
    ///
    /// Returns a [`MenuError::CurrencyMismatch`] when any item's currency
    /// differs from the menu currency.
    pub fn with_sections(
        sections: impl Into<Vec<MenuSection<'a>>>,
        currency: &'static Currency,
    ) -> Result<Self, MenuError> {
        let sections = sections.into();

        for section in &sections {
            for item in section.items() {
                let item_currency = item.price().currency();

                if item_currency != currency {
                    return Err(MenuError::CurrencyMismatch(
                        item.name().to_string(),
                        item_currency.iso_alpha_code,
                        currency.iso_alpha_code,
                    ));
                }
            }
        }

        Ok(Menu { sections, currency })
    }

    /// Returns the sections, in display order.
    pub fn sections(&self) -> &[MenuSection<'a>] {
        &self.sections
    }

    /// Look up a section by id.
    pub fn section(&self, id: &str) -> Option<&MenuSection<'a>> {
        self.sections.iter().find(|section| section.id() == id)
    }

    /// Sections and items visible under a category filter.
    ///
    /// [`SectionFilter::All`] shows every section; a section filter shows
    /// only that section, with all of its items.
    pub fn filter(&self, filter: &SectionFilter) -> Vec<SectionView<'_, 'a>> {
        self.sections
            .iter()
            .filter(|section| filter.shows(section.id()))
            .map(|section| SectionView {
                section,
                items: section.items().iter().collect(),
            })
            .collect()
    }

    /// Sections and items matching a search term.
    ///
    /// Matching is a case-insensitive substring test over item names and
    /// descriptions; sections with no matching items are hidden entirely.
    /// A blank term shows the whole menu.
    pub fn search(&self, term: &str) -> Vec<SectionView<'_, 'a>> {
        let term = term.trim().to_lowercase();

        if term.is_empty() {
            return self.filter(&SectionFilter::All);
        }

        self.sections
            .iter()
            .filter_map(|section| {
                let items: Vec<&MenuItem<'a>> = section
                    .items()
                    .iter()
                    .filter(|item| item.matches(&term))
                    .collect();

                if items.is_empty() {
                    None
                } else {
                    Some(SectionView { section, items })
                }
            })
            .collect()
    }

    /// Check if the menu has no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Get the currency of the menu.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
