//! Fixtures

use std::{fs, path::PathBuf};

use thiserror::Error;

use crate::menu::{Menu, MenuError};

pub mod menus;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between items
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No priced items in the fixture, so currency is unknown
    #[error("No items in menu fixture; currency unknown")]
    NoCurrency,

    /// Menu construction error
    #[error(transparent)]
    Menu(#[from] MenuError),
}

/// Loads named fixture sets from a base directory.
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,
}

impl Fixture {
    /// Create a fixture loader over the default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a fixture loader over a custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Load a menu from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if there are
    /// currency mismatches.
    pub fn load_menu(&self, name: &str) -> Result<Menu<'static>, FixtureError> {
        let file_path = self.base_path.join("menus").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: menus::MenuFixture = serde_norway::from_str(&contents)?;

        fixture.try_into()
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
