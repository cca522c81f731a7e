//! Cart storage

use std::{cell::RefCell, fs, io, path::PathBuf, rc::Rc};

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    cart::{Cart, CartError},
    delivery::{DeliveryError, DeliveryPolicy},
    items::LineItem,
    receipt::{Receipt, ReceiptError},
};

/// Errors from a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying filesystem failure.
    #[error("Failed to access cart storage: {0}")]
    Io(#[from] io::Error),
}

/// Errors from cart store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage backend failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The cart rejected the operation.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// The delivery policy rejected the totals.
    #[error(transparent)]
    Delivery(#[from] DeliveryError),

    /// The receipt could not be built.
    #[error(transparent)]
    Receipt(#[from] ReceiptError),

    /// The cart could not be encoded for storage.
    #[error("Failed to encode cart for storage: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A session-local key-value slot holding the serialized cart.
///
/// Backends only move opaque payloads; the store owns the encoding. The
/// execution model is single-threaded and event-driven, so a backend never
/// sees overlapping operations.
pub trait Storage {
    /// Read the persisted payload, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the backend cannot be read.
    fn load(&self) -> Result<Option<String>, StorageError>;

    /// Replace the persisted payload.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the backend cannot be written.
    fn store(&self, payload: &str) -> Result<(), StorageError>;
}

/// File-backed storage: one file per cart.
#[derive(Clone, Debug)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Creates storage over the given file path.
    ///
    /// The file and its parent directories are created on first write; a
    /// missing file reads as no payload.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Storage for FileStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(payload) => Ok(Some(payload)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::Io(err)),
        }
    }

    fn store(&self, payload: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        Ok(fs::write(&self.path, payload)?)
    }
}

/// In-memory storage for tests and ephemeral sessions.
///
/// Clones share one backing buffer, the way every script on a page sees
/// the same local storage area.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    payload: Rc<RefCell<Option<String>>>,
}

impl MemoryStorage {
    /// Creates an empty in-memory storage slot.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self.payload.borrow().clone())
    }

    fn store(&self, payload: &str) -> Result<(), StorageError> {
        *self.payload.borrow_mut() = Some(payload.to_string());

        Ok(())
    }
}

/// One line of the persisted cart payload.
#[derive(Debug, Deserialize, Serialize)]
struct StoredLine {
    name: String,
    price: Decimal,
    quantity: u32,
}

impl StoredLine {
    fn from_line(line: &LineItem<'_>) -> Self {
        StoredLine {
            name: line.name().to_string(),
            price: *line.unit_price().amount(),
            quantity: line.quantity(),
        }
    }
}

/// The session cart store.
///
/// Constructed once per session and handed to consumers; every operation
/// reads the cart fresh from storage, applies its change, and writes the
/// whole cart back, so no in-memory copy has to survive a reload. A failed
/// operation leaves the persisted payload untouched.
#[derive(Debug)]
pub struct CartStore<S> {
    storage: S,
    currency: &'static Currency,
    policy: DeliveryPolicy,
}

impl<S: Storage> CartStore<S> {
    /// Creates a store over a storage backend.
    pub fn new(storage: S, currency: &'static Currency, policy: DeliveryPolicy) -> Self {
        Self {
            storage,
            currency,
            policy,
        }
    }

    /// Get the currency of the store.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Get the delivery policy of the store.
    pub fn policy(&self) -> &DeliveryPolicy {
        &self.policy
    }

    /// Read the current cart from storage.
    ///
    /// A missing or malformed payload reads as an empty cart; malformed
    /// payloads are logged and discarded on the next mutation.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the storage backend cannot be read.
    pub fn cart(&self) -> Result<Cart<'static>, StoreError> {
        let Some(payload) = self.storage.load()? else {
            return Ok(Cart::new(self.currency));
        };

        Ok(self
            .decode(&payload)
            .unwrap_or_else(|| Cart::new(self.currency)))
    }

    /// Add one unit of a product to the cart and persist it.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the cart rejects the line or storage
    /// fails.
    pub fn add(
        &self,
        name: &str,
        unit_price: Money<'static, Currency>,
    ) -> Result<(), StoreError> {
        let mut cart = self.cart()?;

        cart.add(name, unit_price)?;

        self.persist(&cart)
    }

    /// Increase the quantity of the line at `index` by one and persist.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when no line exists at `index` or storage
    /// fails.
    pub fn increase(&self, index: usize) -> Result<(), StoreError> {
        let mut cart = self.cart()?;

        cart.increase(index)?;

        self.persist(&cart)
    }

    /// Decrease the quantity of the line at `index` by one and persist.
    ///
    /// Returns the removed line when the decrease emptied it.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when no line exists at `index` or storage
    /// fails.
    pub fn decrease(&self, index: usize) -> Result<Option<LineItem<'static>>, StoreError> {
        let mut cart = self.cart()?;

        let removed = cart.decrease(index)?;

        self.persist(&cart)?;

        Ok(removed)
    }

    /// Remove the line at `index` and persist, returning the removed line.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when no line exists at `index` or storage
    /// fails.
    pub fn remove(&self, index: usize) -> Result<LineItem<'static>, StoreError> {
        let mut cart = self.cart()?;

        let removed = cart.remove(index)?;

        self.persist(&cart)?;

        Ok(removed)
    }

    /// Subtotal of the current cart.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when storage cannot be read or the sum
    /// cannot be represented.
    pub fn subtotal(&self) -> Result<Money<'static, Currency>, StoreError> {
        Ok(self.cart()?.subtotal()?)
    }

    /// Delivery fee for the current cart under the store's policy.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when storage cannot be read or the totals
    /// cannot be represented.
    pub fn delivery_fee(&self) -> Result<Money<'static, Currency>, StoreError> {
        let subtotal = self.subtotal()?;

        Ok(self.policy.fee(&subtotal)?)
    }

    /// Subtotal plus delivery fee for the current cart.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when storage cannot be read or the totals
    /// cannot be represented.
    pub fn grand_total(&self) -> Result<Money<'static, Currency>, StoreError> {
        let subtotal = self.subtotal()?;

        Ok(self.policy.grand_total(&subtotal)?)
    }

    /// Total number of units in the current cart.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when storage cannot be read.
    pub fn item_count(&self) -> Result<u64, StoreError> {
        Ok(self.cart()?.item_count())
    }

    /// Build a receipt for the current cart under the store's delivery
    /// policy.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when storage cannot be read or the totals
    /// cannot be represented.
    pub fn receipt(&self) -> Result<Receipt<'static>, StoreError> {
        Ok(Receipt::for_cart(&self.cart()?, &self.policy)?)
    }

    fn decode(&self, payload: &str) -> Option<Cart<'static>> {
        let records: Vec<StoredLine> = match serde_json::from_str(payload) {
            Ok(records) => records,
            Err(err) => {
                warn!(%err, "cart payload is not valid JSON; reading it as empty");

                return None;
            }
        };

        let mut lines = Vec::with_capacity(records.len());

        for record in records {
            let price = Money::from_decimal(record.price, self.currency);

            match LineItem::with_quantity(record.name, price, record.quantity) {
                Some(line) => lines.push(line),
                None => {
                    warn!("cart payload holds a zero-quantity line; reading it as empty");

                    return None;
                }
            }
        }

        match Cart::with_items(lines, self.currency) {
            Ok(cart) => Some(cart),
            Err(err) => {
                warn!(%err, "cart payload violates cart invariants; reading it as empty");

                None
            }
        }
    }

    fn persist(&self, cart: &Cart<'static>) -> Result<(), StoreError> {
        let records: Vec<StoredLine> = cart.iter().map(StoredLine::from_line).collect();
        let payload = serde_json::to_string(&records)?;

        self.storage.store(&payload)?;

        debug!(lines = records.len(), "persisted cart");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;
    use testresult::TestResult;

    use super::*;

    fn store_over(storage: MemoryStorage) -> CartStore<MemoryStorage> {
        CartStore::new(storage, iso::ILS, DeliveryPolicy::standard(iso::ILS))
    }

    fn shekels(minor: i64) -> Money<'static, Currency> {
        Money::from_minor(minor, iso::ILS)
    }

    #[test]
    fn empty_storage_reads_as_an_empty_cart() -> TestResult {
        let store = store_over(MemoryStorage::new());

        assert!(store.cart()?.is_empty());
        assert_eq!(store.item_count()?, 0);

        Ok(())
    }

    #[test]
    fn every_mutation_is_visible_to_a_second_store() -> TestResult {
        let storage = MemoryStorage::new();
        let store = store_over(storage.clone());
        let other = store_over(storage);

        store.add("Classic Bagel", shekels(1200))?;
        store.add("Classic Bagel", shekels(1200))?;

        let cart = other.cart()?;

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(0)?.quantity(), 2);

        Ok(())
    }

    #[test]
    fn garbage_payload_reads_as_an_empty_cart() -> TestResult {
        let storage = MemoryStorage::new();

        storage.store("not json at all")?;

        let store = store_over(storage);

        assert!(store.cart()?.is_empty());

        Ok(())
    }

    #[test]
    fn zero_quantity_line_marks_the_payload_malformed() -> TestResult {
        let storage = MemoryStorage::new();

        storage.store(r#"[{"name":"Classic Bagel","price":12.0,"quantity":0}]"#)?;

        let store = store_over(storage);

        assert!(store.cart()?.is_empty());

        Ok(())
    }

    #[test]
    fn duplicate_names_mark_the_payload_malformed() -> TestResult {
        let storage = MemoryStorage::new();

        storage.store(
            r#"[{"name":"Classic Bagel","price":12.0,"quantity":1},
                {"name":"Classic Bagel","price":12.0,"quantity":2}]"#,
        )?;

        let store = store_over(storage);

        assert!(store.cart()?.is_empty());

        Ok(())
    }

    #[test]
    fn mutations_after_a_malformed_payload_rebuild_it() -> TestResult {
        let storage = MemoryStorage::new();

        storage.store("{broken")?;

        let store = store_over(storage.clone());

        store.add("Iced Coffee", shekels(1250))?;

        let reloaded = store_over(storage).cart()?;

        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.get(0)?.name(), "Iced Coffee");

        Ok(())
    }

    #[test]
    fn failed_operations_do_not_touch_the_payload() -> TestResult {
        let storage = MemoryStorage::new();
        let store = store_over(storage.clone());

        store.add("Classic Bagel", shekels(1200))?;

        let before = storage.load()?;

        assert!(matches!(
            store.increase(5),
            Err(StoreError::Cart(CartError::LineNotFound(5)))
        ));
        assert_eq!(storage.load()?, before);

        Ok(())
    }

    #[test]
    fn decrease_to_zero_reports_the_removed_line() -> TestResult {
        let store = store_over(MemoryStorage::new());

        store.add("Classic Bagel", shekels(1200))?;

        let removed = store.decrease(0)?;

        assert_eq!(
            removed.map(LineItem::into_name),
            Some("Classic Bagel".to_string())
        );
        assert!(store.cart()?.is_empty());

        Ok(())
    }

    #[test]
    fn totals_follow_the_delivery_policy() -> TestResult {
        let store = store_over(MemoryStorage::new());

        store.add("Dish A", shekels(1000))?;
        store.increase(0)?;
        store.add("Dish B", shekels(550))?;

        assert_eq!(store.subtotal()?, shekels(2550));
        assert_eq!(store.delivery_fee()?, shekels(1500));
        assert_eq!(store.grand_total()?, shekels(4050));

        Ok(())
    }

    #[test]
    fn missing_file_reads_as_an_empty_cart() -> TestResult {
        let dir = tempfile::tempdir()?;
        let storage = FileStorage::new(dir.path().join("cart.json"));
        let store = CartStore::new(storage, iso::ILS, DeliveryPolicy::standard(iso::ILS));

        assert!(store.cart()?.is_empty());

        Ok(())
    }
}
