//! Sesame prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError},
    commands::{Command, Effect, Notice},
    delivery::{DeliveryError, DeliveryPolicy},
    fixtures::{Fixture, FixtureError},
    items::LineItem,
    menu::{Menu, MenuError, MenuItem, MenuSection, SectionFilter, SectionView},
    receipt::{Receipt, ReceiptError, ReceiptLine},
    store::{CartStore, FileStorage, MemoryStorage, Storage, StorageError, StoreError},
};
