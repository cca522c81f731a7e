//! Sesame
//!
//! Sesame is a cart and menu engine for a small food-delivery storefront: an
//! ordered cart with a free-delivery threshold, durable session storage, typed
//! command dispatch for the presentation layer, and menu browsing with
//! category filters and text search.

pub mod cart;
pub mod commands;
pub mod delivery;
pub mod fixtures;
pub mod items;
pub mod menu;
pub mod prelude;
pub mod receipt;
pub mod store;
pub mod utils;
