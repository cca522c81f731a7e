//! Commands

use std::fmt;

use rusty_money::{Money, iso::Currency};

use crate::{
    cart::Cart,
    store::{CartStore, Storage, StoreError},
};

/// A cart action dispatched from the presentation layer.
///
/// Add actions carry the product attributes from the menu; the quantity
/// and removal actions address a line by its position in the rendered
/// cart.
#[derive(Clone, Debug, PartialEq)]
pub enum Command<'a> {
    /// Add one unit of a product, merging with an existing line.
    Add {
        /// Product name.
        name: String,

        /// Price of a single unit.
        unit_price: Money<'a, Currency>,
    },

    /// Increase the quantity of the line at `index` by one.
    Increase {
        /// Position of the line in the rendered cart.
        index: usize,
    },

    /// Decrease the quantity of the line at `index` by one, removing the
    /// line when it reaches zero.
    Decrease {
        /// Position of the line in the rendered cart.
        index: usize,
    },

    /// Remove the line at `index` entirely.
    Remove {
        /// Position of the line in the rendered cart.
        index: usize,
    },
}

/// A user-facing notice produced by a successful command.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Notice {
    /// A product was added to the cart.
    Added {
        /// Product name.
        name: String,
    },

    /// A line left the cart.
    Removed {
        /// Product name.
        name: String,
    },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Added { name } => write!(f, "{name} added to the cart"),
            Notice::Removed { name } => write!(f, "{name} removed from the cart"),
        }
    }
}

/// The state handed back to the view after a command runs: the fresh cart
/// to re-render, plus an optional notice for the notification layer.
#[derive(Debug)]
pub struct Effect<'a> {
    /// Cart state read back from storage after the command.
    pub cart: Cart<'a>,

    /// Notice to surface to the user, if the command produced one.
    pub notice: Option<Notice>,
}

impl<S: Storage> CartStore<S> {
    /// Run a single command against the store and report its effect.
    ///
    /// Quantity increases produce no notice; additions and removals carry
    /// the product name for the notification layer.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the underlying operation fails; the
    /// persisted cart is left untouched in that case.
    pub fn dispatch(&self, command: Command<'static>) -> Result<Effect<'static>, StoreError> {
        let notice = match command {
            Command::Add { name, unit_price } => {
                self.add(&name, unit_price)?;

                Some(Notice::Added { name })
            }
            Command::Increase { index } => {
                self.increase(index)?;

                None
            }
            Command::Decrease { index } => self
                .decrease(index)?
                .map(|line| Notice::Removed {
                    name: line.into_name(),
                }),
            Command::Remove { index } => {
                let line = self.remove(index)?;

                Some(Notice::Removed {
                    name: line.into_name(),
                })
            }
        };

        Ok(Effect {
            cart: self.cart()?,
            notice,
        })
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;
    use testresult::TestResult;

    use super::*;
    use crate::{delivery::DeliveryPolicy, store::MemoryStorage};

    fn store() -> CartStore<MemoryStorage> {
        CartStore::new(
            MemoryStorage::new(),
            iso::ILS,
            DeliveryPolicy::standard(iso::ILS),
        )
    }

    fn add_bagel() -> Command<'static> {
        Command::Add {
            name: "Classic Bagel".to_string(),
            unit_price: Money::from_minor(1200, iso::ILS),
        }
    }

    #[test]
    fn add_reports_an_added_notice_and_the_fresh_cart() -> TestResult {
        let store = store();

        let effect = store.dispatch(add_bagel())?;

        assert_eq!(
            effect.notice,
            Some(Notice::Added {
                name: "Classic Bagel".to_string()
            })
        );
        assert_eq!(effect.cart.len(), 1);

        Ok(())
    }

    #[test]
    fn increase_produces_no_notice() -> TestResult {
        let store = store();

        store.dispatch(add_bagel())?;

        let effect = store.dispatch(Command::Increase { index: 0 })?;

        assert_eq!(effect.notice, None);
        assert_eq!(effect.cart.get(0)?.quantity(), 2);

        Ok(())
    }

    #[test]
    fn decrease_to_zero_reports_a_removed_notice() -> TestResult {
        let store = store();

        store.dispatch(add_bagel())?;

        let effect = store.dispatch(Command::Decrease { index: 0 })?;

        assert_eq!(
            effect.notice,
            Some(Notice::Removed {
                name: "Classic Bagel".to_string()
            })
        );
        assert!(effect.cart.is_empty());

        Ok(())
    }

    #[test]
    fn decrease_above_zero_produces_no_notice() -> TestResult {
        let store = store();

        store.dispatch(add_bagel())?;
        store.dispatch(Command::Increase { index: 0 })?;

        let effect = store.dispatch(Command::Decrease { index: 0 })?;

        assert_eq!(effect.notice, None);
        assert_eq!(effect.cart.get(0)?.quantity(), 1);

        Ok(())
    }

    #[test]
    fn remove_reports_the_removed_line_name() -> TestResult {
        let store = store();

        store.dispatch(add_bagel())?;

        let effect = store.dispatch(Command::Remove { index: 0 })?;

        assert_eq!(
            effect.notice,
            Some(Notice::Removed {
                name: "Classic Bagel".to_string()
            })
        );
        assert!(effect.cart.is_empty());

        Ok(())
    }

    #[test]
    fn notices_render_user_facing_messages() {
        let added = Notice::Added {
            name: "Classic Bagel".to_string(),
        };
        let removed = Notice::Removed {
            name: "Iced Coffee".to_string(),
        };

        assert_eq!(added.to_string(), "Classic Bagel added to the cart");
        assert_eq!(removed.to_string(), "Iced Coffee removed from the cart");
    }
}
