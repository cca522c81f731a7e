//! Cart Session Demo
//!
//! Replay a short ordering session against a file-backed cart: add dishes,
//! adjust quantities, drop a line, then read the same cart back through a
//! fresh store instance to show that every mutation was persisted.

use std::io;

use anyhow::Result;
use rusty_money::{Money, iso};
use tracing_subscriber::EnvFilter;

use sesame::{
    commands::Command,
    delivery::DeliveryPolicy,
    store::{CartStore, FileStorage},
};

fn session_store(path: &str) -> CartStore<FileStorage> {
    CartStore::new(
        FileStorage::new(path),
        iso::ILS,
        DeliveryPolicy::standard(iso::ILS),
    )
}

/// Cart Session Demo
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let path = "target/cart-session.json";
    let store = session_store(path);

    let commands = [
        Command::Add {
            name: "Classic Bagel".to_string(),
            unit_price: Money::from_minor(1200, iso::ILS),
        },
        Command::Add {
            name: "Lox Sandwich".to_string(),
            unit_price: Money::from_minor(4200, iso::ILS),
        },
        Command::Add {
            name: "Iced Coffee".to_string(),
            unit_price: Money::from_minor(1250, iso::ILS),
        },
        Command::Increase { index: 0 },
        Command::Decrease { index: 2 },
    ];

    for command in commands {
        let effect = store.dispatch(command)?;

        if let Some(notice) = effect.notice {
            println!("· {notice}");
        }
    }

    // A fresh store over the same file sees the persisted cart.
    let reloaded = session_store(path);

    println!(
        "\nReloaded cart holds {} units across {} lines",
        reloaded.item_count()?,
        reloaded.cart()?.len()
    );

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    reloaded.receipt()?.write_to(&mut handle)?;

    Ok(())
}
