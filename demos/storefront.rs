//! Storefront Demo
//!
//! Browse a menu fixture, optionally narrowing it to one category or a
//! search term, add one unit of every visible dish to the cart, and print
//! the receipt.
//!
//! Use `-m` to load a menu fixture set by name
//! Use `-c` to show a single category
//! Use `-s` to search dishes by name or description

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sesame::{
    commands::Command,
    delivery::DeliveryPolicy,
    fixtures::Fixture,
    menu::SectionFilter,
    store::{CartStore, FileStorage},
    utils::StorefrontArgs,
};

/// Storefront Demo
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = StorefrontArgs::parse();

    let menu = Fixture::new().load_menu(&args.menu)?;

    let views = match (&args.search, &args.category) {
        (Some(term), _) => menu.search(term),
        (None, Some(category)) => menu.filter(&SectionFilter::from(category.as_str())),
        (None, None) => menu.filter(&SectionFilter::All),
    };

    let store = CartStore::new(
        FileStorage::new(args.cart_path),
        menu.currency(),
        DeliveryPolicy::standard(menu.currency()),
    );

    for view in &views {
        println!("\n== {} ==", view.section().title());

        for item in view.items() {
            println!("  {} ({})", item.name(), item.description());

            let effect = store.dispatch(Command::Add {
                name: item.name().to_string(),
                unit_price: *item.price(),
            })?;

            if let Some(notice) = effect.notice {
                println!("  · {notice}");
            }
        }
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    store.receipt()?.write_to(&mut handle)?;

    Ok(())
}
