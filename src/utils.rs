//! Utils

use std::path::PathBuf;

use clap::Parser;

/// Arguments for the storefront demos
#[derive(Debug, Parser)]
pub struct StorefrontArgs {
    /// Menu fixture set to browse
    #[clap(short, long, default_value = "bagelhouse")]
    pub menu: String,

    /// Show only this menu category ("all" shows everything)
    #[clap(short, long)]
    pub category: Option<String>,

    /// Search dishes by name or description
    #[clap(short, long)]
    pub search: Option<String>,

    /// Cart storage file path
    #[clap(long, default_value = "target/cart.json")]
    pub cart_path: PathBuf,
}
