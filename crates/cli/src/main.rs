//! Interactive inventory console.

use std::io;

use anyhow::Context;

use stockroom_cli::Menu;
use stockroom_inventory::{InventoryConfig, InventorySystem};
use stockroom_observability::LogFormat;

fn main() -> anyhow::Result<()> {
    // Quiet by default: stdout belongs to the menu, logs go to stderr.
    let format = std::env::var("STOCKROOM_LOG_FORMAT")
        .ok()
        .and_then(|raw| LogFormat::parse(&raw))
        .unwrap_or(LogFormat::Compact);
    stockroom_observability::init_with(format, "warn");

    let config = InventoryConfig::from_env();
    let system = InventorySystem::with_config(config).context("failed to initialize inventory system")?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    Menu::new(system, stdin.lock(), stdout.lock()).run()
}
