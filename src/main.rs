#![warn(rust_2018_idioms)]

use std::io::{self, Write};

use clap::{Parser, Subcommand};
use kv_inventory::logging::setup_logger;
use kv_inventory::{collect_inventory, lookup_secret, InventoryConfig, InventoryError, SecretEntry};
use vault_client::VaultClient;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// List the secrets stored under Vault's KV mounts without reading them.
///
/// The connection comes from VAULT_ADDR, VAULT_TOKEN (or ~/.vault-token)
/// and VAULT_NAMESPACE.
#[derive(Parser)]
#[command(name = "kv-inventory", version, about)]
struct Cli {
    /// Engine type to inventory [default: kv, or KV_INVENTORY_MOUNT_TYPE]
    #[arg(long, global = true)]
    mount_type: Option<String>,

    /// Folder levels to descend below each mount [default: 64, or KV_INVENTORY_MAX_DEPTH]
    #[arg(long, global = true)]
    max_depth: Option<usize>,

    /// Print one JSON object per line
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print every secret path across all matching mounts
    List,
    /// Check whether a secret exists at PATH under MOUNTPOINT
    Exists { mountpoint: String, path: String },
}

impl Cli {
    fn inventory_config(&self) -> InventoryConfig {
        let mut config = InventoryConfig::from_env();
        if let Some(ref mount_type) = self.mount_type {
            config = config.mount_type(mount_type.clone());
        }
        if let Some(max_depth) = self.max_depth {
            config = config.max_depth(max_depth);
        }
        config
    }
}

fn print_entry(out: &mut impl Write, entry: &SecretEntry, json: bool) -> Result<()> {
    if json {
        serde_json::to_writer(&mut *out, entry)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}\t{}", entry.mountpoint, entry.path)?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = setup_logger()?;

    let client = VaultClient::builder()
        .application_name(concat!("kv-inventory/", env!("CARGO_PKG_VERSION")))
        .build()
        .await
        .map_err(InventoryError::Connection)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::List => {
            let config = cli.inventory_config();
            let report = collect_inventory(&client, &config).await?;

            for entry in &report.entries {
                print_entry(&mut out, entry, cli.json)?;
            }

            if !report.skipped.is_empty() {
                tracing::warn!(
                    skipped = report.skipped.len(),
                    "Inventory is incomplete, some folders could not be listed"
                );
            }
        }
        Command::Exists {
            ref mountpoint,
            ref path,
        } => {
            let found = lookup_secret(&client, mountpoint, path).await?;
            match (found, cli.json) {
                (Some(entry), true) => print_entry(&mut out, &entry, true)?,
                (found, false) => writeln!(out, "{}", found.is_some())?,
                (None, true) => writeln!(out, "null")?,
            }
        }
    }

    out.flush()?;
    Ok(())
}
