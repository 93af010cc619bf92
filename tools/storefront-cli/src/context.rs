//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use storefront_commerce::prelude::*;

use crate::config::CliConfig;
use crate::output::Output;
use crate::store::JsonFileStore;

const CONFIG_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Cart file in use.
    pub cart_path: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, cart_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = if let Some(path) = config_path {
            CliConfig::load(path)?
        } else {
            // Try to find config in current directory or parent directories
            Self::find_config(&cwd).unwrap_or_default()
        };

        let cart_path = match cart_path {
            Some(path) => resolve_path(&cwd, Path::new(path)),
            None => resolve_path(&cwd, &config.cart.path),
        };

        Ok(Self {
            config,
            output,
            cwd,
            cart_path,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<CliConfig> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some(config);
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Store backing the cart file.
    pub fn store(&self) -> JsonFileStore {
        JsonFileStore::new(&self.cart_path, self.config.cart_config())
    }

    /// Load the cart file into a shared cart.
    pub fn open_cart(&self) -> Result<(SharedCart, JsonFileStore)> {
        let store = self.store();
        let cart = SharedCart::hydrate(&store)
            .with_context(|| format!("Failed to load cart: {}", self.cart_path.display()))?;
        self.output
            .debug(&format!("Loaded cart from {}", self.cart_path.display()));
        Ok((cart, store))
    }

    /// Write the cart back if a mutation changed it.
    pub fn save_cart(&self, cart: &SharedCart, store: &JsonFileStore) -> Result<()> {
        let written = cart
            .sync_to(store)
            .with_context(|| format!("Failed to save cart: {}", store.path().display()))?;
        if written {
            self.output
                .debug(&format!("Saved cart to {}", store.path().display()));
        } else {
            self.output.debug("Cart unchanged, nothing saved");
        }
        Ok(())
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        resolve_path(&self.cwd, Path::new(path))
    }
}

fn resolve_path(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
