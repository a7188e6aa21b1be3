//! Deck configuration for the CLI
//!
//! Parameters come from an optional JSON file, with `--retention` taking
//! precedence over the file's retention.

use std::path::Path;

use anyhow::Context;
use lapse_core::{Deck, DeckParams};
use tracing::debug;

/// Load deck parameters from `path` (if any) and apply overrides
pub fn load_params(path: Option<&Path>, retention: Option<f64>) -> anyhow::Result<DeckParams> {
    let mut params = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            debug!("Loaded deck parameters from {}", path.display());
            DeckParams::from_json_str(&text)
                .with_context(|| format!("Invalid config file {}", path.display()))?
        }
        None => DeckParams::default(),
    };

    if let Some(rate) = retention {
        params.requested_retention_rate = Some(rate);
    }

    Ok(params)
}

/// Build the deck the commands run against
pub fn build_deck(path: Option<&Path>, retention: Option<f64>) -> anyhow::Result<Deck> {
    let params = load_params(path, retention)?;
    Deck::new(params).context("Invalid deck configuration")
}
