use std::path::Path;

use authchain::config::ChainConfig;
use authchain::error::{AuthChainError, Result};

use crate::cli::common;
use crate::cli::json_output::{ChainEntryItem, ValidateResponse};

pub fn run(config: Option<&Path>, json: bool) -> Result<()> {
    let path = common::config_path(config)?;
    let chain = ChainConfig::load(&path)?.build()?;

    let entries: Vec<ChainEntryItem> = chain
        .gated()
        .map(|(index, entry, condition)| ChainEntryItem {
            index,
            provider: entry.provider().name().to_string(),
            condition,
        })
        .collect();

    if json {
        let response = ValidateResponse {
            path: path.display().to_string(),
            entries,
        };
        println!(
            "{}",
            serde_json::to_string(&response)
                .map_err(|e| AuthChainError::Serialization(e.to_string()))?
        );
        return Ok(());
    }

    if entries.is_empty() {
        eprintln!("Chain in {} has no entries.", path.display());
        return Ok(());
    }

    println!("{:<6} {:<24} CONDITION", "ENTRY", "PROVIDER");
    for item in &entries {
        println!("{:<6} {:<24} {}", item.index, item.provider, item.condition);
    }
    eprintln!("Chain in {} is valid ({} entries).", path.display(), entries.len());
    Ok(())
}
