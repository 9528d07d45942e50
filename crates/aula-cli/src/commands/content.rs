//! The `aula content` commands.

use std::path::PathBuf;

use anyhow::{Context, Result};

use aula_core::session::{AdminGate, SessionContext};
use aula_media::load_config_from;
use aula_store::{ContentStore, StoreError};

pub fn set(
    unit: u32,
    class: u32,
    key: String,
    text: Option<String>,
    file: Option<PathBuf>,
    secret: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let gate = AdminGate::from_env();
    let mut ctx = SessionContext::guest();
    if !ctx.elevate(&gate, &secret) {
        anyhow::bail!("saving content requires the admin secret");
    }

    let text = match (text, file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        (None, None) => anyhow::bail!("provide the block text with --text or --file"),
    };

    let store = ContentStore::new(config.content_dir());
    match store.save(unit, class, &key, &text) {
        Ok(path) => println!("Saved content block to: {}", path.display()),
        // Rejected input is a hard error; disk trouble is only a warning
        Err(e @ StoreError::InvalidKey(_)) => return Err(e.into()),
        Err(e) => {
            tracing::warn!("could not save content block: {e}");
            eprintln!("Warning: the content block could not be saved ({e}).");
        }
    }

    Ok(())
}

pub fn get(unit: u32, class: u32, key: String, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let store = ContentStore::new(config.content_dir());

    match store.load(unit, class, &key)? {
        Some(text) => println!("{text}"),
        None => println!("(no content saved for unit {unit}, class {class}, key {key})"),
    }

    Ok(())
}
