//! `hbnb [ClassName]`: print every stored object, optionally of one class.

use std::io::{self, Write};

use anyhow::{Context, bail};
use hbnb_core::SharedModel;
use hbnb_infra::{FileStorage, StorageConfig};

fn main() -> anyhow::Result<()> {
    hbnb_observability::init();

    let class_filter = std::env::args().nth(1);
    let config = StorageConfig::from_env();

    let storage = FileStorage::open(&config, hbnb_models::registry())
        .with_context(|| format!("failed to open storage at {}", config.path.display()))?;

    let objects = select(&storage, class_filter.as_deref())?;
    tracing::info!(objects = objects.len(), "listing objects");

    let mut out = io::stdout().lock();
    for object in &objects {
        writeln!(out, "{}", &*object.read()).context("failed to write to stdout")?;
    }
    Ok(())
}

/// Objects to print, in storage-key order.
fn select(storage: &FileStorage, class_name: Option<&str>) -> anyhow::Result<Vec<SharedModel>> {
    match class_name {
        None => Ok(storage.all().into_values().collect()),
        Some(name) if storage.classes().contains(name) => Ok(storage.all_of(name)),
        Some(name) => bail!("** class doesn't exist: {name} **"),
    }
}
