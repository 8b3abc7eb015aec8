//! Command handlers for the `attrgrid` binary.
//!
//! Handlers load the definition file, boot a catalog and hand results to
//! [`print`]. They are the only code that writes to stdout.

use attrgrid::codec::MapRecord;
use attrgrid::config::ResolverConfig;
use attrgrid::definition::Definition;
use attrgrid::error::{AttrgridError, Result};
use attrgrid::schema::SchemaIntrospector;
use tracing::info;
use std::fs;
use std::path::Path;

mod print;

pub fn handle_models(file: &Path) -> Result<()> {
    let definition = Definition::load(file)?;
    print::print_models(&definition.schema.model_names());
    Ok(())
}

pub fn handle_resolve(
    file: &Path,
    config: ResolverConfig,
    models: &[String],
    json: bool,
) -> Result<()> {
    let catalog = Definition::load(file)?.into_catalog(config)?;

    let models: Vec<String> = if models.is_empty() {
        catalog
            .schema()
            .model_names()
            .into_iter()
            .map(String::from)
            .collect()
    } else {
        models.to_vec()
    };

    let mut resolved = Vec::with_capacity(models.len());
    for model in models {
        let descriptors = catalog.descriptors(&model)?;
        resolved.push((model, descriptors));
    }

    if json {
        print::print_descriptors_json(&resolved)
    } else {
        print::print_descriptor_tables(&resolved);
        Ok(())
    }
}

pub fn handle_serialize(
    file: &Path,
    config: ResolverConfig,
    model: &str,
    records: &Path,
    keyed: bool,
) -> Result<()> {
    let catalog = Definition::load(file)?.into_catalog(config)?;
    let descriptors = catalog.descriptors(model)?;
    let codec = catalog.codec();

    let content = fs::read_to_string(records).map_err(AttrgridError::Io)?;
    let records: Vec<MapRecord> =
        serde_json::from_str(&content).map_err(AttrgridError::Serialization)?;

    let output = if keyed {
        let rows = records
            .iter()
            .map(|r| codec.to_mapping(r, &*descriptors))
            .collect::<Result<Vec<_>>>()?;
        serde_json::to_string_pretty(&rows)?
    } else {
        let rows = records
            .iter()
            .map(|r| codec.to_sequence(r, &*descriptors))
            .collect::<Result<Vec<_>>>()?;
        serde_json::to_string_pretty(&rows)?
    };
    println!("{}", output);
    Ok(())
}

/// `config` with no key lists every setting; with a key it prints that
/// setting; with a key and value it stores the new value.
pub fn handle_config(
    config_dir: Option<&Path>,
    key: Option<&str>,
    value: Option<&str>,
) -> Result<()> {
    let dir = config_dir.ok_or_else(|| {
        AttrgridError::Config("no config directory given, pass --config <DIR>".to_string())
    })?;
    let mut config = ResolverConfig::load(dir)?;

    match (key, value) {
        (None, _) => print::print_config(&config),
        (Some(key), None) => {
            let current = config
                .get(key)
                .ok_or_else(|| AttrgridError::Config(format!("Unknown config key: {}", key)))?;
            println!("{}", current);
        }
        (Some(key), Some(value)) => {
            config.set(key, value)?;
            config.save(dir)?;
            info!(key, dir = %dir.display(), "config saved");
            let shown = config.get(key).unwrap_or_else(|| value.to_string());
            println!("{} set to {}", key, shown);
        }
    }
    Ok(())
}
