use anyhow::{Context, Result};
use config::{ConfigError, Map, Source, Value};
use std::{collections::HashMap, fs, path::Path};
use tracing::debug;

/// Parses `KEY=VALUE` lines from the file at `path`.
///
/// Fails only when the file cannot be read; malformed lines are skipped.
pub fn parse_env_file(path: &Path) -> Result<HashMap<String, String>> {
    let vars = parse_env_str(&read_env_file(path)?);
    debug!("Loaded {} entries from {}", vars.len(), path.display());

    Ok(vars)
}

/// Blank lines and lines starting with `#` are ignored. The value ends at the
/// next `=` if there is one. Lines without a key or a value contribute nothing.
pub fn parse_env_str(contents: &str) -> HashMap<String, String> {
    parse_env_entries(contents).into_iter().collect()
}

/// Same grammar as [`parse_env_str`], keeping every entry in file order.
pub fn parse_env_entries(contents: &str) -> Vec<(String, String)> {
    contents
        .lines()
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let mut parts = line.split('=');
            let key = parts.next()?;
            let value = parts.next()?;

            if key.is_empty() || value.is_empty() {
                None
            } else {
                Some((key.to_string(), value.to_string()))
            }
        })
        .collect()
}

fn read_env_file(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("Could not open .env file: {}", path.display()))
}

/// A `config` source backed by the entries of an env file.
///
/// Keys are lowercased so lookups do not depend on how the file spells them.
/// When two spellings of a key collide, the later line wins.
#[derive(Clone, Debug, Default)]
pub struct EnvFile {
    origin: Option<String>,
    entries: Vec<(String, String)>,
}

impl EnvFile {
    pub fn load(path: &Path) -> Result<Self> {
        let entries = parse_env_entries(&read_env_file(path)?);
        debug!("Loaded {} entries from {}", entries.len(), path.display());

        Ok(Self {
            origin: Some(path.display().to_string()),
            entries,
        })
    }

    pub fn parse(contents: &str) -> Self {
        Self {
            origin: None,
            entries: parse_env_entries(contents),
        }
    }
}

impl Source for EnvFile {
    fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
        Box::new(self.clone())
    }

    fn collect(&self) -> Result<Map<String, Value>, ConfigError> {
        let mut vars = Map::new();
        for (key, value) in &self.entries {
            vars.insert(
                key.to_lowercase(),
                Value::new(self.origin.as_ref(), value.clone()),
            );
        }
        Ok(vars)
    }
}
