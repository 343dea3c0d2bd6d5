use crate::error::{Result, SongrecError};
use crate::types::config::SongrecConfig;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;

pub const DEFAULT_CONFIG_FILE: &str = "songrec.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".songrec/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/songrec/config.toml";

/// The file a setting was read from, in increasing precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLayer {
    Global,
    Project,
    Local,
}

impl fmt::Display for ConfigLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConfigLayer::Global => "global",
            ConfigLayer::Project => "project",
            ConfigLayer::Local => "local",
        })
    }
}

/// Dotted key (`similarity.seed`) to the layer that set it last.
pub type Origins = BTreeMap<String, ConfigLayer>;

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: SongrecConfig,
    pub origins: Origins,
}

/// `"default"` when no layer set the key.
pub fn origin_label(origins: &Origins, key: &str) -> String {
    origins
        .get(key)
        .map(ToString::to_string)
        .unwrap_or_else(|| "default".to_string())
}

pub fn load_config(root: &Path) -> Result<Option<LoadedConfig>> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(root, global.as_deref())
}

pub(crate) fn load_config_with_global(
    root: &Path,
    global_path: Option<&Path>,
) -> Result<Option<LoadedConfig>> {
    let project_path = root.join(DEFAULT_CONFIG_FILE);
    if !project_path.exists() {
        return Ok(None);
    }

    let mut merged = Value::Table(Map::new());
    let mut origins = Origins::new();
    if let Some(path) = global_path {
        merge_layer(&mut merged, &mut origins, path, ConfigLayer::Global)?;
    }
    merge_layer(&mut merged, &mut origins, &project_path, ConfigLayer::Project)?;
    merge_layer(
        &mut merged,
        &mut origins,
        &root.join(DEFAULT_LOCAL_FILE),
        ConfigLayer::Local,
    )?;

    let config: SongrecConfig = merged
        .try_into()
        .map_err(|e: toml::de::Error| SongrecError::ConfigParse(e.to_string()))?;
    config.validate()?;
    for (key, layer) in &origins {
        tracing::debug!(key = %key, layer = %layer, "config value");
    }
    Ok(Some(LoadedConfig { config, origins }))
}

fn merge_layer(
    merged: &mut Value,
    origins: &mut Origins,
    path: &Path,
    layer: ConfigLayer,
) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    let content = std::fs::read_to_string(path)?;
    let value: Value = toml::from_str(&content)
        .map_err(|e| SongrecError::ConfigParse(format!("{}: {}", path.display(), e)))?;
    tracing::debug!(path = %path.display(), layer = %layer, "merging config layer");
    merge_value(merged, value, "", layer, origins);
    Ok(())
}

/// Tables merge key by key; anything else replaces the slot and claims every
/// key beneath it for `layer`.
fn merge_value(
    base: &mut Value,
    overlay: Value,
    prefix: &str,
    layer: ConfigLayer,
    origins: &mut Origins,
) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                let path = join_key(prefix, &key);
                match base_table.get_mut(&key) {
                    Some(existing) => merge_value(existing, value, &path, layer, origins),
                    None => {
                        record_leaves(&value, &path, layer, origins);
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => {
            let nested = format!("{prefix}.");
            origins.retain(|key, _| key != prefix && !key.starts_with(&nested));
            record_leaves(&value, prefix, layer, origins);
            *slot = value;
        }
    }
}

fn record_leaves(value: &Value, path: &str, layer: ConfigLayer, origins: &mut Origins) {
    match value {
        Value::Table(table) => {
            for (key, nested) in table {
                record_leaves(nested, &join_key(path, key), layer, origins);
            }
        }
        _ => {
            origins.insert(path.to_string(), layer);
        }
    }
}

fn join_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn load_config_returns_none_when_project_file_missing() {
        let dir = TempDir::new().expect("temp dir should be created");
        let cfg = load_config_with_global(dir.path(), None).expect("load should not fail");
        assert!(cfg.is_none());
    }

    #[test]
    fn load_config_merges_layers_and_tracks_origins() {
        let root = TempDir::new().expect("root temp dir should be created");
        let global_root = TempDir::new().expect("global temp dir should be created");
        let global_path = global_root.path().join("config.toml");

        fs::write(
            &global_path,
            r#"
[catalog]
path = "global.csv"

[similarity]
seed = 1
pool_size = 50
"#,
        )
        .expect("global config should write");

        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            r#"
[catalog]
path = "project.csv"

[recommend]
count = 12
"#,
        )
        .expect("project config should write");

        fs::create_dir_all(root.path().join(".songrec")).expect("local dir should create");
        fs::write(
            root.path().join(DEFAULT_LOCAL_FILE),
            r#"
[similarity]
seed = 5
"#,
        )
        .expect("local override should write");

        let loaded = load_config_with_global(root.path(), Some(&global_path))
            .expect("load should succeed")
            .expect("merged config should exist");

        assert_eq!(loaded.config.catalog_path(), "project.csv");
        assert_eq!(loaded.config.count(), 12);
        let settings = loaded.config.similarity_settings();
        assert_eq!(settings.seed, 5);
        assert_eq!(settings.pool_size, 50);

        assert_eq!(origin_label(&loaded.origins, "catalog.path"), "project");
        assert_eq!(origin_label(&loaded.origins, "recommend.count"), "project");
        assert_eq!(origin_label(&loaded.origins, "similarity.seed"), "local");
        assert_eq!(origin_label(&loaded.origins, "similarity.pool_size"), "global");
        assert_eq!(origin_label(&loaded.origins, "similarity.similarity_weight"), "default");
    }

    #[test]
    fn replacing_a_table_with_a_value_drops_nested_origins() {
        let mut merged = Value::Table(Map::new());
        let mut origins = Origins::new();
        let first: Value = toml::from_str("[extra]\nkey = 1\nother = 2").expect("toml");
        let second: Value = toml::from_str("extra = 3").expect("toml");

        merge_value(&mut merged, first, "", ConfigLayer::Global, &mut origins);
        assert_eq!(origins.get("extra.key"), Some(&ConfigLayer::Global));

        merge_value(&mut merged, second, "", ConfigLayer::Local, &mut origins);
        assert_eq!(origins.get("extra"), Some(&ConfigLayer::Local));
        assert!(origins.get("extra.key").is_none());
        assert!(origins.get("extra.other").is_none());
    }

    #[test]
    fn load_config_rejects_invalid_values() {
        let root = TempDir::new().expect("root temp dir should be created");
        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            r#"
[similarity]
pool_size = 0
"#,
        )
        .expect("project config should write");

        let err = load_config_with_global(root.path(), None).expect_err("load should fail");
        assert!(err.to_string().contains("pool_size"));
    }

    #[test]
    fn load_config_reports_malformed_toml_with_path() {
        let root = TempDir::new().expect("root temp dir should be created");
        fs::write(root.path().join(DEFAULT_CONFIG_FILE), "[catalog\npath = 1")
            .expect("project config should write");

        let err = load_config_with_global(root.path(), None).expect_err("load should fail");
        assert!(err.to_string().contains("songrec.toml"));
    }
}
