use crate::config::Config;
use crate::errors::{AppError, AppResult};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Keys present in the defaults but missing from the config file on disk.
///
/// Missing keys are harmless (serde fills in defaults) but `config --check`
/// reports them so the user can see what is configurable.
pub fn missing_keys(path: &Path) -> AppResult<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    let on_disk: Value = serde_yaml::from_str(&content)
        .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;

    let defaults = serde_yaml::to_value(Config::default())
        .map_err(|e| AppError::Config(e.to_string()))?;

    let empty = Mapping::new();
    let on_disk_map = on_disk.as_mapping().unwrap_or(&empty);

    let mut missing = Vec::new();
    if let Some(default_map) = defaults.as_mapping() {
        for key in default_map.keys() {
            if !on_disk_map.contains_key(key)
                && let Some(k) = key.as_str()
            {
                missing.push(k.to_string());
            }
        }
    }

    Ok(missing)
}

/// Add the missing keys with their default values, keeping existing ones.
pub fn fill_missing_keys(path: &Path) -> AppResult<usize> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    let mut on_disk: Value = serde_yaml::from_str(&content)
        .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;

    let defaults = serde_yaml::to_value(Config::default())
        .map_err(|e| AppError::Config(e.to_string()))?;

    let Some(map) = on_disk.as_mapping_mut() else {
        return Err(AppError::Config(format!(
            "{}: top-level value is not a mapping",
            path.display()
        )));
    };

    let mut added = 0;
    if let Some(default_map) = defaults.as_mapping() {
        for (key, value) in default_map {
            if !map.contains_key(key) {
                map.insert(key.clone(), value.clone());
                added += 1;
            }
        }
    }

    if added > 0 {
        let serialized = serde_yaml::to_string(&on_disk).map_err(|_| AppError::ConfigSave)?;
        fs::write(path, serialized).map_err(|_| AppError::ConfigSave)?;
    }

    Ok(added)
}
