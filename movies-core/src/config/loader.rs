use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::Path;

use serde_yaml::Value as Yaml;

use super::value::ConfigValue;
use super::ConfigError;

/// Merge the YAML file at `path` into `values`. Later files win on shared keys.
///
/// An absent file contributes nothing, so profile files stay optional.
pub(crate) fn load_yaml_file(
    path: &Path,
    values: &mut HashMap<String, ConfigValue>,
) -> Result<(), ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => load_yaml_str(&content, values),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(err) => Err(ConfigError::Load(format!("{}: {err}", path.display()))),
    }
}

pub(crate) fn load_yaml_str(
    content: &str,
    values: &mut HashMap<String, ConfigValue>,
) -> Result<(), ConfigError> {
    let root: Yaml = serde_yaml::from_str(content).map_err(|e| ConfigError::Load(e.to_string()))?;
    values.extend(leaves(root));
    Ok(())
}

/// Every non-mapping node of `root`, keyed by its dotted path (`server.port`).
fn leaves(root: Yaml) -> Vec<(String, ConfigValue)> {
    let mut pending = vec![(String::new(), root)];
    let mut found = Vec::new();

    while let Some((path, node)) = pending.pop() {
        let Yaml::Mapping(children) = node else {
            if !path.is_empty() {
                found.push((path, ConfigValue::from_yaml(&node)));
            }
            continue;
        };
        for (name, child) in children {
            let name = match name {
                Yaml::String(name) => name,
                other => ConfigValue::from_yaml(&other).as_text().unwrap_or_default(),
            };
            let child_path = if path.is_empty() {
                name
            } else {
                format!("{path}.{name}")
            };
            pending.push((child_path, child));
        }
    }
    found
}
