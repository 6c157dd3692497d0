//! Layered merging of YAML configuration values.
//!
//! # Merge Rules
//!
//! - Mappings are merged recursively
//! - Sequences are replaced entirely, except the top-level `tools` list
//! - `tools` entries are combined by `name`: a later entry replaces an
//!   earlier one in place, new names are appended
//! - Null values in the overlay delete the key from the base
//! - Scalars in the overlay replace scalars in the base

use serde_yaml::{Mapping, Value};

/// Deep merge two YAML values. The overlay wins at the point of conflict.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            let mut result = base_map.clone();

            for (key, overlay_value) in overlay_map {
                if overlay_value.is_null() {
                    result.remove(key);
                } else if let Some(base_value) = base_map.get(key) {
                    result.insert(key.clone(), deep_merge(base_value, overlay_value));
                } else {
                    result.insert(key.clone(), overlay_value.clone());
                }
            }

            Value::Mapping(result)
        }
        (_, overlay) => overlay.clone(),
    }
}

/// Merge config layers in order (later overrides earlier).
pub fn merge_configs(configs: &[Value]) -> Value {
    configs
        .iter()
        .fold(Value::Mapping(Mapping::new()), |acc, config| {
            let tools = merge_tool_lists(acc.get("tools"), config.get("tools"));
            let mut merged = deep_merge(&acc, config);
            if let (Some(tools), Value::Mapping(map)) = (tools, &mut merged) {
                map.insert(Value::from("tools"), tools);
            }
            merged
        })
}

/// Combine two `tools` sequences by entry name.
///
/// Returns `None` unless both sides hold a sequence, leaving the plain
/// deep-merge result in place.
fn merge_tool_lists(base: Option<&Value>, overlay: Option<&Value>) -> Option<Value> {
    let base = base?.as_sequence()?;
    let overlay = overlay?.as_sequence()?;

    let mut merged = base.clone();
    for entry in overlay {
        let name = entry.get("name");
        let existing = name.and_then(|name| {
            merged
                .iter()
                .position(|candidate| candidate.get("name") == Some(name))
        });
        match existing {
            Some(index) => merged[index] = entry.clone(),
            None => merged.push(entry.clone()),
        }
    }

    Some(Value::Sequence(merged))
}
