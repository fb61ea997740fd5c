//! Merge-over-defaults
//!
//! Deep merge of a loaded configuration document over a defaults document.
//! Objects merge key by key, recursively; any other value in the overlay
//! (arrays, scalars, null) replaces the base value wholesale.

use crate::types::ConfigDocument;
use serde_json::{Map, Value};

/// Merge `overlay` over `defaults`, returning a new document.
///
/// Neither input is modified.
pub fn merge_over_defaults(defaults: &ConfigDocument, overlay: &ConfigDocument) -> ConfigDocument {
    let mut merged = defaults.clone();
    merge_into(&mut merged, overlay);
    merged
}

/// Merge `overlay` into `base` in place.
pub fn merge_into(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            merge_maps(base_map, overlay_map);
        }
        (base, overlay) => {
            *base = overlay.clone();
        }
    }
}

fn merge_maps(base: &mut Map<String, Value>, overlay: &Map<String, Value>) {
    for (key, value) in overlay {
        let both_objects = value.is_object() && base.get(key).is_some_and(Value::is_object);
        match base.get_mut(key) {
            Some(existing) if both_objects => merge_into(existing, value),
            _ => {
                base.insert(key.clone(), value.clone());
            }
        }
    }
}
