use serde_json::Value;
use std::collections::HashMap;

use crate::types::MassifInfo;

/// Historical spellings of the department property, tried in priority order.
const DEPARTMENT_KEYS: [&str; 3] = ["Departemen", "departement", "Departement"];
const SECOND_DEPARTMENT_KEYS: [&str; 3] = ["Dep2", "dep2", "Departement2"];

const UNKNOWN: &str = "Unknown";

fn property_string(properties: &Value, name: &str) -> Option<String> {
    match properties.get(name) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        // Upstream sometimes encodes codes as JSON numbers.
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

fn first_present(properties: &Value, candidates: &[&str]) -> Option<String> {
    candidates
        .iter()
        .find_map(|name| property_string(properties, name))
}

/// Groups the features of a massif list by department key.
///
/// A massif attached to a border region appears under both its primary and
/// secondary department. Features carrying neither key are left out of the
/// index entirely, matching upstream behavior. Missing titles or codes fall
/// back to an "Unknown" placeholder rather than dropping the feature.
pub fn group_by_departement(collection: &Value) -> HashMap<String, Vec<MassifInfo>> {
    let mut index: HashMap<String, Vec<MassifInfo>> = HashMap::new();

    let features = collection
        .get("features")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    for feature in features {
        let properties = feature.get("properties").unwrap_or(&Value::Null);
        let massif = MassifInfo {
            title: property_string(properties, "title").unwrap_or_else(|| UNKNOWN.to_string()),
            code: property_string(properties, "code").unwrap_or_else(|| UNKNOWN.to_string()),
        };

        if let Some(department) = first_present(properties, &DEPARTMENT_KEYS) {
            index.entry(department).or_default().push(massif.clone());
        }
        if let Some(department) = first_present(properties, &SECOND_DEPARTMENT_KEYS) {
            index.entry(department).or_default().push(massif);
        }
    }

    index
}

/// Parses a feature-collection massif list and groups it by department.
/// Malformed JSON is the only error; irregular features degrade per
/// `group_by_departement`.
pub fn parse_massif_index(json: &str) -> Result<HashMap<String, Vec<MassifInfo>>, String> {
    let collection: Value =
        serde_json::from_str(json).map_err(|e| format!("Failed to parse massif list JSON: {e}"))?;
    Ok(group_by_departement(&collection))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_string_and_numeric_properties() {
        let properties = json!({ "title": "Chablais", "code": 1, "empty": "" });
        assert_eq!(property_string(&properties, "title"), Some("Chablais".into()));
        assert_eq!(property_string(&properties, "code"), Some("1".into()));
        assert_eq!(property_string(&properties, "empty"), None);
        assert_eq!(property_string(&properties, "missing"), None);
    }

    #[test]
    fn first_non_empty_key_variant_wins() {
        let properties = json!({ "departement": "73", "Departement": "74" });
        assert_eq!(
            first_present(&properties, &DEPARTMENT_KEYS),
            Some("73".to_string())
        );
    }
}
