use serde_json::Value;

/// Drops every object key whose value is `""`, walking nested objects and arrays.
///
/// `{ "group": { "name": "", "description": "x" } }` becomes
/// `{ "group": { "description": "x" } }`. Empty strings inside arrays are kept;
/// only keyed fields are removed.
pub fn remove_blank_fields(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !matches!(v, Value::String(s) if s.is_empty()))
                .map(|(k, v)| (k, remove_blank_fields(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(remove_blank_fields).collect()),
        other => other,
    }
}
