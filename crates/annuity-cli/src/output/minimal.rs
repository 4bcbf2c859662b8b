use serde_json::Value;

/// Fields worth printing on their own, in order of priority.
const HEADLINE_KEYS: [&str; 4] = ["annuity", "remaining_balance", "formatted", "total_paid"];

/// Print just the headline figure: the instalment of a simulation, the
/// balance of a balance query, the string of a format request.
pub fn print_minimal(value: &Value) {
    println!("{}", headline(value));
}

fn headline(value: &Value) -> String {
    let candidates = [
        value.get("summary"),
        value.get("result"),
        Some(value),
    ];

    for obj in candidates.into_iter().flatten().filter_map(Value::as_object) {
        for key in HEADLINE_KEYS {
            if let Some(val) = obj.get(key).filter(|v| !v.is_null()) {
                return format_minimal(val);
            }
        }
    }

    match value.as_object().and_then(|m| m.iter().next()) {
        Some((key, val)) => format!("{}: {}", key, format_minimal(val)),
        None => format_minimal(value),
    }
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
