//! Model name resolution.

/// Short name aliases for popular vision-capable models.
const ALIASES: &[(&str, &str)] = &[
    ("4o", "gpt-4o"),
    ("4o-mini", "gpt-4o-mini"),
    ("4.1", "gpt-4.1"),
    ("4.1-mini", "gpt-4.1-mini"),
];

/// Resolve a model name (alias or exact) to the full model identifier.
#[must_use]
pub fn resolve_model(name: &str) -> String {
    for &(alias, full) in ALIASES {
        if name == alias {
            return full.to_string();
        }
    }
    name.to_string()
}
