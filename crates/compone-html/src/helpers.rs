//! Helpers for building attribute values.

/// Join class names whose condition holds.
///
/// Empty names and repeats are skipped, so the result can be passed
/// straight to a `class_` prop.
///
/// ```ignore
/// let class = classes([("btn", true), ("btn-active", is_active), ("", true)]);
/// ```
pub fn classes<I, S>(items: I) -> String
where
    I: IntoIterator<Item = (S, bool)>,
    S: AsRef<str>,
{
    let mut names: Vec<String> = Vec::new();
    for (name, enabled) in items {
        if !enabled {
            continue;
        }
        for part in name.as_ref().split_whitespace() {
            if !names.iter().any(|n| n == part) {
                names.push(part.to_string());
            }
        }
    }
    names.join(" ")
}
