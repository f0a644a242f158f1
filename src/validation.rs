// Validation utilities module
// Shared helpers for request input handling

use serde::{Deserialize, Deserializer};

/// Split a comma-separated skills string into trimmed entries,
/// dropping empty segments ("Rust, SQL ,,Go" -> ["Rust", "SQL", "Go"])
pub fn split_skills(skills: &str) -> Vec<String> {
    skills
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Deserializer for tri-state optional fields.
///
/// Used with `#[serde(default, deserialize_with = "double_option")]` on
/// `Option<Option<T>>` fields: a missing key stays `None` (keep current
/// value), JSON `null` becomes `Some(None)` (clear the value), and a value
/// becomes `Some(Some(v))` (set it).
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skills_are_split_and_trimmed() {
        assert_eq!(
            split_skills("HTML, CSS,JavaScript , Rust"),
            vec!["HTML", "CSS", "JavaScript", "Rust"]
        );
    }

    #[test]
    fn empty_segments_are_dropped() {
        assert_eq!(split_skills("Rust,,  ,Go"), vec!["Rust", "Go"]);
        assert!(split_skills("").is_empty());
    }

    #[derive(serde::Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "double_option")]
        company: Option<Option<String>>,
    }

    #[test]
    fn missing_field_means_keep() {
        let patch: Patch = serde_json::from_str("{}").unwrap();
        assert!(patch.company.is_none());
    }

    #[test]
    fn null_field_means_clear() {
        let patch: Patch = serde_json::from_str(r#"{"company": null}"#).unwrap();
        assert_eq!(patch.company, Some(None));
    }

    #[test]
    fn value_field_means_set() {
        let patch: Patch = serde_json::from_str(r#"{"company": "Acme"}"#).unwrap();
        assert_eq!(patch.company, Some(Some("Acme".to_string())));
    }
}
