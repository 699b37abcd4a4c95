//! Serde helper functions for request deserialization.
//!
//! Clients often send every field of a form; these helpers turn "blank"
//! values into `None` so partial updates only touch what was filled in.

use serde::{Deserialize, Deserializer};

/// Deserialize an optional string, treating empty strings as None.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}

/// Deserialize an optional year, treating zero as None.
pub fn deserialize_optional_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let year: Option<i32> = Option::deserialize(deserializer)?;
    Ok(year.filter(|y| *y != 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Form {
        #[serde(default, deserialize_with = "deserialize_optional_string")]
        name: Option<String>,
        #[serde(default, deserialize_with = "deserialize_optional_year")]
        year: Option<i32>,
    }

    #[test]
    fn test_blank_string_is_none() {
        let form: Form = serde_json::from_str(r#"{"name": "   "}"#).unwrap();
        assert!(form.name.is_none());
    }

    #[test]
    fn test_null_and_missing_are_none() {
        let form: Form = serde_json::from_str(r#"{"name": null}"#).unwrap();
        assert!(form.name.is_none());
        assert!(form.year.is_none());
    }

    #[test]
    fn test_values_are_kept() {
        let form: Form = serde_json::from_str(r#"{"name": "Dune", "year": 1965}"#).unwrap();
        assert_eq!(form.name.as_deref(), Some("Dune"));
        assert_eq!(form.year, Some(1965));
    }

    #[test]
    fn test_zero_year_is_none() {
        let form: Form = serde_json::from_str(r#"{"year": 0}"#).unwrap();
        assert!(form.year.is_none());
    }
}
