pub mod access_logs;
pub mod auth;
pub mod dashboard;
pub mod packages;
pub mod parking;
pub mod people;
pub mod permissions;
pub mod roles;
pub mod units;
pub mod vehicles;

use serde::{Deserialize, Deserializer};

/// Deserialize a nullable field of a partial update.
///
/// Absent stays `None` (via `#[serde(default)]`), `null` becomes
/// `Some(None)` and a value becomes `Some(Some(v))`.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "super::double_option")]
        unit_id: Option<Option<String>>,
    }

    #[test]
    fn absent_null_and_value_are_distinct() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        let null: Patch = serde_json::from_str(r#"{"unit_id":null}"#).unwrap();
        let value: Patch = serde_json::from_str(r#"{"unit_id":"u1"}"#).unwrap();
        assert_eq!(absent.unit_id, None);
        assert_eq!(null.unit_id, Some(None));
        assert_eq!(value.unit_id, Some(Some("u1".into())));
    }
}
