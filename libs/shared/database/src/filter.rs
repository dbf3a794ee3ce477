use serde::Serialize;
use serde_json::Value;

use crate::error::StoreError;

/// Conjunction of exact-equality predicates over top-level record fields.
/// An empty filter matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    predicates: Vec<(String, String)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by_id(id: &str) -> Self {
        Self::new().eq("id", id)
    }

    pub fn eq(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.predicates.push((field.into(), value.into()));
        self
    }

    /// Translates a query struct with optional fields into predicates.
    /// `None` fields are skipped; every other field must be a scalar.
    pub fn from_query<T: Serialize>(query: &T) -> Result<Self, StoreError> {
        let fields = match serde_json::to_value(query)? {
            Value::Object(fields) => fields,
            Value::Null => return Ok(Self::new()),
            other => {
                return Err(StoreError::Malformed(format!(
                    "filter must be an object, got {}",
                    other
                )))
            }
        };

        let mut filter = Self::new();
        for (field, value) in fields {
            if value.is_null() {
                continue;
            }
            let value = scalar_to_string(&value).ok_or_else(|| {
                StoreError::Malformed(format!("filter field '{}' is not a scalar", field))
            })?;
            filter = filter.eq(field, value);
        }

        Ok(filter)
    }

    pub fn predicates(&self) -> &[(String, String)] {
        &self.predicates
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn matches(&self, record: &Value) -> bool {
        self.predicates.iter().all(|(field, expected)| {
            record
                .get(field)
                .and_then(scalar_to_string)
                .is_some_and(|actual| &actual == expected)
        })
    }

    /// PostgREST form: `field=eq.value&...`
    pub fn to_query_string(&self) -> String {
        self.predicates
            .iter()
            .map(|(field, value)| format!("{}=eq.{}", field, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct AppointmentQuery {
        doctor_id: Option<String>,
        status: Option<String>,
        weekday: Option<u8>,
    }

    #[test]
    fn from_query_skips_absent_fields() {
        let filter = Filter::from_query(&AppointmentQuery {
            doctor_id: Some("doc-1".into()),
            status: None,
            weekday: Some(2),
        })
        .unwrap();

        assert_eq!(
            filter.predicates(),
            &[
                ("doctor_id".to_string(), "doc-1".to_string()),
                ("weekday".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = Filter::from_query(&AppointmentQuery {
            doctor_id: None,
            status: None,
            weekday: None,
        })
        .unwrap();

        assert!(filter.is_empty());
        assert!(filter.matches(&json!({"anything": 1})));
    }

    #[test]
    fn matches_requires_every_predicate() {
        let filter = Filter::new().eq("role", "doctor").eq("clinic_id", "c1");

        assert!(filter.matches(&json!({"role": "doctor", "clinic_id": "c1", "x": 1})));
        assert!(!filter.matches(&json!({"role": "doctor", "clinic_id": "c2"})));
        assert!(!filter.matches(&json!({"role": "doctor"})));
        assert!(!filter.matches(&json!({"role": "doctor", "clinic_id": null})));
    }

    #[test]
    fn query_string_uses_postgrest_equality() {
        let filter = Filter::new().eq("email", "a+b@clinic.io").eq("status", "pending");
        assert_eq!(
            filter.to_query_string(),
            "email=eq.a%2Bb%40clinic.io&status=eq.pending"
        );
    }
}
