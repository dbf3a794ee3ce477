use std::fmt;

use serde::{Deserialize, Serialize};

/// Declares an opaque string identifier. Each entity gets its own type so a
/// doctor id can never be passed where a patient id is expected.
macro_rules! record_id {
    ($($(#[$meta:meta])* $name:ident),+ $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
            #[serde(transparent)]
            pub struct $name(String);

            impl $name {
                pub fn new(value: impl Into<String>) -> Self {
                    Self(value.into())
                }

                pub fn as_str(&self) -> &str {
                    &self.0
                }

                pub fn into_inner(self) -> String {
                    self.0
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.0)
                }
            }

            impl From<String> for $name {
                fn from(value: String) -> Self {
                    Self(value)
                }
            }

            impl From<&str> for $name {
                fn from(value: &str) -> Self {
                    Self(value.to_string())
                }
            }

            impl AsRef<str> for $name {
                fn as_ref(&self) -> &str {
                    &self.0
                }
            }
        )+
    };
}

record_id!(
    ClinicId,
    UserId,
    /// Identifies the doctor an availability window or appointment belongs to.
    DoctorId,
    PatientId,
    DoctorProfileId,
    PatientProfileId,
    AvailabilityId,
    AppointmentId,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = DoctorId::new("doc-1");
        assert_eq!(serde_json::to_value(&id).unwrap(), serde_json::json!("doc-1"));

        let parsed: AppointmentId = serde_json::from_str("\"apt-9\"").unwrap();
        assert_eq!(parsed.as_str(), "apt-9");
        assert_eq!(parsed.to_string(), "apt-9");
    }
}
