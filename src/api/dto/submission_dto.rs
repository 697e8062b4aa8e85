//! Request body for `POST /api/submissions`.

use std::fmt;

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{MailingAddress, NewSubmission};
use crate::error::PostboxError;

/// Request body for `POST /api/submissions`.
///
/// The body must be a JSON object whose `address` is a string; arrays,
/// scalars and a missing or mistyped `address` fail deserialization.
/// Unknown keys are ignored. Emptiness is checked by
/// [`CreateSubmissionRequest::into_new_submission`].
#[derive(Debug, ToSchema)]
pub struct CreateSubmissionRequest {
    /// Free-form address text. Stored verbatim.
    #[schema(example = "123 Main St")]
    pub address: String,
}

impl CreateSubmissionRequest {
    /// Converts the wire body into a validated domain value.
    ///
    /// # Errors
    ///
    /// Returns [`PostboxError::Validation`] if `address` is empty.
    pub fn into_new_submission(self) -> Result<NewSubmission, PostboxError> {
        MailingAddress::parse(self.address).map(NewSubmission::new)
    }
}

impl<'de> Deserialize<'de> for CreateSubmissionRequest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RequestVisitor)
    }
}

/// Accepts only the map form; serde's derived struct visitor would also
/// take a positional sequence.
struct RequestVisitor;

impl<'de> Visitor<'de> for RequestVisitor {
    type Value = CreateSubmissionRequest;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object with a string `address` field")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut address: Option<String> = None;
        while let Some(key) = map.next_key::<String>()? {
            if key == "address" {
                if address.is_some() {
                    return Err(de::Error::duplicate_field("address"));
                }
                address = Some(map.next_value()?);
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        let address = address.ok_or_else(|| de::Error::missing_field("address"))?;
        Ok(CreateSubmissionRequest { address })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_address() {
        let Ok(req) = serde_json::from_str::<CreateSubmissionRequest>(r#"{"address":"123 Main St"}"#)
        else {
            panic!("valid body rejected");
        };
        let Ok(new) = req.into_new_submission() else {
            panic!("valid address rejected");
        };
        assert_eq!(new.address.as_str(), "123 Main St");
    }

    #[test]
    fn rejects_missing_and_mistyped_address() {
        assert!(serde_json::from_str::<CreateSubmissionRequest>("{}").is_err());
        assert!(serde_json::from_str::<CreateSubmissionRequest>(r#"{"address":42}"#).is_err());
        assert!(serde_json::from_str::<CreateSubmissionRequest>(r#"{"address":null}"#).is_err());
        assert!(
            serde_json::from_str::<CreateSubmissionRequest>(r#"{"address":"a","address":"b"}"#)
                .is_err()
        );
    }

    #[test]
    fn rejects_positional_array_form() {
        assert!(serde_json::from_str::<CreateSubmissionRequest>(r#"["123 Main St"]"#).is_err());
        assert!(serde_json::from_str::<CreateSubmissionRequest>(r#""123 Main St""#).is_err());
    }

    #[test]
    fn ignores_unknown_keys() {
        let Ok(req) = serde_json::from_str::<CreateSubmissionRequest>(
            r#"{"note":{"nested":[1,2]},"address":"123 Main St"}"#,
        ) else {
            panic!("body with extra keys rejected");
        };
        assert_eq!(req.address, "123 Main St");
    }

    #[test]
    fn empty_address_fails_validation() {
        let req = CreateSubmissionRequest {
            address: String::new(),
        };
        let Err(err) = req.into_new_submission() else {
            panic!("empty address accepted");
        };
        assert_eq!(err.fields(), ["address"]);
    }
}
