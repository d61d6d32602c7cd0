//! Change notification — a document was created or updated.
//!
//! Notifications arrive as JSON envelopes whose `detail` object carries the
//! document identity:
//!
//! ```json
//! { "detail": { "document-name": "OpenVPN-Setup", "document-version": "3" } }
//! ```

use serde_json::Value;

use crate::error::DispatchError;

/// Version used when the notification does not name one.
pub const LATEST_VERSION: &str = "$LATEST";

/// A parsed change notification.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeNotification {
    /// Name of the changed document, if the notification carries one.
    pub document_name: Option<String>,
    /// Raw `document-version` value; `None` when absent or `null`.
    ///
    /// Only checked once the document is resolved, so a bad version never
    /// changes how an ignored or nameless notification is classified.
    pub document_version: Option<Value>,
    /// The raw envelope, kept for logging.
    pub envelope: Value,
}

impl ChangeNotification {
    /// Parse a notification from its JSON envelope.
    ///
    /// A missing `detail`, or a missing, `null` or empty `document-name`,
    /// is not a parse failure: it yields `document_name: None`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::MalformedNotification`] when the envelope is
    /// not an object, `detail` is not an object, or `document-name` is
    /// present with a non-string value.
    pub fn from_envelope(envelope: Value) -> Result<Self, DispatchError> {
        let Some(root) = envelope.as_object() else {
            return Err(DispatchError::MalformedNotification(
                "event is not a JSON object".to_string(),
            ));
        };

        let detail = match root.get("detail") {
            None | Some(Value::Null) => None,
            Some(Value::Object(detail)) => Some(detail),
            Some(_) => {
                return Err(DispatchError::MalformedNotification(
                    "`detail` is not an object".to_string(),
                ));
            }
        };

        let document_name = match detail {
            Some(detail) => optional_string(detail.get("document-name"), "document-name")?,
            None => None,
        };
        let document_version = detail
            .and_then(|detail| detail.get("document-version"))
            .filter(|value| !value.is_null())
            .cloned();

        Ok(Self {
            document_name,
            document_version,
            envelope,
        })
    }

    /// The document name.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::MissingDocumentName`] when no name is present.
    pub fn document_name(&self) -> Result<&str, DispatchError> {
        self.document_name
            .as_deref()
            .ok_or(DispatchError::MissingDocumentName)
    }

    /// Resolve the document this notification refers to.
    ///
    /// A missing or empty version falls back to [`LATEST_VERSION`].
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::MissingDocumentName`] when no name is present,
    /// or [`DispatchError::MalformedNotification`] when the version is not a
    /// string.
    pub fn document(&self) -> Result<DocumentRef, DispatchError> {
        let name = self.document_name()?.to_string();
        let version = optional_string(self.document_version.as_ref(), "document-version")?
            .unwrap_or_else(|| LATEST_VERSION.to_string());
        Ok(DocumentRef { name, version })
    }
}

fn optional_string(value: Option<&Value>, field: &str) -> Result<Option<String>, DispatchError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(DispatchError::MalformedNotification(format!(
            "`{field}` is not a string"
        ))),
    }
}

/// Name and version of an automation document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    pub name: String,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn should_parse_name_and_version() {
        let n = ChangeNotification::from_envelope(json!({
            "detail": {"document-name": "OpenVPN-Setup", "document-version": "4"}
        }))
        .unwrap();
        let doc = n.document().unwrap();
        assert_eq!(doc.name, "OpenVPN-Setup");
        assert_eq!(doc.version, "4");
    }

    #[test]
    fn should_default_version_when_absent() {
        let n = ChangeNotification::from_envelope(json!({
            "detail": {"document-name": "OpenVPN-Setup"}
        }))
        .unwrap();
        assert_eq!(n.document().unwrap().version, LATEST_VERSION);
    }

    #[test]
    fn should_default_version_when_null_or_empty() {
        for version in [Value::Null, json!("")] {
            let n = ChangeNotification::from_envelope(json!({
                "detail": {"document-name": "OpenVPN-Setup", "document-version": version}
            }))
            .unwrap();
            assert_eq!(n.document().unwrap().version, LATEST_VERSION);
        }
    }

    #[test]
    fn should_yield_no_name_when_detail_missing() {
        let n = ChangeNotification::from_envelope(json!({"source": "aws.ssm"})).unwrap();
        assert!(n.document_name.is_none());
        assert_eq!(n.document(), Err(DispatchError::MissingDocumentName));
    }

    #[test]
    fn should_yield_no_name_when_name_is_empty() {
        let n = ChangeNotification::from_envelope(json!({"detail": {"document-name": ""}}))
            .unwrap();
        assert!(n.document_name.is_none());
    }

    #[test]
    fn should_reject_non_object_detail() {
        let result = ChangeNotification::from_envelope(json!({"detail": "oops"}));
        assert!(matches!(
            result,
            Err(DispatchError::MalformedNotification(_))
        ));
    }

    #[test]
    fn should_reject_non_string_name() {
        let result = ChangeNotification::from_envelope(json!({"detail": {"document-name": 42}}));
        assert!(matches!(
            result,
            Err(DispatchError::MalformedNotification(msg)) if msg.contains("document-name")
        ));
    }

    #[test]
    fn should_reject_non_object_envelope() {
        let result = ChangeNotification::from_envelope(json!([1, 2, 3]));
        assert!(result.is_err());
    }

    #[test]
    fn should_defer_version_check_until_document_resolved() {
        let n = ChangeNotification::from_envelope(json!({
            "detail": {"document-name": "OpenVPN-Setup", "document-version": 5}
        }))
        .unwrap();
        assert_eq!(n.document_name(), Ok("OpenVPN-Setup"));
        assert!(matches!(
            n.document(),
            Err(DispatchError::MalformedNotification(msg)) if msg.contains("document-version")
        ));
    }

    #[test]
    fn should_report_missing_name_before_bad_version() {
        let n = ChangeNotification::from_envelope(json!({"detail": {"document-version": 5}}))
            .unwrap();
        assert_eq!(n.document(), Err(DispatchError::MissingDocumentName));
    }
}
