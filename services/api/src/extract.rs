//! Request extractors for the API boundary
//!
//! Group creation, message sending, and mood recording are served as form
//! data by the original clients while the test harness sends JSON for some
//! of them. `FormFields` accepts multipart, urlencoded, and JSON object
//! bodies and normalizes scalar fields to strings so handlers work on
//! structured values regardless of the wire encoding. `JsonBody` wraps
//! typed JSON extraction so a malformed body produces the same error shape
//! as every other validation failure.

use axum::{
    Form, Json, RequestExt, async_trait,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
};
use std::collections::HashMap;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::ApiError;

/// Typed JSON body that rejects with the standard error shape.
///
/// Axum's own rejection for `Json<T>` is a plain-text response; routing it
/// through `ApiError::Validation` keeps the `kind`/`error` body uniform
/// across every endpoint.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: serde::de::DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::Validation(e.body_text()))?;
        Ok(Self(value))
    }
}

/// Scalar form fields keyed by name
#[derive(Debug, Default)]
pub struct FormFields(pub HashMap<String, String>);

#[async_trait]
impl<S> FromRequest<S> for FormFields
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let mut multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| ApiError::Validation(format!("Invalid multipart body: {e}")))?;

            let mut fields = HashMap::new();
            while let Some(field) = multipart
                .next_field()
                .await
                .map_err(|e| ApiError::Validation(format!("Invalid multipart body: {e}")))?
            {
                // File parts are served from /uploads by the deployment;
                // this API only consumes scalar fields.
                if field.file_name().is_some() {
                    continue;
                }
                let name = match field.name() {
                    Some(name) => name.to_string(),
                    None => continue,
                };
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::Validation(format!("Invalid multipart body: {e}")))?;
                fields.insert(name, value);
            }
            Ok(FormFields(fields))
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(fields) = req
                .extract::<Form<HashMap<String, String>>, _>()
                .await
                .map_err(|e| ApiError::Validation(format!("Invalid form body: {e}")))?;
            Ok(FormFields(fields))
        } else {
            let Json(value) = req
                .extract::<Json<serde_json::Value>, _>()
                .await
                .map_err(|e| ApiError::Validation(format!("Invalid JSON body: {e}")))?;
            FormFields::from_json_object(value)
        }
    }
}

impl FormFields {
    fn from_json_object(value: serde_json::Value) -> Result<Self, ApiError> {
        let object = value
            .as_object()
            .ok_or_else(|| ApiError::Validation("Expected a JSON object".to_string()))?;

        let mut fields = HashMap::new();
        for (name, value) in object {
            let flat = match value {
                serde_json::Value::String(s) => s.clone(),
                serde_json::Value::Bool(b) => b.to_string(),
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Null => continue,
                _ => {
                    return Err(ApiError::Validation(format!(
                        "Field '{name}' must be a scalar value"
                    )));
                }
            };
            fields.insert(name.clone(), flat);
        }
        Ok(FormFields(fields))
    }

    /// A field that must be present and non-empty
    pub fn required(&self, name: &str) -> Result<String, ApiError> {
        match self.0.get(name).map(|v| v.trim()) {
            Some(value) if !value.is_empty() => Ok(value.to_string()),
            _ => Err(ApiError::Validation(format!("Field '{name}' is required"))),
        }
    }

    /// A field that may be absent or empty
    pub fn optional(&self, name: &str) -> Option<String> {
        self.0
            .get(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// An optional boolean field; accepts true/false in any case plus 1/0
    pub fn bool_or(&self, name: &str, default: bool) -> Result<bool, ApiError> {
        match self.optional(name) {
            None => Ok(default),
            Some(raw) => match raw.to_ascii_lowercase().as_str() {
                "true" | "1" => Ok(true),
                "false" | "0" => Ok(false),
                _ => Err(ApiError::Validation(format!(
                    "Field '{name}' must be a boolean"
                ))),
            },
        }
    }

    /// An optional UUID field
    pub fn optional_uuid(&self, name: &str) -> Result<Option<Uuid>, ApiError> {
        self.optional(name)
            .map(|raw| {
                Uuid::from_str(&raw)
                    .map_err(|_| ApiError::Validation(format!("Field '{name}' must be a UUID")))
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request as HttpRequest;

    fn fields_of(pairs: &[(&str, &str)]) -> FormFields {
        FormFields(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_required_and_optional() {
        let fields = fields_of(&[("mood", "happy"), ("emoji", " "), ("note", "  hi ")]);
        assert_eq!(fields.required("mood").unwrap(), "happy");
        assert!(fields.required("emoji").is_err());
        assert_eq!(fields.optional("note"), Some("hi".to_string()));
        assert_eq!(fields.optional("missing"), None);
    }

    #[test]
    fn test_bool_parsing() {
        let fields = fields_of(&[("a", "True"), ("b", "false"), ("c", "1"), ("d", "maybe")]);
        assert!(fields.bool_or("a", false).unwrap());
        assert!(!fields.bool_or("b", true).unwrap());
        assert!(fields.bool_or("c", false).unwrap());
        assert!(fields.bool_or("d", false).is_err());
        assert!(fields.bool_or("missing", true).unwrap());
    }

    #[test]
    fn test_uuid_parsing() {
        let id = Uuid::new_v4();
        let fields = fields_of(&[("group_id", &id.to_string()), ("bad", "nope")]);
        assert_eq!(fields.optional_uuid("group_id").unwrap(), Some(id));
        assert!(fields.optional_uuid("bad").is_err());
        assert_eq!(fields.optional_uuid("missing").unwrap(), None);
    }

    #[test]
    fn test_json_object_flattening() {
        let fields = FormFields::from_json_object(serde_json::json!({
            "name": "Test Support Group",
            "is_public": true,
            "count": 3,
            "skip": null,
        }))
        .unwrap();
        assert_eq!(fields.required("name").unwrap(), "Test Support Group");
        assert!(fields.bool_or("is_public", false).unwrap());
        assert_eq!(fields.optional("count"), Some("3".to_string()));
        assert_eq!(fields.optional("skip"), None);

        assert!(FormFields::from_json_object(serde_json::json!(["a"])).is_err());
        assert!(FormFields::from_json_object(serde_json::json!({"x": {"y": 1}})).is_err());
    }

    #[tokio::test]
    async fn test_urlencoded_body() {
        let req = HttpRequest::builder()
            .method("POST")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("mood=happy&emoji=%F0%9F%98%8A"))
            .unwrap();

        let fields = FormFields::from_request(req, &()).await.unwrap();
        assert_eq!(fields.required("mood").unwrap(), "happy");
        assert_eq!(fields.optional("emoji"), Some("😊".to_string()));
    }

    #[tokio::test]
    async fn test_typed_json_rejection_maps_to_validation() {
        #[derive(serde::Deserialize)]
        struct Payload {
            #[allow(dead_code)]
            mood: String,
        }

        let req = HttpRequest::builder()
            .method("POST")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"mood": 7}"#))
            .unwrap();

        let err = JsonBody::<Payload>::from_request(req, &())
            .await
            .err()
            .unwrap();
        assert_eq!(err.kind(), "validation");

        let req = HttpRequest::builder()
            .method("POST")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let err = JsonBody::<Payload>::from_request(req, &())
            .await
            .err()
            .unwrap();
        assert_eq!(err.kind(), "validation");
    }

    #[tokio::test]
    async fn test_json_body() {
        let req = HttpRequest::builder()
            .method("POST")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"content": "hello", "group_id": null}"#))
            .unwrap();

        let fields = FormFields::from_request(req, &()).await.unwrap();
        assert_eq!(fields.required("content").unwrap(), "hello");
        assert_eq!(fields.optional_uuid("group_id").unwrap(), None);
    }
}
