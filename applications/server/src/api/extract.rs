/// Request extractors shared by the API handlers
use crate::error::{Result, ServerError};
use axum::extract::{FromRequest, FromRequestParts};
use serde::Deserialize;

/// `Json` whose rejections answer with the usual `{"message"}` body
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ServerError))]
pub struct JsonBody<T>(pub T);

/// `Path` whose rejections (bad UTF-8, wrong arity) answer with `{"message"}`
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ServerError))]
pub struct PathParam<T>(pub T);

/// Body of the create and rename endpoints
#[derive(Debug, Deserialize)]
pub struct NameRequest {
    pub name: Option<String>,
}

impl NameRequest {
    /// The trimmed name, or `BadRequest` if it is missing or blank
    pub fn into_name(self) -> Result<String> {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => Ok(name.to_string()),
            _ => Err(ServerError::BadRequest("name is required".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_names_are_rejected() {
        let missing = NameRequest { name: None };
        assert!(matches!(missing.into_name(), Err(ServerError::BadRequest(_))));

        let blank = NameRequest {
            name: Some("   ".to_string()),
        };
        assert!(blank.into_name().is_err());

        let padded = NameRequest {
            name: Some("  Lobby ".to_string()),
        };
        assert_eq!(padded.into_name().unwrap(), "Lobby");
    }
}
