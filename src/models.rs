use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body the client may post to `/api/auth/signin`.
///
/// Only checked for shape: the upstream receives the credentials from the
/// `Authorization` header, never from these fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SignInRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
}

impl SignInRequest {
    /// Decodes the first JSON value only, like a streaming decoder would:
    /// an empty body or `null` means "no fields" and trailing bytes are ignored.
    pub fn validate_body(body: &[u8]) -> Result<Self, serde_json::Error> {
        let mut values = serde_json::Deserializer::from_slice(body).into_iter::<Option<Self>>();
        match values.next() {
            None => Ok(Self::default()),
            Some(value) => Ok(value?.unwrap_or_default()),
        }
    }
}
