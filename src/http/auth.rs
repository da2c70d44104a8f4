//! Bearer-credential extraction.
//!
//! [`AuthUser`] doubles as an axum extractor: any handler that lists it as a
//! parameter only runs for requests carrying a resolvable session token.
//! Missing or malformed credentials reject with `Unauthenticated` (401),
//! which is distinct from the `Forbidden` (403) the gate produces later.

use crate::{
    core::{authz::AuthUser, user::resolve_token},
    errors::Error,
    http::AppState,
};
use axum::{async_trait, extract::FromRequestParts, http::header, http::request::Parts};

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let missing = || Error::Unauthenticated {
            message: "missing bearer credential".to_string(),
        };

        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(missing)?
            .strip_prefix("Bearer ")
            .ok_or_else(missing)?;

        resolve_token(&state.db, token).await
    }
}
