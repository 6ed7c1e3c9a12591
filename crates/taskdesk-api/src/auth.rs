//! # Session Resolution
//!
//! Resolves the acting identity from the two session cookies the browser
//! UI sets at login: `session_user` and `session_admin`, each holding the
//! username. The admin cookie wins when both are present. No session
//! store is consulted; possession of the cookie is the session, as in the
//! original service.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;

use taskdesk_core::{Actor, Role, Username};

use crate::error::AppError;

/// Cookie naming a regular user session.
pub const USER_COOKIE: &str = "session_user";

/// Cookie naming an admin session.
pub const ADMIN_COOKIE: &str = "session_admin";

/// Resolve an actor from the two session cookie values.
///
/// The admin cookie wins when both are present. An unusable cookie value
/// (blank username) counts as that cookie being absent.
pub fn resolve_actor(user: Option<&str>, admin: Option<&str>) -> Option<Actor> {
    if let Some(name) = admin {
        if let Ok(username) = Username::new(name) {
            return Some(Actor::new(username, Role::Admin));
        }
    }
    if let Some(name) = user {
        if let Ok(username) = Username::new(name) {
            return Some(Actor::new(username, Role::User));
        }
    }
    None
}

/// Extractor yielding the actor behind the request's session cookies.
///
/// Rejects with 401 when neither cookie carries a usable username.
#[derive(Debug, Clone)]
pub struct SessionActor(pub Actor);

impl<S> FromRequestParts<S> for SessionActor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let user = jar.get(USER_COOKIE).map(|c| c.value().to_string());
        let admin = jar.get(ADMIN_COOKIE).map(|c| c.value().to_string());
        resolve_actor(user.as_deref(), admin.as_deref())
            .map(Self)
            .ok_or_else(|| AppError::Unauthorized("authentication required".to_string()))
    }
}
