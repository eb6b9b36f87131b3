//! Authentication middleware

use axum::{
    extract::{State, Request},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    http::header::{AUTHORIZATION, COOKIE},
};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{AppState, AppError, AppResult};

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "maintenance_session";

/// Capability required to view and save site settings
pub const MANAGE_SETTINGS: &str = "manage_settings";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,      // Username
    pub role: String,     // User role
    pub exp: usize,       // Expiration timestamp
    pub iat: usize,       // Issued at
}

/// User context extracted from the session token
#[derive(Debug, Clone)]
pub struct UserContext {
    pub username: String,
    pub role: String,
}

impl UserContext {
    /// Check if user has admin role
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }

    pub fn has_capability(&self, capability: &str) -> bool {
        match capability {
            MANAGE_SETTINGS => self.is_admin(),
            _ => false,
        }
    }
}

/// Who is making the current request
#[derive(Debug, Clone, Default)]
pub enum Visitor {
    #[default]
    Anonymous,
    Authenticated(UserContext),
}

impl Visitor {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Visitor::Authenticated(_))
    }

    pub fn user(&self) -> Option<&UserContext> {
        match self {
            Visitor::Authenticated(user) => Some(user),
            Visitor::Anonymous => None,
        }
    }
}

/// Issue a signed session token
pub fn issue_token(username: &str, role: &str, secret: &str, expiration_hours: u64) -> AppResult<String> {
    let now = Utc::now();
    let exp = i64::try_from(expiration_hours)
        .ok()
        .and_then(Duration::try_hours)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .ok_or_else(|| AppError::InternalError("Session lifetime out of range".to_string()))?;

    let claims = Claims {
        sub: username.to_string(),
        role: role.to_string(),
        exp: exp.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes())
    ).map_err(|e| AppError::InternalError(e.to_string()))
}

/// Decode and validate a session token
pub fn verify_token(token: &str, secret: &str) -> AppResult<UserContext> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default()
    )?;

    Ok(UserContext {
        username: token_data.claims.sub,
        role: token_data.claims.role,
    })
}

/// Middleware: resolve the visitor from the session token.
///
/// Never rejects; a missing, expired or forged token means an anonymous visitor.
pub async fn resolve_visitor(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let visitor = match extract_session_token(&req) {
        Some(token) => match verify_token(&token, &state.config.jwt_secret) {
            Ok(user) => Visitor::Authenticated(user),
            Err(_) => {
                tracing::debug!("Ignoring invalid session token");
                Visitor::Anonymous
            }
        },
        None => Visitor::Anonymous,
    };

    req.extensions_mut().insert(visitor);

    next.run(req).await
}

/// Middleware: require the settings capability.
///
/// Anonymous visitors are sent to the login form; logged-in users without the
/// capability get a generic permission-denied response.
pub async fn require_settings_access(req: Request, next: Next) -> Response {
    let visitor = req.extensions().get::<Visitor>().cloned().unwrap_or_default();

    match visitor {
        Visitor::Anonymous => {
            let target = req
                .uri()
                .path_and_query()
                .map(|pq| pq.as_str().to_string())
                .unwrap_or_else(|| "/".to_string());
            Redirect::to(&format!("/login?redirect_to={}", encode_query_value(&target)))
                .into_response()
        }
        Visitor::Authenticated(user) if !user.has_capability(MANAGE_SETTINGS) => {
            tracing::warn!(
                "Capability '{}' required but user {} has role '{}'",
                MANAGE_SETTINGS, user.username, user.role
            );
            AppError::Forbidden.into_response()
        }
        Visitor::Authenticated(_) => next.run(req).await,
    }
}

/// Session token from the Authorization header or the session cookie
fn extract_session_token(req: &Request) -> Option<String> {
    let bearer = req.headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string());

    bearer.or_else(|| {
        req.headers()
            .get_all(COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == SESSION_COOKIE)
            .map(|(_, value)| value.to_string())
    })
}

/// Percent-encode a value for use inside a query string
fn encode_query_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for b in value.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b'/' => {
                out.push(b as char)
            }
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}

// Implement FromRequestParts for Visitor
#[axum::async_trait]
impl<S> FromRequestParts<S> for Visitor
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Visitor>().cloned().unwrap_or_default())
    }
}

// Implement FromRequestParts for UserContext
#[axum::async_trait]
impl<S> FromRequestParts<S> for UserContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<Visitor>() {
            Some(Visitor::Authenticated(user)) => Ok(user.clone()),
            _ => Err(AppError::Unauthorized),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_token_round_trip() {
        let token = issue_token("alice", "admin", SECRET, 1).unwrap();
        let user = verify_token(&token, SECRET).unwrap();
        assert_eq!(user.username, "alice");
        assert!(user.has_capability(MANAGE_SETTINGS));
    }

    #[test]
    fn test_token_with_wrong_secret_is_rejected() {
        let token = issue_token("alice", "admin", SECRET, 1).unwrap();
        assert!(matches!(verify_token(&token, "other"), Err(AppError::TokenInvalid)));
    }

    #[test]
    fn test_oversized_lifetime_is_an_error() {
        assert!(issue_token("alice", "admin", SECRET, u64::MAX).is_err());
        assert!(issue_token("alice", "admin", SECRET, i64::MAX as u64).is_err());
    }

    #[test]
    fn test_subscriber_cannot_manage_settings() {
        let user = UserContext { username: "bob".into(), role: "subscriber".into() };
        assert!(!user.has_capability(MANAGE_SETTINGS));
    }

    #[test]
    fn test_session_token_from_cookie() {
        let req = axum::http::Request::builder()
            .header(COOKIE, "theme=dark; maintenance_session=abc.def.ghi")
            .body(axum::body::Body::empty())
            .unwrap();
        assert_eq!(extract_session_token(&req).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_encode_query_value() {
        assert_eq!(
            encode_query_value("/admin/settings/maintenance?a=b&c"),
            "/admin/settings/maintenance%3Fa%3Db%26c"
        );
    }
}
