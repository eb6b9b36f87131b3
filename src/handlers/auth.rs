//! Login and logout handlers

use axum::{
    extract::{Query, State},
    http::{header::{LOCATION, SET_COOKIE}, HeaderValue, StatusCode, Uri},
    response::{IntoResponse, Response},
    Form,
};
use argon2::{Argon2, PasswordHash, PasswordVerifier};
use maud::Markup;
use serde::Deserialize;

use crate::{AppState, AppError, AppResult};
use crate::chrome::{Area, PageChrome};
use crate::config::Config;
use crate::handlers::settings::SETTINGS_PATH;
use crate::middleware::auth::{issue_token, Visitor, SESSION_COOKIE};
use crate::templates::{page, render_login};

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub redirect_to: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub log: String,
    pub pwd: String,
    pub redirect_to: Option<String>,
}

/// Login form
pub async fn login_form(
    State(state): State<AppState>,
    Query(query): Query<LoginQuery>,
    visitor: Visitor,
    chrome: PageChrome,
) -> Markup {
    let redirect_to = safe_redirect(query.redirect_to.as_deref());
    page(&state.config, Area::Public, "Log In", &visitor, &chrome, render_login(&redirect_to, false))
}

/// Check credentials and start a session
pub async fn login(
    State(state): State<AppState>,
    visitor: Visitor,
    chrome: PageChrome,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let redirect_to = safe_redirect(form.redirect_to.as_deref());

    match verify_credentials(&state.config, &form.log, &form.pwd) {
        Ok(()) => {}
        Err(AppError::InvalidCredentials) => {
            tracing::warn!("Failed login attempt for '{}'", form.log);
            let body = page(
                &state.config,
                Area::Public,
                "Log In",
                &visitor,
                &chrome,
                render_login(&redirect_to, true),
            );
            return Ok((StatusCode::UNAUTHORIZED, body).into_response());
        }
        Err(e) => return Err(e),
    }

    let token = issue_token(
        &form.log,
        "admin",
        &state.config.jwt_secret,
        state.config.jwt_expiration_hours,
    )?;

    tracing::info!("User logged in: {}", form.log);

    let max_age = state.config.jwt_expiration_hours
        .checked_mul(3600)
        .ok_or_else(|| AppError::InternalError("Session lifetime out of range".to_string()))?;
    let cookie = session_cookie(&state.config, &token, max_age)?;
    see_other(&redirect_to, cookie)
}

/// End the session
pub async fn logout(State(state): State<AppState>) -> AppResult<Response> {
    let cookie = session_cookie(&state.config, "", 0)?;
    see_other("/", cookie)
}

/// 303 to `location` while setting the session cookie
fn see_other(location: &str, cookie: HeaderValue) -> AppResult<Response> {
    let location = HeaderValue::try_from(location)
        .map_err(|_| AppError::ValidationError("Invalid redirect target".to_string()))?;

    Ok((StatusCode::SEE_OTHER, [(LOCATION, location), (SET_COOKIE, cookie)]).into_response())
}

fn verify_credentials(config: &Config, username: &str, password: &str) -> AppResult<()> {
    let Some(stored_hash) = config.admin_password_hash.as_deref() else {
        tracing::warn!("Login disabled: ADMIN_PASSWORD_HASH is not set");
        return Err(AppError::InvalidCredentials);
    };

    if username != config.admin_username {
        return Err(AppError::InvalidCredentials);
    }

    let parsed_hash = PasswordHash::new(stored_hash)
        .map_err(|_| AppError::InternalError("Invalid password hash".to_string()))?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::InvalidCredentials)
}

fn session_cookie(config: &Config, token: &str, max_age_secs: u64) -> AppResult<HeaderValue> {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, token, max_age_secs
    );
    if config.is_production() {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
        .map_err(|e| AppError::InternalError(format!("Invalid session cookie: {}", e)))
}

/// Only same-site paths are accepted as login redirect targets.
///
/// Browsers drop tabs and newlines from a `Location`, so targets with control
/// characters are rejected outright.
fn safe_redirect(target: Option<&str>) -> String {
    match target {
        Some(path) if is_local_path(path) => path.to_string(),
        _ => SETTINGS_PATH.to_string(),
    }
}

fn is_local_path(path: &str) -> bool {
    if !path.starts_with('/')
        || path.starts_with("//")
        || path.contains('\\')
        || path.chars().any(|c| c.is_control())
    {
        return false;
    }

    match path.parse::<Uri>() {
        Ok(uri) => uri.scheme().is_none() && uri.authority().is_none(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::password_hash::{rand_core::OsRng, PasswordHasher, SaltString};
    use axum::body::Body;
    use axum::http::{header::CONTENT_TYPE, Request};
    use tower::ServiceExt;

    fn config_with_password(password: &str) -> Config {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .unwrap()
            .to_string();

        Config {
            admin_password_hash: Some(hash),
            ..crate::tests::test_config()
        }
    }

    #[test]
    fn test_verify_credentials() {
        let config = config_with_password("hunter2");
        assert!(verify_credentials(&config, "admin", "hunter2").is_ok());
        assert!(matches!(
            verify_credentials(&config, "admin", "wrong"),
            Err(AppError::InvalidCredentials)
        ));
        assert!(matches!(
            verify_credentials(&config, "someone", "hunter2"),
            Err(AppError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_login_disabled_without_hash() {
        let config = crate::tests::test_config();
        assert!(verify_credentials(&config, "admin", "anything").is_err());
    }

    #[test]
    fn test_safe_redirect() {
        assert_eq!(safe_redirect(Some("/admin/settings/maintenance")), SETTINGS_PATH);
        assert_eq!(safe_redirect(Some("/?p=1")), "/?p=1");
        assert_eq!(safe_redirect(Some("//evil.example")), SETTINGS_PATH);
        assert_eq!(safe_redirect(Some("https://evil.example")), SETTINGS_PATH);
        assert_eq!(safe_redirect(None), SETTINGS_PATH);
    }

    #[test]
    fn test_control_characters_are_not_redirect_targets() {
        assert_eq!(safe_redirect(Some("/\n")), SETTINGS_PATH);
        assert_eq!(safe_redirect(Some("/\r\nSet-Cookie: x=1")), SETTINGS_PATH);
        assert_eq!(safe_redirect(Some("/\t/evil.example")), SETTINGS_PATH);
        assert_eq!(safe_redirect(Some("/\u{7f}")), SETTINGS_PATH);
    }

    #[test]
    fn test_session_cookie_rejects_invalid_token() {
        let config = crate::tests::test_config();
        assert!(session_cookie(&config, "bad\ntoken", 60).is_err());
        assert_eq!(
            session_cookie(&config, "abc", 60).unwrap(),
            "maintenance_session=abc; Path=/; HttpOnly; SameSite=Lax; Max-Age=60"
        );
    }

    async fn post_login(redirect_to: &str) -> Response {
        let state = AppState {
            config: config_with_password("hunter2"),
            ..crate::tests::test_state()
        };
        let req = Request::builder()
            .method("POST")
            .uri("/login")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(format!("log=admin&pwd=hunter2&redirect_to={}", redirect_to)))
            .unwrap();

        crate::create_router(state).oneshot(req).await.unwrap()
    }

    #[tokio::test]
    async fn test_login_redirect_with_newline_falls_back() {
        let resp = post_login("/%0A").await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers()[LOCATION], SETTINGS_PATH);
        assert!(resp.headers().contains_key(SET_COOKIE));
    }

    #[tokio::test]
    async fn test_login_redirect_with_tab_stays_on_site() {
        let resp = post_login("/%09/evil.example").await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers()[LOCATION], SETTINGS_PATH);
    }

    #[tokio::test]
    async fn test_login_redirects_to_local_target() {
        let resp = post_login("%2F%3Fp%3D1").await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers()[LOCATION], "/?p=1");
    }
}
