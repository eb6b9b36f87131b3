//! Maintenance gate
//!
//! Runs in front of every public page view. Logged-out visitors get the
//! notice document with a 503 while maintenance mode is on; logged-in
//! visitors get the normal page plus a toolbar indicator.

use axum::{
    extract::{State, Request},
    middleware::Next,
    response::{IntoResponse, Response},
    http::{header, HeaderValue, StatusCode},
};
use maud::{html, PreEscaped};

use crate::AppState;
use crate::chrome::{PageChrome, ToolbarNode};
use crate::handlers::settings::SETTINGS_PATH;
use crate::middleware::auth::Visitor;
use crate::models::MaintenanceSettings;
use crate::templates::{render_notice, site_head};

/// Toolbar node id of the indicator
pub const NOTICE_NODE_ID: &str = "wp-simple-maintenance-notice";

/// Seconds clients are asked to wait before retrying
pub const RETRY_AFTER_SECS: u32 = 3600;

const INDICATOR_CSS: &str = r#"
#wp-admin-bar-wp-simple-maintenance-notice {
    background-color: #dc3232 !important;
    color: #fff !important;
    font-weight: bold;
}
#wp-admin-bar-wp-simple-maintenance-notice .ab-item {
    color: #fff !important;
}
"#;

/// Outcome of the gate for one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateAction {
    /// Serve the page unmodified
    Continue,
    /// Serve the page and flag maintenance mode in the toolbar
    ShowIndicator,
    /// Replace the page with the notice document
    Halt,
}

pub fn evaluate(settings: &MaintenanceSettings, visitor: &Visitor) -> GateAction {
    if !settings.active {
        return GateAction::Continue;
    }

    if visitor.is_authenticated() {
        GateAction::ShowIndicator
    } else {
        GateAction::Halt
    }
}

/// Add the toolbar entry and its stylesheet to the page chrome
pub fn apply_indicator(chrome: &mut PageChrome) {
    chrome.toolbar.add_node(ToolbarNode {
        id: NOTICE_NODE_ID.to_string(),
        title: "Maintenance Mode Active".to_string(),
        href: SETTINGS_PATH.to_string(),
        class: Some(NOTICE_NODE_ID.to_string()),
    });
    chrome.push_head(html! { style { (PreEscaped(INDICATOR_CSS)) } });
}

/// Middleware: gate public page views
pub async fn maintenance_gate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let settings = MaintenanceSettings::load_or_default(state.settings.as_ref()).await;
    let visitor = req.extensions().get::<Visitor>().cloned().unwrap_or_default();

    match evaluate(&settings, &visitor) {
        GateAction::Continue => next.run(req).await,
        GateAction::ShowIndicator => {
            with_indicator(&mut req);
            next.run(req).await
        }
        GateAction::Halt => {
            tracing::debug!("Maintenance mode: serving notice for {}", req.uri().path());
            notice_response(&state, &settings)
        }
    }
}

/// Middleware: indicator only, for the admin area
pub async fn maintenance_indicator(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let settings = MaintenanceSettings::load_or_default(state.settings.as_ref()).await;
    let visitor = req.extensions().get::<Visitor>().cloned().unwrap_or_default();

    if evaluate(&settings, &visitor) == GateAction::ShowIndicator {
        with_indicator(&mut req);
    }

    next.run(req).await
}

fn with_indicator(req: &mut Request) {
    let mut chrome = req.extensions().get::<PageChrome>().cloned().unwrap_or_default();
    apply_indicator(&mut chrome);
    req.extensions_mut().insert(chrome);
}

fn notice_response(state: &AppState, settings: &MaintenanceSettings) -> Response {
    let document = render_notice(
        &state.config.site_title,
        &settings.message,
        site_head(&state.config),
        state.sanitizer.as_ref(),
    );

    (
        StatusCode::SERVICE_UNAVAILABLE,
        [
            (header::RETRY_AFTER, HeaderValue::from(RETRY_AFTER_SECS)),
            (header::CONTENT_TYPE, HeaderValue::from_static("text/html; charset=utf-8")),
        ],
        document.into_string(),
    )
        .into_response()
}
