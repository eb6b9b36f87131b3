//! Maintenance settings screen handlers

use axum::{
    extract::{Query, State},
    response::Redirect,
    Form,
};
use maud::Markup;
use serde::Deserialize;

use crate::{AppError, AppResult, AppState};
use crate::chrome::{Area, PageChrome};
use crate::middleware::auth::{UserContext, Visitor};
use crate::models::{MaintenanceSettings, SettingsSubmission, OPTION_GROUP};
use crate::templates::{page, render_form};
use crate::templates::settings::PAGE_TITLE;

/// Location of the settings screen in the admin area
pub const SETTINGS_PATH: &str = "/admin/settings/maintenance";

#[derive(Debug, Deserialize)]
pub struct ScreenQuery {
    #[serde(rename = "settings-updated")]
    pub settings_updated: Option<String>,
}

/// Fields posted by the settings form
#[derive(Debug, Deserialize)]
pub struct SettingsForm {
    #[serde(default)]
    pub option_page: String,
    pub wp_simple_maintenance_active: Option<String>,
    pub wp_simple_maintenance_message: Option<String>,
}

/// Render the settings screen
pub async fn show(
    State(state): State<AppState>,
    Query(query): Query<ScreenQuery>,
    visitor: Visitor,
    chrome: PageChrome,
) -> AppResult<Markup> {
    let settings = MaintenanceSettings::load(state.settings.as_ref()).await?;
    let updated = query.settings_updated.as_deref() == Some("true");

    Ok(page(
        &state.config,
        Area::Admin,
        PAGE_TITLE,
        &visitor,
        &chrome,
        render_form(&settings, updated),
    ))
}

/// Sanitize and persist a settings submission
pub async fn save(
    State(state): State<AppState>,
    user: UserContext,
    Form(form): Form<SettingsForm>,
) -> AppResult<Redirect> {
    if form.option_page != OPTION_GROUP {
        return Err(AppError::ValidationError(format!(
            "Unknown settings group '{}'",
            form.option_page
        )));
    }

    let submission = SettingsSubmission {
        active: form.wp_simple_maintenance_active,
        message: form.wp_simple_maintenance_message,
    };
    let settings = MaintenanceSettings::from_submission(&submission, state.sanitizer.as_ref());
    settings.save(state.settings.as_ref()).await?;

    tracing::info!(
        "Maintenance mode {} by {}",
        if settings.active { "enabled" } else { "disabled" },
        user.username
    );

    Ok(Redirect::to(&format!("{}?settings-updated=true", SETTINGS_PATH)))
}
