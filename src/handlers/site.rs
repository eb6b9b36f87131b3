//! Public site pages

use axum::{extract::State, http::StatusCode};
use maud::{html, Markup};

use crate::AppState;
use crate::chrome::{Area, PageChrome};
use crate::middleware::auth::Visitor;
use crate::templates::page;

/// Front page
pub async fn home(
    State(state): State<AppState>,
    visitor: Visitor,
    chrome: PageChrome,
) -> Markup {
    let content = html! {
        article class="page" {
            h1 { (state.config.site_title) }
            p { "Welcome! Nothing to see here yet." }
        }
    };

    page(&state.config, Area::Public, "Home", &visitor, &chrome, content)
}

/// Any public path without a route
pub async fn not_found(
    State(state): State<AppState>,
    visitor: Visitor,
    chrome: PageChrome,
) -> (StatusCode, Markup) {
    let content = html! {
        article class="page" {
            h1 { "Page not found" }
            p { a href="/" { "Back to the front page" } }
        }
    };

    (
        StatusCode::NOT_FOUND,
        page(&state.config, Area::Public, "Page not found", &visitor, &chrome, content),
    )
}
