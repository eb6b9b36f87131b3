//! Shared page layout for the public site and the admin area

use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::chrome::{Area, PageChrome};
use crate::config::Config;
use crate::middleware::auth::Visitor;

const TOOLBAR_CSS: &str = r#"
#wpadminbar { background: #1d2327; margin: 0; padding: 0 8px; height: 32px; }
#wpadminbar ul { list-style: none; margin: 0; padding: 0; display: flex; }
#wpadminbar li { display: flex; align-items: center; }
#wpadminbar .ab-item { color: #f0f0f1; display: block; padding: 0 10px; line-height: 32px; text-decoration: none; }
#wpadminbar form { margin: 0; }
#wpadminbar button.ab-item { background: none; border: 0; cursor: pointer; font: inherit; }
"#;

/// Head markup every page gets from site configuration
pub fn site_head(config: &Config) -> Markup {
    PreEscaped(config.site_head_html.clone())
}

/// Render a complete page around `content`
pub fn page(
    config: &Config,
    area: Area,
    title: &str,
    visitor: &Visitor,
    chrome: &PageChrome,
    content: Markup,
) -> Markup {
    let body_class = match area {
        Area::Public => "home",
        Area::Admin => "wp-admin",
    };

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - " (config.site_title) }
                @if visitor.is_authenticated() {
                    style { (PreEscaped(TOOLBAR_CSS)) }
                }
                (site_head(config))
                @for markup in chrome.head() {
                    (markup)
                }
            }
            body class=(body_class) {
                @if visitor.is_authenticated() {
                    (toolbar(config, visitor, chrome))
                }
                main { (content) }
            }
        }
    }
}

fn toolbar(config: &Config, visitor: &Visitor, chrome: &PageChrome) -> Markup {
    html! {
        div id="wpadminbar" {
            ul id="wp-admin-bar-root-default" class="ab-top-menu" {
                li id="wp-admin-bar-site-name" {
                    a class="ab-item" href="/" { (config.site_title) }
                }
                @for node in chrome.toolbar.nodes() {
                    li id=(node.dom_id()) class=[node.class.as_deref()] {
                        a class="ab-item" href=(node.href) { (node.title) }
                    }
                }
                @if let Some(user) = visitor.user() {
                    li id="wp-admin-bar-my-account" {
                        span class="ab-item" { "Howdy, " (user.username) }
                    }
                    li id="wp-admin-bar-logout" {
                        form action="/logout" method="post" {
                            button class="ab-item" type="submit" { "Log Out" }
                        }
                    }
                }
            }
        }
    }
}
