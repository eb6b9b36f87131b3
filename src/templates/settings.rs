//! Maintenance settings screen

use maud::{html, Markup};

use crate::handlers::settings::SETTINGS_PATH;
use crate::models::{MaintenanceSettings, ACTIVE_KEY, MESSAGE_KEY, OPTION_GROUP};

pub const PAGE_TITLE: &str = "Maintenance Mode Settings";

/// Settings form bound to the current values
pub fn render_form(settings: &MaintenanceSettings, updated: bool) -> Markup {
    html! {
        div class="wrap" {
            h1 { (PAGE_TITLE) }
            @if updated {
                div id="setting-error-settings_updated" class="notice notice-success settings-error" {
                    p { strong { "Settings saved." } }
                }
            }
            form action=(SETTINGS_PATH) method="post" {
                input type="hidden" name="option_page" value=(OPTION_GROUP);

                h2 { "Maintenance Mode Settings" }
                p {
                    "Configure your maintenance mode settings. When enabled, "
                    "logged-out users will see a maintenance page."
                }

                table class="form-table" role="presentation" {
                    tbody {
                        tr {
                            th scope="row" { "Enable Maintenance Mode" }
                            td {
                                label for=(ACTIVE_KEY) {
                                    input type="checkbox" id=(ACTIVE_KEY) name=(ACTIVE_KEY)
                                        value="1" checked[settings.active];
                                    " Enable maintenance mode"
                                }
                            }
                        }
                        tr {
                            th scope="row" { "Maintenance Message" }
                            td {
                                textarea id=(MESSAGE_KEY) name=(MESSAGE_KEY) rows="4" cols="50"
                                    class="large-text" { (settings.message) }
                            }
                        }
                    }
                }

                p class="submit" {
                    input type="submit" name="submit" id="submit"
                        class="button button-primary" value="Save Settings";
                }
            }
        }
    }
}
