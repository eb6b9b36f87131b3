use maud::{html, Markup};

pub fn render_login(redirect_to: &str, failed: bool) -> Markup {
    html! {
        div id="login" {
            h1 { "Log In" }
            @if failed {
                div id="login_error" class="notice notice-error" {
                    p { "The username or password you entered is incorrect." }
                }
            }
            form name="loginform" id="loginform" action="/login" method="post" {
                p {
                    label for="user_login" { "Username" }
                    input type="text" name="log" id="user_login" autocomplete="username" required;
                }
                p {
                    label for="user_pass" { "Password" }
                    input type="password" name="pwd" id="user_pass" autocomplete="current-password" required;
                }
                input type="hidden" name="redirect_to" value=(redirect_to);
                p class="submit" {
                    input type="submit" name="wp-submit" id="wp-submit" class="button button-primary" value="Log In";
                }
            }
        }
    }
}
