//! Maintenance notice document shown to logged-out visitors

use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::sanitize::Sanitizer;

const NOTICE_CSS: &str = r#"
body {
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Oxygen-Sans, Ubuntu, Cantarell, "Helvetica Neue", sans-serif;
    background-color: #f1f1f1;
    color: #333;
    margin: 0;
    padding: 0;
    display: flex;
    align-items: center;
    justify-content: center;
    min-height: 100vh;
}
.maintenance-container {
    background-color: #fff;
    border-radius: 5px;
    box-shadow: 0 1px 3px rgba(0,0,0,0.1);
    padding: 40px;
    text-align: center;
    max-width: 80%;
    width: 600px;
}
h1 {
    color: #23282d;
    margin-top: 0;
}
.dashicons {
    font-size: 48px;
    width: 48px;
    height: 48px;
    color: #dc3232;
}
"#;

/// Render the standalone notice document.
///
/// `head` is emitted verbatim. The message goes through `sanitizer` again even
/// though it was sanitized on save, since the store may have been written by
/// something else.
pub fn render_notice(
    site_title: &str,
    message: &str,
    head: Markup,
    sanitizer: &dyn Sanitizer,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (site_title) " - Maintenance Mode" }
                style { (PreEscaped(NOTICE_CSS)) }
                (head)
            }
            body {
                div class="maintenance-container" {
                    span class="dashicons dashicons-hammer" {}
                    h1 { "Maintenance Mode" }
                    p { (PreEscaped(sanitizer.sanitize(message))) }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sanitize::PostContentSanitizer;

    #[test]
    fn test_title_is_escaped() {
        let doc = render_notice(
            "Tom & <Jerry>",
            "Back soon",
            PreEscaped(String::new()),
            &PostContentSanitizer::new(),
        )
        .into_string();

        assert!(doc.contains("<title>Tom &amp; &lt;Jerry&gt; - Maintenance Mode</title>"));
        assert!(doc.contains("<h1>Maintenance Mode</h1>"));
    }

    #[test]
    fn test_message_is_sanitized_at_render_time() {
        let doc = render_notice(
            "Site",
            "<em>Soon</em><script>alert(1)</script>",
            PreEscaped(String::new()),
            &PostContentSanitizer::new(),
        )
        .into_string();

        assert!(doc.contains("<p><em>Soon</em></p>"));
        assert!(!doc.contains("<script>"));
    }

    #[test]
    fn test_head_is_passed_through() {
        let head = PreEscaped("<link rel=\"icon\" href=\"/favicon.ico\">".to_string());
        let doc = render_notice("Site", "x", head, &PostContentSanitizer::new()).into_string();

        assert!(doc.contains("<link rel=\"icon\" href=\"/favicon.ico\"></head>"));
    }
}
