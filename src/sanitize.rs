//! Input sanitizers applied by the settings-save pipeline and at render time

use ammonia::Builder;

/// HTML-safe-subset filter
pub trait Sanitizer: Send + Sync {
    /// Strip disallowed markup; must be idempotent
    fn sanitize(&self, text: &str) -> String;
}

/// Allows the markup normally accepted in post content (formatting, links,
/// lists, tables, images) and drops everything else, including the content of
/// `<script>` and `<style>` elements.
pub struct PostContentSanitizer {
    builder: Builder<'static>,
}

impl PostContentSanitizer {
    pub fn new() -> Self {
        let mut builder = Builder::default();
        // Stored text must read back unchanged, so no rel rewriting on links.
        builder
            .link_rel(None)
            .add_generic_attributes(&["class"]);
        Self { builder }
    }
}

impl Default for PostContentSanitizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Sanitizer for PostContentSanitizer {
    fn sanitize(&self, text: &str) -> String {
        self.builder.clean(text).to_string()
    }
}

/// Coerce a submitted form value to a strict boolean.
///
/// `"false"` and `"0"` (any case) and the empty string are false, any other
/// string is true, a missing field is false.
pub fn sanitize_boolean(value: Option<&str>) -> bool {
    match value {
        None => false,
        Some(raw) => {
            let lowered = raw.to_ascii_lowercase();
            !(lowered.is_empty() || lowered == "false" || lowered == "0")
        }
    }
}
