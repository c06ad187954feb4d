//! Message template rendering.
//!
//! Only two literal tokens are understood. Each is replaced at most once (its
//! first occurrence); any later occurrence stays in the message verbatim.
//! Substitution is literal, so `$` or `\` in alert data carry no meaning.

/// Token replaced with the stream title.
pub const STREAM_NAME_TOKEN: &str = "<name>";

/// Token replaced with the alert result description.
pub const DESCRIPTION_TOKEN: &str = "<description>";

/// Template offered as the field default.
pub const DEFAULT_MESSAGE_TEMPLATE: &str = "Stream <<name>> alert: <description>";

/// Render `template` for one alert.
///
/// The stream title is substituted first, and the description is then looked
/// up in the partially rendered text.
pub fn render(template: &str, stream_title: &str, description: &str) -> String {
    template
        .replacen(STREAM_NAME_TOKEN, stream_title, 1)
        .replacen(DESCRIPTION_TOKEN, description, 1)
}
