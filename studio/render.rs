/// Central template renderer for the grayscan studio.
///
/// The studio uses a single HTML template (`studio/assets/studio.html`) with
/// placeholder tokens like `{{TOKEN}}`. This module loads the template at
/// compile time and exposes a `render_page` function that accepts a closure
/// for panel-specific placeholder substitution.
///
/// Placeholders that are global across every render (status line, busy
/// indicator, action button state) are resolved here before calling the
/// closure; placeholders the closure did not replace are blanked to avoid
/// leaking raw `{{TOKEN}}` strings to the browser.

const TEMPLATE: &str = include_str!("assets/studio.html");

/// Renders the full studio page.
///
/// # Arguments
/// - `status`         — text for the pipeline status line
/// - `busy`           — whether the spinner is visible (request in flight)
/// - `action_enabled` — whether the Recognize button is clickable
/// - `fill`           — closure that fills panel-specific placeholders
pub fn render_page<F>(status: &str, busy: bool, action_enabled: bool, fill: F) -> String
where
    F: FnOnce(String) -> String,
{
    let mut html = TEMPLATE.to_owned();

    html = html.replace("{{STATUS}}", &html_escape(status));
    html = html.replace("{{SPINNER_CLASS}}", if busy { "" } else { "hidden" });
    html = html.replace("{{ACTION_DISABLED}}", if action_enabled { "" } else { "disabled" });

    // Let the caller fill panel-specific placeholders.
    html = fill(html);

    // Blank any remaining unfilled placeholders (prevents raw `{{TOKEN}}` in output).
    blank_remaining(html)
}

/// Replaces any `{{UPPERCASE_TOKEN}}` that wasn't already substituted with an
/// empty string. All tokens should be handled by the caller; a missed token
/// should produce a clean page rather than leaking debug info.
fn blank_remaining(mut html: String) -> String {
    while let Some(start) = html.find("{{") {
        if let Some(end) = html[start..].find("}}") {
            let abs_end = start + end + 2;
            html.replace_range(start..abs_end, "");
        } else {
            break;
        }
    }
    html
}

/// Minimal HTML escaping for user-controlled text (file names, recognized
/// text, error messages).
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
