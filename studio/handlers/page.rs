use std::io::Cursor;
use tiny_http::Response;

use grayscan::recognize::protocol::encode_data_uri;
use grayscan::session::Session;

use crate::render::{html_escape, render_page};
use crate::state::{FlashKind, FlashMessage, SharedState, StudioState};
use crate::util::form::percent_encode_segment;

// ---------------------------------------------------------------------------
// GET /
// ---------------------------------------------------------------------------

pub fn handle(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut st = state.lock().unwrap();
    let flash = st.take_flash();
    let page = build_page(&st, flash);
    drop(st);

    crate::routes::html_response(page)
}

// ---------------------------------------------------------------------------
// Page builder
// ---------------------------------------------------------------------------

/// Renders the whole studio page from the current session. Every panel is a
/// pure function of session state, so POST handlers can simply redirect back
/// here after mutating it.
pub fn build_page(st: &StudioState, flash: Option<FlashMessage>) -> String {
    let session = &st.session;

    render_page(session.status_line(), session.is_busy(), session.can_recognize(), |tmpl| {
        tmpl.replace("{{FLASH}}", &flash_html(flash.as_ref()))
            .replace("{{IMAGE_PANEL}}", &image_panel(session))
            .replace("{{RESULT_CLASS}}", result_class(session))
            .replace("{{RESULT_TEXT}}", &result_text(session))
            .replace("{{GRAYSCALE_PANEL}}", &grayscale_panel(session))
            .replace("{{DOWNLOAD_SECTION}}", &download_section(session))
    })
}

fn flash_html(flash: Option<&FlashMessage>) -> String {
    match flash {
        Some(f) => {
            let class = match f.kind {
                FlashKind::Success => "flash flash-success",
                FlashKind::Error => "flash flash-error",
            };
            format!(r#"<div class="{}">{}</div>"#, class, html_escape(&f.text))
        }
        None => String::new(),
    }
}

/// The main image panel: the local grayscale preview once a round has been
/// triggered, otherwise the loaded original, otherwise the placeholder.
fn image_panel(session: &Session) -> String {
    if let Some(preview) = session.local_preview() {
        if let Ok(png) = preview.to_png_bytes() {
            return inline_img(&png, "Local grayscale preview");
        }
    }
    if let Some(image) = session.image() {
        return format!(
            r#"<img src="{}" alt="{}">"#,
            encode_data_uri(&image.bytes, &image.media_type),
            html_escape(&image.file_name)
        );
    }
    r#"<div class="image-placeholder">No image selected</div>"#.to_owned()
}

fn result_class(session: &Session) -> &'static str {
    if session.result_text().is_some() { "" } else { "empty" }
}

fn result_text(session: &Session) -> String {
    match session.result_text() {
        Some(text) => html_escape(text),
        None => "No text recognized yet".to_owned(),
    }
}

/// The backend grayscale panel, with its explicit placeholder state.
fn grayscale_panel(session: &Session) -> String {
    match session.backend_grayscale() {
        Some(png) => inline_img(png, "Backend grayscale"),
        None => r#"<div class="image-placeholder">Grayscale will appear here</div>"#.to_owned(),
    }
}

/// The download control is only rendered once a backend artifact exists;
/// with nothing remembered there is no link at all, so clicking cannot issue
/// a request. The href segment is percent-encoded so names with spaces or
/// URL metacharacters survive the round trip back to the dispatcher.
fn download_section(session: &Session) -> String {
    match session.download_filename() {
        Some(name) => format!(
            r#"<a class="btn" href="/download/{}" download="{}">Download grayscale</a>"#,
            percent_encode_segment(name),
            html_escape(name)
        ),
        None => String::new(),
    }
}

fn inline_img(png_bytes: &[u8], alt: &str) -> String {
    format!(
        r#"<img src="{}" alt="{}">"#,
        encode_data_uri(png_bytes, "image/png"),
        alt
    )
}
