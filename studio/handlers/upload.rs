use std::io::{Cursor, Read};
use tiny_http::{Request, Response};

use grayscan::loader::{self, ImageCandidate, MAX_IMAGE_BYTES};

use crate::state::{FlashMessage, SharedState};
use crate::util::multipart::{extract_boundary, multipart_extract_file};

// ---------------------------------------------------------------------------
// POST /upload
// ---------------------------------------------------------------------------

/// Accepts the multipart image upload, runs it through the library loader
/// (media-type check + decode) and installs it in the session. Rejections
/// surface as a flash and leave the session untouched.
pub fn handle(request: &mut Request, state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let content_type = request
        .headers()
        .iter()
        .find(|h| h.field.equiv("Content-Type"))
        .map(|h| h.value.as_str().to_owned())
        .unwrap_or_default();

    let boundary = match extract_boundary(&content_type) {
        Some(b) => b,
        None => return flash_error(&state, "Invalid upload request."),
    };

    let mut body: Vec<u8> = Vec::new();
    let _ = request.as_reader().read_to_end(&mut body);

    // Multipart framing adds a few hundred bytes; checking against the
    // loader's cap here stops a hostile body before parsing it.
    if body.len() > MAX_IMAGE_BYTES + 16 * 1024 {
        return flash_error(&state, "The selected file is too large.");
    }

    let part = match multipart_extract_file(&body, &boundary) {
        Some(p) if !p.bytes.is_empty() => p,
        _ => return flash_error(&state, "No file was selected."),
    };

    let candidate = ImageCandidate {
        bytes: part.bytes,
        media_type: part.content_type,
        file_name: part.file_name,
    };

    let decoded = match loader::load(candidate) {
        Ok(d) => d,
        Err(e) => return flash_error(&state, &e.to_string()),
    };

    let file_name = decoded.file_name.clone();
    let mut st = state.lock().unwrap();
    match st.session.load_image(decoded) {
        Ok(()) => {
            st.flash = Some(FlashMessage::success(format!("Loaded {}.", file_name)));
        }
        Err(e) => {
            st.flash = Some(FlashMessage::error(e.to_string()));
        }
    }
    drop(st);

    crate::routes::redirect("/")
}

fn flash_error(state: &SharedState, msg: &str) -> Response<Cursor<Vec<u8>>> {
    let mut st = state.lock().unwrap();
    st.flash = Some(FlashMessage::error(msg));
    drop(st);
    crate::routes::redirect("/")
}
