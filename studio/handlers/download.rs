use std::io::Cursor;
use tiny_http::Response;

use crate::state::SharedState;

// ---------------------------------------------------------------------------
// GET /download/{filename}
// ---------------------------------------------------------------------------

/// Proxies the backend's grayscale artifact as a browser download.
///
/// Only the filename remembered from the last successful recognition is
/// served; with nothing remembered (or a name that does not match) no
/// backend request is issued at all.
pub fn handle(name: &str, state: SharedState) -> Response<Cursor<Vec<u8>>> {
    // Reject empty names and path traversal attempts outright.
    if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
        return crate::routes::not_found();
    }

    let st = state.lock().unwrap();
    let remembered = st.session.download_filename().map(str::to_owned);
    let client = st.client.clone();
    drop(st);

    match remembered {
        Some(ref known) if known == name => match client.fetch_grayscale(name) {
            Ok(bytes) => crate::routes::attachment_response(bytes, name),
            Err(e) => {
                log::error!("grayscale download failed: {e}");
                crate::routes::not_found()
            }
        },
        // A name that is not the remembered artifact is unknown: 404, and no
        // backend request is issued.
        Some(_) => crate::routes::not_found(),
        // Nothing remembered at all: the download control was never rendered,
        // so treat the request as a no-op and go home. No backend request.
        None => crate::routes::redirect("/"),
    }
}
