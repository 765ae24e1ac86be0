use std::io::Cursor;
use tiny_http::Response;

use crate::state::SharedState;

// ---------------------------------------------------------------------------
// POST /reset
// ---------------------------------------------------------------------------

/// Unconditionally returns the session to its initial state: no image, no
/// preview, no result, no remembered filename, action disabled.
pub fn handle(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut st = state.lock().unwrap();
    st.session.reset();
    st.flash = None;
    drop(st);

    crate::routes::redirect("/")
}
