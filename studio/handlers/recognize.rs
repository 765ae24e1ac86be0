use std::io::Cursor;
use tiny_http::Response;

use crate::state::{FlashMessage, SharedState};

// ---------------------------------------------------------------------------
// POST /recognize
// ---------------------------------------------------------------------------

/// Runs one recognition round:
///
/// 1. `begin_recognition` computes the local grayscale preview and hands
///    back the original bytes (the session is now Recognizing — a second
///    trigger is refused until this round settles).
/// 2. The original image goes to the recognition backend. The mutex is not
///    held across the network call, so page loads stay responsive.
/// 3. The reply (or failure) is applied to the session, which clears the
///    busy state on both paths.
pub fn handle(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut st = state.lock().unwrap();
    let pending = match st.session.begin_recognition() {
        Ok(p) => p,
        Err(e) => {
            st.flash = Some(FlashMessage::error(e.to_string()));
            drop(st);
            return crate::routes::redirect("/");
        }
    };
    let client = st.client.clone();
    drop(st);

    let outcome = client.recognize(&pending.bytes, &pending.media_type);

    let mut st = state.lock().unwrap();
    let settled = match outcome {
        Ok(reply) => st.session.complete_recognition(reply),
        Err(e) => {
            log::error!("recognition round failed: {e}");
            st.session.fail_recognition(&e.to_string())
        }
    };
    if let Err(e) = settled {
        // The session was reset while the request was out; the reply is
        // dropped on the floor.
        log::warn!("discarding stale recognition outcome: {e}");
    }
    drop(st);

    crate::routes::redirect("/")
}
