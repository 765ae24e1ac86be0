/// grayscan Studio
///
/// A browser front-end for image-to-text recognition. Served by a
/// synchronous tiny_http server; no JavaScript frameworks required.
///
/// Run with:
///   cargo run --bin studio
/// Then open http://127.0.0.1:7878
///
/// Pipeline: pick or drop an image > local grayscale preview > the original
/// is sent to the recognition backend > recognized text and the backend's
/// grayscale rendition come back, with a download control for the latter.
///
/// Configuration (environment):
///   GRAYSCAN_ADDR    — bind address, default 127.0.0.1:7878
///   GRAYSCAN_BACKEND — recognition backend base URL, default
///                      http://127.0.0.1:5000

mod handlers;
mod render;
mod routes;
mod state;
mod util;

use std::sync::{Arc, Mutex};
use tiny_http::Server;

use state::StudioState;

const DEFAULT_ADDR: &str = "127.0.0.1:7878";
const DEFAULT_BACKEND: &str = "http://127.0.0.1:5000";

fn main() {
    env_logger::init();

    let addr = std::env::var("GRAYSCAN_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_owned());
    let backend =
        std::env::var("GRAYSCAN_BACKEND").unwrap_or_else(|_| DEFAULT_BACKEND.to_owned());

    let server = match Server::http(&addr) {
        Ok(s) => s,
        Err(e) => {
            log::error!("could not bind {addr}: {e}");
            std::process::exit(1);
        }
    };

    let shared_state = Arc::new(Mutex::new(StudioState::new(&backend)));

    println!("╔══════════════════════════════════════════════╗");
    println!("║          grayscan Studio                     ║");
    println!("╠══════════════════════════════════════════════╣");
    println!("║  Open in your browser:                       ║");
    println!("║  http://{:<36}║", addr);
    println!("╠══════════════════════════════════════════════╣");
    println!("║  Recognition backend:                        ║");
    println!("║  {:<44}║", backend);
    println!("╚══════════════════════════════════════════════╝");

    // Each request is dispatched on its own thread so a recognition round
    // (which blocks on the backend for its whole duration) does not stall
    // regular page loads and form submissions.
    for request in server.incoming_requests() {
        let state_clone = shared_state.clone();
        std::thread::spawn(move || {
            routes::dispatch(request, state_clone);
        });
    }
}
