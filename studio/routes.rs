use std::io::Cursor;
use tiny_http::{Header, Method, Request, Response, StatusCode};

use crate::handlers;
use crate::state::SharedState;
use crate::util::form::url_decode;

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

pub fn html_response(body: String) -> Response<Cursor<Vec<u8>>> {
    let bytes = body.into_bytes();
    let len = bytes.len();
    Response::new(
        StatusCode(200),
        vec![Header::from_bytes(b"Content-Type", b"text/html; charset=utf-8").unwrap()],
        Cursor::new(bytes),
        Some(len),
        None,
    )
}

pub fn redirect(location: &str) -> Response<Cursor<Vec<u8>>> {
    Response::new(
        StatusCode(303),
        vec![
            Header::from_bytes(b"Location", location.as_bytes()).unwrap(),
            Header::from_bytes(b"Content-Length", b"0").unwrap(),
        ],
        Cursor::new(Vec::new()),
        Some(0),
        None,
    )
}

/// Serves binary bytes as a downloadable attachment named `filename`.
pub fn attachment_response(bytes: Vec<u8>, filename: &str) -> Response<Cursor<Vec<u8>>> {
    let len = bytes.len();
    let disposition = format!("attachment; filename=\"{}\"", filename);
    Response::new(
        StatusCode(200),
        vec![
            Header::from_bytes(b"Content-Type", b"image/png").unwrap(),
            Header::from_bytes(b"Content-Disposition", disposition.as_bytes()).unwrap(),
        ],
        Cursor::new(bytes),
        Some(len),
        None,
    )
}

pub fn not_found() -> Response<Cursor<Vec<u8>>> {
    let body = b"404 Not Found".to_vec();
    let len = body.len();
    Response::new(
        StatusCode(404),
        vec![Header::from_bytes(b"Content-Type", b"text/plain").unwrap()],
        Cursor::new(body),
        Some(len),
        None,
    )
}

// ---------------------------------------------------------------------------
// Request dispatcher
// ---------------------------------------------------------------------------

/// Dispatches incoming requests to the appropriate handler.
///
/// POST handlers receive a `&mut Request` so that the dispatcher retains
/// ownership and can call `request.respond(response)` at the end.
pub fn dispatch(mut request: Request, state: SharedState) {
    let method = request.method().clone();
    let url = request.url().to_owned();

    let path = match url.find('?') {
        Some(pos) => url[..pos].to_owned(),
        None => url,
    };

    // Grayscale artifact download — dynamic path segment. The segment is
    // percent-encoded by the page builder, so decode before matching it
    // against the remembered filename.
    if method == Method::Get && path.starts_with("/download/") {
        let name = url_decode(path.strip_prefix("/download/").unwrap_or(""));
        let resp = handlers::download::handle(&name, state);
        let _ = request.respond(resp);
        return;
    }

    let response = match (method, path.as_str()) {
        (Method::Get, "/") => handlers::page::handle(state),
        (Method::Post, "/upload") => handlers::upload::handle(&mut request, state),
        (Method::Post, "/recognize") => handlers::recognize::handle(state),
        (Method::Post, "/reset") => handlers::reset::handle(state),
        _ => not_found(),
    };

    let _ = request.respond(response);
}
