//! # Comandos Básicos
//! src/commands/basic.rs
//!
//! - `GET /`: 200 sin body
//! - `GET /echo/{text}`: devuelve `{text}` (gzip si el cliente lo acepta)
//! - `GET /user-agent`: devuelve el header `User-Agent`

use log::error;

use crate::compression::{accepts_gzip, gzip};
use crate::config::Config;
use crate::http::{Request, Response, StatusCode};

/// Handler para `/`
pub fn root_handler(_req: &Request, _config: &Config) -> Response {
    Response::new(StatusCode::Ok)
}

/// Handler para `/echo/{text}`
///
/// El texto es el resto del path, tal cual (sin percent-decoding). Si el
/// request trae `Accept-Encoding: gzip` el body va comprimido.
///
/// # Ejemplo de response
/// ```text
/// HTTP/1.1 200 OK
/// Content-Type: text/plain
/// Content-Length: 3
///
/// abc
/// ```
pub fn echo_handler(req: &Request, _config: &Config) -> Response {
    let text = req.path().strip_prefix("/echo/").unwrap_or_default();
    if text.is_empty() {
        return Response::new(StatusCode::NotFound);
    }

    if !accepts_gzip(req) {
        return Response::text(text);
    }

    match gzip(text.as_bytes()) {
        Ok(compressed) => Response::new(StatusCode::Ok)
            .with_header("Content-Type", "text/plain")
            .with_header("Content-Encoding", "gzip")
            .with_body_bytes(compressed),
        Err(e) => {
            error!("Error comprimiendo /echo: {}", e);
            Response::error(StatusCode::InternalServerError, "Compression failed")
        }
    }
}

/// Handler para `/user-agent`
///
/// Sin header `User-Agent` responde con body vacío.
pub fn user_agent_handler(req: &Request, _config: &Config) -> Response {
    Response::text(req.header("User-Agent").unwrap_or_default())
}
