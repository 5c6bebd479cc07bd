//! # Módulo HTTP
//! src/http/mod.rs
//!
//! Motor de mensajes HTTP/1.1 implementado desde cero. Lo usan tanto el
//! servidor (requests entrantes) como el cliente (requests salientes y sus
//! responses):
//!
//! - Framing de mensajes sobre un stream de bytes (`frame`)
//! - Parsing de requests y responses (`message`, `request`, `response`)
//! - Decodificación de bodies chunked (`chunked`)
//! - Headers y query parameters ordenados (`headers`, `params`)
//! - Serialización a buffers de capacidad fija (`wire`)
//!
//! ### Flujo entrante
//!
//! ```text
//! socket -> FrameReader -> Frame -> Request::parse -> Router
//! ```
//!
//! ### Flujo saliente
//!
//! ```text
//! Request (setters) -> serialize -> socket -> FrameReader -> Response::parse
//! ```

pub mod chunked;
pub mod frame;
pub mod headers;
pub mod message;
pub mod method;
pub mod params;
pub mod request;
pub mod response;
pub mod status;
pub mod util;
pub mod wire;

// Re-exportamos los tipos principales para facilitar su uso
// Esto permite usar `http::Request` en vez de `http::request::Request`
pub use frame::{Frame, FrameError, FrameReader, MAX_FRAME_SIZE};
pub use headers::{Header, Headers};
pub use message::ParseError;
pub use method::Method;
pub use params::{Param, Params};
pub use request::{Request, MAX_MESSAGE_SIZE};
pub use response::Response;
pub use status::StatusCode;
pub use wire::SerializeError;
