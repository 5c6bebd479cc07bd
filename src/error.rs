//! # Errores
//! src/error.rs
//!
//! `Error` agrupa todo lo que puede fallar al leer, parsear o enviar un
//! mensaje. Quien llama normalmente solo necesita `kind()`:
//!
//! | Kind            | Cuándo                                      |
//! |-----------------|---------------------------------------------|
//! | `Io`            | socket, timeout, conexión cerrada, cancelado |
//! | `InvalidMethod` | método fuera de `Method`                    |
//! | `Memory`        | falló una reserva de memoria                |
//! | `Request`       | framing, parsing o serialización            |

use std::collections::TryReserveError;
use std::io;

use thiserror::Error;

use crate::http::chunked::ChunkError;
use crate::http::frame::FrameError;
use crate::http::message::ParseError;
use crate::http::wire::SerializeError;

/// Error general del crate
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// EOF antes de tener un mensaje completo
    #[error("connection closed with {buffered} bytes of an incomplete message")]
    ConnectionClosed { buffered: usize },

    #[error("framing error: {0}")]
    Frame(#[from] FrameError),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("chunked body error: {0}")]
    Chunked(#[from] ChunkError),

    #[error("serialization error: {0}")]
    Serialize(#[from] SerializeError),

    #[error("memory allocation failed: {0}")]
    Memory(#[from] TryReserveError),

    /// `send_request` sin header `Host` de donde sacar la dirección
    #[error("request has no Host header")]
    MissingHost,

    /// El request en segundo plano fue cancelado
    #[error("request was cancelled")]
    Cancelled,
}

/// Categorías que ven los llamadores
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    InvalidMethod,
    Memory,
    Request,
}

impl Error {
    /// Clasifica el error en una de las cuatro categorías
    ///
    /// # Ejemplo
    /// ```
    /// use expresso::{Error, ErrorKind};
    /// use expresso::http::Request;
    ///
    /// let err: Error = Request::new().set_method("TRACE").unwrap_err().into();
    /// assert_eq!(err.kind(), ErrorKind::InvalidMethod);
    /// ```
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io(_) | Error::ConnectionClosed { .. } | Error::Cancelled => ErrorKind::Io,
            Error::Memory(_) | Error::Chunked(ChunkError::Memory(_)) => ErrorKind::Memory,
            Error::Parse(ParseError::InvalidMethod(_)) => ErrorKind::InvalidMethod,
            Error::Parse(ParseError::Chunked(ChunkError::Memory(_))) => ErrorKind::Memory,
            _ => ErrorKind::Request,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
