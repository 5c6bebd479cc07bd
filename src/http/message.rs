//! # Parsing común de mensajes HTTP/1.1
//! src/http/message.rs
//!
//! Requests y responses comparten la misma estructura:
//!
//! ```text
//! START-LINE\r\n
//! Header-Name: Header-Value\r\n
//! \r\n
//! body...
//! ```
//!
//! Este módulo separa la start line, los headers y los bytes del body.
//! La interpretación de la start line la hace `request.rs` o `response.rs`.

use thiserror::Error;

use super::chunked::ChunkError;
use super::headers::Headers;
use super::util::{contains_ignore_case, find_bytes, CRLF, HEAD_TERMINATOR};

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Mensaje vacío
    #[error("empty message")]
    EmptyMessage,

    /// No aparece `\r\n\r\n` al final de los headers
    #[error("missing blank line after headers")]
    MissingTerminator,

    /// Los headers no son UTF-8 válido
    #[error("message head is not valid UTF-8")]
    NotUtf8,

    /// Formato inválido de la request line
    #[error("invalid request line: {0:?}")]
    InvalidRequestLine(String),

    /// Formato inválido de la status line
    #[error("invalid status line: {0:?}")]
    InvalidStatusLine(String),

    /// Método HTTP no soportado
    #[error("invalid HTTP method: {0}")]
    InvalidMethod(String),

    /// Versión HTTP que no empieza con `HTTP/`
    #[error("invalid HTTP version: {0}")]
    InvalidVersion(String),

    /// Header malformado
    #[error("invalid header: {0:?}")]
    InvalidHeader(String),

    /// URL con espacios, saltos de línea o vacía
    #[error("invalid URL: {0:?}")]
    InvalidUrl(String),

    /// Query parameter que rompería la request line
    #[error("invalid query parameter: {0:?}")]
    InvalidParam(String),

    #[error("invalid Content-Length: {0:?}")]
    InvalidContentLength(String),

    /// El frame tiene menos bytes de body que los declarados
    #[error("body truncated: expected {expected} bytes, got {actual}")]
    TruncatedBody { expected: usize, actual: usize },

    #[error("unsupported Transfer-Encoding: {0}")]
    UnsupportedTransferEncoding(String),

    #[error("chunked body: {0}")]
    Chunked(#[from] ChunkError),
}

/// Cabecera de un mensaje ya separada del body
#[derive(Debug)]
pub(crate) struct Head<'a> {
    pub start_line: &'a str,
    pub headers: Headers,
    pub body: &'a [u8],
}

/// Separa start line, headers y body de un frame completo
pub(crate) fn split_head(frame: &[u8]) -> Result<Head<'_>, ParseError> {
    if frame.is_empty() {
        return Err(ParseError::EmptyMessage);
    }

    let head_len = find_bytes(frame, HEAD_TERMINATOR).ok_or(ParseError::MissingTerminator)?;
    let head = std::str::from_utf8(&frame[..head_len]).map_err(|_| ParseError::NotUtf8)?;

    // split siempre produce al menos un elemento
    let mut lines = head.split("\r\n");
    let start_line = lines.next().unwrap_or_default();

    let mut headers = Headers::new();
    for line in lines {
        let (key, value) = parse_header_line(line)?;
        headers.push(key, value);
    }

    Ok(Head {
        start_line,
        headers,
        body: &frame[head_len + HEAD_TERMINATOR.len()..],
    })
}

/// Parsea una línea `Name: Value`
///
/// El valor se toma tal cual, quitando solo el espacio del separador `: `.
fn parse_header_line(line: &str) -> Result<(&str, &str), ParseError> {
    match line.split_once(':') {
        Some((key, value)) if !key.is_empty() && !key.contains(' ') => {
            Ok((key, value.strip_prefix(' ').unwrap_or(value)))
        }
        _ => Err(ParseError::InvalidHeader(line.to_string())),
    }
}

/// Valor numérico de un `Content-Length` (solo dígitos decimales)
pub(crate) fn parse_content_length(value: &str) -> Option<usize> {
    let digits = value.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// `Content-Length` declarado en los headers (primera coincidencia)
pub(crate) fn content_length(headers: &Headers) -> Result<Option<usize>, ParseError> {
    match headers.get("Content-Length") {
        Some(value) => parse_content_length(value)
            .map(Some)
            .ok_or_else(|| ParseError::InvalidContentLength(value.to_string())),
        None => Ok(None),
    }
}

/// Indica si los headers declaran `Transfer-Encoding: chunked`
pub(crate) fn is_chunked(headers: &Headers) -> bool {
    headers
        .get("Transfer-Encoding")
        .map(|value| contains_ignore_case(value, "chunked"))
        .unwrap_or(false)
}

/// Extrae exactamente `Content-Length` bytes del body
///
/// Sin `Content-Length` el mensaje no tiene body (`None`).
pub(crate) fn sized_body(headers: &Headers, raw: &[u8]) -> Result<Option<Vec<u8>>, ParseError> {
    let expected = match content_length(headers)? {
        Some(len) => len,
        None => return Ok(None),
    };

    if raw.len() < expected {
        return Err(ParseError::TruncatedBody {
            expected,
            actual: raw.len(),
        });
    }

    Ok(Some(raw[..expected].to_vec()))
}

/// Start line cruda de un frame, para los mensajes de log
pub(crate) fn start_line_of(frame: &[u8]) -> &[u8] {
    match find_bytes(frame, CRLF) {
        Some(end) => &frame[..end],
        None => frame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_head_without_headers() {
        let head = split_head(b"GET / HTTP/1.1\r\n\r\n").unwrap();
        assert_eq!(head.start_line, "GET / HTTP/1.1");
        assert!(head.headers.is_empty());
        assert!(head.body.is_empty());
    }

    #[test]
    fn test_split_head_with_headers_and_body() {
        let head = split_head(b"POST /x HTTP/1.1\r\nHost: h\r\nX-Empty:\r\n\r\nabc").unwrap();
        assert_eq!(head.headers.get("Host"), Some("h"));
        assert_eq!(head.headers.get("X-Empty"), Some(""));
        assert_eq!(head.body, b"abc");
    }

    #[test]
    fn test_header_value_whitespace_is_preserved() {
        let head = split_head(b"GET / HTTP/1.1\r\nX-Pad:   spaced  \r\n\r\n").unwrap();
        assert_eq!(head.headers.get("X-Pad"), Some("  spaced  "));
    }

    #[test]
    fn test_header_value_may_contain_colon() {
        let head = split_head(b"GET / HTTP/1.1\r\nHost: localhost:8080\r\n\r\n").unwrap();
        assert_eq!(head.headers.get("Host"), Some("localhost:8080"));
    }

    #[test]
    fn test_split_head_errors() {
        assert_eq!(split_head(b"").unwrap_err(), ParseError::EmptyMessage);
        assert_eq!(split_head(b"GET / HTTP/1.1\r\n").unwrap_err(), ParseError::MissingTerminator);
        assert_eq!(
            split_head(b"GET / HTTP/1.1\r\nNoColon\r\n\r\n").unwrap_err(),
            ParseError::InvalidHeader("NoColon".to_string())
        );
        assert_eq!(
            split_head(b"GET / HTTP/1.1\r\n: v\r\n\r\n").unwrap_err(),
            ParseError::InvalidHeader(": v".to_string())
        );
        assert_eq!(split_head(b"\xff\xfe / HTTP/1.1\r\n\r\n").unwrap_err(), ParseError::NotUtf8);
    }

    #[test]
    fn test_parse_content_length() {
        assert_eq!(parse_content_length("42"), Some(42));
        assert_eq!(parse_content_length(" 7 "), Some(7));
        assert_eq!(parse_content_length("+5"), None);
        assert_eq!(parse_content_length("-1"), None);
        assert_eq!(parse_content_length("abc"), None);
        assert_eq!(parse_content_length(""), None);
    }

    #[test]
    fn test_sized_body() {
        let mut headers = Headers::new();
        assert_eq!(sized_body(&headers, b"ignored").unwrap(), None);

        headers.push("content-length", "3");
        assert_eq!(sized_body(&headers, b"abcdef").unwrap(), Some(b"abc".to_vec()));
        assert_eq!(
            sized_body(&headers, b"ab").unwrap_err(),
            ParseError::TruncatedBody { expected: 3, actual: 2 }
        );
    }

    #[test]
    fn test_is_chunked() {
        let mut headers = Headers::new();
        assert!(!is_chunked(&headers));
        headers.push("Transfer-Encoding", "gzip, Chunked");
        assert!(is_chunked(&headers));
    }
}
