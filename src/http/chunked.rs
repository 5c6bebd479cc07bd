//! # Chunked Transfer Encoding
//! src/http/chunked.rs
//!
//! Decodificación de bodies con `Transfer-Encoding: chunked`.
//!
//! ## Formato
//!
//! ```text
//! 4\r\n          <- tamaño en hexadecimal (puede llevar ";extension")
//! Wiki\r\n       <- exactamente 4 bytes + CRLF
//! 5\r\n
//! pedia\r\n
//! 0\r\n          <- chunk de tamaño cero: fin del body
//! \r\n           <- trailers (ignorados) + línea vacía
//! ```

use std::collections::TryReserveError;

use thiserror::Error;

use super::util::{find_bytes, reserve_doubling, CRLF, HEAD_TERMINATOR};

/// Capacidad inicial del buffer de salida
const INITIAL_CAPACITY: usize = 1024;

/// Errores al decodificar un body chunked
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChunkError {
    /// La línea de tamaño no es hexadecimal válido (o desborda)
    #[error("invalid chunk size: {0:?}")]
    InvalidSize(String),

    /// Después de los datos del chunk no viene `\r\n`
    #[error("missing CRLF after chunk data")]
    MissingDelimiter,

    /// El body termina antes del chunk de tamaño cero
    #[error("chunked body is truncated")]
    Truncated,

    #[error("out of memory while decoding chunked body")]
    Memory(#[from] TryReserveError),
}

/// Resultado de recorrer el framing de chunks
enum Walk {
    /// Se encontró el chunk final; `end` apunta justo después de su línea
    Done { end: usize },
    /// Faltan bytes
    Incomplete,
}

/// Recorre los chunks de `input` llamando a `on_chunk` con los datos de cada uno
fn walk<F>(input: &[u8], mut on_chunk: F) -> Result<Walk, ChunkError>
where
    F: FnMut(&[u8]) -> Result<(), ChunkError>,
{
    let mut pos = 0;

    loop {
        let line_len = match find_bytes(&input[pos..], CRLF) {
            Some(len) => len,
            None => return Ok(Walk::Incomplete),
        };
        let size = parse_size(&input[pos..pos + line_len])?;
        pos += line_len + CRLF.len();

        if size == 0 {
            return Ok(Walk::Done { end: pos });
        }

        let data_end = pos.checked_add(size).ok_or_else(|| overflow(size))?;
        let chunk_end = data_end.checked_add(CRLF.len()).ok_or_else(|| overflow(size))?;
        if input.len() < chunk_end {
            return Ok(Walk::Incomplete);
        }
        if &input[data_end..chunk_end] != CRLF {
            return Err(ChunkError::MissingDelimiter);
        }

        on_chunk(&input[pos..data_end])?;
        pos = chunk_end;
    }
}

fn overflow(size: usize) -> ChunkError {
    ChunkError::InvalidSize(format!("{:x}", size))
}

/// Parsea la línea de tamaño, descartando extensiones después de `;`
fn parse_size(line: &[u8]) -> Result<usize, ChunkError> {
    let text = std::str::from_utf8(line)
        .map_err(|_| ChunkError::InvalidSize(String::from_utf8_lossy(line).into_owned()))?;
    let digits = text.split(';').next().unwrap_or("").trim_matches(|c| c == ' ' || c == '\t');

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ChunkError::InvalidSize(text.to_string()));
    }

    usize::from_str_radix(digits, 16).map_err(|_| ChunkError::InvalidSize(text.to_string()))
}

/// Decodifica un body chunked completo
///
/// Cualquier error de framing descarta todo: nunca se retorna un body parcial.
///
/// # Ejemplo
/// ```
/// use expresso::http::chunked;
///
/// let body = chunked::decode(b"4\r\nWiki\r\n5\r\npedia\r\n0\r\n\r\n").unwrap();
/// assert_eq!(body, b"Wikipedia");
///
/// assert!(chunked::decode(b"4\r\nWiki\r\n").is_err());
/// ```
pub fn decode(input: &[u8]) -> Result<Vec<u8>, ChunkError> {
    let mut out = Vec::new();
    out.try_reserve_exact(INITIAL_CAPACITY)?;

    let walked = walk(input, |data| {
        reserve_doubling(&mut out, data.len(), INITIAL_CAPACITY)?;
        out.extend_from_slice(data);
        Ok(())
    })?;

    match walked {
        Walk::Done { .. } => Ok(out),
        Walk::Incomplete => Err(ChunkError::Truncated),
    }
}

/// Longitud exacta del body chunked codificado, incluyendo trailers
///
/// * `Ok(Some(n))` - el body está completo y ocupa `n` bytes
/// * `Ok(None)` - faltan bytes
/// * `Err(_)` - framing inválido
pub fn framed_len(input: &[u8]) -> Result<Option<usize>, ChunkError> {
    let end = match walk(input, |_| Ok(()))? {
        Walk::Done { end } => end,
        Walk::Incomplete => return Ok(None),
    };

    // Sin trailers: viene directamente la línea vacía
    let rest = &input[end..];
    if rest.starts_with(CRLF) {
        return Ok(Some(end + CRLF.len()));
    }
    if rest.len() < CRLF.len() {
        return Ok(None);
    }

    // Con trailers: terminan con una línea vacía
    Ok(find_bytes(rest, HEAD_TERMINATOR).map(|pos| end + pos + HEAD_TERMINATOR.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIKIPEDIA: &[u8] = b"4\r\nWiki\r\n5\r\npedia\r\n0\r\n\r\n";

    #[test]
    fn test_decode_wikipedia() {
        let body = decode(WIKIPEDIA).unwrap();
        assert_eq!(body, b"Wikipedia");
        assert_eq!(body.len(), 9);
    }

    #[test]
    fn test_decode_missing_last_chunk() {
        assert_eq!(decode(b"4\r\nWiki\r\n5\r\npedia\r\n"), Err(ChunkError::Truncated));
    }

    #[test]
    fn test_decode_extensions_are_ignored() {
        let body = decode(b"4;name=value\r\nWiki\r\n0;last\r\n\r\n").unwrap();
        assert_eq!(body, b"Wiki");
    }

    #[test]
    fn test_decode_uppercase_hex_and_binary_data() {
        let mut input = b"A\r\n".to_vec();
        input.extend_from_slice(&[0, 1, 2, 3, 0, 5, 6, 7, 8, 0]);
        input.extend_from_slice(b"\r\n0\r\n\r\n");

        let body = decode(&input).unwrap();
        assert_eq!(body, vec![0, 1, 2, 3, 0, 5, 6, 7, 8, 0]);
    }

    #[test]
    fn test_decode_wrong_delimiter() {
        assert_eq!(decode(b"4\r\nWikiXX5\r\npedia\r\n0\r\n\r\n"), Err(ChunkError::MissingDelimiter));
    }

    #[test]
    fn test_decode_chunk_longer_than_declared() {
        assert_eq!(decode(b"3\r\nWiki\r\n0\r\n\r\n"), Err(ChunkError::MissingDelimiter));
    }

    #[test]
    fn test_decode_insufficient_bytes() {
        assert_eq!(decode(b"10\r\nshort\r\n"), Err(ChunkError::Truncated));
    }

    #[test]
    fn test_decode_malformed_hex() {
        assert!(matches!(decode(b"zz\r\nWiki\r\n0\r\n\r\n"), Err(ChunkError::InvalidSize(_))));
        assert!(matches!(decode(b"\r\nWiki\r\n0\r\n\r\n"), Err(ChunkError::InvalidSize(_))));
        assert!(matches!(decode(b"-4\r\nWiki\r\n0\r\n\r\n"), Err(ChunkError::InvalidSize(_))));
    }

    #[test]
    fn test_decode_overflowing_size() {
        let input = b"fffffffffffffffffffffffff\r\nx\r\n0\r\n\r\n";
        assert!(matches!(decode(input), Err(ChunkError::InvalidSize(_))));
    }

    #[test]
    fn test_decode_grows_past_initial_capacity() {
        let chunk = vec![b'x'; 3000];
        let mut encoded = format!("{:x}\r\n", chunk.len()).into_bytes();
        encoded.extend_from_slice(&chunk);
        encoded.extend_from_slice(b"\r\n");

        let mut input = encoded.clone();
        input.extend_from_slice(&encoded);
        input.extend_from_slice(b"0\r\n\r\n");

        let body = decode(&input).unwrap();
        assert_eq!(body.len(), 6000);
    }

    #[test]
    fn test_decode_empty_body() {
        assert_eq!(decode(b"0\r\n\r\n").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_framed_len_complete() {
        assert_eq!(framed_len(WIKIPEDIA), Ok(Some(WIKIPEDIA.len())));
    }

    #[test]
    fn test_framed_len_ignores_bytes_after_body() {
        let mut input = WIKIPEDIA.to_vec();
        input.extend_from_slice(b"GET / HTTP/1.1\r\n\r\n");
        assert_eq!(framed_len(&input), Ok(Some(WIKIPEDIA.len())));
    }

    #[test]
    fn test_framed_len_incomplete() {
        assert_eq!(framed_len(b"4\r\nWi"), Ok(None));
        assert_eq!(framed_len(b"4\r\nWiki\r\n0\r\n"), Ok(None));
        assert_eq!(framed_len(b"4\r\nWiki\r\n0\r\n\r"), Ok(None));
    }

    #[test]
    fn test_framed_len_with_trailers() {
        let input = b"4\r\nWiki\r\n0\r\nExpires: never\r\n\r\n";
        assert_eq!(framed_len(input), Ok(Some(input.len())));
        assert_eq!(framed_len(&input[..input.len() - 2]), Ok(None));
    }

    #[test]
    fn test_framed_len_malformed() {
        assert!(framed_len(b"xyz\r\n").is_err());
    }
}
