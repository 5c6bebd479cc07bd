//! # Frame Reader
//! src/http/frame.rs
//!
//! Lee de un stream bloqueante hasta tener **exactamente un** mensaje HTTP.
//!
//! ## Algoritmo
//!
//! 1. Leer de a `READ_CHUNK_SIZE` bytes a un buffer que crece al doble.
//! 2. Buscar `\r\n\r\n` desde `len - 3` de la vuelta anterior (el terminador
//!    puede quedar partido entre dos lecturas). Una vez encontrado no se
//!    vuelve a buscar.
//! 3. Con los headers completos se decide el largo del body:
//!    - sin `Content-Length` (o `0`): el frame termina en el terminador
//!    - `Content-Length: N`: hacen falta `N` bytes más
//!    - `Transfer-Encoding: chunked`: hasta el chunk cero y sus trailers
//! 4. Cualquier byte más allá del frame se descarta.
//!
//! Nunca se retorna un frame parcial: o el mensaje entero o un error.

use std::io::{self, Read};
use std::ops::Deref;

use log::debug;
use thiserror::Error;

use super::chunked;
use super::message::parse_content_length;
use super::util::{contains_ignore_case, find_bytes, reserve_doubling, HEAD_TERMINATOR};
use crate::error::Error;

/// Límite por defecto de bytes aceptados en un mensaje
pub const MAX_FRAME_SIZE: usize = 64 * 1024;

/// Tamaño de cada lectura y capacidad inicial del buffer
pub const READ_CHUNK_SIZE: usize = 4096;

/// Errores de framing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("message exceeds the {limit} byte limit")]
    TooLarge { limit: usize },

    #[error("invalid Content-Length in message head: {0:?}")]
    InvalidContentLength(String),

    /// `Content-Length` y `Transfer-Encoding: chunked` a la vez
    #[error("message declares both Content-Length and chunked Transfer-Encoding")]
    AmbiguousLength,
}

/// Bytes de exactamente un mensaje
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    bytes: Vec<u8>,
    head_len: usize,
}

impl Frame {
    /// Largo de la cabecera, incluido `\r\n\r\n`
    pub fn head_len(&self) -> usize {
        self.head_len
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl Deref for Frame {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bytes
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Cómo termina el body según la cabecera
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyLength {
    Empty,
    Sized(usize),
    Chunked,
}

/// Lector de frames sobre cualquier `Read` bloqueante
///
/// # Ejemplo
/// ```
/// use std::io::Cursor;
/// use expresso::http::FrameReader;
///
/// let raw = b"POST / HTTP/1.1\r\nContent-Length: 2\r\n\r\nhiEXTRA".to_vec();
/// let mut reader = FrameReader::new(Cursor::new(raw));
///
/// let frame = reader.read_frame().unwrap();
/// assert_eq!(&frame[..], b"POST / HTTP/1.1\r\nContent-Length: 2\r\n\r\nhi");
/// ```
pub struct FrameReader<R> {
    source: R,
    limit: usize,
    head_only: bool,
}

impl<R: Read> FrameReader<R> {
    pub fn new(source: R) -> Self {
        Self::with_limit(source, MAX_FRAME_SIZE)
    }

    /// Crea un lector con otro límite de bytes
    pub fn with_limit(source: R, limit: usize) -> Self {
        Self {
            source,
            limit,
            head_only: false,
        }
    }

    /// El frame termina en los headers aunque declaren body (respuestas a `HEAD`)
    pub fn head_only(mut self, head_only: bool) -> Self {
        self.head_only = head_only;
        self
    }

    pub fn get_ref(&self) -> &R {
        &self.source
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.source
    }

    pub fn into_inner(self) -> R {
        self.source
    }

    /// Lee un mensaje completo
    ///
    /// # Retorna
    ///
    /// * `Ok(Frame)` - exactamente un mensaje
    /// * `Err(Error::ConnectionClosed)` - EOF antes de completar el mensaje
    /// * `Err(Error::Frame)` - límite superado o longitud inválida
    /// * `Err(Error::Io)` - error del socket (`Interrupted` se reintenta)
    pub fn read_frame(&mut self) -> Result<Frame, Error> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(READ_CHUNK_SIZE)?;
        let mut chunk = [0u8; READ_CHUNK_SIZE];

        let mut search_from = 0;
        let mut head: Option<(usize, BodyLength)> = None;

        loop {
            let n = self.read_some(&mut chunk)?;
            if n == 0 {
                return Err(Error::ConnectionClosed { buffered: buf.len() });
            }
            reserve_doubling(&mut buf, n, READ_CHUNK_SIZE)?;
            buf.extend_from_slice(&chunk[..n]);

            let (head_len, length) = match head {
                Some(found) => found,
                None => match find_bytes(&buf[search_from..], HEAD_TERMINATOR) {
                    Some(pos) => {
                        let head_len = search_from + pos + HEAD_TERMINATOR.len();
                        let length = if self.head_only {
                            BodyLength::Empty
                        } else {
                            declared_length(&buf[..head_len])?
                        };
                        head = Some((head_len, length));
                        (head_len, length)
                    }
                    None => {
                        if buf.len() > self.limit {
                            return Err(self.too_large());
                        }
                        search_from = buf.len().saturating_sub(HEAD_TERMINATOR.len() - 1);
                        continue;
                    }
                },
            };

            if let Some(total) = self.frame_len(&buf, head_len, length)? {
                return Ok(self.finish(buf, total, head_len));
            }
            if buf.len() > self.limit {
                return Err(self.too_large());
            }
        }
    }

    /// Una lectura, reintentando si fue interrumpida por una señal
    fn read_some(&mut self, chunk: &mut [u8]) -> Result<usize, Error> {
        loop {
            match self.source.read(chunk) {
                Ok(n) => return Ok(n),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::Io(e)),
            }
        }
    }

    /// Largo total del frame si ya está completo en `buf`
    fn frame_len(
        &self,
        buf: &[u8],
        head_len: usize,
        length: BodyLength,
    ) -> Result<Option<usize>, Error> {
        let total = match length {
            BodyLength::Empty => Some(head_len),
            BodyLength::Sized(body_len) => {
                let total = head_len
                    .checked_add(body_len)
                    .filter(|&total| total <= self.limit)
                    .ok_or_else(|| self.too_large())?;
                (buf.len() >= total).then_some(total)
            }
            BodyLength::Chunked => {
                chunked::framed_len(&buf[head_len..])?.map(|body_len| head_len + body_len)
            }
        };

        match total {
            Some(total) if total > self.limit => Err(self.too_large()),
            other => Ok(other),
        }
    }

    fn finish(&self, mut buf: Vec<u8>, total: usize, head_len: usize) -> Frame {
        if buf.len() > total {
            debug!(
                "Descartando {} bytes después del fin del mensaje",
                buf.len() - total
            );
            buf.truncate(total);
        }
        Frame {
            bytes: buf,
            head_len,
        }
    }

    fn too_large(&self) -> Error {
        Error::Frame(FrameError::TooLarge { limit: self.limit })
    }
}

/// Lee `Content-Length` y `Transfer-Encoding` de la cabecera cruda
///
/// Solo se mira la primera aparición de cada header.
fn declared_length(head: &[u8]) -> Result<BodyLength, FrameError> {
    let text = String::from_utf8_lossy(head);

    let mut content_length: Option<&str> = None;
    let mut transfer_encoding: Option<&str> = None;

    for line in text.split("\r\n").skip(1) {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        if content_length.is_none() && key.eq_ignore_ascii_case("Content-Length") {
            content_length = Some(value);
        } else if transfer_encoding.is_none() && key.eq_ignore_ascii_case("Transfer-Encoding") {
            transfer_encoding = Some(value);
        }
    }

    let chunked = transfer_encoding
        .map(|value| contains_ignore_case(value, "chunked"))
        .unwrap_or(false);

    match (content_length, chunked) {
        (Some(_), true) => Err(FrameError::AmbiguousLength),
        (Some(value), false) => match parse_content_length(value) {
            Some(0) => Ok(BodyLength::Empty),
            Some(len) => Ok(BodyLength::Sized(len)),
            None => Err(FrameError::InvalidContentLength(value.trim().to_string())),
        },
        (None, true) => Ok(BodyLength::Chunked),
        (None, false) => Ok(BodyLength::Empty),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::io::Cursor;

    /// Entrega los bytes de a `step` por lectura, con interrupciones
    struct Trickle {
        data: Vec<u8>,
        pos: usize,
        step: usize,
        interrupt_next: bool,
    }

    impl Trickle {
        fn new(data: &[u8], step: usize) -> Self {
            Self {
                data: data.to_vec(),
                pos: 0,
                step,
                interrupt_next: true,
            }
        }
    }

    impl Read for Trickle {
        fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
            if self.interrupt_next {
                self.interrupt_next = false;
                return Err(io::Error::new(io::ErrorKind::Interrupted, "signal"));
            }
            self.interrupt_next = true;

            let end = (self.pos + self.step).min(self.data.len());
            let n = (end - self.pos).min(out.len());
            out[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    fn read_all(raw: &[u8]) -> Result<Frame, Error> {
        FrameReader::new(Cursor::new(raw.to_vec())).read_frame()
    }

    #[test]
    fn test_headers_only_frame() {
        let raw = b"GET / HTTP/1.1\r\nHost: h\r\n\r\n";
        let frame = read_all(raw).unwrap();
        assert_eq!(frame.as_bytes(), raw);
        assert_eq!(frame.head_len(), raw.len());
    }

    #[test]
    fn test_content_length_frame_is_exact() {
        let raw = b"POST /x HTTP/1.1\r\ncontent-length: 5\r\n\r\nhelloGET / HTTP/1.1\r\n\r\n";
        let frame = read_all(raw).unwrap();
        assert_eq!(&frame[..], b"POST /x HTTP/1.1\r\ncontent-length: 5\r\n\r\nhello");
    }

    #[test]
    fn test_zero_content_length() {
        let raw = b"POST / HTTP/1.1\r\nContent-Length: 0\r\n\r\nleftover";
        let frame = read_all(raw).unwrap();
        assert_eq!(&frame[..], b"POST / HTTP/1.1\r\nContent-Length: 0\r\n\r\n");
    }

    #[test]
    fn test_trickling_source_with_split_terminator() {
        let mut raw = b"POST / HTTP/1.1\r\nContent-Length: 300\r\n\r\n".to_vec();
        raw.extend(std::iter::repeat(b'z').take(300));

        for step in [1, 2, 3, 7, 64] {
            let mut reader = FrameReader::new(Trickle::new(&raw, step));
            let frame = reader.read_frame().unwrap();
            assert_eq!(frame.as_bytes(), &raw[..], "step {}", step);
        }
    }

    #[test]
    fn test_body_larger_than_first_read() {
        let mut raw = b"POST / HTTP/1.1\r\nContent-Length: 10000\r\n\r\n".to_vec();
        raw.extend(std::iter::repeat(b'a').take(10_000));

        let frame = read_all(&raw).unwrap();
        assert_eq!(frame.len(), raw.len());
    }

    #[test]
    fn test_connection_closed_before_terminator() {
        let err = read_all(b"GET / HTTP/1.1\r\nHost").unwrap_err();
        assert!(matches!(err, Error::ConnectionClosed { buffered: 20 }));
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_connection_closed_before_body() {
        let err = read_all(b"POST / HTTP/1.1\r\nContent-Length: 10\r\n\r\nabc").unwrap_err();
        assert!(matches!(err, Error::ConnectionClosed { .. }));
    }

    #[test]
    fn test_empty_source() {
        let err = read_all(b"").unwrap_err();
        assert!(matches!(err, Error::ConnectionClosed { buffered: 0 }));
    }

    #[test]
    fn test_head_too_large() {
        let mut raw = b"GET / HTTP/1.1\r\nX-Big: ".to_vec();
        raw.extend(std::iter::repeat(b'x').take(MAX_FRAME_SIZE + 10));

        let err = read_all(&raw).unwrap_err();
        assert!(matches!(
            err,
            Error::Frame(FrameError::TooLarge { limit: MAX_FRAME_SIZE })
        ));
    }

    #[test]
    fn test_declared_body_too_large_fails_immediately() {
        // No hacen falta los bytes del body para rechazarlo
        let raw = b"POST / HTTP/1.1\r\nContent-Length: 1000000\r\n\r\n";
        let err = read_all(raw).unwrap_err();
        assert!(matches!(err, Error::Frame(FrameError::TooLarge { .. })));
    }

    #[test]
    fn test_custom_limit() {
        let raw = b"POST / HTTP/1.1\r\nContent-Length: 20\r\n\r\n01234567890123456789";
        let mut reader = FrameReader::with_limit(Cursor::new(raw.to_vec()), 32);
        assert!(matches!(
            reader.read_frame(),
            Err(Error::Frame(FrameError::TooLarge { limit: 32 }))
        ));
    }

    #[test]
    fn test_invalid_content_length() {
        let err = read_all(b"POST / HTTP/1.1\r\nContent-Length: -3\r\n\r\n").unwrap_err();
        assert!(matches!(
            err,
            Error::Frame(FrameError::InvalidContentLength(ref v)) if v == "-3"
        ));
    }

    #[test]
    fn test_chunked_frame() {
        let message = b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n4\r\nWiki\r\n5\r\npedia\r\n0\r\n\r\n";
        let mut raw = message.to_vec();
        raw.extend_from_slice(b"HTTP/1.1 200 OK\r\n\r\n");

        let frame = read_all(&raw).unwrap();
        assert_eq!(frame.as_bytes(), &message[..]);
    }

    #[test]
    fn test_chunked_frame_trickled() {
        let message = b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n4\r\nWiki\r\n0\r\nX-T: 1\r\n\r\n";
        let mut reader = FrameReader::new(Trickle::new(message, 3));
        assert_eq!(reader.read_frame().unwrap().as_bytes(), &message[..]);
    }

    #[test]
    fn test_chunked_and_content_length_rejected() {
        let raw = b"POST / HTTP/1.1\r\nContent-Length: 4\r\nTransfer-Encoding: chunked\r\n\r\n0\r\n\r\n";
        assert!(matches!(
            read_all(raw),
            Err(Error::Frame(FrameError::AmbiguousLength))
        ));
    }

    #[test]
    fn test_head_only_ignores_content_length() {
        let raw = b"HTTP/1.1 200 OK\r\nContent-Length: 50\r\n\r\n";
        let mut reader = FrameReader::new(Cursor::new(raw.to_vec())).head_only(true);
        assert_eq!(reader.read_frame().unwrap().as_bytes(), &raw[..]);
    }

    #[test]
    fn test_consecutive_frames_from_same_reader() {
        // Cada lectura consume solo lo que llega; con un mensaje por write
        // el mismo lector sirve para varios requests
        let mut reader = FrameReader::new(Trickle::new(b"GET /a HTTP/1.1\r\n\r\n", 64));
        assert!(reader.read_frame().unwrap().starts_with(b"GET /a"));
        assert!(matches!(
            reader.read_frame(),
            Err(Error::ConnectionClosed { buffered: 0 })
        ));
    }
}
