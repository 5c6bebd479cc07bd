//! # Compresión gzip
//! src/compression.rs
//!
//! Compresión de bodies de respuesta cuando el cliente la acepta.

use std::io::{self, Write};

use flate2::write::GzEncoder;
use flate2::Compression;

use crate::http::util::contains_ignore_case;
use crate::http::Request;

/// Indica si el cliente acepta gzip (`Accept-Encoding` contiene `gzip`)
pub fn accepts_gzip(request: &Request) -> bool {
    request
        .headers()
        .get_all("Accept-Encoding")
        .any(|value| contains_ignore_case(value, "gzip"))
}

/// Comprime `data` en formato gzip
///
/// # Ejemplo
/// ```
/// use std::io::Read;
/// use expresso::compression::gzip;
///
/// let compressed = gzip(b"hello hello hello").unwrap();
/// assert_eq!(&compressed[..2], &[0x1f, 0x8b]);
///
/// let mut decoder = flate2::read::GzDecoder::new(&compressed[..]);
/// let mut text = String::new();
/// decoder.read_to_string(&mut text).unwrap();
/// assert_eq!(text, "hello hello hello");
/// ```
pub fn gzip(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::with_capacity(data.len() / 2 + 32), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}
