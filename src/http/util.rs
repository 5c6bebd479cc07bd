//! # Utilidades compartidas
//! src/http/util.rs
//!
//! Búsqueda de bytes, comparación de tokens sin distinguir mayúsculas y
//! crecimiento de buffers. Las usan el parser, el frame reader y el decoder.

use std::collections::TryReserveError;

/// Fin de línea HTTP
pub const CRLF: &[u8] = b"\r\n";

/// Separador entre headers y body
pub const HEAD_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Busca la primera aparición de `needle` dentro de `haystack`
pub fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Indica si `value` contiene `token` sin distinguir mayúsculas
///
/// Se usa para headers como `Connection: keep-alive, close` o
/// `Accept-Encoding: gzip, deflate`.
pub fn contains_ignore_case(value: &str, token: &str) -> bool {
    if token.is_empty() {
        return true;
    }
    value
        .as_bytes()
        .windows(token.len())
        .any(|window| window.eq_ignore_ascii_case(token.as_bytes()))
}

/// Indica si `value` tiene `\r`, `\n` o `\0`
///
/// Un texto así no puede ir en la start line ni en un header sin partir
/// el mensaje en dos.
pub fn has_line_break(value: &str) -> bool {
    value.bytes().any(|b| matches!(b, b'\r' | b'\n' | 0))
}

/// Asegura espacio para `additional` bytes más, duplicando la capacidad
///
/// La capacidad arranca en `initial` y solo crece en potencias de dos de
/// ella. Si el sistema no puede reservar, retorna el error sin tocar `buf`.
pub fn reserve_doubling(
    buf: &mut Vec<u8>,
    additional: usize,
    initial: usize,
) -> Result<(), TryReserveError> {
    let needed = buf.len().saturating_add(additional);
    if needed <= buf.capacity() {
        return Ok(());
    }

    let mut capacity = buf.capacity().max(initial).max(1);
    while capacity < needed {
        capacity = capacity.saturating_mul(2);
    }
    buf.try_reserve_exact(capacity - buf.len())
}
