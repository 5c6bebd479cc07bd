//! # Escritura a buffer de capacidad fija
//! src/http/wire.rs
//!
//! `WireWriter` escribe bytes en un slice prestado y verifica la capacidad
//! restante en cada paso. Siempre reserva un byte para el `\0` final, de modo
//! que el buffer se puede pasar a herramientas de texto; la longitud válida
//! es la que retorna `finish()`.

use std::fmt;

use thiserror::Error;

/// Errores de serialización
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SerializeError {
    /// El mensaje no cabe en el buffer de salida
    #[error("serialized message does not fit in {capacity} bytes")]
    CapacityExceeded { capacity: usize },
}

pub(crate) struct WireWriter<'a> {
    buf: &'a mut [u8],
    len: usize,
}

impl<'a> WireWriter<'a> {
    pub(crate) fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, len: 0 }
    }

    fn overflow(&self) -> SerializeError {
        SerializeError::CapacityExceeded {
            capacity: self.buf.len(),
        }
    }

    /// Copia `bytes` al buffer o falla sin escribir nada
    pub(crate) fn put(&mut self, bytes: &[u8]) -> Result<(), SerializeError> {
        let end = self
            .len
            .checked_add(bytes.len())
            .filter(|&end| end < self.buf.len())
            .ok_or_else(|| self.overflow())?;

        self.buf[self.len..end].copy_from_slice(bytes);
        self.len = end;
        Ok(())
    }

    /// Escribe texto formateado (`write!`) verificando capacidad
    pub(crate) fn put_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<(), SerializeError> {
        fmt::Write::write_fmt(self, args).map_err(|_| self.overflow())
    }

    /// Termina el mensaje con `\0` y retorna su longitud (sin el `\0`)
    pub(crate) fn finish(self) -> Result<usize, SerializeError> {
        if self.len >= self.buf.len() {
            return Err(self.overflow());
        }
        self.buf[self.len] = 0;
        Ok(self.len)
    }
}

impl fmt::Write for WireWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.put(s.as_bytes()).map_err(|_| fmt::Error)
    }
}
