//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! Este módulo implementa el servidor TCP que:
//! 1. Escucha en un puerto
//! 2. Acepta conexiones entrantes (un thread por conexión)
//! 3. Lee frames y parsea requests HTTP/1.1
//! 4. Genera y envía responses hasta que la conexión se cierra

pub mod tcp;

// Re-exportar para facilitar el uso
pub use tcp::Server;
