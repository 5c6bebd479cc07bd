//! # Expresso
//! src/lib.rs
//!
//! Toolkit HTTP/1.1 bloqueante implementado desde cero: un mismo motor de
//! mensajes sirve al servidor (requests entrantes) y al cliente (requests
//! salientes).
//!
//! ## Arquitectura
//!
//! El crate está dividido en módulos especializados:
//! - `http`: framing, parsing, chunked y serialización de mensajes HTTP/1.1
//! - `error`: error general y sus categorías (`ErrorKind`)
//! - `client`: cliente bloqueante y requests en segundo plano
//! - `server`: servidor TCP, un thread por conexión con keep-alive
//! - `router`: enrutamiento por método y path
//! - `commands`: handlers de las rutas (`/echo`, `/files`, `/docs`...)
//! - `compression`: gzip de bodies
//! - `config`: configuración por CLI y variables de entorno
//! - `logger`: inicialización del logging
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use expresso::config::Config;
//! use expresso::server::Server;
//!
//! let mut server = Server::new(Config::default());
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod client;
pub mod commands;
pub mod compression;
pub mod config;
pub mod error;
pub mod http;
pub mod logger;
pub mod router;
pub mod server;

pub use error::{Error, ErrorKind, Result};
