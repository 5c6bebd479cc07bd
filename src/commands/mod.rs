//! # Comandos del Servidor
//! src/commands/mod.rs
//!
//! Handlers de las rutas que expone el servidor.
//!
//! ## Categorías de comandos
//!
//! - **basic**: `/`, `/echo/{text}`, `/user-agent`
//! - **files**: `/files` (listado), `/files/{name}` (GET, POST y DELETE),
//!   `/mkdir/{dir}` y la documentación en `/docs`
//!
//! Cada comando es una función handler que recibe un Request y el Config
//! y retorna una Response.

pub mod basic;
pub mod files;

// Re-exportar funciones útiles
pub use basic::*;
pub use files::*;

use crate::http::Method;
use crate::router::Router;

/// Router con todas las rutas del servidor
///
/// # Ejemplo
/// ```
/// use expresso::commands::default_router;
/// use expresso::config::Config;
/// use expresso::http::Request;
///
/// let router = default_router();
/// let request = Request::parse(b"GET /echo/hola HTTP/1.1\r\n\r\n").unwrap();
/// let response = router.route(&request, &Config::default());
/// assert_eq!(response.body(), b"hola");
/// ```
pub fn default_router() -> Router {
    let mut router = Router::new();

    router.register(Method::GET, "/", root_handler);
    router.register(Method::GET, "/echo/*", echo_handler);
    router.register(Method::GET, "/user-agent", user_agent_handler);
    router.register(Method::GET, "/files", list_files_handler);
    router.register(Method::GET, "/files/", list_files_handler);
    router.register(Method::GET, "/files/*", get_file_handler);
    router.register(Method::POST, "/files/*", post_file_handler);
    router.register(Method::DELETE, "/files/*", delete_file_handler);
    router.register(Method::POST, "/mkdir/*", mkdir_handler);
    router.register(Method::GET, "/docs", docs_handler);
    router.register(Method::GET, "/docs/*", docs_handler);

    router
}
