//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Este módulo implementa el router que mapea método + path a handlers.
//!
//! ## Arquitectura
//!
//! ```text
//! Request → Router → Handler(&Request, &Config) → Response
//! ```
//!
//! Un patrón que termina en `*` compara por prefijo (`/echo/*`); cualquier
//! otro compara exacto. Gana la primera ruta registrada que coincida. Si
//! ninguna coincide, retorna 404 Not Found.

use crate::config::Config;
use crate::http::{Method, Request, Response, StatusCode};

/// Tipo de función handler
///
/// Un handler recibe el Request y la configuración y retorna una Response
pub type Handler = fn(&Request, &Config) -> Response;

/// Valor del header `Server` en todas las respuestas
pub const SERVER_NAME: &str = "Expresso/1.1";

/// Una ruta registrada
struct Route {
    method: Method,
    pattern: String,
    handler: Handler,
}

impl Route {
    fn matches(&self, method: Method, path: &str) -> bool {
        if self.method != method {
            return false;
        }
        match self.pattern.strip_suffix('*') {
            Some(prefix) => path.starts_with(prefix),
            None => self.pattern == path,
        }
    }
}

/// Router que mapea (método, path) a handlers
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    /// Crea un nuevo router vacío
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Registra una ruta con su handler
    ///
    /// # Ejemplo
    /// ```
    /// use expresso::config::Config;
    /// use expresso::http::{Method, Request, Response};
    /// use expresso::router::Router;
    ///
    /// fn hello_handler(_req: &Request, _config: &Config) -> Response {
    ///     Response::text("Hello")
    /// }
    ///
    /// let mut router = Router::new();
    /// router.register(Method::GET, "/hello", hello_handler);
    /// assert_eq!(router.len(), 1);
    /// ```
    pub fn register(&mut self, method: Method, pattern: &str, handler: Handler) {
        self.routes.push(Route {
            method,
            pattern: pattern.to_string(),
            handler,
        });
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Encuentra y ejecuta el handler apropiado para un request
    ///
    /// # Ejemplo
    /// ```
    /// use expresso::config::Config;
    /// use expresso::http::{Request, StatusCode};
    /// use expresso::router::Router;
    ///
    /// let router = Router::new();
    /// let request = Request::parse(b"GET /test HTTP/1.1\r\n\r\n").unwrap();
    /// let response = router.route(&request, &Config::default());
    /// assert_eq!(response.status(), Some(StatusCode::NotFound));
    /// ```
    pub fn route(&self, request: &Request, config: &Config) -> Response {
        let path = request.path();

        let mut response = self
            .routes
            .iter()
            .find(|route| route.matches(request.method(), path))
            .map(|route| (route.handler)(request, config))
            .unwrap_or_else(|| Response::new(StatusCode::NotFound));

        self.add_common_headers(&mut response, request.wants_close());
        response
    }

    /// Agrega headers comunes a todas las respuestas
    fn add_common_headers(&self, response: &mut Response, close: bool) {
        response.set_header("Server", SERVER_NAME);
        if close {
            response.set_header("Connection", "close");
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
