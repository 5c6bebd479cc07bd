//! # Respuestas HTTP/1.1
//! src/http/response.rs
//!
//! El servidor construye responses con el builder y las convierte a bytes;
//! el cliente las recibe y las parsea (incluido el body chunked).
//!
//! ## Formato de una respuesta HTTP/1.1
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/plain\r\n
//! Content-Length: 5\r\n
//! \r\n
//! hello
//! ```
//!
//! ## Ejemplo de uso
//!
//! ```
//! use expresso::http::{Response, StatusCode};
//!
//! let response = Response::new(StatusCode::Ok)
//!     .with_header("Content-Type", "text/plain")
//!     .with_body("hello");
//!
//! let bytes = response.to_bytes();
//! let parsed = Response::parse(&bytes).unwrap();
//! assert_eq!(parsed.status_code(), 200);
//! assert_eq!(parsed.body(), b"hello");
//! ```

use super::chunked;
use super::headers::Headers;
use super::message::{self, ParseError};
use super::status::StatusCode;

/// Representa una respuesta HTTP/1.1 completa
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Versión HTTP de la status line
    version: String,

    /// Código numérico (puede no estar en `StatusCode`)
    status_code: u16,

    /// Texto libre después del código (puede tener espacios o estar vacío)
    status_message: String,

    /// Headers en orden; se permiten duplicados
    headers: Headers,

    /// Cuerpo de la respuesta (ya decodificado si venía chunked)
    body: Vec<u8>,
}

impl Response {
    /// Crea una nueva respuesta con el código de estado especificado
    ///
    /// Por defecto la respuesta es `HTTP/1.1`, sin headers ni body.
    pub fn new(status: StatusCode) -> Self {
        Self {
            version: "HTTP/1.1".to_string(),
            status_code: status.as_u16(),
            status_message: status.reason_phrase().to_string(),
            headers: Headers::new(),
            body: Vec::new(),
        }
    }

    /// Agrega un header al final (builder)
    ///
    /// # Ejemplo
    /// ```
    /// use expresso::http::{Response, StatusCode};
    ///
    /// let response = Response::new(StatusCode::Ok)
    ///     .with_header("Set-Cookie", "a=1")
    ///     .with_header("Set-Cookie", "b=2");
    /// assert_eq!(response.headers().get_all("set-cookie").count(), 2);
    /// ```
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push(name, value);
        self
    }

    /// Agrega un header a una respuesta existente (versión mutable)
    pub fn add_header(&mut self, name: &str, value: &str) {
        self.headers.push(name, value);
    }

    /// Reemplaza todas las apariciones de un header por un único valor
    pub fn set_header(&mut self, name: &str, value: &str) {
        self.headers.set(name, value);
    }

    /// Establece el cuerpo de la respuesta desde un string
    pub fn with_body(self, body: &str) -> Self {
        self.with_body_bytes(body.as_bytes().to_vec())
    }

    /// Establece el cuerpo de la respuesta desde bytes
    ///
    /// El `Content-Length` se calcula en `to_bytes`, así que sigue siendo
    /// correcto aunque el body cambie después (ej: al comprimirlo).
    pub fn with_body_bytes(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Respuesta `text/plain` exitosa (200 OK)
    pub fn text(body: &str) -> Self {
        Self::new(StatusCode::Ok)
            .with_header("Content-Type", "text/plain")
            .with_body(body)
    }

    /// Respuesta de error con el mensaje en texto plano
    ///
    /// # Ejemplo
    /// ```
    /// use expresso::http::{Response, StatusCode};
    ///
    /// let response = Response::error(StatusCode::NotFound, "no such file");
    /// assert_eq!(response.status(), Some(StatusCode::NotFound));
    /// assert_eq!(response.body(), b"no such file");
    /// ```
    pub fn error(status: StatusCode, message: &str) -> Self {
        Self::new(status)
            .with_header("Content-Type", "text/plain")
            .with_body(message)
    }

    /// Convierte la respuesta a bytes listos para enviar por el socket
    ///
    /// - Status line: `HTTP/1.1 200 OK\r\n`
    /// - Headers en orden: `Header-Name: Value\r\n`
    /// - `Content-Length` si no hay `Content-Length` ni `Transfer-Encoding`
    /// - Línea vacía y body binario
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(128 + self.body.len());

        // 1. Status line
        let status_line = format!(
            "{} {} {}\r\n",
            self.version, self.status_code, self.status_message
        );
        result.extend_from_slice(status_line.as_bytes());

        // 2. Headers
        for header in &self.headers {
            result.extend_from_slice(format!("{}\r\n", header).as_bytes());
        }
        if !self.headers.contains("Content-Length") && !self.headers.contains("Transfer-Encoding") {
            result.extend_from_slice(format!("Content-Length: {}\r\n", self.body.len()).as_bytes());
        }

        // 3. Línea vacía que separa headers del body
        result.extend_from_slice(b"\r\n");

        // 4. Body
        result.extend_from_slice(&self.body);

        result
    }

    /// Parsea una response completa (lado cliente)
    ///
    /// Con `Transfer-Encoding: chunked` el body se decodifica; si no, se
    /// toman exactamente `Content-Length` bytes (sin header, body vacío).
    pub fn parse(frame: &[u8]) -> Result<Self, ParseError> {
        let head = message::split_head(frame)?;
        let (version, status_code, status_message) = Self::parse_status_line(head.start_line)?;

        let body = if message::is_chunked(&head.headers) {
            chunked::decode(head.body)?
        } else {
            message::sized_body(&head.headers, head.body)?.unwrap_or_default()
        };

        Ok(Response {
            version,
            status_code,
            status_message,
            headers: head.headers,
            body,
        })
    }

    /// Parsea solo la cabecera de una response (respuestas a `HEAD`)
    ///
    /// Los headers de longitud se conservan pero el body queda vacío.
    pub fn parse_head(frame: &[u8]) -> Result<Self, ParseError> {
        let head = message::split_head(frame)?;
        let (version, status_code, status_message) = Self::parse_status_line(head.start_line)?;

        Ok(Response {
            version,
            status_code,
            status_message,
            headers: head.headers,
            body: Vec::new(),
        })
    }

    /// Parsea la status line: `HTTP/1.1 404 Not Found`
    fn parse_status_line(line: &str) -> Result<(String, u16, String), ParseError> {
        let invalid = || ParseError::InvalidStatusLine(line.to_string());

        let (version, rest) = line.split_once(' ').ok_or_else(invalid)?;
        if !version.starts_with("HTTP/") {
            return Err(ParseError::InvalidVersion(version.to_string()));
        }

        let (code, message) = rest.split_once(' ').unwrap_or((rest, ""));
        if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let status_code = code.parse().map_err(|_| invalid())?;

        Ok((version.to_string(), status_code, message.to_string()))
    }

    /// Código conocido por el servidor, si lo es
    pub fn status(&self) -> Option<StatusCode> {
        StatusCode::from_u16(self.status_code)
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Obtiene una referencia a los headers
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Obtiene un header específico (primera coincidencia)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Obtiene una referencia al body
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn body_length(&self) -> usize {
        self.body.len()
    }

    pub fn body_string(&self) -> Option<String> {
        String::from_utf8(self.body.clone()).ok()
    }
}
