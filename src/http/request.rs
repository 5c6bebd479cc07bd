//! # Requests HTTP/1.1
//! src/http/request.rs
//!
//! Un mismo tipo `Request` sirve para los dos sentidos:
//!
//! - **Servidor**: `Request::parse` convierte un frame recibido en un request.
//! - **Cliente**: se construye con los setters (`set_method`, `add_header`,
//!   `set_body`...) y `serialize` lo convierte en bytes para el socket.
//!
//! ## Formato de un Request HTTP/1.1
//!
//! ```text
//! GET /path?param1=value1&param2=value2 HTTP/1.1\r\n
//! Host: localhost:4221\r\n
//! User-Agent: curl/8.5.0\r\n
//! \r\n
//! ```
//!
//! ## Componentes
//!
//! 1. **Request Line**: `METHOD /path?query HTTP/1.1`
//! 2. **Headers**: Pares `Name: Value` (uno por línea, en orden)
//! 3. **Empty Line**: `\r\n` que separa headers del body
//! 4. **Body**: exactamente `Content-Length` bytes (binario)

use super::headers::Headers;
use super::message::{self, ParseError};
use super::method::Method;
use super::params::Params;
use super::util::{contains_ignore_case, has_line_break};
use super::wire::{SerializeError, WireWriter};

/// Tamaño del buffer que usa `to_bytes`
pub const MAX_MESSAGE_SIZE: usize = 64 * 1024;

/// Representa un request HTTP/1.1
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Método HTTP
    method: Method,

    /// URL tal como aparece en la request line (incluye la query)
    url: String,

    /// Versión HTTP (ej: "HTTP/1.1")
    version: String,

    /// Headers en orden de llegada o de inserción
    headers: Headers,

    /// Body; `None` si el mensaje no declara body
    body: Option<Vec<u8>>,

    /// Query parameters
    params: Params,

    /// Timeout para el cliente, en milisegundos (0 = sin timeout)
    timeout_ms: u32,
}

impl Default for Request {
    fn default() -> Self {
        Self {
            method: Method::GET,
            url: "/".to_string(),
            version: "HTTP/1.1".to_string(),
            headers: Headers::new(),
            body: None,
            params: Params::new(),
            timeout_ms: 0,
        }
    }
}

impl Request {
    /// Crea un request vacío: `GET / HTTP/1.1`, sin headers ni body
    pub fn new() -> Self {
        Self::default()
    }

    /// Parsea un request HTTP/1.1 desde un frame completo
    ///
    /// # Argumentos
    ///
    /// * `frame` - Bytes de exactamente un mensaje (ver `FrameReader`)
    ///
    /// # Retorna
    ///
    /// * `Ok(Request)` - Request parseado exitosamente
    /// * `Err(ParseError)` - Error durante el parsing; nunca hay request parcial
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use expresso::http::{Method, Request};
    ///
    /// let raw = b"GET /a?x=1&y=2 HTTP/1.1\r\nHost: h\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.method(), Method::GET);
    /// assert_eq!(request.url(), "/a?x=1&y=2");
    /// assert_eq!(request.header("host"), Some("h"));
    /// assert_eq!(request.param("y"), Some("2"));
    /// ```
    pub fn parse(frame: &[u8]) -> Result<Self, ParseError> {
        // 1. Separar start line, headers y body
        let head = message::split_head(frame)?;

        // 2. Parsear la request line
        let (method, url, version) = Self::parse_request_line(head.start_line)?;

        // 3. Body (solo Content-Length en el lado servidor)
        if let Some(encoding) = head.headers.get("Transfer-Encoding") {
            return Err(ParseError::UnsupportedTransferEncoding(encoding.to_string()));
        }
        let body = message::sized_body(&head.headers, head.body)?;

        // 4. Query parameters
        let params = Params::from_url(&url);

        Ok(Request {
            method,
            url,
            version,
            headers: head.headers,
            body,
            params,
            timeout_ms: 0,
        })
    }

    /// Parsea la request line
    ///
    /// Formato: `GET /path?query HTTP/1.1` (exactamente tres tokens)
    fn parse_request_line(line: &str) -> Result<(Method, String, String), ParseError> {
        let parts: Vec<&str> = line.split(' ').collect();

        if parts.len() != 3 || parts.iter().any(|part| part.is_empty()) {
            return Err(ParseError::InvalidRequestLine(line.to_string()));
        }

        let method = parts[0].parse::<Method>()?;

        let version = parts[2];
        if !version.starts_with("HTTP/") {
            return Err(ParseError::InvalidVersion(version.to_string()));
        }

        Ok((method, parts[1].to_string(), version.to_string()))
    }

    // === Setters (lado cliente) ===

    /// Cambia el método validándolo contra los métodos soportados
    ///
    /// Si el método es inválido el request no se modifica.
    ///
    /// # Ejemplo
    /// ```
    /// use expresso::http::{Method, Request};
    ///
    /// let mut request = Request::new();
    /// assert!(request.set_method("TRACE").is_err());
    /// assert_eq!(request.method(), Method::GET);
    ///
    /// request.set_method("DELETE").unwrap();
    /// assert_eq!(request.method(), Method::DELETE);
    /// ```
    pub fn set_method(&mut self, method: &str) -> Result<(), ParseError> {
        self.method = method.parse()?;
        Ok(())
    }

    /// Cambia la URL (path con query opcional)
    ///
    /// Una URL vacía o con espacios, `\r`, `\n` o `\0` se rechaza y el
    /// request no se modifica.
    pub fn set_url(&mut self, url: impl Into<String>) -> Result<(), ParseError> {
        let url = url.into();
        if url.is_empty() || url.contains(' ') || has_line_break(&url) {
            return Err(ParseError::InvalidUrl(url));
        }
        self.url = url;
        Ok(())
    }

    /// Cambia la versión; debe empezar con `HTTP/` y no tener espacios
    pub fn set_version(&mut self, version: impl Into<String>) -> Result<(), ParseError> {
        let version = version.into();
        if !version.starts_with("HTTP/") || version.contains(' ') || has_line_break(&version) {
            return Err(ParseError::InvalidVersion(version));
        }
        self.version = version;
        Ok(())
    }

    pub fn set_timeout(&mut self, timeout_ms: u32) {
        self.timeout_ms = timeout_ms;
    }

    /// Agrega un header al final (se permiten duplicados)
    ///
    /// El nombre no puede estar vacío ni tener `:` o espacios. Ni el nombre
    /// ni el valor pueden tener `\r`, `\n` o `\0`.
    ///
    /// # Ejemplo
    /// ```
    /// use expresso::http::Request;
    ///
    /// let mut request = Request::new();
    /// assert!(request.add_header("X-Note", "hi\r\n\r\nDELETE /x HTTP/1.1").is_err());
    /// assert!(request.headers().is_empty());
    ///
    /// request.add_header("X-Note", "hi").unwrap();
    /// assert_eq!(request.header("x-note"), Some("hi"));
    /// ```
    pub fn add_header(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), ParseError> {
        let key = key.into();
        let value = value.into();
        let bad_key = key.is_empty()
            || key.bytes().any(|b| b == b':' || b.is_ascii_whitespace())
            || has_line_break(&key);
        if bad_key || has_line_break(&value) {
            return Err(ParseError::InvalidHeader(format!("{}: {}", key, value)));
        }
        self.headers.push(key, value);
        Ok(())
    }

    /// Agrega un query parameter que se anexa a la URL al serializar
    ///
    /// Se rechazan claves vacías, espacios, `&`, saltos de línea y `\0`,
    /// y `=` dentro de la clave.
    pub fn add_param(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), ParseError> {
        let key = key.into();
        let value = value.into();
        let breaks_query = |text: &str| text.contains(|c: char| c == ' ' || c == '&') || has_line_break(text);
        if key.is_empty() || key.contains('=') || breaks_query(&key) || breaks_query(&value) {
            return Err(ParseError::InvalidParam(format!("{}={}", key, value)));
        }
        self.params.push(key, value);
        Ok(())
    }

    /// Reemplaza el body; su longitud es siempre la del buffer
    pub fn set_body(&mut self, body: impl Into<Vec<u8>>) {
        self.body = Some(body.into());
    }

    // === Serialización ===

    /// Serializa el request en `out`
    ///
    /// Retorna la cantidad de bytes escritos. Después del mensaje se escribe
    /// un `\0` que no cuenta en la longitud. Si el mensaje no cabe retorna
    /// error y la longitud no se reporta.
    ///
    /// Si hay params y la URL no tiene `?`, se anexan como query string.
    /// Si la URL ya trae `?`, gana la URL literal y los params se omiten.
    ///
    /// # Ejemplo
    /// ```
    /// use expresso::http::Request;
    ///
    /// let mut request = Request::new();
    /// request.set_url("/search").unwrap();
    /// request.add_param("q", "rust").unwrap();
    /// request.set_body("hi");
    ///
    /// let mut buf = [0u8; 128];
    /// let len = request.serialize(&mut buf).unwrap();
    ///
    /// assert_eq!(
    ///     &buf[..len],
    ///     b"GET /search?q=rust HTTP/1.1\r\nContent-Length: 2\r\n\r\nhi"
    /// );
    /// ```
    pub fn serialize(&self, out: &mut [u8]) -> Result<usize, SerializeError> {
        let mut writer = WireWriter::new(out);

        // 1. Request line (con la query de los params si corresponde)
        writer.put_fmt(format_args!("{} {}", self.method, self.url))?;
        if !self.params.is_empty() && !self.url.contains('?') {
            writer.put_fmt(format_args!("?{}", self.params.to_query()))?;
        }
        writer.put_fmt(format_args!(" {}\r\n", self.version))?;

        // 2. Headers en el orden guardado
        for header in &self.headers {
            writer.put_fmt(format_args!("{}: {}\r\n", header.key, header.value))?;
        }

        // 3. Content-Length automático si hay body y no fue declarado
        if let Some(body) = &self.body {
            if !self.headers.contains("Content-Length") {
                writer.put_fmt(format_args!("Content-Length: {}\r\n", body.len()))?;
            }
        }

        // 4. Línea vacía y body binario
        writer.put(b"\r\n")?;
        if let Some(body) = &self.body {
            writer.put(body)?;
        }

        writer.finish()
    }

    /// Serializa en un buffer de `MAX_MESSAGE_SIZE` bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, SerializeError> {
        let mut buf = vec![0u8; MAX_MESSAGE_SIZE];
        let len = self.serialize(&mut buf)?;
        buf.truncate(len);
        Ok(buf)
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> Method {
        self.method
    }

    /// URL completa, incluida la query
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Path sin la query (ej: "/files/a.txt")
    pub fn path(&self) -> &str {
        match self.url.split_once('?') {
            Some((path, _)) => path,
            None => &self.url,
        }
    }

    /// Obtiene la versión HTTP
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Obtiene todos los headers
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Obtiene un header específico (primera coincidencia)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Obtiene todos los query parameters
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Obtiene un query parameter específico
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    /// Obtiene el body del request (vacío si no tiene)
    pub fn body(&self) -> &[u8] {
        self.body.as_deref().unwrap_or_default()
    }

    /// Longitud del body en bytes
    pub fn body_length(&self) -> usize {
        self.body().len()
    }

    /// Indica si el request declara body
    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    /// Obtiene el body del request como String
    pub fn body_string(&self) -> Option<String> {
        String::from_utf8(self.body().to_vec()).ok()
    }

    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }

    /// El cliente pidió `Connection: close`
    pub fn wants_close(&self) -> bool {
        self.header("Connection")
            .map(|value| contains_ignore_case(value, "close"))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn header_pairs(request: &Request) -> Vec<(String, String)> {
        request
            .headers()
            .iter()
            .map(|h| (h.key.clone(), h.value.clone()))
            .collect()
    }

    #[test]
    fn test_parse_simple_get() {
        let raw = b"GET / HTTP/1.1\r\n\r\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.method(), Method::GET);
        assert_eq!(request.path(), "/");
        assert!(request.params().is_empty());
        assert!(!request.has_body());
    }

    #[test]
    fn test_parse_end_to_end_example() {
        let raw = b"GET /a?x=1&y=2 HTTP/1.1\r\nHost: h\r\n\r\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.method(), Method::GET);
        assert_eq!(request.url(), "/a?x=1&y=2");
        assert_eq!(request.path(), "/a");
        assert_eq!(request.version(), "HTTP/1.1");
        assert_eq!(header_pairs(&request), vec![("Host".to_string(), "h".to_string())]);

        let params: Vec<(&str, &str)> = request
            .params()
            .iter()
            .map(|p| (p.key.as_str(), p.value.as_str()))
            .collect();
        assert_eq!(params, vec![("x", "1"), ("y", "2")]);
        assert_eq!(request.body(), b"");
    }

    #[test]
    fn test_parse_with_headers_in_order() {
        let raw = b"GET / HTTP/1.1\r\nHost: localhost:4221\r\nUser-Agent: test\r\nAccept: */*\r\n\r\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.header("host"), Some("localhost:4221"));
        assert_eq!(request.header("USER-AGENT"), Some("test"));
        let keys: Vec<&str> = request.headers().iter().map(|h| h.key.as_str()).collect();
        assert_eq!(keys, vec!["Host", "User-Agent", "Accept"]);
    }

    #[test]
    fn test_parse_post_with_binary_body() {
        let mut raw = b"POST /files/a HTTP/1.1\r\nContent-Length: 5\r\n\r\n".to_vec();
        raw.extend_from_slice(&[b'a', 0, b'b', 0, b'c']);

        let request = Request::parse(&raw).unwrap();
        assert_eq!(request.method(), Method::POST);
        assert_eq!(request.body(), &[b'a', 0, b'b', 0, b'c']);
        assert_eq!(request.body_length(), 5);
    }

    #[test]
    fn test_parse_body_limited_to_content_length() {
        let raw = b"POST / HTTP/1.1\r\nContent-Length: 3\r\n\r\nabcEXTRA";
        let request = Request::parse(raw).unwrap();
        assert_eq!(request.body(), b"abc");
    }

    #[test]
    fn test_parse_truncated_body() {
        let raw = b"POST / HTTP/1.1\r\nContent-Length: 10\r\n\r\nabc";
        assert_eq!(
            Request::parse(raw),
            Err(ParseError::TruncatedBody { expected: 10, actual: 3 })
        );
    }

    #[test]
    fn test_parse_invalid_content_length() {
        let raw = b"POST / HTTP/1.1\r\nContent-Length: ten\r\n\r\n";
        assert_eq!(
            Request::parse(raw),
            Err(ParseError::InvalidContentLength("ten".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_transfer_encoding() {
        let raw = b"POST / HTTP/1.1\r\nTransfer-Encoding: chunked\r\n\r\n0\r\n\r\n";
        assert!(matches!(
            Request::parse(raw),
            Err(ParseError::UnsupportedTransferEncoding(_))
        ));
    }

    #[test]
    fn test_invalid_method() {
        let raw = b"TRACE / HTTP/1.1\r\n\r\n";
        assert_eq!(
            Request::parse(raw),
            Err(ParseError::InvalidMethod("TRACE".to_string()))
        );
    }

    #[test]
    fn test_invalid_version() {
        let raw = b"GET / FTP/1.0\r\n\r\n";
        assert!(matches!(Request::parse(raw), Err(ParseError::InvalidVersion(_))));
    }

    #[test]
    fn test_empty_request() {
        assert_eq!(Request::parse(b""), Err(ParseError::EmptyMessage));
    }

    #[test]
    fn test_invalid_request_line() {
        // Falta path y version
        assert!(matches!(
            Request::parse(b"GET\r\n\r\n"),
            Err(ParseError::InvalidRequestLine(_))
        ));
        // Token extra
        assert!(matches!(
            Request::parse(b"GET / x HTTP/1.1\r\n\r\n"),
            Err(ParseError::InvalidRequestLine(_))
        ));
        // Doble espacio
        assert!(matches!(
            Request::parse(b"GET  / HTTP/1.1\r\n\r\n"),
            Err(ParseError::InvalidRequestLine(_))
        ));
    }

    #[test]
    fn test_missing_terminator() {
        assert_eq!(
            Request::parse(b"GET / HTTP/1.1\r\nHost: h\r\n"),
            Err(ParseError::MissingTerminator)
        );
    }

    #[test]
    fn test_wants_close() {
        let keep = Request::parse(b"GET / HTTP/1.1\r\n\r\n").unwrap();
        let close = Request::parse(b"GET / HTTP/1.1\r\nConnection: Close\r\n\r\n").unwrap();
        assert!(!keep.wants_close());
        assert!(close.wants_close());
    }

    #[test]
    fn test_set_method() {
        let mut request = Request::new();
        assert_eq!(
            request.set_method("TRACE"),
            Err(ParseError::InvalidMethod("TRACE".to_string()))
        );
        assert_eq!(request.method(), Method::GET);

        request.set_method("PUT").unwrap();
        request.set_method("GET").unwrap();
        assert_eq!(request.method(), Method::GET);
    }

    #[test]
    fn test_setters_replace_previous_values() {
        let mut request = Request::new();
        request.set_url("/old").unwrap();
        request.set_url("/new").unwrap();
        request.set_version("HTTP/1.0").unwrap();
        request.set_timeout(250);
        request.set_body("first");
        request.set_body("second");

        assert_eq!(request.url(), "/new");
        assert_eq!(request.version(), "HTTP/1.0");
        assert_eq!(request.timeout_ms(), 250);
        assert_eq!(request.body(), b"second");
        assert_eq!(request.body_length(), 6);
    }

    #[test]
    fn test_set_url_rejects_invalid_urls() {
        let mut request = Request::new();
        for url in ["", "/a b", "/a\r\nHost: evil", "/a\n", "/a\0"] {
            assert_eq!(request.set_url(url), Err(ParseError::InvalidUrl(url.to_string())));
        }
        assert_eq!(request.url(), "/");
    }

    #[test]
    fn test_set_version_rejects_invalid_versions() {
        let mut request = Request::new();
        for version in ["1.1", "HTTP/1.1 x", "HTTP/1.1\r\n", "HTTP/\0"] {
            assert!(matches!(
                request.set_version(version),
                Err(ParseError::InvalidVersion(_))
            ));
        }
        assert_eq!(request.version(), "HTTP/1.1");
    }

    #[test]
    fn test_add_header_rejects_injection() {
        let mut request = Request::new();
        request.set_url("/a").unwrap();

        let injected = request.add_header("X-Note", "hi\r\n\r\nDELETE /files/x HTTP/1.1");
        assert!(matches!(injected, Err(ParseError::InvalidHeader(_))));
        for (key, value) in [
            ("", "v"),
            ("X:Note", "v"),
            ("X Note", "v"),
            ("X-Note\r\n", "v"),
            ("X-Note", "a\nb"),
            ("X-Note", "a\0b"),
        ] {
            assert!(request.add_header(key, value).is_err(), "{:?}", key);
        }

        assert!(request.headers().is_empty());
        assert_eq!(request.to_bytes().unwrap(), b"GET /a HTTP/1.1\r\n\r\n".to_vec());
    }

    #[test]
    fn test_add_param_rejects_query_breakers() {
        let mut request = Request::new();
        for (key, value) in [
            ("", "v"),
            ("a=b", "v"),
            ("a b", "v"),
            ("a", "1 2"),
            ("a", "1&b=2"),
            ("a", "1\r\n"),
        ] {
            assert!(
                matches!(request.add_param(key, value), Err(ParseError::InvalidParam(_))),
                "{:?}={:?}",
                key,
                value
            );
        }
        assert!(request.params().is_empty());
    }

    #[test]
    fn test_built_request_always_reparses() {
        let mut built = Request::new();
        built.set_url("/a").unwrap();
        assert!(built.set_url("/a b").is_err());
        assert!(built.add_header("X-Note", "hi\r\nX-Evil: 1").is_err());
        built.add_header("X-Note", "hi").unwrap();

        let parsed = Request::parse(&built.to_bytes().unwrap()).unwrap();
        assert_eq!(parsed.url(), "/a");
        assert_eq!(parsed.headers(), built.headers());
        assert_eq!(parsed.header("X-Evil"), None);
    }

    #[test]
    fn test_serialize_default_request() {
        let request = Request::new();
        assert_eq!(request.to_bytes().unwrap(), b"GET / HTTP/1.1\r\n\r\n".to_vec());
    }

    #[test]
    fn test_serialize_params_appended() {
        let mut request = Request::new();
        request.set_url("/a").unwrap();
        request.add_param("x", "1").unwrap();
        request.add_param("flag", "").unwrap();

        let bytes = request.to_bytes().unwrap();
        assert!(bytes.starts_with(b"GET /a?x=1&flag= HTTP/1.1\r\n"));
    }

    #[test]
    fn test_serialize_literal_query_wins() {
        let mut request = Request::new();
        request.set_url("/a?x=1").unwrap();
        request.add_param("a", "b").unwrap();

        let text = String::from_utf8(request.to_bytes().unwrap()).unwrap();
        assert!(text.starts_with("GET /a?x=1 HTTP/1.1\r\n"));
        assert!(!text.contains("a=b"));
    }

    #[test]
    fn test_serialize_headers_and_synthesized_length() {
        let mut request = Request::new();
        request.set_method("POST").unwrap();
        request.set_url("/files/x").unwrap();
        request.add_header("Host", "h").unwrap();
        request.add_header("X-Dup", "1").unwrap();
        request.add_header("X-Dup", "2").unwrap();
        request.set_body(vec![0u8, 1, 2]);

        let mut expected = b"POST /files/x HTTP/1.1\r\nHost: h\r\nX-Dup: 1\r\nX-Dup: 2\r\nContent-Length: 3\r\n\r\n".to_vec();
        expected.extend_from_slice(&[0, 1, 2]);
        assert_eq!(request.to_bytes().unwrap(), expected);
    }

    #[test]
    fn test_serialize_keeps_explicit_content_length() {
        let mut request = Request::new();
        request.add_header("content-length", "4").unwrap();
        request.set_body("body");

        let text = String::from_utf8(request.to_bytes().unwrap()).unwrap();
        assert_eq!(text.matches("ength: 4").count(), 1);
        assert!(!text.contains("Content-Length"));
    }

    #[test]
    fn test_serialize_empty_body_declares_zero_length() {
        let mut request = Request::new();
        request.set_body(Vec::new());
        assert_eq!(
            request.to_bytes().unwrap(),
            b"GET / HTTP/1.1\r\nContent-Length: 0\r\n\r\n".to_vec()
        );
    }

    #[test]
    fn test_serialize_writes_nul_terminator() {
        let request = Request::new();
        let mut buf = [0xFFu8; 64];
        let len = request.serialize(&mut buf).unwrap();
        assert_eq!(len, 18);
        assert_eq!(buf[len], 0);
    }

    #[test]
    fn test_serialize_capacity_exceeded() {
        let mut request = Request::new();
        request.set_body(vec![b'x'; 100]);

        let mut buf = [0u8; 64];
        assert_eq!(
            request.serialize(&mut buf),
            Err(SerializeError::CapacityExceeded { capacity: 64 })
        );

        // Sin espacio para el \0 también falla
        let exact = Request::new();
        let mut tight = [0u8; 18];
        assert!(exact.serialize(&mut tight).is_err());
        let mut enough = [0u8; 19];
        assert_eq!(exact.serialize(&mut enough), Ok(18));
    }

    #[test]
    fn test_round_trip() {
        let mut built = Request::new();
        built.set_method("PATCH").unwrap();
        built.set_url("/items/7").unwrap();
        built.set_version("HTTP/1.1").unwrap();
        built.add_param("dry", "1").unwrap();
        built.add_header("Host", "example.com").unwrap();
        built.add_header("Set-Cookie", "a=1").unwrap();
        built.add_header("Set-Cookie", "b=2").unwrap();
        built.add_header("Content-Length", "4").unwrap();
        built.set_body(vec![b'a', 0, b'\r', b'\n']);

        let bytes = built.to_bytes().unwrap();
        let parsed = Request::parse(&bytes).unwrap();

        assert_eq!(parsed.method(), Method::PATCH);
        assert_eq!(parsed.url(), "/items/7?dry=1");
        assert_eq!(parsed.version(), "HTTP/1.1");
        assert_eq!(parsed.headers(), built.headers());
        assert_eq!(parsed.body(), built.body());
        assert_eq!(parsed.param("dry"), Some("1"));
    }
}
