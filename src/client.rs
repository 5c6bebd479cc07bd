//! # Cliente HTTP/1.1
//! src/client.rs
//!
//! Cliente bloqueante: serializa un `Request`, lo envía, y lee y parsea la
//! `Response` con el mismo frame reader que usa el servidor.
//!
//! ```text
//! Request -> to_bytes -> socket -> FrameReader -> Response::parse
//! ```
//!
//! Para no bloquear al llamador existe `send_request_background`, que hace
//! el intercambio en otro thread y retorna un `PendingResponse`.

use std::io::{self, Read, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::debug;

use crate::error::Error;
use crate::http::{FrameReader, Method, Request, Response};

/// Puerto que se usa cuando el header `Host` no trae uno
pub const DEFAULT_PORT: u16 = 80;

/// Dirección `host:port` a partir del valor del header `Host`
///
/// # Ejemplo
/// ```
/// use expresso::client::host_address;
///
/// assert_eq!(host_address("example.com"), "example.com:80");
/// assert_eq!(host_address("localhost:4221"), "localhost:4221");
/// assert_eq!(host_address("[::1]"), "[::1]:80");
/// ```
pub fn host_address(host: &str) -> String {
    let host = host.trim();
    let has_port = match host.rfind(']') {
        // IPv6 literal: el puerto va después del corchete
        Some(end) => host[end..].contains(':'),
        None => host.contains(':'),
    };
    if has_port {
        host.to_string()
    } else {
        format!("{}:{}", host, DEFAULT_PORT)
    }
}

/// Envía el request a la dirección de su header `Host`
pub fn send_request(request: &Request) -> Result<Response, Error> {
    let host = request.header("Host").ok_or(Error::MissingHost)?;
    send_request_to(host_address(host), request)
}

/// Envía el request a `addr` y espera la response
pub fn send_request_to<A: ToSocketAddrs>(addr: A, request: &Request) -> Result<Response, Error> {
    let mut stream = connect(addr, request.timeout_ms())?;
    exchange(&mut stream, request)
}

/// Escribe el request en `stream` y lee exactamente una response
///
/// Para `HEAD` la response termina en los headers aunque declare body.
pub fn exchange<S: Read + Write>(stream: &mut S, request: &Request) -> Result<Response, Error> {
    let bytes = request.to_bytes()?;
    stream.write_all(&bytes)?;
    stream.flush()?;
    debug!("Enviado {} {} ({} bytes)", request.method(), request.url(), bytes.len());

    let head_only = request.method() == Method::HEAD;
    let frame = FrameReader::new(stream).head_only(head_only).read_frame()?;

    let response = if head_only {
        Response::parse_head(&frame)?
    } else {
        Response::parse(&frame)?
    };
    debug!(
        "Recibido {} {} ({} bytes de body)",
        response.status_code(),
        response.status_message(),
        response.body_length()
    );
    Ok(response)
}

/// Abre la conexión aplicando el timeout del request (0 = sin timeout)
fn connect<A: ToSocketAddrs>(addr: A, timeout_ms: u32) -> io::Result<TcpStream> {
    if timeout_ms == 0 {
        return TcpStream::connect(addr);
    }

    let timeout = Duration::from_millis(u64::from(timeout_ms));
    let mut last_error = None;
    for socket_addr in addr.to_socket_addrs()? {
        match TcpStream::connect_timeout(&socket_addr, timeout) {
            Ok(stream) => {
                stream.set_read_timeout(Some(timeout))?;
                stream.set_write_timeout(Some(timeout))?;
                return Ok(stream);
            }
            Err(e) => last_error = Some(e),
        }
    }

    Err(last_error.unwrap_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "address resolved to nothing")
    }))
}

/// Request en curso en un thread aparte
///
/// # Ejemplo
/// ```no_run
/// use expresso::client::send_request_background;
/// use expresso::http::Request;
///
/// let mut request = Request::new();
/// request.add_header("Host", "localhost:4221").unwrap();
///
/// let pending = send_request_background("localhost:4221", request).unwrap();
/// let response = pending.wait().unwrap();
/// println!("{}", response.status_code());
/// ```
pub struct PendingResponse {
    handle: JoinHandle<Result<Response, Error>>,
    stream: TcpStream,
    cancelled: Arc<AtomicBool>,
}

impl PendingResponse {
    /// Indica si el intercambio ya terminó (con éxito o error)
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Espera la response
    ///
    /// Si se llamó a `cancel` retorna `Error::Cancelled`.
    pub fn wait(self) -> Result<Response, Error> {
        let result = self.handle.join().map_err(|_| {
            Error::Io(io::Error::new(io::ErrorKind::Other, "request thread panicked"))
        })?;

        if self.cancelled.load(Ordering::SeqCst) {
            return Err(Error::Cancelled);
        }
        result
    }

    /// Cancela el request cerrando el socket
    ///
    /// El thread bloqueado en lectura o escritura falla enseguida.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        if let Err(e) = self.stream.shutdown(Shutdown::Both) {
            debug!("Shutdown al cancelar: {}", e);
        }
    }
}

/// Conecta y hace el intercambio en un thread aparte
///
/// La conexión se abre antes de retornar, así los errores de conexión se
/// reportan aquí y no en `wait`.
pub fn send_request_background<A: ToSocketAddrs>(
    addr: A,
    request: Request,
) -> Result<PendingResponse, Error> {
    let stream = connect(addr, request.timeout_ms())?;
    let mut worker_stream = stream.try_clone()?;
    let cancelled = Arc::new(AtomicBool::new(false));

    let handle = thread::spawn(move || exchange(&mut worker_stream, &request));

    Ok(PendingResponse {
        handle,
        stream,
        cancelled,
    })
}
