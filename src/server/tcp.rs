//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Implementación del servidor TCP que maneja múltiples conexiones
//! simultáneas usando threads. Cada conexión se procesa en su propio thread
//! y reutiliza el socket para varios requests (keep-alive) hasta que:
//!
//! - el cliente manda `Connection: close`
//! - el cliente cierra el socket
//! - llega un mensaje que no se puede enmarcar o parsear

use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use log::{debug, error, info, warn};

use crate::commands;
use crate::config::Config;
use crate::error::Error;
use crate::http::message::start_line_of;
use crate::http::{FrameError, FrameReader, Request, Response, StatusCode};
use crate::router::{Router, SERVER_NAME};

/// Servidor HTTP/1.1 concurrente
pub struct Server {
    config: Arc<Config>,
    router: Arc<Router>,
    listener: Option<TcpListener>,
}

impl Server {
    /// Crea el servidor con las rutas por defecto
    pub fn new(config: Config) -> Self {
        Self::with_router(config, commands::default_router())
    }

    /// Crea el servidor con un router propio
    pub fn with_router(config: Config, router: Router) -> Self {
        Self {
            config: Arc::new(config),
            router: Arc::new(router),
            listener: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Abre el socket y retorna la dirección real (útil con puerto 0)
    pub fn bind(&mut self) -> io::Result<SocketAddr> {
        let listener = TcpListener::bind(self.config.address())?;
        let local = listener.local_addr()?;
        info!("Servidor escuchando en {}", local);
        self.listener = Some(listener);
        Ok(local)
    }

    /// Acepta conexiones para siempre, un thread por conexión
    ///
    /// Si no se llamó a `bind` antes, se hace aquí.
    pub fn run(&mut self) -> io::Result<()> {
        if self.listener.is_none() {
            self.bind()?;
        }
        let Some(listener) = self.listener.take() else {
            return Err(io::Error::new(io::ErrorKind::NotConnected, "listener not bound"));
        };
        info!("Modo concurrente: un thread por conexión");

        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    let router = Arc::clone(&self.router);
                    let config = Arc::clone(&self.config);

                    let peer_addr = stream
                        .peer_addr()
                        .map(|addr| addr.to_string())
                        .unwrap_or_else(|_| "unknown".to_string());
                    debug!("Nueva conexión desde: {}", peer_addr);

                    thread::spawn(move || {
                        if let Err(e) = Self::handle_connection(stream, &router, &config) {
                            error!("Error en conexión {}: {}", peer_addr, e);
                        }
                        debug!("Cliente {} desconectado", peer_addr);
                    });
                }
                Err(e) => {
                    error!("Error al aceptar conexión: {}", e);
                }
            }
        }

        Ok(())
    }

    /// Atiende todos los requests de una conexión
    ///
    /// Los errores de framing o parsing se responden (413 o 400) y cierran
    /// la conexión sin propagarse; solo se propagan los errores de I/O.
    pub fn handle_connection<S: Read + Write>(
        stream: S,
        router: &Router,
        config: &Config,
    ) -> Result<(), Error> {
        let mut reader = FrameReader::new(stream);

        loop {
            let frame = match reader.read_frame() {
                Ok(frame) => frame,
                Err(Error::ConnectionClosed { buffered: 0 }) => return Ok(()),
                Err(Error::ConnectionClosed { buffered }) => {
                    warn!("Conexión cerrada a mitad de mensaje ({} bytes)", buffered);
                    return Ok(());
                }
                Err(Error::Frame(e)) => {
                    warn!("Framing error: {}", e);
                    let status = match e {
                        FrameError::TooLarge { .. } => StatusCode::PayloadTooLarge,
                        _ => StatusCode::BadRequest,
                    };
                    return reject(reader.get_mut(), status, &e.to_string());
                }
                Err(Error::Chunked(e)) => {
                    warn!("Framing error: {}", e);
                    return reject(reader.get_mut(), StatusCode::BadRequest, &e.to_string());
                }
                Err(e) => return Err(e),
            };

            let start = Instant::now();
            let request = match Request::parse(&frame) {
                Ok(request) => request,
                Err(e) => {
                    warn!(
                        "Parse error: {} en {:?}",
                        e,
                        String::from_utf8_lossy(start_line_of(&frame))
                    );
                    return reject(reader.get_mut(), StatusCode::BadRequest, &e.to_string());
                }
            };

            let response = router.route(&request, config);
            let stream = reader.get_mut();
            stream.write_all(&response.to_bytes())?;
            stream.flush()?;

            info!(
                "{} {} -> {} {} ({:.2}ms)",
                request.method(),
                request.url(),
                response.status_code(),
                response.status_message(),
                start.elapsed().as_secs_f64() * 1000.0
            );

            if request.wants_close() {
                return Ok(());
            }
        }
    }
}

/// Responde un error y marca la conexión para cerrar
fn reject<W: Write>(stream: &mut W, status: StatusCode, reason: &str) -> Result<(), Error> {
    let response = Response::error(status, reason)
        .with_header("Server", SERVER_NAME)
        .with_header("Connection", "close");
    stream.write_all(&response.to_bytes())?;
    stream.flush()?;
    Ok(())
}
