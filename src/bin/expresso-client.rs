//! # Expresso Client
//! src/bin/expresso-client.rs
//!
//! Cliente de línea de comandos sobre `expresso::client`.
//!
//! ```bash
//! expresso-client /echo/hola
//! expresso-client -X POST -d 'contenido' /files/nota.txt
//! expresso-client -H 'Accept-Encoding: gzip' -p q=rust --target localhost:4221 /search
//! ```

use std::io::{self, Write};
use std::process;

use clap::Parser;
use log::error;

use expresso::client;
use expresso::http::{Request, Response};
use expresso::logger;
use expresso::ErrorKind;

/// Envía un request HTTP/1.1 e imprime la response
#[derive(Debug, Parser)]
#[command(name = "expresso-client")]
#[command(about = "Cliente HTTP/1.1 de línea de comandos")]
#[command(version)]
struct Args {
    /// URL del request (path con query opcional)
    #[arg(default_value = "/")]
    url: String,

    /// Método HTTP
    #[arg(short = 'X', long = "method", default_value = "GET")]
    method: String,

    /// Header `Nombre: Valor` (se puede repetir)
    #[arg(short = 'H', long = "header")]
    headers: Vec<String>,

    /// Query parameter `clave=valor` (se puede repetir)
    #[arg(short = 'p', long = "param")]
    params: Vec<String>,

    /// Body del request
    #[arg(short = 'd', long = "data")]
    data: Option<String>,

    /// Timeout de conexión, lectura y escritura en milisegundos (0 = sin timeout)
    #[arg(long, default_value_t = 0)]
    timeout: u32,

    /// Servidor destino `host:port`
    #[arg(long, default_value = "127.0.0.1:4221", env = "EXPRESSO_TARGET")]
    target: String,

    /// Nivel de log
    #[arg(long = "log-level", default_value = "warn", env = "EXPRESSO_LOG")]
    log_level: String,
}

/// Construye el request a partir de los argumentos
fn build_request(args: &Args) -> Result<Request, String> {
    let mut request = Request::new();
    request.set_method(&args.method).map_err(|e| e.to_string())?;
    request.set_url(args.url.as_str()).map_err(|e| e.to_string())?;
    request.set_timeout(args.timeout);

    for header in &args.headers {
        let (key, value) = header
            .split_once(':')
            .ok_or_else(|| format!("Header inválido (se espera `Nombre: Valor`): {}", header))?;
        request
            .add_header(key.trim(), value.trim_start())
            .map_err(|e| e.to_string())?;
    }
    if request.header("Host").is_none() {
        request
            .add_header("Host", args.target.as_str())
            .map_err(|e| e.to_string())?;
    }

    for param in &args.params {
        let (key, value) = param.split_once('=').unwrap_or((param.as_str(), ""));
        request.add_param(key, value).map_err(|e| e.to_string())?;
    }

    if let Some(data) = &args.data {
        request.set_body(data.as_bytes());
    }

    Ok(request)
}

/// Imprime status line, headers y body en stdout
fn print_response(response: &Response) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(
        out,
        "{} {} {}",
        response.version(),
        response.status_code(),
        response.status_message()
    )?;
    for header in response.headers() {
        writeln!(out, "{}", header)?;
    }
    writeln!(out)?;
    out.write_all(response.body())?;
    out.flush()
}

fn main() {
    let args = Args::parse();
    logger::init_logger(&args.log_level);

    let request = match build_request(&args) {
        Ok(request) => request,
        Err(e) => {
            error!("{}", e);
            process::exit(2);
        }
    };

    let response = match client::send_request_to(args.target.as_str(), &request) {
        Ok(response) => response,
        Err(e) => {
            error!("{}", e);
            let code = match e.kind() {
                ErrorKind::Io => 3,
                ErrorKind::InvalidMethod => 2,
                ErrorKind::Memory => 4,
                ErrorKind::Request => 5,
            };
            process::exit(code);
        }
    };

    if let Err(e) = print_response(&response) {
        error!("No se pudo escribir la response: {}", e);
        process::exit(1);
    }
}
