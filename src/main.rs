//! # Expresso - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor HTTP/1.1.
//!
//! La configuración viene de la CLI o de variables de entorno (ver `Config`).

use clap::Parser;
use log::error;

use expresso::config::Config;
use expresso::logger;
use expresso::server::Server;

fn main() {
    let config = Config::parse();
    logger::init_logger(&config.log_level);

    if let Err(e) = config.validate() {
        error!("Configuración inválida: {}", e);
        std::process::exit(2);
    }
    config.log_summary();

    let mut server = Server::new(config);

    // Iniciar el servidor (esto bloqueará el thread)
    if let Err(e) = server.run() {
        error!("Error fatal: {}", e);
        std::process::exit(1);
    }
}
