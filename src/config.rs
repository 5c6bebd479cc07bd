//! # Configuración del Servidor
//! src/config.rs
//!
//! Configuración del servidor con soporte para argumentos CLI y variables
//! de entorno. No hay estado global: el `Config` se pasa explícitamente al
//! router y a cada handler.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./expresso --port 4221 --directory /tmp/files --docs-directory ./docs
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! EXPRESSO_PORT=8080 EXPRESSO_LOG=debug ./expresso
//! ```

use std::path::{Path, PathBuf};

use clap::Parser;
use log::info;

use crate::logger;

/// Configuración del servidor HTTP/1.1
#[derive(Debug, Clone, Parser)]
#[command(name = "expresso")]
#[command(about = "Servidor HTTP/1.1 con archivos, echo y documentación estática")]
#[command(version)]
pub struct Config {
    /// Host/IP en el que escucha
    #[arg(long, default_value = "0.0.0.0", env = "EXPRESSO_HOST")]
    pub host: String,

    /// Puerto en el que escucha el servidor (0 = puerto libre cualquiera)
    #[arg(short, long, default_value = "4221", env = "EXPRESSO_PORT")]
    pub port: u16,

    /// Directorio de donde `/files/{name}` lee y escribe
    #[arg(long, default_value = ".", env = "EXPRESSO_DIRECTORY")]
    pub directory: PathBuf,

    /// Directorio con los archivos estáticos de `/docs`
    #[arg(long = "docs-directory", env = "EXPRESSO_DOCS")]
    pub docs_directory: Option<PathBuf>,

    /// Nivel de log: off, error, warn, info, debug, trace
    #[arg(long = "log-level", default_value = "info", env = "EXPRESSO_LOG")]
    pub log_level: String,
}

impl Config {
    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use expresso::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "0.0.0.0:4221");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("Host must not be empty".to_string());
        }
        if self.directory.as_os_str().is_empty() {
            return Err("Directory must not be empty".to_string());
        }
        if let Some(docs) = &self.docs_directory {
            if docs.as_os_str().is_empty() {
                return Err("Docs directory must not be empty".to_string());
            }
        }
        if logger::parse_level(&self.log_level).is_none() {
            return Err(format!("Unknown log level: {}", self.log_level));
        }
        Ok(())
    }

    /// Ruta de un archivo dentro de `--directory`
    pub fn file_path(&self, name: impl AsRef<Path>) -> PathBuf {
        self.directory.join(name)
    }

    pub fn docs_directory(&self) -> Option<&Path> {
        self.docs_directory.as_deref()
    }

    /// Registra un resumen de la configuración
    pub fn log_summary(&self) {
        info!("Configuración:");
        info!("   Address:      {}", self.address());
        info!("   Directory:    {}", self.directory.display());
        match &self.docs_directory {
            Some(docs) => info!("   Docs:         {}", docs.display()),
            None => info!("   Docs:         disabled"),
        }
        info!("   Log level:    {}", self.log_level);
    }
}

impl Default for Config {
    /// Configuración por defecto (igual a los defaults de la CLI)
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4221,
            directory: PathBuf::from("."),
            docs_directory: None,
            log_level: "info".to_string(),
        }
    }
}
