//! # Logging
//! src/logger.rs
//!
//! Inicializa `simplelog` sobre stderr. El resto del crate solo usa las
//! macros de `log` (`info!`, `debug!`, `warn!`, `error!`).

use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};

/// Niveles aceptados por `--log-level`
pub const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Convierte el texto de configuración en un nivel de log
///
/// # Ejemplo
/// ```
/// use expresso::logger::parse_level;
/// use simplelog::LevelFilter;
///
/// assert_eq!(parse_level("DEBUG"), Some(LevelFilter::Debug));
/// assert_eq!(parse_level("loud"), None);
/// ```
pub fn parse_level(level: &str) -> Option<LevelFilter> {
    match level.to_ascii_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

/// Config de `simplelog` y si se pudo usar el offset horario local
///
/// Sin offset local (ej: dentro de algunos contenedores) los timestamps
/// quedan en UTC.
fn prepare_logger_config() -> (simplelog::Config, bool) {
    let mut builder = ConfigBuilder::new();
    builder
        .set_time_format_rfc3339()
        .set_thread_level(LevelFilter::Debug);
    let local_offset = builder.set_time_offset_to_local().is_ok();
    (builder.build(), local_offset)
}

/// Inicializa el logger de terminal
///
/// Un nivel desconocido usa `info` y lo avisa. Si ya había un logger
/// instalado (ej: varios tests en el mismo proceso) se deja el existente.
pub fn init_logger(level: &str) {
    let filter = parse_level(level);
    let (config, local_offset) = prepare_logger_config();

    let installed = TermLogger::init(
        filter.unwrap_or(LevelFilter::Info),
        config,
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );

    if installed.is_err() {
        log::debug!("Logger ya inicializado, se mantiene el existente");
        return;
    }
    if !local_offset {
        log::warn!("No se pudo determinar el offset horario local, timestamps en UTC");
    }
    if filter.is_none() {
        log::warn!(
            "Unsupported log level: {}, expected one of {:?}. Using `info` by default",
            level,
            LOG_LEVELS
        );
    }
}
