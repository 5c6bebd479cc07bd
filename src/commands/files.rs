//! # Comandos de Archivos
//! src/commands/files.rs
//!
//! - `GET /files`: lista los nombres de `--directory`
//! - `GET /files/{name}`: lee `{name}` de `--directory`
//! - `POST /files/{name}`: escribe el body en `--directory/{name}`
//! - `DELETE /files/{name}`: borra un archivo o un directorio completo
//! - `POST /mkdir/{dir}`: crea `{dir}` (y sus padres) dentro de `--directory`
//! - `GET /docs`, `GET /docs/{path}`: archivos estáticos de `--docs-directory`
//!
//! Solo se aceptan nombres relativos hechos de componentes normales: nada
//! vacío, absoluto ni con `..`. El resto responde 404.

use std::fs;
use std::io;
use std::path::{Component, Path};

use log::{debug, error, info};

use crate::config::Config;
use crate::http::{Request, Response, StatusCode};

/// Valida que `name` quede dentro del directorio al hacer `join`
///
/// # Ejemplo
/// ```
/// use expresso::commands::files::relative_path;
///
/// assert!(relative_path("notes/a.txt").is_some());
/// assert!(relative_path("/etc/passwd").is_none());
/// assert!(relative_path("a/../../b").is_none());
/// assert!(relative_path("").is_none());
/// ```
pub fn relative_path(name: &str) -> Option<&Path> {
    let path = Path::new(name);
    let mut components = path.components().peekable();
    components.peek()?;
    if components.all(|component| matches!(component, Component::Normal(_))) {
        Some(path)
    } else {
        None
    }
}

/// Nombre seguro dentro del directorio configurado
fn safe_name<'a>(req: &'a Request, prefix: &str) -> Option<&'a Path> {
    let name = req.path().strip_prefix(prefix)?;
    let path = relative_path(name);
    if path.is_none() {
        debug!("Nombre rechazado: {:?}", name);
    }
    path
}

/// Lee un archivo y arma la respuesta (404 si no existe)
fn serve_file(path: &Path, content_type: &str) -> Response {
    match fs::read(path) {
        Ok(contents) => Response::new(StatusCode::Ok)
            .with_header("Content-Type", content_type)
            .with_body_bytes(contents),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("Archivo no encontrado: {}", path.display());
            Response::new(StatusCode::NotFound)
        }
        Err(e) => {
            error!("Error leyendo {}: {}", path.display(), e);
            Response::new(StatusCode::NotFound)
        }
    }
}

/// Handler para `GET /files`
///
/// Un nombre por línea, ordenados.
pub fn list_files_handler(_req: &Request, config: &Config) -> Response {
    let entries = match fs::read_dir(&config.directory) {
        Ok(entries) => entries,
        Err(e) => {
            error!("Error listando {}: {}", config.directory.display(), e);
            return Response::error(StatusCode::InternalServerError, "Could not list directory");
        }
    };

    let mut names: Vec<String> = entries
        .flatten()
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();
    names.sort();

    let mut listing = String::new();
    for name in &names {
        listing.push_str(name);
        listing.push('\n');
    }
    Response::text(&listing)
}

/// Handler para `GET /files/{name}`
pub fn get_file_handler(req: &Request, config: &Config) -> Response {
    let Some(name) = safe_name(req, "/files/") else {
        return Response::new(StatusCode::NotFound);
    };
    serve_file(&config.file_path(name), "application/octet-stream")
}

/// Handler para `POST /files/{name}`
///
/// Crea `--directory` si falta. Responde 201 Created si el archivo se
/// escribió y 500 si no.
pub fn post_file_handler(req: &Request, config: &Config) -> Response {
    let Some(name) = safe_name(req, "/files/") else {
        return Response::new(StatusCode::NotFound);
    };

    if let Err(e) = fs::create_dir_all(&config.directory) {
        error!("Error creando {}: {}", config.directory.display(), e);
        return Response::error(StatusCode::InternalServerError, "Could not create directory");
    }

    let path = config.file_path(name);
    match fs::write(&path, req.body()) {
        Ok(()) => {
            debug!("Escritos {} bytes en {}", req.body_length(), path.display());
            Response::new(StatusCode::Created)
        }
        Err(e) => {
            error!("Error escribiendo {}: {}", path.display(), e);
            Response::error(StatusCode::InternalServerError, "Could not write file")
        }
    }
}

/// Handler para `DELETE /files/{name}`
///
/// Borra archivos y directorios (con su contenido). 404 si no existe.
pub fn delete_file_handler(req: &Request, config: &Config) -> Response {
    let Some(name) = safe_name(req, "/files/") else {
        return Response::new(StatusCode::NotFound);
    };

    let path = config.file_path(name);
    let metadata = match fs::symlink_metadata(&path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Response::error(StatusCode::NotFound, "File not found");
        }
        Err(e) => {
            error!("Error consultando {}: {}", path.display(), e);
            return Response::error(StatusCode::InternalServerError, "Could not delete file");
        }
    };

    let (removed, what) = if metadata.is_dir() {
        (fs::remove_dir_all(&path), "Directory deleted")
    } else {
        (fs::remove_file(&path), "File deleted")
    };

    match removed {
        Ok(()) => {
            info!("Borrado {}", path.display());
            Response::text(what)
        }
        Err(e) => {
            error!("Error borrando {}: {}", path.display(), e);
            Response::error(StatusCode::InternalServerError, "Could not delete file")
        }
    }
}

/// Handler para `POST /mkdir/{dir}`
pub fn mkdir_handler(req: &Request, config: &Config) -> Response {
    let Some(name) = safe_name(req, "/mkdir/") else {
        return Response::new(StatusCode::NotFound);
    };

    let path = config.file_path(name);
    match fs::create_dir_all(&path) {
        Ok(()) => {
            debug!("Directorio creado: {}", path.display());
            Response::new(StatusCode::Created)
        }
        Err(e) => {
            error!("Error creando {}: {}", path.display(), e);
            Response::error(StatusCode::InternalServerError, "Could not create directory")
        }
    }
}

/// Content-Type según la extensión del archivo
pub fn content_type_for(path: &str) -> &'static str {
    if path.ends_with(".html") {
        "text/html; charset=utf-8"
    } else if path.ends_with(".css") {
        "text/css; charset=utf-8"
    } else if path.ends_with(".js") {
        "application/javascript; charset=utf-8"
    } else {
        "application/octet-stream"
    }
}

/// Handler para `GET /docs` y `GET /docs/{path}`
///
/// Sin `--docs-directory` la ruta no existe (404).
pub fn docs_handler(req: &Request, config: &Config) -> Response {
    let Some(docs) = config.docs_directory() else {
        return Response::new(StatusCode::NotFound);
    };

    let name = match req.path() {
        "/docs" | "/docs/" => "index.html",
        other => other.strip_prefix("/docs/").unwrap_or_default(),
    };
    let Some(path) = relative_path(name) else {
        return Response::new(StatusCode::NotFound);
    };

    serve_file(&docs.join(path), content_type_for(name))
}
