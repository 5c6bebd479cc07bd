//! # Métodos HTTP
//! src/http/method.rs

use std::fmt;
use std::str::FromStr;

use super::message::ParseError;

/// Métodos HTTP soportados
///
/// Cualquier otro texto (incluido `get` en minúsculas) se rechaza.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET - Obtener un recurso
    GET,

    /// POST - Enviar datos a un recurso
    POST,

    PUT,

    DELETE,

    PATCH,

    /// HEAD - Como GET pero solo retorna headers
    HEAD,

    OPTIONS,
}

impl Method {
    /// Convierte el método a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::PATCH => "PATCH",
            Method::HEAD => "HEAD",
            Method::OPTIONS => "OPTIONS",
        }
    }
}

impl FromStr for Method {
    type Err = ParseError;

    /// Parsea un método HTTP (comparación exacta, sensible a mayúsculas)
    ///
    /// # Ejemplo
    /// ```
    /// use expresso::http::Method;
    ///
    /// assert_eq!("PATCH".parse::<Method>().unwrap(), Method::PATCH);
    /// assert!("TRACE".parse::<Method>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(Method::GET),
            "POST" => Ok(Method::POST),
            "PUT" => Ok(Method::PUT),
            "DELETE" => Ok(Method::DELETE),
            "PATCH" => Ok(Method::PATCH),
            "HEAD" => Ok(Method::HEAD),
            "OPTIONS" => Ok(Method::OPTIONS),
            _ => Err(ParseError::InvalidMethod(s.to_string())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_methods_round_trip() {
        for method in [
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::HEAD,
            Method::OPTIONS,
        ] {
            assert_eq!(method.as_str().parse::<Method>().unwrap(), method);
        }
    }

    #[test]
    fn test_invalid_method() {
        assert_eq!(
            "TRACE".parse::<Method>(),
            Err(ParseError::InvalidMethod("TRACE".to_string()))
        );
    }

    #[test]
    fn test_method_is_case_sensitive() {
        assert!("get".parse::<Method>().is_err());
        assert!("Post".parse::<Method>().is_err());
    }
}
