//! # Query Parameters
//! src/http/params.rs
//!
//! Extrae los parámetros de la query string de una URL.
//!
//! ```text
//! /fibonacci?num=10&fast  →  [("num", "10"), ("fast", "")]
//! ```
//!
//! No se hace percent-decoding: los valores llegan tal cual vienen en la URL.

/// Un parámetro `key=value` de la query string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub key: String,
    pub value: String,
}

impl Param {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Secuencia ordenada de parámetros (pueden repetirse)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<Param>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extrae los parámetros de la parte de la URL posterior al primer `?`
    ///
    /// # Ejemplo
    /// ```
    /// use expresso::http::Params;
    ///
    /// let params = Params::from_url("/a?x=1&y=2&debug");
    ///
    /// assert_eq!(params.get("x"), Some("1"));
    /// assert_eq!(params.get("debug"), Some(""));
    /// assert_eq!(params.len(), 3);
    /// ```
    pub fn from_url(url: &str) -> Self {
        match url.split_once('?') {
            Some((_, query)) => Self::from_query(query),
            None => Self::new(),
        }
    }

    /// Parsea una query string (`a=1&b=2`) sin el `?` inicial
    pub fn from_query(query: &str) -> Self {
        let mut params = Self::new();

        for pair in query.split('&') {
            if pair.is_empty() {
                continue;
            }

            // Parámetro sin '=' (ej: "?debug") queda con valor vacío
            match pair.split_once('=') {
                Some((key, value)) => params.push(key, value),
                None => params.push(pair, ""),
            }
        }

        params
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push(Param::new(key, value));
    }

    /// Primer valor con esa clave exacta
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.value.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Param> {
        self.entries.iter()
    }

    /// Reconstruye la query string `k=v&k2=v2` en orden
    pub fn to_query(&self) -> String {
        self.entries
            .iter()
            .map(|p| format!("{}={}", p.key, p.value))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = &'a Param;
    type IntoIter = std::slice::Iter<'a, Param>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
