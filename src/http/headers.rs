//! # Headers HTTP
//! src/http/headers.rs
//!
//! Secuencia ordenada de pares `key: value`. Se permiten claves duplicadas
//! (por ejemplo varios `Set-Cookie`) y se respeta el orden de inserción,
//! que es también el orden en que se serializan.
//!
//! La búsqueda por nombre no distingue mayúsculas y retorna la **primera**
//! coincidencia.

use std::fmt;

/// Un header individual
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub key: String,
    pub value: String,
}

impl Header {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.value)
    }
}

/// Colección ordenada de headers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<Header>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Agrega un header al final, sin eliminar duplicados
    ///
    /// # Ejemplo
    /// ```
    /// use expresso::http::Headers;
    ///
    /// let mut headers = Headers::new();
    /// headers.push("Set-Cookie", "a=1");
    /// headers.push("Set-Cookie", "b=2");
    ///
    /// assert_eq!(headers.len(), 2);
    /// assert_eq!(headers.get("set-cookie"), Some("a=1"));
    /// ```
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push(Header::new(key, value));
    }

    /// Reemplaza todas las apariciones de `key` por un único header al final
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.remove(key);
        self.push(key, value);
    }

    /// Elimina todas las apariciones de `key`, retorna cuántas había
    pub fn remove(&mut self, key: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|h| !h.key.eq_ignore_ascii_case(key));
        before - self.entries.len()
    }

    /// Primer valor cuyo nombre coincide con `key` (sin distinguir mayúsculas)
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|h| h.key.eq_ignore_ascii_case(key))
            .map(|h| h.value.as_str())
    }

    /// Todos los valores de `key`, en orden de inserción
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |h| h.key.eq_ignore_ascii_case(key))
            .map(|h| h.value.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Header> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = &'a Header;
    type IntoIter = std::slice::Iter<'a, Header>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| Header::new(k, v)).collect(),
        }
    }
}
