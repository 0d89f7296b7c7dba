//! Endpoint descriptors.
//!
//! A [`Request<T>`] describes one API call (method, path, query, body)
//! without binding it to a server or credentials. The type parameter is the
//! decoded result: a single resource for [`Client::execute_one`] or a
//! `Vec` of resources for [`Client::execute_many`].
//!
//! [`Client::execute_one`]: crate::Client::execute_one
//! [`Client::execute_many`]: crate::Client::execute_many

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use serde::Serialize;

/// HTTP methods used by the GitHub API descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Head,
    Options,
}

impl Method {
    /// The method name as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Head => reqwest::Method::HEAD,
            Method::Options => reqwest::Method::OPTIONS,
        }
    }
}

/// An immutable description of one API call, typed by its decoded result.
///
/// Equality and hashing consider method, path, query parameters and body.
pub struct Request<T> {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<Vec<u8>>,
    _value: PhantomData<fn() -> T>,
}

impl<T> Request<T> {
    /// Create a descriptor from its parts.
    pub fn new(
        method: Method,
        path: impl Into<String>,
        query: Vec<(String, String)>,
        body: Option<Vec<u8>>,
    ) -> Self {
        Self {
            method,
            path: path.into(),
            query,
            body,
            _value: PhantomData,
        }
    }

    /// A GET request with no query parameters.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path, Vec::new(), None)
    }

    /// A GET request with query parameters, kept in the given order.
    pub fn get_with_query<K, V>(path: impl Into<String>, query: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let query = query.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self::new(Method::Get, path, query, None)
    }

    /// A POST request whose body is the JSON encoding of `payload`.
    pub fn post<B: Serialize + ?Sized>(
        path: impl Into<String>,
        payload: &B,
    ) -> serde_json::Result<Self> {
        Ok(Self::new(Method::Post, path, Vec::new(), Some(serde_json::to_vec(payload)?)))
    }

    /// A PUT request whose body is the JSON encoding of `payload`.
    pub fn put<B: Serialize + ?Sized>(
        path: impl Into<String>,
        query: Vec<(String, String)>,
        payload: &B,
    ) -> serde_json::Result<Self> {
        Ok(Self::new(Method::Put, path, query, Some(serde_json::to_vec(payload)?)))
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }
}

impl<T> Clone for Request<T> {
    fn clone(&self) -> Self {
        Self {
            method: self.method,
            path: self.path.clone(),
            query: self.query.clone(),
            body: self.body.clone(),
            _value: PhantomData,
        }
    }
}

impl<T> PartialEq for Request<T> {
    fn eq(&self, other: &Self) -> bool {
        self.method == other.method
            && self.path == other.path
            && self.query == other.query
            && self.body == other.body
    }
}

impl<T> Eq for Request<T> {}

impl<T> Hash for Request<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.method.hash(state);
        self.path.hash(state);
        self.query.hash(state);
        self.body.hash(state);
    }
}

impl<T> fmt::Debug for Request<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("query", &self.query)
            .field("body_len", &self.body.as_ref().map(Vec::len))
            .finish()
    }
}
