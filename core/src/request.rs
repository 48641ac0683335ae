use std::time::Duration;

use bytes::Bytes;
use http::header::HeaderName;
use http::uri::Authority;
use http::uri::Scheme;
use http::HeaderMap;
use http::HeaderValue;
use http::Method;
use http::Uri;
use percent_encoding::percent_decode_str;

use crate::Error;
use crate::Result;

/// Methods a request descriptor accepts.
const KNOWN_METHODS: [Method; 9] = [
    Method::GET,
    Method::HEAD,
    Method::PUT,
    Method::POST,
    Method::DELETE,
    Method::OPTIONS,
    Method::PATCH,
    Method::TRACE,
    Method::CONNECT,
];

/// The request to be signed.
///
/// Signers only read a descriptor: the signed header set or URL is returned
/// as a new value and the caller's copy stays untouched.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    /// HTTP method.
    pub method: Method,
    /// Absolute request URL.
    pub uri: Uri,
    /// HTTP headers, names are case-insensitive.
    pub headers: HeaderMap,
    /// Request body, `None` if the request has no body.
    pub body: Option<Bytes>,
}

impl RequestDescriptor {
    /// Create a new descriptor from a method name and an absolute URL.
    ///
    /// The method is matched case-insensitively against the standard HTTP
    /// verbs.
    pub fn new(method: &str, url: &str) -> Result<Self> {
        let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())?;
        let uri = url
            .parse::<Uri>()
            .map_err(|e| Error::request_invalid(format!("invalid url '{url}'")).with_source(e))?;

        Self::validate(method, uri)
    }

    /// Build a descriptor from http request parts and an optional body.
    pub fn from_parts(parts: &http::request::Parts, body: Option<Bytes>) -> Result<Self> {
        let mut req = Self::validate(parts.method.clone(), parts.uri.clone())?;
        req.headers = parts.headers.clone();
        req.body = body;
        Ok(req)
    }

    fn validate(method: Method, uri: Uri) -> Result<Self> {
        if !KNOWN_METHODS.contains(&method) {
            return Err(Error::request_invalid(format!(
                "unsupported http method '{method}'"
            )));
        }
        if uri.scheme().is_none() || uri.authority().is_none() {
            return Err(Error::request_invalid(format!(
                "request url '{uri}' must be absolute"
            )));
        }
        if uri.authority().is_some_and(|v| v.as_str().contains('@')) {
            return Err(Error::request_invalid(format!(
                "request url '{uri}' must not carry user info"
            )));
        }

        Ok(Self {
            method,
            uri,
            headers: HeaderMap::new(),
            body: None,
        })
    }

    /// Append a header.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self> {
        self.headers.append(
            HeaderName::from_bytes(name.as_bytes())?,
            HeaderValue::from_str(value)?,
        );
        Ok(self)
    }

    /// Set the request body.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Signing context for request.
///
/// A working copy of a [`RequestDescriptor`] split into the pieces a signer
/// canonicalizes.
#[derive(Debug)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// HTTP scheme.
    pub scheme: Scheme,
    /// HTTP authority.
    pub authority: Authority,
    /// HTTP path, still percent encoded.
    pub path: String,
    /// HTTP query parameters, percent decoded.
    pub query: Vec<(String, String)>,
    /// HTTP headers.
    pub headers: HeaderMap,
}

impl SigningRequest {
    /// Build a signing context from a request descriptor.
    pub fn build(req: &RequestDescriptor) -> Result<Self> {
        let scheme = req.uri.scheme().cloned().unwrap_or(Scheme::HTTP);
        let authority = req.uri.authority().ok_or_else(|| {
            Error::request_invalid("request without authority is invalid for signing")
        })?;

        Ok(SigningRequest {
            method: req.method.clone(),
            authority: host_authority(&scheme, authority)?,
            scheme,
            path: req.uri.path().to_string(),
            query: req.uri.query().map(parse_query).transpose()?.unwrap_or_default(),

            // Working copy, the caller's headers are never touched.
            headers: req.headers.clone(),
        })
    }

    /// Push a new query pair into query list.
    #[inline]
    pub fn query_push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.query.push((key.into(), value.into()));
    }

    /// Build the request URL with the given, already encoded, query string.
    pub fn url_with_query(&self, query: &str) -> String {
        let path = if self.path.is_empty() { "/" } else { &self.path };
        if query.is_empty() {
            format!("{}://{}{}", self.scheme, self.authority, path)
        } else {
            format!("{}://{}{}?{}", self.scheme, self.authority, path, query)
        }
    }

    /// Normalize header value by trimming leading and trailing whitespace.
    ///
    /// Whitespace inside the value is kept as is.
    pub fn header_value_normalize(v: &mut HeaderValue) {
        let bs = v.as_bytes();

        let is_ws = |b: &u8| *b == b' ' || *b == b'\t';
        let starting_index = bs.iter().position(|b| !is_ws(b)).unwrap_or(bs.len());
        let ending_offset = bs.iter().rev().position(|b| !is_ws(b)).unwrap_or(0);
        let ending_index = (bs.len() - ending_offset).max(starting_index);

        let sensitive = v.is_sensitive();
        // A slice of a valid HeaderValue with only whitespace removed is still valid.
        if let Ok(mut trimmed) = HeaderValue::from_bytes(&bs[starting_index..ending_index]) {
            trimmed.set_sensitive(sensitive);
            *v = trimmed;
        }
    }
}

/// Reduce an authority to what an http client sends as `host`.
///
/// User info is rejected and the scheme's default port is dropped.
fn host_authority(scheme: &Scheme, authority: &Authority) -> Result<Authority> {
    if authority.as_str().contains('@') {
        return Err(Error::request_invalid("user info in request url can't be signed"));
    }

    let default_port = if *scheme == Scheme::HTTPS { 443 } else { 80 };
    match authority.port_u16() {
        Some(port) if port == default_port => Ok(authority.host().parse::<Authority>()?),
        _ => Ok(authority.clone()),
    }
}

/// Parse a raw query string into decoded pairs.
///
/// Every percent sequence must decode to utf-8, the same rule the path
/// follows.
fn parse_query(query: &str) -> Result<Vec<(String, String)>> {
    // Splitting valid utf-8 at ascii delimiters keeps every piece valid.
    percent_decode_str(query).decode_utf8().map_err(|e| {
        Error::request_invalid(format!("query '{query}' is not valid utf-8")).with_source(e)
    })?;

    Ok(form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect())
}

/// SignedRequest is the result of a signing operation.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    /// HTTP method of the signed request.
    pub method: Method,
    /// URL to send the request to, carrying the signature for query signing.
    pub url: String,
    /// Full header set: the caller's headers plus the signing headers.
    pub headers: HeaderMap,
}

/// SigningMethod is the method that used in signing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SigningMethod {
    /// Signing with header.
    Header,
    /// Signing with query.
    Query(Duration),
}
