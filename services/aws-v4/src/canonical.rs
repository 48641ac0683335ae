//! Canonical request construction for AWS Signature Version 4.
//!
//! ```text
//! HTTPRequestMethod\n
//! CanonicalURI\n
//! CanonicalQueryString\n
//! CanonicalHeaders\n
//! SignedHeaders\n
//! HashedPayload
//! ```
//!
//! `CanonicalHeaders` ends with its own newline, so the canonical request
//! always has an empty line before `SignedHeaders`.

use crate::constants::{AWS_URI_ENCODE_SET, UNSIGNED_PAYLOAD};
use http::header::AUTHORIZATION;
use http::{HeaderMap, Method};
use percent_encoding::{percent_decode_str, utf8_percent_encode};
use s3sign_core::{Context, Error, Result, SigningRequest};
use std::fmt::{Display, Formatter, Write};

/// The canonical form of a request, built fresh for every signing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRequest {
    /// Upper-cased HTTP method.
    pub method: String,
    /// Path with every segment URI encoded, `/` for an empty path.
    pub canonical_uri: String,
    /// Encoded and sorted query string, empty if there is no query.
    pub canonical_query: String,
    /// `name:value\n` lines for every signed header.
    pub canonical_headers: String,
    /// Signed header names joined by `;`.
    pub signed_headers: String,
    /// Hex encoded SHA256 of the payload or `UNSIGNED-PAYLOAD`.
    pub payload_hash: String,
}

impl CanonicalRequest {
    /// Canonicalize a signing request.
    ///
    /// Every header present on the request except `Authorization` is signed.
    pub fn build(req: &SigningRequest, payload_hash: &str) -> Result<Self> {
        let (canonical_headers, signed_headers) = canonical_headers(&req.headers)?;

        Ok(Self {
            method: req.method.as_str().to_ascii_uppercase(),
            canonical_uri: canonical_uri(&req.path)?,
            canonical_query: canonical_query_string(&req.query),
            canonical_headers,
            signed_headers,
            payload_hash: payload_hash.to_string(),
        })
    }
}

impl Display for CanonicalRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.method)?;
        writeln!(f, "{}", self.canonical_uri)?;
        writeln!(f, "{}", self.canonical_query)?;
        writeln!(f, "{}", self.canonical_headers)?;
        writeln!(f, "{}", self.signed_headers)?;
        write!(f, "{}", self.payload_hash)
    }
}

/// Build the canonical URI by encoding each path segment individually.
///
/// Segments are percent decoded first so an already encoded path is not
/// encoded twice. Forward slashes stay separators; an encoded `%2F` inside
/// a segment stays encoded.
pub fn canonical_uri(path: &str) -> Result<String> {
    if path.is_empty() || path == "/" {
        return Ok("/".to_string());
    }

    let mut s = String::with_capacity(path.len());
    for (idx, segment) in path.split('/').enumerate() {
        if idx > 0 {
            s.push('/');
        }
        let decoded = percent_decode_str(segment).decode_utf8().map_err(|e| {
            Error::request_invalid(format!("path segment '{segment}' is not valid utf-8"))
                .with_source(e)
        })?;
        s.extend(utf8_percent_encode(&decoded, &AWS_URI_ENCODE_SET));
    }

    Ok(s)
}

/// Build the canonical query string from decoded query pairs.
///
/// Keys and values are encoded independently, then pairs are sorted by
/// encoded key (and encoded value for repeated keys) in byte order.
pub fn canonical_query_string(query: &[(String, String)]) -> String {
    let mut pairs = query
        .iter()
        .map(|(k, v)| {
            (
                utf8_percent_encode(k, &AWS_URI_ENCODE_SET).to_string(),
                utf8_percent_encode(v, &AWS_URI_ENCODE_SET).to_string(),
            )
        })
        .collect::<Vec<_>>();
    pairs.sort();

    pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Build the canonical header block and the signed header list.
///
/// Returns `(canonical_headers, signed_headers)`. Names are lower-cased by
/// `HeaderMap` already; values are trimmed and repeated headers are joined
/// with `,`. Headers with an empty value are kept.
pub fn canonical_headers(headers: &HeaderMap) -> Result<(String, String)> {
    let mut names = headers
        .keys()
        .filter(|k| **k != AUTHORIZATION)
        .map(|k| k.as_str())
        .collect::<Vec<_>>();
    names.sort_unstable();

    let mut block = String::with_capacity(names.len() * 32);
    for name in names.iter() {
        write!(block, "{name}:")?;
        for (idx, value) in headers.get_all(*name).iter().enumerate() {
            if idx > 0 {
                block.push(',');
            }
            let mut value = value.clone();
            SigningRequest::header_value_normalize(&mut value);
            block.push_str(value.to_str()?);
        }
        block.push('\n');
    }

    Ok((block, names.join(";")))
}

/// Decide the payload hash for a request.
///
/// The body is hashed only when it is present and the method is neither
/// GET nor HEAD; everything else is `UNSIGNED-PAYLOAD`.
pub fn payload_hash(ctx: &Context, method: &Method, body: Option<&[u8]>) -> Result<String> {
    match body {
        Some(body) if method != Method::GET && method != Method::HEAD => ctx.hex_sha256(body),
        _ => Ok(UNSIGNED_PAYLOAD.to_string()),
    }
}
