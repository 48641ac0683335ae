use crate::constants::AWS_URI_ENCODE_SET;
use http::uri::{Authority, Scheme};
use http::Uri;
use percent_encoding::utf8_percent_encode;
use s3sign_core::{Error, Result};
use std::fmt::{Display, Formatter};

/// Base URL of an S3 compatible service.
///
/// Default ports (`443` for https, `80` for http) are dropped from the
/// authority so the signed `host` matches what an http client sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    scheme: Scheme,
    authority: Authority,
    base_path: String,
    force_path_style: bool,
}

impl Endpoint {
    /// Parse an endpoint like `https://s3.amazonaws.com` or
    /// `http://127.0.0.1:9000/storage`.
    pub fn new(url: &str, force_path_style: bool) -> Result<Self> {
        let uri = url.trim().parse::<Uri>().map_err(|e| {
            Error::config_invalid(format!("endpoint '{url}' is not a valid url")).with_source(e)
        })?;

        let scheme = uri
            .scheme()
            .cloned()
            .ok_or_else(|| Error::config_invalid(format!("endpoint '{url}' has no scheme")))?;
        if scheme != Scheme::HTTP && scheme != Scheme::HTTPS {
            return Err(Error::config_invalid(format!(
                "endpoint '{url}' must use http or https"
            )));
        }
        let authority = uri
            .authority()
            .ok_or_else(|| Error::config_invalid(format!("endpoint '{url}' has no host")))?;
        if authority.host().is_empty() {
            return Err(Error::config_invalid(format!("endpoint '{url}' has no host")));
        }
        if authority.as_str().contains('@') {
            return Err(Error::config_invalid(format!(
                "endpoint '{url}' must not carry user info"
            )));
        }
        if uri.query().is_some() {
            return Err(Error::config_invalid(format!(
                "endpoint '{url}' must not carry a query"
            )));
        }

        let default_port = if scheme == Scheme::HTTPS { 443 } else { 80 };
        let authority = match authority.port_u16() {
            Some(port) if port == default_port => {
                authority.host().parse::<Authority>().map_err(|e| {
                    Error::config_invalid(format!("endpoint '{url}' has an invalid host"))
                        .with_source(e)
                })?
            }
            _ => authority.clone(),
        };

        Ok(Self {
            scheme,
            authority,
            base_path: uri.path().trim_end_matches('/').to_string(),
            force_path_style,
        })
    }

    /// Build the URL of an object.
    ///
    /// - path style: `{scheme}://{authority}{base}/{bucket}/{key}`
    /// - virtual hosted: `{scheme}://{bucket}.{authority}{base}/{key}`
    ///
    /// Every segment of `key` is encoded on its own, a `/` inside the key
    /// stays a path separator.
    pub fn object_url(&self, bucket: &str, key: &str) -> Result<String> {
        if bucket.is_empty() {
            return Err(Error::request_invalid("bucket name is empty"));
        }
        if bucket.contains('/') {
            return Err(Error::request_invalid(format!(
                "bucket name '{bucket}' must not contain '/'"
            )));
        }

        let key = encode_object_key(key);
        let url = if self.force_path_style {
            format!(
                "{}://{}{}/{}/{}",
                self.scheme,
                self.authority,
                self.base_path,
                utf8_percent_encode(bucket, &AWS_URI_ENCODE_SET),
                key
            )
        } else {
            format!(
                "{}://{}.{}{}/{}",
                self.scheme, bucket, self.authority, self.base_path, key
            )
        };

        Ok(url)
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}://{}{}", self.scheme, self.authority, self.base_path)
    }
}

/// Encode an object key segment by segment.
pub fn encode_object_key(key: &str) -> String {
    key.split('/')
        .map(|segment| utf8_percent_encode(segment, &AWS_URI_ENCODE_SET).to_string())
        .collect::<Vec<_>>()
        .join("/")
}
