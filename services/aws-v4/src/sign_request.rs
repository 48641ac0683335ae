use crate::canonical::{payload_hash, CanonicalRequest};
use crate::constants::{
    AWS4_HMAC_SHA256, MAX_PRESIGN_EXPIRES_SECS, UNSIGNED_PAYLOAD, X_AMZ_ALGORITHM_QUERY,
    X_AMZ_CONTENT_SHA_256, X_AMZ_CREDENTIAL_QUERY, X_AMZ_DATE, X_AMZ_DATE_QUERY,
    X_AMZ_EXPIRES_QUERY, X_AMZ_SECURITY_TOKEN, X_AMZ_SECURITY_TOKEN_QUERY,
    X_AMZ_SIGNATURE_QUERY, X_AMZ_SIGNED_HEADERS_QUERY,
};
use crate::signing_key::{generate_signing_key, SigningScope};

use crate::{Credential, Endpoint};
use http::header::{AUTHORIZATION, HOST};
use http::{HeaderMap, HeaderValue};
use log::debug;
use s3sign_core::time::{format_iso8601, DateTime};
use s3sign_core::{
    Context, Error, RequestDescriptor, Result, SignRequest, SignedRequest, SigningMethod,
    SigningRequest,
};
use std::fmt::Write;

/// Query params a presign adds, removed from the input before signing.
const PRESIGN_QUERY_PARAMS: [&str; 7] = [
    X_AMZ_ALGORITHM_QUERY,
    X_AMZ_CREDENTIAL_QUERY,
    X_AMZ_DATE_QUERY,
    X_AMZ_EXPIRES_QUERY,
    X_AMZ_SIGNED_HEADERS_QUERY,
    X_AMZ_SECURITY_TOKEN_QUERY,
    X_AMZ_SIGNATURE_QUERY,
];

/// RequestSigner that implement AWS SigV4.
///
/// - [Signature Version 4 signing process](https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html)
/// - [Authenticating requests: using query parameters](https://docs.aws.amazon.com/AmazonS3/latest/API/sigv4-query-string-auth.html)
///
/// The signer only holds the scope it signs for. Clock and crypto come from
/// the [`Context`], the credential is borrowed per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSigner {
    service: String,
    region: String,
}

impl RequestSigner {
    /// Create a new signer for `service` in `region`.
    pub fn new(service: &str, region: &str) -> Self {
        Self {
            service: service.into(),
            region: region.into(),
        }
    }

    /// Sign the request in headers.
    ///
    /// Returns the caller's headers plus `host` (when absent), `x-amz-date`,
    /// `x-amz-content-sha256`, `x-amz-security-token` (with a session
    /// token) and `Authorization`.
    pub fn sign(
        &self,
        ctx: &Context,
        req: &RequestDescriptor,
        cred: &Credential,
    ) -> Result<HeaderMap> {
        Ok(self.sign_header(ctx, req, cred)?.headers)
    }

    /// Sign the request in query, returning a URL valid for
    /// `expires_in_secs` seconds.
    ///
    /// Only `host` is signed and the payload is always `UNSIGNED-PAYLOAD`.
    pub fn presign(
        &self,
        ctx: &Context,
        req: &RequestDescriptor,
        cred: &Credential,
        expires_in_secs: i64,
    ) -> Result<String> {
        Ok(self.sign_query(ctx, req, cred, expires_in_secs)?.url)
    }

    /// Presign a `GET` for `key` in `bucket` on `endpoint`.
    pub fn presign_object(
        &self,
        ctx: &Context,
        cred: &Credential,
        endpoint: &Endpoint,
        bucket: &str,
        key: &str,
        expires_in_secs: i64,
    ) -> Result<String> {
        let url = endpoint.object_url(bucket, key)?;
        let req = RequestDescriptor::new("GET", &url)?;

        self.presign(ctx, &req, cred, expires_in_secs)
    }

    fn sign_header(
        &self,
        ctx: &Context,
        req: &RequestDescriptor,
        cred: &Credential,
    ) -> Result<SignedRequest> {
        cred.check()?;

        let now = ctx.now();
        let mut signed_req = SigningRequest::build(req)?;

        // A stale signature must never be signed over.
        signed_req.headers.remove(AUTHORIZATION);

        // Insert HOST header if not present.
        if signed_req.headers.get(HOST).is_none() {
            signed_req
                .headers
                .insert(HOST, HeaderValue::from_str(signed_req.authority.as_str())?);
        }

        signed_req
            .headers
            .insert(X_AMZ_DATE, HeaderValue::from_str(&format_iso8601(now))?);

        // Keep a digest the caller computed already.
        let payload = match signed_req.headers.get(X_AMZ_CONTENT_SHA_256) {
            Some(v) => v.to_str()?.trim().to_string(),
            None => {
                let hash = payload_hash(ctx, &signed_req.method, req.body.as_deref())?;
                signed_req
                    .headers
                    .insert(X_AMZ_CONTENT_SHA_256, HeaderValue::from_str(&hash)?);
                hash
            }
        };

        if let Some(token) = &cred.session_token {
            let mut value = HeaderValue::from_str(token)?;
            value.set_sensitive(true);
            signed_req.headers.insert(X_AMZ_SECURITY_TOKEN, value);
        }

        let scope = SigningScope::new(now, &self.region, &self.service);
        debug!("calculated scope: {scope}");

        let creq = CanonicalRequest::build(&signed_req, &payload)?;
        let signature = self.calculate(ctx, cred, now, &scope, &creq)?;

        let mut authorization = HeaderValue::from_str(&format!(
            "{AWS4_HMAC_SHA256} Credential={}/{}, SignedHeaders={}, Signature={}",
            cred.access_key_id, scope, creq.signed_headers, signature
        ))?;
        authorization.set_sensitive(true);
        signed_req.headers.insert(AUTHORIZATION, authorization);

        Ok(SignedRequest {
            method: signed_req.method,
            url: req.uri.to_string(),
            headers: signed_req.headers,
        })
    }

    fn sign_query(
        &self,
        ctx: &Context,
        req: &RequestDescriptor,
        cred: &Credential,
        expires_in_secs: i64,
    ) -> Result<SignedRequest> {
        if expires_in_secs <= 0 {
            return Err(Error::expiry_invalid(format!(
                "expires in {expires_in_secs} seconds, must be positive"
            )));
        }
        if expires_in_secs > MAX_PRESIGN_EXPIRES_SECS {
            return Err(Error::expiry_invalid(format!(
                "expires in {expires_in_secs} seconds, must not exceed {MAX_PRESIGN_EXPIRES_SECS}"
            )));
        }
        cred.check()?;

        let now = ctx.now();
        let mut signed_req = SigningRequest::build(req)?;
        let scope = SigningScope::new(now, &self.region, &self.service);
        debug!("calculated scope: {scope}");

        // Presigned urls are requested by clients we don't control: only
        // the host is signed.
        let mut headers = HeaderMap::new();
        headers.insert(HOST, HeaderValue::from_str(signed_req.authority.as_str())?);
        signed_req.headers = headers;

        // Drop the auth params of an earlier presign so a url can be refreshed.
        signed_req.query.retain(|(k, _)| {
            !PRESIGN_QUERY_PARAMS
                .iter()
                .any(|p| k.eq_ignore_ascii_case(p))
        });

        signed_req.query_push(X_AMZ_ALGORITHM_QUERY, AWS4_HMAC_SHA256);
        signed_req.query_push(
            X_AMZ_CREDENTIAL_QUERY,
            format!("{}/{}", cred.access_key_id, scope),
        );
        signed_req.query_push(X_AMZ_DATE_QUERY, format_iso8601(now));
        signed_req.query_push(X_AMZ_EXPIRES_QUERY, expires_in_secs.to_string());
        signed_req.query_push(X_AMZ_SIGNED_HEADERS_QUERY, HOST.as_str());
        if let Some(token) = &cred.session_token {
            signed_req.query_push(X_AMZ_SECURITY_TOKEN_QUERY, token.as_str());
        }

        let creq = CanonicalRequest::build(&signed_req, UNSIGNED_PAYLOAD)?;
        let signature = self.calculate(ctx, cred, now, &scope, &creq)?;

        // The signature goes last, after the sorted parameters it covers.
        let mut query = creq.canonical_query.clone();
        write!(query, "&{X_AMZ_SIGNATURE_QUERY}={signature}")?;
        signed_req.path = creq.canonical_uri;

        Ok(SignedRequest {
            method: signed_req.method.clone(),
            url: signed_req.url_with_query(&query),
            headers: req.headers.clone(),
        })
    }

    fn calculate(
        &self,
        ctx: &Context,
        cred: &Credential,
        now: DateTime,
        scope: &SigningScope,
        creq: &CanonicalRequest,
    ) -> Result<String> {
        let creq = creq.to_string();
        debug!("calculated canonical request: {creq}");

        let encoded_req = ctx.hex_sha256(creq.as_bytes())?;
        let string_to_sign = string_to_sign(now, scope, &encoded_req)?;
        debug!("calculated string to sign: {string_to_sign}");

        calculate_signature(ctx, &cred.secret_access_key, scope, &string_to_sign)
    }
}

impl SignRequest for RequestSigner {
    type Credential = Credential;

    fn sign_request(
        &self,
        ctx: &Context,
        req: &RequestDescriptor,
        credential: &Self::Credential,
        method: SigningMethod,
    ) -> Result<SignedRequest> {
        match method {
            SigningMethod::Header => self.sign_header(ctx, req, credential),
            SigningMethod::Query(expire) => {
                let secs = i64::try_from(expire.as_secs()).map_err(|e| {
                    Error::expiry_invalid(format!("expires in {expire:?} is too large"))
                        .with_source(e)
                })?;
                self.sign_query(ctx, req, credential, secs)
            }
        }
    }
}

/// Build the string to sign.
///
/// ```text
/// AWS4-HMAC-SHA256
/// 20220313T072004Z
/// 20220313/<region>/<service>/aws4_request
/// <hashed_canonical_request>
/// ```
pub fn string_to_sign(
    time: DateTime,
    scope: &SigningScope,
    hashed_canonical_request: &str,
) -> Result<String> {
    let mut f = String::with_capacity(128);
    writeln!(f, "{AWS4_HMAC_SHA256}")?;
    writeln!(f, "{}", format_iso8601(time))?;
    writeln!(f, "{scope}")?;
    write!(f, "{hashed_canonical_request}")?;
    Ok(f)
}

/// Sign `string_to_sign` with the key derived for `scope`, returning the
/// lowercase hex signature.
pub fn calculate_signature(
    ctx: &Context,
    secret: &str,
    scope: &SigningScope,
    string_to_sign: &str,
) -> Result<String> {
    let signing_key = generate_signing_key(ctx, secret, scope)?;
    ctx.hex_hmac_sha256(&signing_key, string_to_sign.as_bytes())
}
