use crate::constants::AWS4_REQUEST;
use s3sign_core::hash::SHA256_OUTPUT_LEN;
use s3sign_core::time::{format_date, DateTime};
use s3sign_core::{Context, Result};
use std::fmt::{Display, Formatter};

/// Scope a signature is bound to: `20130524/us-east-1/s3/aws4_request`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningScope {
    /// Date stamp in `YYYYMMDD`.
    pub date_stamp: String,
    /// Region of the service.
    pub region: String,
    /// Service name, `s3` for object storage.
    pub service: String,
}

impl SigningScope {
    /// Build the scope for the signing instant `time`.
    pub fn new(time: DateTime, region: &str, service: &str) -> Self {
        Self {
            date_stamp: format_date(time),
            region: region.to_string(),
            service: service.to_string(),
        }
    }
}

impl Display for SigningScope {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.date_stamp, self.region, self.service, AWS4_REQUEST
        )
    }
}

/// Derive the signing key for `scope`.
///
/// ```text
/// kDate    = HMAC("AWS4" + secret, date_stamp)
/// kRegion  = HMAC(kDate, region)
/// kService = HMAC(kRegion, service)
/// kSigning = HMAC(kService, "aws4_request")
/// ```
///
/// Every step works on raw bytes, the stages must run in exactly this order.
pub fn generate_signing_key(
    ctx: &Context,
    secret: &str,
    scope: &SigningScope,
) -> Result<[u8; SHA256_OUTPUT_LEN]> {
    // Sign secret
    let secret = format!("AWS4{secret}");
    // Sign date
    let sign_date = ctx.hmac_sha256(secret.as_bytes(), scope.date_stamp.as_bytes())?;
    // Sign region
    let sign_region = ctx.hmac_sha256(&sign_date, scope.region.as_bytes())?;
    // Sign service
    let sign_service = ctx.hmac_sha256(&sign_region, scope.service.as_bytes())?;
    // Sign request
    ctx.hmac_sha256(&sign_service, AWS4_REQUEST.as_bytes())
}
