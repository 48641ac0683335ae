//! AWS SigV4 signing for S3 compatible services.
//!
//! Two entry points share one canonicalization core:
//!
//! - [`RequestSigner::sign`] returns the headers of a header signed request.
//! - [`RequestSigner::presign`] and [`RequestSigner::presign_object`] return a
//!   query signed URL valid for a number of seconds.
//!
//! ## Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use s3sign_aws_v4::{Credential, Endpoint, RequestSigner};
//! use s3sign_core::time::FixedClock;
//! use s3sign_core::{Context, RequestDescriptor};
//!
//! # fn main() -> s3sign_core::Result<()> {
//! let ctx = Context::new().with_clock(FixedClock::new(
//!     Utc.with_ymd_and_hms(2013, 5, 24, 0, 0, 0).unwrap(),
//! ));
//! let cred = Credential::new("AKIDEXAMPLE", "wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY");
//! let signer = RequestSigner::new("s3", "us-east-1");
//!
//! let req = RequestDescriptor::new("GET", "https://examplebucket.s3.amazonaws.com/test.txt")?;
//! let headers = signer.sign(&ctx, &req, &cred)?;
//! assert!(headers["authorization"]
//!     .to_str()
//!     .unwrap()
//!     .starts_with("AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20130524/us-east-1/s3/aws4_request"));
//!
//! let endpoint = Endpoint::new("https://s3.amazonaws.com", false)?;
//! let url = signer.presign_object(&ctx, &cred, &endpoint, "examplebucket", "photo.jpg", 300)?;
//! assert!(url.contains("X-Amz-Expires=300"));
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

mod constants;
pub use constants::EMPTY_STRING_SHA256;
pub use constants::MAX_PRESIGN_EXPIRES_SECS;
pub use constants::UNSIGNED_PAYLOAD;

mod config;
pub use config::Config;
mod credential;
pub use credential::Credential;
mod endpoint;
pub use endpoint::encode_object_key;
pub use endpoint::Endpoint;

pub mod canonical;
mod signing_key;
pub use signing_key::generate_signing_key;
pub use signing_key::SigningScope;
mod sign_request;
pub use sign_request::calculate_signature;
pub use sign_request::string_to_sign;
pub use sign_request::RequestSigner;
