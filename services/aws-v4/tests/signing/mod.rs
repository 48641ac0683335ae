mod presigned;
mod special_chars;
mod standard;

use chrono::{TimeZone, Utc};
use s3sign_aws_v4::{Credential, RequestSigner};
use s3sign_core::time::FixedClock;
use s3sign_core::Context;

pub const ACCESS_KEY: &str = "AKIDEXAMPLE";
pub const SECRET_KEY: &str = "wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY";

/// Context with the clock fixed at `2013-05-24T00:00:00Z`.
pub fn init_signing_test() -> (Context, RequestSigner, Credential) {
    let _ = env_logger::builder().is_test(true).try_init();

    let ctx = Context::new().with_clock(FixedClock::new(
        Utc.with_ymd_and_hms(2013, 5, 24, 0, 0, 0).unwrap(),
    ));

    (
        ctx,
        RequestSigner::new("s3", "us-east-1"),
        Credential::new(ACCESS_KEY, SECRET_KEY),
    )
}

/// Extract the signature from an `Authorization` header or a presigned url.
pub fn signature_of(s: &str) -> &str {
    let (_, sig) = s
        .rsplit_once("Signature=")
        .expect("signature must be present");
    assert_eq!(sig.len(), 64, "signature must be 64 hex chars: {sig}");
    assert!(sig.bytes().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase()));
    sig
}
