use super::{init_signing_test, signature_of};
use pretty_assertions::assert_eq;
use s3sign_aws_v4::{encode_object_key, Endpoint};
use s3sign_core::{RequestDescriptor, Result};

#[test]
fn test_presign_key_with_special_characters() -> Result<()> {
    let (ctx, signer, cred) = init_signing_test();
    let endpoint = Endpoint::new("http://127.0.0.1:9000", true)?;
    let key = "!@#$%^&*()_+-=;:'><,/?.txt";

    let url = signer.presign_object(&ctx, &cred, &endpoint, "test", key, 3600)?;
    assert!(url.starts_with(
        "http://127.0.0.1:9000/test/%21%40%23%24%25%5E%26%2A%28%29_%2B-%3D%3B%3A%27%3E%3C%2C/%3F.txt?"
    ));
    assert_eq!(
        signature_of(&url),
        "dd1b0bf77b93348015a15ec7ff64a62f556560b815be20fbb9d1bfee4c95b292"
    );
    Ok(())
}

#[test]
fn test_presign_key_with_unicode() -> Result<()> {
    let (ctx, signer, cred) = init_signing_test();
    let endpoint = Endpoint::new("http://127.0.0.1:9000", true)?;

    let url = signer.presign_object(&ctx, &cred, &endpoint, "test", "文档/报告 2024.pdf", 3600)?;
    assert!(url.starts_with(
        "http://127.0.0.1:9000/test/%E6%96%87%E6%A1%A3/%E6%8A%A5%E5%91%8A%202024.pdf?"
    ));
    assert_eq!(
        signature_of(&url),
        "31ad7420a8909e3a092c2bab560bf37a02e3a1d89de19adef8220728c44246e1"
    );
    Ok(())
}

#[test]
fn test_slash_in_key_stays_separator() {
    assert_eq!(encode_object_key("a/b/c"), "a/b/c");
    assert_ne!(encode_object_key("a/b/c"), encode_object_key("a%2Fb/c"));
}

#[test]
fn test_sign_path_encoded_or_not() -> Result<()> {
    let (ctx, signer, cred) = init_signing_test();

    // "(" and ")" are valid in a raw uri path, the canonical uri encodes them anyway.
    let raw = RequestDescriptor::new("GET", "https://examplebucket.s3.amazonaws.com/a(1).txt")?;
    let encoded =
        RequestDescriptor::new("GET", "https://examplebucket.s3.amazonaws.com/a%281%29.txt")?;

    assert_eq!(
        signer.sign(&ctx, &raw, &cred)?["authorization"],
        signer.sign(&ctx, &encoded, &cred)?["authorization"]
    );
    Ok(())
}
