// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Hash related utils.

use crate::Error;
use crate::Result;
use hmac::Hmac;
use hmac::Mac;
use sha2::Digest;
use sha2::Sha256;
use std::fmt::Debug;

/// Length in bytes of a SHA-256 digest and of an HMAC-SHA256 tag.
pub const SHA256_OUTPUT_LEN: usize = 32;

/// CryptoProvider is the primitive crypto capability used by signers.
///
/// Signers never call a hashing library directly, they go through the
/// provider installed on [`crate::Context`]. The default provider is
/// [`Sha2Crypto`].
pub trait CryptoProvider: Debug + Send + Sync + 'static {
    /// SHA-256 digest of `content`.
    fn sha256(&self, content: &[u8]) -> Result<[u8; SHA256_OUTPUT_LEN]>;

    /// HMAC-SHA256 of `content` keyed with `key`.
    ///
    /// An empty key is a caller error and must be rejected.
    fn hmac_sha256(&self, key: &[u8], content: &[u8]) -> Result<[u8; SHA256_OUTPUT_LEN]>;

    /// Hex encoded SHA-256 digest, 64 lowercase characters.
    fn hex_sha256(&self, content: &[u8]) -> Result<String> {
        Ok(hex::encode(self.sha256(content)?))
    }

    /// Hex encoded HMAC-SHA256.
    fn hex_hmac_sha256(&self, key: &[u8], content: &[u8]) -> Result<String> {
        Ok(hex::encode(self.hmac_sha256(key, content)?))
    }
}

/// CryptoProvider backed by the RustCrypto `sha2` and `hmac` crates.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha2Crypto;

impl CryptoProvider for Sha2Crypto {
    fn sha256(&self, content: &[u8]) -> Result<[u8; SHA256_OUTPUT_LEN]> {
        Ok(sha256(content))
    }

    fn hmac_sha256(&self, key: &[u8], content: &[u8]) -> Result<[u8; SHA256_OUTPUT_LEN]> {
        hmac_sha256(key, content)
    }
}

/// SHA256 hash.
pub fn sha256(content: &[u8]) -> [u8; SHA256_OUTPUT_LEN] {
    let mut out = [0u8; SHA256_OUTPUT_LEN];
    out.copy_from_slice(Sha256::digest(content).as_slice());
    out
}

/// Hex encoded SHA256 hash.
///
/// Use this function instead of `hex::encode(sha256(content))` can reduce
/// extra copy.
pub fn hex_sha256(content: &[u8]) -> String {
    hex::encode(Sha256::digest(content).as_slice())
}

/// HMAC with SHA256 hash.
///
/// Returns an error for an empty key.
pub fn hmac_sha256(key: &[u8], content: &[u8]) -> Result<[u8; SHA256_OUTPUT_LEN]> {
    if key.is_empty() {
        return Err(Error::crypto_failure("hmac key must not be empty"));
    }

    let mut h = Hmac::<Sha256>::new_from_slice(key).map_err(|e| {
        Error::crypto_failure("failed to initialize hmac").with_source(anyhow::anyhow!("{e}"))
    })?;
    h.update(content);

    let mut out = [0u8; SHA256_OUTPUT_LEN];
    out.copy_from_slice(h.finalize().into_bytes().as_slice());
    Ok(out)
}

/// Hex encoded HMAC with SHA256 hash.
///
/// Use this function instead of `hex::encode(hmac_sha256(key, content))` can
/// reduce extra copy.
pub fn hex_hmac_sha256(key: &[u8], content: &[u8]) -> Result<String> {
    Ok(hex::encode(hmac_sha256(key, content)?))
}
