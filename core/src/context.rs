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

use crate::hash::{CryptoProvider, Sha2Crypto, SHA256_OUTPUT_LEN};
use crate::time::{DateTime, SigningClock, SystemClock};
use crate::{Env, NoopEnv, Result};
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

/// Context provides the context for the request signing.
///
/// It carries every capability a signer needs from its host: the clock,
/// the crypto primitives and the environment. Nothing in it is mutable, so
/// one context can be shared by any number of concurrent signing calls.
///
/// ## Defaults
///
/// - clock: [`SystemClock`]
/// - crypto: [`Sha2Crypto`]
/// - env: [`NoopEnv`], configure [`crate::OsEnv`] explicitly to read the process env
///
/// ## Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use s3sign_core::time::FixedClock;
/// use s3sign_core::{Context, OsEnv};
///
/// let ctx = Context::new()
///     .with_env(OsEnv)
///     .with_clock(FixedClock::new(Utc.with_ymd_and_hms(2013, 5, 24, 0, 0, 0).unwrap()));
/// ```
#[derive(Clone)]
pub struct Context {
    clock: Arc<dyn SigningClock>,
    crypto: Arc<dyn CryptoProvider>,
    env: Arc<dyn Env>,
}

impl Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("clock", &self.clock)
            .field("crypto", &self.crypto)
            .field("env", &self.env)
            .finish()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Create a new Context with the default components.
    pub fn new() -> Self {
        Self {
            clock: Arc::new(SystemClock),
            crypto: Arc::new(Sha2Crypto),
            env: Arc::new(NoopEnv),
        }
    }

    /// Replace the clock implementation.
    pub fn with_clock(mut self, clock: impl SigningClock) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Replace the crypto provider implementation.
    pub fn with_crypto(mut self, crypto: impl CryptoProvider) -> Self {
        self.crypto = Arc::new(crypto);
        self
    }

    /// Replace the environment implementation.
    pub fn with_env(mut self, env: impl Env) -> Self {
        self.env = Arc::new(env);
        self
    }

    /// Read the signing clock.
    ///
    /// Call this once per signing operation and reuse the returned instant.
    #[inline]
    pub fn now(&self) -> DateTime {
        self.clock.now()
    }

    /// Hex encoded SHA-256 digest through the configured crypto provider.
    #[inline]
    pub fn hex_sha256(&self, content: &[u8]) -> Result<String> {
        self.crypto.hex_sha256(content)
    }

    /// HMAC-SHA256 through the configured crypto provider.
    #[inline]
    pub fn hmac_sha256(&self, key: &[u8], content: &[u8]) -> Result<[u8; SHA256_OUTPUT_LEN]> {
        self.crypto.hmac_sha256(key, content)
    }

    /// Hex encoded HMAC-SHA256 through the configured crypto provider.
    #[inline]
    pub fn hex_hmac_sha256(&self, key: &[u8], content: &[u8]) -> Result<String> {
        self.crypto.hex_hmac_sha256(key, content)
    }

    /// Get the environment variable.
    ///
    /// - Returns `Some(v)` if the environment variable is found and is valid utf-8.
    /// - Returns `None` if the environment variable is not found or value is invalid.
    #[inline]
    pub fn env_var(&self, key: &str) -> Option<String> {
        self.env.var(key)
    }

    /// Returns an hashmap of (variable, value) pairs of strings, for all the
    /// environment variables of the current process.
    #[inline]
    pub fn env_vars(&self) -> HashMap<String, String> {
        self.env.vars()
    }
}
