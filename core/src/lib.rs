//! Core components for signing S3 requests.
//!
//! This crate provides the foundational types and traits shared by the
//! s3sign signers. It has no knowledge of any particular signature scheme.
//!
//! ## Overview
//!
//! - **Context**: holds the clock, the crypto provider and the environment a signer reads
//! - **RequestDescriptor**: the request to be signed, never mutated by a signer
//! - **Traits**: [`SigningCredential`] to validate credentials and [`SignRequest`] to sign requests
//! - **Signer**: binds a context, a credential and a [`SignRequest`] implementation together
//!
//! ## Example
//!
//! ```
//! use http::HeaderValue;
//! use s3sign_core::{
//!     Context, RequestDescriptor, Result, SignRequest, SignedRequest, Signer,
//!     SigningCredential, SigningMethod,
//! };
//!
//! #[derive(Clone, Debug)]
//! struct MyCredential {
//!     token: String,
//! }
//!
//! impl SigningCredential for MyCredential {
//!     fn is_valid(&self) -> bool {
//!         !self.token.is_empty()
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct MyBuilder;
//!
//! impl SignRequest for MyBuilder {
//!     type Credential = MyCredential;
//!
//!     fn sign_request(
//!         &self,
//!         _: &Context,
//!         req: &RequestDescriptor,
//!         cred: &Self::Credential,
//!         _: SigningMethod,
//!     ) -> Result<SignedRequest> {
//!         let mut headers = req.headers.clone();
//!         headers.insert(http::header::AUTHORIZATION, HeaderValue::from_str(&cred.token)?);
//!         Ok(SignedRequest {
//!             method: req.method.clone(),
//!             url: req.uri.to_string(),
//!             headers,
//!         })
//!     }
//! }
//!
//! # fn main() -> Result<()> {
//! let signer = Signer::new(
//!     Context::new(),
//!     MyCredential { token: "token".to_string() },
//!     MyBuilder,
//! );
//! let req = RequestDescriptor::new("GET", "https://example.com")?;
//! let headers = signer.sign(&req)?;
//! assert_eq!(headers["authorization"], "token");
//! # Ok(())
//! # }
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: SHA-256 and HMAC-SHA256 behind the [`hash::CryptoProvider`] trait
//! - [`time`]: timestamp formatting and the [`time::SigningClock`] trait
//! - [`utils`]: secret redaction for debug output

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod error;
pub use error::{Error, ErrorKind, Result};

mod context;
pub use context::Context;
mod env;
pub use env::Env;
pub use env::NoopEnv;
pub use env::OsEnv;
pub use env::StaticEnv;

mod api;
pub use api::{SignRequest, SigningCredential};
mod request;
pub use request::{RequestDescriptor, SignedRequest, SigningMethod, SigningRequest};
mod signer;
pub use signer::Signer;
