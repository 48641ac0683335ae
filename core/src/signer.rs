use crate::{
    Context, Error, RequestDescriptor, Result, SignRequest, SignedRequest, SigningCredential,
    SigningMethod,
};
use http::HeaderMap;
use std::sync::Arc;
use std::time::Duration;

/// Signer binds a context, a credential and a request builder together.
///
/// It holds no mutable state: every call signs from the same immutable
/// inputs, so a signer can be cloned and shared across threads freely.
#[derive(Clone, Debug)]
pub struct Signer<K: SigningCredential> {
    ctx: Context,
    credential: K,
    builder: Arc<dyn SignRequest<Credential = K>>,
}

impl<K: SigningCredential> Signer<K> {
    /// Create a new signer.
    pub fn new(ctx: Context, credential: K, builder: impl SignRequest<Credential = K>) -> Self {
        Self {
            ctx,
            credential,
            builder: Arc::new(builder),
        }
    }

    /// Get the context used by this signer.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Sign the request with the given signing method.
    pub fn sign_request(
        &self,
        req: &RequestDescriptor,
        method: SigningMethod,
    ) -> Result<SignedRequest> {
        if !self.credential.is_valid() {
            return Err(Error::credential_invalid(
                "credential is missing access key or secret key",
            ));
        }

        self.builder
            .sign_request(&self.ctx, req, &self.credential, method)
    }

    /// Sign the request in headers, returning the full header set.
    pub fn sign(&self, req: &RequestDescriptor) -> Result<HeaderMap> {
        Ok(self.sign_request(req, SigningMethod::Header)?.headers)
    }

    /// Sign the request in query, returning a URL valid for `expires_in`.
    pub fn presign(&self, req: &RequestDescriptor, expires_in: Duration) -> Result<String> {
        Ok(self
            .sign_request(req, SigningMethod::Query(expires_in))?
            .url)
    }
}
