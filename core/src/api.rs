use crate::{Context, RequestDescriptor, Result, SignedRequest, SigningMethod};
use std::fmt::Debug;

/// SigningCredential is the trait used by signer as the signing credential.
pub trait SigningCredential: Clone + Debug + Send + Sync + Unpin + 'static {
    /// Check if the credential is usable for signing.
    fn is_valid(&self) -> bool;
}

impl<T: SigningCredential> SigningCredential for Option<T> {
    fn is_valid(&self) -> bool {
        let Some(cred) = self else {
            return false;
        };

        cred.is_valid()
    }
}

/// SignRequest is the trait used by signer to sign the request.
///
/// Implementations are pure: they read the request descriptor and return a
/// [`SignedRequest`], they never mutate the input and never perform I/O.
pub trait SignRequest: Debug + Send + Sync + Unpin + 'static {
    /// Credential used by this builder.
    type Credential: Send + Sync + Unpin + 'static;

    /// Sign the request.
    ///
    /// ## Signing method
    ///
    /// [`SigningMethod::Header`] returns the request with signing headers
    /// attached. [`SigningMethod::Query`] returns a URL carrying the signature
    /// in its query string, valid for the given duration.
    fn sign_request(
        &self,
        ctx: &Context,
        req: &RequestDescriptor,
        credential: &Self::Credential,
        method: SigningMethod,
    ) -> Result<SignedRequest>;
}
