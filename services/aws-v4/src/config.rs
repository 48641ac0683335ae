use crate::constants::*;
use crate::{Credential, Endpoint, RequestSigner};
use log::warn;
use s3sign_core::utils::Redact;
use s3sign_core::{Context, Error, Result};
use serde::Deserialize;
use std::fmt::{Debug, Formatter};

/// Config for S3 signing.
///
/// Deserializes from the camelCase settings blob a storage client keeps
/// around, for example:
///
/// ```json
/// {
///   "endpoint": "https://s3.example.com",
///   "accessKey": "AKIDEXAMPLE",
///   "secretKey": "wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY",
///   "region": "us-east-1",
///   "forcePathStyle": true
/// }
/// ```
#[derive(Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// `endpoint` will be loaded from:
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_ENDPOINT_URL_S3`]
    /// - env value: [`AWS_ENDPOINT_URL`]
    pub endpoint: Option<String>,
    /// Endpoint handed out in shared links, falls back to `endpoint`.
    pub public_endpoint: Option<String>,
    /// `region` will be loaded from:
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_REGION`]
    /// - env value: [`AWS_DEFAULT_REGION`]
    /// - default to `us-east-1`
    pub region: Option<String>,
    /// `force_path_style` will be loaded from:
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_S3_FORCE_PATH_STYLE`]
    /// - default to `true`
    pub force_path_style: Option<bool>,
    /// `access_key_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_ACCESS_KEY_ID`]
    #[serde(alias = "accessKey")]
    pub access_key_id: Option<String>,
    /// `secret_access_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_SECRET_ACCESS_KEY`]
    #[serde(alias = "secretKey")]
    pub secret_access_key: Option<String>,
    /// `session_token` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_SESSION_TOKEN`]
    pub session_token: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("endpoint", &self.endpoint)
            .field("public_endpoint", &self.public_endpoint)
            .field("region", &self.region)
            .field("force_path_style", &self.force_path_style)
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("secret_access_key", &Redact::from(&self.secret_access_key))
            .field("session_token", &Redact::from(&self.session_token))
            .finish()
    }
}

impl Config {
    /// Parse config from a JSON settings blob.
    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s)
            .map_err(|e| Error::config_invalid("settings are not valid json").with_source(e))
    }

    /// Fill every unset field from the env of `ctx`.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        let envs = ctx.env_vars();

        if let Some(v) = envs
            .get(AWS_ENDPOINT_URL_S3)
            .or_else(|| envs.get(AWS_ENDPOINT_URL))
        {
            self.endpoint.get_or_insert(v.clone());
        }
        if let Some(v) = envs
            .get(AWS_REGION)
            .or_else(|| envs.get(AWS_DEFAULT_REGION))
        {
            self.region.get_or_insert(v.clone());
        }
        if let Some(v) = envs.get(AWS_S3_FORCE_PATH_STYLE) {
            match parse_bool(v) {
                Some(b) => {
                    self.force_path_style.get_or_insert(b);
                }
                None => warn!("ignoring {AWS_S3_FORCE_PATH_STYLE}={v}, expect true or false"),
            }
        }
        if let Some(v) = envs.get(AWS_ACCESS_KEY_ID) {
            self.access_key_id.get_or_insert(v.clone());
        }
        if let Some(v) = envs.get(AWS_SECRET_ACCESS_KEY) {
            self.secret_access_key.get_or_insert(v.clone());
        }
        if let Some(v) = envs.get(AWS_SESSION_TOKEN) {
            self.session_token.get_or_insert(v.clone());
        }

        self
    }

    /// Region to sign for.
    pub fn region(&self) -> &str {
        match self.region.as_deref() {
            Some(v) if !v.is_empty() => v,
            _ => DEFAULT_REGION,
        }
    }

    /// Whether buckets are addressed in the path.
    pub fn force_path_style(&self) -> bool {
        self.force_path_style.unwrap_or(true)
    }

    /// Build the credential.
    pub fn credential(&self) -> Result<Credential> {
        let (Some(ak), Some(sk)) = (&self.access_key_id, &self.secret_access_key) else {
            return Err(Error::credential_invalid(
                "access key id and secret access key are required",
            ));
        };

        let mut cred = Credential::new(ak, sk);
        if let Some(token) = self.session_token.as_deref().filter(|v| !v.is_empty()) {
            cred = cred.with_session_token(token);
        }
        cred.check()?;

        Ok(cred)
    }

    /// Build the endpoint requests are sent to.
    pub fn endpoint(&self) -> Result<Endpoint> {
        let Some(endpoint) = self.endpoint.as_deref() else {
            return Err(Error::config_invalid("endpoint is required"));
        };

        Endpoint::new(endpoint, self.force_path_style())
    }

    /// Build the endpoint shared links point at.
    pub fn public_endpoint(&self) -> Result<Endpoint> {
        match self.public_endpoint.as_deref() {
            Some(v) => Endpoint::new(v, self.force_path_style()),
            None => self.endpoint(),
        }
    }

    /// Build the request signer for S3 in the configured region.
    pub fn signer(&self) -> RequestSigner {
        RequestSigner::new(S3_SERVICE, self.region())
    }
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
