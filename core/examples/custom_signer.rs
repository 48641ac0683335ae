use http::HeaderValue;
use s3sign_core::{
    Context, Error, OsEnv, RequestDescriptor, Result, SignRequest, SignedRequest, Signer,
    SigningCredential, SigningMethod,
};

// Define a custom credential type
#[derive(Clone, Debug)]
struct MyCredential {
    api_key: String,
    api_secret: String,
}

impl SigningCredential for MyCredential {
    fn is_valid(&self) -> bool {
        !self.api_key.is_empty() && !self.api_secret.is_empty()
    }
}

// Implement a request builder that signs `METHOD\nPATH\nTIMESTAMP` with HMAC-SHA256
#[derive(Debug)]
struct MyRequestBuilder;

impl SignRequest for MyRequestBuilder {
    type Credential = MyCredential;

    fn sign_request(
        &self,
        ctx: &Context,
        req: &RequestDescriptor,
        cred: &Self::Credential,
        method: SigningMethod,
    ) -> Result<SignedRequest> {
        if method != SigningMethod::Header {
            return Err(Error::request_invalid("my-api only supports header signing"));
        }

        let timestamp = s3sign_core::time::format_iso8601(ctx.now());
        let string_to_sign = format!("{}\n{}\n{}", req.method, req.uri.path(), timestamp);
        let signature = ctx.hex_hmac_sha256(cred.api_secret.as_bytes(), string_to_sign.as_bytes())?;

        let mut headers = req.headers.clone();
        headers.insert("x-api-key", HeaderValue::from_str(&cred.api_key)?);
        headers.insert("x-api-timestamp", HeaderValue::from_str(&timestamp)?);
        let mut value = HeaderValue::from_str(&signature)?;
        value.set_sensitive(true);
        headers.insert("x-api-signature", value);

        Ok(SignedRequest {
            method: req.method.clone(),
            url: req.uri.to_string(),
            headers,
        })
    }
}

fn main() -> Result<()> {
    let ctx = Context::new().with_env(OsEnv);

    // Load credentials from environment variables
    let api_key = ctx.env_var("MY_API_KEY").unwrap_or_default();
    let api_secret = ctx.env_var("MY_API_SECRET").unwrap_or_default();
    let cred = if api_key.is_empty() || api_secret.is_empty() {
        println!("No credentials found in environment, using demo credentials");
        MyCredential {
            api_key: "demo-api-key".to_string(),
            api_secret: "demo-api-secret".to_string(),
        }
    } else {
        MyCredential {
            api_key,
            api_secret,
        }
    };

    // Create the signer
    let signer = Signer::new(ctx, cred, MyRequestBuilder);

    // Sign the request
    let req = RequestDescriptor::new("GET", "https://api.example.com/v1/users")?;
    match signer.sign(&req) {
        Ok(headers) => {
            println!("Request signed successfully!");
            println!("Headers: {headers:?}");
        }
        Err(e) => {
            eprintln!("Failed to sign request: {e}");
        }
    }

    Ok(())
}
