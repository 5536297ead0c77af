//! Minimal S3 client: signed `PutObject` over sync HTTP
//!
//! Requests are signed with AWS Signature Version 4. Credentials come from
//! `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY` and the optional
//! `AWS_SESSION_TOKEN`. `AWS_ENDPOINT_URL_S3` switches to path-style
//! requests against another endpoint (e.g. a local S3 emulator).

use super::ExportError;
use crate::config::EnvSource;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::time::Duration;
use url::Url;

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";
const SERVICE: &str = "s3";
const ENDPOINT_ENV: &str = "AWS_ENDPOINT_URL_S3";

#[derive(Clone)]
pub struct S3Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl std::fmt::Debug for S3Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &self.session_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl S3Credentials {
    pub fn from_env(env: &dyn EnvSource) -> Result<Self, ExportError> {
        let required = |key: &'static str| {
            env.var(key)
                .filter(|v| !v.is_empty())
                .ok_or(ExportError::MissingCredentials(key))
        };
        Ok(Self {
            access_key_id: required("AWS_ACCESS_KEY_ID")?,
            secret_access_key: required("AWS_SECRET_ACCESS_KEY")?,
            session_token: env.var("AWS_SESSION_TOKEN").filter(|v| !v.is_empty()),
        })
    }
}

pub struct S3Uploader {
    credentials: S3Credentials,
    region: String,
    endpoint: Option<Url>,
    agent: ureq::Agent,
}

fn make_agent() -> ureq::Agent {
    ureq::config::Config::builder()
        .http_status_as_error(false)
        .timeout_global(Some(Duration::from_secs(60)))
        .build()
        .new_agent()
}

impl S3Uploader {
    pub fn new(credentials: S3Credentials, region: &str, endpoint: Option<Url>) -> Self {
        Self {
            credentials,
            region: region.to_string(),
            endpoint,
            agent: make_agent(),
        }
    }

    pub fn from_env(env: &dyn EnvSource, region: &str) -> Result<Self, ExportError> {
        let credentials = S3Credentials::from_env(env)?;
        let endpoint = match env.var(ENDPOINT_ENV).filter(|v| !v.is_empty()) {
            Some(raw) => Some(Url::parse(&raw).map_err(|_| ExportError::InvalidEndpoint(raw.clone()))?),
            None => None,
        };
        Ok(Self::new(credentials, region, endpoint))
    }

    /// URL, host header and canonical URI of an object
    fn object_location(&self, bucket: &str, key: &str) -> Result<(String, String, String), ExportError> {
        let encoded_key = uri_encode(key, false);
        match &self.endpoint {
            None => {
                let host = format!("{}.s3.{}.amazonaws.com", bucket, self.region);
                let path = format!("/{}", encoded_key);
                Ok((format!("https://{}{}", host, path), host, path))
            }
            Some(endpoint) => {
                let host_name = endpoint
                    .host_str()
                    .ok_or_else(|| ExportError::InvalidEndpoint(endpoint.to_string()))?;
                let host = match endpoint.port() {
                    Some(port) => format!("{}:{}", host_name, port),
                    None => host_name.to_string(),
                };
                let path = format!(
                    "{}/{}/{}",
                    endpoint.path().trim_end_matches('/'),
                    uri_encode(bucket, false),
                    encoded_key
                );
                Ok((format!("{}://{}{}", endpoint.scheme(), host, path), host, path))
            }
        }
    }

    pub fn put_object(&self, bucket: &str, key: &str, body: &[u8]) -> Result<(), ExportError> {
        let (url, host, canonical_uri) = self.object_location(bucket, key)?;
        let payload_hash = hex(&Sha256::digest(body));
        let now = Utc::now();

        let mut headers = BTreeMap::new();
        headers.insert("host".to_string(), host);
        headers.insert("x-amz-content-sha256".to_string(), payload_hash.clone());
        headers.insert("x-amz-date".to_string(), amz_date(&now));
        if let Some(token) = &self.credentials.session_token {
            headers.insert("x-amz-security-token".to_string(), token.clone());
        }

        let authorization = authorization_header(
            &self.credentials,
            &self.region,
            now,
            &CanonicalRequest {
                method: "PUT",
                uri: &canonical_uri,
                headers: &headers,
                payload_hash: &payload_hash,
            },
        );

        tracing::debug!("Uploading {} bytes to s3://{}/{}", body.len(), bucket, key);

        // ureq derives the Host header from the URL
        let mut request = self
            .agent
            .put(url.as_str())
            .header("Authorization", &authorization)
            .header("Content-Type", "application/json");
        for (name, value) in headers.iter().filter(|(name, _)| name.as_str() != "host") {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send(body).map_err(|e| ExportError::Request {
            bucket: bucket.to_string(),
            key: key.to_string(),
            message: e.to_string(),
        })?;

        let status = response.status().as_u16();
        if status >= 300 {
            let body = response.into_body().read_to_string().unwrap_or_default();
            return Err(ExportError::Upload {
                bucket: bucket.to_string(),
                key: key.to_string(),
                status,
                body,
            });
        }
        Ok(())
    }
}

/// Join an export prefix and a file name into an object key
pub(super) fn object_key(prefix: &str, filename: &str) -> String {
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        filename.to_string()
    } else {
        format!("{}/{}", prefix, filename)
    }
}

struct CanonicalRequest<'a> {
    method: &'a str,
    uri: &'a str,
    /// Lowercase names; all of them are signed
    headers: &'a BTreeMap<String, String>,
    payload_hash: &'a str,
}

impl CanonicalRequest<'_> {
    fn signed_headers(&self) -> String {
        self.headers
            .keys()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(";")
    }

    /// Requests here never carry a query string
    fn render(&self) -> String {
        let headers: String = self
            .headers
            .iter()
            .map(|(name, value)| format!("{}:{}\n", name, value.trim()))
            .collect();
        format!(
            "{}\n{}\n\n{}\n{}\n{}",
            self.method,
            self.uri,
            headers,
            self.signed_headers(),
            self.payload_hash
        )
    }
}

fn amz_date(time: &DateTime<Utc>) -> String {
    time.format("%Y%m%dT%H%M%SZ").to_string()
}

fn authorization_header(
    credentials: &S3Credentials,
    region: &str,
    time: DateTime<Utc>,
    request: &CanonicalRequest<'_>,
) -> String {
    let date = time.format("%Y%m%d").to_string();
    let scope = format!("{}/{}/{}/aws4_request", date, region, SERVICE);
    let string_to_sign = format!(
        "{}\n{}\n{}\n{}",
        ALGORITHM,
        amz_date(&time),
        scope,
        hex(&Sha256::digest(request.render().as_bytes()))
    );

    let signing_key = signing_key(&credentials.secret_access_key, &date, region, SERVICE);
    let signature = hex(&hmac_sha256(&signing_key, string_to_sign.as_bytes()));

    format!(
        "{} Credential={}/{},SignedHeaders={},Signature={}",
        ALGORITHM,
        credentials.access_key_id,
        scope,
        request.signed_headers(),
        signature
    )
}

fn signing_key(secret: &str, date: &str, region: &str, service: &str) -> Vec<u8> {
    let k_date = hmac_sha256(format!("AWS4{}", secret).as_bytes(), date.as_bytes());
    let k_region = hmac_sha256(&k_date, region.as_bytes());
    let k_service = hmac_sha256(&k_region, service.as_bytes());
    hmac_sha256(&k_service, b"aws4_request")
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC takes keys of any size");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Percent-encode everything but unreserved characters; `/` survives unless `encode_slash`
fn uri_encode(value: &str, encode_slash: bool) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b'/' if !encode_slash => out.push('/'),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
