//! AWS Signature Version 4 request signing.
//!
//! Only the subset the sync step needs: single-chunk payloads, no query
//! string, `host`/`x-amz-content-sha256`/`x-amz-date` as the signed headers.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

const SIGNED_HEADERS: &str = "host;x-amz-content-sha256;x-amz-date";
const SERVICE: &str = "s3";

/// Credential material for signing a single request.
pub(crate) struct RequestSigner<'a> {
    pub access_key_id: &'a str,
    pub secret_access_key: &'a str,
    pub region: &'a str,
}

/// Headers to attach to the signed request.
pub(crate) struct SignedHeaders {
    pub amz_date: String,
    pub content_sha256: String,
    pub authorization: String,
}

/// Hex sha256 of a request payload.
pub(crate) fn payload_hash(body: &[u8]) -> String {
    hex(&Sha256::digest(body))
}

/// Percent-encodes an object key for the canonical URI, keeping `/`.
pub(crate) fn encode_key(key: &str) -> String {
    key.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Signs one request and returns the headers carrying the signature.
pub(crate) fn sign(
    signer: &RequestSigner<'_>,
    method: &str,
    host: &str,
    canonical_uri: &str,
    payload_sha256: &str,
    now: DateTime<Utc>,
) -> SignedHeaders {
    let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
    let date = now.format("%Y%m%d").to_string();
    let scope = format!("{}/{}/{}/aws4_request", date, signer.region, SERVICE);

    let canonical_headers = format!(
        "host:{}\nx-amz-content-sha256:{}\nx-amz-date:{}\n",
        host, payload_sha256, amz_date
    );

    // No query string support needed for HEAD/PUT object calls.
    let canonical_request = format!(
        "{}\n{}\n\n{}\n{}\n{}",
        method, canonical_uri, canonical_headers, SIGNED_HEADERS, payload_sha256
    );

    let string_to_sign = format!(
        "AWS4-HMAC-SHA256\n{}\n{}\n{}",
        amz_date,
        scope,
        hex(&Sha256::digest(canonical_request.as_bytes()))
    );

    let secret = format!("AWS4{}", signer.secret_access_key);
    let k_date = hmac(secret.as_bytes(), date.as_bytes());
    let k_region = hmac(&k_date, signer.region.as_bytes());
    let k_service = hmac(&k_region, SERVICE.as_bytes());
    let k_signing = hmac(&k_service, b"aws4_request");
    let signature = hex(&hmac(&k_signing, string_to_sign.as_bytes()));

    let authorization = format!(
        "AWS4-HMAC-SHA256 Credential={}/{}, SignedHeaders={}, Signature={}",
        signer.access_key_id, scope, SIGNED_HEADERS, signature
    );

    SignedHeaders {
        amz_date,
        content_sha256: payload_sha256.to_string(),
        authorization,
    }
}

fn hmac(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn signer() -> RequestSigner<'static> {
        RequestSigner {
            access_key_id: "AKIDEXAMPLE",
            secret_access_key: "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY",
            region: "us-east-1",
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2015, 8, 30, 12, 36, 0).unwrap()
    }

    #[test]
    fn test_payload_hash_of_empty_body() {
        // Well-known sha256 of the empty string.
        assert_eq!(
            payload_hash(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_encode_key_preserves_separators() {
        assert_eq!(encode_key("css/styles.min.css"), "css/styles.min.css");
        assert_eq!(encode_key("img/logo mark.png"), "img/logo%20mark.png");
        assert_eq!(encode_key("a+b/c"), "a%2Bb/c");
    }

    #[test]
    fn test_sign_header_shapes() {
        let hash = payload_hash(b"");
        let headers = sign(
            &signer(),
            "HEAD",
            "preview.s3.us-east-1.amazonaws.com",
            "/css/styles.min.css",
            &hash,
            fixed_now(),
        );

        assert_eq!(headers.amz_date, "20150830T123600Z");
        assert_eq!(headers.content_sha256, hash);
        assert!(headers.authorization.starts_with(
            "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20150830/us-east-1/s3/aws4_request"
        ));
        assert!(headers
            .authorization
            .contains("SignedHeaders=host;x-amz-content-sha256;x-amz-date"));
        // 32-byte hex signature at the end.
        let sig = headers.authorization.rsplit("Signature=").next().unwrap();
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_sign_is_deterministic() {
        let hash = payload_hash(b"body");
        let a = sign(&signer(), "PUT", "h", "/k", &hash, fixed_now());
        let b = sign(&signer(), "PUT", "h", "/k", &hash, fixed_now());
        assert_eq!(a.authorization, b.authorization);
    }

    #[test]
    fn test_sign_varies_with_payload() {
        let a = sign(&signer(), "PUT", "h", "/k", &payload_hash(b"a"), fixed_now());
        let b = sign(&signer(), "PUT", "h", "/k", &payload_hash(b"b"), fixed_now());
        assert_ne!(a.authorization, b.authorization);
    }
}
