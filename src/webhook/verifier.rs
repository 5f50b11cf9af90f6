//! Signature verification for inbound notifications.

use base64::Engine as _;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, URL_SAFE_NO_PAD};
use base64::engine::DecodePaddingMode;
use jsonwebtoken::{Algorithm, DecodingKey};
use serde_json::{Map, Value};

use super::WebhookError;
use super::canonical::{SIGNATURE_FIELD, canonical_string};

/// A parsed webhook notification.
pub type WebhookPayload = Map<String, Value>;

/// Standard alphabet, padding optional: signers differ on whether they pad.
const SIGNATURE_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Width in bytes of one P-256 signature component.
const P256_SCALAR_LEN: usize = 32;

/// Trusted public key of the notification sender.
#[derive(Clone)]
pub struct PublicKey {
    inner: DecodingKey,
    algorithm: Algorithm,
}

impl PublicKey {
    /// Loads a PEM-encoded RSA or EC P-256 public key.
    ///
    /// RSA keys are accepted as `-----BEGIN PUBLIC KEY-----` (SPKI) and
    /// `-----BEGIN RSA PUBLIC KEY-----` (PKCS#1); EC keys as SPKI.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::InvalidKey`] if the PEM cannot be decoded.
    pub fn from_pem(pem: &str) -> Result<Self, WebhookError> {
        let pem = pem.trim().as_bytes();
        match DecodingKey::from_rsa_pem(pem) {
            Ok(inner) => Ok(Self {
                inner,
                algorithm: Algorithm::RS256,
            }),
            Err(rsa_error) => DecodingKey::from_ec_pem(pem)
                .map(|inner| Self {
                    inner,
                    algorithm: Algorithm::ES256,
                })
                .map_err(|_| WebhookError::InvalidKey(rsa_error.to_string())),
        }
    }

    /// Returns the signature algorithm this key verifies.
    #[must_use]
    pub const fn algorithm(&self) -> Algorithm {
        self.algorithm
    }
}

impl std::fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublicKey")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

/// Converts a DER `ECDSA-Sig-Value` into the fixed `r || s` form.
///
/// Returns `None` unless the input is exactly one SEQUENCE of two
/// INTEGERs, each fitting in [`P256_SCALAR_LEN`] bytes.
fn der_to_fixed(der: &[u8]) -> Option<[u8; 2 * P256_SCALAR_LEN]> {
    let (tag, body, rest) = der_element(der)?;
    if tag != 0x30 || !rest.is_empty() {
        return None;
    }

    let (r_tag, r, body) = der_element(body)?;
    let (s_tag, s, trailing) = der_element(body)?;
    if r_tag != 0x02 || s_tag != 0x02 || !trailing.is_empty() {
        return None;
    }

    let mut fixed = [0_u8; 2 * P256_SCALAR_LEN];
    copy_scalar(r, &mut fixed[..P256_SCALAR_LEN])?;
    copy_scalar(s, &mut fixed[P256_SCALAR_LEN..])?;
    Some(fixed)
}

/// Splits one DER element into `(tag, contents, remainder)`.
fn der_element(input: &[u8]) -> Option<(u8, &[u8], &[u8])> {
    let (&tag, input) = input.split_first()?;
    let (&first, input) = input.split_first()?;
    let (len, input) = match first {
        0x00..=0x7f => (usize::from(first), input),
        0x81 => {
            let (&len, input) = input.split_first()?;
            (usize::from(len), input)
        }
        _ => return None,
    };
    if input.len() < len {
        return None;
    }
    let (contents, rest) = input.split_at(len);
    Some((tag, contents, rest))
}

/// Right-aligns a positive DER integer into `out`.
fn copy_scalar(integer: &[u8], out: &mut [u8]) -> Option<()> {
    let start = integer.iter().position(|&b| b != 0).unwrap_or(integer.len());
    let digits = &integer[start..];
    if digits.len() > out.len() {
        return None;
    }
    let offset = out.len() - digits.len();
    out[offset..].copy_from_slice(digits);
    Some(())
}

/// Verifies that notifications were signed by the holder of the private key.
///
/// Signatures cover the payload's [canonical string](canonical_string) with
/// SHA-256 and arrive base64-encoded in the `signature` field. RSA keys
/// expect RSASSA-PKCS1-v1_5; EC P-256 keys expect a DER-encoded ECDSA
/// signature, as OpenSSL writes it. Other curves and schemes are not
/// supported. Verification is pure and safe to share across threads.
///
/// # Example
///
/// ```no_run
/// use lakipay::webhook::WebhookVerifier;
///
/// # fn handle(body: &[u8], pem: &str) -> Result<(), Box<dyn std::error::Error>> {
/// let verifier = WebhookVerifier::from_pem(pem)?;
/// let payload = verifier.verify_and_parse(body)?;
/// println!("transaction {} is {}", payload["reference"], payload["status"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct WebhookVerifier {
    key: PublicKey,
}

impl WebhookVerifier {
    /// Creates a verifier trusting `key`.
    #[must_use]
    pub const fn new(key: PublicKey) -> Self {
        Self { key }
    }

    /// Creates a verifier from a PEM-encoded RSA or EC P-256 public key.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::InvalidKey`] if the PEM cannot be decoded.
    pub fn from_pem(pem: &str) -> Result<Self, WebhookError> {
        PublicKey::from_pem(pem).map(Self::new)
    }

    /// Returns true only if `payload` carries a valid signature.
    ///
    /// A missing or non-string `signature`, invalid base64, a verification
    /// library error and a mismatch all yield `false`.
    #[must_use]
    pub fn verify(&self, payload: &WebhookPayload) -> bool {
        let Some(Value::String(encoded)) = payload.get(SIGNATURE_FIELD) else {
            tracing::debug!("Webhook payload has no string signature field");
            return false;
        };

        let Ok(signature) = SIGNATURE_BASE64.decode(encoded) else {
            tracing::debug!("Webhook signature is not valid base64");
            return false;
        };

        // jsonwebtoken takes JWS signatures: fixed-width ECDSA, URL-safe unpadded base64.
        let jws_signature = match self.key.algorithm {
            Algorithm::ES256 => {
                let Some(fixed) = der_to_fixed(&signature) else {
                    tracing::debug!("Webhook signature is not a DER ECDSA signature");
                    return false;
                };
                URL_SAFE_NO_PAD.encode(fixed)
            }
            _ => URL_SAFE_NO_PAD.encode(signature),
        };

        let canonical = canonical_string(payload);
        match jsonwebtoken::crypto::verify(
            &jws_signature,
            canonical.as_bytes(),
            &self.key.inner,
            self.key.algorithm,
        ) {
            Ok(valid) => valid,
            Err(e) => {
                tracing::debug!("Webhook signature verification failed: {e}");
                false
            }
        }
    }

    /// Parses a raw notification body into a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::Parse`] for invalid JSON or a non-object value.
    pub fn parse(raw_body: &[u8]) -> Result<WebhookPayload, WebhookError> {
        match serde_json::from_slice::<Value>(raw_body) {
            Ok(Value::Object(payload)) => Ok(payload),
            Ok(_) => Err(WebhookError::Parse(
                "expected a JSON object at the top level".to_string(),
            )),
            Err(e) => Err(WebhookError::Parse(e.to_string())),
        }
    }

    /// Parses `raw_body` and checks its signature.
    ///
    /// # Errors
    ///
    /// - [`WebhookError::Parse`] if the body is not a JSON object
    /// - [`WebhookError::Authentication`] if the signature does not verify
    pub fn verify_and_parse(&self, raw_body: &[u8]) -> Result<WebhookPayload, WebhookError> {
        let payload = Self::parse(raw_body)?;
        if !self.verify(&payload) {
            tracing::warn!("Rejected webhook with invalid signature");
            return Err(WebhookError::Authentication);
        }
        Ok(payload)
    }
}
