use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Check a webhook signature: `HMAC-SHA256(secret, body)` as a hex digest
/// must equal the `x-hook-signature` header.
///
/// The comparison is constant-time; a length mismatch is rejected up front
/// since it already rules the signature out.
pub fn validate(signature: &str, body: &[u8], secret: &str) -> bool {
    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(body);
    let digest = hex::encode(mac.finalize().into_bytes());

    let expected = digest.as_bytes();
    let provided = signature.as_bytes();
    if expected.len() != provided.len() {
        return false;
    }
    expected.ct_eq(provided).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "hook-secret";

    fn sign(body: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(SECRET.as_bytes()).unwrap();
        mac.update(body);
        hex::encode(mac.finalize().into_bytes())
    }

    #[test]
    fn accepts_correct_signature() {
        let body = br#"{"type":"asset_create","timestamp":1}"#;
        assert!(validate(&sign(body), body, SECRET));
    }

    #[test]
    fn rejects_tampered_body() {
        let body = br#"{"type":"asset_create"}"#;
        let signature = sign(body);
        assert!(!validate(&signature, br#"{"type":"asset_remove"}"#, SECRET));
    }

    #[test]
    fn rejects_wrong_secret() {
        let body = b"payload";
        let mut mac = HmacSha256::new_from_slice(b"other-secret").unwrap();
        mac.update(body);
        let signature = hex::encode(mac.finalize().into_bytes());
        assert!(!validate(&signature, body, SECRET));
    }

    #[test]
    fn rejects_differently_sized_signatures() {
        let body = b"payload";
        assert!(!validate("", body, SECRET));
        assert!(!validate("abc123", body, SECRET));
        let mut long = sign(body);
        long.push('0');
        assert!(!validate(&long, body, SECRET));
    }

    #[test]
    fn rejects_case_variant_digest() {
        let body = b"payload";
        let signature = sign(body).to_uppercase();
        assert!(!validate(&signature, body, SECRET));
    }
}
