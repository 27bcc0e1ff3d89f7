//! Signed session tokens: `<claims>.<signature>`, both base64url.
//!
//! The claims are JSON holding a v7 UUID (its timestamp is the issue time)
//! and the expiry. The signature is HMAC-SHA256 over the encoded claims.

use base64::{Engine, prelude::BASE64_URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use jiff::{SignedDuration, Timestamp};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use types::{Result, SessionToken, err};
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: Uuid,
    pub expires_at: Timestamp,
}

impl Claims {
    pub fn new(ttl: SignedDuration) -> Result<Self> {
        let id = Uuid::now_v7();
        let expires_at = issued_at(&id)?.checked_add(ttl)?;
        Ok(Self { id, expires_at })
    }

    pub fn issued_at(&self) -> Result<Timestamp> {
        issued_at(&self.id)
    }

    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        now >= self.expires_at
    }
}

fn issued_at(id: &Uuid) -> Result<Timestamp> {
    let ts = id
        .get_timestamp()
        .ok_or_else(|| err!("session id carries no timestamp"))?;

    let (seconds, nanos) = ts.to_unix();
    Ok(Timestamp::new(seconds as i64, nanos as i32)?)
}

fn mac(key: &SecretString) -> Result<HmacSha256> {
    Ok(HmacSha256::new_from_slice(key.expose_secret().as_bytes())?)
}

pub fn sign(claims: &Claims, key: &SecretString) -> Result<SessionToken> {
    let json = serde_json::to_vec(claims)?;
    let payload = BASE64_URL_SAFE_NO_PAD.encode(json);

    let mut mac = mac(key)?;
    mac.update(payload.as_bytes());
    let signature = BASE64_URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    Ok(SessionToken::new(format!("{payload}.{signature}")))
}

/// Check the signature and decode the claims. Expiry is left to the caller.
pub fn verify(token: &str, key: &SecretString) -> Result<Claims> {
    let (payload, signature_b64) = token
        .split_once('.')
        .ok_or_else(|| err!("invalid token format"))?;

    let mut mac = mac(key)?;
    mac.update(payload.as_bytes());
    let signature = BASE64_URL_SAFE_NO_PAD.decode(signature_b64)?;
    mac.verify_slice(&signature)
        .map_err(|_| err!("token signature mismatch"))?;

    let json = BASE64_URL_SAFE_NO_PAD.decode(payload)?;
    Ok(serde_json::from_slice(&json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> SecretString {
        "test-secret".into()
    }

    #[test]
    fn signed_token_verifies() {
        let claims = Claims::new(SignedDuration::from_hours(1)).unwrap();
        let token = sign(&claims, &key()).unwrap();

        assert_eq!(verify(token.expose(), &key()).unwrap(), claims);
    }

    #[test]
    fn issue_time_comes_from_the_id() {
        let before = Timestamp::now();
        let claims = Claims::new(SignedDuration::from_hours(2)).unwrap();
        let issued = claims.issued_at().unwrap();

        // v7 ids are millisecond precision.
        assert!(issued >= before.checked_sub(SignedDuration::from_millis(1)).unwrap());
        assert_eq!(issued.checked_add(SignedDuration::from_hours(2)).unwrap(), claims.expires_at);
        assert!(!claims.is_expired_at(issued));
        assert!(claims.is_expired_at(claims.expires_at));
    }

    #[test]
    fn wrong_key_is_rejected() {
        let claims = Claims::new(SignedDuration::from_hours(1)).unwrap();
        let token = sign(&claims, &key()).unwrap();

        let error = verify(token.expose(), &"other".into()).unwrap_err();
        assert_eq!(error.message(), "token signature mismatch");
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let claims = Claims::new(SignedDuration::from_hours(1)).unwrap();
        let token = sign(&claims, &key()).unwrap();
        let (_, signature) = token.expose().split_once('.').unwrap();

        let forged = Claims {
            expires_at: claims.expires_at.checked_add(SignedDuration::from_hours(1000)).unwrap(),
            ..claims
        };
        let payload = BASE64_URL_SAFE_NO_PAD.encode(serde_json::to_vec(&forged).unwrap());

        assert!(verify(&format!("{payload}.{signature}"), &key()).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(verify("demo-token-123", &key()).is_err());
        assert!(verify("a.b", &key()).is_err());
        assert!(verify("", &key()).is_err());
    }
}
