//! Signed session token handling (HS256)

use auth_shared::constants::TOKEN_TTL_SECONDS;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

const ALGORITHM: Algorithm = Algorithm::HS256;

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Token signing failed: {0}")]
    SigningError(String),
    #[error("Token invalid: {0}")]
    Invalid(String),
}

/// Claims carried by a session token. Immutable once issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Account id the token was issued for.
    pub sub: String,
    pub email: String,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
}

impl Claims {
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Time left until `exp`, zero once expired.
    pub fn remaining(&self, now: DateTime<Utc>) -> std::time::Duration {
        let secs = self.exp.saturating_sub(now.timestamp());
        std::time::Duration::from_secs(secs.max(0) as u64)
    }
}

/// A freshly signed token together with the claims it encodes.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: Claims,
}

pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl JwtService {
    /// An empty secret is rejected up front so no token is ever signed with it.
    pub fn new(secret: &str) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::SigningError("signing secret is empty".to_string()));
        }
        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::seconds(TOKEN_TTL_SECONDS),
        })
    }

    pub fn issue(&self, user_id: &Uuid, email: &str) -> Result<IssuedToken, JwtError> {
        self.issue_at(user_id, email, Utc::now())
    }

    pub fn issue_at(
        &self,
        user_id: &Uuid,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, JwtError> {
        let issued_at = now.timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: issued_at,
            nbf: issued_at,
            exp: (now + self.ttl).timestamp(),
        };

        let token = encode(&Header::new(ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| JwtError::SigningError(e.to_string()))?;

        Ok(IssuedToken { token, claims })
    }

    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        self.verify_at(token, Utc::now())
    }

    /// Signature, algorithm and claim presence are checked by `jsonwebtoken`;
    /// the validity window is checked here against `now` with zero leeway.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.set_required_spec_claims(&["sub", "iat", "nbf", "exp"]);

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| JwtError::Invalid(e.to_string()))?;

        let now = now.timestamp();
        if now >= claims.exp {
            return Err(JwtError::Invalid("token expired".to_string()));
        }
        if claims.nbf > now {
            return Err(JwtError::Invalid("token not yet valid".to_string()));
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn service() -> JwtService {
        JwtService::new("test-signing-secret").unwrap()
    }

    fn issued_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_issue_sets_ten_minute_window() {
        let user_id = Uuid::new_v4();
        let issued = service().issue_at(&user_id, "a@b.com", issued_at()).unwrap();

        assert_eq!(issued.claims.iat, issued_at().timestamp());
        assert_eq!(issued.claims.nbf, issued_at().timestamp());
        assert_eq!(issued.claims.exp - issued.claims.iat, 600);
        assert_eq!(issued.claims.sub, user_id.to_string());
        assert_eq!(issued.claims.email, "a@b.com");
        assert_eq!(issued.claims.remaining(issued_at()).as_secs(), 600);
    }

    #[test]
    fn test_expiry_boundary() {
        let jwt = service();
        let issued = jwt.issue_at(&Uuid::new_v4(), "a@b.com", issued_at()).unwrap();

        let just_before = issued_at() + Duration::minutes(9) + Duration::seconds(59);
        let just_after = issued_at() + Duration::minutes(10) + Duration::seconds(1);

        assert!(jwt.verify_at(&issued.token, just_before).is_ok());
        assert!(matches!(
            jwt.verify_at(&issued.token, just_after),
            Err(JwtError::Invalid(_))
        ));
    }

    #[test]
    fn test_not_before_in_future_rejected() {
        let jwt = service();
        let issued = jwt.issue_at(&Uuid::new_v4(), "a@b.com", issued_at()).unwrap();

        let earlier = issued_at() - Duration::seconds(5);
        assert!(jwt.verify_at(&issued.token, earlier).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issued = service().issue(&Uuid::new_v4(), "a@b.com").unwrap();
        let other = JwtService::new("another-secret").unwrap();

        assert!(other.verify(&issued.token).is_err());
    }

    #[test]
    fn test_other_algorithm_rejected() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            email: "a@b.com".to_string(),
            iat: now,
            nbf: now,
            exp: now + 600,
        };
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(b"test-signing-secret"),
        )
        .unwrap();

        assert!(service().verify(&token).is_err());
    }

    #[test]
    fn test_tampered_and_malformed_tokens_rejected() {
        let jwt = service();
        let issued = jwt.issue(&Uuid::new_v4(), "a@b.com").unwrap();

        let signature_start = issued.token.rfind('.').unwrap() + 1;
        let first = issued.token[signature_start..].chars().next().unwrap();
        let mut tampered = issued.token[..signature_start].to_string();
        tampered.push(if first == 'A' { 'B' } else { 'A' });
        tampered.push_str(&issued.token[signature_start + 1..]);

        assert!(jwt.verify(&tampered).is_err());
        assert!(jwt.verify("not.a.token").is_err());
        assert!(jwt.verify("").is_err());
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(matches!(JwtService::new(""), Err(JwtError::SigningError(_))));
    }
}
