use super::*;

/// Bearer tokens stay valid for 30 days from issuance.
const TOKEN_DURATION: std::time::Duration = std::time::Duration::from_secs(30 * 24 * 60 * 60);

/// JWT signing and verification keyed by a server-held secret.
pub struct Crypto {
    encoding: jsonwebtoken::EncodingKey,
    decoding: jsonwebtoken::DecodingKey,
}

impl Crypto {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: jsonwebtoken::EncodingKey::from_secret(secret),
            decoding: jsonwebtoken::DecodingKey::from_secret(secret),
        }
    }
    /// Reads `JWT_SECRET`. Required configuration — there is deliberately
    /// no fallback secret.
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set.
    pub fn from_env() -> Self {
        Self::new(
            std::env::var("JWT_SECRET")
                .expect("JWT_SECRET must be set")
                .as_bytes(),
        )
    }
    pub fn encode(&self, claims: &Claims) -> Result<String, jsonwebtoken::errors::Error> {
        jsonwebtoken::encode(&jsonwebtoken::Header::default(), claims, &self.encoding)
    }
    /// Decode and validate signature and expiry. An elapsed `exp` surfaces
    /// as `ErrorKind::ExpiredSignature`; everything else malformed is an
    /// invalid token.
    pub fn decode(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding, &jsonwebtoken::Validation::default())
            .map(|data| data.claims)
    }
    pub const fn duration() -> std::time::Duration {
        TOKEN_DURATION
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sgs_core::ID;

    #[test]
    fn issue_then_verify_resolves_same_user() {
        let crypto = Crypto::new(b"test-secret");
        let user = ID::default();
        let token = crypto.encode(&Claims::new(user)).expect("encode");
        let claims = crypto.decode(&token).expect("decode");
        assert_eq!(claims.user(), user);
        assert!(!claims.expired());
    }

    #[test]
    fn wrong_secret_rejected() {
        let token = Crypto::new(b"alpha")
            .encode(&Claims::new(ID::default()))
            .expect("encode");
        assert!(Crypto::new(b"omega").decode(&token).is_err());
    }

    #[test]
    fn garbage_token_rejected() {
        assert!(Crypto::new(b"test-secret").decode("not.a.jwt").is_err());
    }

    #[test]
    fn expired_token_reports_expiry() {
        let crypto = Crypto::new(b"test-secret");
        let ref expired = Claims::stale(ID::default());
        let token = crypto.encode(expired).expect("encode");
        let err = crypto.decode(&token).expect_err("expired");
        assert_eq!(
            err.kind(),
            &jsonwebtoken::errors::ErrorKind::ExpiredSignature
        );
    }
}
