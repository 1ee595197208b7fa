use super::*;
use sgs_core::ID;

/// JWT payload: the bound user id plus issue and expiry instants.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct Claims {
    pub sub: uuid::Uuid,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(user: ID<Account>) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            sub: user.inner(),
            iat: now,
            exp: now + Crypto::duration().as_secs() as i64,
        }
    }
    pub fn expired(&self) -> bool {
        self.exp < chrono::Utc::now().timestamp()
    }
    pub fn user(&self) -> ID<Account> {
        ID::from(self.sub)
    }
    /// Claims whose window elapsed days ago, for expiry tests.
    #[cfg(test)]
    pub fn stale(user: ID<Account>) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            sub: user.inner(),
            iat: now - 3 * 86_400,
            exp: now - 2 * 86_400,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_claims_not_expired() {
        assert!(!Claims::new(ID::default()).expired());
    }

    #[test]
    fn stale_claims_expired() {
        assert!(Claims::stale(ID::default()).expired());
    }

    #[test]
    fn window_is_thirty_days() {
        let claims = Claims::new(ID::default());
        assert_eq!(claims.exp - claims.iat, 30 * 24 * 60 * 60);
    }
}
