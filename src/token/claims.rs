//! Claims payload carried by every issued token.
//! Used by: token::codec, auth, handlers.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// The single claims schema for all tokens: the subject's email, the user
/// row id, and the expiration instant as epoch seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    pub sub: String,
    pub uid: i64,
    pub exp: f64,
}

impl Claims {
    pub fn new(sub: String, uid: i64, ttl_seconds: i64) -> Self {
        let now = Utc::now().timestamp_millis() as f64 / 1000.0;
        Self {
            sub,
            uid,
            exp: now + ttl_seconds as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_claims_have_valid_fields() {
        let claims = Claims::new("a@example.com".into(), 7, 600);
        assert_eq!(claims.sub, "a@example.com");
        assert_eq!(claims.uid, 7);
        assert!(claims.exp > Utc::now().timestamp() as f64);
    }

    #[test]
    fn ttl_shifts_expiration_forward() {
        let short = Claims::new("a@example.com".into(), 1, 600);
        let long = Claims::new("a@example.com".into(), 1, 172_800);
        assert!(long.exp > short.exp);
    }

    #[test]
    fn claims_roundtrip_through_json() {
        let claims = Claims::new("a@example.com".into(), 7, 600);
        let json = serde_json::to_string(&claims).unwrap();
        let decoded: Claims = serde_json::from_str(&json).unwrap();
        assert_eq!(claims, decoded);
    }
}
