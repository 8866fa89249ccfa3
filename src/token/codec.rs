//! HS256 token codec: the single source of truth for secret, algorithm,
//! and claims schema.
//! Used by: auth, handlers::login, handlers::register, state.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::error::{Error, Result};
use crate::token::claims::Claims;

pub struct TokenCodec {
    header: Header,
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // A token one second past its exp is expired, not almost-valid.
        validation.leeway = 0;
        Self {
            header: Header::new(Algorithm::HS256),
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn encode(&self, claims: &Claims) -> Result<String> {
        jsonwebtoken::encode(&self.header, claims, &self.encoding)
            .map_err(|e| Error::TokenCreation(e.to_string()))
    }

    /// Signature verification and the expiration check happen inside one
    /// library call; there is no window where expired claims are observable
    /// as valid. Expired and invalid are distinct outcomes, and neither
    /// ever yields claims.
    pub fn decode(&self, token: &str) -> Result<Claims> {
        match jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation) {
            Ok(data) => Ok(data.claims),
            Err(e) => match e.kind() {
                ErrorKind::ExpiredSignature => Err(Error::TokenExpired),
                _ => Err(Error::InvalidToken(e.to_string())),
            },
        }
    }
}
