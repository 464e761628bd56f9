//! Main token service implementation

use std::sync::Arc;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, SessionIdentity};
use crate::errors::{DomainError, TokenError};

use super::clock::{Clock, SystemClock};
use super::config::TokenServiceConfig;

/// Issues and verifies session tokens
///
/// Tokens are HS256 JWTs carrying the user id (`sub`) and email. There is no
/// revocation list: a token stays valid until it expires.
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    /// Creates a token service that reads the wall clock
    pub fn new(config: TokenServiceConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates a token service with an injected clock
    ///
    /// # Arguments
    ///
    /// * `config` - Token service configuration
    /// * `clock` - Time source used for `iat`, `exp` and expiry checks
    pub fn with_clock(config: TokenServiceConfig, clock: Arc<dyn Clock>) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        // Expiry is checked against the injected clock in `verify`
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
            clock,
        }
    }

    /// Issues a session token for a user
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The encoded JWT
    /// * `Err(TokenError::TokenGenerationFailed)` - Signing failed
    pub fn issue(&self, user_id: Uuid, email: &str) -> Result<String, DomainError> {
        let claims = Claims::new(user_id, email, self.clock.now(), self.config.token_expiry_days);
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign session token");
            DomainError::Token(TokenError::TokenGenerationFailed)
        })
    }

    /// Verifies a session token and returns the identity it was issued for
    ///
    /// Fails closed: a bad signature, an undecodable payload, a subject that
    /// is not a UUID, or a clock at or past `exp` all yield an error.
    pub fn verify(&self, token: &str) -> Result<SessionIdentity, DomainError> {
        let claims = self.decode_claims(token)?;

        if claims.is_expired_at(self.clock.now()) {
            return Err(DomainError::Token(TokenError::TokenExpired));
        }

        let user_id = claims
            .user_id()
            .map_err(|_| DomainError::Token(TokenError::InvalidClaims))?;

        Ok(SessionIdentity {
            user_id,
            email: claims.email,
        })
    }

    fn decode_claims(&self, token: &str) -> Result<Claims, DomainError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => DomainError::Token(TokenError::InvalidSignature),
                ErrorKind::MissingRequiredClaim(_) => DomainError::Token(TokenError::InvalidClaims),
                _ => DomainError::Token(TokenError::InvalidTokenFormat),
            })
    }
}
