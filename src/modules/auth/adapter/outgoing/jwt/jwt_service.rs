use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::fmt;

use crate::auth::application::domain::entities::UserId;
use crate::auth::application::ports::outgoing::{TokenClaims, TokenError, TokenProvider};

use super::jwt_config::JwtConfig;

const ACCESS_TOKEN_TYPE: &str = "access";

#[derive(Clone)]
pub struct JwtTokenService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

#[cfg(not(tarpaulin_include))]
impl fmt::Debug for JwtTokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtTokenService")
            .field("issuer", &self.config.issuer)
            .field("access_token_expiry", &self.config.access_token_expiry)
            .finish()
    }
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret_key.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret_key.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 30;
        validation.validate_nbf = true;
        validation.set_issuer(&[self.config.issuer.as_str()]);
        validation
    }
}

impl TokenProvider for JwtTokenService {
    fn generate_access_token(&self, user_id: UserId) -> Result<String, TokenError> {
        let now = Utc::now();
        let expiration = now + Duration::seconds(self.config.access_token_expiry);

        let claims = TokenClaims {
            sub: user_id.value(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            iss: self.config.issuer.clone(),
            token_type: ACCESS_TOKEN_TYPE.to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingError(e.to_string()))
    }

    fn verify_token(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let decoded =
            decode::<TokenClaims>(token, &self.decoding_key, &self.validation()).map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;

                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::debug!("Token verification failed: Token expired");
                        TokenError::TokenExpired
                    }
                    ErrorKind::ImmatureSignature => {
                        tracing::warn!("Token verification failed: Token not yet valid");
                        TokenError::TokenNotYetValid
                    }
                    ErrorKind::InvalidSignature => {
                        tracing::error!("Security alert: Invalid token signature detected");
                        TokenError::InvalidSignature
                    }
                    ErrorKind::InvalidIssuer => {
                        tracing::warn!("Token verification failed: Unexpected issuer");
                        TokenError::InvalidSignature
                    }
                    ErrorKind::InvalidToken | ErrorKind::InvalidAlgorithm => {
                        tracing::error!("Security alert: Malformed or invalid algorithm token");
                        TokenError::MalformedToken
                    }
                    _ => {
                        tracing::warn!("Token verification failed: {}", e);
                        TokenError::MalformedToken
                    }
                }
            })?;

        if decoded.claims.token_type != ACCESS_TOKEN_TYPE {
            tracing::warn!(
                "Token type mismatch: expected '{}', got '{}'",
                ACCESS_TOKEN_TYPE,
                decoded.claims.token_type
            );
            return Err(TokenError::InvalidTokenType(ACCESS_TOKEN_TYPE.to_string()));
        }

        Ok(decoded.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test-secret-that-is-at-least-32-bytes-long";

    fn service_with(issuer: &str, expiry: i64) -> JwtTokenService {
        JwtTokenService::new(JwtConfig {
            secret_key: TEST_SECRET.to_string(),
            issuer: issuer.to_string(),
            access_token_expiry: expiry,
        })
    }

    #[test]
    fn test_generate_and_verify_access_token() {
        let service = service_with("drugalert.gr", 3600);
        let user_id = UserId::new();

        let token = service.generate_access_token(user_id).unwrap();
        let claims = service.verify_token(&token).unwrap();

        assert_eq!(claims.sub, user_id.value());
        assert_eq!(claims.token_type, "access");
        assert_eq!(claims.iss, "drugalert.gr");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // Past the 30 second leeway.
        let service = service_with("drugalert.gr", -120);
        let token = service.generate_access_token(UserId::new()).unwrap();

        assert_eq!(service.verify_token(&token), Err(TokenError::TokenExpired));
    }

    #[test]
    fn test_tampered_signature_is_rejected() {
        let service = service_with("drugalert.gr", 3600);
        let other = JwtTokenService::new(JwtConfig {
            secret_key: "another-secret-that-is-also-32-bytes-long!".to_string(),
            issuer: "drugalert.gr".to_string(),
            access_token_expiry: 3600,
        });

        let token = other.generate_access_token(UserId::new()).unwrap();
        assert_eq!(service.verify_token(&token), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_foreign_issuer_is_rejected() {
        let issuer_a = service_with("someone-else", 3600);
        let issuer_b = service_with("drugalert.gr", 3600);

        let token = issuer_a.generate_access_token(UserId::new()).unwrap();
        assert!(issuer_b.verify_token(&token).is_err());
    }

    #[test]
    fn test_garbage_is_malformed() {
        let service = service_with("drugalert.gr", 3600);
        assert_eq!(
            service.verify_token("not-a-jwt"),
            Err(TokenError::MalformedToken)
        );
    }
}
