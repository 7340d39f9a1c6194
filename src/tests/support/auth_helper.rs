use std::sync::Arc;

use actix_web::web;
use chrono::Utc;

use crate::auth::application::domain::entities::UserId;
use crate::auth::application::ports::outgoing::token_provider::{
    TokenClaims, TokenError, TokenProvider,
};

pub const TEST_TOKEN: &str = "test_token";

/// Accepts only [`TEST_TOKEN`] and resolves it to a fixed user.
pub struct FixedTokenProvider {
    user_id: UserId,
}

impl TokenProvider for FixedTokenProvider {
    fn generate_access_token(&self, _user_id: UserId) -> Result<String, TokenError> {
        Ok(TEST_TOKEN.to_string())
    }

    fn verify_token(&self, token: &str) -> Result<TokenClaims, TokenError> {
        if token != TEST_TOKEN {
            return Err(TokenError::InvalidSignature);
        }
        let now = Utc::now().timestamp();
        Ok(TokenClaims {
            sub: self.user_id.value(),
            exp: now + 3600,
            iat: now,
            nbf: now,
            iss: "drugalert.gr".to_string(),
            token_type: "access".to_string(),
        })
    }
}

pub fn token_provider_for(user_id: UserId) -> web::Data<Arc<dyn TokenProvider + Send + Sync>> {
    web::Data::new(Arc::new(FixedTokenProvider { user_id }) as Arc<dyn TokenProvider + Send + Sync>)
}
