use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use email_address::EmailAddress;
use serde::{Deserialize, Deserializer};
use tracing::{error, info};

use crate::auth::application::{
    ports::outgoing::{NewUser, PasswordHasher, TokenProvider, UserRepository, UserRepositoryError},
    use_cases::login_user::AuthSession,
};

const MIN_PASSWORD_LENGTH: usize = 8;
const MAX_FULL_NAME_LENGTH: usize = 255;

// ========================= Signup Request =========================
#[derive(Debug, Clone)]
pub struct SignupRequest {
    email: String,
    password: String,
    full_name: Option<String>,
    phone_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignupRequestError {
    #[error("Email cannot be empty")]
    EmptyEmail,
    #[error("Invalid email format")]
    InvalidEmailFormat,
    #[error("Password must be at least 8 characters")]
    PasswordTooShort,
    #[error("Full name is too long")]
    FullNameTooLong,
    #[error("Invalid phone number")]
    InvalidPhoneNumber,
}

impl SignupRequest {
    pub fn new(
        email: String,
        password: String,
        full_name: Option<String>,
        phone_number: Option<String>,
    ) -> Result<Self, SignupRequestError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(SignupRequestError::EmptyEmail);
        }
        if !EmailAddress::is_valid(email) {
            return Err(SignupRequestError::InvalidEmailFormat);
        }

        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(SignupRequestError::PasswordTooShort);
        }

        let full_name = full_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        if full_name
            .as_ref()
            .is_some_and(|n| n.chars().count() > MAX_FULL_NAME_LENGTH)
        {
            return Err(SignupRequestError::FullNameTooLong);
        }

        let phone_number = match phone_number.map(|p| p.trim().to_string()) {
            Some(p) if p.is_empty() => None,
            Some(p) => Some(
                normalize_phone_number(&p).ok_or(SignupRequestError::InvalidPhoneNumber)?,
            ),
            None => None,
        };

        Ok(Self {
            email: email.to_lowercase(),
            password,
            full_name,
            phone_number,
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn full_name(&self) -> Option<&str> {
        self.full_name.as_deref()
    }

    pub fn phone_number(&self) -> Option<&str> {
        self.phone_number.as_deref()
    }
}

/// Keeps a leading `+` and the digits; spaces, dashes and dots are dropped.
/// Returns `None` when anything else is present or the length is implausible.
pub fn normalize_phone_number(raw: &str) -> Option<String> {
    let mut normalized = String::with_capacity(raw.len());
    for (i, c) in raw.trim().chars().enumerate() {
        match c {
            '+' if i == 0 => normalized.push(c),
            '0'..='9' => normalized.push(c),
            ' ' | '-' | '.' => {}
            _ => return None,
        }
    }

    let digits = normalized.trim_start_matches('+').len();
    (8..=15).contains(&digits).then_some(normalized)
}

impl<'de> Deserialize<'de> for SignupRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct SignupRequestHelper {
            email: String,
            password: String,
            #[serde(default)]
            full_name: Option<String>,
            #[serde(default, alias = "phone")]
            phone_number: Option<String>,
        }

        let helper = SignupRequestHelper::deserialize(deserializer)?;
        SignupRequest::new(
            helper.email,
            helper.password,
            helper.full_name,
            helper.phone_number,
        )
        .map_err(serde::de::Error::custom)
    }
}

// ====================== Signup Error =============================
#[derive(Debug, Clone, thiserror::Error)]
pub enum SignupError {
    #[error("Email already registered")]
    EmailAlreadyRegistered,
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
    #[error("Token generation failed: {0}")]
    TokenGenerationFailed(String),
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

// ============================ Signup Use Case =============================
#[async_trait]
pub trait ISignupUserUseCase: Send + Sync {
    async fn execute(&self, request: SignupRequest) -> Result<AuthSession, SignupError>;
}

#[derive(Clone)]
pub struct SignupUserUseCase<R>
where
    R: UserRepository + Send + Sync,
{
    repository: R,
    password_hasher: Arc<dyn PasswordHasher>,
    token_provider: Arc<dyn TokenProvider>,
    trial_days: i64,
}

impl<R> SignupUserUseCase<R>
where
    R: UserRepository + Send + Sync,
{
    pub fn new(
        repository: R,
        password_hasher: Arc<dyn PasswordHasher>,
        token_provider: Arc<dyn TokenProvider>,
        trial_days: i64,
    ) -> Self {
        Self {
            repository,
            password_hasher,
            token_provider,
            trial_days,
        }
    }
}

#[async_trait]
impl<R> ISignupUserUseCase for SignupUserUseCase<R>
where
    R: UserRepository + Send + Sync,
{
    async fn execute(&self, request: SignupRequest) -> Result<AuthSession, SignupError> {
        let password_hash = self
            .password_hasher
            .hash_password(request.password())
            .await
            .map_err(|e| SignupError::HashingFailed(e.to_string()))?;

        let new_user = NewUser {
            email: request.email().to_string(),
            password_hash,
            full_name: request.full_name().map(str::to_string),
            phone_number: request.phone_number().map(str::to_string),
            trial_end_date: Utc::now() + Duration::days(self.trial_days),
        };

        let account = self
            .repository
            .create_user(new_user)
            .await
            .map_err(|e| match e {
                UserRepositoryError::UserAlreadyExists => SignupError::EmailAlreadyRegistered,
                other => SignupError::RepositoryError(other.to_string()),
            })?;

        let access_token = self
            .token_provider
            .generate_access_token(account.id)
            .map_err(|e| {
                error!(user_id = %account.id, error = %e, "Failed to issue token after signup");
                SignupError::TokenGenerationFailed(e.to_string())
            })?;

        info!(user_id = %account.id, trial_end = %account.trial_end_date, "User signed up");

        Ok(AuthSession::bearer(access_token, account))
    }
}
