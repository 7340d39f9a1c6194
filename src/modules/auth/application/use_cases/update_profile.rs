use async_trait::async_trait;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::auth::application::{
    domain::entities::{InvoiceType, UserAccount, UserId},
    ports::outgoing::{ProfileChanges, UserRepository, UserRepositoryError},
    use_cases::signup_user::normalize_phone_number,
};

/// Raw `PUT /me` payload. Absent fields stay as they are, empty strings clear.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateProfileInput {
    pub full_name: Option<String>,
    #[serde(alias = "phone")]
    pub phone_number: Option<String>,
    pub company_name: Option<String>,
    pub tax_id: Option<String>,
    pub tax_office: Option<String>,
    pub billing_address: Option<String>,
    pub billing_city: Option<String>,
    pub billing_postal_code: Option<String>,
    pub invoice_type: Option<InvoiceType>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpdateProfileError {
    #[error("Nothing to update")]
    NothingToUpdate,
    #[error("Invalid phone number")]
    InvalidPhoneNumber,
    #[error("{0} is too long")]
    FieldTooLong(&'static str),
    #[error("User not found")]
    UserNotFound,
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

fn text_change(
    value: Option<String>,
    field: &'static str,
    max_len: usize,
) -> Result<Option<Option<String>>, UpdateProfileError> {
    match value.map(|v| v.trim().to_string()) {
        None => Ok(None),
        Some(v) if v.is_empty() => Ok(Some(None)),
        Some(v) if v.chars().count() > max_len => Err(UpdateProfileError::FieldTooLong(field)),
        Some(v) => Ok(Some(Some(v))),
    }
}

impl TryFrom<UpdateProfileInput> for ProfileChanges {
    type Error = UpdateProfileError;

    fn try_from(input: UpdateProfileInput) -> Result<Self, Self::Error> {
        let phone_number = match input.phone_number.map(|p| p.trim().to_string()) {
            None => None,
            Some(p) if p.is_empty() => Some(None),
            Some(p) => Some(Some(
                normalize_phone_number(&p).ok_or(UpdateProfileError::InvalidPhoneNumber)?,
            )),
        };

        let changes = ProfileChanges {
            full_name: text_change(input.full_name, "full_name", 255)?,
            phone_number,
            company_name: text_change(input.company_name, "company_name", 255)?,
            tax_id: text_change(input.tax_id, "tax_id", 50)?,
            tax_office: text_change(input.tax_office, "tax_office", 100)?,
            billing_address: text_change(input.billing_address, "billing_address", 255)?,
            billing_city: text_change(input.billing_city, "billing_city", 100)?,
            billing_postal_code: text_change(input.billing_postal_code, "billing_postal_code", 20)?,
            invoice_type: input.invoice_type,
        };

        if changes.is_empty() {
            return Err(UpdateProfileError::NothingToUpdate);
        }

        Ok(changes)
    }
}

#[async_trait]
pub trait IUpdateProfileUseCase: Send + Sync {
    async fn execute(
        &self,
        user_id: UserId,
        input: UpdateProfileInput,
    ) -> Result<UserAccount, UpdateProfileError>;
}

#[derive(Clone)]
pub struct UpdateProfileUseCase<R>
where
    R: UserRepository + Send + Sync,
{
    repository: R,
}

impl<R> UpdateProfileUseCase<R>
where
    R: UserRepository + Send + Sync,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> IUpdateProfileUseCase for UpdateProfileUseCase<R>
where
    R: UserRepository + Send + Sync,
{
    async fn execute(
        &self,
        user_id: UserId,
        input: UpdateProfileInput,
    ) -> Result<UserAccount, UpdateProfileError> {
        let changes = ProfileChanges::try_from(input)?;

        self.repository
            .update_profile(user_id, changes)
            .await
            .map_err(|e| match e {
                UserRepositoryError::UserNotFound => UpdateProfileError::UserNotFound,
                other => UpdateProfileError::RepositoryError(other.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_are_left_alone() {
        let changes = ProfileChanges::try_from(UpdateProfileInput {
            phone_number: Some("6912345678".into()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(changes.phone_number, Some(Some("6912345678".into())));
        assert_eq!(changes.full_name, None);
        assert_eq!(changes.invoice_type, None);
    }

    #[test]
    fn empty_string_clears_field() {
        let changes = ProfileChanges::try_from(UpdateProfileInput {
            company_name: Some("   ".into()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(changes.company_name, Some(None));
    }

    #[test]
    fn empty_payload_is_rejected() {
        let err = ProfileChanges::try_from(UpdateProfileInput::default()).unwrap_err();
        assert_eq!(err, UpdateProfileError::NothingToUpdate);
    }

    #[test]
    fn invalid_phone_is_rejected() {
        let err = ProfileChanges::try_from(UpdateProfileInput {
            phone_number: Some("abc".into()),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err, UpdateProfileError::InvalidPhoneNumber);
    }

    #[test]
    fn overlong_postal_code_is_rejected() {
        let err = ProfileChanges::try_from(UpdateProfileInput {
            billing_postal_code: Some("1".repeat(21)),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err, UpdateProfileError::FieldTooLong("billing_postal_code"));
    }

    #[test]
    fn invoice_type_parses_from_json() {
        let input: UpdateProfileInput = serde_json::from_value(serde_json::json!({
            "invoice_type": "invoice",
            "tax_id": "123456789"
        }))
        .unwrap();

        let changes = ProfileChanges::try_from(input).unwrap();
        assert_eq!(changes.invoice_type, Some(InvoiceType::Invoice));
        assert_eq!(changes.tax_id, Some(Some("123456789".into())));
    }
}
