use actix_web::HttpResponse;

use crate::shared::api::ApiResponse;

/// Accepted range for a `limit` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitRange {
    pub default: u64,
    pub min: u64,
    pub max: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("limit must be between {min} and {max}")]
pub struct LimitOutOfRange {
    pub min: u64,
    pub max: u64,
}

impl LimitRange {
    pub const fn new(default: u64, min: u64, max: u64) -> Self {
        Self { default, min, max }
    }

    pub fn resolve(&self, requested: Option<u64>) -> Result<u64, LimitOutOfRange> {
        match requested {
            None => Ok(self.default),
            Some(value) if value >= self.min && value <= self.max => Ok(value),
            Some(_) => Err(LimitOutOfRange {
                min: self.min,
                max: self.max,
            }),
        }
    }
}

pub fn limit_error_response(err: LimitOutOfRange) -> HttpResponse {
    ApiResponse::bad_request("INVALID_LIMIT", &err.to_string())
}
