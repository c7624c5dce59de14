use platform_api::ApiError;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

pub type HrResult<T> = Result<T, HrError>;

#[derive(Debug, Error)]
pub enum HrError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("storage error: {0}")]
    Store(#[source] DbErr),
}

pub(crate) const NOT_FOUND_MESSAGE: &str = "Employee not found with the given ID";
pub(crate) const DUPLICATE_EMAIL_MESSAGE: &str = "Employee already exists with the given email";

impl HrError {
    pub(crate) fn not_found() -> Self {
        Self::NotFound(NOT_FOUND_MESSAGE.to_string())
    }

    pub(crate) fn duplicate_email() -> Self {
        Self::Conflict(DUPLICATE_EMAIL_MESSAGE.to_string())
    }
}

/// Storage outcomes that mean "the row is gone" or "the email is taken" are
/// folded into the domain errors; everything else stays a storage failure.
impl From<DbErr> for HrError {
    fn from(err: DbErr) -> Self {
        if let Some(SqlErr::UniqueConstraintViolation(_)) = err.sql_err() {
            return Self::duplicate_email();
        }
        match err {
            DbErr::RecordNotUpdated | DbErr::RecordNotFound(_) => Self::not_found(),
            other => Self::Store(other),
        }
    }
}

impl From<HrError> for ApiError {
    fn from(err: HrError) -> Self {
        match err {
            HrError::NotFound(msg) => ApiError::NotFound(msg),
            HrError::Conflict(msg) => ApiError::Conflict(msg),
            HrError::Store(db) => ApiError::internal(db.into()),
        }
    }
}
