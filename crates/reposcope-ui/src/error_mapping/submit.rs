use crate::services::submit_service::SubmitError;
use reposcope_core::AppError;

impl From<SubmitError> for AppError {
    fn from(e: SubmitError) -> Self {
        match e {
            SubmitError::Invalid(e) => AppError::Reference(e),
            SubmitError::Handler(e) => AppError::Other(e),
        }
    }
}
