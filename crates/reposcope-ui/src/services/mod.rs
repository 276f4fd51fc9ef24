pub mod submit_service;

pub use submit_service::{SubmissionController, SubmitError, SubmitHandler, SubmitServiceMessage};
