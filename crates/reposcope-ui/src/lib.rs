//! Presentation-side glue: feeds raw input to the parser and reports the outcome.
//! No rendering happens here; a front end reads `error_message()` and
//! receives successful submissions through a [`services::SubmitHandler`].

pub mod error_mapping;
pub mod services;

pub use services::{SubmissionController, SubmitError, SubmitHandler, SubmitServiceMessage};
