//! Maps UI service errors to reposcope_core::AppError for consistent user-facing messages.

mod submit;
