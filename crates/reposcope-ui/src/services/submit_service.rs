//! Submission backend for the repository input field.
//! Parses the current input and either hands (owner, repository) to the
//! handler or records the message to show under the field.

use std::sync::mpsc::Sender;
use std::sync::Arc;

use parking_lot::Mutex;
use reposcope_core::ReferenceError;
use reposcope_integrations::{RepositoryReference, RepositoryReferenceParser};

/// Receives successfully parsed references, in (owner, repository) order.
pub trait SubmitHandler: Send + Sync {
    fn on_submit(&self, owner: &str, repository: &str) -> anyhow::Result<()>;
}

impl<F> SubmitHandler for F
where
    F: Fn(&str, &str) -> anyhow::Result<()> + Send + Sync,
{
    fn on_submit(&self, owner: &str, repository: &str) -> anyhow::Result<()> {
        self(owner, repository)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitServiceMessage {
    Submitted { owner: String, repository: String },
}

impl SubmitHandler for Sender<SubmitServiceMessage> {
    fn on_submit(&self, owner: &str, repository: &str) -> anyhow::Result<()> {
        self.send(SubmitServiceMessage::Submitted {
            owner: owner.to_string(),
            repository: repository.to_string(),
        })
        .map_err(|_| anyhow::anyhow!("Submission receiver dropped"))
    }
}

#[derive(Debug)]
pub enum SubmitError {
    Invalid(ReferenceError),
    Handler(anyhow::Error),
}

impl std::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitError::Invalid(e) => write!(f, "Invalid: {}", e),
            SubmitError::Handler(e) => write!(f, "Handler: {}", e),
        }
    }
}

impl std::error::Error for SubmitError {}

impl SubmitError {
    pub fn user_message(&self) -> &'static str {
        match self {
            SubmitError::Invalid(e) => e.user_message(),
            SubmitError::Handler(_) => "Could not start the analysis. Please try again.",
        }
    }
}

#[derive(Debug, Default)]
struct FormState {
    input: String,
    error_message: Option<String>,
}

/// Holds the input field's text and error line; safe to share across threads.
pub struct SubmissionController {
    parser: RepositoryReferenceParser,
    handler: Arc<dyn SubmitHandler>,
    form: Mutex<FormState>,
}

impl SubmissionController {
    pub fn new(parser: RepositoryReferenceParser, handler: Arc<dyn SubmitHandler>) -> Self {
        Self {
            parser,
            handler,
            form: Mutex::new(FormState::default()),
        }
    }

    pub fn set_input(&self, text: impl Into<String>) {
        self.form.lock().input = text.into();
    }

    pub fn input(&self) -> String {
        self.form.lock().input.clone()
    }

    /// Message to display under the input, if the last submission failed.
    pub fn error_message(&self) -> Option<String> {
        self.form.lock().error_message.clone()
    }

    pub fn clear_error(&self) {
        self.form.lock().error_message = None;
    }

    /// Parse the current input. The input text is never modified.
    pub fn submit(&self) -> Result<RepositoryReference, SubmitError> {
        let input = self.input();
        self.submit_input(&input)
    }

    /// Replace the input with `text` and submit that text.
    pub fn submit_text(&self, text: impl Into<String>) -> Result<RepositoryReference, SubmitError> {
        let text = text.into();
        self.set_input(text.clone());
        self.submit_input(&text)
    }

    fn submit_input(&self, input: &str) -> Result<RepositoryReference, SubmitError> {
        let reference = match self.parser.parse(input) {
            Ok(reference) => reference,
            Err(e) => {
                tracing::warn!(error = %e, "Rejected repository reference");
                let err = SubmitError::Invalid(e);
                self.set_error(err.user_message());
                return Err(err);
            }
        };

        self.clear_error();
        tracing::info!(
            owner = reference.owner(),
            repository = reference.repository(),
            "Submitting repository reference"
        );

        if let Err(e) = self
            .handler
            .on_submit(reference.owner(), reference.repository())
        {
            tracing::error!("Submit handler failed: {:#}", e);
            let err = SubmitError::Handler(e);
            self.set_error(err.user_message());
            return Err(err);
        }

        Ok(reference)
    }

    fn set_error(&self, message: &str) {
        self.form.lock().error_message = Some(message.to_string());
    }
}
