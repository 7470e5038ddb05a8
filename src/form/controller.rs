use crate::api::Endpoint;
use crate::error::SubmissionError;
use crate::form::data::{FieldName, FormData};
use crate::form::validation::ValidationState;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    /// Terminal for the session.
    Submitted,
    Failed(String),
}

impl SubmissionState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, SubmissionState::Submitting)
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmissionState::Submitted)
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            SubmissionState::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Outcome of pressing submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitAttempt {
    /// A submission is in flight or already succeeded.
    Disabled,
    /// At least one required field failed; nothing was sent.
    Invalid,
    /// The form is now `Submitting`; the payload must be sent exactly once
    /// and its result handed to [`FormController::finish_submit`].
    Started(FormData),
}

#[derive(Debug, Clone, Default)]
pub struct FormController {
    data: FormData,
    show_validation: bool,
    state: SubmissionState,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(&self) -> &FormData {
        &self.data
    }

    pub fn value(&self, field: FieldName) -> &str {
        self.data.get(field)
    }

    pub fn update_field(&mut self, field: FieldName, value: impl Into<String>) {
        self.data.set(field, value);
    }

    pub fn validation(&self) -> ValidationState {
        ValidationState::derive(&self.data)
    }

    pub fn is_valid(&self) -> bool {
        self.validation().is_valid()
    }

    pub fn completion(&self) -> f64 {
        self.validation().completion()
    }

    pub fn show_validation(&self) -> bool {
        self.show_validation
    }

    /// Whether `field` should carry the "Required Field" marker right now.
    pub fn shows_error(&self, field: FieldName) -> bool {
        self.show_validation && field.is_required() && !self.validation().is_field_valid(field)
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn can_submit(&self) -> bool {
        !self.state.is_in_flight() && !self.state.is_submitted()
    }

    pub fn begin_submit(&mut self) -> SubmitAttempt {
        if !self.can_submit() {
            debug!(state = ?self.state, "submit ignored");
            return SubmitAttempt::Disabled;
        }

        self.show_validation = true;

        let validation = self.validation();
        if !validation.is_valid() {
            let invalid: Vec<&str> = validation.invalid_fields().map(FieldName::key).collect();
            debug!(?invalid, "submit blocked by validation");
            return SubmitAttempt::Invalid;
        }

        self.state = SubmissionState::Submitting;
        debug!("submitting application");
        SubmitAttempt::Started(self.data.clone())
    }

    pub fn finish_submit(&mut self, result: Result<(), SubmissionError>) {
        if !self.state.is_in_flight() {
            warn!(state = ?self.state, "submission result arrived while not submitting");
            return;
        }

        self.state = match result {
            Ok(()) => {
                info!("application submitted");
                SubmissionState::Submitted
            }
            Err(err) => {
                warn!(error = ?err, "application submission failed");
                SubmissionState::Failed(err.to_string())
            }
        };
    }

    /// Runs a whole submit attempt synchronously against `endpoint`.
    pub fn submit(&mut self, endpoint: &dyn Endpoint) -> &SubmissionState {
        if let SubmitAttempt::Started(payload) = self.begin_submit() {
            let result = endpoint.submit_application(&payload);
            self.finish_submit(result);
        }
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::{FormController, SubmissionState, SubmitAttempt};
    use crate::api::Endpoint;
    use crate::error::SubmissionError;
    use crate::form::data::{FieldName, FormData};
    use std::sync::Mutex;

    struct RecordingEndpoint {
        submissions: Mutex<Vec<FormData>>,
        responses: Mutex<Vec<Result<(), SubmissionError>>>,
    }

    impl RecordingEndpoint {
        fn answering(responses: Vec<Result<(), SubmissionError>>) -> Self {
            Self {
                submissions: Mutex::new(Vec::new()),
                responses: Mutex::new(responses),
            }
        }

        fn submissions(&self) -> Vec<FormData> {
            self.submissions.lock().expect("lock").clone()
        }
    }

    impl Endpoint for RecordingEndpoint {
        fn track_visit(&self) -> Result<(), SubmissionError> {
            Ok(())
        }

        fn submit_application(&self, data: &FormData) -> Result<(), SubmissionError> {
            self.submissions.lock().expect("lock").push(data.clone());
            self.responses.lock().expect("lock").remove(0)
        }
    }

    fn filled() -> FormController {
        let mut form = FormController::new();
        form.update_field(FieldName::HrName, " Dana ");
        form.update_field(FieldName::Phone, "1234567890");
        form.update_field(FieldName::Email, "dana@acme.io");
        form.update_field(FieldName::Organization, "Acme");
        form.update_field(FieldName::Role, "SRE ");
        form.update_field(FieldName::Salary, "  ");
        form.update_field(FieldName::Description, "On-call rotation");
        form
    }

    #[test]
    fn invalid_submit_shows_errors_without_sending() {
        let endpoint = RecordingEndpoint::answering(vec![]);
        let mut form = filled();
        form.update_field(FieldName::Role, "");

        assert!(!form.show_validation());
        assert!(!form.shows_error(FieldName::Role));

        assert_eq!(form.submit(&endpoint), &SubmissionState::Idle);
        assert!(form.show_validation());
        assert!(form.shows_error(FieldName::Role));
        assert!(!form.shows_error(FieldName::Phone));
        assert!(endpoint.submissions().is_empty());
    }

    #[test]
    fn valid_submit_sends_untrimmed_values_once() {
        let endpoint = RecordingEndpoint::answering(vec![Ok(())]);
        let mut form = filled();

        assert_eq!(form.submit(&endpoint), &SubmissionState::Submitted);
        let sent = endpoint.submissions();
        assert_eq!(sent.len(), 1);
        assert_eq!(&sent[0], form.data());
        assert_eq!(sent[0].hr_name, " Dana ");
        assert_eq!(sent[0].salary, "  ");
    }

    #[test]
    fn rejection_uses_generic_message_and_allows_retry() {
        let endpoint = RecordingEndpoint::answering(vec![
            Err(SubmissionError::Rejected { status: 400 }),
            Ok(()),
        ]);
        let mut form = filled();

        assert_eq!(
            form.submit(&endpoint),
            &SubmissionState::Failed("Failed to submit application".to_string())
        );
        assert!(form.can_submit());

        form.update_field(FieldName::Role, "Senior SRE");
        assert_eq!(form.submit(&endpoint), &SubmissionState::Submitted);
        let sent = endpoint.submissions();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[1].role, "Senior SRE");
    }

    #[test]
    fn transport_error_text_is_passed_through() {
        let endpoint = RecordingEndpoint::answering(vec![Err(SubmissionError::Transport(
            "Connection Failed: Connect error: connection refused".to_string(),
        ))]);
        let mut form = filled();

        form.submit(&endpoint);
        assert_eq!(
            form.state().failure(),
            Some("Connection Failed: Connect error: connection refused")
        );
    }

    #[test]
    fn submitted_is_terminal() {
        let endpoint = RecordingEndpoint::answering(vec![Ok(())]);
        let mut form = filled();
        form.submit(&endpoint);

        assert!(!form.can_submit());
        assert_eq!(form.begin_submit(), SubmitAttempt::Disabled);
        assert_eq!(form.submit(&endpoint), &SubmissionState::Submitted);
        assert_eq!(endpoint.submissions().len(), 1);
    }

    #[test]
    fn second_submit_while_in_flight_is_disabled() {
        let mut form = filled();
        let SubmitAttempt::Started(payload) = form.begin_submit() else {
            panic!("expected submission to start");
        };
        assert_eq!(&payload, form.data());
        assert_eq!(form.state(), &SubmissionState::Submitting);
        assert_eq!(form.begin_submit(), SubmitAttempt::Disabled);

        form.finish_submit(Ok(()));
        assert_eq!(form.state(), &SubmissionState::Submitted);
    }

    #[test]
    fn failed_reason_survives_an_invalid_retry() {
        let mut form = filled();
        let _ = form.begin_submit();
        form.finish_submit(Err(SubmissionError::Rejected { status: 503 }));

        form.update_field(FieldName::Email, "nope");
        assert_eq!(form.begin_submit(), SubmitAttempt::Invalid);
        assert_eq!(form.state().failure(), Some("Failed to submit application"));

        form.update_field(FieldName::Email, "dana@acme.io");
        assert!(matches!(form.begin_submit(), SubmitAttempt::Started(_)));
        assert_eq!(form.state().failure(), None);
    }

    #[test]
    fn stray_result_is_ignored_when_idle() {
        let mut form = filled();
        form.finish_submit(Ok(()));
        assert_eq!(form.state(), &SubmissionState::Idle);
    }

    #[test]
    fn optional_salary_never_shows_error() {
        let mut form = FormController::new();
        let _ = form.begin_submit();
        assert!(form.shows_error(FieldName::HrName));
        assert!(!form.shows_error(FieldName::Salary));
    }
}
