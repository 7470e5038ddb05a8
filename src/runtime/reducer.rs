use crate::form::controller::SubmitAttempt;
use crate::runtime::command::Command;
use crate::runtime::effect::Effect;
use crate::state::app_state::AppState;
use crate::task::{TaskCompletion, TaskRequest};
use crate::widgets::text_input::KeyResult;
use tracing::{debug, warn};

pub struct Reducer;

impl Reducer {
    /// Effects for the first frame: the visit ping (once) and a render.
    pub fn start(state: &mut AppState) -> Vec<Effect> {
        if state.mark_visit_tracked() {
            vec![Effect::Spawn(TaskRequest::TrackVisit), Effect::RequestRender]
        } else {
            vec![Effect::RequestRender]
        }
    }

    pub fn reduce(state: &mut AppState, command: Command) -> Vec<Effect> {
        match command {
            Command::Exit => {
                if state.form().state().is_in_flight() {
                    warn!("exiting with a submission still in flight");
                }
                state.request_exit();
                vec![]
            }
            Command::Submit => Self::handle_submit(state),
            Command::NextFocus => {
                state.focus.next();
                vec![Effect::RequestRender]
            }
            Command::PrevFocus => {
                state.focus.prev();
                vec![Effect::RequestRender]
            }
            Command::InputKey(key) => {
                let result = state.handle_input_key(key);
                Self::reduce_key_result(state, result)
            }
            Command::TextAction(action) => {
                let result = state.apply_text_action(action);
                Self::reduce_key_result(state, result)
            }
            Command::Tick => vec![],
        }
    }

    pub fn complete(state: &mut AppState, completion: TaskCompletion) -> Vec<Effect> {
        match completion {
            TaskCompletion::Submission(result) => {
                state.finish_submit(result);
                vec![Effect::RequestRender]
            }
        }
    }

    fn reduce_key_result(state: &mut AppState, result: KeyResult) -> Vec<Effect> {
        match result {
            KeyResult::Changed | KeyResult::Handled => vec![Effect::RequestRender],
            KeyResult::Submit => Self::handle_submit(state),
            KeyResult::NotHandled => vec![],
        }
    }

    fn handle_submit(state: &mut AppState) -> Vec<Effect> {
        match state.begin_submit() {
            SubmitAttempt::Disabled => vec![],
            SubmitAttempt::Invalid => vec![Effect::RequestRender],
            SubmitAttempt::Started(payload) => {
                debug!("spawning submission");
                vec![
                    Effect::Spawn(TaskRequest::SubmitApplication(payload)),
                    Effect::RequestRender,
                ]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Reducer;
    use crate::error::SubmissionError;
    use crate::form::controller::SubmissionState;
    use crate::form::data::FieldName;
    use crate::runtime::command::Command;
    use crate::runtime::effect::Effect;
    use crate::state::app_state::AppState;
    use crate::task::{TaskCompletion, TaskRequest};
    use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};

    fn type_into(state: &mut AppState, field: FieldName, text: &str) {
        state.focus.set_focus(field);
        for ch in text.chars() {
            Reducer::reduce(
                state,
                Command::InputKey(KeyEvent {
                    code: KeyCode::Char(ch),
                    modifiers: KeyModifiers::NONE,
                }),
            );
        }
    }

    fn filled_state() -> AppState {
        let mut state = AppState::new("Hire Me");
        type_into(&mut state, FieldName::HrName, "Dana Reyes");
        type_into(&mut state, FieldName::Phone, "1234567890");
        type_into(&mut state, FieldName::Email, "dana@acme.io");
        type_into(&mut state, FieldName::Organization, "Acme");
        type_into(&mut state, FieldName::Role, "SRE ");
        type_into(&mut state, FieldName::Description, "Pager rotation");
        state
    }

    fn spawned(effects: &[Effect]) -> Vec<&TaskRequest> {
        effects
            .iter()
            .filter_map(|effect| match effect {
                Effect::Spawn(request) => Some(request),
                Effect::RequestRender => None,
            })
            .collect()
    }

    #[test]
    fn invalid_submit_spawns_nothing() {
        let mut state = filled_state();
        type_into(&mut state, FieldName::Phone, "1");

        let effects = Reducer::reduce(&mut state, Command::Submit);
        assert!(spawned(&effects).is_empty());
        assert_eq!(state.form().state(), &SubmissionState::Idle);
        assert!(state.form().show_validation());
    }

    #[test]
    fn valid_submit_spawns_one_submission_with_raw_values() {
        let mut state = filled_state();

        let effects = Reducer::reduce(&mut state, Command::Submit);
        let requests = spawned(&effects);
        assert_eq!(requests.len(), 1);
        let TaskRequest::SubmitApplication(payload) = requests[0] else {
            panic!("expected submission request");
        };
        assert_eq!(payload.role, "SRE ");
        assert_eq!(state.form().state(), &SubmissionState::Submitting);

        let again = Reducer::reduce(&mut state, Command::Submit);
        assert!(spawned(&again).is_empty());
    }

    #[test]
    fn rejection_then_retry() {
        let mut state = filled_state();
        Reducer::reduce(&mut state, Command::Submit);
        Reducer::complete(
            &mut state,
            TaskCompletion::Submission(Err(SubmissionError::Rejected { status: 500 })),
        );
        assert_eq!(
            state.form().state().failure(),
            Some("Failed to submit application")
        );

        let effects = Reducer::reduce(&mut state, Command::Submit);
        assert_eq!(spawned(&effects).len(), 1);
        assert_eq!(state.form().state(), &SubmissionState::Submitting);
    }

    #[test]
    fn success_is_terminal() {
        let mut state = filled_state();
        Reducer::reduce(&mut state, Command::Submit);
        Reducer::complete(&mut state, TaskCompletion::Submission(Ok(())));
        assert_eq!(state.form().state(), &SubmissionState::Submitted);

        let effects = Reducer::reduce(&mut state, Command::Submit);
        assert!(effects.is_empty());
    }

    #[test]
    fn enter_inside_input_submits() {
        let mut state = filled_state();
        let effects = Reducer::reduce(
            &mut state,
            Command::InputKey(KeyEvent {
                code: KeyCode::Enter,
                modifiers: KeyModifiers::NONE,
            }),
        );
        assert_eq!(spawned(&effects).len(), 1);
    }

    #[test]
    fn start_pings_visit_once() {
        let mut state = AppState::new("Hire Me");
        let first = Reducer::start(&mut state);
        let requests = spawned(&first);
        assert_eq!(requests.len(), 1);
        assert!(matches!(requests[0], TaskRequest::TrackVisit));
        assert!(spawned(&Reducer::start(&mut state)).is_empty());
    }

    #[test]
    fn exit_sets_flag() {
        let mut state = AppState::new("Hire Me");
        Reducer::reduce(&mut state, Command::Exit);
        assert!(state.should_exit());
    }
}
