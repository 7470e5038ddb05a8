use crate::error::SubmissionError;
use crate::form::controller::{FormController, SubmitAttempt};
use crate::form::data::FieldName;
use crate::state::focus::FocusState;
use crate::terminal::KeyEvent;
use crate::widgets::text_input::{KeyResult, TextAction, TextInput};

/// Everything the screen shows: the form controller plus the editors that
/// feed it and which one has focus.
pub struct AppState {
    header: String,
    form: FormController,
    inputs: Vec<TextInput>,
    pub focus: FocusState,
    should_exit: bool,
    visit_tracked: bool,
}

impl AppState {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            form: FormController::new(),
            inputs: FieldName::ALL.into_iter().map(TextInput::new).collect(),
            focus: FocusState::new(FieldName::ALL.to_vec()),
            should_exit: false,
            visit_tracked: false,
        }
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub fn inputs(&self) -> &[TextInput] {
        &self.inputs
    }

    pub fn focused_field(&self) -> Option<FieldName> {
        self.focus.current()
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    pub fn request_exit(&mut self) {
        self.should_exit = true;
    }

    /// Returns true the first time only; the visit ping is once per session.
    pub fn mark_visit_tracked(&mut self) -> bool {
        !std::mem::replace(&mut self.visit_tracked, true)
    }

    /// Whether the fields still accept input. The form is replaced by the
    /// thank-you screen once submitted.
    pub fn is_editable(&self) -> bool {
        !self.form.state().is_submitted()
    }

    pub fn handle_input_key(&mut self, key: KeyEvent) -> KeyResult {
        if !self.is_editable() {
            return KeyResult::NotHandled;
        }
        let Some(input) = self.focused_input_mut() else {
            return KeyResult::NotHandled;
        };
        let result = input.handle_key(key);
        self.sync_focused(result);
        result
    }

    pub fn apply_text_action(&mut self, action: TextAction) -> KeyResult {
        if !self.is_editable() {
            return KeyResult::NotHandled;
        }
        let Some(input) = self.focused_input_mut() else {
            return KeyResult::NotHandled;
        };
        let result = input.apply_action(action);
        self.sync_focused(result);
        result
    }

    pub fn begin_submit(&mut self) -> SubmitAttempt {
        let attempt = self.form.begin_submit();
        if attempt == SubmitAttempt::Invalid
            && let Some(first) = self.form.validation().invalid_fields().next()
        {
            self.focus.set_focus(first);
        }
        attempt
    }

    pub fn finish_submit(&mut self, result: Result<(), SubmissionError>) {
        self.form.finish_submit(result);
    }

    fn focused_input_mut(&mut self) -> Option<&mut TextInput> {
        let field = self.focus.current()?;
        self.inputs.iter_mut().find(|input| input.field() == field)
    }

    fn sync_focused(&mut self, result: KeyResult) {
        if result != KeyResult::Changed {
            return;
        }
        let Some(field) = self.focus.current() else {
            return;
        };
        if let Some(input) = self.inputs.iter().find(|input| input.field() == field) {
            self.form.update_field(field, input.value());
        }
    }
}
