use crate::form::controller::SubmissionState;
use crate::form::validators::REQUIRED_FIELD;
use crate::state::app_state::AppState;
use crate::terminal::{CursorPos, TerminalSize};
use crate::ui::span::{Span, SpanLine};
use crate::ui::theme::Theme;
use crate::widgets::text_input::TextInput;
use unicode_width::UnicodeWidthStr;

pub const PASSED_BANNER: &str = "Validation: Passed. Submit to glory!";
pub const THANK_YOU_TITLE: &str = "Thank You!";
pub const THANK_YOU_BODY: &str = "Your hiring interest has been submitted successfully.";

const FOCUS_MARKER: &str = "> ";
const IDLE_MARKER: &str = "  ";
const MAX_BAR_WIDTH: usize = 40;

#[derive(Debug, Default, Clone)]
pub struct RenderFrame {
    pub lines: Vec<SpanLine>,
    pub cursor: Option<CursorPos>,
}

impl RenderFrame {
    fn push(&mut self, line: SpanLine) {
        self.lines.push(line);
    }

    fn row(&self) -> u16 {
        u16::try_from(self.lines.len()).unwrap_or(u16::MAX)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Renderer {
    theme: Theme,
}

impl Renderer {
    pub fn render(&self, state: &AppState, size: TerminalSize) -> RenderFrame {
        let mut frame = RenderFrame::default();
        frame.push(vec![Span::styled(state.header(), self.theme.header)]);
        frame.push(vec![]);

        if state.form().state().is_submitted() {
            frame.push(vec![Span::styled(THANK_YOU_TITLE, self.theme.success)]);
            frame.push(vec![Span::new(THANK_YOU_BODY)]);
            frame.push(vec![]);
            frame.push(vec![Span::styled("Esc to exit", self.theme.hint)]);
            return frame;
        }

        self.render_progress(state, size, &mut frame);
        frame.push(vec![]);

        for input in state.inputs() {
            self.render_field(state, input, &mut frame);
        }

        frame.push(vec![]);
        self.render_button(state, &mut frame);
        frame.push(vec![Span::styled(
            "Tab/Shift+Tab move  Enter submit  Esc exit",
            self.theme.hint,
        )]);
        frame
    }

    fn render_progress(&self, state: &AppState, size: TerminalSize, frame: &mut RenderFrame) {
        let completion = state.form().completion().clamp(0.0, 100.0);
        let percent = completion.round() as usize;
        let bar_width = usize::from(size.width)
            .saturating_sub(8)
            .clamp(1, MAX_BAR_WIDTH);
        let filled = (bar_width * percent) / 100;

        frame.push(vec![
            Span::styled("#".repeat(filled), self.theme.progress_fill),
            Span::styled("-".repeat(bar_width - filled), self.theme.progress_empty),
            Span::new(format!(" {percent}%")),
        ]);
        if percent == 100 {
            frame.push(vec![Span::styled(PASSED_BANNER, self.theme.success)]);
        }
    }

    fn render_field(&self, state: &AppState, input: &TextInput, frame: &mut RenderFrame) {
        let field = input.field();
        let focused = state.focused_field() == Some(field);
        let invalid = state.form().shows_error(field);

        let marker = if focused { FOCUS_MARKER } else { IDLE_MARKER };
        let label_style = if invalid {
            self.theme.error
        } else if focused {
            self.theme.focused
        } else {
            self.theme.label
        };
        let prefix = format!("{marker}{}: [", input.label());

        if focused {
            let col = prefix.width() + input.cursor_offset();
            frame.cursor = Some(CursorPos {
                col: u16::try_from(col).unwrap_or(u16::MAX),
                row: frame.row(),
            });
        }
        frame.push(vec![
            Span::styled(prefix, label_style),
            Span::new(input.value()),
            Span::styled("]", label_style),
        ]);

        if invalid {
            frame.push(vec![Span::styled(
                format!("    {REQUIRED_FIELD}"),
                self.theme.error,
            )]);
        }
    }

    fn render_button(&self, state: &AppState, frame: &mut RenderFrame) {
        let form = state.form();
        let label = match form.state() {
            SubmissionState::Submitting => "Submitting...",
            SubmissionState::Submitted => "Submitted!",
            SubmissionState::Idle | SubmissionState::Failed(_) => "Submit",
        };
        let style = if form.can_submit() {
            self.theme.button
        } else {
            self.theme.button_disabled
        };
        frame.push(vec![Span::styled(format!("[ {label} ]"), style)]);

        if let Some(reason) = form.state().failure() {
            frame.push(vec![Span::styled(reason.to_string(), self.theme.error)]);
        }
    }
}
