use crate::runtime::command::Command;
use crate::runtime::effect::Effect;
use crate::runtime::key_bindings::KeyBindings;
use crate::runtime::reducer::Reducer;
use crate::state::app_state::AppState;
use crate::task::TaskExecutor;
use crate::terminal::{Terminal, TerminalEvent};
use crate::ui::renderer::Renderer;
use std::io;
use std::time::Duration;
use tracing::debug;

const POLL_TIMEOUT: Duration = Duration::from_millis(120);

pub struct Runtime {
    state: AppState,
    terminal: Terminal,
    executor: TaskExecutor,
    key_bindings: KeyBindings,
    renderer: Renderer,
}

impl Runtime {
    pub fn new(state: AppState, terminal: Terminal, executor: TaskExecutor) -> Self {
        Self {
            state,
            terminal,
            executor,
            key_bindings: KeyBindings::new(),
            renderer: Renderer::default(),
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        self.terminal.enter()?;

        let run_result = (|| -> io::Result<()> {
            let effects = Reducer::start(&mut self.state);
            self.apply_effects(effects)?;

            while !self.state.should_exit() {
                self.process_completions()?;

                let event = self.terminal.poll_event(POLL_TIMEOUT)?;
                self.dispatch_terminal_event(event)?;
            }

            Ok(())
        })();

        let exit_result = self.terminal.exit();
        debug!("runtime stopped");
        run_result.and(exit_result)
    }

    fn process_completions(&mut self) -> io::Result<()> {
        for completion in self.executor.drain_ready() {
            let effects = Reducer::complete(&mut self.state, completion);
            self.apply_effects(effects)?;
        }
        Ok(())
    }

    fn dispatch_terminal_event(&mut self, event: TerminalEvent) -> io::Result<()> {
        match event {
            TerminalEvent::Resize(size) => {
                self.terminal.set_size(size);
                self.render()
            }
            TerminalEvent::Key(key) => {
                let command = self
                    .key_bindings
                    .resolve(key)
                    .unwrap_or(Command::InputKey(key));
                self.process_command(command)
            }
            TerminalEvent::Tick => self.process_command(Command::Tick),
        }
    }

    fn process_command(&mut self, command: Command) -> io::Result<()> {
        let effects = Reducer::reduce(&mut self.state, command);
        self.apply_effects(effects)
    }

    fn apply_effects(&mut self, effects: Vec<Effect>) -> io::Result<()> {
        let render_requested = spawn_effects(&self.executor, effects);
        if render_requested && !self.state.should_exit() {
            self.render()?;
        }
        Ok(())
    }

    fn render(&mut self) -> io::Result<()> {
        let frame = self.renderer.render(&self.state, self.terminal.size());
        self.terminal.render_frame(&frame)
    }
}

/// Hands spawn effects to the executor. Returns whether a render was asked for.
fn spawn_effects(executor: &TaskExecutor, effects: Vec<Effect>) -> bool {
    let mut render_requested = false;
    for effect in effects {
        match effect {
            Effect::Spawn(request) => executor.spawn(request),
            Effect::RequestRender => render_requested = true,
        }
    }
    render_requested
}
