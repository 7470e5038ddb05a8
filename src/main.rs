use hireme::api::HttpEndpoint;
use hireme::config::Config;
use hireme::logging;
use hireme::runtime::Runtime;
use hireme::state::AppState;
use hireme::task::TaskExecutor;
use hireme::terminal::Terminal;
use std::error::Error;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::error;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "hireme exited with an error");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = Config::load()?;
    logging::init(config.log_file.as_deref())?;
    config.log_summary();

    let endpoint = Arc::new(HttpEndpoint::new(config.routes()));
    let executor = TaskExecutor::new(endpoint);
    let state = AppState::new(config.header.clone());
    let terminal = Terminal::new()?.with_mode(config.render_mode());

    Runtime::new(state, terminal, executor).run()?;
    Ok(())
}
