use crate::api::Endpoint;
use crate::error::SubmissionError;
use crate::form::data::FormData;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub enum TaskRequest {
    /// Fire-and-forget; never produces a completion.
    TrackVisit,
    SubmitApplication(FormData),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskCompletion {
    Submission(Result<(), SubmissionError>),
}

/// Runs backend calls on worker threads so the UI loop never blocks.
/// Requests run to completion; there is no cancellation.
pub struct TaskExecutor {
    endpoint: Arc<dyn Endpoint>,
    completion_tx: Sender<TaskCompletion>,
    completion_rx: Receiver<TaskCompletion>,
}

impl TaskExecutor {
    pub fn new(endpoint: Arc<dyn Endpoint>) -> Self {
        let (completion_tx, completion_rx) = mpsc::channel::<TaskCompletion>();
        Self {
            endpoint,
            completion_tx,
            completion_rx,
        }
    }

    pub fn spawn(&self, request: TaskRequest) {
        let endpoint = Arc::clone(&self.endpoint);
        match request {
            TaskRequest::TrackVisit => {
                std::thread::spawn(move || match endpoint.track_visit() {
                    Ok(()) => debug!("visit tracked"),
                    Err(err) => warn!(error = %err, "visit tracking failed"),
                });
            }
            TaskRequest::SubmitApplication(data) => {
                let completion_tx = self.completion_tx.clone();
                std::thread::spawn(move || {
                    let result = endpoint.submit_application(&data);
                    let _ = completion_tx.send(TaskCompletion::Submission(result));
                });
            }
        }
    }

    pub fn drain_ready(&self) -> Vec<TaskCompletion> {
        let mut out = Vec::<TaskCompletion>::new();
        loop {
            match self.completion_rx.try_recv() {
                Ok(completion) => out.push(completion),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        out
    }
}

#[cfg(test)]
impl TaskExecutor {
    pub(crate) fn wait(&self, timeout: std::time::Duration) -> Option<TaskCompletion> {
        self.completion_rx.recv_timeout(timeout).ok()
    }
}
