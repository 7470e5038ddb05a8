use crate::task::TaskRequest;

#[derive(Debug, Clone)]
pub enum Effect {
    Spawn(TaskRequest),
    RequestRender,
}
