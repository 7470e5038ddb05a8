pub mod executor;

pub use executor::{TaskCompletion, TaskExecutor, TaskRequest};
