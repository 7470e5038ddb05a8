pub mod controller;
pub mod data;
pub mod validation;
pub mod validators;

pub use controller::{FormController, SubmissionState, SubmitAttempt};
pub use data::{FieldName, FormData};
pub use validation::ValidationState;
