pub mod text_edit;
pub mod text_input;
