use crate::form::data::FieldName;

/// Focus ring over the form fields. Wraps in both directions.
#[derive(Debug, Clone)]
pub struct FocusState {
    targets: Vec<FieldName>,
    index: usize,
}

impl FocusState {
    pub fn new(targets: Vec<FieldName>) -> Self {
        Self { targets, index: 0 }
    }

    pub fn current(&self) -> Option<FieldName> {
        self.targets.get(self.index).copied()
    }

    pub fn set_focus(&mut self, field: FieldName) {
        if let Some(pos) = self.targets.iter().position(|target| *target == field) {
            self.index = pos;
        }
    }

    pub fn next(&mut self) {
        if self.targets.is_empty() {
            return;
        }
        self.index = (self.index + 1) % self.targets.len();
    }

    pub fn prev(&mut self) {
        if self.targets.is_empty() {
            return;
        }
        self.index = (self.index + self.targets.len() - 1) % self.targets.len();
    }
}
