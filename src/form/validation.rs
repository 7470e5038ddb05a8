use crate::form::data::{FieldName, FormData};
use crate::form::validators::{self, REQUIRED_FIELD, Validator};
use indexmap::IndexMap;
use std::sync::LazyLock;

static RULES: LazyLock<Vec<(FieldName, Vec<Validator>)>> = LazyLock::new(|| {
    vec![
        (
            FieldName::HrName,
            vec![validators::min_trimmed_length(3, REQUIRED_FIELD)],
        ),
        (FieldName::Phone, vec![validators::phone(REQUIRED_FIELD)]),
        (FieldName::Email, vec![validators::email(REQUIRED_FIELD)]),
        (
            FieldName::Organization,
            vec![validators::min_trimmed_length(2, REQUIRED_FIELD)],
        ),
        (FieldName::Role, vec![validators::required(REQUIRED_FIELD)]),
        (
            FieldName::Description,
            vec![validators::required(REQUIRED_FIELD)],
        ),
    ]
});

/// Per-field validity for every required field, in display order.
///
/// Always derived from a [`FormData`]; it carries no memory of earlier
/// results, so deriving twice from the same data gives the same state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationState {
    fields: IndexMap<FieldName, bool>,
}

impl ValidationState {
    pub fn derive(data: &FormData) -> Self {
        let fields = RULES
            .iter()
            .map(|(field, rules)| {
                let ok = validators::run_validators(rules, data.get(*field)).is_ok();
                (*field, ok)
            })
            .collect();
        Self { fields }
    }

    /// Optional fields are always valid.
    pub fn is_field_valid(&self, field: FieldName) -> bool {
        self.fields.get(&field).copied().unwrap_or(true)
    }

    pub fn is_valid(&self) -> bool {
        self.fields.values().all(|ok| *ok)
    }

    pub fn valid_count(&self) -> usize {
        self.fields.values().filter(|ok| **ok).count()
    }

    pub fn required_count(&self) -> usize {
        self.fields.len()
    }

    /// Share of valid required fields, 0.0..=100.0.
    pub fn completion(&self) -> f64 {
        if self.fields.is_empty() {
            return 100.0;
        }
        self.valid_count() as f64 / self.required_count() as f64 * 100.0
    }

    pub fn invalid_fields(&self) -> impl Iterator<Item = FieldName> + '_ {
        self.fields
            .iter()
            .filter(|(_, ok)| !**ok)
            .map(|(field, _)| *field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldName, bool)> + '_ {
        self.fields.iter().map(|(field, ok)| (*field, *ok))
    }
}
