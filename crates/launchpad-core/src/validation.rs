//! Per-field validation errors.
//!
//! Errors are keyed by field name so a form can show each message inline next
//! to its input. Nested structs are flattened with dotted keys
//! (`terms.valuation`), and struct-level checks land on the struct's own key.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use validator::{ValidationErrors, ValidationErrorsKind};

const STRUCT_LEVEL_KEY: &str = "__all__";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `Ok(())` when nothing was collected.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    fn collect(&mut self, prefix: Option<&str>, errors: &ValidationErrors) {
        for (key, kind) in errors.errors() {
            let key = key.to_string();
            let field = match (prefix, key.as_str()) {
                (Some(p), STRUCT_LEVEL_KEY) => p.to_string(),
                (None, STRUCT_LEVEL_KEY) => key.clone(),
                (Some(p), _) => format!("{}.{}", p, key),
                (None, _) => key.clone(),
            };
            match kind {
                ValidationErrorsKind::Field(list) => {
                    for error in list {
                        let message = error
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| format!("invalid ({})", error.code));
                        self.add(field.clone(), message);
                    }
                }
                ValidationErrorsKind::Struct(inner) => self.collect(Some(&field), inner),
                ValidationErrorsKind::List(items) => {
                    for (index, inner) in items {
                        self.collect(Some(&format!("{}[{}]", field, index)), inner);
                    }
                }
            }
        }
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields = FieldErrors::new();
        fields.collect(None, &errors);
        fields
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join(", ")))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}
