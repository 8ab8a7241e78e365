//! Common types

/// A flat form submission: field name to raw value.
pub type FormData = std::collections::BTreeMap<String, String>;
