//! Input validation helpers
//!
//! Field rules live on the request types as `validator` derives; this module
//! holds the pieces that are not expressible as a derive.

use std::collections::BTreeMap;
use validator::ValidationErrors;

/// Normalize an email address for storage and lookup.
///
/// Surrounding whitespace is trimmed and the domain part is lower-cased.
/// The local part is left alone since mail servers may treat it as case
/// sensitive.
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}

/// Flatten `validator` errors into `field -> [messages]`.
///
/// Only the configured messages are kept. The offending value, which
/// `validator` records in the error params, is dropped so that passwords
/// never leak into a response.
pub fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("Invalid value ({})", e.code),
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}
