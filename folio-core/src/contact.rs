//! Contact form validation and the prefilled compose link.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Characters left intact by a browser's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Minimum message length in UTF-16 code units, as a browser measures it.
const MIN_MESSAGE_UNITS: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    Name,
    Email,
    Message,
}

impl ContactField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactField::Name => "name",
            ContactField::Email => "email",
            ContactField::Message => "message",
        }
    }
}

impl std::fmt::Display for ContactField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-field error text, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactErrors(BTreeMap<ContactField, String>);

impl ContactErrors {
    pub fn get(&self, field: ContactField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Drops the error for one field, as when the user edits it.
    pub fn clear(&mut self, field: ContactField) {
        self.0.remove(&field);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ContactField, &str)> {
        self.0.iter().map(|(field, error)| (*field, error.as_str()))
    }

    fn insert(&mut self, field: ContactField, error: &str) {
        self.0.insert(field, error.to_string());
    }
}

pub fn validate(form: &ContactForm) -> ContactErrors {
    let mut errors = ContactErrors::default();

    if form.name.trim().is_empty() {
        errors.insert(ContactField::Name, "Name is required");
    }

    if form.email.trim().is_empty() {
        errors.insert(ContactField::Email, "Email is required");
    } else if !is_email_shaped(&form.email) {
        errors.insert(ContactField::Email, "Invalid email format");
    }

    let message = form.message.trim();
    if message.is_empty() {
        errors.insert(ContactField::Message, "Message is required");
    } else if message.encode_utf16().count() < MIN_MESSAGE_UNITS {
        errors.insert(
            ContactField::Message,
            "Message must be at least 10 characters",
        );
    }

    errors
}

/// `local@domain.tld`: no whitespace, one `@`, and a dot inside the domain.
fn is_email_shaped(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// `mailto:` link with the subject and body prefilled from `form`.
pub fn mailto_link(recipient: &str, form: &ContactForm) -> String {
    let subject = format!("Portfolio Contact from {}", form.name);
    let body = format!(
        "Name: {}\nEmail: {}\n\n{}",
        form.name, form.email, form.message
    );

    format!(
        "mailto:{}?subject={}&body={}",
        recipient,
        utf8_percent_encode(&subject, URI_COMPONENT),
        utf8_percent_encode(&body, URI_COMPONENT)
    )
}
