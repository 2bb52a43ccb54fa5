//! Contact form delivered through the visitor's mail client.
//!
//! Submitting the form composes a localized subject and body, encodes them
//! the way `encodeURIComponent` does, and navigates to the resulting
//! `mailto:` URI.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::config::WidgetsConfig;
use crate::constants::ids;
use crate::platform::{Document, ElementId};

// ============================================================================
// Language
// ============================================================================

/// Language of the generated message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    #[default]
    Italian,
}

impl Language {
    /// Resolves a document language tag. Only `en` selects English.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self { if tag == "en" { Self::English } else { Self::Italian } }

    /// Mail subject for a sender name.
    #[must_use]
    pub fn subject(self, name: &str) -> String {
        match self {
            Self::English => format!("Message from portfolio – {name}"),
            Self::Italian => format!("Messaggio dal portfolio – {name}"),
        }
    }

    /// Mail body: name, email, an empty line, then the message.
    #[must_use]
    pub fn body(self, message: &ContactMessage) -> String {
        let name_label = match self {
            Self::English => "Name",
            Self::Italian => "Nome",
        };
        [
            format!("{name_label}: {}", message.name),
            format!("Email: {}", message.email),
            String::new(),
            message.message.clone(),
        ]
        .join("\n")
    }

    /// Feedback shown after submitting.
    #[must_use]
    pub fn feedback(self, recipient: &str) -> String {
        match self {
            Self::English => format!(
                "Thank you! Your email app should open now. If it does not, you can write me directly at {recipient} 😊"
            ),
            Self::Italian => format!(
                "Grazie! Il tuo programma di posta dovrebbe aprirsi ora. Se non si apre, puoi scrivermi direttamente a {recipient} 😊"
            ),
        }
    }
}

// ============================================================================
// Encoding
// ============================================================================

/// A submitted contact message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Percent-encodes a string like JavaScript's `encodeURIComponent`.
///
/// ASCII letters, digits, and `-_.!~*'()` pass through; every other byte of
/// the UTF-8 encoding becomes `%XX` with uppercase hex.
#[must_use]
pub fn encode_uri_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        if byte.is_ascii_alphanumeric() || b"-_.!~*'()".contains(&byte) {
            out.push(char::from(byte));
        } else {
            let _ = write!(out, "%{byte:02X}");
        }
    }
    out
}

/// Builds the `mailto:` URI for a message.
#[must_use]
pub fn mailto_uri(recipient: &str, language: Language, message: &ContactMessage) -> String {
    format!(
        "mailto:{recipient}?subject={}&body={}",
        encode_uri_component(&language.subject(&message.name)),
        encode_uri_component(&language.body(message)),
    )
}

// ============================================================================
// ContactForm
// ============================================================================

/// Handles `#contactForm` submissions.
#[derive(Debug, Clone)]
pub struct ContactForm {
    form: ElementId,
    feedback: Option<ElementId>,
    language: Language,
    recipient: String,
}

impl ContactForm {
    /// Binds to `#contactForm`. Returns `None` if the page has no form.
    #[must_use]
    pub fn bind(doc: &dyn Document, config: &WidgetsConfig) -> Option<Self> {
        let form = doc.element_by_id(ids::CONTACT_FORM)?;
        let language = Language::from_tag(&doc.attribute(doc.root(), "lang").unwrap_or_default());
        Some(Self {
            form,
            feedback: doc.element_by_id(ids::CONTACT_FEEDBACK),
            language,
            recipient: config.contact_recipient.clone(),
        })
    }

    /// Language resolved from the document.
    #[must_use]
    pub const fn language(&self) -> Language { self.language }

    /// Handles a submit event. Returns `true` if the form was handled.
    pub fn on_submit(&self, doc: &mut dyn Document, form: ElementId) -> bool {
        if form != self.form {
            return false;
        }
        let message = ContactMessage {
            name: doc.field_value(form, "name").unwrap_or_default(),
            email: doc.field_value(form, "email").unwrap_or_default(),
            message: doc.field_value(form, "message").unwrap_or_default(),
        };

        let uri = mailto_uri(&self.recipient, self.language, &message);
        doc.navigate(&uri);
        if let Some(feedback) = self.feedback {
            doc.set_text(feedback, &self.language.feedback(&self.recipient));
        }
        doc.reset_form(form);
        true
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryPage;

    #[test]
    fn test_encode_unreserved_passthrough() {
        assert_eq!(encode_uri_component("AZaz09-_.!~*'()"), "AZaz09-_.!~*'()");
    }

    #[test]
    fn test_encode_reserved_and_unicode() {
        assert_eq!(encode_uri_component("a b&c=d/e?"), "a%20b%26c%3Dd%2Fe%3F");
        assert_eq!(encode_uri_component("–"), "%E2%80%93");
        assert_eq!(encode_uri_component("à\n"), "%C3%A0%0A");
    }

    #[test]
    fn test_language_from_tag() {
        assert_eq!(Language::from_tag("en"), Language::English);
        assert_eq!(Language::from_tag("it"), Language::Italian);
        assert_eq!(Language::from_tag("en-US"), Language::Italian);
        assert_eq!(Language::from_tag(""), Language::Italian);
    }

    #[test]
    fn test_mailto_uri_english() {
        let message = ContactMessage {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            message: "Hi!".to_string(),
        };
        let uri = mailto_uri("hello@example.com", Language::English, &message);
        assert_eq!(
            uri,
            "mailto:hello@example.com?subject=Message%20from%20portfolio%20%E2%80%93%20Ada\
             &body=Name%3A%20Ada%0AEmail%3A%20ada%40example.com%0A%0AHi!"
        );
    }

    #[test]
    fn test_italian_body_labels() {
        let message = ContactMessage { name: "Lia".to_string(), ..ContactMessage::default() };
        assert_eq!(Language::Italian.body(&message), "Nome: Lia\nEmail: \n\n");
        assert_eq!(Language::Italian.subject("Lia"), "Messaggio dal portfolio – Lia");
    }

    #[test]
    fn test_submit_navigates_and_resets() {
        let mut page = MemoryPage::default();
        let root = page.root();
        page.seed_attribute(root, "lang", "en");
        let body = page.body();
        let form = page.add_element(body, "form", Some("contactForm"), &[], None);
        for (name, value) in [("name", "Ada"), ("email", "ada@example.com"), ("message", "Hello")] {
            let field = page.add_element(form, "input", None, &[], None);
            page.seed_attribute(field, "name", name);
            page.seed_attribute(field, "value", value);
        }
        let feedback = page.add_element(body, "p", Some("contactFeedback"), &[], None);

        let contact = ContactForm::bind(&page, &WidgetsConfig::default()).unwrap();
        assert_eq!(contact.language(), Language::English);
        assert!(contact.on_submit(&mut page, form));

        assert_eq!(page.navigations().len(), 1);
        assert!(page.navigations()[0].starts_with("mailto:hello@example.com?subject=Message%20from"));
        assert!(page.text(feedback).unwrap().starts_with("Thank you!"));
        assert_eq!(page.field_value(form, "name").as_deref(), Some(""));
        assert!(!contact.on_submit(&mut page, body));
    }
}
