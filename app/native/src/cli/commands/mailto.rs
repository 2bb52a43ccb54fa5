//! `lumen mailto`: prints the URI the contact form would open.

use crate::config;
use crate::widgets::{ContactMessage, Language, mailto_uri};

/// Executes the mailto command.
pub fn execute(message: &ContactMessage, language: Language) {
    let recipient = &config::get_config().widgets.contact_recipient;
    tracing::debug!(recipient = %recipient, ?language, "composing contact URI");
    println!("{}", mailto_uri(recipient, language, message));
}
