//! Shared argument types for CLI commands.

use crate::widgets::Language;

/// Language accepted by `--lang`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum CliLanguage {
    /// English.
    En,
    /// Italian.
    #[default]
    It,
}

impl From<CliLanguage> for Language {
    fn from(lang: CliLanguage) -> Self {
        match lang {
            CliLanguage::En => Self::English,
            CliLanguage::It => Self::Italian,
        }
    }
}

impl std::fmt::Display for CliLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::En => write!(f, "en"),
            Self::It => write!(f, "it"),
        }
    }
}
