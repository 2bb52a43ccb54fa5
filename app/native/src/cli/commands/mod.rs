//! CLI command definitions using Clap.
//!
//! - `simulate` - Replay a scenario against the in-memory page
//! - `mailto` - Compose the contact-form URI
//! - `schema` - Print the configuration or scenario JSON Schema
//! - `completions` - Generate shell completions

use std::io;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Generator, Shell, generate};

use crate::error::LumenError;
use crate::widgets::ContactMessage;
use crate::{config, schema};

pub mod mailto;
pub mod simulate;
pub mod types;

pub use types::CliLanguage;

/// Application version from Cargo.toml.
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Lumen CLI - viewport-reactive page controller on a simulated page.
#[derive(Parser, Debug)]
#[command(name = "lumen")]
#[command(author, version = APP_VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a custom configuration file.
    ///
    /// Overrides the default configuration file search paths.
    /// Supports JSONC format (JSON with comments).
    #[arg(long, short, global = true, value_name = "PATH")]
    pub config: Option<String>,

    /// Log at debug level unless `LUMEN_LOG` says otherwise.
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a scenario file and print the resulting page state.
    ///
    /// The scenario describes the page (viewport, capabilities, elements with
    /// layout boxes) and a script of steps: scroll, pointer, resize, frame,
    /// click, key, submit.
    Simulate {
        /// Path to the JSONC scenario.
        #[arg(value_name = "SCENARIO")]
        scenario: PathBuf,

        /// Print the state as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the mailto URI the contact form opens for a message.
    Mailto {
        /// Sender name.
        #[arg(long)]
        name: String,

        /// Sender email.
        #[arg(long)]
        email: String,

        /// Message text.
        #[arg(long)]
        message: String,

        /// Language of the subject and body.
        #[arg(long, value_enum, default_value_t = CliLanguage::It)]
        lang: CliLanguage,
    },

    /// Output a JSON Schema.
    ///
    /// Prints the configuration schema, or the scenario schema with
    /// `--scenario`. Redirect to a file for editor validation.
    Schema {
        /// Print the scenario file schema instead.
        #[arg(long)]
        scenario: bool,
    },

    /// Generate shell completions.
    ///
    /// Usage:
    ///   eval "$(lumen completions --shell zsh)"
    ///   lumen completions --shell fish > ~/.config/fish/completions/lumen.fish
    Completions {
        /// The shell to generate completions for.
        #[arg(long, short, value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command execution fails.
    pub fn execute(&self) -> Result<(), LumenError> {
        if let Some(ref path) = self.config {
            let path_buf = PathBuf::from(path);
            if !path_buf.exists() {
                return Err(LumenError::ConfigError(format!(
                    "Configuration file not found: {path}"
                )));
            }
            config::set_custom_config_path(path_buf);
        }

        match &self.command {
            Commands::Simulate { scenario, json } => simulate::execute(scenario, *json),

            Commands::Mailto { name, email, message, lang } => {
                let message = ContactMessage {
                    name: name.clone(),
                    email: email.clone(),
                    message: message.clone(),
                };
                mailto::execute(&message, (*lang).into());
                Ok(())
            }

            Commands::Schema { scenario } => {
                let output = if *scenario {
                    schema::generate_scenario_schema_json()
                } else {
                    schema::generate_schema_json()
                };
                println!("{output}");
                Ok(())
            }

            Commands::Completions { shell } => {
                Self::print_completions(*shell);
                Ok(())
            }
        }
    }

    /// Print shell completions to stdout.
    fn print_completions<G: Generator>(generator: G) {
        let mut cmd = Self::command();
        generate(generator, &mut cmd, "lumen", &mut io::stdout());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() { Cli::command().debug_assert(); }

    #[test]
    fn test_cli_parses_simulate() {
        let cli = Cli::try_parse_from(["lumen", "simulate", "page.jsonc"]).unwrap();
        match cli.command {
            Commands::Simulate { scenario, json } => {
                assert_eq!(scenario, PathBuf::from("page.jsonc"));
                assert!(!json);
            }
            _ => panic!("Expected Simulate command"),
        }
    }

    #[test]
    fn test_cli_parses_simulate_json() {
        let cli = Cli::try_parse_from(["lumen", "simulate", "page.jsonc", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Simulate { json: true, .. }));
    }

    #[test]
    fn test_cli_simulate_requires_scenario() {
        assert!(Cli::try_parse_from(["lumen", "simulate"]).is_err());
    }

    #[test]
    fn test_cli_parses_mailto() {
        let cli = Cli::try_parse_from([
            "lumen", "mailto", "--name", "Ada", "--email", "ada@example.com", "--message", "Hi",
            "--lang", "en",
        ])
        .unwrap();
        match cli.command {
            Commands::Mailto { name, email, message, lang } => {
                assert_eq!(name, "Ada");
                assert_eq!(email, "ada@example.com");
                assert_eq!(message, "Hi");
                assert_eq!(lang, CliLanguage::En);
            }
            _ => panic!("Expected Mailto command"),
        }
    }

    #[test]
    fn test_cli_mailto_defaults_to_italian() {
        let cli = Cli::try_parse_from([
            "lumen", "mailto", "--name", "Ada", "--email", "a@b.c", "--message", "Ciao",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Mailto { lang: CliLanguage::It, .. }));
    }

    #[test]
    fn test_cli_rejects_unknown_language() {
        let result = Cli::try_parse_from([
            "lumen", "mailto", "--name", "A", "--email", "a@b.c", "--message", "m", "--lang", "fr",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parses_schema() {
        let cli = Cli::try_parse_from(["lumen", "schema"]).unwrap();
        assert!(matches!(cli.command, Commands::Schema { scenario: false }));

        let cli = Cli::try_parse_from(["lumen", "schema", "--scenario"]).unwrap();
        assert!(matches!(cli.command, Commands::Schema { scenario: true }));
    }

    #[test]
    fn test_cli_parses_completions_zsh() {
        let cli = Cli::try_parse_from(["lumen", "completions", "--shell", "zsh"]).unwrap();
        match cli.command {
            Commands::Completions { shell } => assert_eq!(shell, Shell::Zsh),
            _ => panic!("Expected Completions command"),
        }
    }

    #[test]
    fn test_app_version_is_not_empty() {
        assert!(!APP_VERSION.is_empty());
    }

    // ========================================================================
    // Global flags
    // ========================================================================

    #[test]
    fn test_cli_parses_config_flag() {
        let cli =
            Cli::try_parse_from(["lumen", "--config", "/path/to/config.json", "schema"]).unwrap();
        assert_eq!(cli.config, Some("/path/to/config.json".to_string()));
    }

    #[test]
    fn test_cli_parses_config_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["lumen", "schema", "-c", "/path/to/config.json"]).unwrap();
        assert_eq!(cli.config, Some("/path/to/config.json".to_string()));
    }

    #[test]
    fn test_cli_parses_verbose_flag() {
        let cli = Cli::try_parse_from(["lumen", "-v", "schema"]).unwrap();
        assert!(cli.verbose);
        let cli = Cli::try_parse_from(["lumen", "schema"]).unwrap();
        assert!(!cli.verbose);
    }

    #[test]
    fn test_execute_rejects_missing_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.jsonc");
        let cli =
            Cli::try_parse_from(["lumen", "--config", missing.to_str().unwrap(), "schema"]).unwrap();
        let err = cli.execute().unwrap_err();
        assert!(matches!(err, LumenError::ConfigError(_)));
    }
}
