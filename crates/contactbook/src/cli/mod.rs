//! Command-line interface for contactbook.
//!
//! This module provides the CLI structure for the `contactbook` binary:
//! running the service, seeding it, and a terminal client for it.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{ConfigCommand, ContactArgs, ListCommand, SortFieldArg};

/// contactbook - Manage contacts over a small REST service
///
/// Runs the contact service, or talks to a running one to list, add, edit
/// and delete contacts.
#[derive(Debug, Parser)]
#[command(name = "contactbook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Contact collection URL (overrides client.api_url)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the contact service
    Serve,

    /// Insert the sample contacts if the store is empty
    Seed,

    /// List contacts, one page at a time
    List(ListCommand),

    /// Add a contact
    Add(ContactArgs),

    /// Replace a contact's fields
    Edit {
        /// Contact identifier
        id: i64,

        /// Field values to change
        #[command(flatten)]
        fields: ContactArgs,
    },

    /// Delete a contact
    Delete {
        /// Contact identifier
        id: i64,
    },

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn cli(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            verbose,
            quiet,
            api_url: None,
            command: Command::Serve,
        }
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "contactbook");
    }

    #[test]
    fn test_verbosity_levels() {
        use crate::logging::Verbosity;
        assert_eq!(cli(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(cli(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(cli(2, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["contactbook", "serve"]).unwrap();
        assert!(matches!(cli.command, Command::Serve));
    }

    #[test]
    fn test_parse_list_defaults() {
        let cli = Cli::try_parse_from(["contactbook", "list"]).unwrap();
        let Command::List(list) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(list.sort, SortFieldArg::FirstName);
        assert!(!list.desc);
        assert_eq!(list.page, 1);
        assert!(list.rows.is_none());
    }

    #[test]
    fn test_parse_list_options() {
        let args = [
            "contactbook", "list", "--sort", "job-title", "--desc", "--page", "2", "--rows", "10",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        let Command::List(list) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(list.sort, SortFieldArg::JobTitle);
        assert!(list.desc);
        assert_eq!(list.page, 2);
        assert_eq!(list.rows, Some(10));
    }

    #[test]
    fn test_parse_add() {
        let args = ["contactbook", "add", "--first-name", "Ann", "--email", "a@x.com"];
        let cli = Cli::try_parse_from(args).unwrap();
        let Command::Add(fields) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(fields.first_name.as_deref(), Some("Ann"));
        assert_eq!(fields.email.as_deref(), Some("a@x.com"));
        assert!(fields.phone.is_none());
    }

    #[test]
    fn test_parse_edit() {
        let args = ["contactbook", "edit", "7", "--company", "Acme"];
        let cli = Cli::try_parse_from(args).unwrap();
        let Command::Edit { id, fields } = cli.command else {
            panic!("expected edit");
        };
        assert_eq!(id, 7);
        assert_eq!(fields.company.as_deref(), Some("Acme"));
    }

    #[test]
    fn test_parse_delete_requires_numeric_id() {
        assert!(Cli::try_parse_from(["contactbook", "delete", "3"]).is_ok());
        assert!(Cli::try_parse_from(["contactbook", "delete", "abc"]).is_err());
    }

    #[test]
    fn test_parse_global_flags() {
        let args = [
            "contactbook",
            "-v",
            "-c",
            "/custom/config.toml",
            "--api-url",
            "http://remote:8080/contacts",
            "list",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.verbose, 1);
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
        assert_eq!(cli.api_url.as_deref(), Some("http://remote:8080/contacts"));
    }

    #[test]
    fn test_parse_config_validate() {
        let args = ["contactbook", "config", "validate", "--file", "x.toml"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Validate { file: Some(_) })
        ));
    }
}
