//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::client::SortDirection;
use crate::contact::ContactField;

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Column to sort by
    #[arg(short, long, value_enum, default_value = "first-name")]
    pub sort: SortFieldArg,

    /// Sort in descending order
    #[arg(short, long)]
    pub desc: bool,

    /// Page to show, starting at 1
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Rows per page (defaults to the configured value)
    #[arg(short, long)]
    pub rows: Option<usize>,

    /// Output the full list as JSON
    #[arg(short, long)]
    pub json: bool,
}

impl ListCommand {
    /// The requested sort direction.
    #[must_use]
    pub fn direction(&self) -> SortDirection {
        if self.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        }
    }
}

/// Contact field values given on the command line.
///
/// `add` starts from a blank form, so fields left out are stored as absent.
/// `edit` starts from the current record, so fields left out keep their
/// stored value.
#[derive(Debug, Default, Args)]
pub struct ContactArgs {
    /// First name
    #[arg(long)]
    pub first_name: Option<String>,

    /// Last name
    #[arg(long)]
    pub last_name: Option<String>,

    /// Email address
    #[arg(long)]
    pub email: Option<String>,

    /// Phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// Company
    #[arg(long)]
    pub company: Option<String>,

    /// Job title
    #[arg(long)]
    pub job_title: Option<String>,
}

impl ContactArgs {
    /// The given values, keyed by field.
    #[must_use]
    pub fn values(&self) -> Vec<(ContactField, String)> {
        let given = [
            (ContactField::FirstName, &self.first_name),
            (ContactField::LastName, &self.last_name),
            (ContactField::Email, &self.email),
            (ContactField::Phone, &self.phone),
            (ContactField::Company, &self.company),
            (ContactField::JobTitle, &self.job_title),
        ];
        given
            .into_iter()
            .filter_map(|(field, value)| value.clone().map(|v| (field, v)))
            .collect()
    }
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Sortable column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortFieldArg {
    /// First name
    FirstName,
    /// Last name
    LastName,
    /// Email address
    Email,
    /// Phone number
    Phone,
    /// Company
    Company,
    /// Job title
    JobTitle,
}

impl From<SortFieldArg> for ContactField {
    fn from(arg: SortFieldArg) -> Self {
        match arg {
            SortFieldArg::FirstName => Self::FirstName,
            SortFieldArg::LastName => Self::LastName,
            SortFieldArg::Email => Self::Email,
            SortFieldArg::Phone => Self::Phone,
            SortFieldArg::Company => Self::Company,
            SortFieldArg::JobTitle => Self::JobTitle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_field_arg_conversion() {
        assert_eq!(
            ContactField::from(SortFieldArg::FirstName),
            ContactField::FirstName
        );
        assert_eq!(
            ContactField::from(SortFieldArg::Company),
            ContactField::Company
        );
        assert_eq!(
            ContactField::from(SortFieldArg::JobTitle),
            ContactField::JobTitle
        );
    }

    #[test]
    fn test_contact_args_values_only_given() {
        let args = ContactArgs {
            phone: Some("555".to_string()),
            job_title: Some("CTO".to_string()),
            ..ContactArgs::default()
        };
        assert_eq!(
            args.values(),
            [
                (ContactField::Phone, "555".to_string()),
                (ContactField::JobTitle, "CTO".to_string()),
            ]
        );
        assert!(ContactArgs::default().values().is_empty());
    }

    #[test]
    fn test_list_direction() {
        let mut cmd = ListCommand {
            sort: SortFieldArg::Email,
            desc: false,
            page: 1,
            rows: None,
            json: false,
        };
        assert_eq!(cmd.direction(), SortDirection::Ascending);
        cmd.desc = true;
        assert_eq!(cmd.direction(), SortDirection::Descending);
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }
}
