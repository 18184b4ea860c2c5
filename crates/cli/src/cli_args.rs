//! Command-line argument parsing and validation.
//!
//! This module defines the command-line interface structure for the `grim`
//! binary using the `clap` crate.

use clap::{Parser, Subcommand};

/// Command-line arguments for the grimoire CLI tool.
///
/// Every subcommand works against the same spell directory, resolved from
/// the `--spell-path` flag, the config file, or the built-in default.
#[derive(Parser, Debug)] // requires `derive` feature
#[command(name = "grim", about = "A grimoire for your command-line spells")]
#[command(term_width = 0)] // Just to make testing across clap features easier
pub struct Args {
    /// Path to the grimoire config file YAML.
    ///
    /// If not provided, defaults to `~/.grimoire/config.yml`.
    #[arg(long, short = 'c', global = true)]
    pub config_path: Option<String>,

    /// Directory where spells are stored.
    ///
    /// Overrides the config file; defaults to `~/grimoire`.
    #[arg(long, short = 's', global = true)]
    pub spell_path: Option<String>,

    #[command(subcommand)]
    pub command: SpellCommand,
}

/// The spellbook subcommands.
#[derive(Subcommand, Debug)]
pub enum SpellCommand {
    /// Add a new spell to the grimoire
    Add {
        /// Comma-delimited tags for the spell.
        #[arg(long, short = 't')]
        tags: Option<String>,

        /// Spell text, name and description, in that order.
        ///
        /// Any omitted field is prompted for interactively.
        #[arg(num_args(0..=3))]
        fields: Vec<String>,
    },

    /// Edit an existing spell with your editor
    Edit,

    /// View the stored record of a spell
    View,

    /// Find a spell and print its command to stdout
    Find,

    /// Cast a spell, filling in parameter values
    Cast {
        /// Print the final command without executing it.
        #[arg(long, short = 'd', action)]
        dry_run: bool,
    },

    /// Move a spell into the forgotten folder
    Forget,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_args_require_a_subcommand() {
        let result = Args::try_parse_from(["grim"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_args_global_flags() {
        let args = Args::parse_from([
            "grim",
            "cast",
            "-c",
            "/custom/config.yml",
            "-s",
            "/custom/spells",
        ]);

        assert_eq!(args.config_path, Some("/custom/config.yml".to_string()));
        assert_eq!(args.spell_path, Some("/custom/spells".to_string()));
        assert!(matches!(args.command, SpellCommand::Cast { dry_run: false }));
    }

    #[test]
    fn test_args_cast_dry_run() {
        let args = Args::parse_from(["grim", "cast", "--dry-run"]);
        assert!(matches!(args.command, SpellCommand::Cast { dry_run: true }));
    }

    #[test]
    fn test_args_add_with_fields_and_tags() {
        let args = Args::parse_from([
            "grim",
            "add",
            "-t",
            "net, k8s",
            "kubectl get pods -n <namespace=default>",
            "get pods",
            "List pods in a namespace",
        ]);

        match args.command {
            SpellCommand::Add { tags, fields } => {
                assert_eq!(tags, Some("net, k8s".to_string()));
                assert_eq!(fields.len(), 3);
                assert_eq!(fields[0], "kubectl get pods -n <namespace=default>");
                assert_eq!(fields[1], "get pods");
                assert_eq!(fields[2], "List pods in a namespace");
            }
            other => panic!("expected Add, got {other:?}"),
        }
    }

    #[test]
    fn test_args_add_without_fields() {
        let args = Args::parse_from(["grim", "add"]);

        match args.command {
            SpellCommand::Add { tags, fields } => {
                assert!(tags.is_none());
                assert!(fields.is_empty());
            }
            other => panic!("expected Add, got {other:?}"),
        }
    }

    #[test]
    fn test_args_add_rejects_too_many_fields() {
        let result = Args::try_parse_from(["grim", "add", "a", "b", "c", "d"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_args_simple_subcommands() {
        assert!(matches!(
            Args::parse_from(["grim", "edit"]).command,
            SpellCommand::Edit
        ));
        assert!(matches!(
            Args::parse_from(["grim", "view"]).command,
            SpellCommand::View
        ));
        assert!(matches!(
            Args::parse_from(["grim", "find"]).command,
            SpellCommand::Find
        ));
        assert!(matches!(
            Args::parse_from(["grim", "forget"]).command,
            SpellCommand::Forget
        ));
    }
}
