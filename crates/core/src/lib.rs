//! Grimoire Core Library
//!
//! This crate provides the core functionality for grimoire, a command-line
//! spellbook that lets users save shell commands as small text records and
//! cast them later with place-holder values filled in.
//!
//! # Key Features
//!
//! - **Spell Templating**: Parse `<name>` and `<name=default>` markers into
//!   a reusable segment sequence and reconstruct the final command from a
//!   name/value mapping
//! - **Spell Records**: A flat key-value text format for stored spells
//! - **File Handling**: Read, write, list and forget spell records in the
//!   grimoire directory
//! - **Configuration**: Resolve the spell directory, editor and shell from
//!   an optional YAML config file
//! - **Error Handling**: One error type covering all failure modes
//!
//! # Examples
//!
//! Parsing a spell and casting it with a value:
//!
//! ```
//! use std::collections::HashMap;
//! use grimoire_core::templating::SpellTemplate;
//!
//! let template = SpellTemplate::parse("echo <name=World>")?;
//! let values = HashMap::from([("name".to_string(), "Alice".to_string())]);
//! assert_eq!(template.reconstruct(&values)?, "echo Alice");
//! # Ok::<(), grimoire_core::error::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod execution;
pub mod file_handling;
pub mod spells;
pub mod templating;
