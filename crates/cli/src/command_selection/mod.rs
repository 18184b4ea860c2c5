//! Interactive spell selection and user input handling.
//!
//! This module provides the terminal-based user interface for the grimoire:
//! the spell picker, the add-flow field prompts and the cast-flow parameter
//! prompts.
//!
//! # User Interface
//!
//! The picker supports:
//! - Arrow-key navigation with wrap-around
//! - Enter to select a spell
//! - `/` to start fuzzy filtering, typing to narrow the list
//! - `q`, Escape or Ctrl+C to quit without selecting

// Export public items from submodules
pub mod input;
pub mod types;
pub mod ui;

// Re-exports for convenience
pub use input::{prompt_parameter_values, prompt_spell_fields};
pub use types::{SpellChoice, SpellForDisplay};
pub use ui::prompt_for_spell_choice;
