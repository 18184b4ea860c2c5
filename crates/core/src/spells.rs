//! Spell record type and its flat text wire format.
//!
//! A spell is stored as a small text record, one `Field: value` pair per
//! line. The format is deliberately quoting-free so that spell text (shell
//! commands, including `<...>` parameter markers) round-trips exactly.

use std::fmt::{Display, Formatter};

/// Prefix of the record line holding the spell text itself.
pub const SPELL_FIELD_PREFIX: &str = "Spell: ";
const NAME_FIELD_PREFIX: &str = "Name: ";
const DESCRIPTION_FIELD_PREFIX: &str = "Description: ";
const TAGS_FIELD_PREFIX: &str = "Tags: ";

/// A stored spell: the command text plus its catalogue fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpellEntry {
    pub spell: String,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
}

impl SpellEntry {
    /// Parses a record from its on-disk text form.
    ///
    /// Lines are trimmed before matching; blank lines and lines with no
    /// known field prefix are ignored. A later line for the same field
    /// overwrites an earlier one.
    #[must_use]
    pub fn from_record(contents: &str) -> Self {
        let mut entry = Self::default();

        for line in contents.lines() {
            let line = line.trim();

            if let Some(spell) = line.strip_prefix(SPELL_FIELD_PREFIX) {
                entry.spell = spell.to_string();
            } else if let Some(name) = line.strip_prefix(NAME_FIELD_PREFIX) {
                entry.name = name.to_string();
            } else if let Some(description) = line.strip_prefix(DESCRIPTION_FIELD_PREFIX) {
                entry.description = description.to_string();
            } else if let Some(tags) = line.strip_prefix(TAGS_FIELD_PREFIX) {
                if !tags.is_empty() {
                    entry.tags = tags.split(',').map(|tag| tag.trim().to_string()).collect();
                }
            }
        }

        entry
    }

    /// Serializes the record to its on-disk text form.
    ///
    /// The tags line is omitted when there are no tags.
    #[must_use]
    pub fn to_record(&self) -> String {
        let mut contents = format!(
            "{}{}\n{}{}\n{}{}",
            SPELL_FIELD_PREFIX,
            self.spell,
            NAME_FIELD_PREFIX,
            self.name,
            DESCRIPTION_FIELD_PREFIX,
            self.description,
        );

        if !self.tags.is_empty() {
            contents.push('\n');
            contents.push_str(TAGS_FIELD_PREFIX);
            contents.push_str(&self.tags.join(", "));
        }

        contents
    }
}

impl Display for SpellEntry {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        if self.description.is_empty() {
            formatter.write_str(&self.name)
        } else {
            write!(formatter, "{} ({})", self.name, self.description)
        }
    }
}

/// Derives a filesystem-safe stem from a spell name.
///
/// Spaces become underscores, everything is lowercased, and characters
/// outside `[a-z0-9_-]` are dropped.
#[must_use]
pub fn sanitize_filename(name: &str) -> String {
    name.to_lowercase()
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_' || *c == '-')
        .collect()
}
