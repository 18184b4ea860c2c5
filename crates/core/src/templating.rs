//! Spell templating: marker parsing and command reconstruction.
//!
//! A spell may contain parameter markers of the form `<name>` or
//! `<name=default1;default2>`. Parsing splits the spell into literal and
//! parameter segments in a single left-to-right scan; reconstruction
//! substitutes a supplied value at every parameter occurrence.
//!
//! Both operations are pure: parsing allocates a new [`SpellTemplate`] that
//! is never mutated afterwards, and reconstruction only reads it, so a
//! template may be reconstructed repeatedly with different value mappings.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::error::{Error, Result};

/// A single parameter in a spell that indicates a value to be substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Substitution key, trimmed of surrounding whitespace, never empty.
    pub name: String,
    /// Ordered default values declared on the first occurrence.
    pub default_values: Vec<String>,
}

impl Parameter {
    /// The fallback value when no input is supplied: the first default.
    #[must_use]
    pub fn first_default(&self) -> Option<&str> {
        self.default_values.first().map(String::as_str)
    }
}

/// One piece of a parsed spell.
///
/// A slot's payload equals its parameter name, which would make it
/// indistinguishable from literal text without the variant tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Slot(String),
}

/// A spell split into segments where parameters can be substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpellTemplate {
    raw: String,
    segments: Vec<Segment>,
    parameters: Vec<Parameter>,
}

impl SpellTemplate {
    /// Splits a spell into segments and identifies parameter slots.
    ///
    /// Marker grammar: `<`, one or more non-`<>` characters that do not
    /// start or end with whitespace, then `>`. An optional `=` inside the
    /// body separates the parameter name from a `;`-delimited default list;
    /// the name and each default are trimmed after splitting.
    ///
    /// Anything failing the grammar (unmatched `<`, empty body, whitespace
    /// at the body edges) is kept as literal text rather than rejected, so
    /// shell syntax such as `sort <file` passes through unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateDefault`] if a parameter name that has
    /// already been seen reappears with a default-value declaration.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut segments: Vec<Segment> = Vec::new();
        let mut parameters: IndexMap<String, Parameter> = IndexMap::new();

        let mut literal_start = 0;
        let mut cursor = 0;

        while let Some(open) = raw[cursor..].find('<').map(|i| cursor + i) {
            let body_start = open + 1;

            // The body may not contain `<` or `>`; whichever delimiter
            // comes next decides whether this `<` opens a marker.
            let Some(delim) = raw[body_start..].find(['<', '>']).map(|i| body_start + i)
            else {
                break;
            };

            if raw[delim..].starts_with('<') {
                // Another `<` before any `>`: rescan from it.
                cursor = delim;
                continue;
            }

            let Some((name, defaults)) = parse_marker_body(&raw[body_start..delim]) else {
                cursor = delim + 1;
                continue;
            };

            if defaults.is_some() && parameters.contains_key(&name) {
                return Err(Error::DuplicateDefault(name));
            }

            if open > literal_start {
                segments.push(Segment::Literal(raw[literal_start..open].to_string()));
            }

            parameters
                .entry(name.clone())
                .or_insert_with(|| Parameter {
                    name: name.clone(),
                    default_values: defaults.unwrap_or_default(),
                });
            segments.push(Segment::Slot(name));

            cursor = delim + 1;
            literal_start = cursor;
        }

        if literal_start < raw.len() || segments.is_empty() {
            segments.push(Segment::Literal(raw[literal_start..].to_string()));
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
            parameters: parameters.into_values().collect(),
        })
    }

    /// Rebuilds the spell with the given parameter values.
    ///
    /// Every slot is replaced with the mapped value for its parameter name;
    /// a repeated parameter is substituted at every occurrence with the
    /// same value. No default fallback is applied here - that policy
    /// belongs to the caller assembling the mapping.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingValue`] naming the first parameter slot
    /// without an entry in `values`. No partial result is produced.
    pub fn reconstruct<S: std::hash::BuildHasher>(
        &self,
        values: &HashMap<String, String, S>,
    ) -> Result<String> {
        let mut result = String::with_capacity(self.raw.len());

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => result.push_str(text),
                Segment::Slot(name) => match values.get(name) {
                    Some(value) => result.push_str(value),
                    None => return Err(Error::MissingValue(name.clone())),
                },
            }
        }

        Ok(result)
    }

    /// The raw spell string this template was parsed from.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Unique parameters in order of first appearance.
    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    #[must_use]
    pub fn has_parameters(&self) -> bool {
        !self.parameters.is_empty()
    }

    /// Total number of parameter slots, counting repeats individually.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|segment| matches!(segment, Segment::Slot(_)))
            .count()
    }
}

/// Validates a marker body and splits it into a name and optional defaults.
///
/// Returns `None` when the body fails the marker grammar, in which case the
/// caller treats the surrounding text as literal.
fn parse_marker_body(body: &str) -> Option<(String, Option<Vec<String>>)> {
    if body.is_empty()
        || body.starts_with(char::is_whitespace)
        || body.ends_with(char::is_whitespace)
    {
        return None;
    }

    let (name, defaults) = match body.split_once('=') {
        Some((name, defaults)) => {
            let defaults = defaults
                .split(';')
                .map(|value| value.trim().to_string())
                .collect();
            (name.trim(), Some(defaults))
        }
        None => (body.trim(), None),
    };

    if name.is_empty() {
        return None;
    }

    Some((name.to_string(), defaults))
}
