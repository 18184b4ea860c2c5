use std::collections::HashMap;
use std::io::{stdin, stdout, Write};

use itertools::Itertools;

use grimoire_core::error::{Error, Result};
use grimoire_core::spells::SpellEntry;
use grimoire_core::templating::{Parameter, SpellTemplate};

/// Prints a prompt and reads one trimmed line from stdin.
fn prompt_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    stdout().flush()?;

    let mut input = String::new();
    stdin().read_line(&mut input)?;

    Ok(input.trim().to_string())
}

/// Resolves a prompted input against a parameter's defaults.
///
/// Non-empty input wins. Empty input falls back to the parameter's first
/// default value; with no default the parameter resolves to nothing, and
/// reconstruction will report it as missing.
#[must_use]
pub fn resolve_parameter_input(input: &str, parameter: &Parameter) -> Option<String> {
    if !input.is_empty() {
        return Some(input.to_string());
    }

    parameter.first_default().map(ToString::to_string)
}

/// Prompts for a value for every parameter of a spell.
///
/// The returned mapping is what [`SpellTemplate::reconstruct`] expects: a
/// value per answered parameter, with unanswered default-less parameters
/// intentionally absent.
///
/// # Errors
///
/// Returns an error if stdin or stdout fail.
pub fn prompt_parameter_values(template: &SpellTemplate) -> Result<HashMap<String, String>> {
    let mut values = HashMap::new();

    for parameter in template.parameters() {
        let mut prompt = format!("Substitute <{}>", parameter.name);
        if !parameter.default_values.is_empty() {
            prompt += &format!(" (default: {})", parameter.default_values.iter().join(", "));
        }
        prompt += ": ";

        let input = prompt_line(&prompt)?;
        if let Some(value) = resolve_parameter_input(&input, parameter) {
            values.insert(parameter.name.clone(), value);
        }
    }

    Ok(values)
}

/// Prompts for the add-flow fields not provided as arguments.
///
/// `fields` holds up to three positional arguments: spell text, name and
/// description, in that order. Whatever is missing is prompted for. The
/// spell and its name must end up non-empty; the description may be blank.
///
/// # Errors
///
/// Returns an error if the spell or name is empty, or if stdin/stdout fail.
pub fn prompt_spell_fields(fields: &[String]) -> Result<SpellEntry> {
    let spell = match fields.first() {
        Some(spell) => spell.trim().to_string(),
        None => prompt_line("Spell> ")?,
    };
    if spell.is_empty() {
        return Err(Error::EmptySpell);
    }

    let name = match fields.get(1) {
        Some(name) => name.trim().to_string(),
        None => prompt_line("Name> ")?,
    };
    if name.is_empty() {
        return Err(Error::EmptyName);
    }

    let description = match fields.get(2) {
        Some(description) => description.trim().to_string(),
        None => prompt_line("Description> ")?,
    };

    Ok(SpellEntry {
        spell,
        name,
        description,
        tags: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parameter(name: &str, defaults: &[&str]) -> Parameter {
        Parameter {
            name: name.to_string(),
            default_values: defaults.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn test_resolve_parameter_input_prefers_user_input() {
        let param = parameter("name", &["World"]);
        assert_eq!(
            resolve_parameter_input("Alice", &param),
            Some("Alice".to_string())
        );
    }

    #[test]
    fn test_resolve_parameter_input_falls_back_to_first_default() {
        let param = parameter("name", &["World", "Everyone"]);
        assert_eq!(
            resolve_parameter_input("", &param),
            Some("World".to_string())
        );
    }

    #[test]
    fn test_resolve_parameter_input_without_default_resolves_to_nothing() {
        let param = parameter("name", &[]);
        assert_eq!(resolve_parameter_input("", &param), None);
    }

    #[test]
    fn test_prompt_spell_fields_from_arguments() {
        let fields = vec![
            "echo <name>".to_string(),
            "greet".to_string(),
            "Say hello".to_string(),
        ];

        let entry = prompt_spell_fields(&fields).unwrap();
        assert_eq!(entry.spell, "echo <name>");
        assert_eq!(entry.name, "greet");
        assert_eq!(entry.description, "Say hello");
        assert!(entry.tags.is_empty());
    }

    #[test]
    fn test_prompt_spell_fields_rejects_blank_spell() {
        let fields = vec!["   ".to_string(), "greet".to_string(), "x".to_string()];

        let result = prompt_spell_fields(&fields);
        assert!(matches!(result, Err(Error::EmptySpell)));
    }

    #[test]
    fn test_prompt_spell_fields_rejects_blank_name() {
        let fields = vec!["echo hi".to_string(), " ".to_string(), "x".to_string()];

        let result = prompt_spell_fields(&fields);
        assert!(matches!(result, Err(Error::EmptyName)));
    }
}
