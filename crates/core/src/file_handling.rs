//! File handling for the grimoire's record store.
//!
//! Spells live as individual `.txt` records in a single directory. This
//! module owns every filesystem touch: creating the directory, listing,
//! reading and writing records, and moving forgotten spells aside.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::{Error, Result};
use crate::spells::{sanitize_filename, SpellEntry};

/// Subdirectory of the spell path that forgotten spells are moved into.
pub const FORGOTTEN_DIR: &str = "forgotten";

/// Extension given to every spell record file.
const SPELL_EXTENSION: &str = "txt";

#[must_use]
pub fn spell_file_path(spell_path: &str, filename: &str) -> PathBuf {
    Path::new(spell_path).join(filename)
}

/// Creates the spell directory if it does not exist yet.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_spell_dir(spell_path: &str) -> Result<()> {
    if !Path::new(spell_path).exists() {
        info!("Creating spell path: `{spell_path}`");
        fs::create_dir_all(spell_path).map_err(|e| {
            Error::io_error("spell directory".to_string(), spell_path.to_string(), e)
        })?;
    }

    Ok(())
}

/// Lists the spell record filenames in the directory, sorted.
///
/// Only regular `.txt` files count as records; the `forgotten/`
/// subdirectory and anything else is skipped.
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub fn list_spell_files(spell_path: &str) -> Result<Vec<String>> {
    let entries = fs::read_dir(spell_path)
        .map_err(|e| Error::io_error("spell directory".to_string(), spell_path.to_string(), e))?;

    let mut filenames = Vec::new();

    for entry in entries {
        let entry = entry.map_err(|e| {
            Error::io_error("spell directory".to_string(), spell_path.to_string(), e)
        })?;

        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == SPELL_EXTENSION) {
            if let Some(filename) = path.file_name().and_then(|name| name.to_str()) {
                filenames.push(filename.to_string());
            }
        }
    }

    filenames.sort();

    Ok(filenames)
}

/// Reads a record file without interpreting it.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn read_spell_record(spell_path: &str, filename: &str) -> Result<String> {
    let path = spell_file_path(spell_path, filename);

    fs::read_to_string(&path)
        .map_err(|e| Error::io_error("spell".to_string(), path.display().to_string(), e))
}

/// Reads and parses a spell record.
///
/// # Errors
///
/// Returns an error if the file cannot be read or its record carries no
/// `Spell:` field.
pub fn read_spell(spell_path: &str, filename: &str) -> Result<SpellEntry> {
    let contents = read_spell_record(spell_path, filename)?;

    let entry = SpellEntry::from_record(&contents);
    if entry.spell.is_empty() {
        return Err(Error::MissingSpellField(filename.to_string()));
    }

    Ok(entry)
}

/// Writes a new spell record, deriving the filename from the spell name.
///
/// Returns the filename written.
///
/// # Errors
///
/// Returns an error if the name sanitizes to nothing, a record with that
/// filename already exists, or the file cannot be written.
pub fn write_spell(spell_path: &str, entry: &SpellEntry) -> Result<String> {
    let stem = sanitize_filename(&entry.name);
    if stem.is_empty() {
        return Err(Error::EmptyName);
    }

    let filename = format!("{stem}.{SPELL_EXTENSION}");
    let path = spell_file_path(spell_path, &filename);

    if path.exists() {
        return Err(Error::SpellExists(entry.name.clone(), filename));
    }

    fs::write(&path, entry.to_record())
        .map_err(|e| Error::io_error("spell".to_string(), path.display().to_string(), e))?;

    Ok(filename)
}

/// Moves a spell record into the `forgotten/` subdirectory.
///
/// Returns the record's new path. The move stays within one directory
/// tree, so a plain rename suffices.
///
/// # Errors
///
/// Returns an error if the destination directory cannot be created or the
/// rename fails.
pub fn forget_spell(spell_path: &str, filename: &str) -> Result<PathBuf> {
    let source = spell_file_path(spell_path, filename);

    let forgotten_dir = Path::new(spell_path).join(FORGOTTEN_DIR);
    fs::create_dir_all(&forgotten_dir).map_err(|e| {
        Error::io_error(
            "forgotten directory".to_string(),
            forgotten_dir.display().to_string(),
            e,
        )
    })?;

    let destination = forgotten_dir.join(filename);
    fs::rename(&source, &destination)
        .map_err(|e| Error::io_error("spell".to_string(), source.display().to_string(), e))?;

    Ok(destination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn test_entry() -> SpellEntry {
        SpellEntry {
            spell: "echo <name=World>".to_string(),
            name: "Greet Someone".to_string(),
            description: "Say hello".to_string(),
            tags: vec!["fun".to_string()],
        }
    }

    #[test]
    fn test_ensure_spell_dir_creates_missing_directory() {
        let dir = tempdir().unwrap();
        let spell_path = dir.path().join("grimoire");
        let spell_path_str = spell_path.to_str().unwrap();

        ensure_spell_dir(spell_path_str).unwrap();
        assert!(spell_path.is_dir());

        // A second call on the existing directory is a no-op.
        ensure_spell_dir(spell_path_str).unwrap();
    }

    #[test]
    fn test_write_and_read_spell() {
        let dir = tempdir().unwrap();
        let spell_path = dir.path().to_str().unwrap();

        let filename = write_spell(spell_path, &test_entry()).unwrap();
        assert_eq!(filename, "greet_someone.txt");

        let read_back = read_spell(spell_path, &filename).unwrap();
        assert_eq!(read_back, test_entry());
    }

    #[test]
    fn test_write_spell_refuses_overwrite() {
        let dir = tempdir().unwrap();
        let spell_path = dir.path().to_str().unwrap();

        write_spell(spell_path, &test_entry()).unwrap();
        let result = write_spell(spell_path, &test_entry());

        assert!(matches!(result, Err(Error::SpellExists(_, _))));
    }

    #[test]
    fn test_write_spell_with_unsanitizable_name() {
        let dir = tempdir().unwrap();
        let spell_path = dir.path().to_str().unwrap();

        let mut entry = test_entry();
        entry.name = "!!!".to_string();

        let result = write_spell(spell_path, &entry);
        assert!(matches!(result, Err(Error::EmptyName)));
    }

    #[test]
    fn test_list_spell_files_sorted_and_filtered() {
        let dir = tempdir().unwrap();
        let spell_path = dir.path().to_str().unwrap();

        fs::write(dir.path().join("beta.txt"), "Spell: b").unwrap();
        fs::write(dir.path().join("alpha.txt"), "Spell: a").unwrap();
        fs::write(dir.path().join("notes.md"), "not a spell").unwrap();
        fs::create_dir(dir.path().join(FORGOTTEN_DIR)).unwrap();

        let filenames = list_spell_files(spell_path).unwrap();
        assert_eq!(filenames, vec!["alpha.txt".to_string(), "beta.txt".to_string()]);
    }

    #[test]
    fn test_read_spell_without_spell_field() {
        let dir = tempdir().unwrap();
        let spell_path = dir.path().to_str().unwrap();

        fs::write(dir.path().join("broken.txt"), "Name: broken").unwrap();

        let result = read_spell(spell_path, "broken.txt");
        assert!(matches!(result, Err(Error::MissingSpellField(filename)) if filename == "broken.txt"));
    }

    #[test]
    fn test_read_spell_missing_file() {
        let dir = tempdir().unwrap();
        let spell_path = dir.path().to_str().unwrap();

        let result = read_spell(spell_path, "nope.txt");
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn test_forget_spell_moves_record() {
        let dir = tempdir().unwrap();
        let spell_path = dir.path().to_str().unwrap();

        let filename = write_spell(spell_path, &test_entry()).unwrap();
        let destination = forget_spell(spell_path, &filename).unwrap();

        assert!(!spell_file_path(spell_path, &filename).exists());
        assert!(destination.is_file());
        assert!(destination.starts_with(dir.path().join(FORGOTTEN_DIR)));

        // The forgotten record no longer shows up in listings.
        assert!(list_spell_files(spell_path).unwrap().is_empty());
    }
}
