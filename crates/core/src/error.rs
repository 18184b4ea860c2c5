use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("The sub process exited with non-success code.")]
    SubProcessExit,

    #[error("Error with sub process: {}", _0)]
    SubProcess(#[from] std::io::Error),

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("parameter `{}` appears multiple times with default values - defaults are only allowed on the first occurrence", _0)]
    DuplicateDefault(String),

    #[error("no value provided for parameter `{}`", _0)]
    MissingValue(String),

    #[error("no `Spell:` field found in `{}`", _0)]
    MissingSpellField(String),

    #[error("spell `{}` already exists as `{}`", _0, _1)]
    SpellExists(String, String),

    #[error("a spell cannot be empty")]
    EmptySpell,

    #[error("a spell name cannot be empty")]
    EmptyName,
}

impl Error {
    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }
}
