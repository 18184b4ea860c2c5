use std::process::{Command, Stdio};

use log::info;

use crate::error::{Error, Result};

/// Executes a command with stdio inherited from the calling process.
///
/// # Errors
///
/// Returns an error if the command cannot be spawned or exits with
/// non-zero status.
pub fn execute_command(mut command: Command) -> Result<()> {
    info!("Executing: {:?}", command);

    let command = command
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    let subprocess_exit_success = command.spawn()?.wait()?.success();

    if subprocess_exit_success {
        Ok(())
    } else {
        Err(Error::SubProcessExit)
    }
}
