//! Shell command execution shared by the backends

use std::io;
use std::process::{Command, Output};

/// Run `command` through `sh -c`, capturing output.
///
/// `env` entries are added on top of the inherited environment.
pub(crate) fn run_shell(command: &str, env: &[(String, String)]) -> io::Result<Output> {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    for (key, value) in env {
        cmd.env(key, value);
    }
    cmd.output()
}
