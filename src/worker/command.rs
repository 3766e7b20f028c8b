use std::io::{BufRead, BufReader, Read, Write};
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};

use log::{error, info};

use crate::errors::{Result, UiError};
use crate::manager::task::TaskHandle;
use crate::worker::capture::CaptureBuffer;

/// Runs `command` through `sh -c`, piping its output into the task's capture
/// buffers. `Ok(false)` means the command exited unsuccessfully.
pub fn run_shell_command(command: &str, handle: &TaskHandle) -> Result<bool> {
    info!("Starting command '{}'.", command);
    let mut child = Command::new("sh")
        .arg("-c")
        .arg(command)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| UiError::Process(format!("failed to run `{command}`: {e}")))?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| UiError::Process("child stdout was not piped".to_string()))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| UiError::Process("child stderr was not piped".to_string()))?;

    let stdout_reader = forward_lines(stdout, handle.stdout());
    let stderr_reader = forward_lines(stderr, handle.stderr());

    let status = child.wait()?;
    for reader in [stdout_reader, stderr_reader] {
        if reader.join().is_err() {
            error!("Output reader for '{}' panicked", command);
        }
    }
    info!("Command '{}' exited with {}.", command, status);
    Ok(status.success())
}

fn forward_lines<R>(source: R, mut sink: CaptureBuffer) -> JoinHandle<()>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let reader = BufReader::new(source);
        for line in reader.lines() {
            match line {
                Ok(line) => {
                    if let Err(e) = writeln!(sink, "{}", line) {
                        error!("Failed to capture output line: {}", e);
                    }
                }
                Err(e) => {
                    error!("Failed to read command output: {}", e);
                    break;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_output_of_a_successful_command() {
        let handle = TaskHandle::new("echo");
        let ok = run_shell_command("echo out; echo err 1>&2", &handle).unwrap();
        assert!(ok);
        assert_eq!(handle.stdout().contents(), "out\n");
        assert_eq!(handle.stderr().contents(), "err\n");
    }

    #[test]
    fn non_zero_exit_is_reported_as_false() {
        let handle = TaskHandle::new("false");
        assert!(!run_shell_command("exit 3", &handle).unwrap());
    }
}
