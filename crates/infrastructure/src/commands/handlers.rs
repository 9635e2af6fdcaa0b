//! Built-in command handlers

use std::process::Stdio;

use async_trait::async_trait;
use qvars_application::ports::CommandProviderError;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::Command;

use super::registry::CommandHandler;

/// Always answers with the same string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedValue {
    value: String,
}

impl FixedValue {
    /// Creates a handler answering `value`.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

#[async_trait]
impl CommandHandler for FixedValue {
    async fn run(
        &self,
        _command_id: &str,
        _context: &Value,
    ) -> Result<Option<Value>, CommandProviderError> {
        Ok(Some(Value::String(self.value.clone())))
    }
}

/// Runs a command line through the system shell and answers with its stdout.
///
/// One trailing line break is removed from the output. A non-zero exit
/// status fails the command with its stderr as the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellCommand {
    command_line: String,
}

impl ShellCommand {
    /// Creates a handler for `command_line`.
    #[must_use]
    pub fn new(command_line: impl Into<String>) -> Self {
        Self {
            command_line: command_line.into(),
        }
    }

    fn command(&self) -> Command {
        let mut cmd = if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C");
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.arg("-c");
            cmd
        };
        cmd.arg(&self.command_line)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }
}

#[async_trait]
impl CommandHandler for ShellCommand {
    async fn run(
        &self,
        command_id: &str,
        _context: &Value,
    ) -> Result<Option<Value>, CommandProviderError> {
        tracing::debug!(command = %command_id, line = %self.command_line, "spawning shell command");
        let output = self.command().output().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = match stderr.trim() {
                "" => format!("exited with {}", output.status),
                trimmed => trimmed.to_string(),
            };
            return Err(CommandProviderError::Failed {
                command: command_id.to_string(),
                message,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(Some(Value::String(strip_line_break(&stdout).to_string())))
    }
}

fn strip_line_break(text: &str) -> &str {
    text.strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .unwrap_or(text)
}

/// Asks on stderr and reads one line from stdin.
///
/// End of input or an empty answer counts as a cancellation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StdinPrompt {
    message: String,
}

impl StdinPrompt {
    /// Creates a prompt showing `message`.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl CommandHandler for StdinPrompt {
    async fn run(
        &self,
        command_id: &str,
        _context: &Value,
    ) -> Result<Option<Value>, CommandProviderError> {
        let mut stderr = tokio::io::stderr();
        stderr.write_all(format!("{}: ", self.message).as_bytes()).await?;
        stderr.flush().await?;

        let mut stdin = BufReader::new(tokio::io::stdin());
        let answer = read_answer(&mut stdin).await?;
        if answer.is_none() {
            tracing::debug!(command = %command_id, "prompt dismissed");
        }
        Ok(answer.map(Value::String))
    }
}

/// Reads one answer line; `None` on end of input or an empty line.
///
/// # Errors
/// Returns an error if reading fails.
pub async fn read_answer<R>(reader: &mut R) -> std::io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = String::new();
    if reader.read_line(&mut line).await? == 0 {
        return Ok(None);
    }
    let answer = strip_line_break(&line);
    Ok((!answer.is_empty()).then(|| answer.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn test_fixed_value() {
        let handler = FixedValue::new("ibmq_qasm_simulator");
        let result = handler.run("pick", &Value::Null).await.unwrap();
        assert_eq!(result, Some(json!("ibmq_qasm_simulator")));
    }

    #[test]
    fn test_strip_line_break() {
        assert_eq!(strip_line_break("a\n"), "a");
        assert_eq!(strip_line_break("a\r\n"), "a");
        assert_eq!(strip_line_break("a\n\n"), "a\n");
        assert_eq!(strip_line_break("a"), "a");
    }

    #[tokio::test]
    async fn test_read_answer() {
        let mut input: &[u8] = b"statevector\nrest\n";
        assert_eq!(read_answer(&mut input).await.unwrap().as_deref(), Some("statevector"));
    }

    #[tokio::test]
    async fn test_read_answer_cancelled() {
        let mut eof: &[u8] = b"";
        assert_eq!(read_answer(&mut eof).await.unwrap(), None);

        let mut empty: &[u8] = b"\n";
        assert_eq!(read_answer(&mut empty).await.unwrap(), None);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_shell_command_stdout() {
        let handler = ShellCommand::new("printf 'aer\\n'");
        let result = handler.run("pick", &Value::Null).await.unwrap();
        assert_eq!(result, Some(json!("aer")));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_shell_command_failure() {
        let handler = ShellCommand::new("echo broken >&2; exit 3");
        let err = handler.run("pick", &Value::Null).await.unwrap_err();
        match err {
            CommandProviderError::Failed { command, message } => {
                assert_eq!(command, "pick");
                assert_eq!(message, "broken");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
