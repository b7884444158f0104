//! Running external tools as child processes

use crate::error::{StrokeError, StrokeResult};
use std::ffi::OsString;
use std::io::ErrorKind;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, Command};
use tracing::debug;

/// Max number of output lines to include in tool error messages.
const ERROR_TAIL_LINES: usize = 50;

/// A configured external command: program plus leading arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    program: String,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl ToolCommand {
    /// Build from a `["program", "arg", ...]` list as found in the config
    pub fn from_argv(argv: &[String]) -> StrokeResult<Self> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| StrokeError::Internal("empty tool command".to_string()))?;
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
            timeout: None,
        })
    }

    /// Abort the tool if it runs longer than `timeout`
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Display name (the full configured command line)
    pub fn display_name(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run the tool with `extra` arguments appended, failing on non-zero exit.
    ///
    /// Output is streamed into debug logs and the tail is attached to the
    /// error when the tool fails.
    pub async fn run(&self, extra: Vec<OsString>) -> StrokeResult<()> {
        let name = self.display_name();
        debug!("Executing: {} {:?}", name, extra);

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .args(&extra)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => StrokeError::ToolNotFound {
                    name: name.clone(),
                    source: e,
                },
                _ => StrokeError::io(format!("spawning {}", name), e),
            })?;

        let finished = async {
            let lines = stream_child_output(&mut child, &|line: &str| debug!("{}", line)).await?;
            let status = child
                .wait()
                .await
                .map_err(|e| StrokeError::io(format!("waiting for {}", name), e))?;
            Ok::<_, StrokeError>((status, lines))
        };

        let (status, lines) = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, finished)
                .await
                .map_err(|_| StrokeError::ToolTimeout {
                    tool: name.clone(),
                    secs: limit.as_secs(),
                })??,
            None => finished.await?,
        };

        if status.success() {
            Ok(())
        } else {
            Err(StrokeError::tool_failed(
                name,
                status.code().unwrap_or(-1),
                error_tail(&lines),
            ))
        }
    }
}

/// Keep the last `ERROR_TAIL_LINES` lines of output for error diagnostics.
fn error_tail(lines: &[String]) -> String {
    let start = lines.len().saturating_sub(ERROR_TAIL_LINES);
    lines[start..].join("\n")
}

/// Stream stdout+stderr from a child process, calling `on_output` for each line.
///
/// Returns all collected output lines for error reporting.
async fn stream_child_output(
    child: &mut Child,
    on_output: &(dyn Fn(&str) + Send + Sync),
) -> StrokeResult<Vec<String>> {
    let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
        return Err(StrokeError::Internal(
            "child process output was not piped".to_string(),
        ));
    };

    let mut stderr_reader = BufReader::new(stderr).lines();
    let mut stdout_reader = BufReader::new(stdout).lines();

    let mut all_output = Vec::new();
    let mut stderr_done = false;
    let mut stdout_done = false;

    while !stderr_done || !stdout_done {
        tokio::select! {
            line = stderr_reader.next_line(), if !stderr_done => {
                match line {
                    Ok(Some(line)) => {
                        on_output(&line);
                        all_output.push(line);
                    }
                    _ => stderr_done = true,
                }
            }
            line = stdout_reader.next_line(), if !stdout_done => {
                match line {
                    Ok(Some(line)) => {
                        on_output(&line);
                        all_output.push(line);
                    }
                    _ => stdout_done = true,
                }
            }
        }
    }

    Ok(all_output)
}
