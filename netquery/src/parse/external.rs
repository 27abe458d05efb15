//! Parsing through an external program.

use std::process::Stdio;

use async_trait::async_trait;
use log::debug;
use serde_json::Value;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::OutputParser;
use crate::error::{ParseError, Result};

/// Runs a program that reads raw output on stdin and prints JSON.
///
/// The command string is passed as the last argument, so a Genie wrapper can
/// be plugged in as `ExternalParser::new("genie-parse").arg("--os").arg("iosxe")`
/// and invoked as `genie-parse --os iosxe "show version"`.
#[derive(Debug, Clone)]
pub struct ExternalParser {
    program: String,
    args: Vec<String>,
}

impl ExternalParser {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    fn failure(&self, message: impl Into<String>) -> ParseError {
        ParseError::External {
            program: self.program.clone(),
            message: message.into(),
        }
    }
}

#[async_trait]
impl OutputParser for ExternalParser {
    async fn parse(&self, command: &str, raw: &str) -> Result<Value> {
        debug!("{} parsing '{}'", self.program, command);

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(command)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| self.failure(e.to_string()))?;

        // Feed stdin while draining stdout/stderr; the program may stream
        let stdin = child.stdin.take();
        let feed = async move {
            match stdin {
                Some(mut stdin) => stdin.write_all(raw.as_bytes()).await,
                None => Ok(()),
            }
        };
        let (written, output) = tokio::join!(feed, child.wait_with_output());

        let output = output.map_err(ParseError::Io)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(self
                .failure(format!("{}: {}", output.status, stderr.trim()))
                .into());
        }

        match written {
            Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                debug!("{} exited before reading all input", self.program);
            }
            other => other.map_err(ParseError::Io)?,
        }

        Ok(serde_json::from_slice(&output.stdout).map_err(ParseError::Json)?)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_reads_json_from_stdout() {
        // Ignores stdin and the command; echoes fixed JSON
        let parser = ExternalParser::new("sh")
            .args(["-c", r#"cat >/dev/null; echo '{"version": {"os": "IOS-XE"}}'"#])
            .arg("--");
        let value = parser.parse("show version", "raw text").await.unwrap();
        assert_eq!(value, json!({"version": {"os": "IOS-XE"}}));
    }

    #[tokio::test]
    async fn test_passes_raw_on_stdin() {
        let parser = ExternalParser::new("sh").args([
            "-c",
            r#"printf '{"raw": "%s", "command": "%s"}' "$(cat)" "$1""#,
            "sh",
        ]);
        let value = parser.parse("show clock", "10:00").await.unwrap();
        assert_eq!(value, json!({"raw": "10:00", "command": "show clock"}));
    }

    #[tokio::test]
    async fn test_nonzero_exit() {
        let parser = ExternalParser::new("sh").args(["-c", "echo boom >&2; exit 3"]);
        let err = parser.parse("show version", "").await.unwrap_err();
        match err {
            crate::Error::Parse(ParseError::External { program, message }) => {
                assert_eq!(program, "sh");
                assert!(message.contains("boom"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_large_output_is_streamed() {
        // Echoes stdin back as one JSON string while still reading it
        let parser = ExternalParser::new("sh").args([
            "-c",
            r#"printf '"'; tr -d '\n"\\'; printf '"'"#,
            "sh",
        ]);
        let raw = "route ".repeat(200 * 1024);

        let value = tokio::time::timeout(
            std::time::Duration::from_secs(30),
            parser.parse("show ip route", &raw),
        )
        .await
        .expect("parser stalled")
        .unwrap();
        assert_eq!(value.as_str().unwrap().len(), raw.len());
    }

    #[tokio::test]
    async fn test_early_exit_reports_stderr() {
        let parser = ExternalParser::new("sh").args(["-c", "echo unsupported >&2; exit 2"]);
        let raw = "x".repeat(1024 * 1024);

        let err = parser.parse("show running-config", &raw).await.unwrap_err();
        match err {
            crate::Error::Parse(ParseError::External { message, .. }) => {
                assert!(message.contains("unsupported"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let parser = ExternalParser::new("sh").args(["-c", "cat"]);
        let err = parser.parse("show version", "not json").await.unwrap_err();
        assert!(matches!(err, crate::Error::Parse(ParseError::Json(_))));
    }
}
