//! Structured parsing of CLI output.
//!
//! Turning show-command text into data is delegated to external parsers
//! behind the [`OutputParser`] trait: TextFSM templates, or an external
//! program such as a Genie wrapper. [`ParserSet`] routes a [`ParseMode`] to
//! the parser configured for it.

mod external;
mod index;
mod textfsm;

pub use external::ExternalParser;
pub use index::TemplateIndex;
pub use textfsm::TextFsmParser;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{ParseError, Result};

/// How command output should be returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParseMode {
    /// Unprocessed text.
    #[default]
    Raw,
    /// Genie-style nested structure.
    Genie,
    /// TextFSM records.
    TextFsm,
}

impl ParseMode {
    /// Map a selector string to a mode. Unrecognised selectors (including
    /// `"no_parse"`) mean raw text; this never fails.
    pub fn from_selector(selector: &str) -> Self {
        match selector.trim().to_ascii_lowercase().as_str() {
            "genie" => ParseMode::Genie,
            "textfsm" => ParseMode::TextFsm,
            _ => ParseMode::Raw,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ParseMode::Raw => "no_parse",
            ParseMode::Genie => "genie",
            ParseMode::TextFsm => "textfsm",
        }
    }
}

impl From<&str> for ParseMode {
    fn from(selector: &str) -> Self {
        ParseMode::from_selector(selector)
    }
}

impl fmt::Display for ParseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of a device command.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput {
    Raw(String),
    Structured(Value),
}

impl CommandOutput {
    pub fn as_raw(&self) -> Option<&str> {
        match self {
            CommandOutput::Raw(text) => Some(text),
            CommandOutput::Structured(_) => None,
        }
    }

    pub fn as_structured(&self) -> Option<&Value> {
        match self {
            CommandOutput::Structured(value) => Some(value),
            CommandOutput::Raw(_) => None,
        }
    }

    /// The output as JSON; raw text becomes a JSON string.
    pub fn into_value(self) -> Value {
        match self {
            CommandOutput::Raw(text) => Value::String(text),
            CommandOutput::Structured(value) => value,
        }
    }
}

impl fmt::Display for CommandOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandOutput::Raw(text) => f.write_str(text),
            CommandOutput::Structured(value) => match serde_json::to_string_pretty(value) {
                Ok(pretty) => f.write_str(&pretty),
                Err(_) => write!(f, "{value}"),
            },
        }
    }
}

/// Given the command and its raw text, produce a structured document.
#[async_trait]
pub trait OutputParser: Send + Sync {
    async fn parse(&self, command: &str, raw: &str) -> Result<Value>;
}

/// The parsers available to a device, one per structured mode.
#[derive(Clone, Default)]
pub struct ParserSet {
    genie: Option<Arc<dyn OutputParser>>,
    textfsm: Option<Arc<dyn OutputParser>>,
}

impl ParserSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_genie(mut self, parser: impl OutputParser + 'static) -> Self {
        self.genie = Some(Arc::new(parser));
        self
    }

    pub fn with_textfsm(mut self, parser: impl OutputParser + 'static) -> Self {
        self.textfsm = Some(Arc::new(parser));
        self
    }

    /// Attach a parser to `mode`. Attaching to `Raw` has no effect.
    pub fn set(&mut self, mode: ParseMode, parser: Arc<dyn OutputParser>) {
        match mode {
            ParseMode::Genie => self.genie = Some(parser),
            ParseMode::TextFsm => self.textfsm = Some(parser),
            ParseMode::Raw => {}
        }
    }

    pub fn supports(&self, mode: ParseMode) -> bool {
        match mode {
            ParseMode::Raw => true,
            ParseMode::Genie => self.genie.is_some(),
            ParseMode::TextFsm => self.textfsm.is_some(),
        }
    }

    /// Structure `raw` according to `mode`.
    pub async fn apply(&self, mode: ParseMode, command: &str, raw: String) -> Result<CommandOutput> {
        let parser = match mode {
            ParseMode::Raw => return Ok(CommandOutput::Raw(raw)),
            ParseMode::Genie => self.genie.as_ref(),
            ParseMode::TextFsm => self.textfsm.as_ref(),
        }
        .ok_or(ParseError::NotConfigured {
            mode: mode.as_str(),
        })?;

        let value = parser.parse(command, &raw).await?;
        Ok(CommandOutput::Structured(value))
    }
}

impl fmt::Debug for ParserSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserSet")
            .field("genie", &self.genie.is_some())
            .field("textfsm", &self.textfsm.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Fixed(Value);

    #[async_trait]
    impl OutputParser for Fixed {
        async fn parse(&self, _command: &str, _raw: &str) -> Result<Value> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_selector_mapping() {
        assert_eq!(ParseMode::from("genie"), ParseMode::Genie);
        assert_eq!(ParseMode::from("textfsm"), ParseMode::TextFsm);
        assert_eq!(ParseMode::from("TextFSM"), ParseMode::TextFsm);
        assert_eq!(ParseMode::from("no_parse"), ParseMode::Raw);
        assert_eq!(ParseMode::from("ttp"), ParseMode::Raw);
        assert_eq!(ParseMode::from(""), ParseMode::Raw);
    }

    #[test]
    fn test_raw_passthrough() {
        let out = tokio_test::block_on(ParserSet::new().apply(
            ParseMode::Raw,
            "show clock",
            "10:00".to_string(),
        ))
        .unwrap();
        assert_eq!(out, CommandOutput::Raw("10:00".to_string()));
    }

    #[tokio::test]
    async fn test_routes_to_mode_parser() {
        let parsers = ParserSet::new()
            .with_genie(Fixed(json!({"from": "genie"})))
            .with_textfsm(Fixed(json!([{"from": "textfsm"}])));

        let genie = parsers.apply(ParseMode::Genie, "show version", String::new()).await.unwrap();
        assert_eq!(genie.as_structured(), Some(&json!({"from": "genie"})));

        let textfsm = parsers.apply(ParseMode::TextFsm, "show version", String::new()).await.unwrap();
        assert_eq!(textfsm.into_value(), json!([{"from": "textfsm"}]));
    }

    #[tokio::test]
    async fn test_unconfigured_mode_is_an_error() {
        let err = ParserSet::new()
            .apply(ParseMode::Genie, "show version", String::new())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Parse(ParseError::NotConfigured { mode: "genie" })
        ));
    }
}
