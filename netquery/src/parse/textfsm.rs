//! TextFSM parsing with textfsm-rust.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::{debug, trace};
use serde_json::{Map, Value};
use textfsm_rust::Template;
use tokio::sync::OnceCell;

use super::OutputParser;
use super::index::{INDEX_FILE, TemplateIndex};
use crate::error::{ParseError, Result};

/// Parses command output with TextFSM templates.
///
/// Templates are registered per command, or looked up in a directory laid
/// out like ntc-templates. When the directory has an `index` file, commands
/// are resolved through it (`show mac address-table` maps to
/// `cisco_ios_show_mac-address-table.textfsm`); otherwise the file name is
/// built from the command, as in `cisco_ios_show_ip_interface_brief.textfsm`.
///
/// Each record becomes a JSON object of strings keyed by the lower-cased
/// value name. Records from index rows naming several templates are
/// concatenated.
#[derive(Debug, Clone)]
pub struct TextFsmParser {
    platform: String,
    templates: HashMap<String, String>,
    directory: Option<PathBuf>,
    index: OnceCell<Option<TemplateIndex>>,
}

impl TextFsmParser {
    /// An empty parser for `platform` (the template file prefix).
    pub fn new(platform: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            templates: HashMap::new(),
            directory: None,
            index: OnceCell::new(),
        }
    }

    /// Look up unregistered commands in `dir`.
    pub fn with_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.directory = Some(dir.into());
        self.index = OnceCell::new();
        self
    }

    /// Use `template` for `command`.
    pub fn with_template(mut self, command: &str, template: impl Into<String>) -> Self {
        self.templates.insert(normalize(command), template.into());
        self
    }

    /// File name derived from `command` for directories without an index.
    pub fn template_file_name(&self, command: &str) -> String {
        format!("{}_{}.textfsm", self.platform, normalize(command).replace(' ', "_"))
    }

    /// The directory's index, read once.
    async fn index(&self, dir: &Path) -> Result<Option<&TemplateIndex>> {
        let index = self
            .index
            .get_or_try_init(|| async {
                let path = dir.join(INDEX_FILE);
                match tokio::fs::read_to_string(&path).await {
                    Ok(text) => TemplateIndex::parse(&text).map(|index| {
                        debug!("{}: {} template index rows", path.display(), index.len());
                        Some(index)
                    }),
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
                    Err(e) => Err(ParseError::Io(e)),
                }
            })
            .await?;
        Ok(index.as_ref())
    }

    async fn templates_for(&self, command: &str) -> Result<Vec<String>> {
        let normalized = normalize(command);
        if let Some(template) = self.templates.get(&normalized) {
            return Ok(vec![template.clone()]);
        }

        let missing = || ParseError::TemplateMissing {
            command: command.to_string(),
        };
        let dir = self.directory.as_deref().ok_or_else(missing)?;

        let files = match self.index(dir).await? {
            Some(index) => index
                .lookup(&self.platform, &normalized)
                .map(<[String]>::to_vec)
                .ok_or_else(missing)?,
            None => vec![self.template_file_name(command)],
        };

        let mut templates = Vec::with_capacity(files.len());
        for file in files {
            let path = dir.join(&file);
            trace!("loading template {}", path.display());

            match tokio::fs::read_to_string(&path).await {
                Ok(text) => templates.push(text),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(missing().into()),
                Err(e) => return Err(ParseError::Io(e).into()),
            }
        }
        Ok(templates)
    }
}

#[async_trait]
impl OutputParser for TextFsmParser {
    async fn parse(&self, command: &str, raw: &str) -> Result<Value> {
        let mut records = Vec::new();
        for template in self.templates_for(command).await? {
            records.extend(parse_records(command, &template, raw)?);
        }
        Ok(Value::Array(records))
    }
}

fn parse_records(command: &str, template: &str, raw: &str) -> Result<Vec<Value>> {
    let fail = |message: String| ParseError::TextFsm {
        command: command.to_string(),
        message,
    };

    let template = Template::parse_str(template).map_err(|e| fail(e.to_string()))?;
    let mut parser = template.parser();
    let records = parser
        .parse_text_to_dicts(raw)
        .map_err(|e| fail(e.to_string()))?;

    Ok(records
        .into_iter()
        .map(|record| {
            Value::Object(
                record
                    .into_iter()
                    .map(|(k, v)| (k.to_lowercase(), Value::String(v)))
                    .collect::<Map<String, Value>>(),
            )
        })
        .collect())
}

fn normalize(command: &str) -> String {
    command.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}
