//! ntc-templates `index` file.
//!
//! The index is a CSV-like table mapping a platform and a command pattern
//! to one or more template files:
//!
//! ```text
//! Template, Hostname, Platform, Command
//!
//! cisco_ios_show_mac-address-table.textfsm, .*, cisco_ios, sh[[ow]] mac[[-address-table]]
//! ```
//!
//! `[[abc]]` marks an optional completion, so `sh[[ow]]` accepts `sh`,
//! `sho` and `show`. Patterns are matched from the start of the command and
//! the first matching row wins.

use regex::Regex;

use crate::error::ParseError;

/// File name of the index inside a template directory.
pub const INDEX_FILE: &str = "index";

#[derive(Debug, Clone)]
struct Row {
    templates: Vec<String>,
    platform: Regex,
    command: Regex,
}

/// A parsed template index.
#[derive(Debug, Clone, Default)]
pub struct TemplateIndex {
    rows: Vec<Row>,
}

impl TemplateIndex {
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(n, line)| (n + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

        let Some((header_line, header)) = lines.next() else {
            return Ok(Self::default());
        };
        let columns: Vec<&str> = header.split(',').map(str::trim).collect();
        let column = |name: &str| {
            columns
                .iter()
                .position(|c| c.eq_ignore_ascii_case(name))
                .ok_or_else(|| ParseError::Index {
                    line: header_line,
                    message: format!("no '{name}' column"),
                })
        };
        let (template_col, platform_col, command_col) =
            (column("Template")?, column("Platform")?, column("Command")?);

        let mut rows = Vec::new();
        for (line, text) in lines {
            let fields: Vec<&str> = text.splitn(columns.len(), ',').map(str::trim).collect();
            if fields.len() != columns.len() {
                return Err(ParseError::Index {
                    line,
                    message: format!("expected {} fields, found {}", columns.len(), fields.len()),
                });
            }

            let compile = |pattern: String| {
                Regex::new(&format!("^(?:{pattern})")).map_err(|e| ParseError::Index {
                    line,
                    message: e.to_string(),
                })
            };

            rows.push(Row {
                templates: fields[template_col]
                    .split(':')
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty())
                    .collect(),
                platform: compile(fields[platform_col].to_string())?,
                command: compile(expand_completions(fields[command_col]))?,
            });
        }

        Ok(Self { rows })
    }

    /// Template files for `command` on `platform`, if any row matches.
    pub fn lookup(&self, platform: &str, command: &str) -> Option<&[String]> {
        self.rows
            .iter()
            .find(|row| row.platform.is_match(platform) && row.command.is_match(command))
            .map(|row| row.templates.as_slice())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Rewrite `[[abc]]` as `(a(b(c)?)?)?`.
fn expand_completions(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut rest = pattern;

    while let Some(start) = rest.find("[[") {
        let Some(len) = rest[start + 2..].find("]]") else {
            break;
        };
        out.push_str(&rest[..start]);

        let word = &rest[start + 2..start + 2 + len];
        for c in word.chars() {
            out.push('(');
            out.push(c);
        }
        for _ in word.chars() {
            out.push_str(")?");
        }

        rest = &rest[start + 2 + len + 2..];
    }

    out.push_str(rest);
    out
}
