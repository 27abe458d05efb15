//! Fixed-path access into JSON documents.
//!
//! Parsed CLI output and orchestrator responses are only loosely typed; the
//! accessors in this crate index them by fixed keys and positions. A missing
//! step is reported as a [`ShapeError`] carrying the path walked so far.

use std::fmt::Write as _;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ShapeError;

/// One step of a path: an object key or an array index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<'a> {
    Key(&'a str),
    Index(usize),
}

impl<'a> From<&'a str> for Step<'a> {
    fn from(key: &'a str) -> Self {
        Step::Key(key)
    }
}

impl From<usize> for Step<'_> {
    fn from(index: usize) -> Self {
        Step::Index(index)
    }
}

/// Render a path as `[0].modules[1].data`.
pub fn render(path: &[Step<'_>]) -> String {
    let mut out = String::new();
    for step in path {
        match step {
            Step::Key(key) if out.is_empty() => out.push_str(key),
            Step::Key(key) => {
                out.push('.');
                out.push_str(key);
            }
            Step::Index(i) => {
                let _ = write!(out, "[{i}]");
            }
        }
    }
    out
}

/// Walk `path` from `root`.
pub fn at<'v>(root: &'v Value, path: &[Step<'_>]) -> Result<&'v Value, ShapeError> {
    let mut current = root;
    for (depth, step) in path.iter().enumerate() {
        let next = match step {
            Step::Key(key) => current.get(*key),
            Step::Index(i) => current.get(*i),
        };
        current = next.ok_or_else(|| ShapeError::new(render(&path[..=depth])))?;
    }
    Ok(current)
}

/// Walk `path` and require a string.
pub fn str_at<'v>(root: &'v Value, path: &[Step<'_>]) -> Result<&'v str, ShapeError> {
    at(root, path)?
        .as_str()
        .ok_or_else(|| ShapeError::new(format!("{} (string)", render(path))))
}

/// Walk `path` and require an object.
pub fn object_at<'v>(
    root: &'v Value,
    path: &[Step<'_>],
) -> Result<&'v serde_json::Map<String, Value>, ShapeError> {
    at(root, path)?
        .as_object()
        .ok_or_else(|| ShapeError::new(format!("{} (object)", render(path))))
}

/// Walk `path` and deserialize the value found there.
pub fn typed_at<T: DeserializeOwned>(root: &Value, path: &[Step<'_>]) -> Result<T, ShapeError> {
    <T as serde::Deserialize>::deserialize(at(root, path)?)
        .map_err(|e| ShapeError::new(format!("{} ({e})", render(path))))
}

/// Build a path from keys and indices: `json_path![0, "modules", 1, "data"]`.
#[macro_export]
macro_rules! json_path {
    ($($step:expr),* $(,)?) => {
        [$($crate::shape::Step::from($step)),*]
    };
}
