use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::errors::{parse_context, read_context, with_read_context, write_context};

/// Read a whole JSON document
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let json = with_read_context(fs::read_to_string(path), &path.display().to_string())?;
    serde_json::from_str(&json).with_context(|| {
        format!(
            "{} from {:?}. First 200 chars: {}",
            parse_context("JSON"),
            path,
            preview(&json)
        )
    })
}

/// Read a top-level JSON array without interpreting its elements
pub fn read_json_array(path: &Path) -> Result<Vec<Value>> {
    let document: Value = read_json(path)?;
    match document {
        Value::Array(items) => {
            info!("Loaded {} items from {}", items.len(), path.display());
            Ok(items)
        }
        other => anyhow::bail!(
            "Expected a JSON array in {}, found {}",
            path.display(),
            json_type_name(&other)
        ),
    }
}

/// Read a JSON-lines file, skipping blank and unparseable lines.
///
/// Returns the parsed items and the number of non-blank lines seen.
pub fn read_json_lines<T: DeserializeOwned>(path: &Path) -> Result<(Vec<T>, usize)> {
    let mut items = Vec::new();
    let seen = for_each_json_line(path, |item| items.push(item))?;
    Ok((items, seen))
}

/// Stream a JSON-lines file one line at a time, handing each parsed item to
/// `visit`. Blank lines are skipped, unparseable lines are logged and skipped.
///
/// Returns the number of non-blank lines seen.
pub fn for_each_json_line<T, F>(path: &Path, mut visit: F) -> Result<usize>
where
    T: DeserializeOwned,
    F: FnMut(T),
{
    let file = with_read_context(File::open(path), &path.display().to_string())?;
    let reader = BufReader::new(file);
    let mut seen = 0;

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.with_context(|| read_context(&path.display().to_string()))?;
        if line.trim().is_empty() {
            continue;
        }
        seen += 1;

        match serde_json::from_str(&line) {
            Ok(item) => visit(item),
            Err(e) => debug!("Skipping {}:{}: {}", path.display(), line_no + 1, e),
        }
    }

    Ok(seen)
}

/// Write `data` as pretty-printed JSON, creating parent directories
pub fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    ensure_parent_dir(path)?;

    let file = File::create(path).with_context(|| write_context(&path.display().to_string()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data).context("Failed to serialize data")?;
    writer
        .flush()
        .with_context(|| write_context(&path.display().to_string()))?;

    info!("Saved data to: {}", path.display());
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display())),
        _ => Ok(()),
    }
}

fn preview(json: &str) -> &str {
    let end = json
        .char_indices()
        .nth(200)
        .map(|(idx, _)| idx)
        .unwrap_or(json.len());
    &json[..end]
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
