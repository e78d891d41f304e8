// src/dump/io.rs

use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, info};

use crate::dump::record::{DUMP_KEYS, DumpRecord, OwnedDump};
use crate::errors::{LabError, Result};

impl DumpRecord<'_> {
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json<W: Write>(&self, mut writer: W) -> Result<()> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    /// Write the dump to `path`, creating parent directories as needed.
    pub fn write_to_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = fs::File::create(path)?;
        self.write_json(std::io::BufWriter::new(file))?;

        info!(
            path = %path.display(),
            steps = self.state_history.len(),
            "wrote dump"
        );
        Ok(())
    }
}

/// Top-level keys of a parsed dump.
pub fn top_level_keys(value: &Value) -> BTreeSet<String> {
    value
        .as_object()
        .map(|obj| obj.keys().cloned().collect())
        .unwrap_or_default()
}

/// Check that `value` is an object whose key set is exactly [`DUMP_KEYS`].
pub fn check_dump_keys(value: &Value) -> Result<()> {
    let keys = top_level_keys(value);
    let expected: BTreeSet<String> = DUMP_KEYS.iter().map(|k| k.to_string()).collect();
    if keys != expected {
        return Err(LabError::Serialization(format!(
            "dump keys {keys:?} do not match expected {expected:?}"
        )));
    }
    Ok(())
}

pub fn parse_dump(json: &str) -> Result<OwnedDump> {
    let value: Value = serde_json::from_str(json)?;
    check_dump_keys(&value)?;
    Ok(serde_json::from_value(value)?)
}

pub fn load_dump(path: impl AsRef<Path>) -> Result<OwnedDump> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let dump = parse_dump(&contents)?;
    debug!(
        path = %path.display(),
        steps = dump.state_history.len(),
        "loaded dump"
    );
    Ok(dump)
}
