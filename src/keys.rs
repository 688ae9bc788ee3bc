//! Line-oriented key source: one key per line, in file order.
use crate::error::BloomResult;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Reads every line of `reader` as a key, dropping the trailing `\n` or
/// `\r\n`. Blank lines become empty keys.
pub fn read_keys<R: BufRead>(mut reader: R) -> BloomResult<Vec<Vec<u8>>> {
    let mut keys = Vec::new();
    let mut line = Vec::new();
    while reader.read_until(b'\n', &mut line)? > 0 {
        keys.push(strip_line_ending(&line).to_vec());
        line.clear();
    }
    Ok(keys)
}

pub fn load_keys(path: impl AsRef<Path>) -> BloomResult<Vec<Vec<u8>>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let keys = read_keys(BufReader::new(file))?;
    debug!(path = %path.display(), count = keys.len(), "loaded keys");
    Ok(keys)
}

fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
