//! File-backed decode and encode.
//!
//! Each call owns its file handle for the duration of one full read or
//! write; failures are reported as `PlainMapError::Io` with the path.
//! Content that is not UTF-8 text is `MalformedInput`, not an I/O failure.

use super::{decode, encode};
use crate::image::PixelBuffer;
use crate::trace::trace_event;
use crate::util::{PlainMapError, PlainMapResult};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Reads and decodes a pixel-map file.
pub fn read_file<P: AsRef<Path>>(path: P) -> PlainMapResult<PixelBuffer> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|err| PlainMapError::io(path, err))?;
    let text = std::str::from_utf8(&bytes).map_err(|err| {
        PlainMapError::malformed(format!("{} is not valid UTF-8: {err}", path.display()))
    })?;
    let buffer = decode(text)?;
    trace_event!("read_file", bytes = text.len());
    Ok(buffer)
}

/// Encodes `buffer` and writes it to `path`, replacing any existing file.
pub fn write_file<P: AsRef<Path>>(path: P, buffer: &PixelBuffer) -> PlainMapResult<()> {
    let path = path.as_ref();
    let text = encode(buffer);
    let file = File::create(path).map_err(|err| PlainMapError::io(path, err))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(text.as_bytes())
        .and_then(|()| writer.flush())
        .map_err(|err| PlainMapError::io(path, err))?;
    trace_event!("write_file", bytes = text.len());
    Ok(())
}
