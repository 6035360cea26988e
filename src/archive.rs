use std::io::{Read, Seek, SeekFrom};
use tar::{Archive, Entry};
use tracing::debug;

use crate::error::{InspectError, Result};

/// Scan `archive` for the first entry whose path ends with `filename` and
/// return it, positioned at the start of its contents.
///
/// Blob entries are usually prefixed (`./blobs/sha256/...`), hence the suffix
/// match. Errors hit while advancing through entries are returned as-is.
pub fn fetch_archived_file<'a, R: Read>(
    archive: &'a mut Archive<R>,
    filename: &str,
) -> Result<Entry<'a, R>> {
    for entry in archive.entries()? {
        let entry = entry?;
        let matches = entry.path()?.to_string_lossy().ends_with(filename);

        if matches {
            debug!(filename, size = entry.size(), "found archived file");
            return Ok(entry);
        }
    }

    Err(InspectError::NotFound(filename.to_string()))
}

/// Read a whole archived file from the start of a seekable tar stream.
pub fn read_archived_file<R: Read + Seek>(source: &mut R, filename: &str) -> Result<Vec<u8>> {
    rewind(source)?;

    let mut archive = Archive::new(source);
    let mut entry = fetch_archived_file(&mut archive, filename)?;
    let mut buf = Vec::new();
    entry.read_to_end(&mut buf)?;
    Ok(buf)
}

/// Tar readers only move forward; every lookup restarts from offset zero.
pub fn rewind<S: Seek>(source: &mut S) -> Result<()> {
    source.seek(SeekFrom::Start(0))?;
    Ok(())
}
