//! The XSVF to CSVF pipeline.
//!
//! A conversion loads the whole input, normalizes it, then compresses the
//! normalized stream. Nothing is written to disk unless both passes succeed.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::codec::ZeroRunEncoder;
use crate::error::{Error, Result};
use crate::normalize::{NormalizeStats, Normalizer};
use crate::options::ConvertOptions;

/// The result of a successful conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// The compressed CSVF stream.
    pub csvf: Vec<u8>,
    /// The normalized stream before compression.
    pub normalized: Vec<u8>,
    /// Largest single vector, in bytes, the player must be able to buffer.
    pub max_buffer_size: u32,
    /// Size of the XSVF input in bytes.
    pub input_len: usize,
    /// Normalizer counters.
    pub stats: NormalizeStats,
}

impl Conversion {
    /// Returns the CSVF size as a fraction of the XSVF size.
    ///
    /// Returns 1.0 for an empty input.
    pub fn compression_ratio(&self) -> f64 {
        if self.input_len == 0 {
            1.0
        } else {
            self.csvf.len() as f64 / self.input_len as f64
        }
    }

    /// Returns the fraction of the input size saved (`1 - ratio`).
    pub fn space_savings(&self) -> f64 {
        1.0 - self.compression_ratio()
    }
}

/// Converts an XSVF stream held in memory, using default options.
pub fn convert(xsvf: &[u8]) -> Result<Conversion> {
    convert_with_options(xsvf, &ConvertOptions::default())
}

/// Converts an XSVF stream held in memory.
pub fn convert_with_options(xsvf: &[u8], options: &ConvertOptions) -> Result<Conversion> {
    let normalized = Normalizer::new(xsvf, options).run()?;

    let mut encoder = ZeroRunEncoder::new(Vec::with_capacity(options.compressed_capacity));
    encoder.encode(&normalized.data)?;
    encoder.flush()?;
    let csvf = encoder.into_inner();

    log::info!(
        "converted {} bytes of XSVF into {} bytes of CSVF ({} normalized), max buffer {} bytes",
        xsvf.len(),
        csvf.len(),
        normalized.data.len(),
        normalized.max_buffer_size
    );

    Ok(Conversion {
        csvf,
        normalized: normalized.data,
        max_buffer_size: normalized.max_buffer_size,
        input_len: xsvf.len(),
        stats: normalized.stats,
    })
}

/// Loads a file into memory.
pub fn load_file(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    fs::read(path).map_err(|source| Error::SourceLoad {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes `data` to `path`, replacing any existing file.
///
/// The data is staged next to `path` and renamed into place, so a failed
/// write never leaves a truncated file behind.
pub fn write_output(path: impl AsRef<Path>, data: &[u8]) -> Result<()> {
    write_outputs(&[(path.as_ref(), data)])
}

/// Writes several files, replacing all of them or none.
///
/// Every file is staged before any is renamed into place. If staging fails,
/// the staged files are removed and the existing outputs stay untouched.
pub fn write_outputs(outputs: &[(&Path, &[u8])]) -> Result<()> {
    let mut staged: Vec<(PathBuf, &Path)> = Vec::with_capacity(outputs.len());

    for &(path, data) in outputs {
        let temp_path = staging_path(path);
        if let Err(source) = fs::write(&temp_path, data) {
            let _ = fs::remove_file(&temp_path);
            discard(&staged);
            return Err(sink_error(path, source));
        }
        staged.push((temp_path, path));
    }

    for (i, (temp_path, path)) in staged.iter().enumerate() {
        if let Err(source) = fs::rename(temp_path, path) {
            discard(&staged[i..]);
            return Err(sink_error(path, source));
        }
    }
    Ok(())
}

/// Returns `path` with `.tmp` appended to its file name.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

fn discard(staged: &[(PathBuf, &Path)]) {
    for (temp_path, _) in staged {
        let _ = fs::remove_file(temp_path);
    }
}

fn sink_error(path: &Path, source: io::Error) -> Error {
    Error::SinkWrite {
        path: Some(path.to_path_buf()),
        source,
    }
}

/// Converts the XSVF file at `input` and writes the CSVF to `output`.
pub fn convert_path(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<Conversion> {
    convert_path_with_options(input, output, &ConvertOptions::default())
}

/// Converts the XSVF file at `input` and writes the CSVF to `output`.
pub fn convert_path_with_options(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &ConvertOptions,
) -> Result<Conversion> {
    let xsvf = load_file(input)?;
    let conversion = convert_with_options(&xsvf, options)?;
    write_output(output, &conversion.csvf)?;
    Ok(conversion)
}
