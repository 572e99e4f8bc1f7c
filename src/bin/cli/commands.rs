//! Command implementations for the CLI tool.

use std::path::Path;

use csvf::{
    ConvertOptions, Error, codec, convert_with_options, load_file, write_output, write_outputs,
};

use crate::OutputFormat;
use crate::exit_codes::{ExitCode, error_to_exit_code};
use crate::output::create_formatter;

/// Configuration for the convert command.
pub struct ConvertConfig<'a> {
    pub input: &'a Path,
    pub output: &'a Path,
    pub uncompressed: Option<&'a Path>,
    pub max_compare_bytes: usize,
    pub format: OutputFormat,
    pub quiet: bool,
}

fn fail(error: &Error) -> ExitCode {
    eprintln!("Error: {}", error);
    error_to_exit_code(error)
}

/// Convert command implementation
pub fn convert(config: &ConvertConfig<'_>) -> ExitCode {
    let formatter = create_formatter(config.format);
    let options = ConvertOptions::new().max_compare_bytes(config.max_compare_bytes);

    let xsvf = match load_file(config.input) {
        Ok(data) => data,
        Err(e) => return fail(&e),
    };

    let conversion = match convert_with_options(&xsvf, &options) {
        Ok(c) => c,
        Err(e) => return fail(&e),
    };

    let mut outputs = vec![(config.output, conversion.csvf.as_slice())];
    if let Some(path) = config.uncompressed {
        outputs.push((path, conversion.normalized.as_slice()));
    }
    if let Err(e) = write_outputs(&outputs) {
        return fail(&e);
    }

    if !config.quiet {
        println!(
            "{}",
            formatter.format_conversion(config.input, Some(config.output), &conversion)
        );
    }
    ExitCode::Success
}

/// Decompress command implementation
pub fn decompress(input: &Path, output: &Path, format: OutputFormat, quiet: bool) -> ExitCode {
    let formatter = create_formatter(format);

    let packed = match load_file(input) {
        Ok(data) => data,
        Err(e) => return fail(&e),
    };

    let unpacked = match codec::decompress(&packed) {
        Ok(data) => data,
        Err(e) => return fail(&e),
    };

    if let Err(e) = write_output(output, &unpacked) {
        return fail(&e);
    }

    if !quiet {
        println!(
            "{}",
            formatter.format_decompress(input, output, packed.len(), unpacked.len())
        );
    }
    ExitCode::Success
}

/// Info command implementation
pub fn info(input: &Path, max_compare_bytes: usize, format: OutputFormat) -> ExitCode {
    let formatter = create_formatter(format);
    let options = ConvertOptions::new().max_compare_bytes(max_compare_bytes);

    let xsvf = match load_file(input) {
        Ok(data) => data,
        Err(e) => return fail(&e),
    };

    match convert_with_options(&xsvf, &options) {
        Ok(conversion) => {
            println!("{}", formatter.format_conversion(input, None, &conversion));
            ExitCode::Success
        }
        Err(e) => fail(&e),
    }
}
