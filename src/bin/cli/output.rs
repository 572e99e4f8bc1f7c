//! Output formatting for CLI operations.

use serde_json::json;
use std::path::Path;

use csvf::Conversion;

/// Trait for output formatting
pub trait OutputFormatter {
    /// Formats the outcome of a conversion; `output` is `None` for dry runs
    fn format_conversion(&self, input: &Path, output: Option<&Path>, conversion: &Conversion)
    -> String;

    /// Formats the outcome of expanding a CSVF file
    fn format_decompress(&self, input: &Path, output: &Path, packed: usize, unpacked: usize)
    -> String;
}

/// Human-readable output formatter
pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn format_conversion(
        &self,
        input: &Path,
        output: Option<&Path>,
        conversion: &Conversion,
    ) -> String {
        let stats = &conversion.stats;
        let mut out = String::new();

        match output {
            Some(path) => out.push_str(&format!(
                "Converted {} -> {}\n",
                input.display(),
                path.display()
            )),
            None => out.push_str(&format!("Conversion of {}:\n", input.display())),
        }
        out.push_str(&"-".repeat(40));
        out.push('\n');
        out.push_str(&format!(
            "  XSVF size:        {}\n",
            humanize_bytes(conversion.input_len as u64)
        ));
        out.push_str(&format!(
            "  Normalized size:  {}\n",
            humanize_bytes(conversion.normalized.len() as u64)
        ));
        out.push_str(&format!(
            "  CSVF size:        {}\n",
            humanize_bytes(conversion.csvf.len() as u64)
        ));
        out.push_str(&format!(
            "  Space savings:    {:.1}%\n",
            conversion.space_savings() * 100.0
        ));
        out.push_str(&format!(
            "  Max buffer:       {} bytes\n",
            conversion.max_buffer_size
        ));
        out.push_str(&format!("  Instructions:     {}\n", stats.instructions));
        if stats.elided_masks > 0 {
            out.push_str(&format!("  Elided masks:     {}\n", stats.elided_masks));
        }
        if stats.downgraded_compares > 0 {
            out.push_str(&format!(
                "  Plain shifts:     {} (compare under zero mask)\n",
                stats.downgraded_compares
            ));
        }
        if stats.fused_groups > 0 {
            out.push_str(&format!("  Fused shifts:     {}\n", stats.fused_groups));
        }

        out
    }

    fn format_decompress(
        &self,
        input: &Path,
        output: &Path,
        packed: usize,
        unpacked: usize,
    ) -> String {
        format!(
            "Expanded {} ({}) -> {} ({})\n",
            input.display(),
            humanize_bytes(packed as u64),
            output.display(),
            humanize_bytes(unpacked as u64)
        )
    }
}

/// JSON output formatter
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_conversion(
        &self,
        input: &Path,
        output: Option<&Path>,
        conversion: &Conversion,
    ) -> String {
        let stats = &conversion.stats;
        let obj = json!({
            "input": input.display().to_string(),
            "output": output.map(|p| p.display().to_string()),
            "xsvf_size": conversion.input_len,
            "normalized_size": conversion.normalized.len(),
            "csvf_size": conversion.csvf.len(),
            "compression_ratio": conversion.compression_ratio(),
            "max_buffer_size": conversion.max_buffer_size,
            "instructions": stats.instructions,
            "length_records": stats.length_records,
            "elided_masks": stats.elided_masks,
            "downgraded_compares": stats.downgraded_compares,
            "fused_groups": stats.fused_groups,
            "dropped": stats.dropped,
        });

        serde_json::to_string_pretty(&obj).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_decompress(
        &self,
        input: &Path,
        output: &Path,
        packed: usize,
        unpacked: usize,
    ) -> String {
        let obj = json!({
            "input": input.display().to_string(),
            "output": output.display().to_string(),
            "csvf_size": packed,
            "normalized_size": unpacked,
        });

        serde_json::to_string_pretty(&obj).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Creates the appropriate formatter based on output format
pub fn create_formatter(format: super::OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        super::OutputFormat::Human => Box::new(HumanFormatter),
        super::OutputFormat::Json => Box::new(JsonFormatter),
    }
}

/// Converts bytes to a human-readable string
pub fn humanize_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
