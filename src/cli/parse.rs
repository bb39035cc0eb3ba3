use numhist_core::entry::EntryType;
use numhist_core::format::OutputFormat;

/// Parse entry type from string
pub fn parse_entry_type(s: &str) -> std::result::Result<EntryType, String> {
    s.parse::<EntryType>()
        .map_err(|_| format!("type must be one of: {}", EntryType::names()))
}

/// Parse output format from string
pub fn parse_output_format(s: &str) -> std::result::Result<OutputFormat, String> {
    s.parse::<OutputFormat>().map_err(|e| e.to_string())
}
