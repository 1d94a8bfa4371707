use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Render OCR table recognition responses as HTML, text, or xlsx.
#[derive(Debug, Parser)]
#[command(name = "ocrtable", about, version)]
pub struct Cli {
    /// Log normalization and rendering details to stderr (honours RUST_LOG)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render one table of a response to stdout
    Render {
        /// Path to the JSON response ('-' for stdin)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// OCR vendor that produced the response
        #[arg(long, value_enum, default_value_t = VendorArg::Auto)]
        vendor: VendorArg,

        /// Output format
        #[arg(long, value_enum, default_value_t = RenderFormat::Html)]
        format: RenderFormat,

        /// Table to render, 1-based
        #[arg(long, default_value_t = 1)]
        table: usize,

        /// Drop tab separators at the end of text lines
        #[arg(long)]
        trim_trailing_tabs: bool,

        /// Include header/footer blocks in text output
        #[arg(long)]
        with_blocks: bool,

        /// Unicode normalization applied to recognized text
        #[arg(long, value_enum, default_value_t = UnicodeNormArg::Nfkc)]
        unicode_norm: UnicodeNormArg,

        /// Fail on the first warning instead of printing it
        #[arg(long)]
        strict: bool,
    },

    /// Export one table of a response to an xlsx workbook
    Export {
        /// Path to the JSON response ('-' for stdin)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Path of the workbook to write
        #[arg(long, short, value_name = "OUT")]
        output: PathBuf,

        /// OCR vendor that produced the response
        #[arg(long, value_enum, default_value_t = VendorArg::Auto)]
        vendor: VendorArg,

        /// Table to export, 1-based
        #[arg(long, default_value_t = 1)]
        table: usize,

        /// Worksheet name
        #[arg(long, default_value = "Table")]
        sheet_name: String,

        /// Upper bound for auto-fitted column widths
        #[arg(long, default_value_t = 60.0)]
        max_column_width: f64,

        /// Store plain decimals as numbers instead of text
        #[arg(long)]
        store_numbers: bool,

        /// Unicode normalization applied to recognized text
        #[arg(long, value_enum, default_value_t = UnicodeNormArg::Nfkc)]
        unicode_norm: UnicodeNormArg,

        /// Fail on the first warning instead of printing it
        #[arg(long)]
        strict: bool,
    },

    /// Summarize the tables found in a response
    Inspect {
        /// Path to the JSON response ('-' for stdin)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// OCR vendor that produced the response
        #[arg(long, value_enum, default_value_t = VendorArg::Auto)]
        vendor: VendorArg,

        /// Output format
        #[arg(long, value_enum, default_value_t = InspectFormat::Text)]
        format: InspectFormat,
    },
}

/// OCR vendor for CLI arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VendorArg {
    /// Detect from the response shape
    Auto,
    /// Baidu table recognition
    Baidu,
    /// Tencent Cloud table OCR
    Tencent,
    /// Aliyun table OCR
    Aliyun,
    /// ocrtable's own JSON table form
    Canonical,
}

impl VendorArg {
    /// Convert to the library's `Vendor`, `None` for auto-detection.
    pub fn to_vendor(self) -> Option<ocrtable::Vendor> {
        match self {
            VendorArg::Auto => None,
            VendorArg::Baidu => Some(ocrtable::Vendor::Baidu),
            VendorArg::Tencent => Some(ocrtable::Vendor::Tencent),
            VendorArg::Aliyun => Some(ocrtable::Vendor::Aliyun),
            VendorArg::Canonical => Some(ocrtable::Vendor::Canonical),
        }
    }
}

/// Output format for the render subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RenderFormat {
    /// HTML table with rowspan/colspan
    Html,
    /// Tab-separated text
    Text,
    /// HTML in the clipboard envelope spreadsheets read
    Clipboard,
    /// ocrtable's JSON table form
    Json,
}

/// Output format for the inspect subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InspectFormat {
    /// Plain text output
    Text,
    /// JSON output
    Json,
}

/// Unicode normalization form for CLI arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UnicodeNormArg {
    /// Leave text as recognized
    None,
    /// Canonical Decomposition, followed by Canonical Composition
    Nfc,
    /// Canonical Decomposition
    Nfd,
    /// Compatibility Decomposition, followed by Canonical Composition
    Nfkc,
    /// Compatibility Decomposition
    Nfkd,
}

impl UnicodeNormArg {
    /// Convert to the core library's `UnicodeNorm` enum.
    pub fn to_unicode_norm(self) -> ocrtable::UnicodeNorm {
        match self {
            UnicodeNormArg::None => ocrtable::UnicodeNorm::None,
            UnicodeNormArg::Nfc => ocrtable::UnicodeNorm::Nfc,
            UnicodeNormArg::Nfd => ocrtable::UnicodeNorm::Nfd,
            UnicodeNormArg::Nfkc => ocrtable::UnicodeNorm::Nfkc,
            UnicodeNormArg::Nfkd => ocrtable::UnicodeNorm::Nfkd,
        }
    }
}
