//! CLI argument parsing with clap.

use clap::Parser;

use crate::error::ExportError;

/// Render text as a QR code and save it as a tightly cropped PNG.
#[derive(Parser, Debug)]
#[command(name = "qrcrop", version, about)]
pub struct Cli {
    /// Text or URL to encode.
    #[arg(conflicts_with = "text_file")]
    pub text: Option<String>,

    /// Path to a file containing the text to encode.
    #[arg(short = 't', long, conflicts_with = "text")]
    pub text_file: Option<String>,

    /// QR code size in pixels [default: 256, or the configured size].
    #[arg(short, long, allow_hyphen_values = true)]
    pub size: Option<String>,

    /// Directory to save the PNG into.
    #[arg(short, long)]
    pub out_dir: Option<String>,

    /// Error-correction level: L, M, Q, H.
    #[arg(short, long)]
    pub level: Option<String>,

    /// Foreground colour (#rgb, #rrggbb, #rrggbbaa).
    #[arg(long)]
    pub fg: Option<String>,

    /// Background colour (#rgb, #rrggbb, #rrggbbaa, transparent).
    #[arg(long, conflicts_with = "transparent")]
    pub bg: Option<String>,

    /// Use a transparent background so padding is cropped away.
    #[arg(long)]
    pub transparent: bool,

    /// Surround the code with a four-module quiet zone.
    #[arg(long)]
    pub margin: bool,

    /// Save the full canvas without cropping.
    #[arg(long)]
    pub no_crop: bool,

    /// Print the PNG to stdout as a data URL instead of saving a file.
    #[arg(long)]
    pub data_url: bool,

    /// Print an export report as JSON to stdout.
    #[arg(long, conflicts_with = "data_url")]
    pub json: bool,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Resolve the text from either the positional argument or the file flag.
    ///
    /// One trailing line break is stripped from file contents.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::InvalidArgument`] if neither text nor text-file
    /// is provided, or [`ExportError::Io`] if the file cannot be read.
    pub fn resolve_text(&self) -> Result<String, ExportError> {
        if let Some(ref text) = self.text {
            Ok(text.clone())
        } else if let Some(ref path) = self.text_file {
            let mut text = std::fs::read_to_string(path)?;
            if text.ends_with('\n') {
                text.pop();
                if text.ends_with('\r') {
                    text.pop();
                }
            }
            Ok(text)
        } else {
            Err(ExportError::InvalidArgument(
                "Provide text to encode or use -t/--text-file".into(),
            ))
        }
    }
}
