use clap::Args;
use is_terminal::IsTerminal;

use crate::output::OutputFormat;

/// Shared clap argument for commands that accept an output format.
#[derive(Args, Clone, Debug, Default, PartialEq, Eq)]
pub struct FormatArg {
    /// Output format (`--format` / `-f`)
    #[arg(short = 'f', long = "format", value_enum, env = "INDEXPUSH_OUTPUT_FORMAT")]
    pub format: Option<OutputFormat>,
}

impl FormatArg {
    /// Returns the effective output format. When no format is given, piped
    /// output defaults to JSON for machine readability.
    #[must_use]
    pub fn resolve(&self) -> OutputFormat {
        if let Some(format) = self.format {
            return format;
        }

        if std::io::stdout().is_terminal() {
            OutputFormat::Text
        } else {
            OutputFormat::Json
        }
    }
}
