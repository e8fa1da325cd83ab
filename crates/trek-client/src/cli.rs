use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use trek_client::config::{OutputFormat, Overrides};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FormatArg {
    Text,
    Html,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Html => OutputFormat::Html,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "trek-safety",
    version,
    about = "Trekking safety assessment from the risk-prediction service"
)]
pub(crate) struct Args {
    #[command(subcommand)]
    pub(crate) command: Command,
    #[arg(long, global = true)]
    pub(crate) config: Option<PathBuf>,
    #[arg(long, global = true)]
    pub(crate) api_base: Option<String>,
    #[arg(long, value_enum, global = true)]
    pub(crate) format: Option<FormatArg>,
    #[arg(long, global = true, default_value_t = false)]
    pub(crate) no_color: bool,
    #[arg(long, global = true)]
    pub(crate) log_dir: Option<PathBuf>,
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub(crate) verbose: u8,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Assess one location (place name or coordinates).
    Assess { location: Option<String> },
    /// Read one location per line from stdin until end of input.
    Interactive,
    /// Check that the prediction service answers.
    Health,
}

impl Args {
    pub(crate) fn overrides(&self) -> Overrides {
        Overrides {
            api_base: self.api_base.clone(),
            format: self.format.map(OutputFormat::from),
            no_color: self.no_color,
        }
    }
}
