use clap::{Parser, ValueEnum};
use mzscout::core::chem::adducts::IonMode;
use mzscout::core::chem::blocks::Metal;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    name = "mzscout",
    version,
    about = "mzscout - Search for cluster formula matches for a mass-spectrometry m/z peak by enumerating building-block combinations.",
    help_template = HELP_TEMPLATE,
)]
pub struct Cli {
    /// Observed m/z value to search (e.g., 1519.154)
    #[arg(
        value_name = "PEAK_MZ",
        required_unless_present = "peaks_file",
        conflicts_with = "peaks_file",
        allow_negative_numbers = true
    )]
    pub peak_mz: Option<f64>,

    /// PPM tolerance for mass matching
    #[arg(long, default_value_t = 10.0, value_name = "FLOAT")]
    pub ppm: f64,

    /// Search strictness: 1=strict, 2=moderate (default), 3=loose
    #[arg(
        short,
        long,
        default_value_t = 2,
        value_parser = clap::value_parser!(u8).range(1..=3),
        value_name = "LEVEL"
    )]
    pub coarseness: u8,

    /// Run all coarseness levels, merging and deduplicating their hits
    #[arg(long, conflicts_with = "coarseness")]
    pub scan_all: bool,

    /// Ion mode of the spectrum
    #[arg(long, value_enum, default_value_t = ModeArg::Negative)]
    pub mode: ModeArg,

    /// Metal base of the built-in cluster table
    #[arg(long, value_enum, default_value_t = MetalArg::Y)]
    pub metal: MetalArg,

    /// Maximum hits reported per adduct/charge combination
    #[arg(long, default_value_t = 30, value_name = "INT")]
    pub max_hits: usize,

    /// Disable the chemical plausibility filter on reported formulas
    #[arg(long)]
    pub no_filter: bool,

    /// Load a custom building-block table (TOML) instead of the built-in one
    #[arg(long, value_name = "PATH", conflicts_with = "metal")]
    pub table: Option<PathBuf>,

    /// Annotate every peak of a CSV peak list (columns: mz[,intensity])
    #[arg(long, value_name = "PATH")]
    pub peaks_file: Option<PathBuf>,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    Negative,
    Positive,
}

impl From<ModeArg> for IonMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Negative => IonMode::Negative,
            ModeArg::Positive => IonMode::Positive,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetalArg {
    #[value(name = "Y")]
    Y,
    #[value(name = "La")]
    La,
}

impl From<MetalArg> for Metal {
    fn from(metal: MetalArg) -> Self {
        match metal {
            MetalArg::Y => Metal::Y,
            MetalArg::La => Metal::La,
        }
    }
}
