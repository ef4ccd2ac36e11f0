use clap::{Parser, ValueEnum};
use site_audit::SuiteKind;
use site_audit::fixtures;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "site-audit")]
#[command(about = "Accessibility and SEO audit suites for the ECB Texas marketing site")]
#[command(version)]
pub struct Args {
    /// Origin of the deployed site to audit
    #[arg(default_value = fixtures::DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Suite to run
    #[arg(short, long, value_enum, default_value_t = SuiteArg::All)]
    pub suite: SuiteArg,

    /// WebDriver URL (also settable via the WEBDRIVER_URL environment variable)
    #[arg(short, long)]
    pub webdriver_url: Option<String>,

    /// Path to a JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Wall-clock budget per case, in seconds
    #[arg(long, default_value_t = 30)]
    pub case_timeout: u64,

    /// Wholesale re-executions allowed after a failed case
    #[arg(long, default_value_t = 2)]
    pub retries: u32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SuiteArg {
    All,
    Accessibility,
    Seo,
}

/// Convert from CLI suite selection to internal suite kinds
pub fn convert_suites(arg: SuiteArg) -> Vec<SuiteKind> {
    match arg {
        SuiteArg::All => vec![SuiteKind::Accessibility, SuiteKind::Seo],
        SuiteArg::Accessibility => vec![SuiteKind::Accessibility],
        SuiteArg::Seo => vec![SuiteKind::Seo],
    }
}
