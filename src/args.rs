use clap::{Parser, ValueEnum};
use course_pages::SiteConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "course-pages")]
#[command(about = "Scrapes course registrations into a JSON file")]
#[command(version)]
pub struct Args {
    /// Date range settings (JSON with optional start_date / end_date)
    #[arg(long, default_value = "date_settings.json")]
    pub settings: PathBuf,

    /// Site configuration file; overrides --variant
    #[arg(long)]
    pub site: Option<PathBuf>,

    /// Built-in site preset
    #[arg(long, value_enum, default_value_t = Variant::Standard)]
    pub variant: Variant,

    /// Output file, replaced on every run
    #[arg(short, long, default_value = "data.json")]
    pub output: PathBuf,

    /// First course date (YYYY-MM-DD or YYY/MM/DD), overrides the settings file
    #[arg(long)]
    pub start_date: Option<String>,

    /// Last course date (YYYY-MM-DD or YYY/MM/DD), overrides the settings file
    #[arg(long)]
    pub end_date: Option<String>,

    /// Days searched when no end date is configured
    #[arg(long)]
    pub span_days: Option<u32>,

    /// WebDriver server URL
    #[arg(long)]
    pub webdriver_url: Option<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Variant {
    /// 30 day default window
    Standard,
    /// 90 day default window
    Alternate,
}

impl Variant {
    pub fn site_config(self) -> SiteConfig {
        match self {
            Variant::Standard => SiteConfig::default(),
            Variant::Alternate => SiteConfig::alternate(),
        }
    }
}
