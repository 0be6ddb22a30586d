use clap::Parser;
use course_pages::{Courses, DateSettings, SiteConfig};
use std::error::Error;

mod args;
use args::Args;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command-line arguments
    let args = Args::parse();

    let site = match &args.site {
        Some(path) => SiteConfig::from_file(path)?,
        None => args.variant.site_config(),
    };

    let mut dates = DateSettings::load(&args.settings);
    if args.start_date.is_some() {
        dates.start_date = args.start_date.clone();
    }
    if args.end_date.is_some() {
        dates.end_date = args.end_date.clone();
    }

    let mut courses = Courses::new(site).with_dates(dates).with_output(&args.output);
    if let Some(days) = args.span_days {
        courses = courses.with_span_days(days);
    }
    if let Some(url) = &args.webdriver_url {
        courses = courses.with_webdriver_url(url.as_str());
    }

    println!("Note: scraping requires a WebDriver server (e.g., ChromeDriver).");

    let start_time = std::time::Instant::now();
    let summary = courses.run().await?;

    println!("Searched courses between {}", summary.range);
    if let Some(e) = &summary.listing_error {
        println!("Scraping stopped early: {}", e);
    }
    println!(
        "Saved {} courses to {} ({} failed, {} without title) in {:.2} seconds",
        summary.total_courses,
        summary.output.display(),
        summary.failed,
        summary.skipped,
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}
