pub mod browser;
pub mod config;
pub mod dates;
pub mod error;
pub mod extract;
pub mod records;
pub mod scrape;

// Re-export commonly used types for convenience
pub use config::{DateSettings, ScanOrder, SiteConfig};
pub use dates::{CalendarDate, DateRange, FormDate};
pub use error::ScrapeError;
pub use records::{CourseRecord, OutputDocument};
pub use scrape::{CourseScraper, ScrapeOutcome};

use browser::WebDriverSession;
use chrono::Local;
use std::path::{Path, PathBuf};

/// Summary of a finished run
#[derive(Debug)]
pub struct RunSummary {
    pub range: DateRange,
    pub total_courses: usize,
    pub failed: usize,
    pub skipped: usize,
    pub output: PathBuf,
    /// Why scraping stopped early, if it did
    pub listing_error: Option<ScrapeError>,
}

/// Main builder for a course scraping run
pub struct Courses {
    site: SiteConfig,
    dates: DateSettings,
    span_days: Option<u32>,
    output: PathBuf,
}

impl Courses {
    /// Create a new builder for the given site
    pub fn new(site: SiteConfig) -> Self {
        Self {
            site,
            dates: DateSettings::default(),
            span_days: None,
            output: PathBuf::from("data.json"),
        }
    }

    /// Set the configured start and end dates
    pub fn with_dates(mut self, dates: DateSettings) -> Self {
        self.dates = dates;
        self
    }

    /// Override the site's default span for a missing end date
    pub fn with_span_days(mut self, days: u32) -> Self {
        self.span_days = Some(days);
        self
    }

    /// Set where the output document is written
    pub fn with_output(mut self, path: impl AsRef<Path>) -> Self {
        self.output = path.as_ref().to_path_buf();
        self
    }

    /// Set the WebDriver URL
    pub fn with_webdriver_url(mut self, url: impl Into<String>) -> Self {
        self.site.webdriver_url = url.into();
        self
    }

    /// The date range this run will search
    pub fn date_range(&self) -> DateRange {
        DateRange::resolve(
            self.dates.start_date.as_deref(),
            self.dates.end_date.as_deref(),
            self.span_days.unwrap_or(self.site.default_span_days),
        )
    }

    /// Scrapes the site and writes the output document.
    ///
    /// Fails without writing anything only when no browser session can be
    /// opened; otherwise the document is written even if the listing failed.
    pub async fn run(self) -> Result<RunSummary, ScrapeError> {
        let range = self.date_range();

        let mut site = self.site;
        // Override the WebDriver URL with an environment variable if provided
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                site.webdriver_url = webdriver_url;
            }
        }

        let mut session = WebDriverSession::connect(&site).await?;
        let outcome = CourseScraper::new(&mut session, &site).scrape(&range).await;
        session.close().await;

        let document = OutputDocument::new(outcome.courses, Local::now().naive_local());
        document.write_to(&self.output)?;
        ::log::info!(
            "Wrote {} courses to {}",
            document.total_courses,
            self.output.display()
        );

        Ok(RunSummary {
            range,
            total_courses: document.total_courses,
            failed: outcome.failed,
            skipped: outcome.skipped,
            output: self.output,
            listing_error: outcome.listing_error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_override_applies_to_default_end() {
        let today = Local::now().date_naive();
        let courses = Courses::new(SiteConfig::alternate());
        let expected = DateRange::resolve_on(None, None, 90, today);
        assert_eq!(courses.date_range().end, expected.end);

        let courses = Courses::new(SiteConfig::alternate()).with_span_days(7);
        let expected = DateRange::resolve_on(None, None, 7, today);
        assert_eq!(courses.date_range().end, expected.end);
    }

    #[test]
    fn test_configured_dates_are_normalized() {
        let courses = Courses::new(SiteConfig::default()).with_dates(DateSettings {
            start_date: Some("2025-03-07".to_string()),
            end_date: Some("114/04/30".to_string()),
        });
        assert_eq!(courses.date_range().to_string(), "114/03/07 ~ 114/04/30");
    }
}
