use crate::browser::Browser;
use crate::config::SiteConfig;
use crate::dates::DateRange;
use crate::error::{Result, ScrapeError};
use crate::extract::{DetailExtractor, ListingEntry, ListingScanner};
use crate::records::CourseRecord;

/// What a scrape produced
#[derive(Debug, Default)]
pub struct ScrapeOutcome {
    /// Accepted records, in the order their detail pages were visited
    pub courses: Vec<CourseRecord>,
    /// Detail pages that failed to load
    pub failed: usize,
    /// Detail pages that loaded but had no title
    pub skipped: usize,
    /// Set when the search or listing could not be completed
    pub listing_error: Option<ScrapeError>,
}

/// Drives one search and the detail visits that follow it
pub struct CourseScraper<'a, B: Browser> {
    browser: &'a mut B,
    site: &'a SiteConfig,
    extractor: DetailExtractor,
}

impl<'a, B: Browser> CourseScraper<'a, B> {
    pub fn new(browser: &'a mut B, site: &'a SiteConfig) -> Self {
        Self {
            browser,
            site,
            extractor: DetailExtractor::new(site.scan_order),
        }
    }

    /// Runs the search and collects every course it can.
    ///
    /// A failed detail page is logged and skipped. A failed search or listing
    /// ends the scrape with whatever was collected, recorded in
    /// [`ScrapeOutcome::listing_error`].
    pub async fn scrape(&mut self, range: &DateRange) -> ScrapeOutcome {
        let mut outcome = ScrapeOutcome::default();

        let entries = match self.search_and_list(range).await {
            Ok(entries) => entries,
            Err(e) => {
                ::log::error!("Listing failed: {}", e);
                outcome.listing_error = Some(e);
                return outcome;
            }
        };

        let total = entries.len();
        for (n, entry) in entries.iter().enumerate() {
            ::log::info!("[{}/{}] Visiting {}", n + 1, total, entry.detail_url);
            match self.visit_detail(entry).await {
                Ok(Some(record)) => {
                    ::log::info!("Scraped course: {}", record.title);
                    outcome.courses.push(record);
                }
                Ok(None) => {
                    ::log::warn!("No title found at {}, skipping", entry.detail_url);
                    outcome.skipped += 1;
                }
                Err(e) => {
                    ::log::error!("Failed to scrape {}: {}", entry.detail_url, e);
                    outcome.failed += 1;
                }
            }
        }

        outcome
    }

    /// Fills and submits the search form, then reads the results listing
    pub async fn search_and_list(&mut self, range: &DateRange) -> Result<Vec<ListingEntry>> {
        let scanner = ListingScanner::new(self.site)?;
        let site = self.site;

        ::log::info!("Searching {} for {}", site.form_url, range);
        self.browser.goto(&site.form_url).await?;
        self.browser.settle().await;

        self.browser
            .fill(&site.start_field_id, &range.start.to_string())
            .await?;
        self.browser
            .fill(&site.end_field_id, &range.end.to_string())
            .await?;
        if let Some(checkbox) = &site.open_registration_selector {
            self.browser.check(checkbox).await?;
        }
        self.browser.click(&site.submit_selector).await?;
        self.browser.settle().await;

        let html = self
            .browser
            .source()
            .await
            .map_err(|e| ScrapeError::Listing(e.to_string()))?;
        Ok(scanner.scan(&html))
    }

    /// Loads one detail page and builds its record
    pub async fn visit_detail(&mut self, entry: &ListingEntry) -> Result<Option<CourseRecord>> {
        self.browser.goto(&entry.detail_url).await?;
        self.browser.settle().await;
        let html = self.browser.source().await?;
        Ok(self.extractor.extract(&html, entry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::FormDate;
    use std::collections::{HashMap, HashSet};

    const FORM_URL: &str = "https://courses.example.org/search";

    fn not_found(url: &str) -> ScrapeError {
        ScrapeError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, url.to_string()))
    }

    /// In-memory browser: submitting the form shows the listing page
    #[derive(Default)]
    struct FakeBrowser {
        pages: HashMap<String, String>,
        broken: HashSet<String>,
        current: Option<String>,
        listing: String,
        filled: Vec<(String, String)>,
        checked: Vec<String>,
        visits: Vec<String>,
    }

    impl FakeBrowser {
        fn page(mut self, url: &str, html: &str) -> Self {
            self.pages.insert(url.to_string(), html.to_string());
            self
        }
    }

    impl Browser for FakeBrowser {
        async fn goto(&mut self, url: &str) -> Result<()> {
            self.visits.push(url.to_string());
            if self.broken.contains(url) || !self.pages.contains_key(url) {
                return Err(not_found(url));
            }
            self.current = Some(url.to_string());
            Ok(())
        }

        async fn fill(&mut self, field_id: &str, value: &str) -> Result<()> {
            self.filled.push((field_id.to_string(), value.to_string()));
            Ok(())
        }

        async fn check(&mut self, selector: &str) -> Result<()> {
            self.checked.push(selector.to_string());
            Ok(())
        }

        async fn click(&mut self, _selector: &str) -> Result<()> {
            self.current = Some(self.listing.clone());
            Ok(())
        }

        async fn source(&mut self) -> Result<String> {
            let url = self.current.clone().unwrap_or_default();
            self.pages
                .get(&url)
                .cloned()
                .ok_or_else(|| not_found(&url))
        }
    }

    fn site() -> SiteConfig {
        SiteConfig {
            form_url: FORM_URL.to_string(),
            course_id_pattern: r"id=(\w+)".to_string(),
            detail_url_template: "https://courses.example.org/course?id={id}".to_string(),
            ..SiteConfig::default()
        }
    }

    fn range() -> DateRange {
        DateRange {
            start: FormDate::Verbatim("114/03/01".to_string()),
            end: FormDate::Verbatim("114/03/31".to_string()),
        }
    }

    fn listing_row(id: &str) -> String {
        format!(
            r#"<tr><td>114/03/07</td><td></td><td><a href="/course?id={id}">{id}</a></td><td></td><td>1</td></tr>"#
        )
    }

    fn listing(ids: &[&str]) -> String {
        let rows: String = ids.iter().map(|id| listing_row(id)).collect();
        format!("<html><body><table><tbody>{rows}</tbody></table></body></html>")
    }

    fn detail(title: &str) -> String {
        format!("<html><body><p>課程名稱</p><p>{title}</p><p>積分 | 3</p></body></html>")
    }

    fn browser(ids: &[&str]) -> FakeBrowser {
        let mut browser = FakeBrowser {
            listing: "https://courses.example.org/results".to_string(),
            ..FakeBrowser::default()
        }
        .page(FORM_URL, "<html><body><form></form></body></html>")
        .page("https://courses.example.org/results", &listing(ids));
        for id in ids {
            browser = browser.page(
                &format!("https://courses.example.org/course?id={id}"),
                &detail(&format!("課程 {id} 實務")),
            );
        }
        browser
    }

    #[tokio::test]
    async fn test_form_is_filled_with_range() {
        let site = site();
        let mut browser = browser(&["A1"]);
        CourseScraper::new(&mut browser, &site).scrape(&range()).await;

        assert_eq!(
            browser.filled,
            vec![
                ("g6".to_string(), "114/03/01".to_string()),
                ("g7".to_string(), "114/03/31".to_string()),
            ]
        );
        assert_eq!(browser.checked, vec![r#"input[value="1"]"#.to_string()]);
    }

    #[tokio::test]
    async fn test_duplicate_listing_rows_visit_once() {
        let site = site();
        let mut browser = browser(&["A1", "B2", "A1"]);
        let outcome = CourseScraper::new(&mut browser, &site).scrape(&range()).await;

        let mut titles: Vec<&str> = outcome.courses.iter().map(|c| c.title.as_str()).collect();
        titles.sort();
        assert_eq!(titles, vec!["課程 A1 實務", "課程 B2 實務"]);

        let a1_visits = browser
            .visits
            .iter()
            .filter(|url| url.ends_with("id=A1"))
            .count();
        assert_eq!(a1_visits, 1);
        assert!(outcome.listing_error.is_none());
    }

    #[tokio::test]
    async fn test_failed_detail_page_is_skipped() {
        let site = site();
        let mut browser = browser(&["A1", "B2", "C3"]);
        browser
            .broken
            .insert("https://courses.example.org/course?id=B2".to_string());
        browser.pages.insert(
            "https://courses.example.org/course?id=C3".to_string(),
            "<html><body><p>內容更新中</p></body></html>".to_string(),
        );

        let outcome = CourseScraper::new(&mut browser, &site).scrape(&range()).await;
        assert_eq!(outcome.courses.len(), 1);
        assert_eq!(outcome.courses[0].title, "課程 A1 實務");
        assert_eq!(outcome.courses[0].credits, "3");
        assert_eq!(outcome.failed, 1);
        assert_eq!(outcome.skipped, 1);
    }

    #[tokio::test]
    async fn test_listing_failure_ends_scrape_empty() {
        let site = site();
        let mut browser = browser(&["A1"]);
        browser.pages.remove("https://courses.example.org/results");

        let outcome = CourseScraper::new(&mut browser, &site).scrape(&range()).await;
        assert!(outcome.courses.is_empty());
        assert!(matches!(
            outcome.listing_error,
            Some(ScrapeError::Listing(_))
        ));
        assert!(!browser.visits.iter().any(|url| url.contains("/course?")));
    }

    #[tokio::test]
    async fn test_unreachable_form_is_a_listing_failure() {
        let site = site();
        let mut browser = FakeBrowser::default();

        let outcome = CourseScraper::new(&mut browser, &site).scrape(&range()).await;
        assert!(outcome.courses.is_empty());
        assert!(matches!(
            outcome.listing_error,
            Some(ScrapeError::Io(_))
        ));
    }
}
