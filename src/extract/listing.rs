use crate::config::SiteConfig;
use crate::error::Result;
use crate::extract::html::{element_text, selector};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use url::Url;

/// A distinct course found on the results listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    /// Detail page address, unique within a scan
    pub detail_url: String,
    /// Period cell of the listing row, used when the detail page has none
    pub period: Option<String>,
    /// Credits cell of the listing row, used when the detail page has none
    pub credits: Option<String>,
}

/// Finds course ids in a results listing and turns them into detail addresses
#[derive(Debug)]
pub struct ListingScanner {
    rows: Selector,
    link: Selector,
    cells: Selector,
    id_pattern: Regex,
    id_attributes: Vec<String>,
    detail_url_template: String,
    base_url: Option<Url>,
    period_column: Option<usize>,
    credits_column: Option<usize>,
}

impl ListingScanner {
    /// Compiles the selectors and id pattern of a site configuration
    pub fn new(site: &SiteConfig) -> Result<Self> {
        let base_url = match Url::parse(&site.form_url) {
            Ok(url) => Some(url),
            Err(e) => {
                ::log::warn!("Form URL {} is not absolute: {}", site.form_url, e);
                None
            }
        };

        Ok(Self {
            rows: selector(&site.listing_row_selector)?,
            link: selector(&site.course_link_selector)?,
            cells: selector("td")?,
            id_pattern: Regex::new(&site.course_id_pattern)?,
            id_attributes: site.course_id_attributes.clone(),
            detail_url_template: site.detail_url_template.clone(),
            base_url,
            period_column: site.period_column,
            credits_column: site.credits_column,
        })
    }

    /// Scans a listing page.
    ///
    /// Rows referring to the same detail page collapse into one entry (the
    /// first row wins); the order of the returned entries is unspecified.
    pub fn scan(&self, listing_html: &str) -> Vec<ListingEntry> {
        let doc = Html::parse_document(listing_html);
        let mut entries: HashMap<String, ListingEntry> = HashMap::new();
        let mut rows = 0;

        for row in doc.select(&self.rows) {
            rows += 1;
            let Some(id) = self.course_id(row) else {
                ::log::debug!("Listing row {} has no course id, skipping", rows);
                continue;
            };
            let detail_url = self.detail_url(&id);

            entries.entry(detail_url.clone()).or_insert_with(|| {
                let cells: Vec<ElementRef<'_>> = row.select(&self.cells).collect();
                let cell = |index: Option<usize>| {
                    index
                        .and_then(|i| cells.get(i))
                        .map(|c| element_text(*c))
                        .filter(|text| !text.is_empty())
                };
                ListingEntry {
                    detail_url,
                    period: cell(self.period_column),
                    credits: cell(self.credits_column),
                }
            });
        }

        ::log::info!(
            "Listing has {} rows referring to {} distinct courses",
            rows,
            entries.len()
        );
        entries.into_values().collect()
    }

    /// First id captured from the row's link attributes
    fn course_id(&self, row: ElementRef<'_>) -> Option<String> {
        let link = row.select(&self.link).next()?;
        self.id_attributes
            .iter()
            .filter_map(|attr| link.value().attr(attr))
            .find_map(|value| {
                self.id_pattern
                    .captures(value)
                    .and_then(|caps| caps.get(1))
                    .map(|m| m.as_str().to_string())
            })
            .filter(|id| !id.is_empty())
    }

    /// Substitutes the id into the template and resolves it against the form page
    fn detail_url(&self, id: &str) -> String {
        let raw = self.detail_url_template.replace("{id}", id);
        match &self.base_url {
            Some(base) => match base.join(&raw) {
                Ok(url) => url.to_string(),
                Err(e) => {
                    ::log::debug!("Could not resolve {} against {}: {}", raw, base, e);
                    raw
                }
            },
            None => raw,
        }
    }
}
