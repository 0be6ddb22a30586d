use crate::config::ScanOrder;
use crate::extract::html;
use crate::extract::{DetailFields, FieldKind, ListingEntry};
use crate::records::{CourseRecord, REGISTRATION_UNAVAILABLE};
use scraper::Html;

/// Separator between a label and its value on the same line
const SEPARATOR: char = '|';

/// Recovers course fields from a page's text lines.
///
/// Lines are walked once. A line containing a label keyword either carries
/// its value after the last `|`, or the value is the next line provided it
/// looks plausible for the field. With [`ScanOrder::LastMatch`] a later label
/// line for the same field overwrites an earlier one.
pub fn scan_lines<S: AsRef<str>>(lines: &[S], order: ScanOrder) -> DetailFields {
    let mut fields = DetailFields::default();

    for (i, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        let Some(kind) = FieldKind::for_label_line(line) else {
            continue;
        };
        if order == ScanOrder::FirstMatch && fields.get(kind).is_some() {
            continue;
        }

        if let Some((_, value)) = line.rsplit_once(SEPARATOR) {
            fields.set(kind, value);
        } else if let Some(next) = lines.get(i + 1) {
            let next: &str = next.as_ref();
            if kind.is_plausible(next) {
                fields.set(kind, next);
            }
        }
    }

    fields
}

/// Builds course records from detail pages
#[derive(Debug, Clone, Copy, Default)]
pub struct DetailExtractor {
    pub order: ScanOrder,
}

impl DetailExtractor {
    pub fn new(order: ScanOrder) -> Self {
        Self { order }
    }

    /// Recovers every field available on a detail page.
    ///
    /// The rendered lines are scanned once, table cells included, and the
    /// first heading stands in for a missing title.
    pub fn fields(&self, detail_html: &str) -> DetailFields {
        let doc = Html::parse_document(detail_html);
        let mut fields = scan_lines(&html::text_lines(&doc), self.order);

        if fields.title.is_none() {
            if let Some(heading) = html::first_heading(&doc) {
                ::log::debug!("Using heading as title: {}", heading);
                fields.set(FieldKind::Title, &heading);
            }
        }
        fields
    }

    /// Turns a detail page into a record, or `None` when no title is found
    pub fn extract(&self, detail_html: &str, entry: &ListingEntry) -> Option<CourseRecord> {
        let fields = self.fields(detail_html);
        let title = fields.title?;

        Some(CourseRecord {
            title,
            period: fields
                .period
                .or_else(|| entry.period.clone())
                .unwrap_or_default(),
            credits: fields
                .credits
                .or_else(|| entry.credits.clone())
                .unwrap_or_default(),
            registration_info: fields
                .registration
                .unwrap_or_else(|| REGISTRATION_UNAVAILABLE.to_string()),
            detail_url: entry.detail_url.clone(),
        })
    }
}
