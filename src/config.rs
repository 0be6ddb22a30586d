use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Date range settings, usually read from `date_settings.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSettings {
    /// First course date, `YYYY-MM-DD` or Minguo `YYY/MM/DD`
    #[serde(default)]
    pub start_date: Option<String>,

    /// Last course date, same formats as `start_date`
    #[serde(default)]
    pub end_date: Option<String>,
}

impl DateSettings {
    /// Load settings from a file.
    ///
    /// A missing, unreadable or malformed file yields empty settings, which
    /// means "use the default range".
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match read_json::<Self>(path) {
            Ok(settings) => settings,
            Err(crate::ScrapeError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                ::log::info!("No date settings at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                ::log::warn!(
                    "Ignoring date settings at {}: {}; using defaults",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }
}

/// Which of several label lines for the same field is kept
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanOrder {
    /// Every matching label line overwrites the previous value
    #[default]
    LastMatch,
    /// The first matching label line sticks
    FirstMatch,
}

/// Site-specific identifiers, selectors and defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Search form page
    #[serde(default = "default_form_url")]
    pub form_url: String,

    /// Element id of the "course date from" input
    #[serde(default = "default_start_field_id")]
    pub start_field_id: String,

    /// Element id of the "course date to" input
    #[serde(default = "default_end_field_id")]
    pub end_field_id: String,

    /// Checkbox restricting results to open registrations, if the form has one
    #[serde(default = "default_open_registration_selector")]
    pub open_registration_selector: Option<String>,

    /// Button that submits the search form
    #[serde(default = "default_submit_selector")]
    pub submit_selector: String,

    /// Rows of the results listing
    #[serde(default = "default_listing_row_selector")]
    pub listing_row_selector: String,

    /// Element inside a listing row that carries the course id
    #[serde(default = "default_course_link_selector")]
    pub course_link_selector: String,

    /// Attributes of that element searched for the course id, in order
    #[serde(default = "default_course_id_attributes")]
    pub course_id_attributes: Vec<String>,

    /// Regex whose first capture group is the course id
    #[serde(default = "default_course_id_pattern")]
    pub course_id_pattern: String,

    /// Detail page address; `{id}` is replaced by the course id
    #[serde(default = "default_detail_url_template")]
    pub detail_url_template: String,

    /// Listing cell holding the course period
    #[serde(default = "default_period_column")]
    pub period_column: Option<usize>,

    /// Listing cell holding the credits
    #[serde(default = "default_credits_column")]
    pub credits_column: Option<usize>,

    /// Length of the default date range
    #[serde(default = "default_span_days")]
    pub default_span_days: u32,

    #[serde(default)]
    pub scan_order: ScanOrder,

    /// Pause after each navigation or submit, in milliseconds
    #[serde(default = "default_settle_millis")]
    pub settle_millis: u64,

    #[serde(default = "default_page_load_timeout_secs")]
    pub page_load_timeout_secs: u64,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    #[serde(default = "default_headless")]
    pub headless: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            form_url: default_form_url(),
            start_field_id: default_start_field_id(),
            end_field_id: default_end_field_id(),
            open_registration_selector: default_open_registration_selector(),
            submit_selector: default_submit_selector(),
            listing_row_selector: default_listing_row_selector(),
            course_link_selector: default_course_link_selector(),
            course_id_attributes: default_course_id_attributes(),
            course_id_pattern: default_course_id_pattern(),
            detail_url_template: default_detail_url_template(),
            period_column: default_period_column(),
            credits_column: default_credits_column(),
            default_span_days: default_span_days(),
            scan_order: ScanOrder::default(),
            settle_millis: default_settle_millis(),
            page_load_timeout_secs: default_page_load_timeout_secs(),
            webdriver_url: default_webdriver_url(),
            headless: default_headless(),
        }
    }
}

impl SiteConfig {
    /// The variant of the site that searches a 90 day window by default
    pub fn alternate() -> Self {
        Self {
            default_span_days: 90,
            ..Self::default()
        }
    }

    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        read_json(path.as_ref())
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let mut file = File::open(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;

    Ok(serde_json::from_str(&contents)?)
}

fn default_form_url() -> String {
    "https://www.tshp.org.tw/ehc-tshp/s/w/edu/teachMst/teachMstB2".to_string()
}

fn default_start_field_id() -> String {
    "g6".to_string()
}

fn default_end_field_id() -> String {
    "g7".to_string()
}

fn default_open_registration_selector() -> Option<String> {
    Some(r#"input[value="1"]"#.to_string())
}

fn default_submit_selector() -> String {
    r#"button[type="submit"]"#.to_string()
}

fn default_listing_row_selector() -> String {
    "table tbody tr".to_string()
}

fn default_course_link_selector() -> String {
    "a".to_string()
}

fn default_course_id_attributes() -> Vec<String> {
    vec!["href".to_string(), "onclick".to_string()]
}

/// The whole link target is the id by default, so the detail page is the
/// linked page itself
fn default_course_id_pattern() -> String {
    r"^\s*(\S+?)\s*$".to_string()
}

fn default_detail_url_template() -> String {
    "{id}".to_string()
}

fn default_period_column() -> Option<usize> {
    Some(0)
}

fn default_credits_column() -> Option<usize> {
    Some(4)
}

fn default_span_days() -> u32 {
    30
}

fn default_settle_millis() -> u64 {
    2000
}

fn default_page_load_timeout_secs() -> u64 {
    45
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_headless() -> bool {
    true
}
