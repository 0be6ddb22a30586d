use crate::error::Result;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Registration info recorded when a detail page has none
pub const REGISTRATION_UNAVAILABLE: &str = "無法取得";

/// Format of `last_updated` in the output document
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One course as scraped from its detail page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    #[serde(rename = "課程主題")]
    pub title: String,

    /// Course date range, as displayed
    #[serde(rename = "課程期間")]
    pub period: String,

    /// Credit value, as displayed
    #[serde(rename = "積分")]
    pub credits: String,

    #[serde(rename = "報名資訊")]
    pub registration_info: String,

    /// Detail page address, unique within a run
    #[serde(rename = "課程連結")]
    pub detail_url: String,
}

/// The document written at the end of each run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputDocument {
    pub last_updated: String,
    pub total_courses: usize,
    pub courses: Vec<CourseRecord>,
}

impl OutputDocument {
    pub fn new(courses: Vec<CourseRecord>, updated_at: NaiveDateTime) -> Self {
        Self {
            last_updated: updated_at.format(TIMESTAMP_FORMAT).to_string(),
            total_courses: courses.len(),
            courses,
        }
    }

    /// Writes the document, replacing any existing file
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}
