pub mod detail;
pub mod html;
pub mod listing;

#[cfg(test)]
mod tests;

pub use detail::{DetailExtractor, scan_lines};
pub use listing::{ListingEntry, ListingScanner};

/// Course fields recovered from a detail page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Title,
    Period,
    Credits,
    Registration,
}

impl FieldKind {
    /// Fields in the order a label line is tested against them
    pub const ALL: [FieldKind; 4] = [
        FieldKind::Title,
        FieldKind::Period,
        FieldKind::Credits,
        FieldKind::Registration,
    ];

    /// Label keywords that introduce this field on a detail page
    pub fn labels(&self) -> &'static [&'static str] {
        match self {
            FieldKind::Title => &["標題", "課程名稱", "主題"],
            FieldKind::Period => &["課程日期", "日期"],
            FieldKind::Credits => &["積分", "學分"],
            FieldKind::Registration => &["報名資訊"],
        }
    }

    /// The first field whose label appears in `line`, if any
    pub fn for_label_line(line: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.labels().iter().any(|label| line.contains(label)))
    }

    /// Whether a line following a bare label looks like a value for this field
    pub fn is_plausible(&self, value: &str) -> bool {
        match self {
            FieldKind::Title | FieldKind::Registration => value.chars().count() > 3,
            FieldKind::Period => value.contains(['/', '~', '-']),
            FieldKind::Credits => value.chars().any(is_digit),
        }
    }
}

/// ASCII or full-width digit
fn is_digit(c: char) -> bool {
    c.is_ascii_digit() || ('０'..='９').contains(&c)
}

/// Field values recovered so far for one detail page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailFields {
    pub title: Option<String>,
    pub period: Option<String>,
    pub credits: Option<String>,
    pub registration: Option<String>,
}

impl DetailFields {
    pub fn get(&self, kind: FieldKind) -> Option<&str> {
        self.slot(kind).as_deref()
    }

    fn slot(&self, kind: FieldKind) -> &Option<String> {
        match kind {
            FieldKind::Title => &self.title,
            FieldKind::Period => &self.period,
            FieldKind::Credits => &self.credits,
            FieldKind::Registration => &self.registration,
        }
    }

    fn slot_mut(&mut self, kind: FieldKind) -> &mut Option<String> {
        match kind {
            FieldKind::Title => &mut self.title,
            FieldKind::Period => &mut self.period,
            FieldKind::Credits => &mut self.credits,
            FieldKind::Registration => &mut self.registration,
        }
    }

    /// Stores a value; empty values are ignored
    pub fn set(&mut self, kind: FieldKind, value: &str) {
        let value = value.trim();
        if !value.is_empty() {
            *self.slot_mut(kind) = Some(value.to_string());
        }
    }
}
