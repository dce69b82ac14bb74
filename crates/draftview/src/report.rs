//! Batch report.

use std::fmt;

use draftview_drafting::SectionKind;
use draftview_ir::{ElementId, ViewId};
use serde::{Serialize, Serializer};

use crate::error::DraftError;
use crate::naming::kind_label;

/// One generated view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    /// Element category.
    pub category: String,
    /// Element type name.
    pub type_name: String,
    /// Element id.
    pub element: ElementId,
    /// Number of the sheet the view was placed on.
    pub sheet: Option<String>,
    /// Created view.
    pub view: ViewId,
    /// Final view name.
    pub view_name: String,
}

/// An element no view was generated for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedElement {
    /// Element id.
    pub element: ElementId,
    /// Why it was skipped.
    #[serde(serialize_with = "serialize_display")]
    pub reason: DraftError,
}

/// Outcome of a batch run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    /// Kind of views generated.
    pub kind: SectionKind,
    /// Generated views, in processing order.
    pub rows: Vec<ReportRow>,
    /// Elements that were skipped.
    pub skipped: Vec<SkippedElement>,
    /// Set when the run was cancelled before every element was processed.
    pub cancelled: bool,
}

fn serialize_display<T: fmt::Display, S: Serializer>(value: &T, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(value)
}

impl BatchReport {
    /// Empty report.
    pub fn new(kind: SectionKind) -> Self {
        Self {
            kind,
            rows: Vec::new(),
            skipped: Vec::new(),
            cancelled: false,
        }
    }

    /// Table title.
    pub fn title(&self) -> String {
        format!("New {}s", kind_label(self.kind))
    }

    /// Column headers.
    pub fn columns(&self) -> [&'static str; 5] {
        ["Category", "TypeName", "Element", "Sheet", kind_label(self.kind)]
    }

    fn cells(row: &ReportRow) -> [String; 5] {
        [
            row.category.clone(),
            row.type_name.clone(),
            row.element.to_string(),
            row.sheet.clone().unwrap_or_else(|| "-".to_string()),
            row.view_name.clone(),
        ]
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = self.columns();
        let cells: Vec<[String; 5]> = self.rows.iter().map(Self::cells).collect();
        let mut widths = columns.map(str::len);
        for row in &cells {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        writeln!(f, "{}", self.title())?;
        let header: Vec<String> = columns
            .iter()
            .zip(widths)
            .map(|(c, w)| format!("{c:<w$}"))
            .collect();
        writeln!(f, "{}", header.join(" | ").trim_end())?;
        let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
        writeln!(f, "{}", rule.join("-+-"))?;
        for row in &cells {
            let line: Vec<String> = row
                .iter()
                .zip(widths)
                .map(|(c, w)| format!("{c:<w$}"))
                .collect();
            writeln!(f, "{}", line.join(" | ").trim_end())?;
        }

        if !self.skipped.is_empty() {
            writeln!(f)?;
            writeln!(f, "Skipped {} element(s):", self.skipped.len())?;
            for skipped in &self.skipped {
                writeln!(f, "  {}: {}", skipped.element, skipped.reason)?;
            }
        }
        if self.cancelled {
            writeln!(f)?;
            writeln!(f, "Cancelled; remaining elements were not processed.")?;
        }
        Ok(())
    }
}
