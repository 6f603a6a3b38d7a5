/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use serde::Serialize;
use tabled::settings::object::Cell;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};

use crate::error::LocaleError;

#[derive(Debug)]
pub enum LocaleOutcome {
    /// Submitted from the file named after `file_locale`.
    Updated { file_locale: String },
    /// Would have been submitted, but the run is a dry run.
    WouldUpdate { file_locale: String },
    Skipped(LocaleError),
    Failed(LocaleError),
}

impl LocaleOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            LocaleOutcome::Updated { .. } => "updated",
            LocaleOutcome::WouldUpdate { .. } => "would update",
            LocaleOutcome::Skipped(_) => "skipped",
            LocaleOutcome::Failed(_) => "failed",
        }
    }

    pub fn file_locale(&self) -> Option<&str> {
        match self {
            LocaleOutcome::Updated { file_locale } | LocaleOutcome::WouldUpdate { file_locale } => {
                Some(file_locale.as_str())
            }
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&LocaleError> {
        match self {
            LocaleOutcome::Skipped(e) | LocaleOutcome::Failed(e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct LocaleReport {
    pub remote_locale: String,
    pub localization_id: String,
    pub outcome: LocaleOutcome,
}

/// Outcome of one run, in remote iteration order.
#[derive(Debug, Default)]
pub struct RunReport {
    pub app_id: String,
    pub app_info_id: String,
    pub locales: Vec<LocaleReport>,
    /// Local files that no remote localization resolved to.
    pub unused_files: Vec<String>,
}

/// Column of the outcome in [`RunReport::summary_table`].
const RESULT_COLUMN: usize = 2;

/// Flattened, serializable view of a [`LocaleReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub locale: String,
    pub file: String,
    pub status: String,
    pub detail: String,
}

impl RunReport {
    pub fn updated_count(&self) -> usize {
        self.count(|o| {
            matches!(
                o,
                LocaleOutcome::Updated { .. } | LocaleOutcome::WouldUpdate { .. }
            )
        })
    }

    pub fn skipped_count(&self) -> usize {
        self.count(|o| matches!(o, LocaleOutcome::Skipped(_)))
    }

    pub fn failed_count(&self) -> usize {
        self.count(|o| matches!(o, LocaleOutcome::Failed(_)))
    }

    pub fn has_failures(&self) -> bool {
        self.failed_count() > 0
    }

    fn count(&self, pred: impl Fn(&LocaleOutcome) -> bool) -> usize {
        self.locales.iter().filter(|l| pred(&l.outcome)).count()
    }

    pub fn rows(&self) -> Vec<SummaryRow> {
        self.locales
            .iter()
            .map(|l| SummaryRow {
                locale: l.remote_locale.clone(),
                file: l
                    .outcome
                    .file_locale()
                    .map(|f| format!("{}.json", f))
                    .unwrap_or_else(|| "-".to_string()),
                status: l.outcome.label().to_string(),
                detail: l.outcome.error().map(|e| e.to_string()).unwrap_or_default(),
            })
            .collect()
    }

    /// One row per locale, with the result cell coloured by outcome.
    pub fn summary_table(&self) -> Table {
        #[derive(Tabled)]
        struct LocaleRow {
            #[tabled(rename = "Locale")]
            locale: String,
            #[tabled(rename = "File")]
            file: String,
            #[tabled(rename = "Result")]
            status: String,
            #[tabled(rename = "Detail")]
            detail: String,
        }

        let mut table = Table::new(self.rows().into_iter().map(|row| LocaleRow {
            locale: row.locale,
            file: row.file,
            status: row.status,
            detail: truncate(&row.detail, 60),
        }));
        table.with(Style::modern());

        for (idx, locale) in self.locales.iter().enumerate() {
            let color = match locale.outcome {
                LocaleOutcome::Updated { .. } | LocaleOutcome::WouldUpdate { .. } => {
                    Color::FG_GREEN
                }
                LocaleOutcome::Skipped(_) => Color::FG_YELLOW,
                LocaleOutcome::Failed(_) => Color::FG_RED,
            };
            // Row 0 is the header.
            table.with(Modify::new(Cell::new(idx + 1, RESULT_COLUMN)).with(color));
        }

        table
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars - 3).collect();
        format!("{}...", head)
    }
}
