/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! The fetch, resolve, validate and update loop.
//!
//! Each remote localization is handled independently: a missing file, a bad
//! file or a failed request affects only that locale unless
//! [`PipelineOptions::fail_fast`] is set.

use std::collections::BTreeSet;
use std::fmt::Display;
use std::io::{self, Write};
use std::sync::Mutex;

use asc_api::{AppInfoLocalization, AppInfoLocalizationUpdate, MetadataApi};
use colored::Colorize;
use tracing::{debug, info, warn};

use crate::error::{LocaleError, PipelineError};
use crate::files::LocaleDirectory;
use crate::locale::fallback_locale;
use crate::report::{LocaleOutcome, LocaleReport, RunReport};
use crate::validation;

#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineOptions {
    /// Resolve, load and validate, but submit nothing.
    pub dry_run: bool,
    /// Abort the run on the first read, parse or remote failure.
    pub fail_fast: bool,
}

pub struct Pipeline<'a, A: MetadataApi + ?Sized> {
    api: &'a A,
    files: LocaleDirectory,
    options: PipelineOptions,
    /// Progress lines; stdout unless replaced.
    out: Mutex<Box<dyn Write + Send>>,
}

impl<'a, A: MetadataApi + ?Sized> Pipeline<'a, A> {
    pub fn new(api: &'a A, files: LocaleDirectory) -> Self {
        Self {
            api,
            files,
            options: PipelineOptions::default(),
            out: Mutex::new(Box::new(io::stdout())),
        }
    }

    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_output(mut self, out: impl Write + Send + 'static) -> Self {
        self.out = Mutex::new(Box::new(out));
        self
    }

    fn say(&self, line: impl Display) {
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        // Progress output is best effort.
        let _ = writeln!(out, "{}", line);
    }

    pub async fn run(&self, bundle_id: &str) -> Result<RunReport, PipelineError> {
        let app = self
            .api
            .find_app(bundle_id)
            .await
            .map_err(|source| PipelineError::FindApp {
                bundle_id: bundle_id.to_string(),
                source,
            })?;

        // The first app info is the one the platform lists first; later ones
        // are older or pending versions.
        let app_info_id = app
            .app_info_ids()
            .first()
            .map(|id| id.to_string())
            .ok_or_else(|| PipelineError::NoAppInfo(bundle_id.to_string()))?;

        let localizations = self
            .api
            .list_app_info_localizations(&app_info_id)
            .await
            .map_err(|source| PipelineError::ListLocalizations {
                app_info_id: app_info_id.clone(),
                source,
            })?;
        info!(
            app_id = %app.id,
            app_info_id = %app_info_id,
            count = localizations.len(),
            "processing localizations"
        );

        let mut report = RunReport {
            app_id: app.id.clone(),
            app_info_id,
            ..Default::default()
        };
        let mut used = BTreeSet::new();

        for localization in &localizations {
            let remote_locale = localization.locale().unwrap_or("?").to_string();

            let outcome = match self.process(localization, &mut used).await {
                Ok(outcome) => outcome,
                Err(e) if e.is_skip() => {
                    self.print_skip(&e);
                    LocaleOutcome::Skipped(e)
                }
                Err(e) if self.options.fail_fast => {
                    return Err(PipelineError::Aborted {
                        locale: remote_locale,
                        source: e,
                    });
                }
                Err(e) => {
                    eprintln!("{} {}: {}", "✗".red(), remote_locale, e);
                    LocaleOutcome::Failed(e)
                }
            };

            report.locales.push(LocaleReport {
                remote_locale,
                localization_id: localization.id.clone(),
                outcome,
            });
        }

        report.unused_files = match self.files.locales() {
            Ok(all) => all.into_iter().filter(|l| !used.contains(l)).collect(),
            Err(e) => {
                warn!(root = ?self.files.root, error = %e, "could not list localization files");
                Vec::new()
            }
        };

        Ok(report)
    }

    async fn process(
        &self,
        localization: &AppInfoLocalization,
        used: &mut BTreeSet<String>,
    ) -> Result<LocaleOutcome, LocaleError> {
        let remote_locale =
            localization
                .locale()
                .ok_or_else(|| LocaleError::MissingRemoteLocale {
                    id: localization.id.clone(),
                })?;
        self.say(format!("🌐 Updating {}", remote_locale));

        let resolved =
            self.files
                .resolve(remote_locale)
                .ok_or_else(|| LocaleError::MissingLocalFile {
                    locale: remote_locale.to_string(),
                    fallback: fallback_locale(remote_locale).to_string(),
                })?;
        used.insert(resolved.locale.clone());
        debug!(remote_locale, file = ?resolved.path, fallback = resolved.is_fallback, "resolved file");
        if resolved.is_fallback {
            self.say(format!("  using {}.json", resolved.locale));
        }

        let file = self.files.load(&resolved)?;
        validation::validate(&file)?;

        let attributes = AppInfoLocalizationUpdate::from(file);
        if attributes.is_empty() {
            warn!(remote_locale, file = ?resolved.path, "localization file sets no attributes");
        }

        if self.options.dry_run {
            self.say(format!(
                "  [DRY RUN] Would update localization {}",
                localization.id
            ));
            return Ok(LocaleOutcome::WouldUpdate {
                file_locale: resolved.locale,
            });
        }

        self.api
            .update_app_info_localization(&localization.id, &attributes)
            .await?;

        Ok(LocaleOutcome::Updated {
            file_locale: resolved.locale,
        })
    }

    fn print_skip(&self, error: &LocaleError) {
        match error {
            LocaleError::MissingLocalFile { locale, fallback } => {
                self.say(
                    format!(
                        "No localization file found for '{}.json' or '{}.json'. Continuing",
                        locale, fallback
                    )
                    .yellow(),
                );
            }
            LocaleError::Validation(invalid) => {
                for violation in &invalid.violations {
                    self.say(violation.to_string().yellow());
                }
                self.say("Some attributes are invalid. Continuing...".yellow());
            }
            other => warn!("{}", other),
        }
    }
}
