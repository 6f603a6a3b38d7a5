/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use std::fmt;

use thiserror::Error;

use crate::files::LocalizationFile;

/// Character limits enforced by the platform, per attribute.
pub const NAME_MAX: usize = 30;
pub const SUBTITLE_MAX: usize = 30;
pub const PRIVACY_CHOICES_URL_MAX: usize = 255;
pub const PRIVACY_POLICY_URL_MAX: usize = 255;
pub const PRIVACY_POLICY_TEXT_MAX: usize = 4000;

/// One attribute that is too long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub max: usize,
    pub actual: usize,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "The attribute '{}' must be shorter than {} characters (has {}).",
            self.field, self.max, self.actual
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid attributes: {}", field_list(.violations))]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn fields(&self) -> Vec<&'static str> {
        self.violations.iter().map(|v| v.field).collect()
    }
}

fn field_list(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.field)
        .collect::<Vec<_>>()
        .join(", ")
}

/// True if `value` is absent or strictly shorter than `max` characters.
pub fn is_within_limit(value: Option<&str>, max: usize) -> bool {
    value.map_or(0, |v| v.chars().count()) < max
}

/// Check every attribute of a file and collect all violations.
pub fn validate(file: &LocalizationFile) -> Result<(), ValidationError> {
    let checks = [
        ("name", file.name.as_deref(), NAME_MAX),
        ("subtitle", file.subtitle.as_deref(), SUBTITLE_MAX),
        (
            "privacyChoicesURL",
            file.privacy_choices_url.as_deref(),
            PRIVACY_CHOICES_URL_MAX,
        ),
        (
            "privacyPolicyURL",
            file.privacy_policy_url.as_deref(),
            PRIVACY_POLICY_URL_MAX,
        ),
        (
            "privacyPolicyText",
            file.privacy_policy_text.as_deref(),
            PRIVACY_POLICY_TEXT_MAX,
        ),
    ];

    let violations: Vec<FieldViolation> = checks
        .into_iter()
        .filter(|(_, value, max)| !is_within_limit(*value, *max))
        .map(|(field, value, max)| FieldViolation {
            field,
            max,
            actual: value.map_or(0, |v| v.chars().count()),
        })
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { violations })
    }
}
