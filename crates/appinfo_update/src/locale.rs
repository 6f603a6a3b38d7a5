/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

/// The secondary locale tried when no file matches a remote locale exactly.
///
/// Norwegian (`no`) is stored as Bokmål (`nb`); every other code falls back
/// to its language subtag.
pub fn fallback_locale(locale: &str) -> &str {
    if locale == "no" {
        return "nb";
    }

    locale.split('-').next().unwrap_or(locale)
}
