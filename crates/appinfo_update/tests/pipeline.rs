/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

mod common;
use common::*;

use appinfo_update::{
    LocaleDirectory, LocaleError, LocaleOutcome, Pipeline, PipelineError, PipelineOptions,
};

#[tokio::test]
async fn test_fallback_file_is_submitted_and_invalid_file_skipped() {
    let long_name = format!(r#"{{ "name": "{}" }}"#, "a".repeat(31));
    let dir = locale_dir(&[
        ("en.json", r#"{ "name": "Lens", "subtitle": "View and edit images" }"#),
        ("de.json", long_name.as_str()),
    ]);
    let api = FakeApi::new(&[("loc-en", "en-US"), ("loc-de", "de-DE")]);

    let report = Pipeline::new(&api, LocaleDirectory::new(dir.path()))
        .run(BUNDLE_ID)
        .await
        .unwrap();

    let updates = api.updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].0, "loc-en");
    assert_eq!(updates[0].1.name.as_deref(), Some("Lens"));
    assert_eq!(updates[0].1.subtitle.as_deref(), Some("View and edit images"));

    assert!(matches!(
        &report.locales[0].outcome,
        LocaleOutcome::Updated { file_locale } if file_locale == "en"
    ));
    match &report.locales[1].outcome {
        LocaleOutcome::Skipped(LocaleError::Validation(invalid)) => {
            assert_eq!(invalid.fields(), vec!["name"]);
        }
        other => panic!("expected validation skip, got {:?}", other),
    }
    assert!(!report.has_failures());
}

#[tokio::test]
async fn test_missing_file_is_skipped() {
    let dir = locale_dir(&[("en.json", r#"{ "name": "Lens" }"#)]);
    let api = FakeApi::new(&[("loc-es", "es")]);

    let report = Pipeline::new(&api, LocaleDirectory::new(dir.path()))
        .run(BUNDLE_ID)
        .await
        .unwrap();

    assert!(api.updates().is_empty());
    match &report.locales[0].outcome {
        LocaleOutcome::Skipped(LocaleError::MissingLocalFile { locale, fallback }) => {
            assert_eq!(locale, "es");
            assert_eq!(fallback, "es");
        }
        other => panic!("expected missing file skip, got {:?}", other),
    }
    assert_eq!(report.unused_files, vec!["en"]);
}

#[tokio::test]
async fn test_norwegian_uses_nb_file() {
    let dir = locale_dir(&[("nb.json", r#"{ "subtitle": "Se og rediger bilder" }"#)]);
    let api = FakeApi::new(&[("loc-no", "no")]);

    Pipeline::new(&api, LocaleDirectory::new(dir.path()))
        .run(BUNDLE_ID)
        .await
        .unwrap();

    let updates = api.updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].1.subtitle.as_deref(), Some("Se og rediger bilder"));
}

#[tokio::test]
async fn test_malformed_file_does_not_stop_later_locales() {
    let dir = locale_dir(&[
        ("fr.json", "{ \"name\": \"Lens\""),
        ("it.json", r#"{ "name": "Lens" }"#),
    ]);
    let api = FakeApi::new(&[("loc-fr", "fr-FR"), ("loc-it", "it")]);

    let report = Pipeline::new(&api, LocaleDirectory::new(dir.path()))
        .run(BUNDLE_ID)
        .await
        .unwrap();

    assert!(matches!(
        report.locales[0].outcome,
        LocaleOutcome::Failed(LocaleError::Parse { .. })
    ));
    assert_eq!(api.updated_ids(), vec!["loc-it"]);
    assert_eq!(report.failed_count(), 1);
    assert!(report.has_failures());
}

#[tokio::test]
async fn test_remote_failure_is_per_locale() {
    let dir = locale_dir(&[
        ("en.json", r#"{ "name": "Lens" }"#),
        ("de.json", r#"{ "name": "Lens" }"#),
    ]);
    let api = FakeApi::new(&[("loc-en", "en-US"), ("loc-de", "de-DE")]).failing_update("loc-en");

    let report = Pipeline::new(&api, LocaleDirectory::new(dir.path()))
        .run(BUNDLE_ID)
        .await
        .unwrap();

    assert!(matches!(
        report.locales[0].outcome,
        LocaleOutcome::Failed(LocaleError::Remote(_))
    ));
    assert_eq!(api.updated_ids(), vec!["loc-de"]);
}

#[tokio::test]
async fn test_fail_fast_aborts_on_remote_failure() {
    let dir = locale_dir(&[
        ("en.json", r#"{ "name": "Lens" }"#),
        ("de.json", r#"{ "name": "Lens" }"#),
    ]);
    let api = FakeApi::new(&[("loc-en", "en-US"), ("loc-de", "de-DE")]).failing_update("loc-en");

    let result = Pipeline::new(&api, LocaleDirectory::new(dir.path()))
        .with_options(PipelineOptions {
            fail_fast: true,
            ..Default::default()
        })
        .run(BUNDLE_ID)
        .await;

    match result {
        Err(PipelineError::Aborted { locale, .. }) => assert_eq!(locale, "en-US"),
        other => panic!("expected abort, got {:?}", other),
    }
    assert!(api.updated_ids().is_empty());
}

#[tokio::test]
async fn test_fail_fast_still_skips_invalid_files() {
    let long_subtitle = format!(r#"{{ "subtitle": "{}" }}"#, "b".repeat(30));
    let dir = locale_dir(&[
        ("en.json", long_subtitle.as_str()),
        ("de.json", r#"{ "name": "Lens" }"#),
    ]);
    let api = FakeApi::new(&[("loc-en", "en-US"), ("loc-de", "de-DE")]);

    let report = Pipeline::new(&api, LocaleDirectory::new(dir.path()))
        .with_options(PipelineOptions {
            fail_fast: true,
            ..Default::default()
        })
        .run(BUNDLE_ID)
        .await
        .unwrap();

    assert_eq!(report.skipped_count(), 1);
    assert_eq!(api.updated_ids(), vec!["loc-de"]);
}

#[tokio::test]
async fn test_dry_run_submits_nothing() {
    let dir = locale_dir(&[("en.json", r#"{ "name": "Lens" }"#)]);
    let api = FakeApi::new(&[("loc-en", "en-US")]);

    let report = Pipeline::new(&api, LocaleDirectory::new(dir.path()))
        .with_options(PipelineOptions {
            dry_run: true,
            ..Default::default()
        })
        .run(BUNDLE_ID)
        .await
        .unwrap();

    assert!(api.updates().is_empty());
    assert!(matches!(
        report.locales[0].outcome,
        LocaleOutcome::WouldUpdate { .. }
    ));
    assert_eq!(report.updated_count(), 1);
}

#[tokio::test]
async fn test_first_app_info_is_used() {
    let dir = locale_dir(&[]);
    let api = FakeApi::new(&[]);

    let report = Pipeline::new(&api, LocaleDirectory::new(dir.path()))
        .run(BUNDLE_ID)
        .await
        .unwrap();

    assert_eq!(report.app_id, APP_ID);
    assert_eq!(report.app_info_id, APP_INFO_ID);
    assert_eq!(api.listed_app_infos(), vec![APP_INFO_ID]);
}

#[tokio::test]
async fn test_unknown_app_is_fatal() {
    let dir = locale_dir(&[]);
    let api = FakeApi::new(&[]);

    let result = Pipeline::new(&api, LocaleDirectory::new(dir.path()))
        .run("com.example.unknown")
        .await;

    assert!(matches!(result, Err(PipelineError::FindApp { .. })));
}

#[tokio::test]
async fn test_app_without_app_info_is_fatal() {
    let dir = locale_dir(&[]);
    let api = FakeApi::new(&[]).without_app_infos();

    let result = Pipeline::new(&api, LocaleDirectory::new(dir.path()))
        .run(BUNDLE_ID)
        .await;

    assert!(matches!(result, Err(PipelineError::NoAppInfo(_))));
}

#[tokio::test]
async fn test_locale_header_precedes_its_diagnostics() {
    let long_name = format!(r#"{{ "name": "{}" }}"#, "a".repeat(31));
    let dir = locale_dir(&[("de.json", long_name.as_str())]);
    let api = FakeApi::new(&[("loc-es", "es"), ("loc-de", "de-DE")]);
    let output = Output::default();

    Pipeline::new(&api, LocaleDirectory::new(dir.path()))
        .with_output(output.clone())
        .run(BUNDLE_ID)
        .await
        .unwrap();

    let text = output.text();
    let position = |needle: &str| {
        text.find(needle)
            .unwrap_or_else(|| panic!("{:?} not in output:\n{}", needle, text))
    };
    assert!(position("🌐 Updating es") < position("No localization file found for 'es.json'"));
    assert!(position("No localization file found") < position("🌐 Updating de-DE"));
    assert!(position("🌐 Updating de-DE") < position("  using de.json"));
    assert!(position("  using de.json") < position("The attribute 'name' must be shorter"));
    assert!(
        position("The attribute 'name' must be shorter")
            < position("Some attributes are invalid. Continuing...")
    );
}
