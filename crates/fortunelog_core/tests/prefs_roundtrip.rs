use fortunelog_core::Preferences;

#[test]
fn missing_file_loads_as_first_run_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let prefs = Preferences::load(&dir.path().join("prefs.json")).unwrap();
    assert_eq!(prefs, Preferences::default());
    assert!(prefs.needs_name_prompt());
}

#[test]
fn confirm_name_trims_and_marks_prompt_shown() {
    let mut prefs = Preferences::default();
    prefs.confirm_name("  Ana  ");
    assert_eq!(prefs.display_name.as_deref(), Some("Ana"));
    assert!(!prefs.needs_name_prompt());
}

#[test]
fn confirm_blank_name_only_marks_prompt_shown() {
    let mut prefs = Preferences::default();
    prefs.confirm_name("   ");
    assert_eq!(prefs.display_name, None);
    assert!(!prefs.needs_name_prompt());
}

#[test]
fn skip_prompt_keeps_name_unset() {
    let mut prefs = Preferences::default();
    prefs.skip_prompt();
    assert_eq!(prefs.display_name, None);
    assert!(!prefs.needs_name_prompt());
}

#[test]
fn store_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");

    let mut prefs = Preferences::default();
    prefs.confirm_name("Ana");
    prefs.store(&path).unwrap();

    let loaded = Preferences::load(&path).unwrap();
    assert_eq!(loaded, prefs);
}

#[test]
fn malformed_file_is_rejected_not_defaulted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");
    std::fs::write(&path, "{broken").unwrap();

    let err = Preferences::load(&path).unwrap_err();
    assert!(err.to_string().contains("malformed"));
}
