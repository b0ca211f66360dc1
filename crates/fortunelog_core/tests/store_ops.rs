use chrono::{DateTime, Utc};
use fortunelog_core::{Entry, LogStore, SortKey, SyncStatus};

fn instant(raw: &str) -> DateTime<Utc> {
    raw.parse().unwrap()
}

fn entry(id: &str, text: &str, date: &str) -> Entry {
    Entry {
        id: id.to_string(),
        text: text.to_string(),
        date: instant(date),
        author: None,
    }
}

#[test]
fn new_store_is_empty_and_loading() {
    let store = LogStore::new();
    assert!(store.is_empty());
    assert_eq!(store.status(), SyncStatus::Loading);
}

#[test]
fn add_normalizes_text_and_assigns_id() {
    let mut store = LogStore::new();
    let now = instant("2024-06-15T12:00:00Z");

    let added = store.add("hi there", None, now).unwrap();
    assert_eq!(added.text, "HI THERE.");
    assert_eq!(added.id, now.timestamp_millis().to_string());
    assert_eq!(store.entries(), std::slice::from_ref(&added));
}

#[test]
fn add_ignores_blank_input_silently() {
    let mut store = LogStore::new();
    assert!(store.add("   ", None, Utc::now()).is_none());
    assert!(store.is_empty());
}

#[test]
fn delete_missing_id_is_a_noop() {
    let mut store = LogStore::new();
    store.replace_all(vec![entry("1", "A.", "2024-01-01T00:00:00Z")]);

    assert!(!store.delete("missing-id"));
    assert_eq!(store.len(), 1);
}

#[test]
fn delete_removes_matching_entry() {
    let mut store = LogStore::new();
    store.replace_all(vec![
        entry("1", "A.", "2024-01-01T00:00:00Z"),
        entry("2", "B.", "2024-01-02T00:00:00Z"),
    ]);

    assert!(store.delete("1"));
    assert_eq!(store.len(), 1);
    assert_eq!(store.entries()[0].id, "2");
}

#[test]
fn import_drops_ids_already_in_collection() {
    let mut store = LogStore::new();
    store.replace_all(vec![entry("1", "EXISTING.", "2024-01-01T00:00:00Z")]);

    let imported = store.import_batch(
        vec![
            entry("1", "clone of existing", "2024-02-01T00:00:00Z"),
            entry("2", "fresh", "2024-02-02T00:00:00Z"),
        ],
        None,
    );

    assert_eq!(imported, 1);
    assert_eq!(store.len(), 2);
    // Existing content is untouched, not partially merged.
    assert_eq!(store.entries()[0].text, "EXISTING.");
    assert_eq!(store.entries()[1].text, "FRESH.");
}

#[test]
fn import_drops_duplicates_within_the_batch() {
    let mut store = LogStore::new();
    let imported = store.import_batch(
        vec![
            entry("7", "first", "2024-01-01T00:00:00Z"),
            entry("7", "second with same id", "2024-01-02T00:00:00Z"),
        ],
        None,
    );

    assert_eq!(imported, 1);
    assert_eq!(store.len(), 1);
    assert_eq!(store.entries()[0].text, "FIRST.");
}

#[test]
fn import_fills_missing_author_with_default() {
    let mut store = LogStore::new();
    let mut with_author = entry("1", "kept", "2024-01-01T00:00:00Z");
    with_author.author = Some("Original".to_string());

    store.import_batch(
        vec![with_author, entry("2", "filled", "2024-01-02T00:00:00Z")],
        Some("Ana"),
    );

    assert_eq!(store.entries()[0].author.as_deref(), Some("Original"));
    assert_eq!(store.entries()[1].author.as_deref(), Some("Ana"));
}

#[test]
fn replace_all_overwrites_local_only_entries() {
    let mut store = LogStore::new();
    store.replace_all(vec![entry("2", "LOCAL ONLY.", "2024-01-02T00:00:00Z")]);

    let snapshot = vec![entry("1", "A.", "2024-01-01T00:00:00Z")];
    store.replace_all(snapshot.clone());

    assert_eq!(store.entries(), snapshot.as_slice());
}

#[test]
fn stats_on_empty_collection_are_zero() {
    let store = LogStore::new();
    let stats = store.stats(Utc::now());
    assert_eq!(stats.total, 0);
    assert_eq!(stats.this_month, 0);
    assert_eq!(stats.this_year, 0);
}

#[test]
fn stats_count_calendar_month_and_year() {
    let mut store = LogStore::new();
    store.replace_all(vec![
        entry("1", "THIS MONTH.", "2024-06-03T00:00:00Z"),
        entry("2", "SAME YEAR.", "2024-02-10T00:00:00Z"),
        entry("3", "LAST YEAR.", "2023-06-20T00:00:00Z"),
        entry("4", "ALSO THIS MONTH.", "2024-06-29T23:59:59Z"),
    ]);

    let stats = store.stats(instant("2024-06-15T12:00:00Z"));
    assert_eq!(stats.total, 4);
    assert_eq!(stats.this_month, 2);
    assert_eq!(stats.this_year, 3);
}

#[test]
fn filter_is_case_insensitive_substring_on_text() {
    let mut store = LogStore::new();
    store.replace_all(vec![
        entry("1", "GOOD LUCK.", "2024-01-01T00:00:00Z"),
        entry("2", "BAD OMEN.", "2024-01-02T00:00:00Z"),
    ]);

    let hits = store.filtered_sorted("luck", SortKey::Newest);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "1");

    assert_eq!(store.filtered_sorted("", SortKey::Newest).len(), 2);
}

#[test]
fn sort_newest_is_non_increasing_by_date() {
    let mut store = LogStore::new();
    store.replace_all(vec![
        entry("1", "OLD.", "2024-01-01T00:00:00Z"),
        entry("2", "NEW.", "2024-03-01T00:00:00Z"),
        entry("3", "MID.", "2024-02-01T00:00:00Z"),
    ]);

    let sorted = store.filtered_sorted("", SortKey::Newest);
    let dates: Vec<_> = sorted.iter().map(|e| e.date).collect();
    assert!(dates.windows(2).all(|pair| pair[0] >= pair[1]));
    assert_eq!(sorted[0].id, "2");
}

#[test]
fn sort_oldest_is_non_decreasing_by_date() {
    let mut store = LogStore::new();
    store.replace_all(vec![
        entry("1", "MID.", "2024-02-01T00:00:00Z"),
        entry("2", "OLD.", "2024-01-01T00:00:00Z"),
        entry("3", "NEW.", "2024-03-01T00:00:00Z"),
    ]);

    let sorted = store.filtered_sorted("", SortKey::Oldest);
    let dates: Vec<_> = sorted.iter().map(|e| e.date).collect();
    assert!(dates.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[test]
fn sort_alphabetical_is_lexicographic_on_text() {
    let mut store = LogStore::new();
    store.replace_all(vec![
        entry("1", "CARROT.", "2024-01-01T00:00:00Z"),
        entry("2", "APPLE.", "2024-01-02T00:00:00Z"),
        entry("3", "BANANA.", "2024-01-03T00:00:00Z"),
    ]);

    let sorted = store.filtered_sorted("", SortKey::Alphabetical);
    let texts: Vec<_> = sorted.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, ["APPLE.", "BANANA.", "CARROT."]);
}

#[test]
fn sort_ties_keep_insertion_order() {
    let mut store = LogStore::new();
    store.replace_all(vec![
        entry("first", "SAME DATE.", "2024-01-01T00:00:00Z"),
        entry("second", "SAME DATE TOO.", "2024-01-01T00:00:00Z"),
        entry("third", "SAME DATE AGAIN.", "2024-01-01T00:00:00Z"),
    ]);

    let sorted = store.filtered_sorted("", SortKey::Newest);
    let ids: Vec<_> = sorted.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, ["first", "second", "third"]);
}

#[test]
fn duplicate_counts_group_by_lowercased_trimmed_text() {
    let mut store = LogStore::new();
    store.replace_all(vec![
        entry("1", "GOOD LUCK.", "2024-01-01T00:00:00Z"),
        entry("2", "good luck. ", "2024-01-02T00:00:00Z"),
        entry("3", "SOMETHING ELSE.", "2024-01-03T00:00:00Z"),
    ]);

    let counts = store.duplicate_counts();
    assert_eq!(counts.get("good luck."), Some(&2));
    assert_eq!(counts.get("something else."), Some(&1));
}
