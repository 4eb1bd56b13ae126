use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn selah(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("selah").unwrap();
    cmd.env("SELAH_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn books_are_grouped_by_category() {
    let home = tempfile::tempdir().unwrap();
    selah(home.path())
        .arg("books")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pentateuch"))
        .stdout(predicate::str::contains("Genesis"))
        .stdout(predicate::str::contains("Gospels"))
        .stdout(predicate::str::contains("1 John"));
}

#[test]
fn chapters_lists_chapter_numbers() {
    let home = tempfile::tempdir().unwrap();
    selah(home.path())
        .args(["chapters", "JHN"])
        .assert()
        .success()
        .stdout(predicate::str::contains("John"))
        .stdout(predicate::str::contains("1  2  3"));
}

#[test]
fn read_prints_the_chapter_and_resumes_later() {
    let home = tempfile::tempdir().unwrap();
    selah(home.path())
        .args(["read", "jhn", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("In the beginning was the Word"))
        .stdout(predicate::str::contains("selah next"));

    // No arguments resumes at the last chapter read.
    selah(home.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("The same was in the beginning with God."));

    assert!(home.path().join("lastRead.json").exists());
}

#[test]
fn next_and_prev_step_through_a_book() {
    let home = tempfile::tempdir().unwrap();
    selah(home.path()).args(["read", "jhn", "2"]).assert().success();

    selah(home.path())
        .arg("next")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nicodemus"));

    selah(home.path())
        .arg("next")
        .assert()
        .success()
        .stdout(predicate::str::contains("Already at the last chapter."));

    selah(home.path())
        .arg("prev")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cana of Galilee"));
}

#[test]
fn stepping_without_a_chapter_fails() {
    let home = tempfile::tempdir().unwrap();
    selah(home.path())
        .arg("next")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn search_lists_matches_in_canonical_order() {
    let home = tempfile::tempdir().unwrap();
    let assert = selah(home.path())
        .args(["search", "BEGINNING"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

    let order: Vec<usize> = ["gn-1-1", "jhn-1-1", "jhn-1-2", "1jn-1-1"]
        .iter()
        .map(|id| stdout.find(id).unwrap_or_else(|| panic!("{} missing", id)))
        .collect();
    assert!(order.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn search_with_no_matches_says_so() {
    let home = tempfile::tempdir().unwrap();
    selah(home.path())
        .args(["search", "zebra"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No verses found."));
}

#[test]
fn configured_search_limit_is_reported() {
    let home = tempfile::tempdir().unwrap();
    std::fs::write(home.path().join("config.json"), r#"{"search_limit": 2}"#).unwrap();
    selah(home.path())
        .args(["search", "beginning"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Showing the first 2 matches."))
        .stdout(predicate::str::contains("1jn-1-1").not());
}

#[test]
fn highlight_toggles_and_persists() {
    let home = tempfile::tempdir().unwrap();
    selah(home.path())
        .args(["highlight", "jhn-3-3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Highlighted jhn-3-3"));

    let saved = std::fs::read_to_string(home.path().join("highlights.json")).unwrap();
    assert!(saved.contains("jhn-3-3"));

    selah(home.path())
        .arg("marks")
        .assert()
        .success()
        .stdout(predicate::str::contains("born again"));

    selah(home.path())
        .args(["highlight", "jhn-3-3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed highlight from jhn-3-3"));
}

#[test]
fn blank_note_removes_the_note() {
    let home = tempfile::tempdir().unwrap();
    selah(home.path())
        .args(["note", "ps-1-3", "like", "a", "tree"])
        .assert()
        .success();
    selah(home.path())
        .args(["read", "ps", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("note: like a tree"));

    selah(home.path())
        .args(["note", "ps-1-3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed note from ps-1-3"));
    selah(home.path())
        .arg("marks")
        .assert()
        .success()
        .stdout(predicate::str::contains("No highlights, bookmarks or notes yet."));
}

#[test]
fn share_prints_reference_quote_and_attribution() {
    let home = tempfile::tempdir().unwrap();
    selah(home.path())
        .args(["share", "gn-1-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Genesis 1:1\n\n\"In the beginning God created the heaven and the earth.\"\n\nShared from Selah",
        ));
}

#[test]
fn font_size_is_clamped() {
    let home = tempfile::tempdir().unwrap();
    for _ in 0..8 {
        selah(home.path()).args(["font", "up"]).assert().success();
    }
    selah(home.path())
        .args(["font", "up"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Font size: 1.5"));
    selah(home.path())
        .args(["font", "reset"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Font size: 1.0"));
}

#[test]
fn invalid_addresses_fail_with_error() {
    let home = tempfile::tempdir().unwrap();
    selah(home.path())
        .args(["read", "jhn", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
    selah(home.path())
        .args(["bookmark", "jhn-1-99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
    selah(home.path())
        .args(["chapters", "xyz"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("xyz"));
}

#[test]
fn corpus_flag_replaces_the_bundled_text() {
    let home = tempfile::tempdir().unwrap();
    let corpus = home.path().join("tiny.json");
    std::fs::write(
        &corpus,
        r#"[{"abbrev":"jd","book":"Jude","chapters":[["Jude, the servant of Jesus Christ."]]}]"#,
    )
    .unwrap();

    selah(home.path())
        .arg("--corpus")
        .arg(&corpus)
        .arg("books")
        .assert()
        .success()
        .stdout(predicate::str::contains("Jude"))
        .stdout(predicate::str::contains("Genesis").not());

    selah(home.path())
        .args(["--corpus", "/no/such/corpus.json", "books"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn config_changes_are_saved_and_used() {
    let home = tempfile::tempdir().unwrap();
    selah(home.path())
        .args(["config", "attribution", "Grace Church"])
        .assert()
        .success()
        .stdout(predicate::str::contains("attribution set to Grace Church"));
    assert!(home.path().join("config.json").exists());

    selah(home.path())
        .args(["config", "attribution"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Grace Church"));
    selah(home.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("search-limit = none"))
        .stdout(predicate::str::contains("corpus = none"));

    selah(home.path())
        .args(["share", "jhn-1-1"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with("\n\nGrace Church\n"));
}

#[test]
fn config_rejects_unknown_keys_and_bad_values() {
    let home = tempfile::tempdir().unwrap();
    selah(home.path())
        .args(["config", "theme", "dark"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key: theme"));
    selah(home.path())
        .args(["config", "search-limit", "many"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
    assert!(!home.path().join("config.json").exists());
}

#[test]
fn config_works_while_the_configured_corpus_is_missing() {
    let home = tempfile::tempdir().unwrap();
    selah(home.path())
        .args(["config", "corpus", "/no/such/corpus.json"])
        .assert()
        .success();
    selah(home.path()).arg("books").assert().failure();

    selah(home.path())
        .args(["config", "corpus", "none"])
        .assert()
        .success();
    selah(home.path())
        .arg("books")
        .assert()
        .success()
        .stdout(predicate::str::contains("Genesis"));
}

#[test]
fn verbose_logs_go_to_stderr_without_colour_codes() {
    let home = tempfile::tempdir().unwrap();
    selah(home.path())
        .args(["-v", "books"])
        .assert()
        .success()
        .stderr(predicate::str::contains("session started"))
        .stderr(predicate::str::contains("\u{1b}[").not())
        .stdout(predicate::str::contains("session started").not());
}
