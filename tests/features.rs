use std::process::Command;

use assert_cmd::prelude::*;
use assert_fs::{prelude::*, TempDir};
use predicates::prelude::*;

/// `linekit`, with a predictable environment: no color, and the `C` locale
/// unless a test says otherwise.
fn linekit() -> Command {
    let mut cmd = Command::cargo_bin("linekit").unwrap();
    cmd.env_remove("LINEKIT_LOCALE")
        .env_remove("LINEKIT_LOG")
        .env_remove("LC_COLLATE")
        .env_remove("LANG")
        .env("LC_ALL", "C")
        .arg("--color=never");
    cmd
}

fn path_with(temp: &TempDir, name: &str, contents: &str) -> String {
    let f = temp.child(name);
    f.write_str(contents).unwrap();
    f.path().to_str().unwrap().to_string()
}

const FRUIT: &str = "banana\napple\napple\ncherry\n";

#[test]
fn requires_subcommand() {
    linekit().assert().failure();
}

#[test]
fn fail_on_missing_file() {
    let temp = TempDir::new().unwrap();
    let missing = temp.child("x.txt");
    linekit()
        .args(["sort", missing.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
    temp.child("x_sorted.txt").assert(predicate::path::missing());
}

#[test]
fn fail_on_directory() {
    let temp = TempDir::new().unwrap();
    linekit()
        .args(["dedup", temp.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a regular file"));
}

#[test]
fn sort_writes_sorted_copy_and_reports_count() {
    let temp = TempDir::new().unwrap();
    let fruit = path_with(&temp, "fruit.txt", FRUIT);
    linekit()
        .args(["sort", &fruit])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("sorted 4 lines -> "))
        .stdout(predicate::str::contains("fruit_sorted.txt"));
    temp.child("fruit_sorted.txt").assert("apple\napple\nbanana\ncherry\n");
    temp.child("fruit.txt").assert(FRUIT);
}

#[test]
fn sort_descending() {
    let temp = TempDir::new().unwrap();
    let fruit = path_with(&temp, "fruit.txt", FRUIT);
    linekit().args(["sort", "--descending", &fruit]).assert().success();
    temp.child("fruit_sorted.txt").assert("cherry\nbanana\napple\napple\n");
}

#[test]
fn sort_by_code_point_ignoring_padding_in_the_c_locale() {
    let temp = TempDir::new().unwrap();
    let words = path_with(&temp, "words.txt", "b\n  A\nC\na\n");
    linekit().args(["sort", &words]).assert().success();
    temp.child("words_sorted.txt").assert("  A\nC\na\nb\n");
    linekit().env("LC_ALL", "C.UTF-8").args(["sort", &words]).assert().success();
    temp.child("words_sorted.txt").assert("  A\nC\na\nb\n");
}

#[test]
fn sort_ignores_case_without_a_locale() {
    let temp = TempDir::new().unwrap();
    let words = path_with(&temp, "words.txt", "b\n  A\nC\na\n");
    linekit().env_remove("LC_ALL").args(["sort", &words]).assert().success();
    temp.child("words_sorted.txt").assert("  A\na\nb\nC\n");
}

#[test]
fn sort_collates_by_the_requested_locale() {
    let temp = TempDir::new().unwrap();
    let words = path_with(&temp, "words.txt", "ö\nz\no\n");
    linekit().args(["sort", "--locale", "sv_SE.UTF-8", &words]).assert().success();
    temp.child("words_sorted.txt").assert("o\nz\nö\n");
    linekit().args(["sort", "--locale", "de-DE", &words]).assert().success();
    temp.child("words_sorted.txt").assert("o\nö\nz\n");
}

#[test]
fn sort_takes_the_locale_from_the_environment() {
    let temp = TempDir::new().unwrap();
    let words = path_with(&temp, "words.txt", "ö\nz\no\n");
    linekit().env("LC_ALL", "sv_SE.UTF-8").args(["sort", &words]).assert().success();
    temp.child("words_sorted.txt").assert("o\nz\nö\n");
}

#[test]
fn dedup_keeps_first_occurrences() {
    let temp = TempDir::new().unwrap();
    let fruit = path_with(&temp, "fruit.txt", FRUIT);
    linekit()
        .args(["dedup", &fruit])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("dedup 4 lines, 3 unique (1 removed) -> "));
    temp.child("fruit_dedup.txt").assert("banana\napple\ncherry\n");
}

#[test]
fn subtract_removes_filter_lines() {
    let temp = TempDir::new().unwrap();
    let fruit = path_with(&temp, "fruit.txt", FRUIT);
    let filter = path_with(&temp, "filter.txt", "apple\n");
    linekit()
        .args(["subtract", &fruit, &filter])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("subtract 4 lines, removed 2, 2 remaining -> "));
    temp.child("fruit_subtracted.txt").assert("banana\ncherry\n");
}

#[test]
fn empty_input_gives_empty_output() {
    let temp = TempDir::new().unwrap();
    let empty = path_with(&temp, "empty.txt", "");
    linekit().args(["subtract", &empty, &empty]).assert().success();
    temp.child("empty_subtracted.txt").assert("");
}

#[test]
fn gbk_input_becomes_utf8_output() {
    let temp = TempDir::new().unwrap();
    let list = temp.child("list.txt");
    let (gbk, _, _) = encoding_rs::GBK.encode("排序\r\n中文\r\n排序\r\n");
    list.write_binary(&gbk).unwrap();
    linekit().args(["dedup", list.path().to_str().unwrap()]).assert().success();
    temp.child("list_dedup.txt").assert("排序\n中文\n");
}

#[test]
fn no_clobber_keeps_an_existing_output() {
    let temp = TempDir::new().unwrap();
    let fruit = path_with(&temp, "fruit.txt", FRUIT);
    path_with(&temp, "fruit_dedup.txt", "precious\n");
    linekit()
        .args(["dedup", "--no-clobber", &fruit])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
    temp.child("fruit_dedup.txt").assert("precious\n");
}

#[test]
fn quiet_prints_nothing_on_success() {
    let temp = TempDir::new().unwrap();
    let fruit = path_with(&temp, "fruit.txt", FRUIT);
    linekit().args(["-q", "sort", &fruit]).assert().success().stdout("");
}
