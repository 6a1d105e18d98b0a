//! CLI integration tests against a file-backed store.

mod common;

use std::path::PathBuf;

use tempfile::TempDir;

use common::{FIXTURE_POSTS, file_store_url, json_lines, run_cli, run_cli_success};

struct Fixture {
    _temp_dir: TempDir,
    home: PathBuf,
    store: String,
}

fn seeded() -> Fixture {
    let temp_dir = TempDir::new().unwrap();
    let home = temp_dir.path().join("home");
    std::fs::create_dir_all(&home).unwrap();
    let store = file_store_url(&temp_dir.path().join("store"));

    let posts_file = temp_dir.path().join("posts.json");
    std::fs::write(&posts_file, FIXTURE_POSTS).unwrap();

    let stdout = run_cli_success(&["seed", posts_file.to_str().unwrap()], &home, &store);
    assert!(stdout.contains("Imported 5 posts"));

    Fixture {
        _temp_dir: temp_dir,
        home,
        store,
    }
}

fn ids(values: &[serde_json::Value]) -> Vec<i64> {
    values.iter().map(|v| v["id"].as_i64().unwrap()).collect()
}

#[test]
fn test_posts_first_page() {
    let fx = seeded();

    let output = run_cli(&["posts", "--limit", "2"], &fx.home, &fx.store);
    assert!(output.status.success());

    let posts = json_lines(&String::from_utf8_lossy(&output.stdout));
    assert_eq!(ids(&posts), vec![5, 4]);
    assert_eq!(posts[0]["title"], "Fifth");
    assert_eq!(posts[1]["author"]["email"], "carmen@example.com");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Next cursor: 4"));
}

#[test]
fn test_posts_follow_cursor_to_end() {
    let fx = seeded();

    let page = run_cli_success(
        &["posts", "--limit", "2", "--cursor", "4"],
        &fx.home,
        &fx.store,
    );
    assert_eq!(ids(&json_lines(&page)), vec![3, 2]);

    let output = run_cli(&["posts", "--limit", "2", "--cursor", "2"], &fx.home, &fx.store);
    assert!(output.status.success());
    assert_eq!(ids(&json_lines(&String::from_utf8_lossy(&output.stdout))), vec![1]);
    assert!(!String::from_utf8_lossy(&output.stderr).contains("Next cursor"));
}

#[test]
fn test_posts_rejects_out_of_range_limit() {
    let fx = seeded();

    for limit in ["0", "101", "-1"] {
        let output = run_cli(&["posts", "--limit", limit], &fx.home, &fx.store);
        assert!(!output.status.success(), "limit {limit} was accepted");
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Invalid limit"), "stderr: {stderr}");
    }
}

#[test]
fn test_posts_rejects_malformed_cursor() {
    let fx = seeded();

    let output = run_cli(&["posts", "--cursor", "abc"], &fx.home, &fx.store);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid cursor"));
}

#[test]
fn test_browse_walks_whole_feed() {
    let fx = seeded();

    let stdout = run_cli_success(&["browse", "--limit", "2", "--json"], &fx.home, &fx.store);
    assert_eq!(ids(&json_lines(&stdout)), vec![5, 4, 3, 2, 1]);
}

#[test]
fn test_browse_stops_at_max_pages() {
    let fx = seeded();

    let output = run_cli(
        &["browse", "--limit", "2", "--max-pages", "2", "--json"],
        &fx.home,
        &fx.store,
    );
    assert!(output.status.success());
    assert_eq!(
        ids(&json_lines(&String::from_utf8_lossy(&output.stdout))),
        vec![5, 4, 3, 2]
    );
    assert!(String::from_utf8_lossy(&output.stderr).contains("More posts available"));
}

#[test]
fn test_comment_then_thread() {
    let fx = seeded();

    for text in ["first!", "second", "third"] {
        let stdout = run_cli_success(&["comment", "3", text], &fx.home, &fx.store);
        assert!(stdout.contains("Added comment"));
    }

    let thread = run_cli_success(&["thread", "3", "--json"], &fx.home, &fx.store);
    let comments = json_lines(&thread);
    assert_eq!(ids(&comments), vec![1, 2, 3]);
    assert_eq!(comments[0]["content"], "first!");
    assert_eq!(comments[0]["postId"], 3);

    let posts = run_cli_success(&["posts", "--limit", "3"], &fx.home, &fx.store);
    let third = json_lines(&posts)
        .into_iter()
        .find(|p| p["id"] == 3)
        .unwrap();
    assert_eq!(third["commentCount"], 3);
}

#[test]
fn test_comments_page_backwards() {
    let fx = seeded();
    for i in 1..=5 {
        run_cli_success(&["comment", "1", &format!("comment {i}")], &fx.home, &fx.store);
    }

    let output = run_cli(&["comments", "1", "--limit", "2"], &fx.home, &fx.store);
    assert!(output.status.success());
    assert_eq!(
        ids(&json_lines(&String::from_utf8_lossy(&output.stdout))),
        vec![4, 5]
    );
    assert!(String::from_utf8_lossy(&output.stderr).contains("Previous cursor: 4"));

    let older = run_cli_success(
        &["comments", "1", "--limit", "2", "--cursor", "4"],
        &fx.home,
        &fx.store,
    );
    assert_eq!(ids(&json_lines(&older)), vec![2, 3]);

    let all = run_cli_success(&["thread", "1", "--limit", "2", "--all", "--json"], &fx.home, &fx.store);
    assert_eq!(ids(&json_lines(&all)), vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_blank_comment_is_rejected() {
    let fx = seeded();

    let output = run_cli(&["comment", "1", "   "], &fx.home, &fx.store);
    assert!(!output.status.success());

    let thread = run_cli_success(&["thread", "1", "--json"], &fx.home, &fx.store);
    assert!(json_lines(&thread).is_empty());
}

#[test]
fn test_comment_on_missing_post_fails() {
    let fx = seeded();

    let output = run_cli(&["comment", "99", "hello"], &fx.home, &fx.store);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to add comment"));
}

#[test]
fn test_seed_requires_local_store() {
    let temp_dir = TempDir::new().unwrap();
    let posts_file = temp_dir.path().join("posts.json");
    std::fs::write(&posts_file, FIXTURE_POSTS).unwrap();

    let output = run_cli(
        &["seed", posts_file.to_str().unwrap()],
        temp_dir.path(),
        "http://127.0.0.1:9",
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("file:// store"));
}

#[test]
fn test_unreachable_server_suggests_retry() {
    let temp_dir = TempDir::new().unwrap();

    let output = run_cli(&["posts"], temp_dir.path(), "http://127.0.0.1:9");
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("try again shortly"), "stderr: {stderr}");
    assert!(stderr.contains("Failed to fetch posts"));
}
