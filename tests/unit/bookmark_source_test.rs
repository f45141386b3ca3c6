//! Unit tests for the Chromium `Bookmarks` file source.

use std::fs;
use std::future::Future;

use newtab_tree::services::bookmark_source::{
    chromium_time_to_epoch_ms, parse_chromium_bookmarks, BookmarkSource, ChromiumBookmarksFile,
};
use newtab_tree::types::bookmark::{BookmarkNode, ROOT_ID};
use newtab_tree::types::errors::SourceError;
use rstest::rstest;
use tempfile::TempDir;

const BOOKMARKS_FILE: &str = r#"{
    "checksum": "00000000000000000000000000000000",
    "roots": {
        "bookmark_bar": {
            "id": "1", "name": "Bookmarks bar", "type": "folder",
            "date_added": "13253932700000000",
            "children": [
                {"id": "5", "name": "Rust", "type": "url", "url": "https://rust-lang.org",
                 "date_added": "13253932800000000"},
                {"id": "6", "name": "Docs", "type": "folder", "date_added": "13253932950000000",
                 "children": [
                    {"id": "7", "name": "", "type": "url", "url": "https://docs.rs",
                     "date_added": "13253932900000000"}
                 ]}
            ]
        },
        "other": {"id": "2", "name": "Other bookmarks", "type": "folder", "children": []},
        "synced": {"id": "3", "name": "Mobile bookmarks", "type": "folder", "children": []}
    },
    "version": 1
}"#;

fn block_on<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

fn write_bookmarks(dir: &TempDir, content: &str) -> ChromiumBookmarksFile {
    let path = dir.path().join("Bookmarks");
    fs::write(&path, content).unwrap();
    ChromiumBookmarksFile::new(path)
}

#[rstest]
#[case("13253932800000000", Some(1_609_459_200_000))]
#[case(" 13253932800000000 ", Some(1_609_459_200_000))]
#[case("11644473600000000", Some(0))]
#[case("0", None)]
#[case("", None)]
#[case("-5", None)]
fn test_chromium_time_conversion(#[case] raw: &str, #[case] expected: Option<i64>) {
    assert_eq!(chromium_time_to_epoch_ms(raw), expected);
}

#[test]
fn test_tree_keeps_host_order_and_kinds() {
    let root = parse_chromium_bookmarks(BOOKMARKS_FILE).unwrap();
    assert_eq!(root.id(), ROOT_ID);
    assert_eq!(root.folder_ids(), vec!["0", "1", "6", "2", "3"]);

    let BookmarkNode::Folder(root) = root else {
        panic!("root must be a folder");
    };
    let BookmarkNode::Folder(bar) = &root.children[0] else {
        panic!("bookmark bar must be a folder");
    };
    assert_eq!(bar.title.as_deref(), Some("Bookmarks bar"));
    match &bar.children[0] {
        BookmarkNode::Link(link) => {
            assert_eq!(link.url, "https://rust-lang.org");
            assert_eq!(link.date_added, Some(1_609_459_200_000));
        }
        other => panic!("expected link, got {:?}", other),
    }
}

#[test]
fn test_empty_names_become_untitled() {
    let root = parse_chromium_bookmarks(BOOKMARKS_FILE).unwrap();
    let BookmarkNode::Folder(root) = root else {
        panic!("root must be a folder");
    };
    let BookmarkNode::Folder(bar) = &root.children[0] else {
        panic!("bookmark bar must be a folder");
    };
    let BookmarkNode::Folder(docs) = &bar.children[1] else {
        panic!("docs must be a folder");
    };
    match &docs.children[0] {
        BookmarkNode::Link(link) => assert!(link.title.is_none()),
        other => panic!("expected link, got {:?}", other),
    }
}

#[test]
fn test_missing_roots_are_skipped() {
    let root = parse_chromium_bookmarks(
        r#"{"roots": {"other": {"id": "2", "name": "Other", "type": "folder", "children": []}}}"#,
    )
    .unwrap();
    assert_eq!(root.folder_ids(), vec!["0", "2"]);
}

#[test]
fn test_malformed_content_is_rejected() {
    let err = parse_chromium_bookmarks("{\"roots\": 3}").unwrap_err();
    assert!(matches!(err, SourceError::Malformed(_)));
}

#[test]
fn test_file_source_reads_tree() {
    let dir = TempDir::new().unwrap();
    let source = write_bookmarks(&dir, BOOKMARKS_FILE);

    let root = block_on(source.get_tree()).unwrap();

    assert_eq!(root, parse_chromium_bookmarks(BOOKMARKS_FILE).unwrap());
    assert_eq!(source.path(), dir.path().join("Bookmarks"));
}

#[test]
fn test_most_recent_timestamp_uses_newest_link() {
    let dir = TempDir::new().unwrap();
    let source = write_bookmarks(&dir, BOOKMARKS_FILE);

    // The Docs folder is newer still but folders do not count
    assert_eq!(
        block_on(source.most_recent_timestamp()).unwrap(),
        Some(1_609_459_300_000)
    );
}

#[test]
fn test_collection_without_links_has_no_timestamp() {
    let dir = TempDir::new().unwrap();
    let source = write_bookmarks(
        &dir,
        r#"{"roots": {"bookmark_bar": {"id": "1", "name": "Bar", "type": "folder", "children": []}}}"#,
    );
    assert_eq!(block_on(source.most_recent_timestamp()).unwrap(), None);
}

#[test]
fn test_missing_file_is_unavailable() {
    let dir = TempDir::new().unwrap();
    let source = ChromiumBookmarksFile::new(dir.path().join("absent"));

    let err = block_on(source.get_tree()).unwrap_err();
    assert!(matches!(err, SourceError::Unavailable(_)));
    assert!(err.to_string().contains("absent"));
}
