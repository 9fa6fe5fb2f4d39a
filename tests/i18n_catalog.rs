use std::collections::HashMap;

use quick_launcher::i18n::{render_template, Localizer, MessageCatalog};
use tempfile::tempdir;

#[test]
fn loads_messages_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("messages.json");
    std::fs::write(
        &path,
        r#"{
            "tabs_tab_title": {"message": "标签页", "description": "title"},
            "tabs_tab_subtitle": {"message": "搜索已打开的标签页"}
        }"#,
    )
    .unwrap();
    let catalog = MessageCatalog::load(&path, "zh_CN").unwrap();
    assert_eq!(catalog.locale(), "zh_CN");
    assert_eq!(catalog.message("tabs_tab_title").as_deref(), Some("标签页"));
    assert_eq!(catalog.len(), 2);
}

#[test]
fn missing_file_is_empty_catalog() {
    let dir = tempdir().unwrap();
    let catalog = MessageCatalog::load(dir.path().join("none.json"), "en").unwrap();
    assert!(catalog.is_empty());
}

#[test]
fn unreadable_catalog_is_an_error() {
    let dir = tempdir().unwrap();
    assert!(MessageCatalog::load(dir.path(), "en").is_err());
}

#[test]
fn malformed_catalog_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("messages.json");
    std::fs::write(&path, r#"{"k": "not an object"}"#).unwrap();
    assert!(MessageCatalog::load(&path, "en").is_err());
}

#[test]
fn template_fills_known_names() {
    let mut data = HashMap::new();
    data.insert("count", "3".to_string());
    data.insert("plugin", "tabs".to_string());
    assert_eq!(
        render_template("{{plugin}} opened {{count}} pages", &data),
        "tabs opened 3 pages"
    );
}
