use chrono::NaiveDate;
use store_status::core::StatusRenderer;
use store_status::{
    build_renderers, snapshot, HtmlBadgeRenderer, JsonRenderer, LocalStorage, StatusError,
    StatusSnapshot, StoreHoursConfig,
};
use tempfile::TempDir;

const PAGE: &str = r#"<!DOCTYPE html>
<html lang="vi">
<body>
  <div class="hero-open-badge">
    <i id="store-status-dot" class="fas fa-circle" style="font-size: 8px"></i>
    <span id="store-status-text">Đang tải...</span>
  </div>
  <footer>&copy; <span id="current-year">2020</span> Tạp hoá Toàn Lương</footer>
</body>
</html>
"#;

fn snapshot_at(hour: u32, minute: u32) -> StatusSnapshot {
    let now = NaiveDate::from_ymd_opt(2026, 10, 16)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap();
    snapshot(&StoreHoursConfig::default(), now)
}

fn site_with_page(contents: &str) -> (TempDir, LocalStorage) {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("index.html"), contents).unwrap();
    let storage = LocalStorage::new(dir.path().to_str().unwrap().to_string());
    (dir, storage)
}

#[tokio::test]
async fn test_html_badge_is_updated_in_place() {
    let (dir, storage) = site_with_page(PAGE);
    let renderer = HtmlBadgeRenderer::new(storage, "index.html".to_string());

    renderer.render(&snapshot_at(21, 5)).await.unwrap();

    let html = std::fs::read_to_string(dir.path().join("index.html")).unwrap();
    assert!(html.contains(r#"<span id="store-status-text">Sắp đóng cửa (55 phút)</span>"#));
    assert!(html.contains(r#"style="font-size: 8px; color: #ff9800""#));
    assert!(html.contains(r#"<span id="current-year">2026</span>"#));
    assert!(html.contains("<footer>&copy; "));
}

#[tokio::test]
async fn test_repeated_renders_replace_previous_state() {
    let (dir, storage) = site_with_page(PAGE);
    let renderer = HtmlBadgeRenderer::new(storage, "index.html".to_string());

    renderer.render(&snapshot_at(10, 0)).await.unwrap();
    renderer.render(&snapshot_at(23, 0)).await.unwrap();

    let html = std::fs::read_to_string(dir.path().join("index.html")).unwrap();
    assert!(html.contains("Đã đóng cửa"));
    assert!(!html.contains("Đang mở cửa"));
    assert!(html.contains("color: #f44336"));
    assert!(!html.contains("#4caf50"));
}

#[tokio::test]
async fn test_missing_elements_are_skipped() {
    let bare = "<html><body><p id=\"store-status-text\">?</p></body></html>";
    let (dir, storage) = site_with_page(bare);
    let renderer = HtmlBadgeRenderer::new(storage, "index.html".to_string());

    tokio_test::assert_ok!(renderer.render(&snapshot_at(9, 0)).await);

    let html = std::fs::read_to_string(dir.path().join("index.html")).unwrap();
    assert_eq!(
        html,
        "<html><body><p id=\"store-status-text\">Đang mở cửa</p></body></html>"
    );
}

#[tokio::test]
async fn test_missing_page_is_an_error() {
    let dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(dir.path().to_str().unwrap().to_string());
    let renderer = HtmlBadgeRenderer::new(storage, "index.html".to_string());

    let err = renderer.render(&snapshot_at(9, 0)).await.unwrap_err();
    assert!(matches!(err, StatusError::IoError(_)));
}

#[tokio::test]
async fn test_json_snapshot_written() {
    let dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(dir.path().to_str().unwrap().to_string());
    let renderer = JsonRenderer::new(storage, "status/store-status.json".to_string());

    renderer.render(&snapshot_at(21, 5)).await.unwrap();

    let raw = std::fs::read_to_string(dir.path().join("status/store-status.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["status"]["classification"], "CLOSING_SOON");
    assert_eq!(value["status"]["minutes_until_close"], 55);
    assert_eq!(value["status"]["indicator_color"], "#ff9800");
    assert_eq!(value["copyright_year"], 2026);
    assert_eq!(value["evaluated_at"], "2026-10-16T21:05:00");

    let parsed: StatusSnapshot = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed, snapshot_at(21, 5));
}

#[tokio::test]
async fn test_closed_snapshot_omits_minutes() {
    let dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(dir.path().to_str().unwrap().to_string());
    let renderer = JsonRenderer::new(storage, "store-status.json".to_string());

    renderer.render(&snapshot_at(23, 59)).await.unwrap();

    let raw = std::fs::read_to_string(dir.path().join("store-status.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["status"]["classification"], "CLOSED");
    assert!(value["status"].get("minutes_until_close").is_none());
}

#[tokio::test]
async fn test_renderer_set_runs_all_targets() {
    let (dir, _) = site_with_page(PAGE);
    let output = dir.path().to_str().unwrap();
    let set = build_renderers(output, false, Some("index.html"), Some("store-status.json"));
    assert_eq!(set.names(), vec!["html", "json"]);

    set.render(&snapshot_at(12, 0)).await.unwrap();

    let html = std::fs::read_to_string(dir.path().join("index.html")).unwrap();
    assert!(html.contains("Đang mở cửa"));
    assert!(dir.path().join("store-status.json").exists());
}

#[tokio::test]
async fn test_renderer_set_continues_after_failure() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().to_str().unwrap();
    // index.html does not exist, the JSON target must still be written
    let set = build_renderers(output, false, Some("index.html"), Some("store-status.json"));

    let err = set.render(&snapshot_at(12, 0)).await.unwrap_err();
    assert!(matches!(err, StatusError::IoError(_)));
    assert!(dir.path().join("store-status.json").exists());
}
