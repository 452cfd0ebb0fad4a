mod common;

use followers_export::domain::model::EXPORT_HEADER;
use followers_export::{ExportConfig, ExportEngine, ExportError, LocalStorage, ReplayPipeline};
use serde_json::json;
use std::path::Path;
use tempfile::TempDir;

fn write_page(dir: &Path, index: usize, body: &serde_json::Value) {
    std::fs::write(
        dir.join(format!("followers_page_{}.json", index)),
        serde_json::to_string_pretty(body).unwrap(),
    )
    .unwrap();
}

fn config(dir: &TempDir) -> ExportConfig {
    ExportConfig {
        pages_dir: dir.path().to_path_buf(),
        output_path: dir.path().join("out").join("followers.csv"),
        ..ExportConfig::default()
    }
}

async fn run_replay(config: ExportConfig) -> followers_export::Result<String> {
    let storage = LocalStorage::new(config.pages_dir.clone());
    let pipeline = ReplayPipeline::new(storage, config)?;
    ExportEngine::new(pipeline).run().await
}

#[tokio::test]
async fn test_replay_tolerates_gaps_and_keeps_index_order() {
    let dir = TempDir::new().unwrap();
    write_page(dir.path(), 5, &common::followers_page(250, 7));
    write_page(dir.path(), 0, &common::followers_page(0, 50));
    write_page(dir.path(), 2, &common::followers_page(100, 50));
    std::fs::write(dir.path().join("followers_page_notes.txt"), "ignored").unwrap();

    let output = run_replay(config(&dir)).await.unwrap();

    let (header, rows) = common::read_csv(Path::new(&output));
    assert_eq!(header, EXPORT_HEADER);
    assert_eq!(rows.len(), 107);
    assert_eq!(rows[0][0], "First0");
    assert_eq!(rows[50][0], "First100");
    assert_eq!(rows[106][0], "First256");
}

#[tokio::test]
async fn test_replay_resolves_profiles_from_earlier_pages() {
    let dir = TempDir::new().unwrap();
    write_page(dir.path(), 0, &common::followers_page(0, 1));
    write_page(
        dir.path(),
        1,
        &json!({
            "data": {
                "organizationDashFollowersByOrganizationalPage": {
                    "elements": [
                        {"followerV2": {"*profile": "urn:li:fsd_profile:0"}, "followedAt": {"text": "1d"}}
                    ]
                }
            }
        }),
    );

    let output = run_replay(config(&dir)).await.unwrap();

    let (_, rows) = common::read_csv(Path::new(&output));
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1][0], "First0");
    assert_eq!(rows[1][4], "https://www.linkedin.com/in/member-0/");
    assert_eq!(rows[1][5], "1d");
}

#[tokio::test]
async fn test_replay_without_saved_pages_tells_operator_to_fetch() {
    let dir = TempDir::new().unwrap();

    let err = run_replay(config(&dir)).await.unwrap_err();

    assert!(matches!(err, ExportError::NoSavedPages { .. }));
    assert!(err.to_string().contains("followers_page_*.json"));
    assert!(err.recovery_suggestion().contains("fetch"));
    assert!(!dir.path().join("out").join("followers.csv").exists());
}

#[tokio::test]
async fn test_replay_honours_custom_pattern() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("batch-3.json"),
        common::followers_page(150, 2).to_string(),
    )
    .unwrap();
    write_page(dir.path(), 0, &common::followers_page(0, 5));

    let mut config = config(&dir);
    config.page_pattern = "batch-*.json".to_string();
    let output = run_replay(config).await.unwrap();

    let (_, rows) = common::read_csv(Path::new(&output));
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][3], "member-150");
}

#[tokio::test]
async fn test_replay_overwrites_previous_export() {
    let dir = TempDir::new().unwrap();
    let cfg = config(&dir);
    std::fs::create_dir_all(cfg.output_path.parent().unwrap()).unwrap();
    std::fs::write(&cfg.output_path, "stale,content\n1,2\n3,4\n5,6\n").unwrap();
    write_page(dir.path(), 0, &common::followers_page(0, 1));

    run_replay(cfg.clone()).await.unwrap();

    let content = std::fs::read_to_string(&cfg.output_path).unwrap();
    assert!(!content.contains("stale"));
    assert_eq!(content.lines().count(), 2);
}
