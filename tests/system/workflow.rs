//! End-to-end runs: config file on disk, listing service, and the binary itself.

use color_eyre::Result;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;
use tokio::fs;

use filedeck_config::Settings;
use filedeck_core::{IndexError, ListingService};
use filedeck_models::Entry;

async fn create_test_file(path: &Path, size: usize) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, vec![0u8; size]).await?;
    Ok(())
}

async fn setup_storage(root: &Path) -> Result<()> {
    create_test_file(&root.join("a.txt"), 100).await?;
    create_test_file(&root.join("b/c.jpg"), 200).await?;
    create_test_file(&root.join("b/d.mp4"), 300).await?;
    create_test_file(&root.join("b/e/f.png"), 50).await?;
    Ok(())
}

/// Writes a config pointing at `storage` and returns its path.
fn write_config(dir: &Path, storage: &Path, max_files: usize) -> Result<std::path::PathBuf> {
    let settings = Settings {
        storage_root: storage.to_path_buf(),
        max_files,
        public_url_prefix: "/media/".to_string(),
        max_depth: 8,
        max_concurrent_io: 4,
    };
    let path = dir.join("filedeck").join("config.toml");
    settings.save_to(&path)?;
    Ok(path)
}

fn find<'a>(entries: &'a [Entry], name: &str) -> &'a Entry {
    entries
        .iter()
        .find(|e| e.name() == name)
        .unwrap_or_else(|| panic!("missing entry {name}"))
}

#[tokio::test]
async fn test_config_to_navigation_workflow() -> Result<()> {
    let storage = TempDir::new()?;
    let config_dir = TempDir::new()?;
    setup_storage(storage.path()).await?;

    let config_path = write_config(config_dir.path(), storage.path(), 10)?;
    let settings = Settings::load_from(&config_path).await?;
    assert_eq!(settings.max_files, 10);
    assert_eq!(settings.public_url_prefix, "/media/");

    let service = ListingService::new(&settings);

    // Step 1: root listing
    let root = service.list_root().await?;
    assert_eq!(root.stats.total_files, 2);
    assert_eq!(root.stats.used_files_percentage, 20);
    assert_eq!(root.stats.total_size_in_bytes, 650);

    // Step 2: drill into b using the identifier from the listing
    let b = find(&root.entries, "b");
    let folder_b = service.get_folder(b.path()).await?;
    assert_eq!(folder_b.stats.total_files, 3);
    assert_eq!(folder_b.stats.total_size_in_bytes, 550);

    // Step 3: one level further down
    let e = find(folder_b.folder.children(), "e");
    assert_eq!(e.path(), "b%2Fe");
    let folder_e = service.get_folder(e.path()).await?;
    let png = find(folder_e.folder.children(), "f.png");
    assert_eq!(png.url(), "/media/b/e/f.png");
    assert_eq!(folder_e.stats.total_size_in_bytes, 50);

    // Step 4: the folder goes away between requests
    fs::remove_dir_all(storage.path().join("b/e")).await?;
    let gone = service.get_folder(e.path()).await;
    assert!(matches!(gone, Err(IndexError::NotFound { .. })));

    Ok(())
}

#[tokio::test]
async fn test_invalid_config_is_rejected() -> Result<()> {
    let config_dir = TempDir::new()?;
    let path = config_dir.path().join("config.toml");
    fs::write(&path, "max_files = 0\n").await?;

    assert!(Settings::load_from(&path).await.is_err());
    Ok(())
}

#[tokio::test]
async fn test_binary_prints_json_listing() -> Result<()> {
    let storage = TempDir::new()?;
    let config_dir = TempDir::new()?;
    setup_storage(storage.path()).await?;
    let config_path = write_config(config_dir.path(), storage.path(), 500)?;

    let output = Command::new(env!("CARGO_BIN_EXE_filedeck"))
        .arg("--config")
        .arg(&config_path)
        .arg("--json")
        .arg("b")
        .env("RUST_LOG", "off")
        .output()?;

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json["stats"]["totalFiles"], 3);
    assert_eq!(json["stats"]["totalSizeInBytes"], 550);
    assert_eq!(json["folder"]["name"], "b");
    assert_eq!(json["folder"]["sizeInBytes"], 550);
    assert_eq!(json["folder"]["humanSize"], "550 B");
    assert_eq!(json["stats"]["humanTotalSize"], "550 B");
    Ok(())
}

#[tokio::test]
async fn test_binary_fails_on_missing_folder() -> Result<()> {
    let storage = TempDir::new()?;
    let config_dir = TempDir::new()?;
    setup_storage(storage.path()).await?;
    let config_path = write_config(config_dir.path(), storage.path(), 500)?;

    let output = Command::new(env!("CARGO_BIN_EXE_filedeck"))
        .arg("--config")
        .arg(&config_path)
        .arg("nope")
        .env("RUST_LOG", "off")
        .output()?;

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    Ok(())
}
