use std::fs;

use gpig::guid::{read_sidecar_guid, sidecar_path};
use gpig::index::{IndexService, ProjectIndex, ReloadLock};
use tempfile::TempDir;

#[test]
fn test_refresh_imports_missing_sidecars() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("Assets/Scripts")).unwrap();
    fs::write(root.join("Assets/Scripts/Tool.cs"), "class Tool {}").unwrap();
    fs::create_dir_all(root.join("Assets/.hidden")).unwrap();
    fs::create_dir_all(root.join("Assets/Samples~")).unwrap();
    fs::write(root.join("Assets/Samples~/Demo.cs"), "").unwrap();
    fs::create_dir_all(root.join("Other")).unwrap();

    let index = ProjectIndex::new(root);
    index.refresh().unwrap();

    let guid = read_sidecar_guid(root.join("Assets/Scripts/Tool.cs")).unwrap();
    assert_eq!(guid.len(), 32);
    assert!(sidecar_path(root.join("Assets/Scripts")).exists());
    assert!(!sidecar_path(root.join("Assets/.hidden")).exists());
    assert!(!sidecar_path(root.join("Assets/Samples~")).exists());
    assert!(!sidecar_path(root.join("Assets/Samples~/Demo.cs")).exists());
    assert!(!sidecar_path(root.join("Other")).exists());
    assert!(!sidecar_path(sidecar_path(root.join("Assets/Scripts/Tool.cs"))).exists());

    // Existing sidecars keep their GUID.
    index.refresh().unwrap();
    assert_eq!(read_sidecar_guid(root.join("Assets/Scripts/Tool.cs")).unwrap(), guid);
    assert_eq!(index.find_by_path("Assets/Scripts/Tool.cs"), Some(guid));
    assert_eq!(index.find_by_path("Assets/Scripts/Missing.cs"), None);
}

#[test]
fn test_exists_package() {
    let temp_dir = TempDir::new().unwrap();
    let package_dir = temp_dir.path().join("Packages/com.author.tool");
    fs::create_dir_all(&package_dir).unwrap();

    let index = ProjectIndex::new(temp_dir.path());
    assert!(!index.exists_package("com.author.tool"));

    fs::write(package_dir.join("package.json"), r#"{"name": "com.author.tool"}"#).unwrap();
    assert!(index.exists_package("com.author.tool"));
    assert!(!index.exists_package("com.author.other"));
}

#[test]
fn test_reload_lock_state() {
    let index = ProjectIndex::new("project");
    index.pause();
    assert!(index.is_paused());
    index.resume();
    index.resume();
    assert!(!index.is_paused());

    assert!(!index.reload_requested());
    index.request_reload();
    assert!(index.reload_requested());
}
