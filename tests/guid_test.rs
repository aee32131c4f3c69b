use std::fs;

use gpig::constants::EMPTY_GUID;
use gpig::error::GpigResult;
use gpig::guid::{resolve_guid, sidecar_path};
use gpig::index::{IndexService, NullIndex};
use tempfile::TempDir;

const SIDECAR_GUID: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
const INDEX_GUID: &str = "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

/// Index that knows exactly one asset path.
struct SingleAsset {
    path: &'static str,
}

impl IndexService for SingleAsset {
    fn refresh(&self) -> GpigResult<()> {
        Ok(())
    }

    fn find_by_path(&self, asset_path: &str) -> Option<String> {
        (asset_path == self.path).then(|| INDEX_GUID.to_string())
    }

    fn exists_package(&self, _package_name: &str) -> bool {
        false
    }
}

const INDEX: SingleAsset = SingleAsset {
    path: "Packages/com.author.tool/Core/Data/GitRepositoryTable.cs",
};

fn write_sidecar(dir: &TempDir, guid: &str) -> std::path::PathBuf {
    let target = dir.path().join("GitRepositoryTable.cs");
    fs::write(&target, "class GitRepositoryTable {}").unwrap();
    fs::write(sidecar_path(&target), format!("fileFormatVersion: 2\nguid: {}\n", guid)).unwrap();
    target
}

#[test]
fn test_sidecar_guid_wins() {
    let temp_dir = TempDir::new().unwrap();
    let target = write_sidecar(&temp_dir, SIDECAR_GUID);

    let guid = resolve_guid(&target, "com.author.tool", "Core/Data/GitRepositoryTable.cs", &INDEX);
    assert_eq!(guid, SIDECAR_GUID);
}

#[test]
fn test_empty_sidecar_guid_falls_back_to_index() {
    let temp_dir = TempDir::new().unwrap();
    let target = write_sidecar(&temp_dir, EMPTY_GUID);

    let guid = resolve_guid(&target, "com.author.tool", "Core/Data/GitRepositoryTable.cs", &INDEX);
    assert_eq!(guid, INDEX_GUID);
}

#[test]
fn test_missing_or_corrupt_sidecar_falls_back_to_index() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("GitRepositoryTable.cs");

    let guid = resolve_guid(&target, "com.author.tool", "Core/Data/GitRepositoryTable.cs", &INDEX);
    assert_eq!(guid, INDEX_GUID);

    fs::write(sidecar_path(&target), "guid: aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa").unwrap();
    let guid = resolve_guid(&target, "com.author.tool", "Core/Data/GitRepositoryTable.cs", &INDEX);
    assert_eq!(guid, INDEX_GUID);
}

#[test]
fn test_unknown_everywhere_yields_empty_guid() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("GitRepositoryTable.cs");

    let guid = resolve_guid(&target, "com.author.tool", "Core/Data/GitRepositoryTable.cs", &NullIndex::new());
    assert_eq!(guid, EMPTY_GUID);
}
