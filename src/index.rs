//! Host project services: the asset index and reload locking.
//!
//! Generation talks to the host only through [`IndexService`] and
//! [`ReloadLock`]. [`ProjectIndex`] implements both over a project directory
//! laid out with `Assets/` and `Packages/`; [`NullIndex`] is a detached
//! implementation that knows nothing and does nothing.

use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::constants::{ASSETS_DIR, META_SUFFIX, PACKAGES_DIR};
use crate::error::GpigResult;
use crate::guid::{read_sidecar_guid, sidecar_path};
use crate::validate::package_descriptor_path;

/// File-indexing service of the host project.
pub trait IndexService {
    /// Brings the index up to date with files written since the last refresh.
    fn refresh(&self) -> GpigResult<()>;

    /// Returns the GUID of the asset at a project-relative path
    /// (e.g. `Packages/com.author.tool/Core/File.cs`).
    fn find_by_path(&self, asset_path: &str) -> Option<String>;

    /// Returns true when a package descriptor for `package_name` is indexed.
    fn exists_package(&self, package_name: &str) -> bool;
}

/// Process-wide lock that keeps the host from reloading while files change.
pub trait ReloadLock {
    fn pause(&self);
    fn resume(&self);

    /// Asks the host to reload dependent compiled logic once it is idle.
    fn request_reload(&self) {}
}

/// Holds a [`ReloadLock`] paused for its lifetime.
pub struct PauseGuard<'a> {
    lock: &'a dyn ReloadLock,
}

impl<'a> PauseGuard<'a> {
    pub fn new(lock: &'a dyn ReloadLock) -> Self {
        lock.pause();
        Self { lock }
    }
}

impl Drop for PauseGuard<'_> {
    fn drop(&mut self) {
        self.lock.resume();
    }
}

/// Index and lock for running without a host project.
#[derive(Debug, Default)]
pub struct NullIndex;

impl NullIndex {
    pub fn new() -> Self {
        Self
    }
}

impl IndexService for NullIndex {
    fn refresh(&self) -> GpigResult<()> {
        Ok(())
    }

    fn find_by_path(&self, _asset_path: &str) -> Option<String> {
        None
    }

    fn exists_package(&self, _package_name: &str) -> bool {
        false
    }
}

impl ReloadLock for NullIndex {
    fn pause(&self) {}
    fn resume(&self) {}
}

/// Index over a host project directory.
///
/// Every file and directory under `Assets/` and `Packages/` gets a `.meta`
/// sidecar holding a GUID; `refresh` creates the ones that are missing, the
/// way the host's importer would.
#[derive(Debug)]
pub struct ProjectIndex {
    root: PathBuf,
    pause_depth: Cell<u32>,
    reload_requested: Cell<bool>,
}

impl ProjectIndex {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            pause_depth: Cell::new(0),
            reload_requested: Cell::new(false),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_paused(&self) -> bool {
        self.pause_depth.get() > 0
    }

    pub fn reload_requested(&self) -> bool {
        self.reload_requested.get()
    }

    fn import_root(&self, root: &Path) -> GpigResult<usize> {
        let mut imported = 0;
        let walker = WalkDir::new(root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_excluded(entry));

        for entry in walker {
            let entry = entry?;
            let path = entry.path();
            if path.to_string_lossy().ends_with(META_SUFFIX) {
                continue;
            }
            let meta_path = sidecar_path(path);
            if meta_path.exists() {
                continue;
            }
            fs::write(&meta_path, sidecar_text(entry.file_type().is_dir()))?;
            debug!("Imported '{}'", path.display());
            imported += 1;
        }
        Ok(imported)
    }
}

impl IndexService for ProjectIndex {
    fn refresh(&self) -> GpigResult<()> {
        let mut imported = 0;
        for dir in [ASSETS_DIR, PACKAGES_DIR] {
            let root = self.root.join(dir);
            if root.is_dir() {
                imported += self.import_root(&root)?;
            }
        }
        debug!("Index refreshed, {} new assets", imported);
        Ok(())
    }

    fn find_by_path(&self, asset_path: &str) -> Option<String> {
        read_sidecar_guid(self.root.join(asset_path))
    }

    fn exists_package(&self, package_name: &str) -> bool {
        self.root.join(package_descriptor_path(package_name)).is_file()
    }
}

impl ReloadLock for ProjectIndex {
    fn pause(&self) {
        self.pause_depth.set(self.pause_depth.get() + 1);
        debug!("Reloads paused (depth {})", self.pause_depth.get());
    }

    fn resume(&self) {
        match self.pause_depth.get() {
            0 => warn!("Reload lock released more often than acquired"),
            depth => {
                self.pause_depth.set(depth - 1);
                debug!("Reloads resumed (depth {})", depth - 1);
            }
        }
    }

    fn request_reload(&self) {
        self.reload_requested.set(true);
        info!("Reload of '{}' requested", self.root.display());
    }
}

// Hidden entries and `name~` entries are never imported by the host.
fn is_excluded(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.') || name.ends_with('~'))
        .unwrap_or(false)
}

fn sidecar_text(is_dir: bool) -> String {
    let guid = uuid::Uuid::new_v4().simple().to_string();
    if is_dir {
        format!("fileFormatVersion: 2\nguid: {}\nfolderAsset: yes\n", guid)
    } else {
        format!("fileFormatVersion: 2\nguid: {}\n", guid)
    }
}
