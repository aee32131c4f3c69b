//! Scratch workspace used to stage one generation run.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, error};

use crate::error::GpigResult;
use crate::guid::sidecar_path;

/// A uniquely named staging directory, removed together with its sidecar
/// when dropped.
#[derive(Debug)]
pub struct ScratchWorkspace {
    path: PathBuf,
}

impl ScratchWorkspace {
    /// Creates `<parent>/<base_name>`, or `<parent>/<base_name><random hex>`
    /// when that name is taken.
    pub fn create<P: AsRef<Path>>(parent: P, base_name: &str) -> GpigResult<Self> {
        let parent = parent.as_ref();
        fs::create_dir_all(parent)?;

        let mut name = base_name.to_string();
        loop {
            let path = parent.join(&name);
            if !path.exists() {
                match fs::create_dir(&path) {
                    Ok(()) => {
                        debug!("Created scratch workspace '{}'", path.display());
                        return Ok(Self { path });
                    }
                    Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
                    Err(e) => return Err(e.into()),
                }
            }
            name = format!("{}{}", base_name, uuid::Uuid::new_v4().simple());
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchWorkspace {
    fn drop(&mut self) {
        if self.path.exists() {
            if let Err(e) = fs::remove_dir_all(&self.path) {
                error!("Failed to remove scratch workspace '{}': {}", self.path.display(), e);
            }
        }
        let meta_path = sidecar_path(&self.path);
        if meta_path.exists() {
            if let Err(e) = fs::remove_file(&meta_path) {
                error!("Failed to remove '{}': {}", meta_path.display(), e);
            }
        }
        debug!("Removed scratch workspace '{}'", self.path.display());
    }
}
