//! Installer package generation.
//!
//! A run derives the namespace, checks the destination, stages every template
//! entry into a scratch workspace, lets the index pick up the new files,
//! resolves the repository table GUID, renders the text templates again with
//! the GUID bound and finally moves the staged tree into the destination. The scratch workspace is removed and
//! the reload pause released on every exit path once staging has begun.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use globset::GlobSet;
use log::{debug, error, info};

use crate::config::GeneratorConfig;
use crate::error::{GpigError, GpigResult};
use crate::guid::resolve_guid;
use crate::ignore::build_ignore_set;
use crate::index::{IndexService, PauseGuard, ReloadLock};
use crate::namespace::derive_namespace;
use crate::params::{MarkerSpec, ParameterId, ParameterSet};
use crate::scratch::ScratchWorkspace;
use crate::substitute::Substitutor;
use crate::template::{EntryKind, TemplateTree};

/// Parameters that must have a value for substitution to proceed.
const REQUIRED_PARAMETERS: [ParameterId; 2] = [ParameterId::PackageName, ParameterId::Version];

/// Stages of a generation run, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Validating,
    StagingFiles,
    Indexed,
    ResolvingGuid,
    RewritingGuid,
    Finalizing,
    Done,
    Failed,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Idle => "idle",
            Stage::Validating => "validating",
            Stage::StagingFiles => "staging files",
            Stage::Indexed => "indexed",
            Stage::ResolvingGuid => "resolving GUID",
            Stage::RewritingGuid => "rewriting GUID",
            Stage::Finalizing => "finalizing",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub destination: PathBuf,
    pub namespace: String,
    /// GUID written in place of the repository table marker.
    pub table_guid: String,
    /// Generated text files, relative to the destination.
    pub generated: BTreeSet<PathBuf>,
}

/// Generates installer packages from one template tree.
pub struct Materializer<'a> {
    index: &'a dyn IndexService,
    reload: &'a dyn ReloadLock,
    markers: MarkerSpec,
    template_root: PathBuf,
    scratch_parent: PathBuf,
    scratch_name: String,
    table_source_path: String,
    copy_opaque: bool,
    ignored: GlobSet,
}

impl<'a> Materializer<'a> {
    /// Creates a materializer for `template_root`, staging under
    /// `scratch_parent`, with the remaining settings taken from `config`.
    ///
    /// # Errors
    /// * `GpigError::IgnoreError` if the configured ignore patterns are invalid
    pub fn new<T, S>(
        index: &'a dyn IndexService,
        reload: &'a dyn ReloadLock,
        config: &GeneratorConfig,
        template_root: T,
        scratch_parent: S,
    ) -> GpigResult<Self>
    where
        T: Into<PathBuf>,
        S: Into<PathBuf>,
    {
        Ok(Self {
            index,
            reload,
            markers: MarkerSpec::default(),
            template_root: template_root.into(),
            scratch_parent: scratch_parent.into(),
            scratch_name: config.scratch_name.clone(),
            table_source_path: config.table_source_path.clone(),
            copy_opaque: config.copy_opaque,
            ignored: build_ignore_set(&config.ignore)?,
        })
    }

    /// Generates the package described by `params` into `destination`.
    ///
    /// Parameters are expected to be validated by the caller.
    ///
    /// # Errors
    /// * `GpigError::NamespaceDerivationError` if the package name is missing or blank
    /// * `GpigError::DestinationNotEmptyError` if `destination` has any content
    /// * `GpigError::IoError` and friends for filesystem failures while generating
    pub fn generate<P: AsRef<Path>>(&self, destination: P, params: &ParameterSet) -> GpigResult<Generation> {
        let destination = destination.as_ref();
        debug!("Stage: {}", Stage::Idle);

        let namespace = derive_namespace(params.package_name())?;
        debug!("Stage: {} (namespace '{}')", Stage::Validating, namespace);
        ensure_empty(destination)?;

        let package_name = params.package_name().unwrap_or_default();
        let outcome = {
            let substitutor =
                Substitutor::new(&self.markers, params, &namespace, &REQUIRED_PARAMETERS)?;
            let tree = TemplateTree::load(&self.template_root, &self.ignored)?;

            let _paused = PauseGuard::new(self.reload);
            let scratch = ScratchWorkspace::create(&self.scratch_parent, &self.scratch_name)?;

            let outcome =
                self.materialize(&scratch, &tree, &substitutor, package_name, destination);

            drop(scratch);
            if let Err(e) = self.index.refresh() {
                error!("Index refresh after cleanup failed: {}", e);
            }
            outcome
        };

        match outcome {
            Ok((table_guid, generated)) => {
                self.reload.request_reload();
                debug!("Stage: {}", Stage::Done);
                info!("Generated '{}' into '{}'", package_name, destination.display());
                Ok(Generation {
                    destination: destination.to_path_buf(),
                    namespace,
                    table_guid,
                    generated,
                })
            }
            Err(e) => {
                debug!("Stage: {} ({})", Stage::Failed, e);
                Err(e)
            }
        }
    }

    fn materialize(
        &self,
        scratch: &ScratchWorkspace,
        tree: &TemplateTree,
        substitutor: &Substitutor,
        package_name: &str,
        destination: &Path,
    ) -> GpigResult<(String, BTreeSet<PathBuf>)> {
        debug!("Stage: {}", Stage::StagingFiles);
        let sources = self.stage(scratch.path(), tree, substitutor)?;

        self.index.refresh()?;
        debug!("Stage: {}", Stage::Indexed);

        debug!("Stage: {}", Stage::ResolvingGuid);
        let table_guid = resolve_guid(
            scratch.path().join(&self.table_source_path),
            package_name,
            &self.table_source_path,
            self.index,
        );

        debug!("Stage: {}", Stage::RewritingGuid);
        // Rendered from the template source, so parameter values are not rescanned.
        {
            let with_guid = substitutor.with_table_guid(&self.markers, &table_guid);
            for (relative_path, source) in &sources {
                fs::write(scratch.path().join(relative_path), with_guid.substitute(source))?;
            }
        }

        debug!("Stage: {}", Stage::Finalizing);
        move_entries(scratch.path(), destination)?;
        self.index.refresh()?;

        Ok((table_guid, sources.into_keys().collect()))
    }

    /// Writes the template tree into `scratch_root`.
    ///
    /// Returns the generated text files mapped to their template source.
    fn stage<'t>(
        &self,
        scratch_root: &Path,
        tree: &'t TemplateTree,
        substitutor: &Substitutor,
    ) -> GpigResult<BTreeMap<PathBuf, &'t str>> {
        let mut staged = HashSet::new();
        let mut sources = BTreeMap::new();

        for entry in tree.entries() {
            if !staged.insert(entry.relative_path.as_path()) {
                continue;
            }
            let output_path = entry.output_path();
            let target = scratch_root.join(&output_path);

            match &entry.kind {
                EntryKind::Directory => fs::create_dir_all(&target)?,
                EntryKind::TextTemplate { content } => {
                    create_parent(&target)?;
                    fs::write(&target, substitutor.substitute(content))?;
                    debug!("Generated '{}'", output_path.display());
                    sources.insert(output_path, content.as_str());
                }
                EntryKind::Opaque if self.copy_opaque => {
                    create_parent(&target)?;
                    fs::copy(tree.root().join(&entry.relative_path), &target)?;
                    debug!("Copied '{}'", output_path.display());
                }
                EntryKind::Opaque => {
                    debug!("Skipping non-template file '{}'", entry.relative_path.display());
                }
            }
        }

        Ok(sources)
    }
}

/// Fails unless `destination` is an existing directory with no entries.
pub fn ensure_empty(destination: &Path) -> GpigResult<()> {
    if fs::read_dir(destination)?.next().is_some() {
        return Err(GpigError::DestinationNotEmptyError {
            destination: destination.display().to_string(),
        });
    }
    Ok(())
}

fn create_parent(path: &Path) -> GpigResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Moves every top-level entry of `source` into `destination`.
///
/// Renames first and falls back to [`move_by_copy`], which also works across
/// filesystems.
fn move_entries(source: &Path, destination: &Path) -> GpigResult<()> {
    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let from = entry.path();
        let to = destination.join(entry.file_name());

        match fs::rename(&from, &to) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(e.into()),
            Err(e) => {
                debug!("Rename of '{}' failed ({}), copying instead", from.display(), e);
                move_by_copy(&from, destination)?;
            }
        }
    }
    Ok(())
}

/// Copies `from` into the `destination` directory under its own name, then
/// deletes it.
///
/// # Arguments
/// * `from` - File or directory to move
/// * `destination` - Existing directory that receives it
///
/// # Errors
/// * `GpigError::MoveError` if copying or deleting fails
/// * `GpigError::IoError` if `from` cannot be inspected
fn move_by_copy(from: &Path, destination: &Path) -> GpigResult<()> {
    if fs::metadata(from)?.is_dir() {
        let options = fs_extra::dir::CopyOptions::new();
        fs_extra::dir::move_dir(from, destination, &options)?;
    } else {
        let file_name = from.file_name().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, format!("'{}' has no file name", from.display()))
        })?;
        let options = fs_extra::file::CopyOptions::new();
        fs_extra::file::move_file(from, destination.join(file_name), &options)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_move_by_copy_moves_file_and_tree() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("scratch");
        let destination = temp_dir.path().join("out");
        fs::create_dir_all(source.join("Core/Data")).unwrap();
        fs::create_dir(&destination).unwrap();
        fs::write(source.join("package.json"), "{}").unwrap();
        fs::write(source.join("Core/Data/Table.cs"), "class Table {}").unwrap();
        fs::write(source.join("Core/README.md"), "readme").unwrap();

        move_by_copy(&source.join("package.json"), &destination).unwrap();
        move_by_copy(&source.join("Core"), &destination).unwrap();

        assert!(!source.join("package.json").exists());
        assert!(!source.join("Core").exists());
        assert_eq!(fs::read_to_string(destination.join("package.json")).unwrap(), "{}");
        assert_eq!(
            fs::read_to_string(destination.join("Core/Data/Table.cs")).unwrap(),
            "class Table {}"
        );
        assert_eq!(fs::read_to_string(destination.join("Core/README.md")).unwrap(), "readme");
    }

    #[test]
    fn test_move_by_copy_refuses_to_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let destination = temp_dir.path().join("out");
        fs::create_dir(&destination).unwrap();
        fs::write(destination.join("package.json"), "existing").unwrap();
        let from = temp_dir.path().join("package.json");
        fs::write(&from, "new").unwrap();

        let err = move_by_copy(&from, &destination).unwrap_err();

        assert!(matches!(err, GpigError::MoveError(_)));
        assert!(from.exists());
        assert_eq!(fs::read_to_string(destination.join("package.json")).unwrap(), "existing");
    }

    #[test]
    fn test_move_by_copy_missing_source() {
        let temp_dir = TempDir::new().unwrap();
        let err = move_by_copy(&temp_dir.path().join("missing"), temp_dir.path()).unwrap_err();
        assert!(matches!(err, GpigError::IoError(_)));
    }
}
