//! Template tree snapshots.

use std::fs;
use std::path::{Path, PathBuf};

use globset::GlobSet;
use log::{debug, info};
use walkdir::WalkDir;

use crate::config::GeneratorConfig;
use crate::constants::{PACKAGE_DESCRIPTOR, TEXT_TEMPLATE_SUFFIX};
use crate::error::{GpigError, GpigResult};
use crate::metadata::read_package_name_in;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    /// A `.txt` file whose content goes through marker substitution.
    TextTemplate { content: String },
    /// Any other file.
    Opaque,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    /// Path relative to the template root.
    pub relative_path: PathBuf,
    pub kind: EntryKind,
}

impl TemplateEntry {
    /// Path of the generated entry; text templates lose their `.txt` suffix.
    pub fn output_path(&self) -> PathBuf {
        if !matches!(self.kind, EntryKind::TextTemplate { .. }) {
            return self.relative_path.clone();
        }
        match self.relative_path.file_name().and_then(|name| name.to_str()) {
            Some(name) if is_text_template(name) => self
                .relative_path
                .with_file_name(&name[..name.len() - TEXT_TEMPLATE_SUFFIX.len()]),
            _ => self.relative_path.clone(),
        }
    }
}

/// True for file names ending in `.txt`, in any letter case.
pub fn is_text_template(file_name: &str) -> bool {
    file_name.len() > TEXT_TEMPLATE_SUFFIX.len()
        && file_name
            .get(file_name.len() - TEXT_TEMPLATE_SUFFIX.len()..)
            .is_some_and(|suffix| suffix.eq_ignore_ascii_case(TEXT_TEMPLATE_SUFFIX))
}

/// Ordered snapshot of a template directory. Directories precede their
/// contents.
#[derive(Debug, Clone, Default)]
pub struct TemplateTree {
    root: PathBuf,
    entries: Vec<TemplateEntry>,
}

impl TemplateTree {
    /// Walks `root`, skipping entries matched by `ignored`.
    pub fn load<P: AsRef<Path>>(root: P, ignored: &GlobSet) -> GpigResult<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(GpigError::TemplateError(format!(
                "template directory '{}' does not exist",
                root.display()
            )));
        }

        let mut entries = Vec::new();
        for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
            let entry = entry?;
            let relative_path = entry
                .path()
                .strip_prefix(root)
                .map_err(|e| GpigError::TemplateError(e.to_string()))?
                .to_path_buf();

            if ignored.is_match(&relative_path) {
                debug!("Ignoring template entry '{}'", relative_path.display());
                continue;
            }

            let file_name = entry.file_name().to_string_lossy();
            let kind = if entry.file_type().is_dir() {
                EntryKind::Directory
            } else if is_text_template(&file_name) {
                EntryKind::TextTemplate {
                    content: fs::read_to_string(entry.path())?,
                }
            } else {
                EntryKind::Opaque
            };
            entries.push(TemplateEntry { relative_path, kind });
        }

        debug!("Loaded {} template entries from '{}'", entries.len(), root.display());
        Ok(Self {
            root: root.to_path_buf(),
            entries,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entries(&self) -> &[TemplateEntry] {
        &self.entries
    }
}

/// Locates the template root for a generator source directory.
///
/// A directory with a `package.json` is a generator package and keeps its
/// templates in the configured template directory. Anything else is used as
/// the template root directly.
pub fn resolve_template_root<P: AsRef<Path>>(source: P, config: &GeneratorConfig) -> GpigResult<PathBuf> {
    let source = source.as_ref();
    if !source.exists() {
        return Err(GpigError::TemplateError(format!(
            "template source '{}' does not exist",
            source.display()
        )));
    }

    if !source.join(PACKAGE_DESCRIPTOR).is_file() {
        return Ok(source.to_path_buf());
    }

    match read_package_name_in(source) {
        Some(name) => info!("Using templates of generator package '{}'", name),
        None => info!("Using templates of an unnamed generator package"),
    }
    let template_root = source.join(&config.template_dir);
    if !template_root.is_dir() {
        return Err(GpigError::TemplateError(format!(
            "generator package '{}' has no '{}' directory",
            source.display(),
            config.template_dir
        )));
    }
    Ok(template_root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_text_template() {
        assert!(is_text_template("Readme.md.txt"));
        assert!(is_text_template("NOTES.TXT"));
        assert!(!is_text_template(".txt"));
        assert!(!is_text_template("file.txt.bak"));
        assert!(!is_text_template("filetxt"));
    }

    #[test]
    fn test_output_path_strips_suffix() {
        let entry = TemplateEntry {
            relative_path: PathBuf::from("Core/Data/Table.cs.TXT"),
            kind: EntryKind::TextTemplate {
                content: String::new(),
            },
        };
        assert_eq!(entry.output_path(), PathBuf::from("Core/Data/Table.cs"));

        let opaque = TemplateEntry {
            relative_path: PathBuf::from("Icons/logo.png"),
            kind: EntryKind::Opaque,
        };
        assert_eq!(opaque.output_path(), PathBuf::from("Icons/logo.png"));
    }
}
