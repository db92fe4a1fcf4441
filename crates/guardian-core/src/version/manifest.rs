//! Readers for the manifests a version can be declared in.

use std::path::Path;

use crate::error::ManifestError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestKind {
    Pyproject,
    Cargo,
    PackageJson,
}

impl ManifestKind {
    /// Reading order in multi-source mode.
    pub const ALL: [ManifestKind; 3] = [
        ManifestKind::Pyproject,
        ManifestKind::Cargo,
        ManifestKind::PackageJson,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            ManifestKind::Pyproject => "pyproject.toml",
            ManifestKind::Cargo => "Cargo.toml",
            ManifestKind::PackageJson => "package.json",
        }
    }

    /// Read the manifest under `root`. `Ok(None)` means the file parsed but
    /// declares no usable version.
    pub fn read(self, root: &Path) -> Result<Option<String>, ManifestError> {
        let file = self.file_name();
        let raw = std::fs::read_to_string(root.join(file))
            .map_err(|source| ManifestError::Read { file, source })?;
        self.parse(&raw)
    }

    pub fn parse(self, raw: &str) -> Result<Option<String>, ManifestError> {
        let file = self.file_name();
        match self {
            ManifestKind::Pyproject => {
                let doc: toml::Table =
                    toml::from_str(raw).map_err(|source| ManifestError::Toml { file, source })?;
                Ok(pyproject_version(&doc))
            }
            ManifestKind::Cargo => {
                let doc: toml::Table =
                    toml::from_str(raw).map_err(|source| ManifestError::Toml { file, source })?;
                Ok(cargo_version(&doc))
            }
            ManifestKind::PackageJson => {
                let doc: serde_json::Value =
                    serde_json::from_str(raw).map_err(|source| ManifestError::Json { file, source })?;
                Ok(doc
                    .get("version")
                    .and_then(serde_json::Value::as_str)
                    .and_then(non_empty))
            }
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

fn toml_str_at(doc: &toml::Table, path: &[&str]) -> Option<String> {
    let (last, parents) = path.split_last()?;
    let mut table = doc;
    for key in parents {
        table = table.get(*key)?.as_table()?;
    }
    table.get(*last)?.as_str().and_then(non_empty)
}

/// PEP 621 `[project] version`, falling back to Poetry's `[tool.poetry]`.
fn pyproject_version(doc: &toml::Table) -> Option<String> {
    toml_str_at(doc, &["project", "version"])
        .or_else(|| toml_str_at(doc, &["tool", "poetry", "version"]))
}

/// `[package] version`, following `version.workspace = true` to the
/// `[workspace.package]` table of the same file.
fn cargo_version(doc: &toml::Table) -> Option<String> {
    if let Some(version) = toml_str_at(doc, &["package", "version"]) {
        return Some(version);
    }
    let inherits = doc
        .get("package")
        .and_then(|p| p.get("version"))
        .and_then(|v| v.get("workspace"))
        .and_then(toml::Value::as_bool)
        .unwrap_or(false);
    if inherits {
        toml_str_at(doc, &["workspace", "package", "version"])
    } else {
        None
    }
}
