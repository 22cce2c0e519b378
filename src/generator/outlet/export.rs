//! Packaging variants as downloadable project archives

use std::collections::HashSet;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{error, info, warn};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use super::templates;
use crate::types::export::{ExportOptions, ExportResult};
use crate::types::variant::{Framework, UIVariant};
use crate::utils::text::slugify;

/// Archive name used by [`ExportBuilder::export_all`]
pub const BUNDLE_FILENAME: &str = "magic-ui-elite-variants.zip";

/// URL prefix under which built archives are served
pub const DOWNLOAD_PREFIX: &str = "/downloads";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("nothing to export")]
    EmptySelection,
    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// One file of an exported project
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectFile {
    pub path: String,
    pub contents: String,
}

impl ProjectFile {
    fn new(path: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

/// Ordered file set; writing an existing path replaces its contents in place
#[derive(Debug, Default)]
struct FileSet {
    files: Vec<ProjectFile>,
}

impl FileSet {
    fn put(&mut self, path: &str, contents: impl Into<String>) {
        let contents = contents.into();
        match self.files.iter_mut().find(|f| f.path == path) {
            Some(existing) => existing.contents = contents,
            None => self.files.push(ProjectFile::new(path, contents)),
        }
    }
}

/// Files of the project exported for `variant`
pub fn project_files(variant: &UIVariant, options: &ExportOptions) -> Vec<ProjectFile> {
    let code = &variant.code;
    let mut set = FileSet::default();

    set.put("index.html", templates::index_html(variant, options));
    set.put("styles.css", code.css.as_str());
    set.put("script.js", code.js.as_str());
    if options.include_package_json {
        set.put("package.json", templates::package_json(variant));
    }
    set.put("README.md", templates::readme(variant));

    match options.framework {
        Framework::React => {
            set.put("src/App.jsx", templates::react_app(variant));
            set.put("src/index.js", templates::REACT_INDEX);
            set.put("src/App.css", code.css.as_str());
            set.put("public/index.html", templates::react_public_index(variant));
            set.put("package.json", templates::react_package_json(variant));
        }
        Framework::Vue => {
            set.put("src/App.vue", templates::vue_app(variant));
            set.put("src/main.js", templates::VUE_MAIN);
            set.put("package.json", templates::vue_package_json(variant));
            set.put("vite.config.js", templates::VITE_CONFIG);
        }
        Framework::Next => {
            set.put("pages/index.js", templates::next_index(variant));
            set.put("pages/_app.js", templates::NEXT_APP);
            set.put("styles/globals.css", code.css.as_str());
            set.put("package.json", templates::next_package_json(variant));
            set.put("next.config.js", templates::NEXT_CONFIG);
        }
        Framework::Svelte => {
            warn!("No Svelte scaffolding available, exporting {} as static files", variant.name);
        }
        Framework::Vanilla => {}
    }

    if options.include_deployment {
        set.put("vercel.json", templates::vercel_json());
        set.put(".gitignore", templates::GITIGNORE);
    }
    if options.include_dev {
        set.put(".eslintrc.json", templates::eslint_json());
        set.put("prettier.config.js", templates::PRETTIER_CONFIG);
    }

    set.files
}

/// Archive name for one variant. The id is part of the name, since several
/// variants of a run may share a theme name.
pub fn archive_filename(variant: &UIVariant) -> String {
    let name = templates::project_name(variant);
    let id = slugify(&variant.id);
    if id.is_empty() || id == name {
        format!("{}-export.zip", name)
    } else {
        format!("{}-{}-export.zip", name, id)
    }
}

/// One bundle folder per variant. A repeated theme name gets the variant id
/// appended, then a counter if that is taken as well.
pub fn bundle_folders(variants: &[UIVariant]) -> Vec<String> {
    let mut taken = HashSet::new();
    variants
        .iter()
        .map(|variant| {
            let name = templates::project_name(variant);
            let mut folder = name.clone();
            if taken.contains(&folder) {
                folder = format!("{}-{}", name, slugify(&variant.id));
            }
            let mut n = 2;
            while taken.contains(&folder) {
                folder = format!("{}-{}", name, n);
                n += 1;
            }
            taken.insert(folder.clone());
            folder
        })
        .collect()
}

/// Zip `(path, contents)` entries in the given order
pub fn build_archive<'a, I>(entries: I) -> Result<Vec<u8>, ExportError>
where
    I: IntoIterator<Item = (String, &'a str)>,
{
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .unix_permissions(0o644);

    for (path, contents) in entries {
        writer.start_file(path, options)?;
        writer.write_all(contents.as_bytes())?;
    }

    Ok(writer.finish()?.into_inner())
}

/// Writes export archives into a downloads directory
#[derive(Debug, Clone)]
pub struct ExportBuilder {
    exports_dir: PathBuf,
}

impl ExportBuilder {
    pub fn new(exports_dir: impl Into<PathBuf>) -> Self {
        Self {
            exports_dir: exports_dir.into(),
        }
    }

    pub fn exports_dir(&self) -> &Path {
        &self.exports_dir
    }

    /// Package one variant. Failures are reported in the result, never raised.
    pub async fn export_variant(&self, variant: &UIVariant, options: &ExportOptions) -> ExportResult {
        match self.try_export_variant(variant, options).await {
            Ok(result) => result,
            Err(e) => {
                error!("❌ Export of {} failed: {}", variant.id, e);
                ExportResult::failed(format!("Export failed: {}", e))
            }
        }
    }

    pub async fn try_export_variant(
        &self,
        variant: &UIVariant,
        options: &ExportOptions,
    ) -> Result<ExportResult, ExportError> {
        let files = project_files(variant, options);
        let archive = build_archive(files.iter().map(|f| (f.path.clone(), f.contents.as_str())))?;
        let filename = archive_filename(variant);

        let size = self.write_archive(&filename, &archive).await?;
        info!("📦 Exported {} ({} framework) to {}", variant.name, options.framework, filename);

        Ok(ExportResult {
            success: true,
            download_url: download_url(&filename),
            filename,
            size,
            files: files.into_iter().map(|f| f.path).collect(),
            error: None,
        })
    }

    /// Package several variants into one archive, one folder each.
    /// `files` of the result lists the variant names.
    pub async fn export_all(&self, variants: &[UIVariant]) -> ExportResult {
        match self.try_export_all(variants).await {
            Ok(result) => result,
            Err(e) => {
                error!("❌ Multi-variant export failed: {}", e);
                ExportResult::failed(format!("Multi-variant export failed: {}", e))
            }
        }
    }

    async fn try_export_all(&self, variants: &[UIVariant]) -> Result<ExportResult, ExportError> {
        if variants.is_empty() {
            return Err(ExportError::EmptySelection);
        }

        let defaults = ExportOptions::default();
        let mut entries = Vec::new();
        for (variant, folder) in variants.iter().zip(bundle_folders(variants)) {
            entries.push((format!("{}/index.html", folder), templates::index_html(variant, &defaults)));
            entries.push((format!("{}/styles.css", folder), variant.code.css.clone()));
            entries.push((format!("{}/script.js", folder), variant.code.js.clone()));
            entries.push((format!("{}/README.md", folder), templates::readme(variant)));
        }

        let archive = build_archive(entries.iter().map(|(p, c)| (p.clone(), c.as_str())))?;
        let size = self.write_archive(BUNDLE_FILENAME, &archive).await?;
        info!("📦 Exported {} variants to {}", variants.len(), BUNDLE_FILENAME);

        Ok(ExportResult {
            success: true,
            download_url: download_url(BUNDLE_FILENAME),
            filename: BUNDLE_FILENAME.to_string(),
            size,
            files: variants.iter().map(|v| v.name.clone()).collect(),
            error: None,
        })
    }

    async fn write_archive(&self, filename: &str, archive: &[u8]) -> Result<u64, ExportError> {
        tokio::fs::create_dir_all(&self.exports_dir).await?;
        tokio::fs::write(self.exports_dir.join(filename), archive).await?;
        Ok(archive.len() as u64)
    }

    /// Path of a previously built archive, if `filename` names one
    pub fn archive_path(&self, filename: &str) -> Option<PathBuf> {
        let plain = !filename.is_empty()
            && filename.ends_with(".zip")
            && !filename.contains(['/', '\\'])
            && !filename.starts_with('.');
        if !plain {
            return None;
        }
        let path = self.exports_dir.join(filename);
        path.is_file().then_some(path)
    }
}

pub fn download_url(filename: &str) -> String {
    format!("{}/{}", DOWNLOAD_PREFIX, filename)
}

#[cfg(test)]
mod tests;
