//! Templates downloaded from `<org>/template-<id>` repositories on GitHub
//!
//! The repository's branch archive is fetched as a zip and extracted in memory,
//! dropping the archive's top-level `<repo>-<branch>/` folder.

use super::catalog::Catalog;
use super::manifest::{PackageManifest, MANIFEST_FILE};
use super::{target_file_name, template_dir_name, TaskLabels, TemplateProvider};
use crate::error::ScaffoldError;
use anyhow::{Context, Result};
use std::ffi::OsStr;
use std::io::{Cursor, Read};
use std::path::{Component, Path, PathBuf};
use url::Url;
use zip::ZipArchive;

/// Default host serving repository archives
pub const DEFAULT_DOWNLOAD_URL: &str = "https://codeload.github.com";

/// Provider that downloads templates from a source-control host
pub struct RemoteTemplates {
    base_url: Url,
    org: String,
    branch: String,
    client: reqwest::Client,
}

impl RemoteTemplates {
    /// Create a new provider with a custom user agent
    pub fn new(base_url: Url, org: &str, branch: &str, user_agent: &str) -> Self {
        Self {
            base_url,
            org: org.to_string(),
            branch: branch.to_string(),
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Create a provider whose download host can be overridden by `env_var`
    pub fn from_env(env_var: &str, org: &str, branch: &str, user_agent: &str) -> Result<Self> {
        let url_str =
            std::env::var(env_var).unwrap_or_else(|_| DEFAULT_DOWNLOAD_URL.to_string());
        let url =
            Url::parse(&url_str).with_context(|| format!("Invalid download URL: {}", url_str))?;
        Ok(Self::new(url, org, branch, user_agent))
    }

    /// Build a URL by appending path segments, preserving query parameters
    fn build_url(base: &Url, segments: &[&str]) -> Result<Url> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("URL cannot have path segments: {}", base))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Archive URL for a template: `<base>/<org>/template-<id>/zip/refs/heads/<branch>`
    pub fn archive_url(&self, template_id: &str) -> Result<Url> {
        let repo = template_dir_name(template_id);
        Self::build_url(
            &self.base_url,
            &[
                self.org.as_str(),
                repo.as_str(),
                "zip",
                "refs",
                "heads",
                self.branch.as_str(),
            ],
        )
    }

    async fn download(&self, url: &Url, what: &str) -> Result<Vec<u8>> {
        let failed = |reason: String| ScaffoldError::Download {
            what: what.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| failed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(failed(format!("HTTP {} from {}", response.status(), url)).into());
        }

        let bytes = response.bytes().await.map_err(|e| failed(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    /// Download a JSON catalog of frameworks
    pub async fn fetch_catalog(&self, url: &Url) -> Result<Catalog> {
        let bytes = self.download(url, "template catalog").await?;
        let json = String::from_utf8(bytes).context("Template catalog is not valid UTF-8")?;
        Catalog::from_json(&json)
    }

    /// Extract a repository archive into `target`
    ///
    /// The top-level `package.json` is not written; it is returned parsed instead.
    pub fn extract_archive(bytes: &[u8], target: &Path) -> Result<PackageManifest> {
        let mut archive =
            ZipArchive::new(Cursor::new(bytes)).context("Failed to read template archive")?;
        let mut entries = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let file = archive.by_index(i)?;
            let enclosed = file
                .enclosed_name()
                .ok_or_else(|| anyhow::anyhow!("Unsafe path in archive: {}", file.name()))?;
            entries.push(normal_path(&enclosed));
        }
        let root = archive_root(&entries);
        let mut manifest: Option<PackageManifest> = None;

        for (i, entry) in entries.iter().enumerate() {
            let mut file = archive.by_index(i)?;

            let relative = match &root {
                Some(root) => entry.strip_prefix(root).unwrap_or(entry.as_path()).to_path_buf(),
                None => entry.clone(),
            };
            if relative.as_os_str().is_empty() {
                continue;
            }

            let is_top_level = relative.components().count() == 1;
            let relative = if is_top_level {
                PathBuf::from(target_file_name(&relative.to_string_lossy()))
            } else {
                relative
            };
            let target_path = target.join(&relative);

            if file.is_dir() {
                std::fs::create_dir_all(&target_path).with_context(|| {
                    format!("Failed to create directory: {}", target_path.display())
                })?;
                continue;
            }

            let mut contents = Vec::new();
            file.read_to_end(&mut contents)?;

            if is_top_level && relative == Path::new(MANIFEST_FILE) {
                manifest = Some(PackageManifest::parse(&contents)?);
                continue;
            }

            if let Some(parent) = target_path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
            std::fs::write(&target_path, &contents)
                .with_context(|| format!("Failed to write file: {}", target_path.display()))?;
        }

        manifest.ok_or_else(|| anyhow::anyhow!("Template archive is missing {}", MANIFEST_FILE))
    }
}

/// `path` reduced to its normal components
fn normal_path(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .collect()
}

/// Folder shared by every entry of an archive, e.g. `<repo>-<branch>/`
///
/// `None` when some file sits at the archive root or entries disagree on the
/// first component; such archives are extracted as they are.
fn archive_root(entries: &[PathBuf]) -> Option<PathBuf> {
    let mut root: Option<&OsStr> = None;
    for entry in entries.iter().filter(|e| !e.as_os_str().is_empty()) {
        let mut components = entry.components();
        let first = components.next()?.as_os_str();
        if root.is_some_and(|r| r != first) {
            return None;
        }
        root = Some(first);
    }
    let root = PathBuf::from(root?);
    // A lone top-level file is content, not a wrapping folder
    entries
        .iter()
        .any(|e| e.components().count() > 1)
        .then_some(root)
}

impl TemplateProvider for RemoteTemplates {
    fn describe(&self) -> String {
        format!("{} repositories on {}", self.org, self.base_url)
    }

    fn labels(&self) -> TaskLabels {
        TaskLabels {
            start: "Downloading template...",
            success: "Download complete",
            failure: "Download failed",
        }
    }

    async fn materialize(&self, template_id: &str, target: &Path) -> Result<PackageManifest> {
        let url = self.archive_url(template_id)?;
        let what = format!("template '{}'", template_id);
        let bytes = self.download(&url, &what).await?;
        Self::extract_archive(&bytes, target)
            .with_context(|| format!("Failed to extract template '{}'", template_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn build_archive(entries: &[(&str, &str)]) -> Vec<u8> {
        build_archive_under(Some("template-typescript-master"), entries)
    }

    fn build_archive_under(folder: Option<&str>, entries: &[(&str, &str)]) -> Vec<u8> {
        let mut buffer = Vec::new();
        {
            let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
            let options = SimpleFileOptions::default();
            if let Some(folder) = folder {
                zip.add_directory(format!("{}/", folder), options).unwrap();
            }
            for (path, contents) in entries {
                let name = match folder {
                    Some(folder) => format!("{}/{}", folder, path),
                    None => path.to_string(),
                };
                zip.start_file(name, options).unwrap();
                zip.write_all(contents.as_bytes()).unwrap();
            }
            zip.finish().unwrap();
        }
        buffer
    }

    fn provider(base: &str) -> RemoteTemplates {
        RemoteTemplates::new(Url::parse(base).unwrap(), "fazba", "master", "scaffold-core-test")
    }

    #[test]
    fn test_archive_url() {
        let url = provider(DEFAULT_DOWNLOAD_URL).archive_url("vue3.2-ts").unwrap();
        assert_eq!(
            url.as_str(),
            "https://codeload.github.com/fazba/template-vue3.2-ts/zip/refs/heads/master"
        );
    }

    #[test]
    fn test_archive_url_keeps_base_path_and_query() {
        let url = provider("https://mirror.example.com/gh/?token=abc")
            .archive_url("echarts")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://mirror.example.com/gh/fazba/template-echarts/zip/refs/heads/master?token=abc"
        );
    }

    #[test]
    fn test_extract_archive_strips_prefix_and_keeps_manifest_aside() {
        let temp = TempDir::new().unwrap();
        let bytes = build_archive(&[
            ("package.json", r#"{ "name": "template-typescript" }"#),
            ("_gitignore", "dist\n"),
            ("index.html", "<html></html>"),
            ("src/main.ts", "export {}\n"),
            ("src/package.json", "{}"),
        ]);

        let manifest = RemoteTemplates::extract_archive(&bytes, temp.path()).unwrap();

        assert_eq!(manifest.name(), Some("template-typescript"));
        assert!(!temp.path().join(MANIFEST_FILE).exists());
        assert!(temp.path().join(".gitignore").exists());
        assert!(temp.path().join("index.html").exists());
        assert_eq!(
            std::fs::read_to_string(temp.path().join("src/main.ts")).unwrap(),
            "export {}\n"
        );
        // Only the top-level manifest is special
        assert!(temp.path().join("src/package.json").exists());
    }

    #[test]
    fn test_extract_archive_requires_manifest() {
        let temp = TempDir::new().unwrap();
        let bytes = build_archive(&[("index.html", "<html></html>")]);
        assert!(RemoteTemplates::extract_archive(&bytes, temp.path()).is_err());
    }

    #[test]
    fn test_extract_flat_archive_keeps_top_level_files() {
        let temp = TempDir::new().unwrap();
        let bytes = build_archive_under(
            None,
            &[
                ("package.json", r#"{ "name": "template-echarts" }"#),
                ("_gitignore", "dist\n"),
                ("src/main.js", "console.log(1)\n"),
            ],
        );

        let manifest = RemoteTemplates::extract_archive(&bytes, temp.path()).unwrap();

        assert_eq!(manifest.name(), Some("template-echarts"));
        assert!(temp.path().join(".gitignore").is_file());
        assert!(temp.path().join("src/main.js").is_file());
        assert!(!temp.path().join("main.js").exists());
    }

    #[test]
    fn test_archive_root_detection() {
        let paths = |names: &[&str]| names.iter().map(PathBuf::from).collect::<Vec<_>>();

        assert_eq!(
            archive_root(&paths(&["repo-master", "repo-master/package.json", "repo-master/src/a.js"])),
            Some(PathBuf::from("repo-master"))
        );
        assert_eq!(archive_root(&paths(&["package.json", "src/a.js"])), None);
        assert_eq!(archive_root(&paths(&["package.json"])), None);
        assert_eq!(archive_root(&paths(&["src/a.js", "lib/b.js"])), None);
    }

    #[test]
    fn test_extract_rejects_garbage() {
        let temp = TempDir::new().unwrap();
        assert!(RemoteTemplates::extract_archive(b"not a zip", temp.path()).is_err());
    }

    #[tokio::test]
    async fn test_download_failure_is_typed() {
        // Port 9 (discard) on localhost is expected to refuse connections
        let remote = provider("http://127.0.0.1:9");
        let temp = TempDir::new().unwrap();
        let err = remote.materialize("typescript", temp.path()).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScaffoldError>(),
            Some(ScaffoldError::Download { .. })
        ));
    }
}
