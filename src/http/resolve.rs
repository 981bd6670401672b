use std::path::PathBuf;

use tokio::fs;
use tracing::{debug, warn};

use crate::config::Config;
use crate::http::mime::ContentType;

/// A regular file inside the document root, ready to be served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedResource {
    /// Canonical location of the file
    pub path: PathBuf,
    pub content_type: ContentType,
}

/// Outcome of resolving a request target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    Found(ResolvedResource),
    NotFound,
}

/// Maps request targets onto files below a fixed directory.
#[derive(Debug, Clone)]
pub struct DocumentRoot {
    root: PathBuf,
    default_document: PathBuf,
}

impl DocumentRoot {
    pub fn new(root: impl Into<PathBuf>, default_document: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            default_document: default_document.into(),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(&cfg.document_root, &cfg.default_document)
    }

    /// Joins the target onto the root without touching the filesystem.
    ///
    /// Query string and fragment are dropped, and `/` becomes the default
    /// document. No normalization happens here; `locate` does the
    /// boundary check.
    pub fn request_path(&self, target: &str) -> PathBuf {
        let target = target.split(['?', '#']).next().unwrap_or_default();

        if target == "/" {
            return self.root.join(&self.default_document);
        }

        self.root.join(target.trim_start_matches('/'))
    }

    /// Finds the file a target refers to.
    ///
    /// Missing files, anything that is not a regular file, and paths that
    /// canonicalize outside the root all come back as `NotFound`.
    pub async fn locate(&self, target: &str) -> Resource {
        let candidate = self.request_path(target);

        let root = match fs::canonicalize(&self.root).await {
            Ok(root) => root,
            Err(e) => {
                warn!(root = %self.root.display(), error = %e, "Document root is not accessible");
                return Resource::NotFound;
            }
        };

        let path = match fs::canonicalize(&candidate).await {
            Ok(path) => path,
            Err(_) => {
                debug!(path = %candidate.display(), "No such file");
                return Resource::NotFound;
            }
        };

        if !path.starts_with(&root) {
            warn!(
                request_target = target,
                path = %path.display(),
                "Request escapes document root"
            );
            return Resource::NotFound;
        }

        match fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Resource::Found(ResolvedResource {
                content_type: ContentType::from_path(&candidate),
                path,
            }),
            _ => {
                debug!(path = %path.display(), "Not a regular file");
                Resource::NotFound
            }
        }
    }
}
