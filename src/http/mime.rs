use std::path::Path;

/// Content types the server can announce.
///
/// Anything that is not a recognised image is served as HTML.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Html,
    Png,
    Gif,
    Jpeg,
}

impl ContentType {
    /// Maps an extension to a content type. The match is exact and
    /// case-sensitive: `PNG` is not `png`.
    ///
    /// ```
    /// # use simple_webserver::http::mime::ContentType;
    /// assert_eq!(ContentType::from_extension("jpg"), ContentType::Jpeg);
    /// assert_eq!(ContentType::from_extension("JPG"), ContentType::Html);
    /// ```
    pub fn from_extension(ext: &str) -> Self {
        match ext {
            "png" => ContentType::Png,
            "gif" => ContentType::Gif,
            "jpg" => ContentType::Jpeg,
            _ => ContentType::Html,
        }
    }

    /// Uses whatever follows the last `.` of the path as the extension.
    /// A path with no `.` gets the HTML fallback.
    pub fn from_path(path: &Path) -> Self {
        let path = path.to_string_lossy();
        match path.rsplit_once('.') {
            Some((_, ext)) => Self::from_extension(ext),
            None => ContentType::Html,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Html => "text/html",
            ContentType::Png => "image/png",
            ContentType::Gif => "image/gif",
            ContentType::Jpeg => "image/jpeg",
        }
    }

    /// HTML bodies go through marker substitution; images are copied as-is.
    pub fn is_templated(&self) -> bool {
        matches!(self, ContentType::Html)
    }
}
