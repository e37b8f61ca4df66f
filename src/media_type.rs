/// File extensions the gateway accepts for upload.
///
/// Matching is case-sensitive: `.PNG` is rejected. Objects uploaded before
/// this rule existed may still carry other extensions; the check only gates
/// new uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaExtension {
    Png,
    Jpg,
    Jpeg,
    Gif,
    Mp4,
}

impl MediaExtension {
    /// All accepted extensions.
    pub const ALL: [MediaExtension; 5] = [
        MediaExtension::Png,
        MediaExtension::Jpg,
        MediaExtension::Jpeg,
        MediaExtension::Gif,
        MediaExtension::Mp4,
    ];

    /// The extension including the leading dot.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaExtension::Png => ".png",
            MediaExtension::Jpg => ".jpg",
            MediaExtension::Jpeg => ".jpeg",
            MediaExtension::Gif => ".gif",
            MediaExtension::Mp4 => ".mp4",
        }
    }

    /// Check a filename's suffix against the allow-list.
    ///
    /// Returns `None` when the filename has no extension or one that is not
    /// accepted. Pure function, no side effects.
    pub fn from_filename(filename: &str) -> Option<MediaExtension> {
        Self::ALL
            .into_iter()
            .find(|ext| filename.ends_with(ext.as_str()))
    }
}

/// Extract the extension (including the dot) from a filename.
///
/// Returns the suffix after the last dot, or an empty string when the
/// filename has none.
pub fn file_extension(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(idx) => &filename[idx..],
        None => "",
    }
}
