use serde::Deserialize;
use uuid::Uuid;

use crate::media_type::file_extension;

/// How a storage key is derived from the caller-supplied filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NamingStrategy {
    /// Random identifier plus the original extension. Repeated uploads of
    /// the same filename never collide.
    #[default]
    GenerateUniqueName,
    /// Reuse the caller-supplied filename verbatim. A second upload of the
    /// same name overwrites the first.
    PreserveFilename,
}

/// Derive the storage key for an incoming upload.
///
/// In unique mode the key is a fresh UUIDv4 concatenated with the original
/// extension, so two calls with the same filename produce different keys.
pub fn object_key(strategy: NamingStrategy, filename: &str) -> String {
    match strategy {
        NamingStrategy::GenerateUniqueName => {
            format!("{}{}", Uuid::new_v4(), file_extension(filename))
        }
        NamingStrategy::PreserveFilename => filename.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_keys_keep_extension() {
        let key = object_key(NamingStrategy::GenerateUniqueName, "photo.png");
        assert!(key.ends_with(".png"));

        let stem = key.strip_suffix(".png").unwrap();
        assert!(Uuid::parse_str(stem).is_ok());
    }

    #[test]
    fn test_unique_keys_differ_for_same_filename() {
        let a = object_key(NamingStrategy::GenerateUniqueName, "photo.png");
        let b = object_key(NamingStrategy::GenerateUniqueName, "photo.png");
        assert_ne!(a, b);
    }

    #[test]
    fn test_unique_key_without_extension() {
        let key = object_key(NamingStrategy::GenerateUniqueName, "rawblob");
        assert!(Uuid::parse_str(&key).is_ok());
    }

    #[test]
    fn test_preserve_filename_passthrough() {
        let key = object_key(NamingStrategy::PreserveFilename, "photo.png");
        assert_eq!(key, "photo.png");
    }

    #[test]
    fn test_default_strategy_is_unique() {
        assert_eq!(NamingStrategy::default(), NamingStrategy::GenerateUniqueName);
    }
}
