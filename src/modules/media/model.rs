use std::{path::PathBuf, str::FromStr};

use crate::modules::media::sanitizer::SafeName;

/// Raw file part received from a client.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl Upload {
    #[cfg(test)]
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self { filename: filename.into(), content_type: None, bytes: bytes.into() }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// File content read back from the storage root.
#[derive(Debug, Clone)]
pub struct StoredAsset {
    pub name: SafeName,
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// What happens when an upload's name is already taken by another file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NamingPolicy {
    /// Keep the client's name and replace whatever is stored under it.
    Overwrite,
    /// Keep the client's name when free, otherwise prefix a fresh UUID.
    #[default]
    Disambiguate,
}

impl FromStr for NamingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overwrite" => Ok(NamingPolicy::Overwrite),
            "disambiguate" => Ok(NamingPolicy::Disambiguate),
            other => Err(format!("unknown asset naming policy '{other}'")),
        }
    }
}

/// Asset upload configuration
#[derive(Debug, Clone)]
pub struct AssetConfig {
    pub upload_dir: PathBuf,
    pub max_file_size: usize,
    pub allowed_mime_types: Vec<String>,
    pub naming: NamingPolicy,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("./uploads"),
            max_file_size: 10 * 1024 * 1024, // 10MB
            allowed_mime_types: vec![
                "image/jpeg".to_string(),
                "image/png".to_string(),
                "image/gif".to_string(),
                "image/webp".to_string(),
                "image/bmp".to_string(),
            ],
            naming: NamingPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn naming_policy_parses_case_insensitively() {
        assert_eq!("Overwrite".parse::<NamingPolicy>(), Ok(NamingPolicy::Overwrite));
        assert_eq!(" disambiguate ".parse::<NamingPolicy>(), Ok(NamingPolicy::Disambiguate));
        assert!("rename".parse::<NamingPolicy>().is_err());
    }
}
