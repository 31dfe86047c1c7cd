use std::path::Path;

/// Describes an image that was written by the upload side-channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub filename: String,
}

impl ImageUpload {
    /// Build a descriptor from the client's original filename.
    ///
    /// Only the final path component is kept, so an upload can never land
    /// outside the image directory. Identical names map to the same file.
    pub fn from_original_name(original: &str) -> Option<Self> {
        let name = Path::new(original.trim()).file_name()?.to_str()?;
        if name.is_empty() || name == "." || name == ".." {
            return None;
        }
        Some(Self {
            filename: name.to_string(),
        })
    }
}

/// Derive the stored `img_name` for an upload, if there was one.
pub fn resolve_image(prefix: &str, upload: Option<&ImageUpload>) -> Option<String> {
    upload.map(|u| format!("{}/{}", prefix.trim_end_matches('/'), u.filename))
}
