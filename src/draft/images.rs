use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use crate::errors::FileError;
use crate::models::ImageEntry;

/// Default attachment size ceiling, 5 MB.
pub const DEFAULT_MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// An image file picked by the operator, prior to any checks.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub file_name: String,
    /// Declared media type, when the picker supplied one.
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Direction for [`ImageCollection::move_entry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// Ordered gallery of a draft product.
///
/// Maintains the single-primary invariant: exactly one entry has
/// `is_primary = true` whenever the collection is non-empty, none when it is
/// empty. All operations are synchronous transformations; nothing here does
/// I/O.
#[derive(Debug, Clone, Default)]
pub struct ImageCollection {
    entries: Vec<ImageEntry>,
    max_bytes: Option<u64>,
}

impl ImageCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing product's gallery (populate-for-edit path).
    pub fn from_entries(entries: Vec<ImageEntry>) -> Self {
        Self {
            entries,
            max_bytes: None,
        }
    }

    /// Override the size ceiling (configuration hook; defaults to 5 MB).
    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = Some(max_bytes);
        self
    }

    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<ImageEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Attach a picked file. Rejects files over the size ceiling or with a
    /// non-image media type; neither rejection touches already-added
    /// entries. The first entry added to an empty collection becomes
    /// primary.
    pub fn add(&mut self, file: ImageFile, product_name: &str) -> Result<(), FileError> {
        let max_bytes = self.max_bytes.unwrap_or(DEFAULT_MAX_IMAGE_BYTES);
        if file.bytes.len() as u64 > max_bytes {
            return Err(FileError::TooLarge {
                max_mb: max_bytes / (1024 * 1024),
            });
        }
        if !is_image_type(&file) {
            return Err(FileError::NotAnImage(file.file_name));
        }

        let was_empty = self.entries.is_empty();
        let alt_text = default_alt_text(product_name, self.entries.len());
        self.entries.push(ImageEntry {
            data: BASE64.encode(&file.bytes),
            alt_text,
            is_primary: was_empty,
            is_active: true,
        });
        Ok(())
    }

    /// Remove the entry at `index`. When the removed entry was primary and
    /// entries remain, the entry now at position 0 is promoted, restoring
    /// the single-primary invariant.
    pub fn remove(&mut self, index: usize) {
        if index >= self.entries.len() {
            return;
        }
        let removed = self.entries.remove(index);
        if removed.is_primary {
            if let Some(first) = self.entries.first_mut() {
                first.is_primary = true;
            }
        }
    }

    /// Make `index` the sole primary entry. Rebuilds the flag exclusively
    /// rather than toggling, so the call is idempotent.
    pub fn set_primary(&mut self, index: usize) {
        if index >= self.entries.len() {
            return;
        }
        for (i, entry) in self.entries.iter_mut().enumerate() {
            entry.is_primary = i == index;
        }
    }

    /// Swap the entry at `index` with its neighbor. No-op at the boundary:
    /// the first entry cannot move up, the last cannot move down.
    pub fn move_entry(&mut self, index: usize, direction: MoveDirection) {
        if index >= self.entries.len() {
            return;
        }
        match direction {
            MoveDirection::Up if index > 0 => self.entries.swap(index, index - 1),
            MoveDirection::Down if index + 1 < self.entries.len() => {
                self.entries.swap(index, index + 1)
            }
            _ => {}
        }
    }

    pub fn set_alt_text(&mut self, index: usize, text: impl Into<String>) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.alt_text = text.into();
        }
    }
}

fn default_alt_text(product_name: &str, position: usize) -> String {
    let name = product_name.trim();
    if name.is_empty() {
        format!("Product image {}", position + 1)
    } else {
        format!("{} image {}", name, position + 1)
    }
}

/// Declared content type wins; fall back to a guess by file extension.
fn is_image_type(file: &ImageFile) -> bool {
    if let Some(declared) = file.content_type.as_deref() {
        if !declared.is_empty() {
            return declared.starts_with("image/");
        }
    }
    mime_guess::from_path(&file.file_name)
        .first()
        .map(|mime| mime.type_() == mime_guess::mime::IMAGE)
        .unwrap_or(false)
}
