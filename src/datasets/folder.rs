use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use super::errors::DatasetError;

/// Extensions (lowercase, without the dot) treated as images.
pub const IMAGE_EXTENSIONS: [&str; 20] = [
    "jpeg", "jpg", "png", "bmp", "tiff", "tif", "dib", "jpe", "jp2", "webp", "pbm", "pgm", "ppm",
    "pxm", "pnm", "sr", "ras", "exr", "hdr", "pic",
];

/// Returns true if `path` ends in a recognized image extension, ignoring case.
pub fn is_image<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// A classification dataset laid out as `root/<class>/<image>`.
///
/// ```text
/// root/
/// ├── cat/
/// │   ├── 001.jpg
/// │   └── 002.png
/// └── dog/
///     └── ...
/// ```
///
/// Only immediate subdirectories of the root with UTF-8 names are classes,
/// and only regular files directly inside a class folder with an image
/// extension are samples.
#[derive(Debug, Clone)]
pub struct ImageFolder {
    classes: BTreeMap<String, Vec<PathBuf>>,
}

impl ImageFolder {
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self, DatasetError> {
        let mut classes = BTreeMap::new();
        for dir in list_dir(root.as_ref())? {
            if !dir.is_dir() {
                continue;
            }
            let Some(label) = dir.file_name().and_then(|n| n.to_str()).map(str::to_owned) else {
                tracing::warn!("Skipping class folder with a non UTF-8 name: {}", dir.display());
                continue;
            };
            let mut images: Vec<PathBuf> = list_dir(&dir)?
                .into_iter()
                .filter(|p| p.is_file() && is_image(p))
                .collect();
            images.sort();
            tracing::debug!("Class {label}: {} images", images.len());
            classes.insert(label, images);
        }
        Ok(Self { classes })
    }

    /// Class label to image paths, both sorted.
    pub fn classes(&self) -> &BTreeMap<String, Vec<PathBuf>> {
        &self.classes
    }

    pub fn label_names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    pub fn num_classes(&self) -> usize {
        self.classes.len()
    }

    pub fn len(&self) -> usize {
        self.classes.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn list_dir(dir: &Path) -> Result<Vec<PathBuf>, DatasetError> {
    let read_err = |source| DatasetError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        paths.push(entry.map_err(read_err)?.path());
    }
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_extensions_match_case_insensitively() {
        assert!(is_image("a/b/photo.JPG"));
        assert!(is_image("photo.Tiff"));
        assert!(is_image("scan.jp2"));
        assert!(is_image("raw.HDR"));
    }

    #[test]
    fn non_images_are_rejected() {
        assert!(!is_image("notes.txt"));
        assert!(!is_image("archive.tar.gz"));
        assert!(!is_image("no_extension"));
        assert!(!is_image(".png"));
    }
}
