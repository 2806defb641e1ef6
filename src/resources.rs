//! Resource loading.
//!
//! The view tree never touches the filesystem; a [`ResourceLoader`] supplied by the host resolves
//! paths to bytes and decoded image handles.

use crate::drawable::ImageDrawable;
use crate::error::{Error, Result};
use cgmath::Vector2;
use core::fmt;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// A decoded image handle.
///
/// `data` is opaque to the view tree; only the host canvas interprets it.
#[derive(Clone, PartialEq)]
pub struct Image {
    /// Identifies the image; usually the path it was loaded from.
    pub key: String,
    pub width: f64,
    pub height: f64,
    pub data: Arc<[u8]>,
}

impl Image {
    pub fn size(&self) -> Vector2<f64> {
        Vector2::new(self.width, self.height)
    }
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Image")
            .field("key", &self.key)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("data", &format_args!("[{} bytes]", self.data.len()))
            .finish()
    }
}

/// Resolves resource paths. Implemented by the host.
pub trait ResourceLoader: fmt::Debug + Send + Sync {
    /// Returns the raw bytes at `path`, or `None` if there is no such resource.
    fn load_bytes(&self, path: &str) -> Option<Vec<u8>>;

    /// Returns the decoded image at `path`, or `None` if there is no such image.
    fn load_image(&self, path: &str) -> Option<Image>;
}

/// Resource access with an image cache.
#[derive(Debug)]
pub struct Resources {
    loader: Box<dyn ResourceLoader>,
    images: Mutex<HashMap<String, Arc<Image>>>,
}

impl Resources {
    pub fn new(loader: Box<dyn ResourceLoader>) -> Resources {
        Resources {
            loader,
            images: Mutex::new(HashMap::new()),
        }
    }

    /// Loads raw bytes.
    pub fn bytes(&self, path: &str) -> Result<Vec<u8>> {
        self.loader
            .load_bytes(path)
            .ok_or_else(|| Error::ResourceNotFound(path.to_string()))
    }

    /// Loads a UTF-8 text resource.
    pub fn string(&self, path: &str) -> Result<String> {
        let bytes = self.bytes(path)?;
        String::from_utf8(bytes)
            .map_err(|err| Error::Configuration(format!("{} is not valid UTF-8: {}", path, err)))
    }

    /// Loads an image, reusing a cached handle if the path was loaded before.
    pub fn image(&self, path: &str) -> Result<Arc<Image>> {
        if let Some(image) = self.images.lock().get(path) {
            return Ok(Arc::clone(image));
        }

        let image = self
            .loader
            .load_image(path)
            .map(Arc::new)
            .ok_or_else(|| Error::ResourceNotFound(path.to_string()))?;
        tracing::debug!(path, width = image.width, height = image.height, "loaded image");
        self.images
            .lock()
            .insert(path.to_string(), Arc::clone(&image));
        Ok(image)
    }

    /// Loads an image and wraps it in a drawable.
    pub fn drawable(&self, path: &str) -> Result<ImageDrawable> {
        self.image(path).map(ImageDrawable::new)
    }

    /// Drops all cached image handles.
    pub fn clear_cache(&self) {
        self.images.lock().clear();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// In-memory loader for tests.
    #[derive(Debug, Default)]
    pub(crate) struct MemoryLoader {
        pub files: HashMap<String, Vec<u8>>,
        pub images: HashMap<String, (f64, f64)>,
    }

    impl ResourceLoader for MemoryLoader {
        fn load_bytes(&self, path: &str) -> Option<Vec<u8>> {
            self.files.get(path).cloned()
        }

        fn load_image(&self, path: &str) -> Option<Image> {
            self.images.get(path).map(|&(width, height)| Image {
                key: path.to_string(),
                width,
                height,
                data: Arc::from(Vec::new()),
            })
        }
    }

    pub(crate) fn test_image(key: &str, width: f64, height: f64) -> Arc<Image> {
        Arc::new(Image {
            key: key.to_string(),
            width,
            height,
            data: Arc::from(vec![0u8; 4]),
        })
    }

    #[test]
    fn missing_resources_are_errors() {
        let resources = Resources::new(Box::new(MemoryLoader::default()));
        assert_eq!(
            resources.image("logo.png"),
            Err(Error::ResourceNotFound("logo.png".to_string()))
        );
        assert_eq!(
            resources.bytes("strings.txt"),
            Err(Error::ResourceNotFound("strings.txt".to_string()))
        );
    }

    #[test]
    fn images_are_cached() {
        let mut loader = MemoryLoader::default();
        loader.images.insert("logo.png".to_string(), (32., 16.));
        let resources = Resources::new(Box::new(loader));

        let a = resources.image("logo.png").unwrap();
        let b = resources.image("logo.png").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.size(), Vector2::new(32., 16.));
    }

    #[test]
    fn strings_decode_utf8() {
        let mut loader = MemoryLoader::default();
        loader
            .files
            .insert("title.txt".to_string(), "Hello Material".as_bytes().to_vec());
        loader.files.insert("bad.txt".to_string(), vec![0xff, 0xfe]);
        let resources = Resources::new(Box::new(loader));

        assert_eq!(resources.string("title.txt").unwrap(), "Hello Material");
        assert!(matches!(
            resources.string("bad.txt"),
            Err(Error::Configuration(_))
        ));
    }
}
