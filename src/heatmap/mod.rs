//! Portable heatmap sourcing: shared-store read, file-existence check,
//! bitmap decode. Both platform widget adapters go through this one path,
//! so the data sourcing logic cannot drift between platforms.

pub mod decode;

pub use decode::{Bitmap, BitmapDecoder, FileDecoder};

use crate::constants::HEATMAP_IMAGE_KEY;
use crate::store::StoreReader;
use log::debug;
use std::path::Path;

/// Load the currently published heatmap bitmap.
///
/// Missing store entry, dangling path, and undecodable file all degrade to
/// `None` - expected steady states (e.g. before the host app has computed a
/// heatmap), never errors. The existence check gates the decode: a path that
/// does not resolve to a file is skipped without touching the decoder.
pub fn load_current(store: &dyn StoreReader, decoder: &dyn BitmapDecoder) -> Option<Bitmap> {
    let path = store.get(HEATMAP_IMAGE_KEY)?;
    let file = Path::new(&path);
    if !file.exists() {
        debug!("heatmap image '{path}' not on disk yet, leaving slot unset");
        return None;
    }

    match decoder.decode(file) {
        Ok(bitmap) => Some(bitmap),
        Err(e) => {
            debug!("heatmap image '{path}' failed to decode, leaving slot unset: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ImageError;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::tempdir;

    use crate::test_utils::{write_garbage_file, write_test_png};

    struct MapStore(HashMap<String, String>);

    impl MapStore {
        fn empty() -> Self {
            Self(HashMap::new())
        }

        fn with(key: &str, value: &str) -> Self {
            let mut map = HashMap::new();
            map.insert(key.to_string(), value.to_string());
            Self(map)
        }
    }

    impl StoreReader for MapStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.get(key).cloned()
        }
    }

    /// Wraps the real decoder and counts invocations.
    #[derive(Default)]
    struct CountingDecoder {
        calls: AtomicUsize,
    }

    impl CountingDecoder {
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl BitmapDecoder for CountingDecoder {
        fn decode(&self, path: &Path) -> Result<Bitmap, ImageError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            FileDecoder.decode(path)
        }
    }

    #[test]
    fn test_missing_entry_skips_decode() {
        let decoder = CountingDecoder::default();
        let result = load_current(&MapStore::empty(), &decoder);

        assert!(result.is_none());
        assert_eq!(decoder.calls(), 0);
    }

    #[test]
    fn test_dangling_path_skips_decode() {
        let decoder = CountingDecoder::default();
        let store = MapStore::with(HEATMAP_IMAGE_KEY, "/data/missing.png");

        let result = load_current(&store, &decoder);

        assert!(result.is_none());
        assert_eq!(decoder.calls(), 0, "existence check must gate the decode");
    }

    #[test]
    fn test_undecodable_file_degrades_to_none() {
        let dir = tempdir().unwrap();
        let garbage = write_garbage_file(dir.path(), "heatmap.png");
        let decoder = CountingDecoder::default();
        let store = MapStore::with(HEATMAP_IMAGE_KEY, &garbage.to_string_lossy());

        let result = load_current(&store, &decoder);

        assert!(result.is_none());
        assert_eq!(decoder.calls(), 1);
    }

    #[test]
    fn test_valid_image_loads() {
        let dir = tempdir().unwrap();
        let png = write_test_png(dir.path(), "heatmap.png");
        let store = MapStore::with(HEATMAP_IMAGE_KEY, &png.to_string_lossy());

        let bitmap = load_current(&store, &FileDecoder).unwrap();

        assert_eq!((bitmap.width, bitmap.height), (4, 3));
        assert_eq!(bitmap, FileDecoder.decode(&png).unwrap());
    }
}
