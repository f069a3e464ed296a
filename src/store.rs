//! In-memory inventory backed by a record file.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use time::OffsetDateTime;

use crate::error::StoreError;
use crate::record::{IdSequence, Video};
use crate::record_io::{VideoReader, VideoWriter};

/// Ordered list of videos plus the id generator for new records.
///
/// Records keep insertion order and are not required to be unique.
///
/// ```rust
/// use videostore::store::VideoStore;
///
/// let mut store = VideoStore::new();
/// let mut video = store.create_video();
/// video.set_title("Vertigo");
/// store.add(video);
/// assert_eq!(store.get(0).map(|v| v.id()), Some("V100"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct VideoStore {
    videos: Vec<Video>,
    ids: IdSequence,
}

impl VideoStore {
    /// Empty store whose ids start at `V100`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty store whose ids start at `V<seed>`.
    #[must_use]
    pub fn with_seed(seed: u32) -> Self {
        Self {
            videos: Vec::new(),
            ids: IdSequence::new(seed),
        }
    }

    /// Take the next record id.
    pub fn next_id(&mut self) -> String {
        self.ids.next_id()
    }

    /// A new blank record dated this year. It is not added to the store.
    pub fn create_video(&mut self) -> Video {
        Video::blank(self.next_id(), current_year())
    }

    pub fn add(&mut self, video: Video) {
        self.videos.push(video);
    }

    /// Remove the first record equal to `video`.
    pub fn remove(&mut self, video: &Video) -> Option<Video> {
        let index = self.videos.iter().position(|v| v == video)?;
        Some(self.videos.remove(index))
    }

    pub fn remove_at(&mut self, index: usize) -> Option<Video> {
        (index < self.videos.len()).then(|| self.videos.remove(index))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.videos.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Video> {
        self.videos.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Video> {
        self.videos.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Video> {
        self.videos.iter()
    }

    /// Append every record of the file at `path`; returns how many were read.
    ///
    /// The store is unchanged if any line fails to parse.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<usize, StoreError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => StoreError::NotFound(path.to_path_buf()),
            _ => StoreError::Io(e),
        })?;
        let count = self.read_from(BufReader::new(file))?;
        log::info!("loaded {count} videos from {}", path.display());
        Ok(count)
    }

    /// Replace the file at `path` with every record in the store.
    ///
    /// Records are formatted before the file is touched, so a record that
    /// cannot be written leaves the old file in place.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let path = path.as_ref();
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        fs::write(path, buf)?;
        log::info!("saved {} videos to {}", self.len(), path.display());
        Ok(())
    }

    /// Append every record read from `input`.
    pub fn read_from(&mut self, input: impl BufRead) -> Result<usize, StoreError> {
        let loaded = VideoReader::new(input).collect::<Result<Vec<_>, _>>()?;
        let count = loaded.len();
        self.videos.extend(loaded);
        Ok(count)
    }

    /// Write every record to `output` in store order.
    pub fn write_to(&self, output: impl Write) -> Result<(), StoreError> {
        let mut writer = VideoWriter::new(output);
        for video in &self.videos {
            writer.write_video(video)?;
        }
        writer.flush()
    }
}

impl<'a> IntoIterator for &'a VideoStore {
    type Item = &'a Video;
    type IntoIter = std::slice::Iter<'a, Video>;

    fn into_iter(self) -> Self::IntoIter {
        self.videos.iter()
    }
}

impl Extend<Video> for VideoStore {
    fn extend<I: IntoIterator<Item = Video>>(&mut self, iter: I) {
        self.videos.extend(iter);
    }
}

/// Calendar year in the local time zone, or UTC when the offset is unknown.
fn current_year() -> i32 {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .year()
}
