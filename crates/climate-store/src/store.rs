//! Process-wide dataset handle cache.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use hazard_common::{HazardError, HazardResult};

use crate::dataset::GridDataset;

/// Memoizes open dataset handles per resolved path.
///
/// Opening an archive file costs a full coordinate decode, so each path
/// is opened at most once per process and the handle lives until exit;
/// there is no eviction. Concurrent first opens of the same path may
/// both do the work, with last-writer-wins on the map entry; every
/// caller still receives a valid handle.
#[derive(Default)]
pub struct DatasetStore {
    handles: RwLock<HashMap<PathBuf, Arc<GridDataset>>>,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open (or reuse) the dataset at `path`.
    ///
    /// A missing file is `DatasetNotFound`, surfaced to the caller with
    /// the resolved path; only the scenario comparator recovers from it.
    pub fn open(&self, path: &Path) -> HazardResult<Arc<GridDataset>> {
        if let Some(handle) = self.handles.read().expect("handle cache poisoned").get(path) {
            return Ok(Arc::clone(handle));
        }

        if !path.exists() {
            return Err(HazardError::DatasetNotFound {
                path: path.to_path_buf(),
            });
        }

        let handle = Arc::new(GridDataset::open(path)?);
        self.handles
            .write()
            .expect("handle cache poisoned")
            .insert(path.to_path_buf(), Arc::clone(&handle));
        tracing::info!(path = %path.display(), "dataset handle cached");
        Ok(handle)
    }

    /// Number of cached handles.
    pub fn len(&self) -> usize {
        self.handles.read().expect("handle cache poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop a cached handle, forcing the next open to re-read the file.
    pub fn invalidate(&self, path: &Path) {
        self.handles
            .write()
            .expect("handle cache poisoned")
            .remove(path);
    }
}
