//! Session identity and artifact locations
//!
//! A session is one crawl's full state, keyed by its seed page (plus the
//! target page in directed mode). Re-running with the same key opens the
//! same database and resumes from the persisted frontier, visited set, and
//! graph rather than restarting.

use crate::page::PageId;
use std::path::{Path, PathBuf};

/// One crawl session: seed (+ optional target) anchored in a data directory
#[derive(Debug, Clone)]
pub struct Session {
    seed: PageId,
    target: Option<PageId>,
    data_dir: PathBuf,
}

impl Session {
    /// Creates a session key for a plain crawl
    pub fn plain(seed: PageId, data_dir: &Path) -> Self {
        Self {
            seed,
            target: None,
            data_dir: data_dir.to_path_buf(),
        }
    }

    /// Creates a session key for a target-directed crawl
    pub fn directed(seed: PageId, target: PageId, data_dir: &Path) -> Self {
        Self {
            seed,
            target: Some(target),
            data_dir: data_dir.to_path_buf(),
        }
    }

    pub fn seed(&self) -> &PageId {
        &self.seed
    }

    pub fn target(&self) -> Option<&PageId> {
        self.target.as_ref()
    }

    /// Filesystem-safe slug naming this session's artifacts
    ///
    /// `Minecraft` for a plain crawl, `Minecraft_to_Redstone` for a
    /// directed one. Page segments already avoid path separators, but `%`
    /// escapes are folded so artifact names stay shell-friendly.
    pub fn slug(&self) -> String {
        let raw = match &self.target {
            Some(target) => format!("{}_to_{}", self.seed, target),
            None => self.seed.to_string(),
        };
        raw.replace('%', "")
    }

    /// Path of this session's database
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.db", self.slug()))
    }

    /// Stem the exporter appends `_nodes.csv` / `_edges.csv` to
    pub fn export_stem(&self) -> PathBuf {
        self.data_dir.join(self.slug())
    }
}
