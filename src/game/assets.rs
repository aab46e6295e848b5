//! Asset pools, keys, and image path resolution
//!
//! Maintains:
//! - Pool tags (REAL / FAKE) and stable per-session asset keys
//! - Key-to-path resolution under a fixed asset root
//! - Neutral-name staging so file names do not reveal the answer

use std::error::Error;
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Which pool an asset belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PoolTag {
    /// Real photograph
    Real,
    /// AI-generated image
    Fake,
}

impl PoolTag {
    /// Single-letter key prefix ("R" / "F")
    pub fn prefix(self) -> &'static str {
        match self {
            PoolTag::Real => "R",
            PoolTag::Fake => "F",
        }
    }

    /// Directory name under the asset root
    pub fn dir_name(self) -> &'static str {
        match self {
            PoolTag::Real => "REAL",
            PoolTag::Fake => "FAKE",
        }
    }
}

/// Stable identifier of one asset: pool tag + 1-based index.
///
/// Used to prevent the same image being shown twice in a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AssetKey {
    pub tag: PoolTag,
    pub index: u32,
}

impl AssetKey {
    pub fn new(tag: PoolTag, index: u32) -> Self {
        AssetKey { tag, index }
    }

    /// Whether this key points into the REAL pool
    pub fn is_real(self) -> bool {
        self.tag == PoolTag::Real
    }
}

impl fmt::Display for AssetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.tag.prefix(), self.index)
    }
}

/// Resolves asset keys to image files under a fixed root directory.
#[derive(Clone, Debug)]
pub struct AssetCatalog {
    root: PathBuf,
}

impl AssetCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        AssetCatalog { root: root.into() }
    }

    /// Resolve a key to its image path, e.g. `image/REAL/R_3.jpg`
    pub fn resolve(&self, key: AssetKey) -> PathBuf {
        self.root
            .join(key.tag.dir_name())
            .join(format!("{}.jpg", key))
    }

    /// Copy the round's pair to neutrally named files (`left.jpg` /
    /// `right.jpg`) in a temp directory, so the on-disk names cannot
    /// spoil which image is real.
    pub fn stage_pair(&self, pair: &[AssetKey; 2]) -> Result<[PathBuf; 2], Box<dyn Error>> {
        let stage_dir = std::env::temp_dir().join("real-or-ai");
        fs::create_dir_all(&stage_dir)?;

        let names = ["left.jpg", "right.jpg"];
        let mut staged = [PathBuf::new(), PathBuf::new()];
        for (i, &key) in pair.iter().enumerate() {
            let source = self.resolve(key);
            let target = stage_dir.join(names[i]);
            fs::copy(&source, &target)
                .map_err(|e| format!("cannot stage {}: {}", source.display(), e))?;
            staged[i] = target;
        }
        Ok(staged)
    }
}
