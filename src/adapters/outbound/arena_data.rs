use crate::common::{DomainError, DomainResult};
use crate::domains::arena::{ArenaSegments, ArenaSource};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Reads arena layouts from `<base>/arenas/<name>`, each a JSON array of
/// `[x1, y1, x2, y2]` arrays.
pub struct FilesystemArenaSource {
    base: PathBuf,
}

impl FilesystemArenaSource {
    /// Base directory: `base` if given, else `PURSUIT_DATA_DIR`, else
    /// `./resources` when present, else `/usr/share/pursuit-app`.
    pub fn new(base: Option<PathBuf>) -> Self {
        let base = base.unwrap_or_else(|| {
            if let Ok(v) = env::var("PURSUIT_DATA_DIR") {
                PathBuf::from(v)
            } else {
                let cwd_default = Path::new("resources");
                if cwd_default.exists() {
                    cwd_default.to_path_buf()
                } else {
                    PathBuf::from("/usr/share/pursuit-app")
                }
            }
        });
        Self { base }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    fn arenas_dir(&self) -> PathBuf {
        self.base.join("arenas")
    }
}

fn io_error(path: &Path, e: std::io::Error) -> DomainError {
    DomainError::InfrastructureError(format!("{}: {}", path.display(), e))
}

impl ArenaSource for FilesystemArenaSource {
    fn load_segments(&self, name: &str) -> DomainResult<ArenaSegments> {
        let path = self.arenas_dir().join(name);
        let raw = fs::read_to_string(&path).map_err(|e| io_error(&path, e))?;
        let segments: ArenaSegments = serde_json::from_str(&raw)?;
        tracing::debug!(arena = name, walls = segments.0.len(), "arena loaded");
        Ok(segments)
    }

    fn list_arenas(&self) -> DomainResult<Vec<String>> {
        let dir = self.arenas_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&dir).map_err(|e| io_error(&dir, e))? {
            let path = entry.map_err(|e| io_error(&dir, e))?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}
