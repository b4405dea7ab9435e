use crate::scheduler::WorkloadSnapshot;
use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub trait Storage {
    /// Vrai si un état a déjà été sauvegardé.
    fn exists(&self) -> bool;
    /// Charge les compteurs depuis un support.
    fn load(&self) -> anyhow::Result<WorkloadSnapshot>;
    /// Sauvegarde de manière atomique.
    fn save(&self, snapshot: &WorkloadSnapshot) -> anyhow::Result<()>;
}

pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self { path: path.as_ref().to_path_buf() })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for JsonStorage {
    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn load(&self) -> anyhow::Result<WorkloadSnapshot> {
        let data = fs::read(&self.path).with_context(|| format!("reading {}", self.path.display()))?;
        let snapshot: WorkloadSnapshot = serde_json::from_slice(&data)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(snapshot)
    }

    fn save(&self, snapshot: &WorkloadSnapshot) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(snapshot)?;
        let parent = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(parent).with_context(|| "creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        Ok(())
    }
}
