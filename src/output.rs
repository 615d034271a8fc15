use chrono::{Local, NaiveDate};
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

use crate::error::{Result, TranslationError};

/// The directory holding one run's translated tree.
#[derive(Debug, Clone)]
pub struct RunDirectory {
    name: String,
    path: PathBuf,
}

impl RunDirectory {
    /// Create the run directory under `output_root`.
    ///
    /// An explicit `name` is used as-is; re-using it overwrites files from the
    /// earlier run. Without one, the directory is named after today's date and
    /// suffixed with a counter if that name is taken.
    pub async fn create<P: AsRef<Path>>(output_root: P, name: Option<&str>) -> Result<Self> {
        let output_root = output_root.as_ref();
        fs::create_dir_all(output_root).await?;

        let name = match name {
            Some(name) => {
                validate_run_name(name)?;
                name.to_string()
            }
            None => next_free_name(output_root, Local::now().date_naive()),
        };

        let path = output_root.join(&name);
        fs::create_dir_all(&path).await?;
        info!("Output will be saved to: {}", path.display());

        Ok(Self { name, path })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where `relative` lands inside the run directory.
    pub fn target_path(&self, relative: &Path) -> Result<PathBuf> {
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes || relative.as_os_str().is_empty() {
            return Err(TranslationError::InvalidOutputPath(relative.display().to_string()));
        }
        Ok(self.path.join(relative))
    }

    /// Write `content` at the mirrored location, creating parent directories
    /// and replacing any existing file.
    pub async fn write(&self, relative: &Path, content: &str) -> Result<PathBuf> {
        let target = self.target_path(relative)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&target, content).await?;
        debug!("Saved translated file to {}", target.display());
        Ok(target)
    }
}

/// Default run name: `run_<date>`, then `run_<date>_2`, `run_<date>_3`, ...
pub fn next_free_name(output_root: &Path, date: NaiveDate) -> String {
    let base = format!("run_{}", date.format("%Y-%m-%d"));
    if !output_root.join(&base).exists() {
        return base;
    }
    let mut n = 2u32;
    loop {
        let candidate = format!("{}_{}", base, n);
        if !output_root.join(&candidate).exists() {
            return candidate;
        }
        n += 1;
    }
}

fn validate_run_name(name: &str) -> Result<()> {
    let path = Path::new(name);
    let mut components = path.components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(TranslationError::Config(format!(
            "Output directory name must be a single path segment: '{}'",
            name
        ))),
    }
}
