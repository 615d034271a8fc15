use std::path::PathBuf;
use tokio::fs;
use tracing::{error, info, warn};

use crate::error::Result;
use crate::output::RunDirectory;
use crate::setup::{ModelProvisioner, ModelStore};
use crate::translate::{TargetLanguage, TranslationClient, TranslationProvider};
use crate::walker::{DirectoryWalker, SourceFile};

/// Everything one run needs, resolved from the command line and config.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub output_dir_name: Option<String>,
    pub model: String,
    pub language: String,
    pub pull: bool,
    pub strip_reasoning: bool,
    /// Log directory, kept out of the walk when it lies under the input root
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct FileFailure {
    /// Relative to the input root
    pub path: PathBuf,
    pub error: String,
}

/// Per-file outcomes of a run. Every walked file lands in exactly one list.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub run_dir: PathBuf,
    pub succeeded: Vec<PathBuf>,
    pub failed: Vec<FileFailure>,
}

impl RunReport {
    fn new(run_dir: PathBuf) -> Self {
        Self {
            run_dir,
            succeeded: Vec::new(),
            failed: Vec::new(),
        }
    }

    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn is_failed(&self, path: &std::path::Path) -> bool {
        self.failed.iter().any(|f| f.path == path)
    }

    fn record_success(&mut self, path: PathBuf) {
        self.succeeded.push(path);
    }

    fn record_failure(&mut self, path: PathBuf, error: impl ToString) {
        self.failed.push(FileFailure {
            path,
            error: error.to_string(),
        });
    }

    fn log_summary(&self) {
        info!(
            "Translation complete: {} succeeded, {} failed ({} files)",
            self.succeeded.len(),
            self.failed.len(),
            self.total()
        );
        for failure in &self.failed {
            warn!("  failed: {} ({})", failure.path.display(), failure.error);
        }
    }
}

/// Validate, provision, then translate the whole tree.
///
/// Configuration and provisioning errors are returned before the run
/// directory is created or the input tree is walked. Per-file errors are
/// recorded in the report and never abort the run.
pub async fn execute<S, P>(settings: &RunSettings, store: &S, provider: P) -> Result<RunReport>
where
    S: ModelStore + ?Sized,
    P: TranslationProvider,
{
    let language = TargetLanguage::parse(&settings.language)?;
    let walker = DirectoryWalker::new(&settings.input_dir)?;

    ModelProvisioner::new(store)
        .ensure_model(&settings.model, settings.pull)
        .await?;

    info!(
        "Starting translation for files in '{}' to language '{}' with model '{}'",
        settings.input_dir.display(),
        language,
        settings.model
    );

    let run = RunDirectory::create(&settings.output_dir, settings.output_dir_name.as_deref()).await?;
    info!("Run '{}' started", run.name());
    let mut walker = walker.exclude(run.path());
    if let Some(log_dir) = &settings.log_dir {
        walker = walker.exclude(log_dir);
    }

    let client = TranslationClient::new(provider, settings.model.clone(), language)
        .with_strip_reasoning(settings.strip_reasoning);

    Ok(Workflow::new(client).process(&walker, &run).await)
}

/// The per-file pipeline: read, translate, write, record.
pub struct Workflow<P> {
    client: TranslationClient<P>,
}

impl<P: TranslationProvider> Workflow<P> {
    pub fn new(client: TranslationClient<P>) -> Self {
        Self { client }
    }

    pub async fn process(&self, walker: &DirectoryWalker, run: &RunDirectory) -> RunReport {
        let mut report = RunReport::new(run.path().to_path_buf());

        for entry in walker.files() {
            let file = match entry {
                Ok(file) => file,
                Err(e) => {
                    error!("Failed to read directory entry {}", e);
                    report.record_failure(e.path, e.source);
                    continue;
                }
            };

            info!("[{}] Translating file: {}", report.total() + 1, file.relative.display());
            match self.translate_one(&file, run).await {
                Ok(target) => {
                    info!("Saved translated file to {}", target.display());
                    report.record_success(file.relative);
                }
                Err(e) => {
                    error!("Failed to process file {}: {}", file.absolute.display(), e);
                    report.record_failure(file.relative, e);
                }
            }
        }

        if report.total() == 0 {
            warn!("No files found in input directory: {}", walker.root().display());
        }
        report.log_summary();
        report
    }

    async fn translate_one(&self, file: &SourceFile, run: &RunDirectory) -> Result<PathBuf> {
        let content = fs::read_to_string(&file.absolute).await?;
        let translated = self.client.translate_file(&file.relative, &content).await?;
        run.write(&file.relative, &translated).await
    }
}
