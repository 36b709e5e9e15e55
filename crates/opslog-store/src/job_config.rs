//! Job configuration store implementation.

use std::path::{Path, PathBuf};

use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use opslog_core::error::{AppError, ErrorKind};
use opslog_core::result::AppResult;
use opslog_entity::job::{JobConfig, JobConfigPatch, NewJobConfig};

/// Seeded first-run entry, so a fresh installation has one working
/// configuration to edit instead of an empty page.
const SEED_INPUT: &str = "./data/input";
const SEED_OUTPUT: &str = "./data/output";
const SEED_ARGS: [&str; 1] = ["HASH"];

/// Store for the job configuration collection.
///
/// The backing file has no row-level concurrency control, so every
/// operation — reads included — runs as a critical section under one
/// process-wide mutex covering the full read-modify-persist cycle.
/// Without it, two concurrent updates would race and the loser's rewrite
/// of the whole collection would silently clobber the winner's.
#[derive(Debug)]
pub struct JobConfigStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JobConfigStore {
    /// Create a store backed by the given JSON file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Return the current ordered collection.
    ///
    /// When the backing file does not exist yet it is created with one
    /// seeded default entry before being returned; first-run bootstrap is
    /// part of this operation's contract.
    pub async fn load_all(&self) -> AppResult<Vec<JobConfig>> {
        let _guard = self.lock.lock().await;
        self.read_or_seed().await
    }

    /// Create a new configuration and persist the whole collection.
    ///
    /// `input` and `output` are required; `args` defaults to empty. The
    /// created entry is returned with its assigned id.
    pub async fn create(&self, new: NewJobConfig) -> AppResult<JobConfig> {
        let input = required_field(new.input, "input")?;
        let output = required_field(new.output, "output")?;

        let config = JobConfig {
            id: Uuid::new_v4(),
            input,
            output,
            args: new.args.unwrap_or_default(),
        };

        let _guard = self.lock.lock().await;
        let mut configs = self.read_or_seed().await?;
        configs.push(config.clone());
        self.persist(&configs).await?;

        Ok(config)
    }

    /// Apply the present fields of `patch` to the entry with `id`.
    pub async fn update(&self, id: Uuid, patch: JobConfigPatch) -> AppResult<JobConfig> {
        if patch.is_empty() {
            return Err(AppError::validation("No fields to update"));
        }

        let _guard = self.lock.lock().await;
        let mut configs = self.read_or_seed().await?;

        let config = configs
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::not_found(format!("Job configuration {id} not found")))?;

        if let Some(input) = patch.input {
            config.input = input;
        }
        if let Some(output) = patch.output {
            config.output = output;
        }
        if let Some(args) = patch.args {
            config.args = args;
        }
        let updated = config.clone();

        self.persist(&configs).await?;
        Ok(updated)
    }

    /// Remove the entry with `id` and persist the remaining collection.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let _guard = self.lock.lock().await;
        let mut configs = self.read_or_seed().await?;

        let before = configs.len();
        configs.retain(|c| c.id != id);
        if configs.len() == before {
            return Err(AppError::not_found(format!(
                "Job configuration {id} not found"
            )));
        }

        self.persist(&configs).await
    }

    /// Read the collection, seeding and persisting the default entry when
    /// the backing file is absent. Callers must hold the lock.
    async fn read_or_seed(&self) -> AppResult<Vec<JobConfig>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                AppError::with_source(
                    ErrorKind::Serialization,
                    format!("Corrupt configuration store '{}': {e}", self.path.display()),
                    e,
                )
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "Seeding job configuration store");
                let seeded = vec![JobConfig {
                    id: Uuid::new_v4(),
                    input: SEED_INPUT.to_string(),
                    output: SEED_OUTPUT.to_string(),
                    args: SEED_ARGS.iter().map(|s| s.to_string()).collect(),
                }];
                self.persist(&seeded).await?;
                Ok(seeded)
            }
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to read '{}': {e}", self.path.display()),
                e,
            )),
        }
    }

    /// Rewrite the whole collection.
    ///
    /// Writes to a sibling temp file and renames it over the target, so a
    /// crash mid-write never truncates the previous content.
    async fn persist(&self, configs: &[JobConfig]) -> AppResult<()> {
        let bytes = serde_json::to_vec_pretty(configs)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    AppError::with_source(
                        ErrorKind::Storage,
                        format!("Failed to create '{}': {e}", parent.display()),
                        e,
                    )
                })?;
            }
        }

        let tmp = temp_path(&self.path);
        tokio::fs::write(&tmp, &bytes).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write '{}': {e}", tmp.display()),
                e,
            )
        })?;

        tokio::fs::rename(&tmp, &self.path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to replace '{}': {e}", self.path.display()),
                e,
            )
        })
    }
}

fn required_field(value: Option<String>, name: &str) -> AppResult<String> {
    match value {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(AppError::validation(format!(
            "Missing required field: {name}"
        ))),
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
