use super::DrillStore;
use super::memory::{completions_on, drills_added_through};
use crate::errors::StoreError;
use crate::models::{Completion, Drill, DrillCollections};
use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};
use std::path::{Path, PathBuf};
use tokio::{fs, sync::Mutex};
use tracing::{error, info, warn};

/// Both collections in one JSON document on disk, rewritten after every insert.
pub struct JsonFileStore {
    path: PathBuf,
    data: Mutex<DrillCollections>,
}

impl JsonFileStore {
    pub async fn open(path: PathBuf) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let data = load_data(&path).await?;
        info!(
            path = %path.display(),
            drills = data.drills.len(),
            completions = data.completions.len(),
            "opened drill file"
        );
        Ok(Self {
            path,
            data: Mutex::new(data),
        })
    }
}

#[async_trait]
impl DrillStore for JsonFileStore {
    fn backend(&self) -> &'static str {
        "json-file"
    }

    async fn drills_added_through(&self, date: NaiveDateTime) -> Result<Vec<Drill>, StoreError> {
        Ok(drills_added_through(&*self.data.lock().await, date))
    }

    async fn insert_drill(&self, drill: &Drill) -> Result<(), StoreError> {
        let mut data = self.data.lock().await;
        data.drills.push(drill.clone());
        if let Err(err) = persist_data(&self.path, &data).await {
            data.drills.pop();
            return Err(err);
        }
        Ok(())
    }

    async fn completions_on(&self, date: NaiveDateTime) -> Result<Vec<Completion>, StoreError> {
        Ok(completions_on(&*self.data.lock().await, date))
    }

    async fn insert_completion(&self, completion: &Completion) -> Result<(), StoreError> {
        let mut data = self.data.lock().await;
        data.completions.push(completion.clone());
        if let Err(err) = persist_data(&self.path, &data).await {
            data.completions.pop();
            return Err(err);
        }
        Ok(())
    }
}

/// A missing file is an empty store. A file that cannot be parsed is renamed
/// aside so the next insert does not overwrite it; one that cannot be read
/// fails the open.
async fn load_data(path: &Path) -> Result<DrillCollections, StoreError> {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(DrillCollections::default());
        }
        Err(err) => {
            error!("failed to read drill file: {err}");
            return Err(err.into());
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(data) => Ok(data),
        Err(err) => {
            let backup = corrupt_backup_path(path);
            fs::rename(path, &backup).await?;
            warn!(
                backup = %backup.display(),
                "failed to parse drill file ({err}), moved it aside and starting empty"
            );
            Ok(DrillCollections::default())
        }
    }
}

fn corrupt_backup_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(format!(".corrupt-{}", Local::now().format("%Y%m%d%H%M%S")));
    path.with_file_name(name)
}

async fn persist_data(path: &Path, data: &DrillCollections) -> Result<(), StoreError> {
    let payload = serde_json::to_vec_pretty(data)?;
    fs::write(path, payload).await?;
    Ok(())
}
