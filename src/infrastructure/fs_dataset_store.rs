// Filesystem-backed dataset store
use crate::application::dataset_store::DatasetStore;
use crate::application::errors::DatasetError;
use crate::domain::dataset::DatasetName;
use async_trait::async_trait;
use bytes::Bytes;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::io::AsyncWriteExt;
use tokio::sync::OnceCell;

const MAX_NAME_ATTEMPTS: u32 = 64;

static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Stores each dataset as one file directly under `root`.
///
/// Content is written to a hidden temporary file, synced, then published with
/// a hard link. Linking fails instead of replacing an existing file, so two
/// uploads racing for the same name both survive and readers never see a
/// partially written blob.
#[derive(Debug)]
pub struct FsDatasetStore {
    root: PathBuf,
    root_ready: OnceCell<()>,
}

impl FsDatasetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            root_ready: OnceCell::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the root on first use. A failed attempt is retried by the next caller.
    async fn ensure_root(&self) -> io::Result<()> {
        self.root_ready
            .get_or_try_init(|| async {
                tokio::fs::create_dir_all(&self.root).await?;
                tracing::info!(root = %self.root.display(), "dataset storage ready");
                Ok::<(), io::Error>(())
            })
            .await?;
        Ok(())
    }

    async fn write_temp(&self, content: &[u8]) -> io::Result<PathBuf> {
        let tmp = self.root.join(format!(
            ".upload.{}.{}.tmp",
            std::process::id(),
            TEMP_SEQ.fetch_add(1, Ordering::Relaxed)
        ));
        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp)
            .await?;
        write_or_discard(&tmp, async {
            file.write_all(content).await?;
            file.sync_all().await
        })
        .await?;
        Ok(tmp)
    }

    async fn publish(&self, tmp: &Path, millis: i64, base_name: &str) -> Result<DatasetName, DatasetError> {
        for attempt in 0..MAX_NAME_ATTEMPTS {
            let name = DatasetName::stamped(millis, base_name, attempt)?;
            match tokio::fs::hard_link(tmp, self.root.join(&name)).await {
                Ok(()) => return Ok(name),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    tracing::debug!(%name, "dataset name taken, trying next");
                }
                Err(source) => {
                    return Err(DatasetError::StorageWrite {
                        name: name.to_string(),
                        source,
                    });
                }
            }
        }

        Err(DatasetError::StorageWrite {
            name: base_name.to_string(),
            source: io::Error::new(io::ErrorKind::AlreadyExists, "no free dataset name left"),
        })
    }
}

/// Run `write` against the temporary file at `tmp`, removing the file if the
/// write fails so failed uploads leave nothing behind
async fn write_or_discard<F>(tmp: &Path, write: F) -> io::Result<()>
where
    F: Future<Output = io::Result<()>>,
{
    if let Err(e) = write.await {
        if let Err(remove_err) = tokio::fs::remove_file(tmp).await {
            tracing::warn!(tmp = %tmp.display(), "failed to remove temporary upload: {}", remove_err);
        }
        return Err(e);
    }
    Ok(())
}

#[async_trait]
impl DatasetStore for FsDatasetStore {
    async fn put(&self, base_name: &str, content: Bytes) -> Result<DatasetName, DatasetError> {
        let write_error = |source| DatasetError::StorageWrite {
            name: base_name.to_string(),
            source,
        };

        let millis = chrono::Utc::now().timestamp_millis();
        // Reject unusable names before touching the disk
        DatasetName::stamped(millis, base_name, 0)?;

        self.ensure_root().await.map_err(write_error)?;
        let tmp = self.write_temp(&content).await.map_err(write_error)?;

        let published = self.publish(&tmp, millis, base_name).await;
        if let Err(e) = tokio::fs::remove_file(&tmp).await {
            tracing::warn!(tmp = %tmp.display(), "failed to remove temporary upload: {}", e);
        }

        let name = published?;
        tracing::info!(%name, bytes = content.len(), "stored dataset");
        Ok(name)
    }

    async fn get(&self, name: &DatasetName) -> Result<Bytes, DatasetError> {
        match tokio::fs::read(self.root.join(name)).await {
            Ok(content) => Ok(Bytes::from(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(DatasetError::NotFound(name.to_string()))
            }
            Err(source) => Err(DatasetError::StorageRead {
                name: name.to_string(),
                source,
            }),
        }
    }
}
