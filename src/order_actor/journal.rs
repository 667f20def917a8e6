//! Append-only JSON-lines journal backing the order store.
//!
//! Every accepted write appends the full order record as one line. Replaying
//! the file keeps the last record per order id, so writing identical content
//! twice never changes the replayed state.
//!
//! Only newline-terminated lines are committed. An unterminated final line is
//! what an interrupted append leaves behind: replay drops it when it does not
//! parse and terminates it when it does, so the next append starts on a fresh
//! line.

use super::OrderRecordError;
use crate::model::Order;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// Where order writes are made durable. `None` keeps the store in memory only.
#[derive(Debug, Clone, Default)]
pub struct OrderJournal {
    path: Option<PathBuf>,
}

impl OrderJournal {
    pub fn in_memory() -> Self {
        Self { path: None }
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Rebuilds the current order set. A missing file is an empty store.
    /// Orders come back in the order they first appeared.
    pub async fn replay(&self) -> Result<Vec<Order>, OrderRecordError> {
        let Some(path) = &self.path else {
            return Ok(Vec::new());
        };
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(OrderRecordError::JournalRead(e)),
        };

        let committed_len = bytes
            .iter()
            .rposition(|b| *b == b'\n')
            .map_or(0, |idx| idx + 1);
        let (committed, tail) = bytes.split_at(committed_len);
        let committed = std::str::from_utf8(committed).map_err(|e| {
            OrderRecordError::JournalRead(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })?;

        let mut order_ids: Vec<String> = Vec::new();
        let mut latest: HashMap<String, Order> = HashMap::new();
        let mut keep = |order: Order| {
            if !latest.contains_key(&order.id) {
                order_ids.push(order.id.clone());
            }
            latest.insert(order.id.clone(), order);
        };

        let mut line_count = 0;
        for (idx, line) in committed.lines().enumerate() {
            line_count = idx + 1;
            if line.trim().is_empty() {
                continue;
            }
            let order: Order = serde_json::from_str(line)
                .map_err(|source| OrderRecordError::CorruptJournal { line: idx + 1, source })?;
            keep(order);
        }

        if !tail.is_empty() {
            let line = line_count + 1;
            match serde_json::from_slice::<Order>(tail) {
                Ok(order) => {
                    warn!(path = %path.display(), line, "Terminating unterminated journal record");
                    keep(order);
                    repair_tail(path, TailRepair::Terminate).await?;
                }
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        line,
                        bytes = tail.len(),
                        error = %e,
                        "Dropping partial journal record"
                    );
                    repair_tail(path, TailRepair::Truncate(committed_len as u64)).await?;
                }
            }
        }
        debug!(path = %path.display(), orders = order_ids.len(), "Journal replayed");

        Ok(order_ids
            .into_iter()
            .filter_map(|id| latest.remove(&id))
            .collect())
    }

    /// Appends one record. A failed write is rolled back so no partial line
    /// is left in the file.
    pub async fn append(&self, order: &Order) -> Result<(), OrderRecordError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let mut line = serde_json::to_string(order).map_err(|e| {
            OrderRecordError::JournalWrite(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .map_err(OrderRecordError::JournalWrite)?;
        let len_before = file
            .metadata()
            .await
            .map_err(OrderRecordError::JournalWrite)?
            .len();

        let written = async {
            file.write_all(line.as_bytes()).await?;
            file.flush().await?;
            file.sync_data().await
        }
        .await;
        if let Err(e) = written {
            if let Err(rollback) = file.set_len(len_before).await {
                warn!(
                    path = %path.display(),
                    error = %rollback,
                    "Failed to roll back partial journal record"
                );
            }
            return Err(OrderRecordError::JournalWrite(e));
        }
        Ok(())
    }
}

enum TailRepair {
    /// Cut the file back to this many bytes.
    Truncate(u64),
    Terminate,
}

async fn repair_tail(path: &Path, repair: TailRepair) -> Result<(), OrderRecordError> {
    let mut file = OpenOptions::new()
        .append(true)
        .open(path)
        .await
        .map_err(OrderRecordError::JournalWrite)?;
    match repair {
        TailRepair::Truncate(len) => file.set_len(len).await,
        TailRepair::Terminate => file.write_all(b"\n").await,
    }
    .map_err(OrderRecordError::JournalWrite)?;
    file.sync_data().await.map_err(OrderRecordError::JournalWrite)
}
