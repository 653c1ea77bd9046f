//! JSON file implementation of the [`StateStore`] port.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use greenhub_app::ports::StateStore;
use greenhub_domain::error::GreenhubError;
use greenhub_domain::log::WateringLog;
use greenhub_domain::registry::PersistedState;

use crate::error::StorageError;

/// File name of the registry snapshot document. The `v1` suffix is the
/// schema version.
const STATE_FILE: &str = "greenhouse-state-v1.json";
/// File name of the watering log document.
const LOG_FILE: &str = "greenhouse-logs-v1.json";

/// Configuration for the JSON storage adapter.
pub struct Config {
    /// Directory holding the document files. Created on first write.
    pub data_dir: PathBuf,
}

impl Config {
    /// Build a [`JsonStateStore`] from this configuration.
    #[must_use]
    pub fn build(self) -> JsonStateStore {
        JsonStateStore::new(self.data_dir)
    }
}

/// File-backed store writing one JSON document per persisted collection.
pub struct JsonStateStore {
    state_path: PathBuf,
    log_path: PathBuf,
}

impl JsonStateStore {
    /// Create a store rooted at the given data directory.
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            state_path: data_dir.join(STATE_FILE),
            log_path: data_dir.join(LOG_FILE),
        }
    }

    /// Read and parse one document. Missing files and malformed payloads
    /// both come back as `None` — the caller falls back to defaults.
    async fn load_document<T: DeserializeOwned>(
        path: &Path,
    ) -> Result<Option<T>, StorageError> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        match serde_json::from_slice(&bytes) {
            Ok(document) => Ok(Some(document)),
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "ignoring malformed persisted document"
                );
                Ok(None)
            }
        }
    }

    /// Serialize and write one document via a temp-file rename.
    async fn save_document<T: Serialize>(path: &Path, document: &T) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec_pretty(document)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }
}

impl StateStore for JsonStateStore {
    async fn load_state(&self) -> Result<Option<PersistedState>, GreenhubError> {
        Ok(Self::load_document(&self.state_path).await?)
    }

    async fn save_state(&self, state: PersistedState) -> Result<(), GreenhubError> {
        Ok(Self::save_document(&self.state_path, &state).await?)
    }

    async fn load_log(&self) -> Result<Option<WateringLog>, GreenhubError> {
        Ok(Self::load_document(&self.log_path).await?)
    }

    async fn save_log(&self, log: WateringLog) -> Result<(), GreenhubError> {
        Ok(Self::save_document(&self.log_path, &log).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use greenhub_domain::duration::WateringDuration;
    use greenhub_domain::greenhouse::Greenhouse;
    use greenhub_domain::id::GreenhouseKey;
    use greenhub_domain::log::{LogDraft, RunStatus};
    use greenhub_domain::time::now;

    fn sample_state() -> PersistedState {
        let mut running = Greenhouse::idle("Solar 1");
        running.begin(now(), WateringDuration::M15);
        PersistedState {
            active_timer: Some(GreenhouseKey::new("solar0")),
            greenhouses: [
                (GreenhouseKey::new("solar0"), running),
                (GreenhouseKey::new("solar1"), Greenhouse::idle("Solar 2")),
            ]
            .into_iter()
            .collect(),
        }
    }

    fn sample_log() -> WateringLog {
        let mut log = WateringLog::default();
        log.append(LogDraft {
            greenhouse_id: GreenhouseKey::new("solar0"),
            date: now(),
            duration: 15,
            status: RunStatus::Completed,
        });
        log.append(LogDraft {
            greenhouse_id: GreenhouseKey::new("solar1"),
            date: now(),
            duration: 3,
            status: RunStatus::Canceled,
        });
        log
    }

    #[tokio::test]
    async fn should_return_none_when_nothing_was_persisted_yet() {
        let dir = tempfile::tempdir().unwrap();
        let store = Config {
            data_dir: dir.path().join("data"),
        }
        .build();

        assert!(store.load_state().await.unwrap().is_none());
        assert!(store.load_log().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_roundtrip_state_and_log_documents() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStateStore::new(dir.path());
        let state = sample_state();
        let log = sample_log();

        store.save_state(state.clone()).await.unwrap();
        store.save_log(log.clone()).await.unwrap();

        assert_eq!(store.load_state().await.unwrap(), Some(state));
        assert_eq!(store.load_log().await.unwrap(), Some(log));
    }

    #[tokio::test]
    async fn should_produce_stable_bytes_across_a_reload_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStateStore::new(dir.path());
        store.save_log(sample_log()).await.unwrap();

        let first = tokio::fs::read(dir.path().join(LOG_FILE)).await.unwrap();
        let reloaded = store.load_log().await.unwrap().unwrap();
        store.save_log(reloaded).await.unwrap();
        let second = tokio::fs::read(dir.path().join(LOG_FILE)).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn should_degrade_to_none_when_payload_is_truncated() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join(STATE_FILE), b"{\"activeTimer\": nu")
            .await
            .unwrap();
        let store = JsonStateStore::new(dir.path());

        assert!(store.load_state().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_degrade_to_none_when_a_timestamp_is_not_iso8601() {
        let dir = tempfile::tempdir().unwrap();
        let payload = r#"{
            "entries": [{
                "id": "3f0e8a8e-4c43-4e7e-9a53-0a2f8f5b1a11",
                "greenhouseId": "solar0",
                "date": "yesterday",
                "duration": 5,
                "status": "completed"
            }]
        }"#;
        tokio::fs::write(dir.path().join(LOG_FILE), payload)
            .await
            .unwrap();
        let store = JsonStateStore::new(dir.path());

        assert!(store.load_log().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_write_iso8601_timestamps() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStateStore::new(dir.path());
        store.save_state(sample_state()).await.unwrap();

        let raw = tokio::fs::read_to_string(dir.path().join(STATE_FILE))
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let target = value["greenhouses"]["solar0"]["targetTime"]
            .as_str()
            .unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(target).is_ok());
    }

    #[tokio::test]
    async fn should_not_leave_a_temp_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStateStore::new(dir.path());
        store.save_state(sample_state()).await.unwrap();

        let mut entries = tokio::fs::read_dir(dir.path()).await.unwrap();
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        assert_eq!(names, vec![STATE_FILE.to_string()]);
    }
}
