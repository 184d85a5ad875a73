use crate::errors::{AppError, StorageError};
use crate::models::AppData;
use std::path::Path;
use tokio::fs;
use tracing::error;

/// Loads the data file. A missing file is a fresh install; anything else
/// that prevents reading it is returned to the caller.
pub async fn load_data(path: &Path) -> Result<AppData, StorageError> {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(AppData::default()),
        Err(err) => {
            error!("failed to read data file {}: {err}", path.display());
            return Err(err.into());
        }
    };

    serde_json::from_slice(&bytes).map_err(|err| {
        error!("failed to parse data file {}: {err}", path.display());
        StorageError::from(err)
    })
}

pub async fn persist_data(path: &Path, data: &AppData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(label: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("sobriety_tracker_{label}_{}.json", uuid::Uuid::new_v4()));
        path
    }

    #[tokio::test]
    async fn missing_file_loads_empty_document() {
        let data = load_data(&temp_path("missing")).await.unwrap();
        assert!(data.slip_ups.is_empty());
        assert!(data.profile.journey_start_date.is_none());
    }

    #[tokio::test]
    async fn unparseable_file_is_reported_and_left_alone() {
        let path = temp_path("corrupt");
        let contents = r#"{
  "profile": { "id": "u1", "journey_start_date": "2024-01-01", "timezone": null },
  "slip_ups": [
    {
      "id": "s1",
      "user_id": "u1",
      "slip_up_date": "2024-02-01",
      "recovery_restart_date": "2024-02-02",
      "note": null,
      "created_at": "2024-02-02"
    }
  ]
}"#;
        std::fs::write(&path, contents).unwrap();

        let err = load_data(&path).await.unwrap_err();
        assert!(matches!(err, StorageError::Parse(_)));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), contents);
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn unreadable_path_is_reported() {
        let err = load_data(&std::env::temp_dir()).await.unwrap_err();
        assert!(matches!(err, StorageError::Read(_)));
    }

    #[tokio::test]
    async fn persisted_document_loads_back() {
        let path = temp_path("roundtrip");
        let mut data = AppData::default();
        data.profile.journey_start_date = Some("2024-01-01".to_string());

        persist_data(&path, &data).await.unwrap();
        let loaded = load_data(&path).await.unwrap();
        assert_eq!(loaded.profile, data.profile);
        let _ = std::fs::remove_file(path);
    }
}
