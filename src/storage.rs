use crate::errors::{AppError, StoreError};
use crate::models::AppData;
use crate::seed::seed_data;
use chrono::Local;
use std::path::Path;
use tokio::fs;
use tracing::{error, info};

/// Reads the saved state, falling back to the demo seed when the file is
/// missing or unreadable.
pub async fn load_data(path: &Path) -> AppData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse data file {}: {err}; starting from seed", path.display());
                seed()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            info!("no data file at {}; starting from seed", path.display());
            seed()
        }
        Err(err) => {
            error!("failed to read data file {}: {err}; starting from seed", path.display());
            seed()
        }
    }
}

/// Writes the whole snapshot. JSON has no encoding for NaN or infinity and
/// serde_json would write `null`, which no longer loads, so such a snapshot
/// is refused before anything touches the file.
pub async fn persist_data(path: &Path, data: &AppData) -> Result<(), AppError> {
    if let Some(field) = first_non_finite(data) {
        error!("not saving state: {field} is not a finite number");
        return Err(StoreError::NonFiniteValue(field).into());
    }
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}

fn first_non_finite(data: &AppData) -> Option<String> {
    let items = data.stock_items.iter().flat_map(|item| {
        [
            (item.current_stock_kg, format!("stock item {} quantity", item.id)),
            (item.price_per_kg_usd, format!("stock item {} price", item.id)),
        ]
    });
    let history = data.stock_history.iter().flat_map(|entry| {
        let mut values = vec![(entry.amount_kg, format!("history entry {} amount", entry.id))];
        if let Some(usd) = entry.amount_usd {
            values.push((usd, format!("history entry {} value", entry.id)));
        }
        values
    });
    let logs = data.flocks.iter().flat_map(|flock| &flock.daily_logs).flat_map(|log| {
        [
            log.feed_consumption_kg,
            log.water_consumption_l,
            log.average_weight_kg,
            log.temperature_celsius,
        ]
        .map(|value| (value, format!("daily log {}", log.id)))
    });

    items
        .chain(history)
        .chain(logs)
        .find(|(value, _)| !value.is_finite())
        .map(|(_, field)| field)
}

fn seed() -> AppData {
    seed_data(Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("farm_ops_{name}_{}_{nanos}.json", std::process::id()))
    }

    #[tokio::test]
    async fn missing_file_yields_seed() {
        let data = load_data(&temp_path("missing")).await;
        assert_eq!(data.tasks.len(), 5);
        assert_eq!(data.stock_items.len(), 3);
    }

    #[tokio::test]
    async fn corrupt_file_yields_seed() {
        let path = temp_path("corrupt");
        fs::write(&path, b"{not json").await.unwrap();
        let data = load_data(&path).await;
        assert_eq!(data.stock_items.len(), 3);
        let _ = fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn infinite_stock_is_not_written() {
        let path = temp_path("infinite");
        let mut data = seed_data(chrono::NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
        let (kept, _) = data.clone().add_flock(
            "flock-1".into(),
            "House A".into(),
            chrono::NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(),
            300,
        );
        persist_data(&path, &kept).await.unwrap();

        data = kept.clone();
        data.stock_items[0].current_stock_kg = f64::INFINITY;
        let err = persist_data(&path, &data).await.unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);

        let reloaded = load_data(&path).await;
        assert_eq!(reloaded, kept);
        assert_eq!(reloaded.flocks.len(), 1);
        let _ = fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn persisted_state_reloads() {
        let path = temp_path("reload");
        let data = seed_data(chrono::NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
        persist_data(&path, &data).await.unwrap();
        let loaded = load_data(&path).await;
        assert_eq!(loaded, data);
        let _ = fs::remove_file(&path).await;
    }
}
