use crate::config::Config;
use crate::errors::AppError;
use crate::ids::IdGenerator;
use crate::models::AppData;
use crate::notes::NotesDebouncer;
use crate::storage::persist_data;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub data: Arc<Mutex<AppData>>,
    pub ids: Arc<IdGenerator>,
    pub notes: NotesDebouncer,
}

impl AppState {
    pub fn new(config: Config, data: AppData) -> Self {
        let notes = NotesDebouncer::new(config.notes_debounce);
        Self {
            config: Arc::new(config),
            data: Arc::new(Mutex::new(data)),
            ids: Arc::new(IdGenerator::new()),
            notes,
        }
    }

    /// Applies `change` to a copy of the current state, saves the copy and
    /// only then makes it current. A failed save leaves memory untouched.
    pub async fn mutate<T, E>(
        &self,
        change: impl FnOnce(AppData) -> Result<(AppData, T), E>,
    ) -> Result<T, AppError>
    where
        AppError: From<E>,
    {
        let mut data = self.data.lock().await;
        let (next, output) = change(data.clone())?;
        persist_data(&self.config.data_path, &next).await?;
        *data = next;
        Ok(output)
    }
}
