use crate::errors::StoreError;
use crate::models::{AppData, DailyLog, Flock, NewDailyLog};
use chrono::NaiveDate;

impl AppData {
    pub fn add_flock(
        mut self,
        id: String,
        name: String,
        placement_date: NaiveDate,
        bird_count: u32,
    ) -> (Self, Flock) {
        let flock = Flock {
            id,
            name,
            placement_date,
            bird_count,
            daily_logs: Vec::new(),
        };
        self.flocks.push(flock.clone());
        (self, flock)
    }

    /// Puts the log at the front of the flock's list. Values are stored as
    /// given.
    pub fn append_daily_log(
        mut self,
        flock_id: &str,
        log_id: String,
        log: NewDailyLog,
    ) -> Result<(Self, DailyLog), StoreError> {
        let flock = self
            .flocks
            .iter_mut()
            .find(|flock| flock.id == flock_id)
            .ok_or_else(|| StoreError::FlockNotFound(flock_id.to_string()))?;
        let entry = DailyLog {
            id: log_id,
            date: log.date,
            feed_consumption_kg: log.feed_consumption_kg,
            water_consumption_l: log.water_consumption_l,
            mortality_count: log.mortality_count,
            average_weight_kg: log.average_weight_kg,
            temperature_celsius: log.temperature_celsius,
            notes: log.notes,
        };
        flock.daily_logs.insert(0, entry.clone());
        Ok((self, entry))
    }
}
