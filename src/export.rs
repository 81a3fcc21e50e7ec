use crate::models::AppData;
use chrono::NaiveDate;

pub fn export_file_name(date: NaiveDate) -> String {
    format!("farm-ops-report-{}.json", date.format("%Y-%m-%d"))
}

pub fn export_payload(data: &AppData) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec_pretty(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_carries_date() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(export_file_name(date), "farm-ops-report-2026-03-07.json");
    }

    #[test]
    fn payload_is_the_whole_snapshot() {
        let data = crate::seed::seed_data(NaiveDate::from_ymd_opt(2026, 3, 7).unwrap());
        let bytes = export_payload(&data).unwrap();
        let parsed: AppData = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed.tasks, data.tasks);
        assert_eq!(parsed.stock_items, data.stock_items);
    }
}
