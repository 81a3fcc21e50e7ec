use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    Butchery,
    Maintenance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddedBy {
    Admin,
    User,
}

/// A checklist entry. For recurring tasks `due_date` is the first day the
/// recurrence may fire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub team: Team,
    pub due_date: NaiveDate,
    /// `HH:MM`, compared lexically.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    pub is_completed: bool,
    pub is_recurring: bool,
    /// ISO weekday numbers, Monday = 1 through Sunday = 7.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_days: Option<BTreeSet<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub added_by: AddedBy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Everything a caller supplies when creating a task; the store fills in
/// the id and the completion flag.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub team: Team,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub recurring_days: Option<BTreeSet<u8>>,
    #[serde(default)]
    pub recurring_end_date: Option<NaiveDate>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_added_by")]
    pub added_by: AddedBy,
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_added_by() -> AddedBy {
    AddedBy::User
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockItem {
    pub id: String,
    pub name: String,
    pub current_stock_kg: f64,
    pub price_per_kg_usd: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryKind {
    Initial,
    Add,
    Sale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    Add,
    Sale,
}

impl From<MovementKind> for HistoryKind {
    fn from(kind: MovementKind) -> Self {
        match kind {
            MovementKind::Add => HistoryKind::Add,
            MovementKind::Sale => HistoryKind::Sale,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockHistory {
    pub id: String,
    pub stock_item_id: String,
    /// Name at the time of the movement.
    pub stock_item_name: String,
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: HistoryKind,
    pub amount_kg: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_usd: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flock {
    pub id: String,
    pub name: String,
    pub placement_date: NaiveDate,
    pub bird_count: u32,
    /// Most recent first.
    #[serde(default)]
    pub daily_logs: Vec<DailyLog>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLog {
    pub id: String,
    pub date: NaiveDate,
    pub feed_consumption_kg: f64,
    pub water_consumption_l: f64,
    pub mortality_count: u32,
    pub average_weight_kg: f64,
    pub temperature_celsius: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewDailyLog {
    pub date: NaiveDate,
    #[serde(default)]
    pub feed_consumption_kg: f64,
    #[serde(default)]
    pub water_consumption_l: f64,
    #[serde(default)]
    pub mortality_count: u32,
    #[serde(default)]
    pub average_weight_kg: f64,
    #[serde(default)]
    pub temperature_celsius: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

/// The persisted aggregate. Saved in full after every mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppData {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub stock_items: Vec<StockItem>,
    /// Most recent first, never truncated.
    #[serde(default)]
    pub stock_history: Vec<StockHistory>,
    #[serde(default)]
    pub flocks: Vec<Flock>,
}

#[derive(Debug, Deserialize)]
pub struct TaskQuery {
    pub date: Option<NaiveDate>,
    pub team: Option<Team>,
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub confirmed: bool,
}

#[derive(Debug, Deserialize)]
pub struct NotesRequest {
    pub notes: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DueTask {
    #[serde(flatten)]
    pub task: Task,
    pub overdue: bool,
    pub can_complete: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DueTasksResponse {
    pub date: NaiveDate,
    pub tasks: Vec<DueTask>,
}

#[derive(Debug, Deserialize)]
pub struct NewStockItemRequest {
    pub name: String,
    #[serde(default)]
    pub initial_stock_kg: f64,
    pub price_per_kg_usd: f64,
}

#[derive(Debug, Deserialize)]
pub struct MovementRequest {
    pub kind: MovementKind,
    pub amount_kg: f64,
}

#[derive(Debug, Deserialize)]
pub struct SaleRequest {
    pub amount_usd: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MovementResponse {
    pub item: StockItem,
    pub entry: StockHistory,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StockResponse {
    pub items: Vec<StockItem>,
    pub history: Vec<StockHistory>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChartPoint {
    pub name: String,
    pub current_stock_kg: f64,
}

#[derive(Debug, Deserialize)]
pub struct NewFlockRequest {
    pub name: String,
    pub placement_date: NaiveDate,
    pub bird_count: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FlockOverview {
    pub id: String,
    pub name: String,
    pub placement_date: NaiveDate,
    pub bird_count: u32,
    pub log_count: usize,
    pub total_mortality: u32,
    pub remaining_birds: u32,
    pub latest_average_weight_kg: Option<f64>,
    pub mean_feed_kg: Option<f64>,
}
