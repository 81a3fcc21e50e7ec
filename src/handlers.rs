use crate::attachments::{LARGE_ATTACHMENT_BYTES, is_image, to_data_url};
use crate::errors::{AppError, StoreError};
use crate::export::{export_file_name, export_payload};
use crate::models::{
    AppData, ChartPoint, DailyLog, DueTask, DueTasksResponse, Flock, FlockOverview, MovementRequest,
    MovementResponse, NewDailyLog, NewFlockRequest, NewStockItemRequest, NewTask, NotesRequest,
    SaleRequest, StockHistory, StockItem, StockResponse, Task, TaskQuery, ToggleRequest,
};
use crate::schedule::{can_complete, is_overdue, tasks_due_on};
use crate::state::AppState;
use crate::stats::{flock_overview, stock_chart};
use crate::ui::render_index;
use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use chrono::{Local, NaiveDate, NaiveTime, Utc};
use tracing::{debug, error, info, warn};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let date = today();
    let data = state.data.lock().await;
    Html(render_index(date, &data))
}

pub async fn get_state(State(state): State<AppState>) -> Json<AppData> {
    let data = state.data.lock().await;
    Json(data.clone())
}

pub async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<TaskQuery>,
) -> Json<DueTasksResponse> {
    let today = today();
    let date = query.date.unwrap_or(today);
    let data = state.data.lock().await;
    let tasks = tasks_due_on(&data.tasks, date, query.team)
        .into_iter()
        .map(|task| DueTask {
            overdue: is_overdue(task, today),
            can_complete: can_complete(task, date),
            task: task.clone(),
        })
        .collect();

    Json(DueTasksResponse { date, tasks })
}

pub async fn add_task(
    State(state): State<AppState>,
    Json(payload): Json<NewTask>,
) -> Result<(StatusCode, Json<Task>), AppError> {
    let new = validate_new_task(payload)?;
    let id = state.ids.next("task");
    let task = state
        .mutate(|data| Ok::<_, AppError>(data.add_task(id, new)))
        .await?;

    info!(task_id = %task.id, team = ?task.team, "task added");
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn toggle_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    Json(payload): Json<ToggleRequest>,
) -> Result<Json<Task>, AppError> {
    let today = today();
    let date = payload.date.unwrap_or(today);

    let task = state
        .mutate(|data| -> Result<(AppData, Task), AppError> {
            let task = data
                .task(&task_id)
                .ok_or_else(|| StoreError::TaskNotFound(task_id.clone()))?;
            if !can_complete(task, date) {
                return Err(AppError::bad_request(format!(
                    "task cannot be changed before its due date {}",
                    task.due_date
                )));
            }
            if !task.is_completed && !payload.confirmed {
                return Err(AppError::conflict(confirmation_message(task, today)));
            }
            Ok(data.toggle_completion(&task_id)?)
        })
        .await?;

    info!(task_id = %task.id, completed = task.is_completed, "task toggled");
    Ok(Json(task))
}

pub async fn update_notes(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    Json(payload): Json<NotesRequest>,
) -> Result<StatusCode, AppError> {
    if state.data.lock().await.task(&task_id).is_none() {
        return Err(StoreError::TaskNotFound(task_id).into());
    }

    let committer = state.clone();
    let key = task_id.clone();
    state.notes.schedule(key, async move {
        let notes = payload.notes;
        match committer
            .mutate(|data| data.update_notes(&task_id, notes))
            .await
        {
            Ok(_) => debug!(task_id = %task_id, "notes saved"),
            Err(err) => error!(task_id = %task_id, "failed to save notes: {}", err.message),
        }
    });

    Ok(StatusCode::ACCEPTED)
}

pub async fn attach_image(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Task>, AppError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());
    if !is_image(content_type) {
        return Err(AppError::bad_request("attachment must be an image"));
    }
    if body.is_empty() {
        return Err(AppError::bad_request("attachment is empty"));
    }
    if body.len() > LARGE_ATTACHMENT_BYTES {
        warn!(task_id = %task_id, bytes = body.len(), "storing large image inline");
    }

    let image_url = to_data_url(content_type, &body);
    let task = state
        .mutate(|data| data.attach_image(&task_id, image_url))
        .await?;

    info!(task_id = %task.id, bytes = body.len(), "image attached");
    Ok(Json(task))
}

pub async fn get_stock(State(state): State<AppState>) -> Json<StockResponse> {
    let data = state.data.lock().await;
    Json(StockResponse {
        items: data.stock_items.clone(),
        history: data.stock_history.clone(),
    })
}

pub async fn get_stock_chart(State(state): State<AppState>) -> Json<Vec<ChartPoint>> {
    let data = state.data.lock().await;
    Json(stock_chart(&data))
}

pub async fn create_stock_item(
    State(state): State<AppState>,
    Json(payload): Json<NewStockItemRequest>,
) -> Result<(StatusCode, Json<StockItem>), AppError> {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::bad_request("name is required"));
    }

    let item_id = state.ids.next("stock");
    let entry_id = state.ids.next("hist");
    let item = state
        .mutate(|data| {
            Ok::<_, AppError>(data.create_stock_item(
                item_id,
                entry_id,
                name,
                payload.initial_stock_kg,
                payload.price_per_kg_usd,
                Utc::now(),
            ))
        })
        .await?;

    info!(item_id = %item.id, stock_kg = item.current_stock_kg, "stock item created");
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn record_movement(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
    Json(payload): Json<MovementRequest>,
) -> Result<Json<MovementResponse>, AppError> {
    let entry_id = state.ids.next("hist");
    let (item, entry) = state
        .mutate(|data| {
            let (data, item, entry) =
                data.record_movement(&item_id, payload.amount_kg, payload.kind, entry_id, Utc::now())?;
            Ok::<_, AppError>((data, (item, entry)))
        })
        .await?;

    log_movement(&item, &entry);
    Ok(Json(MovementResponse { item, entry }))
}

pub async fn record_sale(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
    Json(payload): Json<SaleRequest>,
) -> Result<Json<MovementResponse>, AppError> {
    let entry_id = state.ids.next("hist");
    let (item, entry) = state
        .mutate(|data| {
            let (data, item, entry) =
                data.sell_for_usd(&item_id, payload.amount_usd, entry_id, Utc::now())?;
            Ok::<_, AppError>((data, (item, entry)))
        })
        .await?;

    log_movement(&item, &entry);
    Ok(Json(MovementResponse { item, entry }))
}

pub async fn list_flocks(State(state): State<AppState>) -> Json<Vec<Flock>> {
    let data = state.data.lock().await;
    Json(data.flocks.clone())
}

pub async fn get_flock_overview(State(state): State<AppState>) -> Json<Vec<FlockOverview>> {
    let data = state.data.lock().await;
    Json(flock_overview(&data))
}

pub async fn add_flock(
    State(state): State<AppState>,
    Json(payload): Json<NewFlockRequest>,
) -> Result<(StatusCode, Json<Flock>), AppError> {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::bad_request("name is required"));
    }

    let id = state.ids.next("flock");
    let flock = state
        .mutate(|data| {
            Ok::<_, AppError>(data.add_flock(id, name, payload.placement_date, payload.bird_count))
        })
        .await?;

    info!(flock_id = %flock.id, birds = flock.bird_count, "flock added");
    Ok((StatusCode::CREATED, Json(flock)))
}

pub async fn append_daily_log(
    State(state): State<AppState>,
    Path(flock_id): Path<String>,
    Json(payload): Json<NewDailyLog>,
) -> Result<(StatusCode, Json<DailyLog>), AppError> {
    let log_id = state.ids.next("log");
    let log = state
        .mutate(|data| data.append_daily_log(&flock_id, log_id, payload))
        .await?;

    info!(flock_id = %flock_id, log_id = %log.id, "daily log recorded");
    Ok((StatusCode::CREATED, Json(log)))
}

pub async fn export(State(state): State<AppState>) -> Result<Response, AppError> {
    let data = state.data.lock().await;
    let payload = export_payload(&data).map_err(|err| {
        error!("export failed: {err}");
        AppError::internal(err)
    })?;
    let disposition = format!("attachment; filename=\"{}\"", export_file_name(today()));

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        payload,
    )
        .into_response())
}

fn validate_new_task(mut new: NewTask) -> Result<NewTask, AppError> {
    new.title = new.title.trim().to_string();
    if new.title.is_empty() {
        return Err(AppError::bad_request("title is required"));
    }

    new.description = non_empty(new.description);
    new.notes = non_empty(new.notes);
    new.image_url = non_empty(new.image_url);
    // stored zero-padded so lexical order is time order
    new.time = non_empty(new.time)
        .map(|time| {
            NaiveTime::parse_from_str(time.trim(), "%H:%M")
                .map(|parsed| parsed.format("%H:%M").to_string())
                .map_err(|_| AppError::bad_request("time must be HH:MM"))
        })
        .transpose()?;

    if new.is_recurring {
        let days = new.recurring_days.as_ref().filter(|days| !days.is_empty());
        let Some(days) = days else {
            return Err(AppError::bad_request("recurring tasks need at least one weekday"));
        };
        if days.iter().any(|day| !(1..=7).contains(day)) {
            return Err(AppError::bad_request("weekdays must be between 1 (Mon) and 7 (Sun)"));
        }
    } else {
        new.recurring_days = None;
        new.recurring_end_date = None;
    }

    Ok(new)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

fn confirmation_message(task: &Task, today: NaiveDate) -> String {
    if is_overdue(task, today) {
        "This task is overdue. Confirm to mark it as complete.".to_string()
    } else {
        "Confirm to mark this task as complete.".to_string()
    }
}

fn log_movement(item: &StockItem, entry: &StockHistory) {
    info!(
        item_id = %item.id,
        kind = ?entry.kind,
        amount_kg = entry.amount_kg,
        stock_kg = item.current_stock_kg,
        "stock movement recorded"
    );
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AddedBy, Team};
    use std::collections::BTreeSet;

    fn payload(title: &str) -> NewTask {
        NewTask {
            title: title.to_string(),
            description: Some(String::new()),
            team: Team::Butchery,
            due_date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            time: Some(String::new()),
            is_recurring: false,
            recurring_days: Some(BTreeSet::from([1])),
            recurring_end_date: None,
            image_url: None,
            added_by: AddedBy::Admin,
            notes: None,
        }
    }

    #[test]
    fn blank_title_is_rejected() {
        let err = validate_new_task(payload("   ")).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn empty_strings_become_absent() {
        let task = validate_new_task(payload("Sharpen knives")).unwrap();
        assert_eq!(task.description, None);
        assert_eq!(task.time, None);
        assert_eq!(task.recurring_days, None);
    }

    #[test]
    fn recurring_needs_valid_weekdays() {
        let mut empty = payload("Sweep");
        empty.is_recurring = true;
        empty.recurring_days = Some(BTreeSet::new());
        assert!(validate_new_task(empty).is_err());

        let mut out_of_range = payload("Sweep");
        out_of_range.is_recurring = true;
        out_of_range.recurring_days = Some(BTreeSet::from([0, 3]));
        assert!(validate_new_task(out_of_range).is_err());

        let mut ok = payload("Sweep");
        ok.is_recurring = true;
        ok.recurring_days = Some(BTreeSet::from([1, 7]));
        assert!(validate_new_task(ok).is_ok());
    }

    #[test]
    fn malformed_time_is_rejected() {
        let mut bad = payload("Sweep");
        bad.time = Some("8am".into());
        assert!(validate_new_task(bad).is_err());

        let mut good = payload("Sweep");
        good.time = Some("08:30".into());
        assert_eq!(validate_new_task(good).unwrap().time.as_deref(), Some("08:30"));
    }

    #[test]
    fn unpadded_hours_sort_before_afternoon() {
        let mut morning = payload("Feed dogs");
        morning.time = Some("8:30".into());
        let mut afternoon = payload("Lock sheds");
        afternoon.time = Some("16:00".into());

        let data = AppData::default();
        let (data, _) = data.add_task("task-1".into(), validate_new_task(afternoon).unwrap());
        let (data, _) = data.add_task("task-2".into(), validate_new_task(morning).unwrap());

        let day = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let times: Vec<&str> = tasks_due_on(&data.tasks, day, None)
            .into_iter()
            .filter_map(|task| task.time.as_deref())
            .collect();
        assert_eq!(times, vec!["08:30", "16:00"]);
    }
}
