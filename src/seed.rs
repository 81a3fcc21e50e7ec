use crate::models::{AddedBy, AppData, HistoryKind, StockHistory, StockItem, Task, Team};
use crate::schedule::weekday_number;
use chrono::{Duration, NaiveDate, Utc};
use std::collections::BTreeSet;

/// Demo state used when no readable data file exists yet.
pub fn seed_data(today: NaiveDate) -> AppData {
    let weekdays: BTreeSet<u8> = (1..=5).collect();
    // the coming Friday, or today when today is Friday
    let days_to_friday = (5 + 7 - i64::from(weekday_number(today))) % 7;
    let end = today + Duration::days(days_to_friday);

    let task = |id: &str, title: &str, team: Team, time: Option<&str>, done: bool, notes: Option<&str>| Task {
        id: id.to_string(),
        title: title.to_string(),
        description: None,
        team,
        due_date: today,
        time: time.map(str::to_string),
        is_completed: done,
        is_recurring: true,
        recurring_days: Some(weekdays.clone()),
        recurring_end_date: Some(end),
        image_url: None,
        added_by: AddedBy::Admin,
        notes: notes.map(str::to_string),
    };

    let tasks = vec![
        task(
            "m1",
            "Water the front yard",
            Team::Maintenance,
            None,
            false,
            Some("Use the new sprinkler heads near the gate."),
        ),
        task("m2", "Security checks", Team::Maintenance, Some("08:00"), false, None),
        task("b1", "Clean Butchery", Team::Butchery, None, true, None),
        task("b2", "Cut Meats", Team::Butchery, Some("10:00"), false, None),
        task(
            "b3",
            "Update Stock",
            Team::Butchery,
            Some("16:00"),
            false,
            Some("Cross-reference with the delivery invoice from yesterday."),
        ),
    ];

    let stock_items = vec![
        StockItem { id: "s1".into(), name: "Chicken".into(), current_stock_kg: 10.0, price_per_kg_usd: 4.5 },
        StockItem { id: "s2".into(), name: "Beef".into(), current_stock_kg: 5.0, price_per_kg_usd: 5.5 },
        StockItem { id: "s3".into(), name: "Fish".into(), current_stock_kg: 5.0, price_per_kg_usd: 5.5 },
    ];

    let now = Utc::now();
    let stock_history = stock_items
        .iter()
        .enumerate()
        .map(|(index, item)| StockHistory {
            id: format!("h{}", index + 1),
            stock_item_id: item.id.clone(),
            stock_item_name: item.name.clone(),
            date: now,
            kind: HistoryKind::Initial,
            amount_kg: item.current_stock_kg,
            amount_usd: None,
        })
        .collect();

    AppData {
        tasks,
        stock_items,
        stock_history,
        flocks: Vec::new(),
    }
}
