use crate::models::{AppData, ChartPoint, Flock, FlockOverview};

pub fn stock_chart(data: &AppData) -> Vec<ChartPoint> {
    data.stock_items
        .iter()
        .map(|item| ChartPoint {
            name: item.name.clone(),
            current_stock_kg: item.current_stock_kg,
        })
        .collect()
}

pub fn flock_overview(data: &AppData) -> Vec<FlockOverview> {
    data.flocks.iter().map(summarize_flock).collect()
}

fn summarize_flock(flock: &Flock) -> FlockOverview {
    let log_count = flock.daily_logs.len();
    let total_mortality = flock
        .daily_logs
        .iter()
        .fold(0u32, |sum, log| sum.saturating_add(log.mortality_count));
    let mean_feed_kg = if log_count == 0 {
        None
    } else {
        let feed: f64 = flock.daily_logs.iter().map(|log| log.feed_consumption_kg).sum();
        Some(feed / log_count as f64)
    };

    FlockOverview {
        id: flock.id.clone(),
        name: flock.name.clone(),
        placement_date: flock.placement_date,
        bird_count: flock.bird_count,
        log_count,
        total_mortality,
        remaining_birds: flock.bird_count.saturating_sub(total_mortality),
        // logs are newest first
        latest_average_weight_kg: flock.daily_logs.first().map(|log| log.average_weight_kg),
        mean_feed_kg,
    }
}
