use crate::models::{Task, Team};
use chrono::{Datelike, NaiveDate};
use std::cmp::Ordering;

/// ISO weekday number of `date`, Monday = 1 through Sunday = 7.
pub fn weekday_number(date: NaiveDate) -> u8 {
    date.weekday().number_from_monday() as u8
}

/// Whether `task` shows up on the checklist for `date`.
///
/// One-off tasks are due on their own day only and never roll forward.
/// Recurring tasks are due on every listed weekday from `due_date` through
/// `recurring_end_date` inclusive. A recurring flag without a weekday set
/// falls back to the one-off rule.
pub fn is_due_on(task: &Task, date: NaiveDate) -> bool {
    match (task.is_recurring, task.recurring_days.as_ref()) {
        (true, Some(days)) => {
            let started = date >= task.due_date;
            let not_ended = task.recurring_end_date.is_none_or(|end| date <= end);
            started && not_ended && days.contains(&weekday_number(date))
        }
        _ => date == task.due_date,
    }
}

/// Completion is blocked for days before the task's start.
pub fn can_complete(task: &Task, date: NaiveDate) -> bool {
    date >= task.due_date
}

pub fn is_overdue(task: &Task, today: NaiveDate) -> bool {
    task.due_date < today && !task.is_completed
}

/// Display order: open tasks first, then timed tasks by time ahead of
/// untimed ones. Equal keys keep insertion order.
pub fn display_order(a: &Task, b: &Task) -> Ordering {
    a.is_completed
        .cmp(&b.is_completed)
        .then_with(|| match (a.time.as_deref(), b.time.as_deref()) {
            (Some(x), Some(y)) => x.cmp(y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
}

pub fn tasks_due_on<'a>(tasks: &'a [Task], date: NaiveDate, team: Option<Team>) -> Vec<&'a Task> {
    let mut due: Vec<&Task> = tasks
        .iter()
        .filter(|task| team.is_none_or(|team| task.team == team))
        .filter(|task| is_due_on(task, date))
        .collect();
    // sort_by is stable
    due.sort_by(|a, b| display_order(a, b));
    due
}
