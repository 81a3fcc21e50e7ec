use crate::models::{AppData, Task, Team};
use crate::schedule::{is_overdue, tasks_due_on};
use chrono::NaiveDate;

pub fn render_index(date: NaiveDate, data: &AppData) -> String {
    INDEX_HTML
        .replace("{{DATE}}", &date.format("%A %d %B %Y").to_string())
        .replace("{{BUTCHERY}}", &render_tasks(data, date, Team::Butchery))
        .replace("{{MAINTENANCE}}", &render_tasks(data, date, Team::Maintenance))
        .replace("{{STOCK}}", &render_stock(data))
}

/// Open work only; finished tasks drop off the overview.
fn render_tasks(data: &AppData, date: NaiveDate, team: Team) -> String {
    let open: Vec<&Task> = tasks_due_on(&data.tasks, date, Some(team))
        .into_iter()
        .filter(|task| !task.is_completed)
        .collect();
    if open.is_empty() {
        return r#"<li class="empty">No tasks due today.</li>"#.to_string();
    }
    open.into_iter().map(|task| render_task(task, date)).collect()
}

fn render_task(task: &Task, today: NaiveDate) -> String {
    let mut classes = vec!["task"];
    if is_overdue(task, today) {
        classes.push("overdue");
    }
    let time = task
        .time
        .as_deref()
        .map(|time| format!(r#"<span class="time">{}</span>"#, escape(time)))
        .unwrap_or_default();
    format!(
        r#"<li class="{}" data-id="{}">{time}<span class="title">{}</span></li>"#,
        classes.join(" "),
        escape(&task.id),
        escape(&task.title),
    )
}

fn render_stock(data: &AppData) -> String {
    data.stock_items
        .iter()
        .map(|item| {
            format!(
                "<tr><td>{}</td><td>{:.3} kg</td><td>${:.2} / kg</td></tr>",
                escape(&item.name),
                item.current_stock_kg,
                item.price_per_kg_usd
            )
        })
        .collect()
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Farm Operations</title>
  <style>
    :root {
      --bg-1: #f3f1ea;
      --ink: #2b2a28;
      --accent: #b5452f;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg-1);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: start center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(960px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    h1 {
      font-family: "Georgia", serif;
      margin: 0;
    }

    .subtitle {
      margin: 6px 0 0;
      color: #5f5c57;
    }

    .teams {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(280px, 1fr));
      gap: 16px;
    }

    .card {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    .card h2 {
      margin: 0 0 12px;
      font-size: 1.2rem;
      color: var(--accent-2);
    }

    ul {
      list-style: none;
      margin: 0;
      padding: 0;
      display: grid;
      gap: 8px;
    }

    .task {
      display: flex;
      gap: 10px;
      padding: 10px 12px;
      border-radius: 12px;
      background: rgba(47, 72, 88, 0.05);
    }

    .task.overdue {
      border-left: 4px solid var(--accent);
    }

    .time {
      font-family: monospace;
      color: var(--accent-2);
    }

    .empty {
      color: #8b857d;
    }

    table {
      width: 100%;
      border-collapse: collapse;
    }

    td {
      padding: 8px 4px;
      border-bottom: 1px solid rgba(47, 72, 88, 0.08);
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Farm Operations</h1>
      <p class="subtitle">{{DATE}}</p>
    </header>

    <section class="teams">
      <div class="card">
        <h2>Butchery</h2>
        <ul>{{BUTCHERY}}</ul>
      </div>
      <div class="card">
        <h2>Maintenance</h2>
        <ul>{{MAINTENANCE}}</ul>
      </div>
    </section>

    <section class="card">
      <h2>Stock</h2>
      <table>{{STOCK}}</table>
    </section>
  </main>
</body>
</html>
"#;
