//! Daily status overview for CLI.

use chrono::NaiveDate;
use momentum_core::stats::ProductivityStats;
use momentum_core::storage::Database;
use momentum_core::{Config, Dashboard, Plan};
use serde::Serialize;

#[derive(Serialize)]
struct StatusView {
    date: NaiveDate,
    plan_day: i64,
    plan_length: i64,
    quote: &'static str,
    stats: ProductivityStats,
    todos_open: usize,
    todos_done: usize,
    habits_done: usize,
    habits_total: usize,
    slots_done: usize,
    slots_total: usize,
}

pub fn run(date: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let date = super::date_arg(date)?;
    let config = Config::load_or_default();
    let dashboard = Dashboard::with_streak_policy(Database::open()?, config.streak_policy());
    let plan = Plan::builtin();
    let day = plan.day_number(date);

    let todos = dashboard.todos(date);
    let view = StatusView {
        date,
        plan_day: day,
        plan_length: plan.length_days(),
        quote: plan.quote_of_day(day),
        stats: dashboard.productivity_stats(date),
        todos_open: todos.iter().filter(|t| !t.is_done).count(),
        todos_done: todos.iter().filter(|t| t.is_done).count(),
        habits_done: dashboard.habit_completions(date).len(),
        habits_total: dashboard.habits().len(),
        slots_done: dashboard.schedule_completions(date).len(),
        slots_total: dashboard.schedule().len(),
    };
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}
