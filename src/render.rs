use analytics::{Analysis, DailyAnalysis, WeeklyResult};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use core_types::{DayName, Diagnostics};
use rust_decimal::Decimal;

pub fn print_weekly(analysis: &Analysis) {
    if analysis.report.is_empty() {
        println!("No week had enough trading days to report.");
    }
    for week in &analysis.report.weekly_results {
        println!("{}", week_heading(week));
        println!("{}", week_table(week));
        println!("{}\n", week_summary(week));
    }
    println!("Total weeks: {}", analysis.report.total_weeks);
    print_diagnostics(&analysis.diagnostics);
}

pub fn print_daily(analysis: &DailyAnalysis) {
    let summary = &analysis.summary;
    let mut table = new_table();
    table.set_header(vec!["", "Days", "Average %"]);
    table.add_row(vec![
        "Positive".to_string(),
        summary.positive_count.to_string(),
        pct(summary.positive_avg),
    ]);
    table.add_row(vec![
        "Negative".to_string(),
        summary.negative_count.to_string(),
        pct(summary.negative_avg),
    ]);
    println!("{table}");
    print_diagnostics(&analysis.diagnostics);
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn week_heading(week: &WeeklyResult) -> String {
    format!(
        "Week {} to {} ({} trading days)",
        week.week_start.format("%d/%m/%Y"),
        week.week_end.format("%d/%m/%Y"),
        week.days_in_week
    )
}

fn week_table(week: &WeeklyResult) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Day", "Date", "Change %", "Cumulative %", "", "Range %"]);
    for day in &week.daily_progress {
        let date = if day.is_market_closed {
            "closed".to_string()
        } else {
            day.date.format("%d/%m/%Y").to_string()
        };
        table.add_row(vec![
            day.day.to_string(),
            date,
            pct(day.change),
            pct(day.cumulative),
            day.trend.arrow().to_string(),
            pct(day.range_pct),
        ]);
    }
    table
}

fn week_summary(week: &WeeklyResult) -> String {
    let streak = match week.longest_streak.direction {
        Some(direction) => format!(
            "{} {:?} day(s) from {}",
            week.longest_streak.count,
            direction,
            day_or_none(week.longest_streak.days.first().copied())
        ),
        None => "none".to_string(),
    };
    [
        format!("Final change: {}%", pct(week.final_change)),
        format!(
            "Highest point: {}% on {}",
            pct(week.highest_point.value),
            week.highest_point.day
        ),
        format!(
            "Best day: {} ({}%), worst day: {} ({}%)",
            day_or_none(week.best_day.day),
            pct(week.best_day.value),
            day_or_none(week.worst_day.day),
            pct(week.worst_day.value)
        ),
        format!(
            "Average up: {}%, average down: {}%",
            pct(week.avg_positive),
            pct(week.avg_negative)
        ),
        format!(
            "Turned positive: {}, turned negative: {}",
            day_or_none(week.turned_positive),
            day_or_none(week.turned_negative)
        ),
        format!("Longest streak: {streak}"),
        format!(
            "Most volatile: {} ({}% range)",
            week.max_volatility.day,
            pct(week.max_volatility.range_pct)
        ),
    ]
    .join("\n")
}

fn print_diagnostics(diagnostics: &Diagnostics) {
    if diagnostics.is_empty() {
        return;
    }
    eprintln!("{} warning(s):", diagnostics.len());
    for warning in diagnostics.warnings() {
        let row = warning.row.map_or_else(String::new, |row| format!("row {row}: "));
        eprintln!("  {row}{}", warning.message);
    }
}

fn day_or_none(day: Option<DayName>) -> String {
    day.map_or_else(|| "none".to_string(), |d| d.to_string())
}

fn pct(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}
