use std::iter;

use average::Mean;
use chrono::Weekday;
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use itertools::Itertools;
use rate_explorer::{
    core::{
        aggregate::HourlyRate,
        calendar::{CalendarCell, MonthGrid, MonthSummary},
        day::DaySummary,
        insights::DailyInsights,
        recommendation::BatteryRecommendation,
    },
    fmt::{FormattedHour, FormattedHourRange, FormattedPercentage},
    quantity::rate::KilowattHourRate,
    statistics::Statistics,
};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

fn mean_rate(rates: impl IntoIterator<Item = KilowattHourRate>) -> KilowattHourRate {
    let estimate: Mean = rates.into_iter().map(KilowattHourRate::into_inner).collect();
    if estimate.is_empty() { KilowattHourRate::ZERO } else { estimate.mean().into() }
}

/// Higher export rates are better.
fn rate_color(rate: KilowattHourRate, mean: KilowattHourRate) -> Color {
    if rate >= mean { Color::Green } else { Color::Red }
}

fn join_hours<'a>(rates: impl IntoIterator<Item = &'a HourlyRate>) -> String {
    rates.into_iter().map(|rate| FormattedHour(rate.hour)).join(", ")
}

pub fn build_day_table(day: &DaySummary, insights: &DailyInsights) -> Table {
    let statistics = &insights.statistics;
    let mut table = new_table();
    table.set_header(vec![
        Cell::new(day.date.format("%A, %b %d, %Y")).add_attribute(Attribute::Bold),
        Cell::new(if day.is_weekend { "Weekend" } else { "Weekday" }).add_attribute(Attribute::Dim),
    ]);
    table.add_row(vec![Cell::new("Minimum"), Cell::new(day.min).fg(Color::Red)]);
    table.add_row(vec![Cell::new("Average"), Cell::new(day.average)]);
    table.add_row(vec![Cell::new("Maximum"), Cell::new(day.max).fg(Color::Green)]);
    table.add_row(vec![
        Cell::new("Best export hour"),
        Cell::new(FormattedHour(day.best_export_hour)).fg(Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Worst export hour"),
        Cell::new(FormattedHour(day.worst_export_hour)).fg(Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("25th percentile"),
        Cell::new(KilowattHourRate::from(statistics.percentile_25)),
    ]);
    table.add_row(vec![
        Cell::new("75th percentile"),
        Cell::new(KilowattHourRate::from(statistics.percentile_75)),
    ]);
    table.add_row(vec![
        Cell::new("Standard deviation"),
        Cell::new(KilowattHourRate::from(statistics.std_dev)).add_attribute(Attribute::Dim),
    ]);
    table.add_row(vec![Cell::new("Peak hours"), Cell::new(join_hours(&insights.peak_hours))]);
    table.add_row(vec![Cell::new("Lowest hours"), Cell::new(join_hours(&insights.lowest_hours))]);
    table
}

pub fn build_hourly_table(day: &DaySummary, insights: &DailyInsights) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Hour").set_alignment(CellAlignment::Right),
        Cell::new("Generation").set_alignment(CellAlignment::Right),
        Cell::new("Delivery").set_alignment(CellAlignment::Right),
        Cell::new("Total").set_alignment(CellAlignment::Right),
        Cell::new("Rank").set_alignment(CellAlignment::Right),
    ]);
    for (rate, rank) in day.hourly.iter().zip(&insights.hourly_ranks) {
        let color = if rank.is_top_quartile {
            Color::Green
        } else if rank.is_bottom_quartile {
            Color::Red
        } else {
            Color::Reset
        };
        table.add_row(vec![
            Cell::new(FormattedHour(rate.hour)).set_alignment(CellAlignment::Right),
            Cell::new(rate.generation)
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Dim),
            Cell::new(rate.delivery)
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Dim),
            Cell::new(rate.total).set_alignment(CellAlignment::Right).fg(color),
            Cell::new(FormattedPercentage(rank.percentile)).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn build_recommendations_table(recommendations: &[BatteryRecommendation]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Hours", "Action", "Priority", "Average", "Reasoning"]);
    for recommendation in recommendations {
        table.add_row(vec![
            Cell::new(FormattedHourRange(recommendation.start_hour, recommendation.end_hour)),
            Cell::new(recommendation.action).fg(recommendation.action.color()),
            Cell::new(recommendation.priority).fg(recommendation.priority.color()),
            Cell::new(recommendation.average_rate).set_alignment(CellAlignment::Right),
            Cell::new(&recommendation.reasoning).add_attribute(Attribute::Dim),
        ]);
    }
    table
}

pub fn build_week_table(days: &[DaySummary]) -> Table {
    let mean = mean_rate(days.iter().map(|day| day.average));
    let mut table = new_table();
    table.set_header(vec!["Date", "Min", "Average", "Max", "Best", "Worst"]);
    for day in days {
        let date = Cell::new(day.date.format("%a %b %d"));
        table.add_row(vec![
            if day.is_weekend { date.add_attribute(Attribute::Dim) } else { date },
            Cell::new(day.min).set_alignment(CellAlignment::Right),
            Cell::new(day.average)
                .set_alignment(CellAlignment::Right)
                .fg(rate_color(day.average, mean)),
            Cell::new(day.max).set_alignment(CellAlignment::Right),
            Cell::new(FormattedHour(day.best_export_hour)),
            Cell::new(FormattedHour(day.worst_export_hour)).add_attribute(Attribute::Dim),
        ]);
    }
    table
}

pub fn build_month_grid_table(grid: &MonthGrid) -> Table {
    let mean =
        mean_rate(grid.cells.iter().filter_map(CalendarCell::summary).map(|day| day.average));
    let mut table = new_table();
    table.set_header(
        iter::successors(Some(Weekday::Sun), |weekday| Some(weekday.succ()))
            .take(7)
            .map(|weekday| Cell::new(weekday).set_alignment(CellAlignment::Center))
            .collect_vec(),
    );
    for week in grid.weeks() {
        table.add_row(week.iter().map(|cell| build_calendar_cell(cell, mean)).collect_vec());
    }
    table
}

fn build_calendar_cell(cell: &CalendarCell, mean: KilowattHourRate) -> Cell {
    match cell {
        CalendarCell::OutsideMonth => Cell::new(""),
        CalendarCell::NoData(date) => {
            Cell::new(format!("{}\nno data", date.format("%d"))).add_attribute(Attribute::Dim)
        }
        CalendarCell::Day(day) => Cell::new(format!("{}\n{}", day.date.format("%d"), day.average))
            .fg(rate_color(day.average, mean)),
    }
}

pub fn build_month_table(months: &[MonthSummary]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Month", "Days", "Daily min", "Daily max", "Average"]);
    for month in months {
        table.add_row(vec![
            Cell::new(format!("{} {}", month.month_name, month.year)),
            Cell::new(month.day_count).set_alignment(CellAlignment::Right),
            Cell::new(month.average_daily_min).set_alignment(CellAlignment::Right).fg(Color::Red),
            Cell::new(month.average_daily_max)
                .set_alignment(CellAlignment::Right)
                .fg(Color::Green),
            Cell::new(month.overall_average).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn build_statistics_table(statistics: &Statistics) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Statistic", "Rate"]);
    table.add_row(vec![
        Cell::new("Count"),
        Cell::new(statistics.count).set_alignment(CellAlignment::Right),
    ]);
    for (name, value) in [
        ("Mean", statistics.mean),
        ("Median", statistics.median),
        ("Minimum", statistics.min),
        ("Maximum", statistics.max),
        ("Standard deviation", statistics.std_dev),
        ("25th percentile", statistics.percentile_25),
        ("50th percentile", statistics.percentile_50),
        ("75th percentile", statistics.percentile_75),
        ("90th percentile", statistics.percentile_90),
        ("95th percentile", statistics.percentile_95),
    ] {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(KilowattHourRate::from(value)).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}
