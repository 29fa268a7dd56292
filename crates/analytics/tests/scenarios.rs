use analytics::{AnalyticsError, WeeklyAnalyzer};
use core_types::{CanonicalColumn, Cell, DayName, RawTable};
use normalizer::NormalizeError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const ENGLISH: [&str; 7] = ["Date", "Price", "Open", "High", "Low", "Vol.", "Change %"];
const LOCALIZED: [&str; 7] = ["Fecha", "Último", "Abertura", "Máxima", "Mínima", "Vol.", "Var %"];

/// Builds a table for the week of Monday 15/01/2024, newest row first like a
/// typical export. Each entry is (day of month, change%).
fn week_table(header: [&str; 7], days: &[(u32, &str)]) -> RawTable {
    let mut rows = vec![header.iter().map(|h| Cell::from(*h)).collect::<Vec<_>>()];
    for (day, change) in days.iter().rev() {
        rows.push(vec![
            Cell::from(format!("{day:02}/01/2024")),
            Cell::from("101.50"),
            Cell::from("100.00"),
            Cell::from("102.00"),
            Cell::from("99.50"),
            Cell::from("1.25K"),
            Cell::from(*change),
        ]);
    }
    RawTable::from_rows(rows)
}

#[test]
fn scenario_a_full_week_trajectory() {
    let table = week_table(
        ENGLISH,
        &[(15, "1.0%"), (16, "-0.5%"), (17, "2.0%"), (18, "0.5%"), (19, "-1.0%")],
    );
    let analysis = WeeklyAnalyzer::default().process_table(&table).unwrap();
    assert_eq!(analysis.report.total_weeks, 1);
    let week = &analysis.report.weekly_results[0];

    let cumulative: Vec<Decimal> = week.daily_progress.iter().map(|p| p.cumulative).collect();
    assert_eq!(cumulative, vec![dec!(1.0), dec!(0.5), dec!(2.5), dec!(3.0), dec!(2.0)]);
    assert_eq!(week.final_change, dec!(2.0));
    assert_eq!(week.highest_point.day, DayName::Thursday);
    assert_eq!(week.highest_point.value, dec!(3.0));
    assert_eq!(week.turned_positive, Some(DayName::Monday));
    assert_eq!(week.turned_negative, None);
    assert!(analysis.diagnostics.is_empty());
}

#[test]
fn scenario_b_missing_friday_is_still_reported() {
    let table = week_table(
        ENGLISH,
        &[(15, "1.0%"), (16, "-0.5%"), (17, "2.0%"), (18, "0.5%")],
    );
    let report = WeeklyAnalyzer::default().process_table(&table).unwrap().report;
    assert_eq!(report.total_weeks, 1);

    let week = &report.weekly_results[0];
    assert_eq!(week.days_in_week, 4);
    assert_eq!(week.daily_progress.len(), 5);
    let friday = &week.daily_progress[4];
    assert_eq!(friday.day, DayName::Friday);
    assert!(friday.is_market_closed);
    assert_eq!(friday.change, Decimal::ZERO);
    assert_eq!(friday.date.to_string(), "2024-01-19");
    assert_eq!(week.week_end.to_string(), "2024-01-18");
}

#[test]
fn three_day_week_is_dropped() {
    let table = week_table(ENGLISH, &[(15, "1.0%"), (16, "-0.5%"), (17, "2.0%")]);
    let report = WeeklyAnalyzer::default().process_table(&table).unwrap().report;
    assert!(report.weekly_results.is_empty());
    assert_eq!(report.total_weeks, 0);
}

#[test]
fn scenario_c_non_numeric_high_fails_the_call() {
    let mut table = week_table(
        ENGLISH,
        &[(15, "1.0%"), (16, "-0.5%"), (17, "2.0%"), (18, "0.5%")],
    );
    table.rows[1][3] = Cell::from("high?");

    let err = WeeklyAnalyzer::default().process_table(&table).unwrap_err();
    match err {
        AnalyticsError::Normalization(NormalizeError::InvalidNumber { row, column, value }) => {
            assert_eq!(row, 2);
            assert_eq!(column, CanonicalColumn::High);
            assert_eq!(value, "high?");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn scenario_d_unparsable_volume_is_coerced() {
    let mut table = week_table(
        ENGLISH,
        &[(15, "1.0%"), (16, "-0.5%"), (17, "2.0%"), (18, "0.5%"), (19, "-1.0%")],
    );
    table.rows[0][5] = Cell::from("N/A");

    let analysis = WeeklyAnalyzer::default().process_table(&table).unwrap();
    assert_eq!(analysis.report.total_weeks, 1);
    assert_eq!(analysis.report.weekly_results[0].days_in_week, 5);
    assert_eq!(analysis.diagnostics.len(), 1);
    let warning = &analysis.diagnostics.warnings()[0];
    assert_eq!(warning.column, Some(CanonicalColumn::Volume));
    assert_eq!(warning.row, Some(1));
}

#[test]
fn scenario_e_localized_header_matches_english() {
    let days = [(15, "1,0%"), (16, "-0,5%"), (17, "2,0%"), (18, "0,5%"), (19, "-1,0%")];
    let english_days = [(15, "1.0%"), (16, "-0.5%"), (17, "2.0%"), (18, "0.5%"), (19, "-1.0%")];

    let localized = WeeklyAnalyzer::default()
        .process_table(&week_table(LOCALIZED, &days))
        .unwrap();
    let english = WeeklyAnalyzer::default()
        .process_table(&week_table(ENGLISH, &english_days))
        .unwrap();

    assert_eq!(localized.report, english.report);
}

#[test]
fn bad_date_fails_the_whole_call() {
    let mut table = week_table(
        ENGLISH,
        &[(15, "1.0%"), (16, "-0.5%"), (17, "2.0%"), (18, "0.5%")],
    );
    table.rows[2][0] = Cell::from("32/13/2024");
    let err = WeeklyAnalyzer::default().process_table(&table).unwrap_err();
    assert!(matches!(
        err,
        AnalyticsError::Normalization(NormalizeError::DateParse { row: 3, .. })
    ));
}

#[test]
fn missing_columns_fail_with_schema_error() {
    let table = RawTable::from_rows(vec![vec![Cell::from("Date"), Cell::from("Price")]]);
    let err = WeeklyAnalyzer::default().process_table(&table).unwrap_err();
    assert!(matches!(
        err,
        AnalyticsError::Normalization(NormalizeError::Schema { .. })
    ));
}

#[test]
fn header_only_table_is_an_empty_report() {
    let table = week_table(ENGLISH, &[]);
    let analysis = WeeklyAnalyzer::default().process_table(&table).unwrap();
    assert_eq!(analysis.report.total_weeks, 0);
}

#[test]
fn report_serializes_dates_and_numbers() {
    let table = week_table(
        ENGLISH,
        &[(15, "1.0%"), (16, "-0.5%"), (17, "2.0%"), (18, "0.5%")],
    );
    let report = WeeklyAnalyzer::default().process_table(&table).unwrap().report;
    let json = serde_json::to_value(&report).unwrap();

    let week = &json["weekly_results"][0];
    assert_eq!(week["week_start"], "2024-01-15");
    // Friday is missing, so the week ends on its last trading day.
    assert_eq!(week["week_end"], "2024-01-18");
    assert_eq!(week["daily_progress"].as_array().map(Vec::len), Some(5));
    assert_eq!(week["daily_progress"][4]["day"], "Friday");
    assert_eq!(week["daily_progress"][0]["trend"], "up");
    assert!(week["final_change"].is_number());
    assert_eq!(week["longest_streak"]["direction"], "positive");
    assert_eq!(json["total_weeks"], 1);
}

#[test]
fn tiny_low_price_does_not_overflow_range_metrics() {
    let table = RawTable::from_rows(vec![
        ENGLISH.iter().map(|h| Cell::from(*h)).collect(),
        vec![
            Cell::from("15/01/2024"),
            Cell::from("10"),
            Cell::from("10"),
            Cell::from("10"),
            Cell::from("0.00000000000000000000000001"),
            Cell::Empty,
            Cell::from("1.0%"),
        ],
    ]);
    let config = configuration::AnalysisConfig {
        min_days_per_week: 1,
        ..Default::default()
    };
    let report = WeeklyAnalyzer::new(config)
        .unwrap()
        .process_table(&table)
        .unwrap()
        .report;
    assert_eq!(report.total_weeks, 1);
    assert_eq!(report.weekly_results[0].max_volatility.range_pct, Decimal::ZERO);
}

#[test]
fn two_digit_years_land_in_the_right_century() {
    let mut table = week_table(
        ENGLISH,
        &[(15, "1.0%"), (16, "-0.5%"), (17, "2.0%"), (18, "0.5%")],
    );
    for row in table.rows.iter_mut() {
        if let Some(Cell::Text(date)) = row.first_mut() {
            *date = date.replace("/2024", "/24");
        }
    }
    let report = WeeklyAnalyzer::default().process_table(&table).unwrap().report;
    assert_eq!(report.total_weeks, 1);
    assert_eq!(report.weekly_results[0].week_start.to_string(), "2024-01-15");
}
