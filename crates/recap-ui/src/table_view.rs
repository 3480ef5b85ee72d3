//! Record and summary tables for the recap dashboard.
//!
//! Renders bordered [`ratatui::widgets::Table`]s: one row per filtered
//! record, and one row per staff member plus a highlighted totals row.

use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use recap_core::formatting;
use recap_core::models::{EntityTotals, Record, RECORD_COLUMNS};

use crate::themes::Theme;

/// Column headers of the summary table.
pub const SUMMARY_COLUMNS: [&str; 3] = ["Name", "Units W/L", "Total Bets"];

/// Display strings for one record, in [`RECORD_COLUMNS`] order.
pub fn record_cells(record: &Record) -> [String; 7] {
    [
        record.entity_name.clone(),
        record.display_date(),
        record.play.clone(),
        record.odds.clone(),
        formatting::format_optional(record.units_risked),
        record.result.clone(),
        formatting::format_optional(record.units_won_lost),
    ]
}

/// Display strings for one summary row, in [`SUMMARY_COLUMNS`] order.
pub fn summary_cells(totals: &EntityTotals) -> [String; 3] {
    [
        totals.entity_name.clone(),
        formatting::format_units(totals.total_net_units),
        totals.total_bets.to_string(),
    ]
}

/// Grand totals across all staff members: `(net units, bets)`.
pub fn grand_total(totals: &[EntityTotals]) -> (f64, usize) {
    totals.iter().fold((0.0, 0), |(units, bets), t| {
        (units + t.total_net_units, bets + t.total_bets)
    })
}

/// Render the filtered record table into `area`.
pub fn render_records_table(frame: &mut Frame, area: Rect, records: &[Record], theme: &Theme) {
    let header = Row::new(
        RECORD_COLUMNS
            .iter()
            .map(|h| Cell::from(*h).style(theme.table_header)),
    )
    .height(1);

    let rows: Vec<Row> = records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            let units_style = record
                .units_won_lost
                .map(|u| theme.units_style(u))
                .unwrap_or(theme.dim);
            let [name, date, play, odds, risked, result, won_lost] = record_cells(record);
            Row::new(vec![
                Cell::from(name),
                Cell::from(date),
                Cell::from(play),
                Cell::from(odds),
                Cell::from(risked),
                Cell::from(result),
                Cell::from(won_lost).style(units_style),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(14),
        Constraint::Length(12),
        Constraint::Min(16),
        Constraint::Length(8),
        Constraint::Length(13),
        Constraint::Length(8),
        Constraint::Length(15),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" List of Selected Staff and Dates ({}) ", records.len())),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Render the per-staff summary table into `area`.
pub fn render_summary_table(frame: &mut Frame, area: Rect, totals: &[EntityTotals], theme: &Theme) {
    let header = Row::new(
        SUMMARY_COLUMNS
            .iter()
            .map(|h| Cell::from(*h).style(theme.table_header)),
    )
    .height(1);

    let mut rows: Vec<Row> = totals
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            let [name, units, bets] = summary_cells(t);
            Row::new(vec![
                Cell::from(name),
                Cell::from(units).style(theme.units_style(t.total_net_units)),
                Cell::from(bets),
            ])
            .style(style)
        })
        .collect();

    let (units, bets) = grand_total(totals);
    rows.push(
        Row::new(vec![
            Cell::from("TOTAL"),
            Cell::from(formatting::format_units(units)),
            Cell::from(bets.to_string()),
        ])
        .style(theme.table_total),
    );

    let widths = [
        Constraint::Length(16),
        Constraint::Length(14),
        Constraint::Length(12),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Summary Over Selected Period "),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Render a placeholder when the filter matched nothing.
pub fn render_no_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No bets match the selected staff and dates", theme.warning)),
        Line::from(""),
        Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Notify Betting Recaps "),
        ),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn make_records() -> Vec<Record> {
        vec![
            Record {
                entity_name: "Caleb".to_string(),
                date: NaiveDate::from_ymd_opt(2023, 3, 15).unwrap(),
                play: "Lakers ML".to_string(),
                odds: "-110".to_string(),
                units_risked: Some(1.0),
                result: "W".to_string(),
                units_won_lost: Some(0.91),
            },
            Record {
                entity_name: "Yous".to_string(),
                date: NaiveDate::from_ymd_opt(2023, 4, 1).unwrap(),
                play: "Chiefs -3".to_string(),
                odds: "-105".to_string(),
                units_risked: None,
                result: "P".to_string(),
                units_won_lost: None,
            },
        ]
    }

    fn make_totals() -> Vec<EntityTotals> {
        vec![
            EntityTotals {
                entity_name: "Caleb".to_string(),
                total_net_units: 4.5,
                total_bets: 10,
            },
            EntityTotals {
                entity_name: "Yous".to_string(),
                total_net_units: -2.0,
                total_bets: 3,
            },
        ]
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_record_cells() {
        let cells = record_cells(&make_records()[0]);
        assert_eq!(
            cells,
            [
                "Caleb".to_string(),
                "15/03/2023".to_string(),
                "Lakers ML".to_string(),
                "-110".to_string(),
                "1.00".to_string(),
                "W".to_string(),
                "0.91".to_string(),
            ]
        );
        let missing = record_cells(&make_records()[1]);
        assert_eq!(missing[4], "-");
        assert_eq!(missing[6], "-");
    }

    #[test]
    fn test_summary_cells_and_grand_total() {
        let totals = make_totals();
        assert_eq!(
            summary_cells(&totals[1]),
            ["Yous".to_string(), "-2.00u".to_string(), "3".to_string()]
        );
        assert_eq!(grand_total(&totals), (2.5, 13));
        assert_eq!(grand_total(&[]), (0.0, 0));
    }

    #[test]
    fn test_render_records_table() {
        let mut terminal = Terminal::new(TestBackend::new(110, 12)).unwrap();
        let theme = Theme::dark();
        let records = make_records();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_records_table(frame, area, &records, &theme);
            })
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Units Won/Lost"));
        assert!(text.contains("15/03/2023"));
        assert!(text.contains("Chiefs -3"));
    }

    #[test]
    fn test_render_summary_table() {
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        let theme = Theme::light();
        let totals = make_totals();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_summary_table(frame, area, &totals, &theme);
            })
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("+4.50u"));
        assert!(text.contains("TOTAL"));
        assert!(text.contains("13"));
    }

    #[test]
    fn test_render_empty_tables_do_not_panic() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let theme = Theme::classic();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_records_table(frame, area, &[], &theme);
                render_summary_table(frame, area, &[], &theme);
                render_no_data(frame, area, &theme);
            })
            .unwrap();
    }
}
