//! Month-to-month PnL chart.
//!
//! Draws one line plus one scatter dataset per staff member from the dense
//! long-form series.

use chrono::Datelike;
use ratatui::{
    layout::Rect,
    style::Style,
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use recap_core::models::{Bucket, SeriesPoint};

use crate::themes::Theme;

/// Points of one staff member's series as `(month index, net units)`.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySeries {
    pub entity_name: String,
    pub points: Vec<(f64, f64)>,
}

/// Month index used as the x coordinate (`year * 12 + month - 1`).
pub fn month_index(point: &SeriesPoint) -> f64 {
    let d = point.date.date();
    (d.year() * 12 + d.month0() as i32) as f64
}

fn bucket_from_index(idx: f64) -> Bucket {
    let i = idx.round() as i32;
    Bucket::new(i.div_euclid(12), i.rem_euclid(12) as u32 + 1)
}

/// Split the long series into per-staff point lists, keeping first-seen order.
pub fn split_by_entity(series: &[SeriesPoint]) -> Vec<EntitySeries> {
    let mut out: Vec<EntitySeries> = Vec::new();
    for point in series {
        let xy = (month_index(point), point.net_units);
        match out.iter_mut().find(|s| s.entity_name == point.entity_name) {
            Some(s) => s.points.push(xy),
            None => out.push(EntitySeries {
                entity_name: point.entity_name.clone(),
                points: vec![xy],
            }),
        }
    }
    out
}

/// X and Y bounds with a little vertical padding; zero is always in range.
pub fn chart_bounds(series: &[EntitySeries]) -> ([f64; 2], [f64; 2]) {
    let all = series.iter().flat_map(|s| s.points.iter());
    let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut y_min, mut y_max) = (0.0_f64, 0.0_f64);
    for &(x, y) in all {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    if !x_min.is_finite() {
        return ([0.0, 1.0], [-1.0, 1.0]);
    }
    if x_max - x_min < 1.0 {
        x_max = x_min + 1.0;
    }
    let range = y_max - y_min;
    let pad = if range > 0.0 { range * 0.05 } else { 1.0 };
    ([x_min, x_max], [y_min - pad, y_max + pad])
}

/// Render the PnL chart into `area`.
pub fn render_pnl_chart(frame: &mut Frame, area: Rect, series: &[SeriesPoint], theme: &Theme) {
    let per_entity = split_by_entity(series);
    let (x_bounds, y_bounds) = chart_bounds(&per_entity);

    let mut datasets = Vec::with_capacity(per_entity.len() * 2);
    for (idx, s) in per_entity.iter().enumerate() {
        let style = Style::default().fg(theme.series_color(idx));
        datasets.push(
            Dataset::default()
                .name(s.entity_name.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(style)
                .data(&s.points),
        );
        datasets.push(
            Dataset::default()
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(style)
                .data(&s.points),
        );
    }

    let x_labels = vec![
        Span::raw(bucket_from_index(x_bounds[0]).to_string()),
        Span::raw(bucket_from_index(x_bounds[1]).to_string()),
    ];
    let y_mid = (y_bounds[0] + y_bounds[1]) / 2.0;
    let y_labels = vec![
        Span::raw(format!("{:.1}", y_bounds[0])),
        Span::raw(format!("{:.1}", y_mid)),
        Span::raw(format!("{:.1}", y_bounds[1])),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Month-to-month PnL (Units) ", theme.header)),
        )
        .x_axis(
            Axis::default()
                .title(Span::styled("Date", theme.dim))
                .style(theme.dim)
                .bounds(x_bounds)
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("Units W/L (Monthly)", theme.dim))
                .style(theme.dim)
                .bounds(y_bounds)
                .labels(y_labels),
        );

    frame.render_widget(chart, area);
}

// ── Tests ──────────────────────────────────────────────────────────────────────
