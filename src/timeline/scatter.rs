use chrono::Timelike;

use super::scale::{LinearScale, SqrtScale, TimeScale};
use super::types::{Commit, ScatterPoint, TimeOfDay};
use crate::config::ChartConfig;

/// Drawable region of the chart after margins are taken off.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartArea {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl ChartArea {
    pub fn from_config(chart: &ChartConfig) -> Self {
        ChartArea {
            top: chart.margin.top,
            right: chart.width - chart.margin.right,
            bottom: chart.height - chart.margin.bottom,
            left: chart.margin.left,
        }
    }
}

/// Project the plotted commits into chart coordinates.
///
/// x follows the commit instant across the extent of the plotted commits,
/// y follows the hour of day (midnight at the bottom), and the radius grows
/// with the square root of the commit size. Points come out largest first
/// so smaller dots are drawn on top; ties keep plotted order.
pub fn layout_points(commits: &[Commit], plotted: &[usize], chart: &ChartConfig) -> Vec<ScatterPoint> {
    let shown: Vec<(usize, &Commit)> = plotted
        .iter()
        .filter_map(|&idx| commits.get(idx).map(|c| (idx, c)))
        .collect();

    let area = ChartArea::from_config(chart);
    let Some(x_scale) = TimeScale::from_extent(
        shown.iter().map(|(_, c)| &c.summary.datetime),
        (area.left, area.right),
    ) else {
        return Vec::new();
    };
    let y_scale = LinearScale::new((0.0, 24.0), (area.bottom, area.top));

    let min_lines = shown.iter().map(|(_, c)| c.summary.total_lines).min().unwrap_or(0);
    let max_lines = shown.iter().map(|(_, c)| c.summary.total_lines).max().unwrap_or(0);
    let r_scale = SqrtScale::new(
        (min_lines as f64, max_lines as f64),
        (chart.radius_min, chart.radius_max),
    );

    let mut points: Vec<ScatterPoint> = shown
        .into_iter()
        .map(|(index, commit)| {
            let summary = &commit.summary;
            let time_of_day = TimeOfDay::from_hour(summary.datetime.hour());
            ScatterPoint {
                index,
                id: summary.id.clone(),
                cx: x_scale.map(&summary.datetime),
                cy: y_scale.map(summary.hour_frac),
                r: r_scale.map(summary.total_lines as f64),
                total_lines: summary.total_lines,
                time_of_day,
                color: time_of_day.color().to_string(),
            }
        })
        .collect();

    points.sort_by(|a, b| b.total_lines.cmp(&a.total_lines));
    points
}
