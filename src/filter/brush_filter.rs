use serde::{Deserialize, Serialize};

use crate::timeline::types::ScatterPoint;

/// An axis-aligned rectangle dragged over the chart, in chart coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushRect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BrushRect {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        BrushRect { x0, y0, x1, y1 }
    }

    /// Closed containment test; corners may be given in any order.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let (min_x, max_x) = (self.x0.min(self.x1), self.x0.max(self.x1));
        let (min_y, max_y) = (self.y0.min(self.y1), self.y0.max(self.y1));
        min_x <= x && x <= max_x && min_y <= y && y <= max_y
    }
}

/// Commits whose plotted point falls inside `rect`.
///
/// Returns commit indices in plotted-point order. No rectangle selects
/// nothing. The caller replaces its selection with the result wholesale.
pub fn select_in_rect(points: &[ScatterPoint], rect: Option<&BrushRect>) -> Vec<usize> {
    let Some(rect) = rect else {
        return Vec::new();
    };
    points
        .iter()
        .filter(|p| rect.contains(p.cx, p.cy))
        .map(|p| p.index)
        .collect()
}

/// Text for the selection counter.
pub fn selection_label(count: usize) -> String {
    match count {
        0 => "No commits selected".to_string(),
        1 => "1 commit selected".to_string(),
        n => format!("{} commits selected", n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::types::TimeOfDay;

    fn point(index: usize, cx: f64, cy: f64) -> ScatterPoint {
        ScatterPoint {
            index,
            id: format!("c{}", index),
            cx,
            cy,
            r: 5.0,
            total_lines: 1,
            time_of_day: TimeOfDay::Morning,
            color: TimeOfDay::Morning.color().to_string(),
        }
    }

    #[test]
    fn test_select_inside_and_on_edges() {
        let points = vec![point(0, 10.0, 10.0), point(1, 50.0, 50.0), point(2, 100.0, 20.0)];
        let rect = BrushRect::new(10.0, 10.0, 50.0, 50.0);
        assert_eq!(select_in_rect(&points, Some(&rect)), vec![0, 1]);
    }

    #[test]
    fn test_select_with_reversed_corners() {
        let points = vec![point(0, 10.0, 10.0), point(1, 50.0, 50.0)];
        let rect = BrushRect::new(60.0, 60.0, 40.0, 40.0);
        assert_eq!(select_in_rect(&points, Some(&rect)), vec![1]);
    }

    #[test]
    fn test_no_rect_clears() {
        let points = vec![point(0, 10.0, 10.0)];
        assert!(select_in_rect(&points, None).is_empty());
    }

    #[test]
    fn test_selection_label() {
        assert_eq!(selection_label(0), "No commits selected");
        assert_eq!(selection_label(1), "1 commit selected");
        assert_eq!(selection_label(4), "4 commits selected");
    }
}
