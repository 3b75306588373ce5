//! Conversion between terminal cells and chart data coordinates.

use ratatui::layout::Rect;

use super::{AxisConfig, MarkerStyle};
use crate::geometry::Point;

/// Linear map from a drawn canvas area to the fixed axis bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartMapping {
    pub area: Rect,
    pub axes: AxisConfig,
}

impl ChartMapping {
    pub fn new(area: Rect, axes: AxisConfig) -> Self {
        Self { area, axes }
    }

    fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.area.x
            && column < self.area.x + self.area.width
            && row >= self.area.y
            && row < self.area.y + self.area.height
    }

    /// Data coordinates at the centre of a cell, `None` outside the canvas.
    pub fn cell_to_data(&self, column: u16, row: u16) -> Option<Point> {
        if !self.contains(column, row) {
            return None;
        }
        let fx = (column - self.area.x) as f64 + 0.5;
        let fy = (row - self.area.y) as f64 + 0.5;
        let x = self.axes.x.min + fx / self.area.width as f64 * self.axes.x.span();
        let y = self.axes.y.max - fy / self.area.height as f64 * self.axes.y.span();
        Some(Point::new(x, y))
    }

    /// Cell containing a data point, `None` when the point is off the chart.
    pub fn data_to_cell(&self, p: Point) -> Option<(u16, u16)> {
        if self.area.width == 0 || self.area.height == 0 {
            return None;
        }
        let (x, y) = (&self.axes.x, &self.axes.y);
        if p.x < x.min || p.x > x.max || p.y < y.min || p.y > y.max {
            return None;
        }
        let fx = (p.x - x.min) / x.span() * self.area.width as f64;
        let fy = (y.max - p.y) / y.span() * self.area.height as f64;
        let column = (fx.floor() as u16).min(self.area.width - 1);
        let row = (fy.floor() as u16).min(self.area.height - 1);
        Some((self.area.x + column, self.area.y + row))
    }

    /// Data length of one canvas dot, averaged over both axes.
    pub fn dot_size(&self, marker: MarkerStyle) -> f64 {
        let (per_col, per_row) = marker.dots_per_cell();
        let dots_x = (self.area.width as f64 * per_col as f64).max(1.0);
        let dots_y = (self.area.height as f64 * per_row as f64).max(1.0);
        (self.axes.x.span() / dots_x + self.axes.y.span() / dots_y) / 2.0
    }
}

/// Euclidean distance between two cells.
pub fn cell_distance(a: (u16, u16), b: (u16, u16)) -> f64 {
    let dx = a.0 as f64 - b.0 as f64;
    let dy = a.1 as f64 - b.1 as f64;
    dx.hypot(dy)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping() -> ChartMapping {
        // 60x30 cells over [-300, 300]: 10 units per column, 20 per row
        ChartMapping::new(Rect::new(2, 1, 60, 30), AxisConfig::default())
    }

    #[test]
    fn top_left_cell_centre() {
        let p = mapping().cell_to_data(2, 1).unwrap();
        assert!((p.x + 295.0).abs() < 1e-9);
        assert!((p.y - 290.0).abs() < 1e-9);
    }

    #[test]
    fn outside_area_has_no_data_point() {
        assert_eq!(mapping().cell_to_data(1, 5), None);
        assert_eq!(mapping().cell_to_data(62, 5), None);
        assert_eq!(mapping().cell_to_data(10, 31), None);
    }

    #[test]
    fn origin_lands_in_centre_cell() {
        assert_eq!(mapping().data_to_cell(Point::ORIGIN), Some((32, 16)));
    }

    #[test]
    fn cell_centres_round_trip() {
        let m = mapping();
        for (column, row) in [(2, 1), (20, 7), (61, 30), (40, 22)] {
            let p = m.cell_to_data(column, row).unwrap();
            assert_eq!(m.data_to_cell(p), Some((column, row)));
        }
    }

    #[test]
    fn chart_edge_maps_to_last_cell() {
        assert_eq!(mapping().data_to_cell(Point::new(300.0, -300.0)), Some((61, 30)));
        assert_eq!(mapping().data_to_cell(Point::new(300.1, 0.0)), None);
    }

    #[test]
    fn braille_dots_are_finer_than_blocks() {
        let m = mapping();
        assert!(m.dot_size(MarkerStyle::Braille) < m.dot_size(MarkerStyle::Block));
        assert!((m.dot_size(MarkerStyle::Block) - 15.0).abs() < 1e-9);
    }

    #[test]
    fn distance_between_cells() {
        assert_eq!(cell_distance((0, 0), (3, 4)), 5.0);
    }
}
