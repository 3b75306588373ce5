use crate::geometry::Point;

/// Split a line into the visible pieces of a dash pattern.
///
/// `on` and `off` are lengths in data units. A degenerate pattern yields the
/// whole line.
pub fn dash_pieces(start: Point, end: Point, on: f64, off: f64) -> Vec<(Point, Point)> {
    let length = start.distance(end);
    if length == 0.0 || on <= 0.0 || off < 0.0 {
        return vec![(start, end)];
    }

    let mut pieces = Vec::new();
    let mut at = 0.0;
    while at < length {
        let stop = (at + on).min(length);
        pieces.push((start.lerp(end, at / length), start.lerp(end, stop / length)));
        at = stop + off;
    }
    pieces
}
