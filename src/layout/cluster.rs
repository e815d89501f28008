use crate::core::model::{Detection, Line};

/// Groups detections into text lines.
///
/// Detections are sorted by `(y0, x0)` and walked once. A detection joins the
/// current line when its vertical center is strictly closer than
/// `line_y_threshold` to the center of the detection added just before it;
/// otherwise the line is closed and a new one starts. This is single linkage
/// along the sort order, not a 2D clustering: two words at the same height can
/// land in different lines when a word at another height sorts between them.
pub fn cluster_lines(detections: &[Detection], line_y_threshold: f32) -> Vec<Line<'_>> {
    let mut sorted: Vec<&Detection> = detections.iter().collect();
    sorted.sort_by(|a, b| {
        a.bbox
            .y0
            .total_cmp(&b.bbox.y0)
            .then(a.bbox.x0.total_cmp(&b.bbox.x0))
    });

    let mut lines = Vec::new();
    let mut current: Vec<&Detection> = Vec::new();

    for det in sorted {
        if let Some(prev) = current.last() {
            let delta = (det.bbox.center_y() - prev.bbox.center_y()).abs();
            let same_line = delta < line_y_threshold;
            if !same_line {
                lines.push(Line {
                    members: std::mem::take(&mut current),
                });
            }
        }
        current.push(det);
    }

    if !current.is_empty() {
        lines.push(Line { members: current });
    }

    lines
}
