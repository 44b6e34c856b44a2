use super::layout::Geometry;
use crate::model::LinkKind;

/// Connector geometry for one link: an orthogonal polyline from the
/// predecessor's anchor edge to the successor's, plus the arrowhead
/// triangle at the successor end.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkRoute {
    pub points: Vec<(f64, f64)>,
    pub arrow: [(f64, f64); 3],
}

impl LinkRoute {
    /// Render the polyline as an SVG path string with relative h/v
    /// segments.
    pub fn svg_path(&self) -> String {
        let mut d = String::new();
        let Some(&(x0, y0)) = self.points.first() else {
            return d;
        };
        d.push_str(&format!("M{x0} {y0}"));
        let mut prev = (x0, y0);
        for &(x, y) in &self.points[1..] {
            let (dx, dy) = (x - prev.0, y - prev.1);
            if dx != 0.0 {
                d.push_str(&format!(" h {dx}"));
            } else if dy != 0.0 {
                d.push_str(&format!(" v {dy}"));
            }
            prev = (x, y);
        }
        d
    }
}

/// Route one link between two positioned bars.
///
/// The route leaves the predecessor edge by `spacing`, and enters the
/// successor edge through a `spacing` stub. When the successor anchor
/// clears the predecessor anchor by more than twice the spacing the route
/// needs a single vertical run; otherwise it doubles back through a
/// mid-row vertical pair.
pub fn link_route(
    kind: LinkKind,
    pred: &Geometry,
    succ: &Geometry,
    spacing: f64,
    arrow_size: f64,
) -> LinkRoute {
    // Finish anchors sit on the right edge (leaving toward +x), start
    // anchors on the left (leaving toward -x).
    let (px, out_dir) = match kind {
        LinkKind::FinishToStart | LinkKind::FinishToFinish => (pred.right, 1.0),
        LinkKind::StartToStart | LinkKind::StartToFinish => (pred.left, -1.0),
    };
    // Approach direction into the successor edge; also the arrow heading.
    let (sx, in_dir) = match kind {
        LinkKind::FinishToStart | LinkKind::StartToStart => (succ.left, 1.0),
        LinkKind::FinishToFinish | LinkKind::StartToFinish => (succ.right, -1.0),
    };
    let (py, sy) = (pred.mid_y(), succ.mid_y());

    let stub_out = px + out_dir * spacing;
    let stub_in = sx - in_dir * spacing;

    let mut points = vec![(px, py)];
    if (stub_in - stub_out) * in_dir > 0.0 {
        points.push((stub_out, py));
        points.push((stub_out, sy));
        points.push((sx, sy));
    } else {
        let mid_y = (py + sy) / 2.0;
        points.push((stub_out, py));
        points.push((stub_out, mid_y));
        points.push((stub_in, mid_y));
        points.push((stub_in, sy));
        points.push((sx, sy));
    }

    let arrow = [
        (sx, sy),
        (sx - in_dir * arrow_size, sy - arrow_size / 2.0),
        (sx - in_dir * arrow_size, sy + arrow_size / 2.0),
    ];
    LinkRoute { points, arrow }
}
