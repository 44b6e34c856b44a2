use tracing::debug;

use super::layout::Geometry;
use super::links::LinkGraph;
use crate::model::LinkKind;

/// Recursion ceiling for the post-commit cascade. Hitting it halts the
/// cascade, leaving a consistent but possibly unsatisfied layout; cyclic
/// link graphs are bounded, not resolved.
pub const MAX_CASCADE_DEPTH: u32 = 50;

/// Which bar edge a resize gesture is dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEdge {
    Left,
    Right,
}

/// Enforce every link touching `start` after its geometry changed, moving
/// linked tasks and cascading through their links in turn. Every task whose
/// geometry is adjusted is appended to `moved` once, in the order it was
/// first touched.
pub fn cascade(
    geometries: &mut [Option<Geometry>],
    graph: &LinkGraph,
    start: usize,
    moved: &mut Vec<usize>,
) {
    enforce(geometries, graph, start, 0, moved);
}

fn enforce(
    geometries: &mut [Option<Geometry>],
    graph: &LinkGraph,
    task: usize,
    depth: u32,
    moved: &mut Vec<usize>,
) {
    if depth > MAX_CASCADE_DEPTH {
        debug!(task, "link cascade hit depth ceiling, halting");
        return;
    }

    let touching: Vec<usize> = graph.touching(task).collect();
    for edge_index in touching {
        let edge = graph.edge(edge_index);
        // A self-link is a degenerate constraint with nothing to enforce.
        if edge.pred == edge.succ {
            continue;
        }
        let (Some(pred), Some(succ)) = (geometries[edge.pred], geometries[edge.succ]) else {
            continue;
        };

        match edge.kind {
            // The successor anchors; the predecessor is pulled back so it
            // finishes exactly where the successor starts.
            LinkKind::FinishToStart => {
                if succ.left < pred.right {
                    shift(geometries, edge.pred, succ.left - pred.right, moved);
                    enforce(geometries, graph, edge.pred, depth + 1, moved);
                }
            }
            LinkKind::StartToStart => {
                if succ.left > pred.left {
                    shift(geometries, edge.succ, pred.left - succ.left, moved);
                    enforce(geometries, graph, edge.succ, depth + 1, moved);
                }
            }
            LinkKind::FinishToFinish => {
                if succ.right < pred.right {
                    shift(geometries, edge.succ, pred.right - succ.right, moved);
                    enforce(geometries, graph, edge.succ, depth + 1, moved);
                }
            }
            // FinishToStart with the roles swapped.
            LinkKind::StartToFinish => {
                if pred.left < succ.right {
                    shift(geometries, edge.succ, pred.left - succ.right, moved);
                    enforce(geometries, graph, edge.succ, depth + 1, moved);
                }
            }
        }
    }
}

fn shift(geometries: &mut [Option<Geometry>], task: usize, dx: f64, moved: &mut Vec<usize>) {
    if let Some(geometry) = geometries[task].as_mut() {
        geometry.translate_x(dx);
    }
    if !moved.contains(&task) {
        moved.push(task);
    }
}

/// Clamp the dragged edge of `task` against its constrained neighbors, so a
/// resize cannot cross a link boundary in real time. Non-recursive, used on
/// every drag frame; the commit cascade does the real propagation.
///
/// A bound the layout already violates before the drag is not applied, so
/// clamping never teleports an edge. StartToStart ties two starts rather
/// than bounding an edge and is left to the commit cascade.
pub fn clamp_edge(
    geometries: &[Option<Geometry>],
    graph: &LinkGraph,
    task: usize,
    edge: DragEdge,
    x: f64,
    min_width: f64,
) -> f64 {
    let Some(current) = geometries[task] else {
        return x;
    };

    match edge {
        DragEdge::Right => {
            let mut hi = f64::INFINITY;
            for &edge_index in graph.as_pred(task) {
                let link = graph.edge(edge_index);
                if link.pred == link.succ {
                    continue;
                }
                let Some(succ) = geometries[link.succ] else {
                    continue;
                };
                let bound = match link.kind {
                    LinkKind::FinishToStart => succ.left,
                    LinkKind::FinishToFinish => succ.right,
                    _ => continue,
                };
                if current.right <= bound {
                    hi = hi.min(bound);
                }
            }
            for &edge_index in graph.as_succ(task) {
                let link = graph.edge(edge_index);
                if link.pred == link.succ || link.kind != LinkKind::StartToFinish {
                    continue;
                }
                let Some(pred) = geometries[link.pred] else {
                    continue;
                };
                if current.right <= pred.left {
                    hi = hi.min(pred.left);
                }
            }
            x.min(hi).max(current.left + min_width)
        }
        DragEdge::Left => {
            let mut lo = f64::NEG_INFINITY;
            for &edge_index in graph.as_succ(task) {
                let link = graph.edge(edge_index);
                if link.pred == link.succ || link.kind != LinkKind::FinishToStart {
                    continue;
                }
                let Some(pred) = geometries[link.pred] else {
                    continue;
                };
                if current.left >= pred.right {
                    lo = lo.max(pred.right);
                }
            }
            for &edge_index in graph.as_pred(task) {
                let link = graph.edge(edge_index);
                if link.pred == link.succ || link.kind != LinkKind::StartToFinish {
                    continue;
                }
                let Some(succ) = geometries[link.succ] else {
                    continue;
                };
                if current.left >= succ.right {
                    lo = lo.max(succ.right);
                }
            }
            x.max(lo).min(current.right - min_width)
        }
    }
}
