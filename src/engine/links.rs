use std::collections::HashMap;

use crate::model::{LinkKind, Task};

/// A resolved link: indices into the snapshot's task list, predecessor
/// first (the task that declared the link).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkEdge {
    pub pred: usize,
    pub succ: usize,
    pub kind: LinkKind,
}

/// Adjacency over the current snapshot. Rebuilt wholesale on every update;
/// never persisted across snapshots.
#[derive(Debug, Default)]
pub struct LinkGraph {
    edges: Vec<LinkEdge>,
    by_pred: Vec<Vec<usize>>,
    by_succ: Vec<Vec<usize>>,
}

impl LinkGraph {
    /// Resolve every declared link against the task list. Links whose
    /// target id matches no present task are dropped. Self-links are kept
    /// structurally; enforcement treats them as inert.
    pub fn build(tasks: &[Task]) -> Self {
        let mut by_id: HashMap<&str, usize> = HashMap::new();
        for (index, task) in tasks.iter().enumerate() {
            by_id.entry(task.id.as_str()).or_insert(index);
        }

        let mut graph = Self {
            edges: Vec::new(),
            by_pred: vec![Vec::new(); tasks.len()],
            by_succ: vec![Vec::new(); tasks.len()],
        };
        for (pred, task) in tasks.iter().enumerate() {
            for link in &task.links {
                let Some(&succ) = by_id.get(link.target_id.as_str()) else {
                    continue;
                };
                let edge_index = graph.edges.len();
                graph.edges.push(LinkEdge {
                    pred,
                    succ,
                    kind: link.kind,
                });
                graph.by_pred[pred].push(edge_index);
                graph.by_succ[succ].push(edge_index);
            }
        }
        graph
    }

    pub fn edges(&self) -> &[LinkEdge] {
        &self.edges
    }

    pub fn edge(&self, index: usize) -> LinkEdge {
        self.edges[index]
    }

    /// Edge indices where `task` is the predecessor.
    pub fn as_pred(&self, task: usize) -> &[usize] {
        &self.by_pred[task]
    }

    /// Edge indices where `task` is the successor.
    pub fn as_succ(&self, task: usize) -> &[usize] {
        &self.by_succ[task]
    }

    /// Every edge touching `task`, predecessor side first. Propagation
    /// reacts to edits on either end of a link.
    pub fn touching(&self, task: usize) -> impl Iterator<Item = usize> + '_ {
        self.by_pred[task]
            .iter()
            .chain(self.by_succ[task].iter())
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Link, LinkKind, Task};
    use chrono::{TimeZone, Utc};

    fn task(id: &str, links: Vec<Link>) -> Task {
        let d = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut t = Task::new(id, id, d, d);
        t.links = links;
        t
    }

    #[test]
    fn resolves_links_to_indices() {
        let tasks = vec![
            task("a", vec![Link::new("b", LinkKind::FinishToStart)]),
            task("b", vec![]),
        ];
        let graph = LinkGraph::build(&tasks);
        assert_eq!(
            graph.edges(),
            &[LinkEdge {
                pred: 0,
                succ: 1,
                kind: LinkKind::FinishToStart
            }]
        );
        assert_eq!(graph.as_pred(0), &[0]);
        assert_eq!(graph.as_succ(1), &[0]);
    }

    #[test]
    fn dangling_target_is_dropped() {
        let tasks = vec![task("a", vec![Link::new("ghost", LinkKind::StartToStart)])];
        let graph = LinkGraph::build(&tasks);
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn self_link_is_kept_structurally() {
        let tasks = vec![task("a", vec![Link::new("a", LinkKind::FinishToStart)])];
        let graph = LinkGraph::build(&tasks);
        assert_eq!(graph.edges().len(), 1);
        assert_eq!(graph.edges()[0].pred, graph.edges()[0].succ);
    }

    #[test]
    fn touching_sees_both_ends() {
        let tasks = vec![
            task("a", vec![Link::new("b", LinkKind::FinishToFinish)]),
            task("b", vec![Link::new("a", LinkKind::StartToStart)]),
        ];
        let graph = LinkGraph::build(&tasks);
        let touching_a: Vec<usize> = graph.touching(0).collect();
        assert_eq!(touching_a.len(), 2);
    }
}
