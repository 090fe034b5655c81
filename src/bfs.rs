use petgraph::graphmap::DiGraphMap;
use petgraph::visit::Bfs;

// BFS traversal of the link graph starting at `start`.
// Returns the node ids in visit order, every parent before its children.
pub(super) fn bfs(graph: &DiGraphMap<usize, ()>, start: usize) -> Vec<usize> {
    let mut bfs = Bfs::new(graph, start);
    std::iter::from_fn(|| bfs.next(graph)).collect()
}
