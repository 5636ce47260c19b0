use crate::error::CompileError;
use smallvec::SmallVec;
use std::collections::HashMap;

/// Edges from each node id to the ids it depends on.
///
/// Keys keep their insertion order, which is also the root order of [`sort`].
#[derive(Debug, Clone, Default)]
pub struct DependencyMap {
    ids: Vec<String>,
    index: HashMap<String, usize>,
    deps: Vec<SmallVec<[String; 4]>>,
}

impl DependencyMap {
    pub fn new() -> Self { Self::default() }

    pub fn len(&self) -> usize { self.ids.len() }

    pub fn is_empty(&self) -> bool { self.ids.is_empty() }

    /// Registers `id` with no dependencies. Re-inserting keeps the original position.
    pub fn insert(&mut self, id: &str) {
        if !self.index.contains_key(id) {
            self.index.insert(id.to_string(), self.ids.len());
            self.ids.push(id.to_string());
            self.deps.push(SmallVec::new());
        }
    }

    /// Records that `from` depends on `to`. `from` is registered if needed;
    /// `to` is not, so a missing target surfaces as a broken dependency in [`sort`].
    pub fn add_edge(&mut self, from: &str, to: &str) {
        self.insert(from);
        let deps = &mut self.deps[self.index[from]];
        if !deps.iter().any(|d| d == to) {
            deps.push(to.to_string());
        }
    }

    pub fn dependencies(&self, id: &str) -> Option<&[String]> {
        self.index.get(id).map(|&i| self.deps[i].as_slice())
    }

    pub fn edge_count(&self) -> usize {
        self.deps.iter().map(|d| d.len()).sum()
    }
}

/// Performs a Topological Sort using Depth-First Search (DFS).
///
/// Returns the node ids so that every dependency appears before its consumer.
/// Roots are visited in the map's key order and dependencies in the order
/// they were recorded, so the result is deterministic for a given input.
pub fn sort(deps: &DependencyMap) -> Result<Vec<String>, CompileError> {
    let count = deps.len();
    let mut order = Vec::with_capacity(count);
    let mut state = vec![VisitState::None; count];

    for i in 0..count {
        if state[i] == VisitState::None {
            visit(i, deps, &mut state, &mut order)?;
        }
    }

    Ok(order.into_iter().map(|i| deps.ids[i].clone()).collect())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum VisitState {
    None,
    Visiting, // Used for cycle detection
    Visited,
}

/// Iterative post-order walk from `root`. Each frame is a node and the
/// position of the next dependency to look at, so chain depth costs heap,
/// not call stack.
fn visit(
    root: usize,
    deps: &DependencyMap,
    state: &mut [VisitState],
    order: &mut Vec<usize>,
) -> Result<(), CompileError> {
    let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
    state[root] = VisitState::Visiting;

    while let Some(frame) = stack.last_mut() {
        let (idx, pos) = *frame;
        let Some(dep) = deps.deps[idx].get(pos) else {
            stack.pop();
            state[idx] = VisitState::Visited;
            order.push(idx);
            continue;
        };
        frame.1 += 1;

        let &dep_idx = deps
            .index
            .get(dep)
            .ok_or_else(|| CompileError::BrokenDependency { id: dep.clone() })?;
        match state[dep_idx] {
            VisitState::Visited => {}
            VisitState::Visiting => {
                return Err(CompileError::CycleDetected { id: deps.ids[dep_idx].clone() })
            }
            VisitState::None => {
                state[dep_idx] = VisitState::Visiting;
                stack.push((dep_idx, 0));
            }
        }
    }
    Ok(())
}
