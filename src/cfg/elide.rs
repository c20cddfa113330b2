//! Empty-block elision.
//!
//! An empty block only passes control on to its first successor (or out of
//! the function if it has none). Every reference to it is replaced by the end
//! of its chain of empty blocks, so no pass-through node is left in the graph.
//!
//! A chain that loops back on itself without reaching a non-empty block (an
//! empty infinite loop) resolves to the smallest id on the cycle; that block
//! is kept, with an edge to itself.
use super::{BlockId, ControlFlowGraph};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

impl ControlFlowGraph<'_> {
    /// Redirects every edge into an empty block to where that block leads,
    /// and marks the empty blocks as elided. Idempotent.
    pub fn elide_empty_blocks(&mut self) {
        // each empty block forwards to its first successor
        let forward: BTreeMap<BlockId, BlockId> = self
            .blocks()
            .filter(|(_, block)| block.is_empty() && !block.elided)
            .map(|(id, block)| {
                let next = block
                    .successors
                    .first()
                    .map_or(BlockId::EXIT, |s| s.target);
                (id, next)
            })
            .collect();
        if forward.is_empty() {
            return;
        }

        let mut resolved: BTreeMap<BlockId, BlockId> = BTreeMap::new();
        let mut kept: BTreeSet<BlockId> = BTreeSet::new();
        for &start in forward.keys() {
            resolve(start, &forward, &mut resolved, &mut kept);
        }
        let target_of = |id: BlockId| resolved.get(&id).copied().unwrap_or(id);

        for (i, block) in self.blocks.iter_mut().enumerate() {
            let id = BlockId(i as u32);
            if forward.contains_key(&id) && !kept.contains(&id) {
                block.elided = true;
                continue;
            }
            for succ in &mut block.successors {
                succ.target = target_of(succ.target);
            }
        }
        self.entry = target_of(self.entry);

        debug!(
            elided = forward.len() - kept.len(),
            cycles = kept.len(),
            "elided empty blocks"
        );
    }
}

/// Follows `start` through `forward` to its terminus, recording the result
/// for every block on the way.
fn resolve(
    start: BlockId,
    forward: &BTreeMap<BlockId, BlockId>,
    resolved: &mut BTreeMap<BlockId, BlockId>,
    kept: &mut BTreeSet<BlockId>,
) {
    let mut path = Vec::new();
    let mut cur = start;
    let terminus = loop {
        if let Some(&done) = resolved.get(&cur) {
            break done;
        }
        let Some(&next) = forward.get(&cur) else {
            break cur;
        };
        if let Some(pos) = path.iter().position(|&p| p == cur) {
            let cycle_min = path[pos..].iter().copied().min().unwrap_or(cur);
            kept.insert(cycle_min);
            break cycle_min;
        }
        path.push(cur);
        cur = next;
    };
    for id in path {
        resolved.insert(id, terminus);
    }
}
