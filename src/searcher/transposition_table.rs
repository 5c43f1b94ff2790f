//! Shared caches: the transposition table and the branch set.

use std::sync::Arc;

use dashmap::DashMap;
use rustc_hash::FxHashMap;

use crate::concurrent::{CellMap, Guarded};
use crate::evaluate::SCORE_RANGE;
use crate::hand_move::HandMove;
use crate::position::PositionHash;

/// Identifier of a top-ply search task. The stack of ids on a call path
/// distinguishes disjoint branches when cutting cycles.
pub type BranchId = u64;

/// Lifecycle of one move of one entry. Within a single evaluation a status
/// only ever advances.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveStatus {
    ToBeEvaluated,
    Evaluating,
    Evaluated,
}

/// Cached evaluation of a single position.
#[derive(Clone, Debug)]
pub struct NodeEntry {
    /// Best score found so far, from white's perspective.
    pub score: f64,
    /// Depth at which `score` was computed; negative until first written.
    /// Terminal positions store a sentinel above the top depth so they are
    /// never searched again.
    pub depth_evaluated: i32,
    pub best_move: Option<HandMove>,
    /// The window under which `score` was obtained. Metadata consulted by
    /// the reuse test, never live caller state.
    pub alpha: f64,
    pub beta: f64,
    /// Per-move evaluation status for the current generation.
    pub moves: FxHashMap<HandMove, MoveStatus>,
    /// Generation tag; `None` marks an entry whose move list has never been
    /// generated.
    pub generation: Option<bool>,
}

impl Default for NodeEntry {
    fn default() -> Self {
        Self {
            score: 0.0,
            depth_evaluated: -1,
            best_move: None,
            alpha: -SCORE_RANGE,
            beta: SCORE_RANGE,
            moves: FxHashMap::default(),
            generation: None,
        }
    }
}

/// Snapshot of an entry returned to callers.
#[derive(Clone, Copy, Debug)]
pub struct NodeData {
    pub score: f64,
    pub depth_evaluated: i32,
    pub best_move: Option<HandMove>,
}

/// Map from position hashes to guarded entries. Entries are created lazily
/// on first access and never removed while the engine lives, so cell
/// handles held by worker tasks stay valid for the whole search.
pub struct TranspositionTable {
    entries: CellMap<PositionHash, NodeEntry>,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self {
            entries: CellMap::new(),
        }
    }

    pub fn entry(&self, hash: PositionHash) -> Arc<Guarded<NodeEntry>> {
        self.entries.cell(hash)
    }

    /// Non-creating lookup, for queries that must fail on unknown hashes.
    pub fn peek(&self, hash: PositionHash) -> Option<Arc<Guarded<NodeEntry>>> {
        self.entries.peek(&hash)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Marks which positions are currently being searched on which active
/// branch. A position may appear on several branches at once; only a child
/// that is already marked under every id on the current branch's stack is a
/// pure cycle.
pub struct BranchSet {
    marks: DashMap<(PositionHash, BranchId), bool>,
}

impl BranchSet {
    pub fn new() -> Self {
        Self {
            marks: DashMap::new(),
        }
    }

    pub fn mark(&self, hash: PositionHash, branch: BranchId) {
        self.marks.insert((hash, branch), true);
    }

    pub fn unmark(&self, hash: PositionHash, branch: BranchId) {
        self.marks.insert((hash, branch), false);
    }

    pub fn is_marked(&self, hash: PositionHash, branch: BranchId) -> bool {
        self.marks
            .get(&(hash, branch))
            .map_or(false, |marked| *marked)
    }

    pub fn clear(&self) {
        self.marks.clear();
    }

    /// Number of positions still marked as on an active branch.
    pub fn marked_count(&self) -> usize {
        self.marks.iter().filter(|entry| *entry.value()).count()
    }
}

impl Default for BranchSet {
    fn default() -> Self {
        Self::new()
    }
}
