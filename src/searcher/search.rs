//! Alpha-beta minimax with a shared transposition table and top-ply fan-out.
//!
//! The root ply submits one task per legal root move to the worker pool;
//! each task runs a fully sequential alpha-beta below its assigned move and
//! no task spawns further tasks. All workers share the transposition table.
//! The per-move status protocol keeps two workers from descending into the
//! same move of the same entry, and the branch set cuts cycles without
//! forbidding transpositions reached along disjoint branches.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use thiserror::Error;

use crate::concurrent::{Guarded, PoolError, WorkerPool};
use crate::evaluate::{leaf_score, terminal_score, EPSILON, SCORE_RANGE};
use crate::hand_move::HandMove;
use crate::move_generator::generate_moves;
use crate::position::{Position, PositionHash};

use super::move_ordering::{order_moves, ChildNode};
use super::transposition_table::{
    BranchId, BranchSet, MoveStatus, NodeData, NodeEntry, TranspositionTable,
};

/// Fixed search depth for every top-level evaluation.
pub const EVALUATION_DEPTH: i32 = 24;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("cannot evaluate an invalid position")]
    InvalidPosition,
    #[error("cannot evaluate a finished game")]
    TerminalPosition,
    #[error("unknown position: never evaluated")]
    Unknown,
    #[error("worker pool failure: {0}")]
    Pool(#[from] PoolError),
}

/// The search engine. All state lives behind an `Arc` so top-ply tasks can
/// hold the table, branch set, and counters for as long as they run.
pub struct Searcher {
    context: Arc<SearchContext>,
}

struct SearchContext {
    table: TranspositionTable,
    branch_set: BranchSet,
    pool: WorkerPool,
    /// Flipped on each top-level evaluation; entries rebuild their move
    /// lists lazily when their tag disagrees.
    generation: AtomicBool,
    visited: AtomicUsize,
    next_branch_id: AtomicU64,
}

impl SearchContext {
    fn fresh_branch_id(&self) -> BranchId {
        self.next_branch_id.fetch_add(1, Ordering::SeqCst)
    }
}

/// Outcome of trying to claim a move under the status protocol.
enum Claim {
    Search,
    Duplicate,
    Retry,
    Reuse,
}

/// How long a worker waits on another worker's in-progress move before
/// searching the subtree itself. Every recursion frame holds one claimed
/// move, so unbounded waiting could chain workers into a cycle; duplicated
/// search work is tolerated, a wedged pool is not.
const CLAIM_WAIT: Duration = Duration::from_millis(50);

impl Searcher {
    /// A searcher fanning out over one worker per hardware thread.
    pub fn new() -> Self {
        Self::with_threads(num_cpus::get())
    }

    pub fn with_threads(threads: usize) -> Self {
        Self {
            context: Arc::new(SearchContext {
                table: TranspositionTable::new(),
                branch_set: BranchSet::new(),
                pool: WorkerPool::with_threads(threads),
                generation: AtomicBool::new(false),
                visited: AtomicUsize::new(0),
                next_branch_id: AtomicU64::new(0),
            }),
        }
    }

    /// Blocks until the entry for `position` is fully evaluated at
    /// [`EVALUATION_DEPTH`], then returns its data. The root's children are
    /// dispatched across the worker pool; completion is the pool draining.
    pub fn evaluate_next_move(&self, position: Position) -> Result<NodeData, SearchError> {
        if !position.is_valid() {
            return Err(SearchError::InvalidPosition);
        }
        if position.is_over() {
            return Err(SearchError::TerminalPosition);
        }

        let context = &self.context;
        context.generation.fetch_xor(true, Ordering::SeqCst);
        context.visited.store(0, Ordering::SeqCst);
        context.branch_set.clear();

        debug!(
            "evaluating position {} to depth {}",
            position.hash(),
            EVALUATION_DEPTH
        );

        let mut branch_stack = vec![context.fresh_branch_id()];
        search(
            context,
            position,
            &mut branch_stack,
            EVALUATION_DEPTH,
            -SCORE_RANGE,
            SCORE_RANGE,
            position.white_to_move(),
        )?;

        let data = self.node_data(position.hash())?;
        debug!(
            "evaluation complete: score {:.3}, {} states visited",
            data.score,
            self.last_evaluated_state_count()
        );
        Ok(data)
    }

    /// Cached data for a hash. Fails with [`SearchError::Unknown`] when the
    /// position has never been touched by a search.
    pub fn node_data(&self, hash: PositionHash) -> Result<NodeData, SearchError> {
        let cell = self.context.table.peek(hash).ok_or(SearchError::Unknown)?;
        Ok(cell.read(|entry| NodeData {
            score: entry.score,
            depth_evaluated: entry.depth_evaluated,
            best_move: entry.best_move,
        }))
    }

    pub fn node_data_for(&self, position: &Position) -> Result<NodeData, SearchError> {
        self.node_data(position.hash())
    }

    /// Entries visited during the most recent evaluation.
    pub fn last_evaluated_state_count(&self) -> usize {
        self.context.visited.load(Ordering::SeqCst)
    }

    /// Number of positions the transposition table holds.
    pub fn transposition_entries(&self) -> usize {
        self.context.table.len()
    }

    #[cfg(test)]
    pub(crate) fn outstanding_branch_marks(&self) -> usize {
        self.context.branch_set.marked_count()
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Depth-limited minimax with alpha-beta pruning. The top level dispatches
/// every root move to the pool without pruning; inner levels recurse on the
/// calling worker and cut off once the window closes.
fn search(
    context: &Arc<SearchContext>,
    position: Position,
    branch_stack: &mut Vec<BranchId>,
    depth: i32,
    mut alpha: f64,
    mut beta: f64,
    maximizing: bool,
) -> Result<(), SearchError> {
    if !position.is_valid() || branch_stack.is_empty() {
        return Ok(());
    }

    let hash = position.hash();
    let cell = context.table.entry(hash);

    // Reuse only when the entry was searched at least this deep and its
    // stored window is at least as wide as the requested one.
    let reusable = cell.read(|entry| {
        entry.depth_evaluated >= depth
            && entry.alpha <= alpha + EPSILON
            && entry.beta >= beta - EPSILON
    });
    if reusable {
        return Ok(());
    }

    context.visited.fetch_add(1, Ordering::SeqCst);

    if position.is_over() {
        let winner = position.winner().expect("finished game has a winner");
        cell.write(|entry| {
            entry.score = terminal_score(winner);
            // Sentinel depth: terminals are never searched again.
            entry.depth_evaluated = EVALUATION_DEPTH + 1;
            entry.alpha = -SCORE_RANGE;
            entry.beta = SCORE_RANGE;
        });
        return Ok(());
    }

    if depth == 0 {
        cell.write(|entry| {
            entry.score = leaf_score(&position);
            entry.depth_evaluated = 0;
            entry.alpha = -SCORE_RANGE;
            entry.beta = SCORE_RANGE;
        });
        return Ok(());
    }

    let generation = context.generation.load(Ordering::SeqCst);
    let candidates: Vec<(HandMove, MoveStatus)> = cell.write(|entry| {
        if entry.generation != Some(generation) {
            entry.moves.clear();
            for hand_move in generate_moves(&position) {
                entry.moves.insert(hand_move, MoveStatus::ToBeEvaluated);
            }
            entry.generation = Some(generation);
        }
        // The first child folded in must strictly improve on this.
        entry.score = if maximizing { -SCORE_RANGE } else { SCORE_RANGE };
        entry.best_move = None;
        entry
            .moves
            .iter()
            .map(|(hand_move, status)| (*hand_move, *status))
            .collect()
    });

    let branch = *branch_stack.last().expect("branch stack is non-empty");
    context.branch_set.mark(hash, branch);

    // A child marked under an id on this stack is already being evaluated
    // above the current call on the same branch: descending into it would
    // wait on a move status our own ancestor frame holds. Drop it from this
    // branch. The same position reached on a disjoint branch is marked only
    // under that branch's ids and stays searchable and cacheable.
    let mut children: Vec<ChildNode> = Vec::with_capacity(candidates.len());
    for (hand_move, status) in candidates {
        let child_position = match hand_move.apply(&position) {
            Ok(next) => next,
            Err(_) => continue,
        };
        let child_hash = child_position.hash();
        if branch_stack
            .iter()
            .any(|id| context.branch_set.is_marked(child_hash, *id))
        {
            continue;
        }
        children.push(ChildNode {
            hand_move,
            position: child_position,
            hash: child_hash,
            status,
        });
    }
    order_moves(&mut children, &position);

    if depth == EVALUATION_DEPTH {
        for child in children {
            let task_id = context.fresh_branch_id();
            branch_stack.push(task_id);
            let task_stack = branch_stack.clone();
            branch_stack.pop();

            let task_context = Arc::clone(context);
            context.pool.submit(move || {
                let mut task_stack = task_stack;
                let (mut alpha, mut beta) = (alpha, beta);
                if let Err(error) = evaluate_move(
                    &task_context,
                    hash,
                    child,
                    &mut task_stack,
                    depth,
                    &mut alpha,
                    &mut beta,
                    maximizing,
                ) {
                    warn!("root move {} failed: {}", child.hand_move, error);
                }
            })?;
        }
        context.pool.drain()?;
    } else {
        for child in children {
            evaluate_move(
                context,
                hash,
                child,
                branch_stack,
                depth,
                &mut alpha,
                &mut beta,
                maximizing,
            )?;
            if alpha >= beta - EPSILON {
                break;
            }
        }
    }

    context.branch_set.unmark(hash, branch);
    Ok(())
}

/// Claims and evaluates one move of the parent entry: wait until no other
/// worker is evaluating it, recurse if it is still unevaluated, then fold
/// the child's cached score into the parent. Two workers hitting the same
/// move at the same time never both recurse; the loser of the claim waits
/// and folds in the winner's result.
#[allow(clippy::too_many_arguments)]
fn evaluate_move(
    context: &Arc<SearchContext>,
    parent_hash: PositionHash,
    child: ChildNode,
    branch_stack: &mut Vec<BranchId>,
    depth: i32,
    alpha: &mut f64,
    beta: &mut f64,
    maximizing: bool,
) -> Result<(), SearchError> {
    let parent = context.table.entry(parent_hash);
    let hand_move = child.hand_move;

    loop {
        let settled = parent.wait_until_for(
            |entry| entry.moves.get(&hand_move) != Some(&MoveStatus::Evaluating),
            CLAIM_WAIT,
        );

        let claim = parent.write(|entry| match entry.moves.get_mut(&hand_move) {
            Some(status) => match *status {
                MoveStatus::ToBeEvaluated => {
                    *status = MoveStatus::Evaluating;
                    Claim::Search
                }
                // Still (or again) held by another worker. After a full
                // timeout we stop waiting and search the subtree ourselves
                // rather than risk a cycle of workers waiting on moves held
                // by each other's ancestor frames.
                MoveStatus::Evaluating => {
                    if settled {
                        Claim::Retry
                    } else {
                        Claim::Duplicate
                    }
                }
                MoveStatus::Evaluated => Claim::Reuse,
            },
            // The move list was regenerated underneath us; the child's
            // cached score still folds in below.
            None => Claim::Reuse,
        });

        match claim {
            Claim::Search => {
                let result = search(
                    context,
                    child.position,
                    branch_stack,
                    depth - 1,
                    *alpha,
                    *beta,
                    !maximizing,
                );
                parent.write(|entry| {
                    if let Some(status) = entry.moves.get_mut(&hand_move) {
                        *status = MoveStatus::Evaluated;
                    }
                });
                result?;
                break;
            }
            Claim::Duplicate => {
                // The claim holder still owns the status transition; this
                // search only refreshes the child's entry before the fold.
                search(
                    context,
                    child.position,
                    branch_stack,
                    depth - 1,
                    *alpha,
                    *beta,
                    !maximizing,
                )?;
                break;
            }
            Claim::Retry => continue,
            Claim::Reuse => break,
        }
    }

    after_search(context, &parent, child, depth, maximizing, alpha, beta);
    Ok(())
}

/// Folds the child's cached score into the parent entry, raising alpha or
/// lowering beta, and persists the window that justified the score. The
/// child entry is read before the parent is locked: the position graph is
/// cyclic, so nesting the two acquisitions could deadlock two workers
/// folding across a two-cycle.
fn after_search(
    context: &SearchContext,
    parent: &Guarded<NodeEntry>,
    child: ChildNode,
    depth: i32,
    maximizing: bool,
    alpha: &mut f64,
    beta: &mut f64,
) {
    let child_score = context.table.entry(child.hash).read(|entry| entry.score);

    parent.write(|entry| {
        if maximizing {
            if child_score > entry.score + EPSILON {
                entry.score = child_score;
                entry.depth_evaluated = depth;
                entry.best_move = Some(child.hand_move);
            }
            *alpha = alpha.max(entry.score);
        } else {
            if child_score < entry.score - EPSILON {
                entry.score = child_score;
                entry.depth_evaluated = depth;
                entry.best_move = Some(child.hand_move);
            }
            *beta = beta.min(entry.score);
        }
        entry.alpha = *alpha;
        entry.beta = *beta;
    });
}
