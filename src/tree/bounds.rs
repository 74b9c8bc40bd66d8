//! Bounds arithmetic for nested-set mutations
//!
//! Pure functions: given the current bounds of the nodes involved, compute the
//! bounds of the new/moved node and the shifts every other node needs. No I/O.

use thiserror::Error;

use super::model::{Bounds, Position, Span};

/// Bound units consumed by one node
pub const NODE_WIDTH: i64 = 2;

/// Reasons a plan cannot be produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlanError {
    /// A tree has exactly one root, so nothing can sit beside it
    #[error("a root node cannot have siblings")]
    RootSibling,

    /// Move destination is the source itself or one of its descendants
    #[error("destination lies inside the moved subtree")]
    Cyclic,
}

/// Result of planning an insert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertPlan {
    /// Bounds of the node to insert
    pub node: Bounds,

    /// Every bound `>= shift_from` in the tree moves by `shift`
    pub shift_from: i64,

    /// Always `+NODE_WIDTH`
    pub shift: i64,
}

/// Result of planning a subtree move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovePlan {
    /// Bound range of the moved subtree (pre-move numbering)
    pub source: Span,

    /// Added to `level` of every node in the subtree
    pub level_delta: i64,

    /// Gap closed behind the subtree when it leaves (`-width`)
    pub removal_shift: i64,

    /// Gap opened at the destination (`+width`)
    pub insertion_shift: i64,

    /// Added to every bound inside the subtree
    pub bound_shift: i64,

    /// Bounds between the old and new location that slide to make room
    pub displaced: Span,
}

impl MovePlan {
    /// Shift applied to the displaced span
    ///
    /// Moving right the displaced bounds fill the gap left behind, moving left
    /// they make room in front of the subtree's old position.
    pub fn displaced_shift(&self) -> i64 {
        if self.bound_shift > 0 {
            self.removal_shift
        } else {
            self.insertion_shift
        }
    }

    /// True if the move changes nothing
    pub fn is_noop(&self) -> bool {
        self.bound_shift == 0 && self.level_delta == 0
    }

    /// New value of a bound under this plan (pre-move numbering in, post-move out)
    pub fn relocate(&self, bound: i64) -> i64 {
        if self.source.contains(bound) {
            bound + self.bound_shift
        } else if self.displaced.contains(bound) {
            bound + self.displaced_shift()
        } else {
            bound
        }
    }

    /// New level of a node whose pre-move left bound is `lft`
    pub fn relevel(&self, lft: i64, level: i64) -> i64 {
        if self.source.contains(lft) {
            level + self.level_delta
        } else {
            level
        }
    }
}

/// Result of planning a subtree delete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeletePlan {
    /// Every node whose `lft` falls in this span is removed
    pub removed: Span,

    /// Every remaining bound `>= shift_from` moves by `removal_shift`
    pub shift_from: i64,

    /// `-(rgt - lft + 1)`
    pub removal_shift: i64,
}

/// Resolve a position against a target into an insertion point and a level
pub fn insertion_point(target: Bounds, position: Position) -> Result<(i64, i64), PlanError> {
    if !position.is_child() && target.level == 0 {
        return Err(PlanError::RootSibling);
    }

    Ok(match position {
        Position::FirstChild => (target.lft + 1, target.level + 1),
        Position::LastChild => (target.rgt, target.level + 1),
        Position::Before => (target.lft, target.level),
        Position::After => (target.rgt + 1, target.level),
    })
}

/// Plan inserting a single leaf relative to `target`
pub fn plan_insert(target: Bounds, position: Position) -> Result<InsertPlan, PlanError> {
    let (point, level) = insertion_point(target, position)?;

    Ok(InsertPlan {
        node: Bounds {
            lft: point,
            rgt: point + 1,
            level,
        },
        shift_from: point,
        shift: NODE_WIDTH,
    })
}

/// Plan moving the subtree rooted at `source` relative to `target`
///
/// Both bounds must come from the same tree. The plan is expressed in the
/// pre-move numbering so it can be applied as a single update.
pub fn plan_move(source: Bounds, target: Bounds, position: Position) -> Result<MovePlan, PlanError> {
    if source.encloses(&target) {
        return Err(PlanError::Cyclic);
    }

    let (point, level) = insertion_point(target, position)?;
    let width = source.width();

    // `point` can never fall strictly inside the source span: the target is
    // outside the subtree, so its bounds (and +1) are too.
    let (bound_shift, displaced) = if point > source.rgt {
        (point - source.rgt - 1, Span::new(source.rgt + 1, point - 1))
    } else {
        (point - source.lft, Span::new(point, source.lft - 1))
    };

    Ok(MovePlan {
        source: source.span(),
        level_delta: level - source.level,
        removal_shift: -width,
        insertion_shift: width,
        bound_shift,
        displaced,
    })
}

/// Plan deleting the subtree rooted at `target`
pub fn plan_delete(target: Bounds) -> DeletePlan {
    DeletePlan {
        removed: target.span(),
        shift_from: target.rgt + 1,
        removal_shift: -target.width(),
    }
}
