/// Grid coordinate `(x, y)` = (row, column). Value identity, used as a map key.
pub type Cell = (usize, usize);

/// Cost reported for an action sequence that steps into a wall or off the
/// grid. The search engine treats this as "not a real solution", never a fault.
pub const INVALID_PATH_COST: usize = 999_999;

/// The four cardinal moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    North,
    South,
    East,
    West,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::North, Action::South, Action::East, Action::West];

    /// Row/column delta of the move.
    pub fn delta(&self) -> (isize, isize) {
        match self {
            Action::North => (-1, 0),
            Action::South => (1, 0),
            Action::East => (0, 1),
            Action::West => (0, -1),
        }
    }

    /// Cell reached by taking this move from `from`, or `None` when the move
    /// leaves the `height x width` grid. Out-of-grid is treated as impassable.
    pub fn apply(&self, from: Cell, height: usize, width: usize) -> Option<Cell> {
        let (dx, dy) = self.delta();
        let x = from.0 as isize + dx;
        let y = from.1 as isize + dy;
        if x >= 0 && y >= 0 && (x as usize) < height && (y as usize) < width {
            Some((x as usize, y as usize))
        } else {
            None
        }
    }
}

/// Immutable fixed-size bit value tracking which landmarks have been reached.
/// One bit per landmark index; a transition produces a new value, never
/// mutates the predecessor's copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VisitedSet {
    bits: u8,
    len: u8,
}

impl VisitedSet {
    /// All-false set for `len` landmarks. At most 8 are supported.
    pub fn new(len: usize) -> Self {
        assert!(len <= 8, "at most 8 landmarks are supported, got {}", len);
        VisitedSet {
            bits: 0,
            len: len as u8,
        }
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_visited(&self, index: usize) -> bool {
        assert!(index < self.len(), "landmark index {} out of range", index);
        self.bits & (1 << index) != 0
    }

    /// New set with the bit at `index` set. Setting an already-set bit is a
    /// no-op copy.
    pub fn with_visited(&self, index: usize) -> Self {
        assert!(index < self.len(), "landmark index {} out of range", index);
        VisitedSet {
            bits: self.bits | (1 << index),
            len: self.len,
        }
    }

    pub fn all_visited(&self) -> bool {
        self.len == 0 || self.bits == (1u16 << self.len).wrapping_sub(1) as u8
    }
}

/// Full search state: current position plus which landmarks have been visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct State {
    pub position: Cell,
    pub visited: VisitedSet,
}

/// Result of a successful search: the action sequence and its total cost.
#[derive(Debug, Clone)]
pub struct Solution {
    pub actions: Vec<Action>,
    pub cost: usize,
}
