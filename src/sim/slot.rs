//! Slot topology of the 37-hole board
//!
//! Slots are numbered row by row. Columns share one coordinate space so that
//! vertically adjacent slots have equal columns:
//!
//! ```text
//!  column:  0  1  2  3  4  5  6
//!  row 0:         00 01 02
//!  row 1:      03 04 05 06 07
//!  row 2:   08 09 10 11 12 13 14
//!  row 3:   15 16 17 18 19 20 21
//!  row 4:   22 23 24 25 26 27 28
//!  row 5:      29 30 31 32 33
//!  row 6:         34 35 36
//! ```
//!
//! Everything here is a pure function of the slot index.

use glam::Vec3;

use crate::consts::{SLOT_SPACING, STARTING_COUNT};

/// Exclusive upper index of each row
const ROW_BOUNDARIES: [usize; 7] = [3, 8, 15, 22, 29, 34, 37];

/// Amount subtracted from a slot index to get its column, per row.
/// Negative entries shift the narrow top rows right.
const COLUMN_OFFSETS: [isize; 7] = [-2, 2, 8, 15, 22, 28, 32];

/// Index distance to the slot below, per row (the last row has none)
const DOWN_OFFSETS: [Option<usize>; 7] = [
    Some(4),
    Some(6),
    Some(7),
    Some(7),
    Some(6),
    Some(4),
    None,
];

/// Index distance to the slot above, per row (the first row has none)
const UP_OFFSETS: [Option<usize>; 7] = [
    None,
    Some(4),
    Some(6),
    Some(7),
    Some(7),
    Some(6),
    Some(4),
];

/// Right edge of each row and the slot it wraps to
const RIGHT_EDGES: [(usize, usize); 7] = [
    (2, 0),
    (7, 3),
    (14, 8),
    (21, 15),
    (28, 22),
    (33, 29),
    (36, 34),
];

/// Left edge of each row and the slot it wraps to
const LEFT_EDGES: [(usize, usize); 7] = [
    (0, 2),
    (3, 7),
    (8, 14),
    (15, 21),
    (22, 28),
    (29, 33),
    (34, 36),
];

/// Bottom of each column and the slot at the top of the board it wraps to
const BOTTOM_EDGES: [(usize, usize); 7] = [
    (22, 8),
    (29, 3),
    (34, 0),
    (35, 1),
    (36, 2),
    (33, 7),
    (28, 14),
];

/// Top of each column and the slot at the bottom of the board it wraps to
const TOP_EDGES: [(usize, usize); 7] = [
    (8, 22),
    (3, 29),
    (0, 34),
    (1, 35),
    (2, 36),
    (7, 33),
    (14, 28),
];

/// One of the four orthogonal directions on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Order in which jump destinations are examined
    pub const JUMP_ORDER: [Direction; 4] = [
        Direction::Right,
        Direction::Up,
        Direction::Left,
        Direction::Down,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

/// Row of a raw slot index, `None` outside `[0, 37)`
pub fn row(index: i32) -> Option<u8> {
    let index = usize::try_from(index).ok()?;
    ROW_BOUNDARIES
        .iter()
        .position(|&end| index < end)
        .map(|row| row as u8)
}

/// Column of a raw slot index, `None` outside `[0, 37)`
pub fn column(index: i32) -> Option<u8> {
    let row = row(index)?;
    Some((index as isize - COLUMN_OFFSETS[row as usize]) as u8)
}

/// A position on the board, always in `[0, 37)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot(u8);

impl Slot {
    pub const COUNT: usize = STARTING_COUNT;
    pub const CENTRE: Slot = Slot(crate::consts::CENTRE_SLOT as u8);

    /// Validate a raw index (save files and the input layer use `-1` for "none")
    pub fn new(index: i32) -> Option<Self> {
        if (0..Self::COUNT as i32).contains(&index) {
            Some(Slot(index as u8))
        } else {
            None
        }
    }

    /// Build from an index already known to be in range
    pub(crate) const fn from_index(index: usize) -> Self {
        debug_assert!(index < STARTING_COUNT);
        Slot(index as u8)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// All slots in index order
    pub fn all() -> impl Iterator<Item = Slot> {
        (0..Self::COUNT).map(Slot::from_index)
    }

    pub fn row(self) -> u8 {
        ROW_BOUNDARIES
            .iter()
            .position(|&end| self.index() < end)
            .unwrap_or(ROW_BOUNDARIES.len() - 1) as u8
    }

    pub fn column(self) -> u8 {
        (self.index() as isize - COLUMN_OFFSETS[self.row() as usize]) as u8
    }

    /// The adjacent slot in `direction`.
    ///
    /// At the edge of the board the result is `None` unless `wrap` is set, in
    /// which case the fixed edge tables give the slot on the far side.
    pub fn neighbor(self, direction: Direction, wrap: bool) -> Option<Slot> {
        let index = self.index();
        let row = self.row() as usize;
        let (edges, step): (&[(usize, usize); 7], Option<isize>) = match direction {
            Direction::Right => (&RIGHT_EDGES, Some(1)),
            Direction::Left => (&LEFT_EDGES, Some(-1)),
            Direction::Down => (&BOTTOM_EDGES, DOWN_OFFSETS[row].map(|d| d as isize)),
            Direction::Up => (&TOP_EDGES, UP_OFFSETS[row].map(|d| -(d as isize))),
        };

        if let Some(&(_, wrapped)) = edges.iter().find(|(edge, _)| *edge == index) {
            return wrap.then(|| Slot::from_index(wrapped));
        }

        let target = index as isize + step?;
        Slot::new(target as i32)
    }

    /// Planar placement of the slot's centre, ignoring any animation
    pub fn world_position(self) -> Vec3 {
        Vec3::new(
            SLOT_SPACING * (self.row() as f32 - 3.0),
            SLOT_SPACING * (self.column() as f32 - 3.0),
            0.0,
        )
    }

    /// Which way `target` lies from `self` if they share a row or column
    pub fn orthogonal_direction(self, target: Slot) -> Option<Direction> {
        if self == target {
            return None;
        }
        if self.row() == target.row() {
            Some(if target < self {
                Direction::Left
            } else {
                Direction::Right
            })
        } else if self.column() == target.column() {
            Some(if target < self {
                Direction::Up
            } else {
                Direction::Down
            })
        } else {
            None
        }
    }

    /// Direction of a jump from `self` over `over` onto `to`, or `None` unless
    /// the three slots are adjacent in one straight line
    pub fn jump_direction(self, over: Slot, to: Slot) -> Option<Direction> {
        Direction::JUMP_ORDER.into_iter().find(|&dir| {
            self.neighbor(dir, false) == Some(over) && over.neighbor(dir, false) == Some(to)
        })
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn slot(index: i32) -> Slot {
        Slot::new(index).unwrap()
    }

    /// Slot at (row, column), found by scanning
    fn at(row: u8, column: u8) -> Option<Slot> {
        Slot::all().find(|s| s.row() == row && s.column() == column)
    }

    #[test]
    fn test_row_lengths() {
        let mut lengths = [0; 7];
        for s in Slot::all() {
            lengths[s.row() as usize] += 1;
        }
        assert_eq!(lengths, [3, 5, 7, 7, 7, 5, 3]);
    }

    #[test]
    fn test_row_and_column_out_of_range() {
        assert_eq!(row(-1), None);
        assert_eq!(row(37), None);
        assert_eq!(column(-1), None);
        assert_eq!(column(37), None);
        assert_eq!(row(0), Some(0));
        assert_eq!(column(0), Some(2));
        assert_eq!(column(3), Some(1));
        assert_eq!(column(18), Some(3));
        assert_eq!(column(29), Some(1));
        assert_eq!(column(36), Some(4));
    }

    #[test]
    fn test_centre_slot() {
        assert_eq!(Slot::CENTRE.row(), 3);
        assert_eq!(Slot::CENTRE.column(), 3);
        assert_eq!(Slot::CENTRE.world_position(), Vec3::ZERO);
    }

    #[test]
    fn test_vertical_offsets_match_columns() {
        for s in Slot::all() {
            let below = if s.row() < 6 { at(s.row() + 1, s.column()) } else { None };
            let above = if s.row() > 0 { at(s.row() - 1, s.column()) } else { None };
            assert_eq!(s.neighbor(Direction::Down, false), below, "down from {s}");
            assert_eq!(s.neighbor(Direction::Up, false), above, "up from {s}");
        }
    }

    #[test]
    fn test_horizontal_edges() {
        assert_eq!(slot(2).neighbor(Direction::Right, false), None);
        assert_eq!(slot(2).neighbor(Direction::Right, true), Some(slot(0)));
        assert_eq!(slot(15).neighbor(Direction::Left, true), Some(slot(21)));
        assert_eq!(slot(15).neighbor(Direction::Left, false), None);
        assert_eq!(slot(16).neighbor(Direction::Left, true), Some(slot(15)));
    }

    #[test]
    fn test_vertical_wrap_table() {
        let down = [(22, 8), (29, 3), (34, 0), (35, 1), (36, 2), (33, 7), (28, 14)];
        for (from, to) in down {
            assert_eq!(slot(from).neighbor(Direction::Down, false), None);
            assert_eq!(slot(from).neighbor(Direction::Down, true), Some(slot(to)));
            assert_eq!(slot(to).neighbor(Direction::Up, true), Some(slot(from)));
        }
        // Interior slots ignore wrap
        assert_eq!(slot(4).neighbor(Direction::Up, true), Some(slot(0)));
        assert_eq!(slot(30).neighbor(Direction::Down, true), Some(slot(34)));
    }

    #[test]
    fn test_every_slot_wraps_somewhere() {
        for s in Slot::all() {
            for dir in Direction::JUMP_ORDER {
                assert!(s.neighbor(dir, true).is_some(), "{s} {dir:?}");
            }
        }
    }

    #[test]
    fn test_world_position_spacing() {
        assert_eq!(slot(0).world_position(), Vec3::new(-12.0, -4.0, 0.0));
        assert_eq!(slot(36).world_position(), Vec3::new(12.0, 4.0, 0.0));
        let step = slot(19).world_position() - slot(18).world_position();
        assert_eq!(step, Vec3::new(0.0, SLOT_SPACING, 0.0));
    }

    #[test]
    fn test_orthogonal_direction() {
        assert_eq!(slot(18).orthogonal_direction(slot(20)), Some(Direction::Right));
        assert_eq!(slot(18).orthogonal_direction(slot(16)), Some(Direction::Left));
        assert_eq!(slot(18).orthogonal_direction(slot(5)), Some(Direction::Up));
        assert_eq!(slot(11).orthogonal_direction(slot(25)), Some(Direction::Down));
        assert_eq!(slot(18).orthogonal_direction(slot(18)), None);
        assert_eq!(slot(18).orthogonal_direction(slot(26)), None);
    }

    #[test]
    fn test_jump_direction() {
        assert_eq!(slot(10).jump_direction(slot(11), slot(12)), Some(Direction::Right));
        assert_eq!(slot(12).jump_direction(slot(11), slot(10)), Some(Direction::Left));
        assert_eq!(slot(4).jump_direction(slot(10), slot(17)), Some(Direction::Down));
        assert_eq!(slot(17).jump_direction(slot(10), slot(4)), Some(Direction::Up));
        // Degenerate and bent lines
        assert_eq!(slot(1).jump_direction(slot(1), slot(5)), None);
        assert_eq!(slot(10).jump_direction(slot(11), slot(11)), None);
        assert_eq!(slot(10).jump_direction(slot(11), slot(18)), None);
        // Row 3 ends at 21; 22 starts the next row
        assert_eq!(slot(20).jump_direction(slot(21), slot(22)), None);
    }

    proptest! {
        #[test]
        fn prop_neighbor_is_its_own_inverse(index in 0i32..37, dir_index in 0usize..4) {
            let s = slot(index);
            let dir = Direction::JUMP_ORDER[dir_index];
            if let Some(next) = s.neighbor(dir, false) {
                prop_assert_eq!(next.neighbor(dir.opposite(), false), Some(s));
                prop_assert_eq!(s.orthogonal_direction(next), Some(dir));
            }
        }

        #[test]
        fn prop_raw_row_column_agree_with_slot(index in -10i32..50) {
            match Slot::new(index) {
                Some(s) => {
                    prop_assert_eq!(row(index), Some(s.row()));
                    prop_assert_eq!(column(index), Some(s.column()));
                }
                None => {
                    prop_assert_eq!(row(index), None);
                    prop_assert_eq!(column(index), None);
                }
            }
        }
    }
}
