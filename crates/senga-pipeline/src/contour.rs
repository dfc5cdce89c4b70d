//! Contour tracing: greedy linking of edge pixels into ordered polylines.
//!
//! [`PointSet::extract`] collects every edge pixel from a binary grid in a
//! fixed descending scan order; [`trace_lines_with_rng`] walks them into
//! 8-connected lines, shuffling the direction preference once per seed
//! point. The shuffle makes the specific decomposition of a branching edge
//! cluster vary between runs while total point coverage stays identical --
//! an intentional aesthetic for animated line drawings, not a defect.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::grid::PixelGrid;
use crate::hysteresis::EDGE;
use crate::types::{Coord, Line};

/// The 8 compass directions, in the order they sit before shuffling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    LeftUp,
    Up,
    UpRight,
    Right,
    RightDown,
    Down,
    DownLeft,
}

impl Direction {
    /// All 8 directions; each seed point shuffles its own copy.
    pub const ALL: [Self; 8] = [
        Self::Left,
        Self::LeftUp,
        Self::Up,
        Self::UpRight,
        Self::Right,
        Self::RightDown,
        Self::Down,
        Self::DownLeft,
    ];

    /// The (dx, dy) offset of one step in this direction.
    #[must_use]
    pub const fn offset(self) -> (i64, i64) {
        match self {
            Self::Left => (-1, 0),
            Self::LeftUp => (-1, -1),
            Self::Up => (0, -1),
            Self::UpRight => (1, -1),
            Self::Right => (1, 0),
            Self::RightDown => (1, 1),
            Self::Down => (0, 1),
            Self::DownLeft => (-1, 1),
        }
    }
}

/// The set of edge pixels extracted from a binary grid, in seed order.
///
/// Iteration order is the insertion order produced by the extraction scan
/// (y descending, then x descending), which determines which coordinate
/// seeds each traced line. Membership checks use a packed `x + y * width`
/// mask rather than formatted string keys.
#[derive(Debug, Clone)]
pub struct PointSet {
    width: u32,
    height: u32,
    points: Vec<Coord>,
    mask: Vec<bool>,
}

impl PointSet {
    /// Collect every edge pixel (intensity exactly 255) from a binary grid.
    ///
    /// Scans `y` descending from `height - 1`, and within each row `x`
    /// descending from `width - 1`, so the bottom-right-most edge pixel
    /// becomes the first trace seed.
    #[must_use]
    #[allow(clippy::float_cmp)] // hysteresis output only holds 0.0 or 255.0
    pub fn extract(grid: &PixelGrid) -> Self {
        let (width, height) = (grid.width(), grid.height());
        let mut points = Vec::new();
        let mut mask = vec![false; width as usize * height as usize];
        for y in (0..height).rev() {
            for x in (0..width).rev() {
                if grid.get(x, y) == EDGE {
                    points.push(Coord::new(x, y));
                    mask[y as usize * width as usize + x as usize] = true;
                }
            }
        }
        Self {
            width,
            height,
            points,
            mask,
        }
    }

    /// Number of edge pixels in the set.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if no edge pixels were extracted.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Edge pixels in insertion (seed) order.
    #[must_use]
    pub fn points(&self) -> &[Coord] {
        &self.points
    }

    /// Returns `true` if `coord` is an edge pixel of this set.
    #[must_use]
    pub fn contains(&self, coord: Coord) -> bool {
        coord.x < self.width
            && coord.y < self.height
            && self.mask[self.index(coord)]
    }

    const fn index(&self, coord: Coord) -> usize {
        coord.y as usize * self.width as usize + coord.x as usize
    }

    /// The neighbor of `coord` one step in `direction`, when it stays
    /// within the set's bounds.
    fn step(&self, coord: Coord, direction: Direction) -> Option<Coord> {
        let (dx, dy) = direction.offset();
        let nx = i64::from(coord.x) + dx;
        let ny = i64::from(coord.y) + dy;
        if nx < 0 || ny < 0 || nx >= i64::from(self.width) || ny >= i64::from(self.height) {
            return None;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let next = Coord::new(nx as u32, ny as u32);
        Some(next)
    }
}

/// Greedily link the point set into ordered lines using the given RNG for
/// the per-seed direction shuffle.
///
/// Every point in the set ends up in exactly one line; consecutive
/// coordinates within a line are always 8-adjacent; isolated points produce
/// single-point lines. Lines are ordered by first-seen seed point.
pub fn trace_lines_with_rng<R: Rng + ?Sized>(points: &PointSet, rng: &mut R) -> Vec<Line> {
    let mut visited = vec![false; points.mask.len()];
    let mut lines = Vec::new();

    for &seed in points.points() {
        if visited[points.index(seed)] {
            continue;
        }
        visited[points.index(seed)] = true;

        // A fresh permutation per seed point, never a shared list.
        let mut directions = Direction::ALL;
        directions.shuffle(rng);

        let mut line = vec![seed];
        let mut current = seed;
        let mut i = 0;
        while i < directions.len() {
            let Some(next) = points.step(current, directions[i]) else {
                i += 1;
                continue;
            };
            if !points.contains(next) || visited[points.index(next)] {
                i += 1;
                continue;
            }
            // Successful extension: restart the direction scan from the
            // front of the same shuffled list.
            visited[points.index(next)] = true;
            line.push(next);
            current = next;
            i = 0;
        }
        lines.push(Line::new(line));
    }

    lines
}

/// Greedily link the point set into ordered lines with an entropy-seeded
/// RNG.
///
/// Repeated runs on identical input may decompose branching clusters into
/// different (equally valid) lines; total point coverage is always the
/// same. Use [`trace_lines_with_rng`] with a seeded RNG for reproducible
/// output.
#[must_use = "returns the traced lines"]
pub fn trace_lines(points: &PointSet) -> Vec<Line> {
    let mut rng = StdRng::from_entropy();
    trace_lines_with_rng(points, &mut rng)
}
