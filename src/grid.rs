//! A dense 2D byte buffer addressed by `Coord`.
//!
//! Bounded accessors panic on coordinates outside the grid, the `_wrapped` variants first reduce
//! the coordinate modulo the grid dimensions.

use crate::coordinates::{Coord, Rect};
use crate::directions::{DirectionSet, Neighbours};
use crate::errors::*;
use crate::units::{Height, Width};

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl Grid {
    /// A zero filled grid.
    pub fn new(width: Width, height: Height) -> Result<Grid> {
        let (Width(w), Height(h)) = (width, height);
        let size = w.checked_mul(h)
            .filter(|_| w <= isize::MAX as usize && h <= isize::MAX as usize)
            .ok_or(ErrorKind::DimensionsOverflow(w, h))?;

        let mut cells = Vec::new();
        cells.try_reserve_exact(size)?;
        cells.resize(size, 0);
        Ok(Grid {
            width: w,
            height: h,
            cells,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_wh(self.width, self.height)
    }

    /// The cells in row-major order.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.cells
    }

    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.cells
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.cells
    }

    /// Overwrite every cell with the cells of `other`.
    ///
    /// # Panics
    /// If the two grids differ in width or height.
    pub fn copy_from(&mut self, other: &Grid) {
        assert!(self.width == other.width && self.height == other.height,
                "Cannot copy a {}x{} grid into a {}x{} grid",
                other.width,
                other.height,
                self.width,
                self.height);
        self.cells.copy_from_slice(&other.cells);
    }

    pub fn clear(&mut self) {
        self.fill(0);
    }

    pub fn fill(&mut self, value: u8) {
        for c in self.cells.iter_mut() {
            *c = value;
        }
    }

    #[inline]
    pub fn has_coord(&self, coord: Coord) -> bool {
        coord.x >= 0 && coord.y >= 0 && (coord.x as usize) < self.width &&
        (coord.y as usize) < self.height
    }

    /// Row-major index of `coord`.
    ///
    /// # Panics
    /// If `coord` is outside the grid.
    #[inline]
    pub fn index_of(&self, coord: Coord) -> usize {
        if !self.has_coord(coord) {
            panic!("{:?} is outside a {}x{} grid", coord, self.width, self.height);
        }
        self.width * coord.y as usize + coord.x as usize
    }

    /// # Panics
    /// If `index >= size()`.
    #[inline]
    pub fn coord_of(&self, index: usize) -> Coord {
        assert!(index < self.size(),
                "Index {} is outside a grid of {} cells",
                index,
                self.size());
        Coord::new((index % self.width) as isize, (index / self.width) as isize)
    }

    #[inline]
    pub fn get(&self, coord: Coord) -> u8 {
        self.cells[self.index_of(coord)]
    }

    #[inline]
    pub fn set(&mut self, coord: Coord, value: u8) {
        let index = self.index_of(coord);
        self.cells[index] = value;
    }

    #[inline]
    pub fn get_wrapped(&self, coord: Coord) -> u8 {
        self.get(coord.wrap(self.width, self.height))
    }

    #[inline]
    pub fn set_wrapped(&mut self, coord: Coord, value: u8) {
        let wrapped = coord.wrap(self.width, self.height);
        self.set(wrapped, value);
    }

    /// The surrounding coordinates of `coord` that lie inside the grid.
    ///
    /// # Panics
    /// If `coord` is outside the grid.
    pub fn neighbours(&self, coord: Coord, set: DirectionSet) -> Neighbours {
        assert!(self.has_coord(coord),
                "{:?} is outside a {}x{} grid",
                coord,
                self.width,
                self.height);
        let mut nbrs = Neighbours::new();
        for &dir in set.directions() {
            let nbr = coord + dir.offset();
            if self.has_coord(nbr) {
                nbrs.push(dir, nbr);
            }
        }
        nbrs
    }

    /// Every surrounding coordinate of `coord`, wrapped around the grid edges.
    pub fn neighbours_wrapped(&self, coord: Coord, set: DirectionSet) -> Neighbours {
        // wrap first so extreme coordinates cannot overflow when offset
        let centre = coord.wrap(self.width, self.height);
        let mut nbrs = Neighbours::new();
        for &dir in set.directions() {
            nbrs.push(dir, (centre + dir.offset()).wrap(self.width, self.height));
        }
        nbrs
    }

    /// A copy of the cells inside `rect`.
    ///
    /// # Panics
    /// If `rect` does not lie entirely inside the grid.
    pub fn sub_grid(&self, rect: &Rect) -> Result<Grid> {
        assert!(self.rect().contains_rect(rect),
                "{:?} is not inside a {}x{} grid",
                rect,
                self.width,
                self.height);
        let mut sub = Grid::new(Width(rect.width()), Height(rect.height()))?;
        sub.blit_rect(self, rect, Coord::default());
        Ok(sub)
    }

    /// Copy all of `source` with its top left corner at `at`, clipped to this grid.
    pub fn blit(&mut self, source: &Grid, at: Coord) {
        self.blit_rect(source, &source.rect(), at);
    }

    /// Copy the `src_rect` region of `source` with its top left corner at `at`. Anything falling
    /// outside either grid is skipped.
    pub fn blit_rect(&mut self, source: &Grid, src_rect: &Rect, at: Coord) {
        let shift = at - src_rect.min;
        let src = source.rect().overlap(src_rect);
        let dst = self.rect().overlap(&(src + shift));
        if dst.is_empty() {
            return;
        }

        let row_len = dst.width();
        for y in dst.min.y..dst.max.y {
            let dst_start = self.index_of(Coord::new(dst.min.x, y));
            let src_start = source.index_of(Coord::new(dst.min.x, y) - shift);
            self.cells[dst_start..dst_start + row_len]
                .copy_from_slice(&source.cells[src_start..src_start + row_len]);
        }
    }

    /// Copy all of `source` scaled up by `multiplier`, see `scale_blit_rect`.
    pub fn scale_blit(&mut self, source: &Grid, at: Coord, multiplier: usize) {
        self.scale_blit_rect(source, &source.rect(), at, multiplier);
    }

    /// Copy the `src_rect` region of `source` so every source cell fills a
    /// `multiplier` x `multiplier` block, the block of `src_rect.min` having its top left
    /// corner at `at`. Clipped to both grids.
    ///
    /// A destination row that repeats the source row of the row above is copied from the row
    /// above rather than recomputed.
    ///
    /// # Panics
    /// If `multiplier` is zero.
    pub fn scale_blit_rect(&mut self,
                           source: &Grid,
                           src_rect: &Rect,
                           at: Coord,
                           multiplier: usize) {
        assert!(multiplier > 0, "Cannot scale a blit by zero");
        let n = multiplier as isize;

        let src = source.rect().overlap(src_rect);
        if src.is_empty() {
            return;
        }
        let scaled = Rect::from_coord_wh(at + (src.min - src_rect.min) * n,
                                         src.width() * multiplier,
                                         src.height() * multiplier);
        let dst = self.rect().overlap(&scaled);
        if dst.is_empty() {
            return;
        }

        let row_len = dst.width();
        let source_of = |d: Coord| {
            Coord::new(src_rect.min.x + (d.x - at.x).div_euclid(n),
                       src_rect.min.y + (d.y - at.y).div_euclid(n))
        };

        let mut previous: Option<(usize, isize)> = None;
        for y in dst.min.y..dst.max.y {
            let row_start = self.index_of(Coord::new(dst.min.x, y));
            let src_y = source_of(Coord::new(dst.min.x, y)).y;

            match previous {
                Some((previous_start, previous_src_y)) if previous_src_y == src_y => {
                    self.cells.copy_within(previous_start..previous_start + row_len, row_start);
                }
                _ => {
                    for x in dst.min.x..dst.max.x {
                        let value = source.get(source_of(Coord::new(x, y)));
                        self.cells[row_start + (x - dst.min.x) as usize] = value;
                    }
                }
            }
            previous = Some((row_start, src_y));
        }
    }
}
