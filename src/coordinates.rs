use std::cmp;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A position on a grid, or an offset between two positions.
///
/// Offsets may be negative so both components are signed. The absence of a coordinate is
/// expressed with `Option<Coord>` rather than a reserved value.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd, Default)]
pub struct Coord {
    pub x: isize,
    pub y: isize,
}

impl Coord {
    #[inline]
    pub const fn new(x: isize, y: isize) -> Coord {
        Coord { x, y }
    }

    /// Reduce the coordinate modulo `width` and `height`. Negative components wrap around from
    /// the far edge, so `x = -1` on a width of 10 becomes `x = 9`.
    ///
    /// Panics if either dimension is zero.
    #[inline]
    pub fn wrap(self, width: usize, height: usize) -> Coord {
        assert!(width > 0 && height > 0,
                "Cannot wrap a coordinate into a {}x{} area",
                width,
                height);
        Coord::new(self.x.rem_euclid(width as isize),
                   self.y.rem_euclid(height as isize))
    }

    /// Pull the coordinate into `0..width` and `0..height`.
    /// A zero dimension clamps that component to 0.
    pub fn clamp(self, width: usize, height: usize) -> Coord {
        let last_column = width.saturating_sub(1) as isize;
        let last_row = height.saturating_sub(1) as isize;
        Coord::new(cmp::max(0, cmp::min(self.x, last_column)),
                   cmp::max(0, cmp::min(self.y, last_row)))
    }
}

impl Add for Coord {
    type Output = Coord;
    #[inline]
    fn add(self, other: Coord) -> Coord {
        Coord::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Coord {
    type Output = Coord;
    #[inline]
    fn sub(self, other: Coord) -> Coord {
        Coord::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<isize> for Coord {
    type Output = Coord;
    #[inline]
    fn mul(self, scalar: isize) -> Coord {
        Coord::new(self.x * scalar, self.y * scalar)
    }
}

impl Div<isize> for Coord {
    type Output = Coord;
    #[inline]
    fn div(self, scalar: isize) -> Coord {
        Coord::new(self.x / scalar, self.y / scalar)
    }
}

impl Neg for Coord {
    type Output = Coord;
    #[inline]
    fn neg(self) -> Coord {
        Coord::new(-self.x, -self.y)
    }
}

impl From<(isize, isize)> for Coord {
    fn from(x_y_pair: (isize, isize)) -> Coord {
        Coord::new(x_y_pair.0, x_y_pair.1)
    }
}

/// An axis aligned rectangle. `min` is inclusive, `max` is exclusive.
///
/// A rectangle whose `max` is not beyond its `min` on either axis is empty; such rectangles are
/// produced by `overlap` of disjoint rectangles and report a zero width/height.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub struct Rect {
    pub min: Coord,
    pub max: Coord,
}

impl Rect {
    #[inline]
    pub const fn new(min: Coord, max: Coord) -> Rect {
        Rect { min, max }
    }

    /// A `width` x `height` rectangle with its minimum corner at the origin.
    pub fn from_wh(width: usize, height: usize) -> Rect {
        Rect::from_coord_wh(Coord::default(), width, height)
    }

    pub fn from_coord_wh(coord: Coord, width: usize, height: usize) -> Rect {
        Rect::new(coord, coord + Coord::new(width as isize, height as isize))
    }

    #[inline]
    pub fn width(&self) -> usize {
        cmp::max(0, self.max.x - self.min.x) as usize
    }

    #[inline]
    pub fn height(&self) -> usize {
        cmp::max(0, self.max.y - self.min.y) as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Move the rectangle so its minimum corner sits at `coord`, keeping its size.
    pub fn with_coord(&self, coord: Coord) -> Rect {
        Rect::new(coord, coord + (self.max - self.min))
    }

    pub fn with_width(&self, width: usize) -> Rect {
        Rect::from_coord_wh(self.min, width, self.height())
    }

    pub fn with_height(&self, height: usize) -> Rect {
        Rect::from_coord_wh(self.min, self.width(), height)
    }

    /// Multiply the size of the rectangle, the minimum corner stays put.
    pub fn scale(&self, scalar: usize) -> Rect {
        Rect::new(self.min, self.min + (self.max - self.min) * scalar as isize)
    }

    /// Divide the size of the rectangle, the minimum corner stays put.
    pub fn shrink(&self, scalar: usize) -> Rect {
        Rect::new(self.min, self.min + (self.max - self.min) / scalar as isize)
    }

    /// The intersection of two rectangles, possibly empty.
    pub fn overlap(&self, other: &Rect) -> Rect {
        Rect::new(Coord::new(cmp::max(self.min.x, other.min.x),
                             cmp::max(self.min.y, other.min.y)),
                  Coord::new(cmp::min(self.max.x, other.max.x),
                             cmp::min(self.max.y, other.max.y)))
    }

    /// Clamp each corner of `other` to lie within this rectangle.
    pub fn clamp_rect(&self, other: &Rect) -> Rect {
        let clamp_x = |x: isize| cmp::max(self.min.x, cmp::min(x, self.max.x));
        let clamp_y = |y: isize| cmp::max(self.min.y, cmp::min(y, self.max.y));
        Rect::new(Coord::new(clamp_x(other.min.x), clamp_y(other.min.y)),
                  Coord::new(clamp_x(other.max.x), clamp_y(other.max.y)))
    }

    /// The closest coordinate inside the rectangle, or `None` if the rectangle is empty.
    pub fn clamp_coord(&self, coord: Coord) -> Option<Coord> {
        if self.is_empty() {
            return None;
        }
        // max is exclusive
        Some(Coord::new(cmp::max(self.min.x, cmp::min(coord.x, self.max.x - 1)),
                        cmp::max(self.min.y, cmp::min(coord.y, self.max.y - 1))))
    }

    /// Is `other` entirely inside this rectangle (touching the edges is allowed)?
    pub fn contains_rect(&self, other: &Rect) -> bool {
        let within_x = |x: isize| self.min.x <= x && x <= self.max.x;
        let within_y = |y: isize| self.min.y <= y && y <= self.max.y;
        within_x(other.min.x) && within_x(other.max.x) && within_y(other.min.y) &&
        within_y(other.max.y)
    }

    #[inline]
    pub fn contains_coord(&self, coord: Coord) -> bool {
        self.min.x <= coord.x && coord.x < self.max.x && self.min.y <= coord.y &&
        coord.y < self.max.y
    }

    /// Every coordinate in the rectangle in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let (min, max) = (self.min, self.max);
        (min.y..max.y).flat_map(move |y| (min.x..max.x).map(move |x| Coord::new(x, y)))
    }
}

impl Add<Coord> for Rect {
    type Output = Rect;
    fn add(self, offset: Coord) -> Rect {
        Rect::new(self.min + offset, self.max + offset)
    }
}

impl Sub<Coord> for Rect {
    type Output = Rect;
    fn sub(self, offset: Coord) -> Rect {
        Rect::new(self.min - offset, self.max - offset)
    }
}
