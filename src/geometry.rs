//! Geometric primitives for field placement.
//!
//! All values are page-relative units. Positions and dimensions are never
//! negative: constructors clamp to zero so a drag past the page edge can
//! never produce an inverted field.

/// A 2D point on a template page.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Create a new point, clamping negative coordinates to zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use signfield::geometry::Point;
    ///
    /// let p = Point::new(10.0, -3.0);
    /// assert_eq!(p.x, 10.0);
    /// assert_eq!(p.y, 0.0);
    /// ```
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: x.max(0.0),
            y: y.max(0.0),
        }
    }

    /// Return this point shifted along the x axis.
    pub fn shifted_x(&self, dx: f32) -> Self {
        Point::new(self.x + dx, self.y)
    }
}

/// Width and height of a placed field.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Width in page-relative units
    pub width: f32,
    /// Height in page-relative units
    pub height: f32,
}

impl Size {
    /// Create a new size, clamping negative dimensions to zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use signfield::geometry::Size;
    ///
    /// let s = Size::new(120.0, 28.0);
    /// assert_eq!(s.width, 120.0);
    /// assert_eq!(Size::new(-1.0, 5.0).width, 0.0);
    /// ```
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Return this size with a different height.
    pub fn with_height(&self, height: f32) -> Self {
        Size::new(self.width, height)
    }
}

/// A placed field's bounding rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Top-left corner
    pub origin: Point,
    /// Dimensions
    pub size: Size,
}

impl Rect {
    /// Create a rectangle from position and dimensions.
    ///
    /// # Examples
    ///
    /// ```
    /// use signfield::geometry::Rect;
    ///
    /// let r = Rect::new(10.0, 20.0, 100.0, 50.0);
    /// assert_eq!(r.origin.x, 10.0);
    /// assert_eq!(r.size.height, 50.0);
    /// ```
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// Get the right edge x-coordinate.
    pub fn right(&self) -> f32 {
        self.origin.x + self.size.width
    }

    /// Get the bottom edge y-coordinate.
    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    /// Return this rectangle translated by (dx, dy).
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Rect {
            origin: Point::new(self.origin.x + dx, self.origin.y + dy),
            size: self.size,
        }
    }
}
