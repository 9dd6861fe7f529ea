//! Fixed design geometry of the sort icon.
//!
//! All coordinates are in pixels of a `REFERENCE_SIZE` square canvas with the
//! origin top-left. Bounds are inclusive, so a pixel centre lying exactly on an
//! edge belongs to the shape.

pub const REFERENCE_SIZE: u32 = 512;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    pub const fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            min: Point::new(x0, y0),
            max: Point::new(x1, y1),
        }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.min.x && x <= self.max.x && y >= self.min.y && y <= self.max.y
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedRect {
    pub rect: Rect,
    pub radius: f32,
}

impl RoundedRect {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        if !self.rect.contains(x, y) {
            return false;
        }
        let r = self.radius;
        // Distance into the corner region, zero along the straight edges.
        let dx = (self.rect.min.x + r - x).max(x - (self.rect.max.x - r)).max(0.0);
        let dy = (self.rect.min.y + r - y).max(y - (self.rect.max.y - r)).max(0.0);
        dx * dx + dy * dy <= r * r
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle(pub [Point; 3]);

impl Triangle {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        let [p1, p2, p3] = self.0;
        let c1 = cross(p2.x - p1.x, p2.y - p1.y, x - p1.x, y - p1.y);
        let c2 = cross(p3.x - p2.x, p3.y - p2.y, x - p2.x, y - p2.y);
        let c3 = cross(p1.x - p3.x, p1.y - p3.y, x - p3.x, y - p3.y);
        let has_neg = c1 < 0.0 || c2 < 0.0 || c3 < 0.0;
        let has_pos = c1 > 0.0 || c2 > 0.0 || c3 > 0.0;
        !(has_neg && has_pos)
    }
}

#[inline]
fn cross(ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    ax * by - ay * bx
}

/// A triangular head on top of a rectangular shaft.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowGlyph {
    pub head: Triangle,
    pub shaft: Rect,
}

impl ArrowGlyph {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.head.contains(x, y) || self.shaft.contains(x, y)
    }

    /// The vertex of the head that is not part of its base.
    pub fn apex(&self) -> Point {
        let [a, b, c] = self.head.0;
        if b.y == c.y {
            a
        } else if a.y == c.y {
            b
        } else {
            c
        }
    }
}

pub const BACKGROUND: RoundedRect = RoundedRect {
    rect: Rect::new(20.0, 20.0, 492.0, 492.0),
    radius: 60.0,
};

/// Left glyph, pointing up.
pub const UP_ARROW: ArrowGlyph = ArrowGlyph {
    head: Triangle([
        Point::new(160.0, 120.0),
        Point::new(80.0, 240.0),
        Point::new(240.0, 240.0),
    ]),
    shaft: Rect::new(130.0, 240.0, 190.0, 400.0),
};

/// Right glyph, pointing down.
pub const DOWN_ARROW: ArrowGlyph = ArrowGlyph {
    head: Triangle([
        Point::new(352.0, 400.0),
        Point::new(272.0, 280.0),
        Point::new(432.0, 280.0),
    ]),
    shaft: Rect::new(322.0, 120.0, 382.0, 280.0),
};

pub const ARROWS: [ArrowGlyph; 2] = [UP_ARROW, DOWN_ARROW];
