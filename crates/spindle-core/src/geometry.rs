#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.width * factor, self.height * factor)
    }
}

/// Axis-aligned rectangle in stage coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub fn centered(center: Point, size: Size) -> Self {
        Self {
            origin: Point::new(center.x - size.width / 2.0, center.y - size.height / 2.0),
            size,
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.origin.x
            && p.x <= self.origin.x + self.size.width
            && p.y >= self.origin.y
            && p.y <= self.origin.y + self.size.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_contains_its_center_and_edges() {
        let rect = Rect::centered(Point::new(100.0, 50.0), Size::new(40.0, 20.0));
        assert_eq!(rect.origin, Point::new(80.0, 40.0));
        assert!(rect.contains(Point::new(100.0, 50.0)));
        assert!(rect.contains(Point::new(80.0, 40.0)));
        assert!(rect.contains(Point::new(120.0, 60.0)));
        assert!(!rect.contains(Point::new(120.5, 50.0)));
        assert!(!rect.contains(Point::new(100.0, 39.0)));
    }
}
