use std::fmt;

use geo_traits::{CoordTrait, RectTrait};

use crate::point::Point;
use crate::r#type::QuadNum;

/// One of the four equal sub-rectangles formed by bisecting a rectangle on both axes.
///
/// "Top" is the half with smaller y values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Quadrant {
    /// All quadrants, in the order used for routing inserts and collecting query results.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];

    #[inline]
    fn is_left(&self) -> bool {
        matches!(self, Quadrant::TopLeft | Quadrant::BottomLeft)
    }

    #[inline]
    fn is_top(&self) -> bool {
        matches!(self, Quadrant::TopLeft | Quadrant::TopRight)
    }
}

/// An axis-aligned rectangle described by its center and half-extents.
///
/// The rectangle spans `2 * half_width` by `2 * half_height`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle<N: QuadNum = f64> {
    /// center of the rectangle
    pub center: Point<N>,
    /// half of the full width
    pub half_width: N,
    /// half of the full height
    pub half_height: N,
}

impl<N: QuadNum> Rectangle<N> {
    /// Construct a new rectangle from its center and half-extents.
    pub fn new(center: Point<N>, half_width: N, half_height: N) -> Self {
        Self {
            center,
            half_width,
            half_height,
        }
    }

    /// Construct a rectangle from any min/max box implementing [`RectTrait`].
    pub fn from_rect(rect: &impl RectTrait<T = N>) -> Self {
        let (min_x, min_y) = (rect.min().x(), rect.min().y());
        let (max_x, max_y) = (rect.max().x(), rect.max().y());
        let half_width = (max_x - min_x) / N::TWO;
        let half_height = (max_y - min_y) / N::TWO;
        Self::new(
            Point::new(min_x + half_width, min_y + half_height),
            half_width,
            half_height,
        )
    }

    #[inline]
    pub fn left(&self) -> N {
        self.center.x - self.half_width
    }

    #[inline]
    pub fn right(&self) -> N {
        self.center.x + self.half_width
    }

    #[inline]
    pub fn top(&self) -> N {
        self.center.y - self.half_height
    }

    #[inline]
    pub fn bottom(&self) -> N {
        self.center.y + self.half_height
    }

    /// Returns `true` if `point` lies strictly inside this rectangle.
    ///
    /// Points exactly on an edge are **not** contained.
    #[inline]
    pub fn contains(&self, point: &Point<N>) -> bool {
        point.x > self.left()
            && point.x < self.right()
            && point.y > self.top()
            && point.y < self.bottom()
    }

    /// Returns `true` unless `other` is separated from this rectangle on either axis.
    ///
    /// Unlike [`contains`][Self::contains] this is a closed test: rectangles that only touch
    /// along an edge or at a corner intersect.
    #[inline]
    pub fn intersects(&self, other: &Rectangle<N>) -> bool {
        !(other.left() > self.right()
            || other.right() < self.left()
            || other.top() > self.bottom()
            || other.bottom() < self.top())
    }

    /// The bounds of one quadrant of this rectangle.
    ///
    /// The four quadrants tile this rectangle exactly; they share only the bisecting lines.
    pub fn quadrant(&self, quadrant: Quadrant) -> Rectangle<N> {
        let half_width = self.half_width / N::TWO;
        let half_height = self.half_height / N::TWO;
        let x = if quadrant.is_left() {
            self.center.x - half_width
        } else {
            self.center.x + half_width
        };
        let y = if quadrant.is_top() {
            self.center.y - half_height
        } else {
            self.center.y + half_height
        };
        Rectangle::new(Point::new(x, y), half_width, half_height)
    }
}

impl<N: QuadNum> fmt::Display for Rectangle<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} +- ({}, {})",
            self.center, self.half_width, self.half_height
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn rect(x: f64, y: f64, hw: f64, hh: f64) -> Rectangle {
        Rectangle::new(Point::new(x, y), hw, hh)
    }

    #[test]
    fn contains_is_open() {
        let r = rect(0.0, 0.0, 10.0, 5.0);
        assert!(r.contains(&Point::new(0.0, 0.0)));
        assert!(r.contains(&Point::new(9.999, -4.999)));

        // edges are excluded
        assert!(!r.contains(&Point::new(10.0, 0.0)));
        assert!(!r.contains(&Point::new(-10.0, 0.0)));
        assert!(!r.contains(&Point::new(0.0, 5.0)));
        assert!(!r.contains(&Point::new(0.0, -5.0)));
        assert!(!r.contains(&Point::new(10.0, 5.0)));

        assert!(!r.contains(&Point::new(11.0, 0.0)));
        assert!(!r.contains(&Point::new(0.0, 6.0)));
    }

    #[test]
    fn intersects_is_closed() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&a));

        // overlapping
        let b = rect(15.0, 15.0, 10.0, 10.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));

        // touching along an edge
        let c = rect(20.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&c));
        assert!(c.intersects(&a));

        // touching at a corner
        let d = rect(20.0, 20.0, 10.0, 10.0);
        assert!(a.intersects(&d));

        // fully inside
        let e = rect(1.0, 1.0, 2.0, 2.0);
        assert!(a.intersects(&e));
        assert!(e.intersects(&a));
    }

    #[test]
    fn intersects_rejects_gaps() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&rect(20.1, 0.0, 10.0, 10.0)));
        assert!(!a.intersects(&rect(-20.1, 0.0, 10.0, 10.0)));
        assert!(!a.intersects(&rect(0.0, 20.1, 10.0, 10.0)));
        assert!(!a.intersects(&rect(0.0, -20.1, 10.0, 10.0)));
        // overlapping on x only
        assert!(!a.intersects(&rect(5.0, 50.0, 10.0, 10.0)));
    }

    #[test]
    fn quadrants_tile_parent() {
        let parent = rect(100.0, 100.0, 100.0, 100.0);
        let [tl, tr, bl, br] = Quadrant::ALL.map(|q| parent.quadrant(q));

        assert_eq!(tl, rect(50.0, 50.0, 50.0, 50.0));
        assert_eq!(tr, rect(150.0, 50.0, 50.0, 50.0));
        assert_eq!(bl, rect(50.0, 150.0, 50.0, 50.0));
        assert_eq!(br, rect(150.0, 150.0, 50.0, 50.0));

        for q in [tl, tr, bl, br] {
            assert!(q.left() >= parent.left() && q.right() <= parent.right());
            assert!(q.top() >= parent.top() && q.bottom() <= parent.bottom());
        }
        assert_eq!(tl.right(), tr.left());
        assert_eq!(tl.bottom(), bl.top());
        assert_eq!(br.left(), bl.right());
        assert_eq!(br.top(), tr.bottom());
    }

    #[test]
    fn interior_points_fall_in_exactly_one_quadrant() {
        let parent = rect(0.0, 0.0, 8.0, 4.0);
        let quadrants = Quadrant::ALL.map(|q| parent.quadrant(q));

        for i in 1..16 {
            for j in 1..8 {
                let p = Point::new(-8.0 + i as f64 + 0.5, -4.0 + j as f64 + 0.25);
                let hits = quadrants.iter().filter(|q| q.contains(&p)).count();
                assert_eq!(hits, 1, "point {:?}", p);
            }
        }

        // on a bisecting line: no quadrant contains it
        let on_line = Point::new(0.0, 1.0);
        assert!(parent.contains(&on_line));
        assert!(quadrants.iter().all(|q| !q.contains(&on_line)));
    }

    #[test]
    fn from_geo_rect() {
        let r = geo_0_31::Rect::new(
            geo_0_31::coord! { x: 0.0, y: 10.0 },
            geo_0_31::coord! { x: 20.0, y: 30.0 },
        );
        assert_eq!(Rectangle::from_rect(&r), rect(10.0, 20.0, 10.0, 10.0));
    }
}
