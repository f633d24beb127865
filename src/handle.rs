use eframe::egui::Color32;
use kurbo::{Point, Rect, Size, Vec2};

use crate::surface::Surface;

/// A draggable square marker, positioned by its center.
#[derive(Clone, Debug, PartialEq)]
pub struct Handle {
    center: Point,
    // full width/height of the hit box
    size: Size,
    color: Color32,
}

impl Handle {
    /// a black handle centered on `center`
    pub fn new(center: Point, size: Size) -> Self {
        Handle {
            center,
            size,
            color: Color32::BLACK,
        }
    }

    pub fn with_color(mut self, color: Color32) -> Self {
        self.color = color;
        self
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    /// the box outline, centered on the handle
    pub fn rect(&self) -> Rect {
        Rect::from_center_size(self.center, self.size)
    }

    pub fn draw(&self, surface: &mut impl Surface) {
        surface.set_stroke_color(self.color());
        surface.stroke_rect(self.rect());
    }

    /// If `p` lies strictly inside the box, returns its offset from the
    /// center (`p - center`). Points on the edge are not hits.
    pub fn hit_test(&self, p: Point) -> Option<Vec2> {
        let hw = 0.5 * self.size.width;
        let hh = 0.5 * self.size.height;
        let inside = p.x > self.center.x - hw
            && p.x < self.center.x + hw
            && p.y > self.center.y - hh
            && p.y < self.center.y + hh;

        inside.then(|| p - self.center)
    }

    /// recenter the handle; no clamping, the caller redraws
    pub fn move_to(&mut self, p: Point) {
        self.center = p;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};

    fn handle() -> Handle {
        Handle::new(Point::new(150.0, 50.0), Size::new(17.0, 17.0))
    }

    #[test]
    fn hit_inside_returns_signed_offset() {
        let h = handle();
        assert_eq!(h.hit_test(Point::new(150.0, 50.0)), Some(Vec2::ZERO));
        assert_eq!(
            h.hit_test(Point::new(144.0, 57.0)),
            Some(Vec2::new(-6.0, 7.0))
        );
        assert_eq!(
            h.hit_test(Point::new(158.4, 41.6)),
            Some(Point::new(158.4, 41.6) - Point::new(150.0, 50.0))
        );
    }

    #[test]
    fn boundary_points_are_not_hits() {
        let h = handle();
        // x ± w/2 and y ± h/2
        assert_eq!(h.hit_test(Point::new(141.5, 50.0)), None);
        assert_eq!(h.hit_test(Point::new(158.5, 50.0)), None);
        assert_eq!(h.hit_test(Point::new(150.0, 41.5)), None);
        assert_eq!(h.hit_test(Point::new(150.0, 58.5)), None);
        // corners
        assert_eq!(h.hit_test(Point::new(141.5, 41.5)), None);
        assert_eq!(h.hit_test(Point::new(158.5, 58.5)), None);
    }

    #[test]
    fn outside_points_miss() {
        let h = handle();
        assert_eq!(h.hit_test(Point::new(100.0, 50.0)), None);
        assert_eq!(h.hit_test(Point::new(150.0, 60.0)), None);
        // inside on one axis only
        assert_eq!(h.hit_test(Point::new(155.0, 70.0)), None);
    }

    #[test]
    fn move_to_is_exact_and_unclamped() {
        let mut h = handle();
        h.move_to(Point::new(-12.25, 1e6));
        assert_eq!(h.center(), Point::new(-12.25, 1e6));

        h.move_to(Point::new(0.1 + 0.2, 7.0));
        assert_eq!(h.center(), Point::new(0.1 + 0.2, 7.0));
    }

    #[test]
    fn hit_box_follows_the_handle() {
        let mut h = handle();
        h.move_to(Point::new(10.0, 10.0));
        assert_eq!(h.hit_test(Point::new(150.0, 50.0)), None);
        assert_eq!(h.hit_test(Point::new(12.0, 9.0)), Some(Vec2::new(2.0, -1.0)));
    }

    #[test]
    fn defaults_to_black_and_strokes_its_box() {
        let h = handle();
        assert_eq!(h.color(), Color32::BLACK);

        let red = h.clone().with_color(Color32::RED);
        let mut surface = RecordingSurface::default();
        red.draw(&mut surface);
        assert_eq!(
            surface.commands,
            vec![
                DrawCommand::SetStrokeColor(Color32::RED),
                DrawCommand::StrokeRect(Rect::new(141.5, 41.5, 158.5, 58.5)),
            ]
        );
    }
}
