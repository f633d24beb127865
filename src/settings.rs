use eframe::egui::{Color32, Vec2};
use kurbo::{Point, Size};

use crate::scene::HANDLE_COUNT;

/// presentation constants for the editor.
///
/// nothing here is loaded from disk; `Default` carries the values the
/// widget has always used.
#[derive(Clone, Debug)]
pub struct EditorSettings {
    // size of the drawing surface in screen units
    pub canvas_size: Vec2,
    pub background: Color32,

    // every handle shares the same hit-box size
    pub handle_size: Size,
    /// initial center and stroke color of each handle, in role order
    pub handle_layout: [(Point, Color32); HANDLE_COUNT],

    // dashed lines from the tangent points to the control points
    pub construction_dash: Vec<f64>,
    pub construction_color: Color32,

    pub curve_color: Color32,

    // coordinate readout
    pub font_size: f32,
    pub readout_positions: [Point; 2],
}

// css named colors, the handles were always drawn with these
const GRAY: Color32 = Color32::from_rgb(128, 128, 128);
const RED: Color32 = Color32::from_rgb(255, 0, 0);
const GREEN: Color32 = Color32::from_rgb(0, 128, 0);

impl Default for EditorSettings {
    fn default() -> Self {
        EditorSettings {
            canvas_size: Vec2::new(300.0, 260.0),
            background: Color32::WHITE,

            handle_size: Size::new(17.0, 17.0),
            handle_layout: [
                (Point::new(150.0, 50.0), GRAY),
                (Point::new(150.0, 150.0), GRAY),
                (Point::new(100.0, 200.0), RED), // control point 1
                (Point::new(100.0, 100.0), GREEN), // control point 2
                (Point::new(50.0, 150.0), GRAY),
                (Point::new(50.0, 50.0), GRAY),
            ],

            construction_dash: vec![5.0, 10.0],
            construction_color: GRAY,

            curve_color: Color32::BLACK,

            font_size: 12.0,
            readout_positions: [Point::new(25.0, 225.0), Point::new(25.0, 240.0)],
        }
    }
}
