use kurbo::Point;

use crate::scene::{HandleRole, Scene};
use crate::settings::EditorSettings;
use crate::surface::Surface;

/// Redraw the whole editor: construction lines, handles, the curve and the
/// control point readout. Only the surface is touched.
pub fn render(surface: &mut impl Surface, scene: &Scene, settings: &EditorSettings) {
    let anchor0 = scene.handle(HandleRole::StartAnchor).center();
    let tangent1 = scene.handle(HandleRole::StartTangent).center();
    let control1 = scene.handle(HandleRole::Control1).center();
    let control2 = scene.handle(HandleRole::Control2).center();
    let tangent2 = scene.handle(HandleRole::EndTangent).center();
    let anchor1 = scene.handle(HandleRole::EndAnchor).center();

    surface.clear();

    // dashed lines out to the control points
    surface.begin_path();
    surface.move_to(tangent1);
    surface.line_to(control1);
    surface.move_to(tangent2);
    surface.line_to(control2);
    surface.set_line_dash(&settings.construction_dash);
    surface.set_stroke_color(settings.construction_color);
    surface.stroke();
    surface.set_line_dash(&[]);

    for handle in scene.handles() {
        handle.draw(surface);
    }

    // anchor -> tangent, the cubic itself, tangent -> anchor, closed
    surface.begin_path();
    surface.move_to(anchor0);
    surface.line_to(tangent1);
    surface.bezier_curve_to(control1, control2, tangent2);
    surface.line_to(anchor1);
    surface.close_path();
    surface.set_stroke_color(settings.curve_color);
    surface.stroke();

    surface.set_font_size(settings.font_size);
    let [first, second] = settings.readout_positions;
    surface.fill_text(&readout("Control point 1", control1), first);
    surface.fill_text(&readout("Control point 2", control2), second);
}

/// `"label: (x,y)"`, with whole numbers printed without a fraction
pub fn readout(label: &str, p: Point) -> String {
    format!("{label}: ({},{})", p.x, p.y)
}
