use eframe::egui::{
    self, Align2, Color32, FontId, Painter, Pos2, Shape, Stroke, StrokeKind,
};
use kurbo::{BezPath, PathEl, Point, Rect};

// max deviation (screen units) when flattening curves into polylines
const FLATTEN_TOLERANCE: f64 = 0.25;

// canvas defaults; nothing in the editor changes them
const LINE_WIDTH: f32 = 1.0;
const TEXT_COLOR: Color32 = Color32::BLACK;

/// A canvas-style 2D drawing surface.
///
/// Coordinates are surface-local: (0, 0) is the top-left corner of the
/// drawing area. Path and style state persists between calls, the same way
/// it does on an html canvas context.
pub trait Surface {
    /// wipe everything drawn so far
    fn clear(&mut self);

    fn set_stroke_color(&mut self, color: Color32);

    /// alternating dash and gap lengths; an empty slice means solid lines
    fn set_line_dash(&mut self, pattern: &[f64]);

    fn stroke_rect(&mut self, rect: Rect);

    fn begin_path(&mut self);
    fn move_to(&mut self, p: Point);
    fn line_to(&mut self, p: Point);
    fn bezier_curve_to(&mut self, c1: Point, c2: Point, p: Point);
    fn close_path(&mut self);

    /// stroke the current path with the current color and dash
    fn stroke(&mut self);

    fn set_font_size(&mut self, size: f32);

    /// `at` is the left end of the text baseline
    fn fill_text(&mut self, text: &str, at: Point);
}

/// [`Surface`] backed by an egui painter, clipped to the canvas rect.
pub struct PainterSurface {
    painter: Painter,
    canvas: egui::Rect,
    background: Color32,

    stroke_color: Color32,
    line_dash: Vec<f64>,
    font: FontId,

    path: BezPath,
    // start of the last subpath, so drawing can resume after a close
    subpath_start: Option<Point>,
}

impl PainterSurface {
    pub fn new(painter: &Painter, canvas: egui::Rect, background: Color32) -> Self {
        PainterSurface {
            painter: painter.with_clip_rect(canvas),
            canvas,
            background,
            stroke_color: Color32::BLACK,
            line_dash: Vec::new(),
            font: FontId::proportional(10.0),
            path: BezPath::new(),
            subpath_start: None,
        }
    }

    fn to_screen(&self, p: Point) -> Pos2 {
        to_screen(self.canvas.min, p)
    }

    /// after a close, drawing continues from the start of that subpath
    fn reopen_closed_subpath(&mut self) {
        let closed = matches!(self.path.elements().last(), Some(PathEl::ClosePath));
        if let (true, Some(start)) = (closed, self.subpath_start) {
            self.path.move_to(start);
        }
    }

    /// split the current path into screen-space polylines,
    /// each flagged with whether it was closed
    fn flatten(&self) -> Vec<(Vec<Pos2>, bool)> {
        let origin = self.canvas.min;
        let mut polylines: Vec<(Vec<Pos2>, bool)> = Vec::new();
        kurbo::flatten(self.path.iter(), FLATTEN_TOLERANCE, |el| match el {
            PathEl::MoveTo(p) => polylines.push((vec![to_screen(origin, p)], false)),
            PathEl::LineTo(p) => {
                if let Some((points, _)) = polylines.last_mut() {
                    points.push(to_screen(origin, p));
                }
            }
            PathEl::ClosePath => {
                if let Some((_, closed)) = polylines.last_mut() {
                    *closed = true;
                }
            }
            // flatten only ever emits lines
            PathEl::QuadTo(..) | PathEl::CurveTo(..) => {}
        });
        polylines
    }

    /// canvas repeats odd-length dash lists to make them even
    fn dash_pattern(&self) -> (Vec<f32>, Vec<f32>) {
        let mut pattern: Vec<f32> = self.line_dash.iter().map(|&d| d as f32).collect();
        if pattern.len() % 2 == 1 {
            pattern.extend_from_within(..);
        }
        let dashes = pattern.iter().step_by(2).copied().collect();
        let gaps = pattern.iter().skip(1).step_by(2).copied().collect();
        (dashes, gaps)
    }
}

fn to_screen(origin: Pos2, p: Point) -> Pos2 {
    origin + egui::vec2(p.x as f32, p.y as f32)
}

impl Surface for PainterSurface {
    fn clear(&mut self) {
        self.painter.rect_filled(self.canvas, 0.0, self.background);
    }

    fn set_stroke_color(&mut self, color: Color32) {
        self.stroke_color = color;
    }

    fn set_line_dash(&mut self, pattern: &[f64]) {
        // canvas ignores patterns with negative or non-finite entries
        if pattern.iter().all(|d| d.is_finite() && *d >= 0.0) {
            self.line_dash = pattern.to_vec();
        }
    }

    fn stroke_rect(&mut self, rect: Rect) {
        let min = self.to_screen(Point::new(rect.x0, rect.y0));
        let max = self.to_screen(Point::new(rect.x1, rect.y1));
        let stroke = Stroke::new(LINE_WIDTH, self.stroke_color);
        self.painter.rect_stroke(
            egui::Rect::from_min_max(min, max),
            0.0,
            stroke,
            StrokeKind::Middle,
        );
    }

    fn begin_path(&mut self) {
        self.path = BezPath::new();
        self.subpath_start = None;
    }

    fn move_to(&mut self, p: Point) {
        self.path.move_to(p);
        self.subpath_start = Some(p);
    }

    fn line_to(&mut self, p: Point) {
        // on an empty path this only starts a subpath
        if self.path.elements().is_empty() {
            self.move_to(p);
            return;
        }
        self.reopen_closed_subpath();
        self.path.line_to(p);
    }

    fn bezier_curve_to(&mut self, c1: Point, c2: Point, p: Point) {
        if self.path.elements().is_empty() {
            self.move_to(c1);
        } else {
            self.reopen_closed_subpath();
        }
        self.path.curve_to(c1, c2, p);
    }

    fn close_path(&mut self) {
        if !self.path.elements().is_empty() {
            self.path.close_path();
        }
    }

    fn stroke(&mut self) {
        let stroke = Stroke::new(LINE_WIDTH, self.stroke_color);
        let (dashes, gaps) = self.dash_pattern();
        let dashed = dashes.iter().chain(&gaps).any(|&d| d > 0.0);

        for (mut points, closed) in self.flatten() {
            if points.len() < 2 {
                continue;
            }
            if dashed {
                if closed {
                    points.push(points[0]);
                }
                self.painter.extend(Shape::dashed_line_with_offset(
                    &points, stroke, &dashes, &gaps, 0.0,
                ));
            } else if closed {
                self.painter.add(Shape::closed_line(points, stroke));
            } else {
                self.painter.add(Shape::line(points, stroke));
            }
        }
    }

    fn set_font_size(&mut self, size: f32) {
        self.font = FontId::proportional(size);
    }

    fn fill_text(&mut self, text: &str, at: Point) {
        let pos = self.to_screen(at);
        self.painter
            .text(pos, Align2::LEFT_BOTTOM, text, self.font.clone(), TEXT_COLOR);
    }
}

/// Everything a [`RecordingSurface`] was asked to do.
#[cfg(test)]
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear,
    SetStrokeColor(Color32),
    SetLineDash(Vec<f64>),
    StrokeRect(Rect),
    BeginPath,
    MoveTo(Point),
    LineTo(Point),
    BezierCurveTo(Point, Point, Point),
    ClosePath,
    Stroke,
    SetFontSize(f32),
    FillText(String, Point),
}

/// headless surface that keeps the commands issued since the last clear
#[cfg(test)]
#[derive(Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

#[cfg(test)]
impl RecordingSurface {
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::FillText(text, _) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }
    fn set_stroke_color(&mut self, color: Color32) {
        self.commands.push(DrawCommand::SetStrokeColor(color));
    }
    fn set_line_dash(&mut self, pattern: &[f64]) {
        self.commands.push(DrawCommand::SetLineDash(pattern.to_vec()));
    }
    fn stroke_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::StrokeRect(rect));
    }
    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }
    fn move_to(&mut self, p: Point) {
        self.commands.push(DrawCommand::MoveTo(p));
    }
    fn line_to(&mut self, p: Point) {
        self.commands.push(DrawCommand::LineTo(p));
    }
    fn bezier_curve_to(&mut self, c1: Point, c2: Point, p: Point) {
        self.commands.push(DrawCommand::BezierCurveTo(c1, c2, p));
    }
    fn close_path(&mut self) {
        self.commands.push(DrawCommand::ClosePath);
    }
    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke);
    }
    fn set_font_size(&mut self, size: f32) {
        self.commands.push(DrawCommand::SetFontSize(size));
    }
    fn fill_text(&mut self, text: &str, at: Point) {
        self.commands.push(DrawCommand::FillText(text.to_owned(), at));
    }
}
