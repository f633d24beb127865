mod controller;
mod handle;
mod renderer;
mod scene;
mod settings;
mod surface;

use crate::controller::InputController;
use crate::scene::Scene;
use crate::settings::EditorSettings;
use crate::surface::PainterSurface;
use eframe::egui::{self, Color32, CursorIcon, Sense, Visuals};

/// main application state
struct BezierHandles {
    // the six handles being edited
    scene: Scene,

    // idle / dragging state machine fed from the canvas response
    controller: InputController,

    settings: EditorSettings,
}

impl Default for BezierHandles {
    fn default() -> Self {
        BezierHandles::with_settings(EditorSettings::default())
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Bézier Handles v{} starting", env!("CARGO_PKG_VERSION"));

    let settings = EditorSettings::default();
    let window_size = settings.canvas_size + egui::vec2(32.0, 32.0);
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(window_size)
            .with_title("Bézier Handles"),
        ..Default::default()
    };

    eframe::run_native(
        "Bézier Handles",
        native_options,
        Box::new(|cc| Ok(Box::new(BezierHandles::new(cc, settings)))),
    )
    .map_err(|err| {
        log::error!("editor window failed: {err}");
        anyhow::anyhow!("failed to run the editor window: {err}")
    })
}

impl BezierHandles {
    fn new(_cc: &eframe::CreationContext<'_>, settings: EditorSettings) -> Self {
        Self::with_settings(settings)
    }

    fn with_settings(settings: EditorSettings) -> Self {
        BezierHandles {
            scene: Scene::from_settings(&settings),
            controller: InputController::new(),
            settings,
        }
    }

    /// allocate the canvas, apply this frame's pointer input, then redraw everything
    fn show_canvas(&mut self, ui: &mut egui::Ui) -> egui::Response {
        let (response, painter) = ui.allocate_painter(self.settings.canvas_size, Sense::drag());

        if self.controller.handle_response(&mut self.scene, &response) {
            ui.ctx().request_repaint();
        }

        // cursor hint: grabbing while dragging, grab when over a handle
        if self.controller.is_dragging() {
            ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
        } else if let Some(pos) = response.hover_pos() {
            let local = controller::canvas_local(pos, response.rect.min);
            if self.scene.hit_test(local).is_some() {
                ui.ctx().set_cursor_icon(CursorIcon::Grab);
            }
        }

        let mut surface = PainterSurface::new(&painter, response.rect, self.settings.background);
        renderer::render(&mut surface, &self.scene, &self.settings);

        response
    }
}

impl eframe::App for BezierHandles {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(Visuals {
            window_fill: Color32::WHITE,
            ..egui::Visuals::light() // base style
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_canvas(ui);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::DragState;
    use crate::scene::HandleRole;
    use approx::assert_abs_diff_eq;

    /// run one egui frame with the given events and return the canvas rect
    fn run_frame(
        ctx: &egui::Context,
        app: &mut BezierHandles,
        events: Vec<egui::Event>,
    ) -> egui::Rect {
        let mut raw_input = egui::RawInput::default();
        raw_input.events = events;

        let mut canvas = egui::Rect::NOTHING;
        let _ = ctx.run(raw_input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                canvas = app.show_canvas(ui).rect;
            });
        });
        canvas
    }

    fn press(pos: egui::Pos2, pressed: bool) -> egui::Event {
        egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed,
            modifiers: egui::Modifiers::default(),
        }
    }

    #[test]
    fn dragging_on_the_canvas_moves_control_point_one() {
        let ctx = egui::Context::default();
        let mut app = BezierHandles::default();

        // first frame lays out the canvas so it can be hit next frame
        let canvas = run_frame(&ctx, &mut app, vec![]);
        let down = canvas.min + egui::vec2(100.0, 200.0);
        let moved = canvas.min + egui::vec2(120.0, 220.0);

        run_frame(
            &ctx,
            &mut app,
            vec![egui::Event::PointerMoved(down), press(down, true)],
        );
        run_frame(&ctx, &mut app, vec![egui::Event::PointerMoved(moved)]);
        assert!(matches!(
            app.controller.state(),
            DragState::Dragging {
                role: HandleRole::Control1,
                ..
            }
        ));

        run_frame(&ctx, &mut app, vec![press(moved, false)]);
        assert_eq!(app.controller.state(), DragState::Idle);

        let center = app.scene.handle(HandleRole::Control1).center();
        assert_abs_diff_eq!(center.x, 120.0, epsilon = 1e-3);
        assert_abs_diff_eq!(center.y, 220.0, epsilon = 1e-3);
    }

    #[test]
    fn fractional_drag_reads_out_short_decimals() {
        let ctx = egui::Context::default();
        let mut app = BezierHandles::default();

        let canvas = run_frame(&ctx, &mut app, vec![]);
        let down = canvas.min + egui::vec2(100.0, 200.0);
        let moved = canvas.min + egui::vec2(120.6, 220.8);

        run_frame(
            &ctx,
            &mut app,
            vec![egui::Event::PointerMoved(down), press(down, true)],
        );
        run_frame(&ctx, &mut app, vec![egui::Event::PointerMoved(moved)]);
        run_frame(&ctx, &mut app, vec![press(moved, false)]);

        let center = app.scene.handle(HandleRole::Control1).center();
        assert_abs_diff_eq!(center.x, 120.6, epsilon = 1e-3);
        assert_abs_diff_eq!(center.y, 220.8, epsilon = 1e-3);

        // the readout shows the f32 pointer position as egui reported it,
        // without widening noise
        let local = moved - canvas.min;
        let mut surface = crate::surface::RecordingSurface::default();
        renderer::render(&mut surface, &app.scene, &app.settings);
        assert_eq!(
            surface.texts()[0],
            format!("Control point 1: ({},{})", local.x, local.y)
        );
    }

    #[test]
    fn dragging_empty_canvas_moves_nothing() {
        let ctx = egui::Context::default();
        let mut app = BezierHandles::default();
        let before = app.scene.clone();

        let canvas = run_frame(&ctx, &mut app, vec![]);
        let down = canvas.min + egui::vec2(250.0, 20.0);
        let moved = canvas.min + egui::vec2(100.0, 200.0);

        run_frame(
            &ctx,
            &mut app,
            vec![egui::Event::PointerMoved(down), press(down, true)],
        );
        run_frame(&ctx, &mut app, vec![egui::Event::PointerMoved(moved)]);
        run_frame(&ctx, &mut app, vec![press(moved, false)]);

        assert_eq!(app.controller.state(), DragState::Idle);
        assert_eq!(app.scene, before);
    }
}
