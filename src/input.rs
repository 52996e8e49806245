use egui::{Context, Pos2, Rect};
use crate::session::DrawingSession;

/// Pointer events on the canvas, in canvas-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasEvent {
    /// Pointer moved onto the canvas
    PointerEnter(Pos2),
    /// Pointer left the canvas (or the window)
    PointerLeave,
    /// Primary button pressed on the canvas
    PointerDown(Pos2),
    /// Pointer moved while over the canvas
    PointerMove(Pos2),
    /// Primary button released
    PointerUp,
}

impl CanvasEvent {
    /// Forward the event to the session
    pub fn apply(self, session: &mut DrawingSession) {
        match self {
            CanvasEvent::PointerEnter(pos) => session.on_pointer_enter(pos),
            CanvasEvent::PointerLeave => session.on_pointer_leave(),
            CanvasEvent::PointerDown(pos) => session.on_pointer_down(pos),
            CanvasEvent::PointerMove(pos) => session.on_pointer_move(pos),
            CanvasEvent::PointerUp => session.on_pointer_up(),
        }
    }
}

/// Handles converting raw egui input into canvas events
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    pointer_down: bool,
    canvas_rect: Rect,
    // Set while another layer (a window or popup) covers the canvas
    blocked: bool,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            last_pointer_pos: None,
            pointer_down: false,
            canvas_rect,
            blocked: false,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    /// While blocked the pointer counts as off the canvas, so clicks on a
    /// window above it never reach the session.
    pub fn set_blocked(&mut self, blocked: bool) {
        self.blocked = blocked;
    }

    /// Process raw egui input and generate canvas events
    pub fn process_input(&mut self, ctx: &Context) -> Vec<CanvasEvent> {
        let (hover, pressed, released) = ctx.input(|input| {
            (
                input.pointer.hover_pos(),
                input.pointer.primary_pressed(),
                input.pointer.primary_released(),
            )
        });
        self.translate(hover, pressed, released)
    }

    /// Turn one frame of pointer state into events.
    ///
    /// `hover` is in screen coordinates; anything outside the canvas counts
    /// as no pointer at all.
    pub fn translate(&mut self, hover: Option<Pos2>, pressed: bool, released: bool) -> Vec<CanvasEvent> {
        let mut events = Vec::new();
        let inside = hover
            .filter(|pos| !self.blocked && self.canvas_rect.contains(*pos))
            .map(|pos| self.to_canvas(pos));

        match (self.last_pointer_pos, inside) {
            (None, Some(pos)) => {
                events.push(CanvasEvent::PointerEnter(pos));
            }
            (Some(last), Some(pos)) if last != pos => {
                events.push(CanvasEvent::PointerMove(pos));
            }
            (Some(_), None) => {
                events.push(CanvasEvent::PointerLeave);
                // Leaving ends the drag
                self.pointer_down = false;
            }
            _ => {}
        }
        self.last_pointer_pos = inside;

        if pressed {
            if let Some(pos) = inside {
                events.push(CanvasEvent::PointerDown(pos));
                self.pointer_down = true;
            }
        }
        if released && self.pointer_down {
            events.push(CanvasEvent::PointerUp);
            self.pointer_down = false;
        }

        events
    }

    fn to_canvas(&self, pos: Pos2) -> Pos2 {
        (pos - self.canvas_rect.min).to_pos2()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler() -> InputHandler {
        InputHandler::new(Rect::from_min_size(Pos2::new(100.0, 100.0), egui::vec2(256.0, 256.0)))
    }

    #[test]
    fn test_click_drag_release_sequence() {
        let mut input = handler();
        assert_eq!(
            input.translate(Some(Pos2::new(110.0, 110.0)), true, false),
            vec![
                CanvasEvent::PointerEnter(Pos2::new(10.0, 10.0)),
                CanvasEvent::PointerDown(Pos2::new(10.0, 10.0)),
            ]
        );
        assert_eq!(
            input.translate(Some(Pos2::new(120.0, 110.0)), false, false),
            vec![CanvasEvent::PointerMove(Pos2::new(20.0, 10.0))]
        );
        assert_eq!(
            input.translate(Some(Pos2::new(120.0, 110.0)), false, true),
            vec![CanvasEvent::PointerUp]
        );
    }

    #[test]
    fn test_press_outside_canvas_is_ignored() {
        let mut input = handler();
        assert!(input.translate(Some(Pos2::new(5.0, 5.0)), true, false).is_empty());
        assert!(input.translate(Some(Pos2::new(5.0, 5.0)), false, true).is_empty());
    }

    #[test]
    fn test_leaving_emits_leave_without_up() {
        let mut input = handler();
        input.translate(Some(Pos2::new(110.0, 110.0)), true, false);
        assert_eq!(input.translate(None, false, false), vec![CanvasEvent::PointerLeave]);
        assert!(input.translate(None, false, true).is_empty());
    }

    #[test]
    fn test_blocked_canvas_ignores_clicks() {
        let mut input = handler();
        let mut session = DrawingSession::default();
        input.set_blocked(true);
        let frames = [
            (Some(Pos2::new(110.0, 110.0)), true, false),
            (Some(Pos2::new(110.0, 110.0)), false, true),
        ];
        for (hover, pressed, released) in frames {
            assert!(input.translate(hover, pressed, released).is_empty());
        }
        for event in input.translate(Some(Pos2::new(110.0, 110.0)), true, true) {
            event.apply(&mut session);
        }
        assert!(session.committed().is_empty());
    }

    #[test]
    fn test_blocking_mid_hover_leaves_the_canvas() {
        let mut input = handler();
        input.translate(Some(Pos2::new(110.0, 110.0)), false, false);
        input.set_blocked(true);
        assert_eq!(
            input.translate(Some(Pos2::new(110.0, 110.0)), false, false),
            vec![CanvasEvent::PointerLeave]
        );
    }

    #[test]
    fn test_events_drive_session() {
        let mut input = handler();
        let mut session = DrawingSession::default();
        let frames = [
            (Some(Pos2::new(110.0, 110.0)), true, false),
            (Some(Pos2::new(120.0, 110.0)), false, false),
            (Some(Pos2::new(120.0, 110.0)), false, true),
        ];
        for (hover, pressed, released) in frames {
            for event in input.translate(hover, pressed, released) {
                event.apply(&mut session);
            }
        }
        assert_eq!(session.committed().len(), 1);
        assert_eq!(
            session.committed()[0].points(),
            &[Pos2::new(10.0, 10.0), Pos2::new(20.0, 10.0)]
        );
    }
}
