// Pointer gesture state for the pattern canvas.

/// What a pointer event means to the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchAction {
    Down,
    Move,
    Up,
    Other,
}

impl TouchAction {
    pub fn from_event_type(kind: &str) -> Self {
        match kind {
            "mousedown" | "touchstart" => TouchAction::Down,
            "mousemove" | "touchmove" => TouchAction::Move,
            // a cancelled or interrupted gesture ends like a lift
            "mouseup" | "touchend" | "touchcancel" | "mouseleave" | "blur" => TouchAction::Up,
            _ => TouchAction::Other,
        }
    }

    /// Whether the event stops here. Release is passed on to the page.
    pub fn consumed(self) -> bool {
        self != TouchAction::Up
    }
}

/// `MouseEvent::button()` value of the primary button.
pub const PRIMARY_BUTTON: i16 = 0;
/// Bit of the primary button in `MouseEvent::buttons()`.
pub const PRIMARY_BUTTONS_MASK: u16 = 1;

/// Narrows mouse and touch input down to one pointer at a time.
#[derive(Default, Debug, Clone)]
pub struct TouchState {
    pub pressed: bool,
    /// Identifier of the touch that started the gesture, `None` for the mouse.
    pub touch_id: Option<i32>,
}

impl TouchState {
    /// Returns the action to forward to the grid, or `None` to drop the event.
    pub fn accept(&mut self, action: TouchAction, touch_id: Option<i32>) -> Option<TouchAction> {
        match action {
            TouchAction::Down => {
                if self.pressed {
                    return None;
                }
                self.pressed = true;
                self.touch_id = touch_id;
                Some(action)
            }
            TouchAction::Move => (self.pressed && self.touch_id == touch_id).then_some(action),
            TouchAction::Up => {
                if !self.pressed || self.touch_id != touch_id {
                    return None;
                }
                self.pressed = false;
                self.touch_id = None;
                Some(action)
            }
            TouchAction::Other => {
                self.pressed = false;
                self.touch_id = None;
                Some(action)
            }
        }
    }

    /// Mouse variant of [`accept`](Self::accept). Only the primary button starts or
    /// ends a gesture, and a move seen with the button already up ends the gesture whose
    /// `mouseup` went missing.
    pub fn accept_mouse(
        &mut self,
        action: TouchAction,
        button: i16,
        buttons: u16,
    ) -> Option<TouchAction> {
        match action {
            TouchAction::Down | TouchAction::Up if button != PRIMARY_BUTTON => None,
            TouchAction::Move
                if self.pressed
                    && self.touch_id.is_none()
                    && buttons & PRIMARY_BUTTONS_MASK == 0 =>
            {
                self.accept(TouchAction::Up, None)
            }
            _ => self.accept(action, None),
        }
    }
}
