/// Per-frame input snapshot handed to `compute::tick`.
///
/// Held keys stay true for every frame the key is down; pressed keys are
/// edge-triggered and true for a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub thrust: bool,
    pub fire: bool,
    pub beam: bool,
    pub restart: bool,
    pub toggle_debug: bool,
}

impl FrameInput {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn fire() -> Self {
        Self {
            fire: true,
            ..Self::default()
        }
    }

    pub fn beam() -> Self {
        Self {
            beam: true,
            ..Self::default()
        }
    }

    pub fn restart() -> Self {
        Self {
            restart: true,
            ..Self::default()
        }
    }
}
