/// Which sides of a moving box were blocked during the most recent move.
///
/// Reset at the start of every move, so it reflects only the latest call
/// and never accumulates. Flags answer "was this move blocked", not "is the
/// box touching something": an axis that was not requested to move keeps
/// its flags false even when resting against geometry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionState {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl CollisionState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Shortcut for `bottom`.
    pub fn grounded(&self) -> bool {
        self.bottom
    }

    pub fn horizontal(&self) -> bool {
        self.left || self.right
    }

    pub fn vertical(&self) -> bool {
        self.top || self.bottom
    }

    pub fn any(&self) -> bool {
        self.horizontal() || self.vertical()
    }
}
