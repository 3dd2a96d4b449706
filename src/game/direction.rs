//=========================================================================
// Direction
//=========================================================================

use crate::core::input::SwipeDirection;

/// Snake heading. Screen space: `Up` decreases `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Unit step as `(dx, dy)`.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::Up => (0, -1),
            Self::Down => (0, 1),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// True when `other` lies on the other axis.
    pub fn is_perpendicular_to(self, other: Direction) -> bool {
        self.is_horizontal() != other.is_horizontal()
    }
}

impl From<SwipeDirection> for Direction {
    fn from(swipe: SwipeDirection) -> Self {
        match swipe {
            SwipeDirection::Left => Self::Left,
            SwipeDirection::Right => Self::Right,
            SwipeDirection::Up => Self::Up,
            SwipeDirection::Down => Self::Down,
        }
    }
}
