//! Resolving coordinates relative to characters on the map

use serde::{Deserialize, Serialize};

/// Facing direction, using the host's numpad codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Down,
    Left,
    Right,
    Up,
}

impl Direction {
    /// Parse a host direction code (2, 4, 6, 8)
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            2 => Some(Direction::Down),
            4 => Some(Direction::Left),
            6 => Some(Direction::Right),
            8 => Some(Direction::Up),
            _ => None,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Direction::Down => 2,
            Direction::Left => 4,
            Direction::Right => 6,
            Direction::Up => 8,
        }
    }
}

/// Where a character stands and which way it faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActorPose {
    pub x: i32,
    pub y: i32,
    pub direction: Direction,
}

impl ActorPose {
    pub fn new(x: i32, y: i32, direction: Direction) -> Self {
        Self { x, y, direction }
    }
}

/// Offset `forward` cells ahead and `rightward` cells to the right of a
/// character facing `direction`. +x is east, +y is south.
pub fn orientational_shift(direction: Direction, forward: i32, rightward: i32) -> (i32, i32) {
    match direction {
        Direction::Down => (-rightward, forward),
        Direction::Left => (-forward, -rightward),
        Direction::Right => (forward, rightward),
        Direction::Up => (rightward, -forward),
    }
}

/// The cell `distance` steps in front of a character
pub fn position_ahead(pose: ActorPose, distance: u32) -> (i32, i32) {
    let (dx, dy) = orientational_shift(pose.direction, distance as i32, 0);
    (pose.x + dx, pose.y + dy)
}

/// Looks up character poses on the current map
pub trait PoseProvider {
    /// The party leader, or whichever party member the host has selected
    fn player_pose(&self) -> Option<ActorPose>;

    /// A follower, counting from 1
    fn follower_pose(&self, _index: usize) -> Option<ActorPose> {
        None
    }

    /// A map event. ID 0 means the event running the current command.
    fn event_pose(&self, _event_id: i32) -> Option<ActorPose> {
        None
    }
}

/// Character that relative coordinates are measured from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Anchor {
    #[default]
    Absolute,
    Player,
    Follower(usize),
    Event(i32),
}

/// How command coordinates map onto the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Relativity {
    pub anchor: Anchor,
    pub forward_shift: i32,
    pub rightward_shift: i32,
}

impl Relativity {
    pub fn absolute() -> Self {
        Self::default()
    }

    pub fn relative_to(anchor: Anchor) -> Self {
        Self {
            anchor,
            ..Self::default()
        }
    }

    pub fn with_shift(mut self, forward: i32, rightward: i32) -> Self {
        self.forward_shift = forward;
        self.rightward_shift = rightward;
        self
    }

    /// Turn command coordinates into map coordinates.
    ///
    /// Relative coordinates are added to the anchor's position, then shifted by
    /// the anchor's facing. When the anchor cannot be found the coordinates are
    /// used as given.
    pub fn resolve(&self, x: i32, y: i32, poses: &impl PoseProvider) -> (i32, i32) {
        let pose = match self.anchor {
            Anchor::Absolute => None,
            Anchor::Player => poses.player_pose(),
            Anchor::Follower(index) => poses.follower_pose(index),
            Anchor::Event(event_id) => poses.event_pose(event_id),
        };
        let Some(pose) = pose else {
            return (x, y);
        };
        let (dx, dy) = orientational_shift(pose.direction, self.forward_shift, self.rightward_shift);
        (x + pose.x + dx, y + pose.y + dy)
    }
}
