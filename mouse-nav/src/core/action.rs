//! Actions the decision core can choose and their scored form.

use super::Heading;
use serde::{Deserialize, Serialize};

/// A maneuver relative to the robot's current heading.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Turn 90 degrees clockwise
    Right,
    /// Advance one cell
    Forward,
    /// Turn 90 degrees counter-clockwise
    Left,
    /// Turn 180 degrees
    Back,
}

impl Action {
    /// The absolute direction this maneuver faces (and, for Forward,
    /// moves toward) given the current heading.
    #[inline]
    pub fn absolute(self, heading: Heading) -> Heading {
        match self {
            Action::Forward => heading,
            Action::Right => heading.right(),
            Action::Left => heading.left(),
            Action::Back => heading.reverse(),
        }
    }

    /// Relative maneuver that turns the robot from `heading` toward the
    /// absolute direction `target`.
    #[inline]
    pub fn toward(heading: Heading, target: Heading) -> Action {
        match (target as u8 + 4 - heading as u8) & 3 {
            0 => Action::Forward,
            1 => Action::Right,
            3 => Action::Left,
            _ => Action::Back,
        }
    }
}

/// A chosen action with its 0..=10 preference score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// Chosen maneuver
    pub action: Action,
    /// How favored the action is under current weights and sensor state
    pub score: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_from_heading() {
        assert_eq!(Action::Forward.absolute(Heading::East), Heading::East);
        assert_eq!(Action::Right.absolute(Heading::East), Heading::South);
        assert_eq!(Action::Left.absolute(Heading::East), Heading::North);
        assert_eq!(Action::Back.absolute(Heading::East), Heading::West);
    }

    #[test]
    fn test_toward_inverts_absolute() {
        for &heading in &Heading::CARDINAL {
            for &target in &Heading::CARDINAL {
                let action = Action::toward(heading, target);
                assert_eq!(action.absolute(heading), target);
            }
        }
    }
}
