//! Slime (goo) types shared by the player, slimeballs and pickups.

use serde::{Deserialize, Serialize};

/// The three kinds of goo. The discriminant is the reserve index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlimeType {
    /// Splashes into a pickup on floors.
    #[default]
    Green = 0,
    /// Builds a slime block.
    Purple = 1,
    /// Explodes.
    Gold = 2,
}

impl SlimeType {
    pub const ALL: [SlimeType; 3] = [SlimeType::Green, SlimeType::Purple, SlimeType::Gold];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Index wraps in both directions.
    pub fn from_index(index: i32) -> Self {
        Self::ALL[index.rem_euclid(3) as usize]
    }

    /// Step through the types by `steps`, wrapping past either end.
    pub fn cycle(self, steps: i32) -> Self {
        Self::from_index(self as i32 + steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_wraps_both_ways() {
        assert_eq!(SlimeType::Green.cycle(1), SlimeType::Purple);
        assert_eq!(SlimeType::Gold.cycle(1), SlimeType::Green);
        assert_eq!(SlimeType::Green.cycle(-1), SlimeType::Gold);
        assert_eq!(SlimeType::Purple.cycle(0), SlimeType::Purple);
    }

    #[test]
    fn test_deserialize_snake_case() {
        let t: SlimeType = serde_json::from_str("\"gold\"").unwrap();
        assert_eq!(t, SlimeType::Gold);
    }
}
