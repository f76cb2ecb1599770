//! Gear selector type definitions

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::{ContractError, ContractResult};

/// Number of forward drive gears.
pub const DRIVE_GEAR_COUNT: usize = 7;
/// Lowest drive gear.
pub const MIN_DRIVE_GEAR: u8 = 1;
/// Highest drive gear.
pub const MAX_DRIVE_GEAR: u8 = 7;

/// PRND selector position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GearSelector {
    /// `P`
    Park,
    /// `R`
    Reverse,
    /// `N`
    #[default]
    Neutral,
    /// `D`, the only position where drive gears are resolved from speed.
    Drive,
}

impl GearSelector {
    /// All positions in lever order.
    pub const ALL: [GearSelector; 4] = [
        GearSelector::Park,
        GearSelector::Reverse,
        GearSelector::Neutral,
        GearSelector::Drive,
    ];

    /// Single-letter label shown on the cluster.
    pub const fn as_char(self) -> char {
        match self {
            GearSelector::Park => 'P',
            GearSelector::Reverse => 'R',
            GearSelector::Neutral => 'N',
            GearSelector::Drive => 'D',
        }
    }

    /// Whether drive gears are active in this position.
    pub const fn is_drive(self) -> bool {
        matches!(self, GearSelector::Drive)
    }
}

impl TryFrom<char> for GearSelector {
    type Error = ContractError;

    fn try_from(value: char) -> ContractResult<Self> {
        match value.to_ascii_uppercase() {
            'P' => Ok(GearSelector::Park),
            'R' => Ok(GearSelector::Reverse),
            'N' => Ok(GearSelector::Neutral),
            'D' => Ok(GearSelector::Drive),
            _ => Err(ContractError::UnknownSelector(value)),
        }
    }
}

impl core::str::FromStr for GearSelector {
    type Err = ContractError;

    fn from_str(s: &str) -> ContractResult<Self> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => GearSelector::try_from(c),
            (Some(c), Some(_)) => Err(ContractError::UnknownSelector(c)),
            (None, _) => Err(ContractError::UnknownSelector(' ')),
        }
    }
}

impl fmt::Display for GearSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_neutral() {
        assert_eq!(GearSelector::default(), GearSelector::Neutral);
    }

    #[test]
    fn test_char_mapping() -> Result<(), ContractError> {
        for selector in GearSelector::ALL {
            assert_eq!(GearSelector::try_from(selector.as_char())?, selector);
        }
        assert_eq!(GearSelector::try_from('d')?, GearSelector::Drive);
        Ok(())
    }

    #[test]
    fn test_unknown_char_rejected() {
        assert_eq!(
            GearSelector::try_from('X'),
            Err(ContractError::UnknownSelector('X'))
        );
    }

    #[test]
    fn test_from_str() -> Result<(), ContractError> {
        assert_eq!(" r ".parse::<GearSelector>()?, GearSelector::Reverse);
        assert!("DR".parse::<GearSelector>().is_err());
        assert!("".parse::<GearSelector>().is_err());
        Ok(())
    }

    #[test]
    fn test_only_drive_is_drive() {
        assert!(GearSelector::Drive.is_drive());
        assert!(!GearSelector::Park.is_drive());
        assert!(!GearSelector::Neutral.is_drive());
        assert_eq!(GearSelector::Drive.to_string(), "D");
    }
}
