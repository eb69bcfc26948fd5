//! Score → discount bands and redemption codes

use rand::Rng;

use crate::consts::CODE_LENGTH;

/// Inclusive score range mapped to a discount. `max: None` is open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardBand {
    pub min: u32,
    pub max: Option<u32>,
    pub discount: u8,
}

impl RewardBand {
    pub fn contains(&self, score: u32) -> bool {
        score >= self.min && self.max.is_none_or(|max| score <= max)
    }
}

/// Ascending, contiguous from 0, last band open
pub const REWARD_BANDS: [RewardBand; 4] = [
    RewardBand { min: 0, max: Some(9), discount: 5 },
    RewardBand { min: 10, max: Some(19), discount: 10 },
    RewardBand { min: 20, max: Some(29), discount: 15 },
    RewardBand { min: 30, max: None, discount: 20 },
];

/// Unreachable with the table above
const FALLBACK_DISCOUNT: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reward {
    /// Percentage off
    pub discount: u8,
}

pub fn reward_for(score: u32) -> Reward {
    let discount = REWARD_BANDS
        .iter()
        .find(|band| band.contains(score))
        .map(|band| band.discount)
        .unwrap_or(FALLBACK_DISCOUNT);
    Reward { discount }
}

const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Cosmetic redemption code; not validated anywhere
pub fn redemption_code<R: Rng>(rng: &mut R) -> String {
    (0..CODE_LENGTH)
        .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}
