// Base value every attribute starts from before tier and extra points.
pub const BASE_STAT: i64 = 10;

const LEVELS_PER_TIER: u32 = 4;

// (name, attribute bonus) per life tier, lowest first.
const TIERS: [(&str, i64); 6] = [
    ("普通层级", 0),
    ("精英层级", 2),
    ("英雄层级", 4),
    ("传说层级", 6),
    ("史诗层级", 8),
    ("神话层级", 10),
];

// Derives life tier information from a character level.
pub trait TierResolver {
    fn tier_bonus(&self, level: u32) -> i64;
    fn tier_name(&self, level: u32) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StandardTiers;

impl StandardTiers {
    fn tier(level: u32) -> (&'static str, i64) {
        let index = (level.max(1) - 1) / LEVELS_PER_TIER;
        let index = (index as usize).min(TIERS.len() - 1);
        TIERS[index]
    }
}

impl TierResolver for StandardTiers {
    fn tier_bonus(&self, level: u32) -> i64 {
        Self::tier(level).1
    }

    fn tier_name(&self, level: u32) -> String {
        Self::tier(level).0.to_string()
    }
}

// Renders an attribute as the literal sum the model is shown, e.g.
// "10 (基础) + 4 (层级) + 2 (额外) = 16".
pub fn format_attribute(base: i64, tier_bonus: i64, extra: i64) -> String {
    let total = base + tier_bonus + extra;
    format!("{base} (基础) + {tier_bonus} (层级) + {extra} (额外) = {total}")
}
