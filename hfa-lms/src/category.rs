use serde::{Deserialize, Serialize};
use std::fmt;

/// Clinical interpretation of a height-for-age z-score.
///
/// The four-band screening tables use `StuntingRisk`, `NeedsAttention`,
/// `Normal` and `OvergrowthRisk`; the severity tables use `Severe`,
/// `Moderate`, `Normal` and optionally `Tall`.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Severe,
    Moderate,
    StuntingRisk,
    NeedsAttention,
    Normal,
    Tall,
    OvergrowthRisk,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Severe,
        Category::Moderate,
        Category::StuntingRisk,
        Category::NeedsAttention,
        Category::Normal,
        Category::Tall,
        Category::OvergrowthRisk,
    ];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Severe => "Severely stunted",
            Category::Moderate => "Moderately stunted",
            Category::StuntingRisk => "Stunting risk",
            Category::NeedsAttention => "Needs attention",
            Category::Normal => "Normal",
            Category::Tall => "Tall",
            Category::OvergrowthRisk => "Overgrowth risk",
        }
    }

    /// Position on the z axis. A band higher up the axis never has a
    /// lower rank than a band below it.
    pub fn rank(&self) -> u8 {
        match self {
            Category::Severe => 0,
            Category::Moderate | Category::StuntingRisk => 1,
            Category::NeedsAttention => 2,
            Category::Normal => 3,
            Category::Tall | Category::OvergrowthRisk => 4,
        }
    }

    /// Parse the kebab-case key used in logs and config files.
    pub fn from_key(key: &str) -> Option<Category> {
        Category::ALL.iter().copied().find(|c| c.key() == key)
    }

    /// The kebab-case key used in logs and config files.
    pub fn key(&self) -> &'static str {
        match self {
            Category::Severe => "severe",
            Category::Moderate => "moderate",
            Category::StuntingRisk => "stunting-risk",
            Category::NeedsAttention => "needs-attention",
            Category::Normal => "normal",
            Category::Tall => "tall",
            Category::OvergrowthRisk => "overgrowth-risk",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Advisory text for a category.
pub fn advise(category: Category) -> &'static str {
    match category {
        Category::Severe => {
            "Refer to a health worker promptly. Increase protein, vegetable and fruit intake and monitor growth closely."
        }
        Category::Moderate => {
            "Consult a health worker. Improve protein intake and monitor growth every month."
        }
        Category::StuntingRisk => {
            "Increase protein, vegetable and fruit intake. Monitor growth regularly."
        }
        Category::NeedsAttention => {
            "Improve eating and sleeping patterns. Eat balanced, healthy meals."
        }
        Category::Normal => "Keep up a healthy lifestyle and regular exercise.",
        Category::Tall => "Growth is above average. Keep up a balanced diet and regular check-ups.",
        Category::OvergrowthRisk => {
            "Limit sugar and fatty foods. Stay active and eat at regular times."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_advice() {
        for category in Category::ALL {
            assert!(!advise(category).trim().is_empty(), "{:?}", category);
            assert!(!category.label().is_empty());
        }
    }

    #[test]
    fn test_rank_follows_z_axis() {
        let severity = [Category::Severe, Category::Moderate, Category::Normal, Category::Tall];
        let screening = [
            Category::StuntingRisk,
            Category::NeedsAttention,
            Category::Normal,
            Category::OvergrowthRisk,
        ];
        for bands in [severity, screening] {
            for pair in bands.windows(2) {
                assert!(pair[0].rank() < pair[1].rank(), "{:?} vs {:?}", pair[0], pair[1]);
            }
        }
        assert!(Category::OvergrowthRisk.rank() > Category::Normal.rank());
    }

    #[test]
    fn test_key_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_key(category.key()), Some(category));
        }
        assert_eq!(Category::from_key("unknown"), None);
    }

    #[test]
    fn test_serde_uses_key() {
        let json = serde_json::to_string(&Category::NeedsAttention).unwrap();
        assert_eq!(json, "\"needs-attention\"");
        let parsed: Category = serde_json::from_str("\"overgrowth-risk\"").unwrap();
        assert_eq!(parsed, Category::OvergrowthRisk);
    }
}
