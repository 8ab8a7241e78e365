//! Funding stage shared by deals and application forms

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FundingStage {
    Idea,
    PreSeed,
    Seed,
    SeriesA,
    SeriesB,
    Growth,
}

impl FundingStage {
    pub const ALL: [FundingStage; 6] = [
        FundingStage::Idea,
        FundingStage::PreSeed,
        FundingStage::Seed,
        FundingStage::SeriesA,
        FundingStage::SeriesB,
        FundingStage::Growth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FundingStage::Idea => "idea",
            FundingStage::PreSeed => "pre-seed",
            FundingStage::Seed => "seed",
            FundingStage::SeriesA => "series-a",
            FundingStage::SeriesB => "series-b",
            FundingStage::Growth => "growth",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let normalized = s.trim().to_lowercase().replace([' ', '_'], "-");
        Self::ALL.into_iter().find(|stage| stage.as_str() == normalized)
    }
}
