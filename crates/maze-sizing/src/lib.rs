//! Display tier selection.
//!
//! A [`DisplaySizer`] holds an ordered list of [`SizingRule`]s; the first rule
//! whose thresholds both exceed the requested dimensions wins. Rules compare
//! against their own thresholds, not against the declared bounds, so a bounds
//! profile can reach sizes no rule covers. An optional fallback tier closes
//! that gap and [`DisplaySizer::coverage_gap`] detects it up front.

use maze_model::{BoundsProfile, DimensionBounds, DisplayTier, MazeRequest};
use serde::Serialize;

/// Tier applied when `width < below_width && height < below_height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SizingRule {
    pub below_width: u32,
    pub below_height: u32,
    pub tier: DisplayTier,
}

impl SizingRule {
    pub const fn new(below_width: u32, below_height: u32, tier: DisplayTier) -> Self {
        Self {
            below_width,
            below_height,
            tier,
        }
    }

    #[must_use]
    pub const fn matches(&self, width: u32, height: u32) -> bool {
        width < self.below_width && height < self.below_height
    }
}

pub const CLASSIC_RULES: [SizingRule; 3] = [
    SizingRule::new(33, 16, DisplayTier::new(18, 45, 76)),
    SizingRule::new(44, 29, DisplayTier::new(14, 60, 104)),
    SizingRule::new(53, 34, DisplayTier::new(12, 68, 120)),
];

/// Covers mazes up to 120 cells wide and 33 tall.
pub const WIDE_FALLBACK: DisplayTier = DisplayTier::new(8, 70, 256);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplaySizer {
    rules: Vec<SizingRule>,
    fallback: Option<DisplayTier>,
}

impl DisplaySizer {
    pub fn new(rules: Vec<SizingRule>, fallback: Option<DisplayTier>) -> Self {
        Self { rules, fallback }
    }

    /// The three classic rules without a fallback.
    #[must_use]
    pub fn classic() -> Self {
        Self::new(CLASSIC_RULES.to_vec(), None)
    }

    #[must_use]
    pub fn with_fallback(mut self, tier: DisplayTier) -> Self {
        self.fallback = Some(tier);
        self
    }

    pub fn rules(&self) -> &[SizingRule] {
        &self.rules
    }

    pub fn fallback(&self) -> Option<DisplayTier> {
        self.fallback
    }

    /// First matching rule's tier; `None` means "keep the current tier".
    ///
    /// Never consults the fallback.
    #[must_use]
    pub fn select_tier(&self, width: u32, height: u32) -> Option<DisplayTier> {
        self.rules
            .iter()
            .find(|rule| rule.matches(width, height))
            .map(|rule| rule.tier)
    }

    /// [`select_tier`](Self::select_tier), then the fallback tier.
    #[must_use]
    pub fn resolve(&self, width: u32, height: u32) -> Option<DisplayTier> {
        self.select_tier(width, height).or(self.fallback)
    }

    /// First request inside `profile` that [`resolve`](Self::resolve) cannot
    /// size, in width-then-height order.
    ///
    /// A size that matches a rule keeps matching it when either dimension
    /// shrinks, so only the profile minimum and the rule thresholds inside the
    /// profile need checking.
    #[must_use]
    pub fn coverage_gap(&self, profile: &BoundsProfile) -> Option<MazeRequest> {
        if self.fallback.is_some() {
            return None;
        }
        let widths = self.candidates(profile.width, |rule| rule.below_width);
        let heights = self.candidates(profile.height, |rule| rule.below_height);
        widths.iter().find_map(|&width| {
            heights
                .iter()
                .find(|&&height| self.select_tier(width, height).is_none())
                .map(|&height| MazeRequest::new(width, height))
        })
    }

    /// Sorted values of `bounds` at which some rule starts or stops matching.
    fn candidates(
        &self,
        bounds: DimensionBounds,
        threshold: impl Fn(&SizingRule) -> u32,
    ) -> Vec<u32> {
        let mut values: Vec<u32> = self
            .rules
            .iter()
            .map(threshold)
            .filter(|&value| bounds.contains(i64::from(value)))
            .chain([bounds.min()])
            .collect();
        values.sort_unstable();
        values.dedup();
        values
    }
}

impl Default for DisplaySizer {
    /// Classic rules plus [`WIDE_FALLBACK`].
    fn default() -> Self {
        Self::classic().with_fallback(WIDE_FALLBACK)
    }
}

/// Tier selection with the classic rules.
#[must_use]
pub fn select_tier(width: u32, height: u32) -> Option<DisplayTier> {
    CLASSIC_RULES
        .iter()
        .find(|rule| rule.matches(width, height))
        .map(|rule| rule.tier)
}
