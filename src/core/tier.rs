use comfy_table::Color;

/// Relative price rank, cheapest first.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, Ord, PartialOrd, derive_more::Display)]
pub enum PriceTier {
    #[display("cheapest")]
    Cheapest,

    #[display("cheap")]
    Cheap,

    #[display("mid")]
    Mid,

    #[display("expensive")]
    Expensive,

    #[display("priciest")]
    Priciest,
}

impl PriceTier {
    pub const ALL: [Self; 5] =
        [Self::Cheapest, Self::Cheap, Self::Mid, Self::Expensive, Self::Priciest];

    /// Tier for the zero-based segment index, clamped to the last tier.
    pub fn from_segment(index: usize) -> Self {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }

    pub const fn color(self) -> Color {
        match self {
            Self::Cheapest => Color::Green,
            Self::Cheap => Color::DarkGreen,
            Self::Mid => Color::DarkYellow,
            Self::Expensive => Color::DarkRed,
            Self::Priciest => Color::Red,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_segment_clamps() {
        assert_eq!(PriceTier::from_segment(0), PriceTier::Cheapest);
        assert_eq!(PriceTier::from_segment(4), PriceTier::Priciest);
        assert_eq!(PriceTier::from_segment(7), PriceTier::Priciest);
    }

    #[test]
    fn test_all_is_ordered() {
        assert!(PriceTier::ALL.is_sorted());
        assert_eq!(PriceTier::ALL[0], PriceTier::Cheapest);
    }
}
