use colored::Color;

/// Coarse grade for a quiz percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    VeryGood,
    Good,
    Passable,
    Insufficient,
    Weak,
}

impl ScoreBand {
    pub fn from_percentage(percentage: u8) -> Self {
        match percentage {
            90.. => ScoreBand::Excellent,
            80..=89 => ScoreBand::VeryGood,
            70..=79 => ScoreBand::Good,
            60..=69 => ScoreBand::Passable,
            50..=59 => ScoreBand::Insufficient,
            _ => ScoreBand::Weak,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent! You have fully mastered this part.",
            ScoreBand::VeryGood => "Very good! You passed this part.",
            ScoreBand::Good => "Good work! A little more effort to master this part.",
            ScoreBand::Passable => "Passable. Reviewing this part would help.",
            ScoreBand::Insufficient => "Insufficient. This part needs more work.",
            ScoreBand::Weak => "Weak result. Review this part in depth.",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            ScoreBand::Excellent => Color::Green,
            ScoreBand::VeryGood => Color::BrightGreen,
            ScoreBand::Good => Color::Yellow,
            ScoreBand::Passable => Color::BrightRed,
            ScoreBand::Insufficient | ScoreBand::Weak => Color::Red,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges() {
        assert_eq!(ScoreBand::from_percentage(100), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_percentage(90), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_percentage(89), ScoreBand::VeryGood);
        assert_eq!(ScoreBand::from_percentage(70), ScoreBand::Good);
        assert_eq!(ScoreBand::from_percentage(63), ScoreBand::Passable);
        assert_eq!(ScoreBand::from_percentage(50), ScoreBand::Insufficient);
        assert_eq!(ScoreBand::from_percentage(49), ScoreBand::Weak);
        assert_eq!(ScoreBand::from_percentage(0), ScoreBand::Weak);
    }
}
