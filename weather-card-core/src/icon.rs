use crate::model::Condition;

/// Visual icon drawn in the top-left corner of the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Cloudy,
    Haze,
    Rainy,
    Sunny,
    Drizzle,
    Snow,
}

impl Icon {
    /// Icon for a condition category. Categories without an icon
    /// (Thunderstorm, Mist, ...) yield `None`.
    pub fn for_condition(condition: &Condition) -> Option<Icon> {
        match condition {
            Condition::Clouds => Some(Icon::Cloudy),
            Condition::Haze => Some(Icon::Haze),
            Condition::Rain => Some(Icon::Rainy),
            Condition::Clear => Some(Icon::Sunny),
            Condition::Drizzle => Some(Icon::Drizzle),
            Condition::Snow => Some(Icon::Snow),
            Condition::Other(_) => None,
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Cloudy => "☁",
            Icon::Haze => "≋",
            Icon::Rainy => "☂",
            Icon::Sunny => "☀",
            Icon::Drizzle => "⛆",
            Icon::Snow => "❄",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_categories_map_to_icons() {
        let cases = [
            ("Clouds", Icon::Cloudy),
            ("Haze", Icon::Haze),
            ("Rain", Icon::Rainy),
            ("Clear", Icon::Sunny),
            ("Drizzle", Icon::Drizzle),
            ("Snow", Icon::Snow),
        ];

        for (name, icon) in cases {
            assert_eq!(Icon::for_condition(&Condition::from(name)), Some(icon), "{name}");
        }
    }

    #[test]
    fn other_categories_have_no_icon() {
        for name in ["Thunderstorm", "Mist", "Fog", ""] {
            assert_eq!(Icon::for_condition(&Condition::from(name)), None, "{name}");
        }
    }
}
