//! Background colors accepted by the room notification endpoint.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// Background color of a room notification.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RoomColor {
    #[default]
    Yellow,
    Green,
    Red,
    Purple,
    Gray,
    Random,
}

impl RoomColor {
    /// Parse a configured color. Matching is exact, so `"Yellow"` is rejected.
    pub fn parse(s: &str) -> Option<Self> {
        s.parse().ok()
    }

    /// All valid color names, in dropdown order.
    pub fn names() -> Vec<&'static str> {
        Self::iter().map(Self::as_str).collect()
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_yellow() {
        assert_eq!(RoomColor::default(), RoomColor::Yellow);
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(RoomColor::parse("purple"), Some(RoomColor::Purple));
        assert_eq!(RoomColor::parse("Purple"), None);
        assert_eq!(RoomColor::parse("INVALID"), None);
        assert_eq!(RoomColor::parse(""), None);
    }

    #[test]
    fn test_names_match_display() {
        let names = RoomColor::names();
        assert_eq!(
            names,
            vec!["yellow", "green", "red", "purple", "gray", "random"]
        );
        for color in RoomColor::iter() {
            assert_eq!(color.to_string(), color.as_str());
        }
    }

    #[test]
    fn test_as_str_round_trips_through_parse() {
        assert_eq!(RoomColor::Random.as_str(), "random");
        for color in RoomColor::iter() {
            assert_eq!(RoomColor::parse(color.as_str()), Some(color));
            let json = serde_json::to_value(color).unwrap();
            assert_eq!(json, color.as_str());
        }
    }

    #[test]
    fn test_serializes_lowercase() {
        let json = serde_json::to_string(&RoomColor::Gray).unwrap();
        assert_eq!(json, "\"gray\"");
    }
}
