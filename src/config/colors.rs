//! Color configuration for the terminal views.

use ratatui::style::Color;
use serde::{de, Deserialize, Deserializer};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    #[serde(deserialize_with = "deserialize_color")]
    pub border: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub selection_bg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub selection_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub feed_title: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub metadata_author: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub metadata_date: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub metadata_link: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub status_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub status_bg: Color,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            border: Color::Cyan,
            selection_bg: Color::Cyan,
            selection_fg: Color::Black,
            feed_title: Color::DarkGray,
            metadata_author: Color::Yellow,
            metadata_date: Color::Yellow,
            metadata_link: Color::Blue,
            status_fg: Color::White,
            status_bg: Color::DarkGray,
        }
    }
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_color_string(&s).map_err(de::Error::custom)
}

/// Parse a named color ("DarkGray", case-insensitive) or a hex code
/// ("#RRGGBB" / "#RGB").
pub fn parse_color_string(s: &str) -> Result<Color, String> {
    let s = s.trim();

    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex_color(hex).ok_or_else(|| format!("Invalid hex color: {}", s));
    }

    let color = match s.to_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "lightred" => Color::LightRed,
        "lightgreen" => Color::LightGreen,
        "lightyellow" => Color::LightYellow,
        "lightblue" => Color::LightBlue,
        "lightmagenta" => Color::LightMagenta,
        "lightcyan" => Color::LightCyan,
        "white" => Color::White,
        "reset" => Color::Reset,
        _ => return Err(format!("Unknown color: {}", s)),
    };
    Ok(color)
}

fn parse_hex_color(hex: &str) -> Option<Color> {
    if !hex.is_ascii() {
        return None;
    }
    let channel = |digits: &str| u8::from_str_radix(digits, 16).ok();
    match hex.len() {
        6 => Some(Color::Rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        // #RGB expands each digit: F -> FF
        3 => Some(Color::Rgb(
            channel(&hex[0..1])? * 17,
            channel(&hex[1..2])? * 17,
            channel(&hex[2..3])? * 17,
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_colors() {
        assert_eq!(parse_color_string("Cyan").unwrap(), Color::Cyan);
        assert_eq!(parse_color_string("cyan").unwrap(), Color::Cyan);
        assert_eq!(parse_color_string("darkgrey").unwrap(), Color::DarkGray);
    }

    #[test]
    fn test_parse_hex_colors() {
        assert_eq!(parse_color_string("#FF0000").unwrap(), Color::Rgb(255, 0, 0));
        assert_eq!(parse_color_string("#0f0").unwrap(), Color::Rgb(0, 255, 0));
    }

    #[test]
    fn test_parse_invalid_colors() {
        assert!(parse_color_string("mauve").is_err());
        assert!(parse_color_string("#GGGGGG").is_err());
        assert!(parse_color_string("#12345").is_err());
    }

    #[test]
    fn test_color_config_from_toml() {
        let config: ColorConfig = toml::from_str(r##"border = "#00FF00""##).unwrap();
        assert_eq!(config.border, Color::Rgb(0, 255, 0));
        assert_eq!(config.selection_fg, Color::Black);
    }
}
