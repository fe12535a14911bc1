//! Visual theming for particle fields.
//!
//! Colors, fonts and glow settings for each field variant. Geometry and motion
//! live in [`super::config`]; everything here only affects how things look.

use serde::Deserialize;
use serde::de::{self, Deserializer};

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Alpha in `[0, 1]`.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with explicit alpha.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same color, different alpha.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Parses `#rrggbb` or `#rrggbbaa`.
	pub fn from_hex(hex: &str) -> Option<Self> {
		let digits = hex.strip_prefix('#')?;
		if !digits.is_ascii() {
			return None;
		}
		let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
		match digits.len() {
			6 => Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
			8 => Some(Self::rgba(
				channel(0)?,
				channel(2)?,
				channel(4)?,
				channel(6)? as f64 / 255.0,
			)),
			_ => None,
		}
	}

	/// CSS color string. Opaque colors render as hex, others as `rgba()`.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

impl<'de> Deserialize<'de> for Color {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let raw = String::deserialize(deserializer)?;
		Color::from_hex(&raw)
			.ok_or_else(|| de::Error::custom(format!("invalid color {raw:?}, expected #rrggbb")))
	}
}

/// Glow drawn beneath each node.
#[derive(Clone, Debug)]
pub struct GlowStyle {
	/// Alpha of the glow center, applied to the node color.
	pub alpha: f64,
	/// Glow radius as a multiple of the node radius.
	pub spread: f64,
}

/// Text label drawn under category nodes.
#[derive(Clone, Debug)]
pub struct LabelStyle {
	/// Canvas font shorthand.
	pub font: String,
	/// Text color.
	pub color: Color,
	/// Vertical gap between the node edge and the text baseline.
	pub offset: f64,
}

/// Complete visual theme for one field.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Preset name, used in log output.
	pub name: &'static str,
	/// Fill for particles without a category.
	pub particle: Color,
	/// Stroke for connections between uncategorized particles. Alpha is
	/// replaced by the proximity opacity.
	pub link: Color,
	/// Connection stroke width.
	pub link_width: f64,
	/// Draw category-colored gradient strokes when both ends have a category.
	pub category_links: bool,
	/// Optional glow under every node.
	pub glow: Option<GlowStyle>,
	/// Optional label under category nodes.
	pub label: Option<LabelStyle>,
}

impl Theme {
	/// Cyan ambient field drawn behind the whole page.
	pub fn background() -> Self {
		Self {
			name: "background",
			particle: Color::rgba(0, 240, 255, 0.6),
			link: Color::rgb(0, 240, 255),
			link_width: 0.5,
			category_links: false,
			glow: None,
			label: None,
		}
	}

	/// Labelled category nodes with glows and gradient strokes.
	pub fn constellation() -> Self {
		Self {
			name: "constellation",
			particle: Color::rgb(0, 240, 255),
			link: Color::rgb(0, 240, 255),
			link_width: 1.0,
			category_links: true,
			glow: Some(GlowStyle {
				alpha: 0x60 as f64 / 255.0,
				spread: 3.0,
			}),
			label: Some(LabelStyle {
				font: "12px Inter".into(),
				color: Color::rgb(0xa0, 0xa0, 0xb0),
				offset: 20.0,
			}),
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::background()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_hex_colors() {
		assert_eq!(Color::from_hex("#8b5cf6"), Some(Color::rgb(0x8b, 0x5c, 0xf6)));
		let translucent = Color::from_hex("#00f0ff40").unwrap();
		assert_eq!((translucent.r, translucent.g, translucent.b), (0, 240, 255));
		assert!((translucent.a - 64.0 / 255.0).abs() < 1e-9);
	}

	#[test]
	fn rejects_malformed_hex() {
		assert_eq!(Color::from_hex("00f0ff"), None);
		assert_eq!(Color::from_hex("#00f0f"), None);
		assert_eq!(Color::from_hex("#zzzzzz"), None);
		assert_eq!(Color::from_hex("#ééé"), None);
	}

	#[test]
	fn css_output_depends_on_alpha() {
		assert_eq!(Color::rgb(255, 0, 160).to_css(), "#ff00a0");
		assert_eq!(Color::rgba(0, 240, 255, 0.6).to_css(), "rgba(0, 240, 255, 0.6)");
	}

	#[test]
	fn deserializes_from_json_string() {
		let color: Color = serde_json::from_str("\"#ffd700\"").unwrap();
		assert_eq!(color, Color::rgb(255, 215, 0));
		assert!(serde_json::from_str::<Color>("\"gold\"").is_err());
	}
}
