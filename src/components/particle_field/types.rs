//! Input data for the particle field component.

use serde::Deserialize;

use super::config::FieldConfig;
use super::theme::Color;

/// A fixed skill category represented by one constellation node.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SkillCategory {
	/// Label drawn beneath the node.
	pub name: String,
	/// Node, glow and connection color (`#rrggbb`).
	pub color: Color,
}

impl SkillCategory {
	/// Creates a category from a name and color.
	pub fn new(name: impl Into<String>, color: Color) -> Self {
		Self {
			name: name.into(),
			color,
		}
	}
}

/// The skill categories shown when the page supplies none.
pub fn default_categories() -> Vec<SkillCategory> {
	vec![
		SkillCategory::new("AI & Machine Learning", Color::rgb(0x00, 0xf0, 0xff)),
		SkillCategory::new("Programming & Data", Color::rgb(0x8b, 0x5c, 0xf6)),
		SkillCategory::new("Cloud & Infrastructure", Color::rgb(0xff, 0x00, 0xa0)),
		SkillCategory::new("Databases & Vector Stores", Color::rgb(0xff, 0xd7, 0x00)),
		SkillCategory::new("Monitoring & MLOps", Color::rgb(0x00, 0xf0, 0xff)),
	]
}

/// Page-level overrides read from the `field-config` script element.
///
/// Every section is optional; missing sections fall back to the built-in
/// presets.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct PageConfig {
	/// Full-page background field.
	pub background: Option<FieldConfig>,
	/// Skill constellation panel.
	pub constellation: Option<FieldConfig>,
	/// Categories for the constellation nodes.
	pub categories: Option<Vec<SkillCategory>>,
}

impl PageConfig {
	/// Background configuration with the preset as fallback.
	pub fn background(&self) -> FieldConfig {
		self.background.clone().unwrap_or_else(FieldConfig::background)
	}

	/// Constellation configuration with the preset as fallback.
	pub fn constellation(&self) -> FieldConfig {
		self.constellation
			.clone()
			.unwrap_or_else(FieldConfig::constellation)
	}

	/// Categories with the built-in set as fallback. An empty list also falls
	/// back, since a constellation without labels has nothing to show.
	pub fn categories(&self) -> Vec<SkillCategory> {
		match &self.categories {
			Some(categories) if !categories.is_empty() => categories.clone(),
			_ => default_categories(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::particle_field::config::Population;

	#[test]
	fn empty_page_config_uses_presets() {
		let page: PageConfig = serde_json::from_str("{}").unwrap();
		assert_eq!(page.background(), FieldConfig::background());
		assert_eq!(page.constellation(), FieldConfig::constellation());
		assert_eq!(page.categories().len(), 5);
	}

	#[test]
	fn categories_and_sections_override_defaults() {
		let page: PageConfig = serde_json::from_str(
			r##"{
				"background": { "population": { "density": { "divisor": 10.0, "cap": 40 } } },
				"categories": [
					{ "name": "Rust", "color": "#dea584" },
					{ "name": "WASM", "color": "#654ff0" }
				]
			}"##,
		)
		.unwrap();

		assert_eq!(
			page.background().population,
			Population::Density {
				divisor: 10.0,
				cap: 40
			}
		);
		assert_eq!(page.constellation(), FieldConfig::constellation());
		let categories = page.categories();
		assert_eq!(categories.len(), 2);
		assert_eq!(categories[0], SkillCategory::new("Rust", Color::rgb(0xde, 0xa5, 0x84)));
	}

	#[test]
	fn empty_category_list_falls_back() {
		let page: PageConfig = serde_json::from_str(r#"{ "categories": [] }"#).unwrap();
		assert_eq!(page.categories(), default_categories());
	}
}
