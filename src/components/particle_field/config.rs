//! Geometry and motion parameters for a particle field.
//!
//! A [`FieldConfig`] fully describes one instantiation of the engine: how many
//! particles a surface gets, how fast they drift, how far apart two particles
//! can be and still be connected, and how the surface is sized. The two stock
//! variants are [`FieldConfig::background`] and [`FieldConfig::constellation`].
//!
//! Configs deserialize from JSON. Omitted fields take the values of the
//! background preset.

use serde::Deserialize;

/// How many particles a surface receives.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Population {
	/// One particle per `divisor` pixels of surface width, capped at `cap`.
	///
	/// The cap bounds the quadratic connection scan.
	Density {
		/// Pixels of width per particle.
		divisor: f64,
		/// Upper bound on the population.
		cap: usize,
	},
	/// Always exactly this many particles.
	Fixed(usize),
}

impl Population {
	/// Population for a surface of the given width.
	///
	/// Non-finite or non-positive widths yield an empty field.
	pub fn count(&self, width: f64) -> usize {
		match *self {
			Population::Density { divisor, cap } => {
				if !(width.is_finite() && width > 0.0 && divisor > 0.0) {
					return 0;
				}
				let per_width = (width / divisor).floor();
				if per_width >= cap as f64 {
					cap
				} else {
					per_width as usize
				}
			}
			Population::Fixed(n) => n,
		}
	}
}

/// Initial placement of a freshly seeded population.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
	/// Uniformly random inside the movement bounds.
	#[default]
	Scatter,
	/// Evenly spaced on a circle of radius `0.3 * min(w, h)` around the
	/// center, first particle at the top.
	Ring,
}

/// Distance below which two particles are connected.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum LinkRange {
	/// Fixed distance in pixels.
	Fixed(f64),
	/// The surface diagonal, so every pair on the panel is connected.
	Diagonal,
}

impl LinkRange {
	/// Threshold distance for a surface of the given size.
	pub fn threshold(&self, width: f64, height: f64) -> f64 {
		match *self {
			LinkRange::Fixed(distance) => distance,
			LinkRange::Diagonal => width.hypot(height),
		}
	}
}

/// Sizing of the drawing surface relative to its host.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Sizing {
	/// Fill the browser window.
	Window,
	/// Follow the parent element's width.
	Parent {
		/// Pixels subtracted from the parent width (panel padding).
		inset: f64,
		/// Fixed height; `None` follows the parent height.
		height: Option<f64>,
	},
}

/// Parameters for one particle field instance.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
	/// Population sizing rule.
	pub population: Population,
	/// Initial placement.
	pub layout: Layout,
	/// Maximum absolute velocity per axis, in pixels per frame.
	pub speed: f64,
	/// Inclusive radius range `[min, max]`.
	pub radius: (f64, f64),
	/// Distance from each surface edge at which particles bounce.
	pub margin: f64,
	/// Connection threshold.
	pub link_range: LinkRange,
	/// Opacity of a connection between coincident particles.
	pub link_opacity: f64,
	/// Surface sizing rule.
	pub sizing: Sizing,
	/// Whether nodes take on the field's skill categories. Unlabelled fields
	/// draw every particle in the theme color.
	pub labelled: bool,
}

impl FieldConfig {
	/// Full-page ambient field: one particle per 15px of width, at most 80.
	pub fn background() -> Self {
		Self {
			population: Population::Density {
				divisor: 15.0,
				cap: 80,
			},
			layout: Layout::Scatter,
			speed: 0.25,
			radius: (1.0, 3.0),
			margin: 0.0,
			link_range: LinkRange::Fixed(150.0),
			link_opacity: 0.3,
			sizing: Sizing::Window,
			labelled: false,
		}
	}

	/// Skill constellation panel: five slow category nodes, all connected.
	pub fn constellation() -> Self {
		Self {
			population: Population::Fixed(5),
			layout: Layout::Scatter,
			speed: 0.15,
			radius: (1.0, 3.0),
			margin: 60.0,
			link_range: LinkRange::Diagonal,
			link_opacity: 0x40 as f64 / 255.0,
			sizing: Sizing::Parent {
				inset: 64.0,
				height: Some(300.0),
			},
			labelled: true,
		}
	}
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self::background()
	}
}
