//! Particle population and motion.
//!
//! A [`ParticleField`] owns every particle on one surface. It is seeded for a
//! surface size, drawn and advanced once per frame by [`ParticleField::step`],
//! and thrown away wholesale whenever the surface changes size.

use std::f64::consts::{FRAC_PI_2, TAU};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::config::{FieldConfig, Layout};
use super::render::{self, Painter};
use super::theme::Theme;
use super::types::SkillCategory;

/// A single drifting particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	/// Horizontal position in surface pixels.
	pub x: f64,
	/// Vertical position in surface pixels.
	pub y: f64,
	/// Horizontal velocity in pixels per frame.
	pub vx: f64,
	/// Vertical velocity in pixels per frame.
	pub vy: f64,
	/// Draw radius.
	pub radius: f64,
	/// Index into the field's categories, for labelled nodes.
	pub category: Option<usize>,
}

/// Axis-aligned region particles bounce inside.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	/// Left edge.
	pub min_x: f64,
	/// Right edge.
	pub max_x: f64,
	/// Top edge.
	pub min_y: f64,
	/// Bottom edge.
	pub max_y: f64,
}

impl Bounds {
	/// Surface rectangle shrunk by `margin` on each side. The margin is
	/// clamped per axis so the region never inverts.
	pub fn inset(width: f64, height: f64, margin: f64) -> Self {
		let (width, height, margin) = (extent(width), extent(height), extent(margin));
		let mx = margin.min(width / 2.0);
		let my = margin.min(height / 2.0);
		Self {
			min_x: mx,
			max_x: width - mx,
			min_y: my,
			max_y: height - my,
		}
	}
}

/// All particles on one surface plus the randomness used to seed them.
pub struct ParticleField {
	config: FieldConfig,
	categories: Vec<SkillCategory>,
	particles: Vec<Particle>,
	width: f64,
	height: f64,
	generation: u64,
	rng: SmallRng,
}

impl ParticleField {
	/// Creates an empty field seeded from the platform entropy source.
	pub fn new(config: FieldConfig, categories: Vec<SkillCategory>) -> Self {
		Self::with_rng(config, categories, SmallRng::from_entropy())
	}

	/// Creates an empty field drawing randomness from `rng`.
	///
	/// With a fixed seed, seeding and every later step are reproducible.
	pub fn with_rng(config: FieldConfig, categories: Vec<SkillCategory>, rng: SmallRng) -> Self {
		Self {
			config,
			categories,
			particles: Vec::new(),
			width: 0.0,
			height: 0.0,
			generation: 0,
			rng,
		}
	}

	/// Replaces the whole population with a fresh one sized for the surface.
	///
	/// Nothing from the previous population is kept.
	pub fn seed(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.generation += 1;

		let count = self.config.population.count(width);
		let bounds = self.bounds();
		let speed = extent(self.config.speed.abs());
		let (r_min, r_max) = (extent(self.config.radius.0), extent(self.config.radius.1));
		let (r_min, r_max) = (r_min.min(r_max), r_min.max(r_max));
		let layout = self.config.layout;
		let categories = if self.config.labelled { self.categories.len() } else { 0 };

		let mut particles = Vec::with_capacity(count);
		for i in 0..count {
			let (x, y) = match layout {
				Layout::Scatter => (
					self.rng.gen_range(bounds.min_x..=bounds.max_x),
					self.rng.gen_range(bounds.min_y..=bounds.max_y),
				),
				Layout::Ring => ring_position(i, count, width, height),
			};
			particles.push(Particle {
				x,
				y,
				vx: self.rng.gen_range(-speed..=speed),
				vy: self.rng.gen_range(-speed..=speed),
				radius: self.rng.gen_range(r_min..=r_max),
				category: (categories > 0).then(|| i % categories),
			});
		}
		self.particles = particles;
	}

	/// Moves every particle by its velocity and reflects it off the bounds.
	///
	/// Each axis is handled on its own: leaving horizontally negates `vx`,
	/// leaving vertically negates `vy`. Positions are not clamped, so a
	/// particle may sit up to one velocity step outside for a frame.
	pub fn advance(&mut self) {
		let bounds = self.bounds();
		for p in &mut self.particles {
			p.x += p.vx;
			p.y += p.vy;

			if p.x < bounds.min_x || p.x > bounds.max_x {
				p.vx = -p.vx;
			}
			if p.y < bounds.min_y || p.y > bounds.max_y {
				p.vy = -p.vy;
			}
		}
	}

	/// Renders one frame and then advances the simulation.
	///
	/// Connections are computed from the positions being drawn, before the
	/// update.
	pub fn step(&mut self, painter: &mut impl Painter, theme: &Theme) {
		render::render(self, painter, theme);
		self.advance();
	}

	/// Connection threshold for the current surface.
	pub fn link_threshold(&self) -> f64 {
		self.config.link_range.threshold(self.width, self.height)
	}

	/// Movement bounds for the current surface.
	pub fn bounds(&self) -> Bounds {
		Bounds::inset(self.width, self.height, self.config.margin)
	}

	/// Current particles.
	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	/// Category attached to a particle, if any.
	pub fn category(&self, particle: &Particle) -> Option<&SkillCategory> {
		particle.category.and_then(|i| self.categories.get(i))
	}

	/// Field parameters.
	pub fn config(&self) -> &FieldConfig {
		&self.config
	}

	/// Surface size the population was seeded for.
	pub fn size(&self) -> (f64, f64) {
		(self.width, self.height)
	}

	/// Number of times the field has been seeded.
	pub fn generation(&self) -> u64 {
		self.generation
	}

	#[cfg(test)]
	pub(crate) fn particles_mut(&mut self) -> &mut Vec<Particle> {
		&mut self.particles
	}
}

/// Largest length used for sampling. Keeps `-x..=x` ranges finite.
const MAX_EXTENT: f64 = f64::MAX / 4.0;

/// Non-negative finite length no larger than [`MAX_EXTENT`], with anything
/// else mapped to zero.
fn extent(value: f64) -> f64 {
	if value.is_finite() { value.clamp(0.0, MAX_EXTENT) } else { 0.0 }
}

fn ring_position(i: usize, count: usize, width: f64, height: f64) -> (f64, f64) {
	let radius = width.min(height).max(0.0) * 0.3;
	let angle = (i as f64 / count as f64) * TAU - FRAC_PI_2;
	(
		width / 2.0 + angle.cos() * radius,
		height / 2.0 + angle.sin() * radius,
	)
}
