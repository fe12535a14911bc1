//! Frame rendering for particle fields.
//!
//! One frame is drawn in fixed passes:
//! 1. Clear the surface
//! 2. Connections between nearby particles
//! 3. Particles, each with its glow first and its label last
//!
//! Drawing goes through the [`Painter`] trait so the same frame logic drives a
//! browser canvas or a recording painter in tests.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::links::{self, Link};
use super::particles::{Particle, ParticleField};
use super::theme::{Color, Theme};

/// How a connection line is colored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Stroke {
	/// Uniform color.
	Solid(Color),
	/// Linear gradient from the first endpoint's color to the second's.
	Gradient(Color, Color),
}

/// Drawing primitives needed to render a particle field.
pub trait Painter {
	/// Erases the whole `width` x `height` area.
	fn clear(&mut self, width: f64, height: f64);
	/// Straight line between two points.
	fn line(&mut self, from: (f64, f64), to: (f64, f64), stroke: Stroke, width: f64);
	/// Filled circle.
	fn disc(&mut self, center: (f64, f64), radius: f64, color: Color);
	/// Radial glow fading from `color` at the center to transparent at `radius`.
	fn glow(&mut self, center: (f64, f64), radius: f64, color: Color);
	/// Text centered horizontally on `anchor`.
	fn label(&mut self, text: &str, anchor: (f64, f64), font: &str, color: Color);
}

/// Renders the field's current state.
pub fn render(field: &ParticleField, painter: &mut impl Painter, theme: &Theme) {
	let (width, height) = field.size();
	painter.clear(width, height);

	draw_links(field, painter, theme);
	for p in field.particles() {
		draw_particle(field, painter, theme, p);
	}
}

fn draw_links(field: &ParticleField, painter: &mut impl Painter, theme: &Theme) {
	let particles = field.particles();
	let threshold = field.link_threshold();
	let max_opacity = field.config().link_opacity;

	links::for_each_link(particles, threshold, |Link { a, b, distance }| {
		let Some(opacity) = links::link_opacity(distance, threshold, max_opacity) else {
			return;
		};
		let (p, q) = (&particles[a], &particles[b]);
		let stroke = match (theme.category_links, field.category(p), field.category(q)) {
			(true, Some(c1), Some(c2)) => {
				Stroke::Gradient(c1.color.with_alpha(opacity), c2.color.with_alpha(opacity))
			}
			_ => Stroke::Solid(theme.link.with_alpha(opacity)),
		};
		painter.line((p.x, p.y), (q.x, q.y), stroke, theme.link_width);
	});
}

fn draw_particle(field: &ParticleField, painter: &mut impl Painter, theme: &Theme, p: &Particle) {
	let category = field.category(p);
	let color = category.map_or(theme.particle, |c| c.color);

	if let Some(glow) = &theme.glow {
		painter.glow((p.x, p.y), p.radius * glow.spread, color.with_alpha(glow.alpha));
	}

	painter.disc((p.x, p.y), p.radius, color);

	if let (Some(style), Some(category)) = (&theme.label, category) {
		painter.label(
			&category.name,
			(p.x, p.y + p.radius + style.offset),
			&style.font,
			style.color,
		);
	}
}

impl Painter for CanvasRenderingContext2d {
	fn clear(&mut self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn line(&mut self, from: (f64, f64), to: (f64, f64), stroke: Stroke, width: f64) {
		match stroke {
			Stroke::Solid(color) => self.set_stroke_style_str(&color.to_css()),
			Stroke::Gradient(start, end) => {
				let gradient = self.create_linear_gradient(from.0, from.1, to.0, to.1);
				let _ = gradient.add_color_stop(0.0, &start.to_css());
				let _ = gradient.add_color_stop(1.0, &end.to_css());
				#[allow(deprecated)]
				self.set_stroke_style(&gradient);
			}
		}
		self.set_line_width(width);
		self.begin_path();
		self.move_to(from.0, from.1);
		self.line_to(to.0, to.1);
		self.stroke();
	}

	fn disc(&mut self, center: (f64, f64), radius: f64, color: Color) {
		self.begin_path();
		let _ = self.arc(center.0, center.1, radius, 0.0, PI * 2.0);
		self.set_fill_style_str(&color.to_css());
		self.fill();
	}

	fn glow(&mut self, center: (f64, f64), radius: f64, color: Color) {
		let Ok(gradient) =
			self.create_radial_gradient(center.0, center.1, 0.0, center.0, center.1, radius)
		else {
			return;
		};
		let _ = gradient.add_color_stop(0.0, &color.to_css());
		let _ = gradient.add_color_stop(1.0, "transparent");

		self.begin_path();
		let _ = self.arc(center.0, center.1, radius, 0.0, PI * 2.0);
		#[allow(deprecated)]
		self.set_fill_style(&gradient);
		self.fill();
	}

	fn label(&mut self, text: &str, anchor: (f64, f64), font: &str, color: Color) {
		self.set_font(font);
		self.set_fill_style_str(&color.to_css());
		self.set_text_align("center");
		let _ = self.fill_text(text, anchor.0, anchor.1);
	}
}
