//! Drawing surfaces sized to their host.

use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::config::Sizing;
use super::render::{Painter, Stroke};
use super::theme::Color;

/// A paintable raster area whose size follows its container.
pub trait Surface: Painter {
	/// Matches the surface dimensions to the container. Does nothing when the
	/// container cannot be measured.
	fn fit(&mut self);
	/// Current dimensions in pixels.
	fn size(&self) -> (f64, f64);
}

/// A canvas element with its 2D context.
pub struct CanvasSurface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
	sizing: Sizing,
}

impl CanvasSurface {
	/// Acquires the canvas's 2D context, or `None` if the browser refuses one.
	pub fn acquire(canvas: HtmlCanvasElement, sizing: Sizing) -> Option<Self> {
		let ctx = canvas
			.get_context("2d")
			.ok()
			.flatten()?
			.dyn_into::<CanvasRenderingContext2d>()
			.ok()?;
		Some(Self { canvas, ctx, sizing })
	}

	fn measure(&self) -> Option<(f64, f64)> {
		match self.sizing {
			Sizing::Window => {
				let window = web_sys::window()?;
				Some((
					window.inner_width().ok()?.as_f64()?,
					window.inner_height().ok()?.as_f64()?,
				))
			}
			Sizing::Parent { inset, height } => {
				let rect = self.canvas.parent_element()?.get_bounding_client_rect();
				Some(((rect.width() - inset).max(0.0), height.unwrap_or(rect.height())))
			}
		}
	}
}

impl Surface for CanvasSurface {
	fn fit(&mut self) {
		let Some((width, height)) = self.measure() else {
			debug!("particle-field: container unavailable, keeping surface size");
			return;
		};
		self.canvas.set_width(width as u32);
		self.canvas.set_height(height as u32);
	}

	fn size(&self) -> (f64, f64) {
		(self.canvas.width() as f64, self.canvas.height() as f64)
	}
}

impl Painter for CanvasSurface {
	fn clear(&mut self, width: f64, height: f64) {
		self.ctx.clear(width, height);
	}

	fn line(&mut self, from: (f64, f64), to: (f64, f64), stroke: Stroke, width: f64) {
		self.ctx.line(from, to, stroke, width);
	}

	fn disc(&mut self, center: (f64, f64), radius: f64, color: Color) {
		self.ctx.disc(center, radius, color);
	}

	fn glow(&mut self, center: (f64, f64), radius: f64, color: Color) {
		self.ctx.glow(center, radius, color);
	}

	fn label(&mut self, text: &str, anchor: (f64, f64), font: &str, color: Color) {
		self.ctx.label(text, anchor, font, color);
	}
}
