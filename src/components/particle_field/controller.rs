//! Animation lifecycle for one particle field.
//!
//! A [`FieldController`] ties a surface, a particle field and a frame host
//! together and walks them through `Idle -> Running -> TornDown`. The host
//! abstracts the browser's frame pacing and resize notifications so the
//! lifecycle can be driven by hand in tests.

use log::{debug, info};

use super::particles::ParticleField;
use super::surface::Surface;
use super::theme::Theme;

/// Handle returned by [`FrameHost::request_frame`].
pub type FrameHandle = i32;

/// Display timing source and resize signal for a running field.
pub trait FrameHost {
	/// Schedules one frame callback.
	fn request_frame(&mut self) -> Option<FrameHandle>;
	/// Cancels a scheduled frame callback.
	fn cancel_frame(&mut self, handle: FrameHandle);
	/// Starts delivering resize notifications.
	fn watch_resize(&mut self);
	/// Stops delivering resize notifications.
	fn unwatch_resize(&mut self);
	/// Drops any callbacks the host still holds. Called last during teardown.
	fn release(&mut self) {}
}

/// Lifecycle state of a [`FieldController`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
	/// Created, nothing scheduled yet.
	Idle,
	/// Rendering once per frame.
	Running,
	/// Stopped for good.
	TornDown,
}

/// Drives one particle field on one surface.
///
/// Teardown runs on drop, so the pending frame and the resize listener are
/// released on every exit path.
pub struct FieldController<S: Surface, H: FrameHost> {
	surface: S,
	host: H,
	field: ParticleField,
	theme: Theme,
	phase: Phase,
	pending_frame: Option<FrameHandle>,
}

impl<S: Surface, H: FrameHost> FieldController<S, H> {
	/// Creates an idle controller.
	pub fn new(surface: S, host: H, field: ParticleField, theme: Theme) -> Self {
		Self {
			surface,
			host,
			field,
			theme,
			phase: Phase::Idle,
			pending_frame: None,
		}
	}

	/// Creates and mounts a controller, or does nothing at all when there is
	/// no surface to draw on.
	pub fn launch(surface: Option<S>, host: H, field: ParticleField, theme: Theme) -> Option<Self> {
		let Some(surface) = surface else {
			debug!("particle-field: no drawing surface, {} field disabled", theme.name);
			return None;
		};
		let mut controller = Self::new(surface, host, field, theme);
		controller.mount();
		Some(controller)
	}

	/// Sizes the surface, seeds the field and starts the frame loop.
	///
	/// Only has an effect while idle.
	pub fn mount(&mut self) {
		if self.phase != Phase::Idle {
			return;
		}
		self.surface.fit();
		let (width, height) = self.surface.size();
		self.field.seed(width, height);
		info!(
			"particle-field: {} mounted at {}x{} with {} particles",
			self.theme.name,
			width,
			height,
			self.field.particles().len()
		);

		self.host.watch_resize();
		self.phase = Phase::Running;
		self.pending_frame = self.host.request_frame();
	}

	/// Renders one frame and schedules the next. Ignored unless running.
	pub fn frame(&mut self) {
		if self.phase != Phase::Running {
			return;
		}
		self.pending_frame = None;
		self.field.step(&mut self.surface, &self.theme);
		self.pending_frame = self.host.request_frame();
	}

	/// Refits the surface and replaces the whole population. Ignored unless
	/// running.
	pub fn resize(&mut self) {
		if self.phase != Phase::Running {
			return;
		}
		self.surface.fit();
		let (width, height) = self.surface.size();
		self.field.seed(width, height);
		debug!(
			"particle-field: {} reseeded for {}x{} ({} particles)",
			self.theme.name,
			width,
			height,
			self.field.particles().len()
		);
	}

	/// Stops the frame loop and removes the resize listener.
	///
	/// Returns `false` if the controller was already torn down.
	pub fn teardown(&mut self) -> bool {
		match self.phase {
			Phase::TornDown => false,
			Phase::Idle => {
				self.phase = Phase::TornDown;
				true
			}
			Phase::Running => {
				self.phase = Phase::TornDown;
				if let Some(handle) = self.pending_frame.take() {
					self.host.cancel_frame(handle);
				}
				self.host.unwatch_resize();
				self.host.release();
				debug!("particle-field: {} torn down", self.theme.name);
				true
			}
		}
	}

	/// Current lifecycle state.
	pub fn phase(&self) -> Phase {
		self.phase
	}

	/// The animated field.
	pub fn field(&self) -> &ParticleField {
		&self.field
	}

	/// The drawing surface.
	pub fn surface(&self) -> &S {
		&self.surface
	}
}

impl<S: Surface, H: FrameHost> Drop for FieldController<S, H> {
	fn drop(&mut self) {
		self.teardown();
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::rc::Rc;

	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::*;
	use crate::components::particle_field::config::FieldConfig;
	use crate::components::particle_field::render::tests::{Op, Recorder};
	use crate::components::particle_field::render::{Painter, Stroke};
	use crate::components::particle_field::theme::Color;

	#[derive(Debug, Default)]
	struct HostLog {
		requested: usize,
		cancelled: Vec<FrameHandle>,
		watching: bool,
		unwatched: usize,
		released: usize,
	}

	#[derive(Clone, Default)]
	struct FakeHost(Rc<RefCell<HostLog>>);

	impl FrameHost for FakeHost {
		fn request_frame(&mut self) -> Option<FrameHandle> {
			let mut log = self.0.borrow_mut();
			log.requested += 1;
			Some(log.requested as FrameHandle)
		}

		fn cancel_frame(&mut self, handle: FrameHandle) {
			self.0.borrow_mut().cancelled.push(handle);
		}

		fn watch_resize(&mut self) {
			self.0.borrow_mut().watching = true;
		}

		fn unwatch_resize(&mut self) {
			let mut log = self.0.borrow_mut();
			log.watching = false;
			log.unwatched += 1;
		}

		fn release(&mut self) {
			self.0.borrow_mut().released += 1;
		}
	}

	struct FakeSurface {
		container: Rc<RefCell<(f64, f64)>>,
		size: (f64, f64),
		fits: usize,
		painter: Recorder,
	}

	impl FakeSurface {
		fn new(container: Rc<RefCell<(f64, f64)>>) -> Self {
			Self {
				container,
				size: (0.0, 0.0),
				fits: 0,
				painter: Recorder::default(),
			}
		}
	}

	impl Surface for FakeSurface {
		fn fit(&mut self) {
			self.fits += 1;
			self.size = *self.container.borrow();
		}

		fn size(&self) -> (f64, f64) {
			self.size
		}
	}

	impl Painter for FakeSurface {
		fn clear(&mut self, width: f64, height: f64) {
			self.painter.clear(width, height);
		}

		fn line(&mut self, from: (f64, f64), to: (f64, f64), stroke: Stroke, width: f64) {
			self.painter.line(from, to, stroke, width);
		}

		fn disc(&mut self, center: (f64, f64), radius: f64, color: Color) {
			self.painter.disc(center, radius, color);
		}

		fn glow(&mut self, center: (f64, f64), radius: f64, color: Color) {
			self.painter.glow(center, radius, color);
		}

		fn label(&mut self, text: &str, anchor: (f64, f64), font: &str, color: Color) {
			self.painter.label(text, anchor, font, color);
		}
	}

	fn controller(
		width: f64,
		height: f64,
	) -> (
		FieldController<FakeSurface, FakeHost>,
		Rc<RefCell<(f64, f64)>>,
		FakeHost,
	) {
		let container = Rc::new(RefCell::new((width, height)));
		let host = FakeHost::default();
		let field = ParticleField::with_rng(
			FieldConfig::background(),
			Vec::new(),
			SmallRng::seed_from_u64(31),
		);
		let controller = FieldController::new(
			FakeSurface::new(container.clone()),
			host.clone(),
			field,
			Theme::background(),
		);
		(controller, container, host)
	}

	#[test]
	fn mount_sizes_seeds_and_schedules() {
		let (mut c, _, host) = controller(1200.0, 800.0);
		assert_eq!(c.phase(), Phase::Idle);
		c.mount();

		assert_eq!(c.phase(), Phase::Running);
		assert_eq!(c.surface().size(), (1200.0, 800.0));
		assert_eq!(c.field().particles().len(), 80);
		assert!(host.0.borrow().watching);
		assert_eq!(host.0.borrow().requested, 1);
	}

	#[test]
	fn each_frame_renders_and_requests_the_next() {
		let (mut c, _, host) = controller(300.0, 200.0);
		c.mount();
		c.frame();
		c.frame();

		assert_eq!(host.0.borrow().requested, 3);
		let clears = c
			.surface()
			.painter
			.ops
			.iter()
			.filter(|op| matches!(op, Op::Clear(..)))
			.count();
		assert_eq!(clears, 2);
	}

	#[test]
	fn resize_reseeds_for_new_size() {
		let (mut c, container, _) = controller(1200.0, 800.0);
		c.mount();
		let before = c.field().particles().to_vec();

		*container.borrow_mut() = (300.0, 800.0);
		c.resize();

		assert_eq!(c.surface().size(), (300.0, 800.0));
		assert_eq!(c.field().particles().len(), 20);
		assert_eq!(c.field().generation(), 2);
		assert!(c.field().particles().iter().all(|p| !before.contains(p)));
	}

	#[test]
	fn teardown_stops_frames_and_resizes() {
		let (mut c, container, host) = controller(1200.0, 800.0);
		c.mount();
		c.frame();
		assert!(c.teardown());

		{
			let log = host.0.borrow();
			assert_eq!(log.cancelled, vec![2]);
			assert!(!log.watching);
			assert_eq!(log.unwatched, 1);
			assert_eq!(log.released, 1);
		}

		*container.borrow_mut() = (640.0, 480.0);
		c.resize();
		c.frame();
		assert_eq!(c.surface().fits, 1);
		assert_eq!(c.surface().size(), (1200.0, 800.0));
		assert_eq!(host.0.borrow().requested, 2);
		assert_eq!(c.phase(), Phase::TornDown);
	}

	#[test]
	fn teardown_is_idempotent() {
		let (mut c, _, host) = controller(800.0, 600.0);
		c.mount();
		assert!(c.teardown());
		assert!(!c.teardown());
		drop(c);
		assert_eq!(host.0.borrow().unwatched, 1);
		assert_eq!(host.0.borrow().cancelled.len(), 1);
	}

	#[test]
	fn drop_tears_down_running_controller() {
		let (mut c, _, host) = controller(800.0, 600.0);
		c.mount();
		drop(c);
		let log = host.0.borrow();
		assert_eq!(log.unwatched, 1);
		assert_eq!(log.cancelled, vec![1]);
	}

	#[test]
	fn idle_teardown_leaves_host_untouched() {
		let (mut c, _, host) = controller(800.0, 600.0);
		assert!(c.teardown());
		c.mount();
		assert_eq!(c.phase(), Phase::TornDown);
		let log = host.0.borrow();
		assert_eq!(log.requested, 0);
		assert_eq!(log.unwatched, 0);
	}

	#[test]
	fn launch_without_surface_does_nothing() {
		let host = FakeHost::default();
		let field = ParticleField::with_rng(
			FieldConfig::background(),
			Vec::new(),
			SmallRng::seed_from_u64(32),
		);
		let launched = FieldController::<FakeSurface, _>::launch(
			None,
			host.clone(),
			field,
			Theme::background(),
		);

		assert!(launched.is_none());
		let log = host.0.borrow();
		assert_eq!(log.requested, 0);
		assert!(!log.watching);
	}
}
