//! Leptos component wrapping a particle field canvas.
//!
//! The component creates an HTML canvas element and, once it is in the DOM,
//! hands it to a [`FieldController`]. Frames are paced by
//! `requestAnimationFrame` and resizes arrive through a window `resize`
//! listener; both callbacks live in a [`BrowserHost`] and are released when
//! the component is cleaned up.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, Window};

use super::config::FieldConfig;
use super::controller::{FieldController, FrameHandle, FrameHost};
use super::particles::ParticleField;
use super::surface::CanvasSurface;
use super::theme::Theme;
use super::types::SkillCategory;

type CallbackCell = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;
type ControllerSlot = Rc<RefCell<Option<FieldController<CanvasSurface, BrowserHost>>>>;

/// Browser frame pacing and window resize events.
pub struct BrowserHost {
	window: Window,
	on_frame: CallbackCell,
	on_resize: CallbackCell,
}

impl BrowserHost {
	/// Wraps the frame and resize callbacks for `window`.
	pub fn new(
		window: Window,
		on_frame: Closure<dyn FnMut()>,
		on_resize: Closure<dyn FnMut()>,
	) -> Self {
		Self {
			window,
			on_frame: Rc::new(RefCell::new(Some(on_frame))),
			on_resize: Rc::new(RefCell::new(Some(on_resize))),
		}
	}
}

impl FrameHost for BrowserHost {
	fn request_frame(&mut self) -> Option<FrameHandle> {
		let on_frame = self.on_frame.borrow();
		let cb = on_frame.as_ref()?;
		self.window
			.request_animation_frame(cb.as_ref().unchecked_ref())
			.ok()
	}

	fn cancel_frame(&mut self, handle: FrameHandle) {
		let _ = self.window.cancel_animation_frame(handle);
	}

	fn watch_resize(&mut self) {
		if let Some(ref cb) = *self.on_resize.borrow() {
			let _ = self
				.window
				.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
	}

	fn unwatch_resize(&mut self) {
		if let Some(ref cb) = *self.on_resize.borrow() {
			let _ = self
				.window
				.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
	}

	fn release(&mut self) {
		self.on_frame.borrow_mut().take();
		self.on_resize.borrow_mut().take();
	}
}

/// Starts a field on `canvas`. Returns the slot holding its controller, or
/// `None` when the canvas has no 2D context.
fn start(
	canvas: HtmlCanvasElement,
	window: Window,
	config: FieldConfig,
	theme: Theme,
	categories: Vec<SkillCategory>,
) -> Option<ControllerSlot> {
	let slot: ControllerSlot = Rc::new(RefCell::new(None));

	let slot_frame = slot.clone();
	let on_frame = Closure::<dyn FnMut()>::new(move || {
		if let Some(ref mut c) = *slot_frame.borrow_mut() {
			c.frame();
		}
	});
	let slot_resize = slot.clone();
	let on_resize = Closure::<dyn FnMut()>::new(move || {
		if let Some(ref mut c) = *slot_resize.borrow_mut() {
			c.resize();
		}
	});

	let surface = CanvasSurface::acquire(canvas, config.sizing.clone());
	let host = BrowserHost::new(window, on_frame, on_resize);
	let field = ParticleField::new(config, categories);
	let controller = FieldController::launch(surface, host, field, theme)?;

	*slot.borrow_mut() = Some(controller);
	Some(slot)
}

/// Renders an animated particle field on a canvas element.
///
/// `config` controls population, motion and sizing; `theme` controls colors.
/// The default is the full-window background field. Pass
/// [`FieldConfig::constellation`] and [`Theme::constellation`] together with
/// `categories` for the labelled skill constellation.
///
/// The running controller is owned by the component and torn down when the
/// component's reactive owner is cleaned up.
#[component]
pub fn ParticleFieldCanvas(
	#[prop(optional)] config: FieldConfig,
	#[prop(optional)] theme: Theme,
	#[prop(optional)] categories: Vec<SkillCategory>,
	#[prop(default = "particle-field")] class: &'static str,
	#[prop(default = "display: block;")] style: &'static str,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let running = StoredValue::new_local(None::<ControllerSlot>);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if running.try_with_value(Option::is_some).unwrap_or(true) {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let Some(slot) = start(
			canvas,
			window,
			config.clone(),
			theme.clone(),
			categories.clone(),
		) else {
			return;
		};
		running.update_value(|running| *running = Some(slot));
	});

	on_cleanup(move || {
		// The callbacks hold the slot too, so the controller has to be taken out
		// for its teardown to run.
		if let Some(Some(slot)) = running.try_update_value(Option::take) {
			let controller = slot.borrow_mut().take();
			drop(controller);
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class=class
			style=style
		/>
	}
}
