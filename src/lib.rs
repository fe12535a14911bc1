//! particle-field: animated canvas backgrounds for a portfolio site.
//!
//! This crate provides a WASM particle field component: a full-window field of
//! drifting particles connected by proximity lines, and a smaller "skill
//! constellation" of labelled category nodes driven by the same engine.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

// Enables the `js` entropy backend on wasm32.
use getrandom as _;

pub mod components;

pub use components::particle_field::{
	FieldConfig, PageConfig, ParticleFieldCanvas, SkillCategory, Theme,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("particle-field: logging initialized");
}

/// Parse JSON from the script element with the given id.
/// Returns `None` when the element is missing or its content does not parse.
fn load_json_script<T: DeserializeOwned>(id: &str) -> Option<T> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;
	parse_json(id, &json_text)
}

/// Parse the JSON content of script element `id`, logging a warning when it
/// is malformed.
fn parse_json<T: DeserializeOwned>(id: &str, json_text: &str) -> Option<T> {
	match serde_json::from_str::<T>(json_text) {
		Ok(value) => {
			info!("particle-field: loaded #{id}");
			Some(value)
		}
		Err(e) => {
			warn!("particle-field: failed to parse #{id}: {}", e);
			None
		}
	}
}

/// Load page overrides from a script element with id="field-config".
/// Expected format: JSON with optional { background, constellation, categories }.
fn load_page_config() -> PageConfig {
	load_json_script("field-config").unwrap_or_default()
}

/// Main application component.
/// Mounts the background field behind the page and the skill constellation panel.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let page = load_page_config();

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Portfolio" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="portfolio">
			<ParticleFieldCanvas
				config=page.background()
				theme=Theme::background()
				class="particle-background"
				style="position: fixed; inset: 0; pointer-events: none; z-index: 0; opacity: 0.6;"
			/>
			<main class="portfolio-content">
				<section id="skills" class="skills">
					<div class="constellation-panel">
						<h3>"Skill Constellation"</h3>
						<ParticleFieldCanvas
							config=page.constellation()
							theme=Theme::constellation()
							categories=page.categories()
							class="skill-constellation"
							style="display: block; width: 100%; height: 300px;"
						/>
					</div>
				</section>
			</main>
		</div>
	}
}
