//! Animated particle field rendered on a canvas.
//!
//! One engine drives both decorative effects of the portfolio page:
//! - a full-window background of drifting particles linked by proximity lines
//! - a bounded skill constellation of labelled, glowing category nodes
//!
//! Per frame the surface is cleared, connections are drawn between every pair
//! of particles closer than a threshold (fading with distance), particles are
//! drawn on top, and finally every particle moves one step, bouncing off the
//! surface edges. A resize throws the population away and seeds a new one.
//!
//! # Example
//!
//! ```ignore
//! use particle_field::{FieldConfig, ParticleFieldCanvas, Theme};
//!
//! view! {
//!     <ParticleFieldCanvas />
//!     <ParticleFieldCanvas
//!         config=FieldConfig::constellation()
//!         theme=Theme::constellation()
//!     />
//! }
//! ```

mod component;
pub mod config;
pub mod controller;
pub mod links;
pub mod particles;
pub mod render;
pub mod surface;
pub mod theme;
mod types;

pub use component::{BrowserHost, ParticleFieldCanvas};
pub use config::FieldConfig;
pub use controller::{FieldController, FrameHandle, FrameHost, Phase};
pub use particles::{Particle, ParticleField};
pub use render::{Painter, Stroke};
pub use surface::{CanvasSurface, Surface};
pub use theme::{Color, Theme};
pub use types::{PageConfig, SkillCategory, default_categories};
