// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Camera motion, zoom smoothing and intro choreography for the UGD
//! coming-soon scene.
//!
//! The scene shows a model under an orthographic camera that three things
//! move at once: a scripted reveal when the loader leaves, a drag-orbit rig
//! and, on phones and tablets, the device's roll. This crate owns those
//! motions and the state around them; drawing the model is up to the host.
//!
//! # Key entry points
//!
//! - [`engine::SceneEngine`] - the per-scene controller hosts drive
//! - [`options::Options`] - zoom, gyro, intro, orbit and breakpoint settings
//! - [`input::InputEvent`] - host-agnostic input fed to the engine
//! - [`overlay::Overlay`] - clock and last-visit text
//!
//! # Frame order
//!
//! Each [`engine::SceneEngine::update`] advances the loader, then the intro
//! tween, then runs the [`engine::FrameScheduler`]: zoom smoothing, the
//! [`camera::pose::CameraPoseBlender`] (scripted record, gyro nudge, orbit
//! reconcile) and a projection refresh only when something changed.
//!
//! Hosts: the `viewer` feature opens a native window; the `web` feature
//! binds the engine to a page.

pub mod animation;
pub mod camera;
pub mod device;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod options;
pub mod overlay;
pub mod sensor;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;
#[cfg(feature = "web")]
pub mod web;

pub use engine::SceneEngine;
pub use error::SceneError;
pub use input::InputEvent;
pub use options::Options;
#[cfg(feature = "viewer")]
pub use viewer::{Viewer, ViewerBuilder};
