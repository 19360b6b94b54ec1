//! Background key filter logic, independent of the host application.
//!
//! A [`BackgroundKeyFilter`] captures a clean plate of its source on request
//! and afterwards keys every frame against it. All graphics work goes through
//! the [`FilterHost`] trait.

pub mod capture;
pub mod color;
pub mod error;
pub mod filter;
pub mod host;
pub mod params;
pub mod plate;
pub mod settings;

#[cfg(test)]
mod testing;

pub use crate::capture::CaptureState;
pub use crate::error::{KeyError, Result};
pub use crate::filter::{BackgroundKeyFilter, RenderOutcome};
pub use crate::host::{
    Extent, FilterHost, GraphicsDevice, GraphicsScope, RenderPath, SourceFlags, TrackedSource,
};
pub use crate::params::{KeyParams, KeyUniforms};
pub use crate::settings::KeySettings;
