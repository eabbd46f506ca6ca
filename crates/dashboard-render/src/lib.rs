//! Renderers for the three dashboard surfaces.
//!
//! Each renderer is a function of dashboard state plus the current surface
//! size, writing primitive draw calls into a `Surface`. Time and randomness
//! come in through the `Clock` and `NoiseSource` seams so that every frame
//! can be reproduced in tests.

pub mod clock;
pub mod gauge;
pub mod layout;
pub mod map;
pub mod noise;
pub mod palette;
pub mod radar;
pub mod surface;

pub use clock::{Clock, ManualClock, SystemClock};
pub use noise::{NoiseSource, SeededNoise};
pub use surface::{DrawCommand, DrawList, Surface, SurfaceSize};

pub use dashboard_core as core;

/// Radius the dial and scope artwork is drawn against. Line widths, tick
/// offsets and font sizes scale with `actual_radius / DIAL_REFERENCE_RADIUS`.
pub const DIAL_REFERENCE_RADIUS: f64 = 80.0;

/// Fraction of the shorter surface side used as the dial/scope radius.
pub(crate) const DIAL_RADIUS_FRACTION: f64 = 0.4;
