//! tinct platform layer
//!
//! The seam between the theming engine and the host UI toolkit. A host embeds
//! tinct by implementing [`Screen`] for whatever owns its window chrome; the
//! engine only ever talks to that trait:
//!
//! - resolving default colors from the platform's current style
//! - swapping the activity/window theme resource (via a full recreate)
//! - recoloring the status bar, navigation bar, and window background
//!
//! [`HeadlessScreen`] is a deterministic in-process implementation that
//! records every applied effect, used by the test suites and the demo.

pub mod error;
pub mod headless;
pub mod screen;

pub use error::{PlatformError, Result};
pub use headless::{AppliedEffect, HeadlessScreen};
pub use screen::{Screen, StyleAttr, StyleDefaults};
