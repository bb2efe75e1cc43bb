//! tinct — reactive runtime theming
//!
//! Persists user-chosen theme properties (colors, activity theme resource,
//! status-bar icon mode) in a flat key-value preference file, and pushes
//! committed changes to the currently visible screen: recoloring system bars
//! and the window background in place, recreating the screen when the theme
//! resource itself changes.
//!
//! # Overview
//!
//! - [`ThemeStore`]: caller-owned configuration store. Setters stage writes
//!   into a pending edit batch; [`ThemeStore::apply`] commits the batch
//!   atomically and notifies observers. Values resolve to platform style
//!   defaults when never written.
//! - [`ScreenBinder`]: binds a screen's lifecycle (attach / resume / pause /
//!   destroy) to the store, holding observer subscriptions open only while
//!   the screen is resumed.
//! - [`AutoSwitchMode`]: the Off / On / Auto policy deciding when light
//!   status-bar icons are requested.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use tinct_platform::HeadlessScreen;
//! use tinct_theme::{ScreenBinder, ThemeStore};
//! use tinct_core::Color;
//!
//! let store = ThemeStore::open("tinct-prefs.toml")?;
//! let mut binder = ScreenBinder::new(&store);
//! binder.attach(HeadlessScreen::new())?;
//! binder.resume()?;
//!
//! store.set_primary_color(Color::from_hex(0x3584E4))?; // commits immediately
//! store.set_status_bar_color_auto()?;                  // derives from primary
//! store.set_nav_bar_color_auto()?;
//! store.apply()?;                                      // flush + notify
//! ```
//!
//! # Ordering contract
//!
//! `set_primary_color` commits synchronously; every other setter stages
//! until `apply`. The auto-derivations read the committed primary color, so
//! this asymmetry is load-bearing — see [`store`] for details.
//!
//! # Delivery model
//!
//! Single-threaded and cooperative: observers run on the committing (UI)
//! thread, deduplicated per observer, and are cancelled synchronously on
//! pause. Observer failures are logged and rethrown to the committer, never
//! swallowed.

pub mod binder;
pub mod error;
pub mod keys;
pub mod policy;
pub mod prefs;
pub mod store;
pub mod watch;

pub use binder::{LifecyclePhase, ScreenBinder};
pub use error::{Result, ThemeError};
pub use keys::ThemeKey;
pub use policy::{light_status_bar, AutoSwitchMode};
pub use prefs::{PrefValue, PREFS_FILE_NAME};
pub use store::ThemeStore;
pub use watch::{Subscription, SubscriptionSet};
