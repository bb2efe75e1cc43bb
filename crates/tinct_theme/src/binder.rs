//! Screen lifecycle binder
//!
//! Bridges a host screen's lifecycle to the theme store. The binder is a
//! three-state machine:
//!
//! ```text
//! Unattached --attach--> AttachedPaused --resume--> AttachedResumed
//!      ^                      ^   |                      |
//!      |                      +---+----------pause-------+
//!      +------------------destroy (from any state)-------+
//! ```
//!
//! While resumed, five properties are observed and pushed to the screen:
//! activity theme (a destructive recreate, the only way platforms apply a new
//! style resource), status-bar color, nav-bar color, window background, and
//! the light-status-bar mode. Pausing synchronously cancels all five
//! subscriptions, so store mutations while paused have no screen effect; the
//! next resume re-applies the latest values exactly once each.

use crate::error::{Result, ThemeError};
use crate::policy;
use crate::store::ThemeStore;
use crate::watch::SubscriptionSet;
use std::sync::{Arc, Mutex};
use tinct_platform::{Screen, StyleDefaults};

/// Observable lifecycle phase of a [`ScreenBinder`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LifecyclePhase {
    Unattached,
    AttachedPaused,
    AttachedResumed,
}

enum BinderState<S: Screen> {
    Unattached,
    Paused {
        screen: Arc<Mutex<S>>,
        last_theme: Arc<Mutex<u32>>,
    },
    Resumed {
        screen: Arc<Mutex<S>>,
        last_theme: Arc<Mutex<u32>>,
        subs: SubscriptionSet,
    },
}

/// Binds one screen's lifecycle to a caller-owned [`ThemeStore`]
pub struct ScreenBinder<S: Screen + 'static> {
    store: ThemeStore,
    state: BinderState<S>,
}

impl<S: Screen + 'static> ScreenBinder<S> {
    pub fn new(store: &ThemeStore) -> Self {
        Self {
            store: store.clone(),
            state: BinderState::Unattached,
        }
    }

    pub fn phase(&self) -> LifecyclePhase {
        match self.state {
            BinderState::Unattached => LifecyclePhase::Unattached,
            BinderState::Paused { .. } => LifecyclePhase::AttachedPaused,
            BinderState::Resumed { .. } => LifecyclePhase::AttachedResumed,
        }
    }

    /// Handle to the bound screen, if attached
    pub fn screen(&self) -> Option<Arc<Mutex<S>>> {
        match &self.state {
            BinderState::Unattached => None,
            BinderState::Paused { screen, .. } | BinderState::Resumed { screen, .. } => {
                Some(screen.clone())
            }
        }
    }

    /// Attach a screen: capture its style defaults into the store and
    /// restore a previously persisted activity theme resource (when
    /// non-zero). Transitions Unattached -> AttachedPaused.
    pub fn attach(&mut self, screen: S) -> Result<()> {
        if !matches!(self.state, BinderState::Unattached) {
            return Err(ThemeError::AlreadyAttached);
        }

        self.store.capture_defaults(StyleDefaults::capture(&screen));
        let screen = Arc::new(Mutex::new(screen));

        let saved_theme = self.store.activity_theme()?;
        if saved_theme != 0 {
            screen.lock().unwrap().set_theme_resource(saved_theme)?;
        }
        tracing::debug!(theme = saved_theme, "screen attached");

        self.state = BinderState::Paused {
            screen,
            last_theme: Arc::new(Mutex::new(saved_theme)),
        };
        Ok(())
    }

    /// Subscribe the five screen-facing properties and apply their current
    /// values. Transitions to AttachedResumed; resuming while already
    /// resumed re-subscribes from scratch.
    pub fn resume(&mut self) -> Result<()> {
        let (screen, last_theme) = match std::mem::replace(&mut self.state, BinderState::Unattached)
        {
            BinderState::Unattached => return Err(ThemeError::NotAttached),
            BinderState::Paused { screen, last_theme } => (screen, last_theme),
            BinderState::Resumed {
                screen,
                last_theme,
                mut subs,
            } => {
                subs.cancel_all();
                (screen, last_theme)
            }
        };

        match self.subscribe_all(&screen, &last_theme) {
            Ok(subs) => {
                tracing::debug!(subscriptions = subs.len(), "screen resumed");
                self.state = BinderState::Resumed {
                    screen,
                    last_theme,
                    subs,
                };
                Ok(())
            }
            // A failed resume leaves the binder paused; nothing stays
            // partially subscribed because the set cancels on drop
            Err(e) => {
                self.state = BinderState::Paused { screen, last_theme };
                Err(e)
            }
        }
    }

    fn subscribe_all(
        &self,
        screen: &Arc<Mutex<S>>,
        last_theme: &Arc<Mutex<u32>>,
    ) -> Result<SubscriptionSet> {
        let mut subs = SubscriptionSet::new();

        {
            let screen = screen.clone();
            let last_theme = last_theme.clone();
            subs.add(self.store.watch_activity_theme(move |theme| {
                let mut last = last_theme.lock().unwrap();
                // Zero means "no saved theme"; unchanged values never restart
                if theme == 0 || theme == *last {
                    return Ok(());
                }
                *last = theme;
                tracing::debug!(theme, "activity theme changed, recreating screen");
                let mut screen = screen.lock().unwrap();
                screen.set_theme_resource(theme)?;
                screen.recreate()?;
                Ok(())
            })?);
        }

        {
            let store = self.store.clone();
            let screen = screen.clone();
            subs.add(
                self.store
                    .watch_status_bar_color(move |_| invalidate_status_bar(&store, &screen))?,
            );
        }

        {
            let screen = screen.clone();
            subs.add(self.store.watch_nav_bar_color(move |color| {
                screen.lock().unwrap().set_nav_bar_color(color)?;
                Ok(())
            })?);
        }

        {
            let screen = screen.clone();
            subs.add(self.store.watch_window_bg_color(move |color| {
                screen.lock().unwrap().set_window_background(color)?;
                Ok(())
            })?);
        }

        {
            let store = self.store.clone();
            let screen = screen.clone();
            subs.add(
                self.store
                    .watch_light_status_bar_mode(move |_| invalidate_status_bar(&store, &screen))?,
            );
        }

        Ok(subs)
    }

    /// Cancel all subscriptions, returning to AttachedPaused. Tolerant of
    /// being called while already paused or unattached.
    pub fn pause(&mut self) {
        match std::mem::replace(&mut self.state, BinderState::Unattached) {
            BinderState::Resumed {
                screen,
                last_theme,
                mut subs,
            } => {
                subs.cancel_all();
                tracing::debug!("screen paused");
                self.state = BinderState::Paused { screen, last_theme };
            }
            other => self.state = other,
        }
    }

    /// Tear everything down: cancel subscriptions, release the screen, and
    /// detach the store. Transitions to Unattached from any state.
    pub fn destroy(&mut self) {
        self.state = BinderState::Unattached;
        self.store.detach();
        tracing::debug!("screen binder destroyed");
    }
}

/// Apply the effective status-bar color plus the light-icon policy decision
fn invalidate_status_bar<S: Screen>(store: &ThemeStore, screen: &Arc<Mutex<S>>) -> Result<()> {
    let color = store.status_bar_color()?;
    let mode = store.light_status_bar_mode()?;
    let mut screen = screen.lock().unwrap();
    screen.set_status_bar_color(color)?;
    screen.set_light_status_bar(policy::light_status_bar(mode, color))?;
    Ok(())
}
