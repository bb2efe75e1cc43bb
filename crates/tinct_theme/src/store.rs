//! The theme property store
//!
//! [`ThemeStore`] wraps the persisted preference table and pushes committed
//! changes to registered observers. It is caller-owned: an application-level
//! container constructs one and hands cheap clones of the handle to each
//! screen, instead of parking a singleton in a static.
//!
//! # Edit batching and the ordering contract
//!
//! Setters stage writes into a pending edit batch that [`ThemeStore::apply`]
//! commits in one atomic file write. The one exception is
//! [`ThemeStore::set_primary_color`], which commits synchronously (flushing
//! the batch) so that [`ThemeStore::set_status_bar_color_auto`] and
//! [`ThemeStore::set_nav_bar_color_auto`] derive from a fresh primary color.
//! This asymmetry is a deliberate, documented contract, not an oversight.
//!
//! # Delivery
//!
//! Observers run on the committing thread, which is expected to be the UI
//! thread; delivery is distinct-until-changed per observer, so one side
//! effect per value change is ever in flight. Observers are independent: a
//! failing observer is logged and skipped over, the remaining observers
//! still receive their values, and the first error is returned to the
//! committer afterwards. An observer may commit from inside its own
//! callback; the resulting deliveries are queued and dispatched after the
//! callback returns (their errors surface to the outermost committer).

use crate::error::{Result, ThemeError};
use crate::keys::ThemeKey;
use crate::policy::AutoSwitchMode;
use crate::prefs::{PrefFile, PrefValue};
use crate::watch::Subscription;
use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tinct_core::{Color, DARKEN_FACTOR};
use tinct_platform::StyleDefaults;

pub(crate) type WatchCallback = Arc<Mutex<dyn FnMut(PrefValue) -> Result<()> + Send>>;

/// One undelivered observer notification: (key, subscriber id, callback, value)
type Delivery = (ThemeKey, u64, WatchCallback, PrefValue);

struct SubEntry {
    key: ThemeKey,
    /// Last value the callback accepted, for duplicate suppression.
    /// Updated only after a successful delivery so a failed observer is
    /// retried on the next change.
    last: Option<PrefValue>,
    callback: WatchCallback,
}

pub(crate) struct StoreInner {
    prefs: PrefFile,
    staged: FxHashMap<ThemeKey, PrefValue>,
    defaults: Option<StyleDefaults>,
    subscribers: FxHashMap<u64, SubEntry>,
    next_sub_id: u64,
    /// Notifications queued under the lock and dispatched outside it
    pending: VecDeque<Delivery>,
    /// True while a dispatch loop is draining `pending`; re-entrant commits
    /// enqueue and leave draining to the outermost loop
    dispatching: bool,
}

impl StoreInner {
    pub(crate) fn remove_subscriber(&mut self, id: u64) {
        self.subscribers.remove(&id);
    }
}

/// Resolve a key to its current value: stored if present, else the default
/// derived from the attached screen's style.
fn resolve_value(prefs: &PrefFile, defaults: &StyleDefaults, key: ThemeKey) -> PrefValue {
    if let Some(value) = prefs.get(key) {
        return value;
    }
    match key {
        ThemeKey::FirstTime => PrefValue::Bool(true),
        ThemeKey::ActivityTheme => PrefValue::Int(0),
        ThemeKey::IsDark => PrefValue::Bool(false),
        ThemeKey::PrimaryColor => color_value(defaults.color_primary),
        ThemeKey::AccentColor => color_value(defaults.color_accent),
        ThemeKey::PrimaryTextColor => color_value(defaults.text_color_primary),
        ThemeKey::SecondaryTextColor => color_value(defaults.text_color_secondary),
        ThemeKey::PrimaryTextInverseColor => color_value(defaults.text_color_primary_inverse),
        ThemeKey::SecondaryTextInverseColor => color_value(defaults.text_color_secondary_inverse),
        ThemeKey::WindowBgColor => color_value(defaults.window_background),
        ThemeKey::StatusBarColor => color_value(defaults.color_primary_dark),
        ThemeKey::NavBarColor => color_value(Color::BLACK),
        ThemeKey::LightStatusMode => PrefValue::Int(AutoSwitchMode::Auto.as_int()),
    }
}

fn color_value(color: Color) -> PrefValue {
    PrefValue::Int(color.to_argb() as i64)
}

fn as_color(value: PrefValue) -> Color {
    match value {
        PrefValue::Int(argb) => Color::from_argb(argb as u32),
        PrefValue::Bool(_) => Color::default(),
    }
}

fn as_bool(value: PrefValue) -> bool {
    match value {
        PrefValue::Bool(b) => b,
        PrefValue::Int(i) => i != 0,
    }
}

fn as_int(value: PrefValue) -> i64 {
    match value {
        PrefValue::Int(i) => i,
        PrefValue::Bool(b) => b as i64,
    }
}

/// Caller-owned theme configuration store.
///
/// Cloning produces another handle to the same store; all screens observing
/// the same store see the same values.
#[derive(Clone)]
pub struct ThemeStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl ThemeStore {
    /// Open (or create) the preference file at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let prefs = PrefFile::load(path.as_ref())?;
        Ok(Self {
            inner: Arc::new(Mutex::new(StoreInner {
                prefs,
                staged: FxHashMap::default(),
                defaults: None,
                subscribers: FxHashMap::default(),
                next_sub_id: 0,
                pending: VecDeque::new(),
                dispatching: false,
            })),
        })
    }

    /// Capture style defaults from an attaching screen.
    ///
    /// Until this has happened, every accessor fails with
    /// [`ThemeError::NotAttached`].
    pub fn capture_defaults(&self, defaults: StyleDefaults) {
        self.inner.lock().unwrap().defaults = Some(defaults);
        tracing::debug!("style defaults captured");
    }

    /// Drop the captured defaults, returning accessors to the fail-fast
    /// unattached state. Stored values are unaffected.
    pub fn detach(&self) {
        self.inner.lock().unwrap().defaults = None;
        tracing::debug!("theme store detached");
    }

    pub fn is_attached(&self) -> bool {
        self.inner.lock().unwrap().defaults.is_some()
    }

    /// True exactly once per fresh preference file; persists `false`
    /// immediately on first read.
    pub fn is_first_time(&self) -> Result<bool> {
        let first = as_bool(self.peek(ThemeKey::FirstTime)?);
        if first {
            self.commit_and_deliver(false, &[(ThemeKey::FirstTime, PrefValue::Bool(false))])?;
        }
        Ok(first)
    }

    /// Commit the pending edit batch and notify observers of changes
    pub fn apply(&self) -> Result<()> {
        self.commit_and_deliver(true, &[])
    }

    // ========== Setters (staged until `apply`) ==========

    pub fn set_activity_theme(&self, resource_id: u32) {
        self.stage(ThemeKey::ActivityTheme, PrefValue::Int(resource_id as i64));
    }

    pub fn set_is_dark(&self, dark: bool) {
        self.stage(ThemeKey::IsDark, PrefValue::Bool(dark));
    }

    /// Set the primary color.
    ///
    /// Commits synchronously (flushing the pending batch) so the `*_auto`
    /// derivations observe the fresh value; see the module docs for the
    /// ordering contract.
    pub fn set_primary_color(&self, color: Color) -> Result<()> {
        self.stage(ThemeKey::PrimaryColor, color_value(color));
        self.apply()
    }

    pub fn set_accent_color(&self, color: Color) {
        self.stage(ThemeKey::AccentColor, color_value(color));
    }

    pub fn set_primary_text_color(&self, color: Color) {
        self.stage(ThemeKey::PrimaryTextColor, color_value(color));
    }

    pub fn set_secondary_text_color(&self, color: Color) {
        self.stage(ThemeKey::SecondaryTextColor, color_value(color));
    }

    pub fn set_primary_text_inverse_color(&self, color: Color) {
        self.stage(ThemeKey::PrimaryTextInverseColor, color_value(color));
    }

    pub fn set_secondary_text_inverse_color(&self, color: Color) {
        self.stage(ThemeKey::SecondaryTextInverseColor, color_value(color));
    }

    pub fn set_window_bg_color(&self, color: Color) {
        self.stage(ThemeKey::WindowBgColor, color_value(color));
    }

    pub fn set_status_bar_color(&self, color: Color) {
        self.stage(ThemeKey::StatusBarColor, color_value(color));
    }

    /// Stage the status-bar color derived from the current primary color,
    /// darkened by the fixed factor
    pub fn set_status_bar_color_auto(&self) -> Result<()> {
        let primary = self.primary_color()?;
        self.stage(
            ThemeKey::StatusBarColor,
            color_value(primary.darken(DARKEN_FACTOR)),
        );
        Ok(())
    }

    pub fn set_nav_bar_color(&self, color: Color) {
        self.stage(ThemeKey::NavBarColor, color_value(color));
    }

    /// Stage the nav-bar color derived from the current primary color:
    /// black when the primary reads as light, else the primary itself
    pub fn set_nav_bar_color_auto(&self) -> Result<()> {
        let primary = self.primary_color()?;
        let color = if primary.is_light() {
            Color::BLACK
        } else {
            primary
        };
        self.stage(ThemeKey::NavBarColor, color_value(color));
        Ok(())
    }

    pub fn set_light_status_bar_mode(&self, mode: AutoSwitchMode) {
        self.stage(ThemeKey::LightStatusMode, PrefValue::Int(mode.as_int()));
    }

    // ========== Peek accessors (current resolved value, no subscription) ==========

    pub fn activity_theme(&self) -> Result<u32> {
        Ok(as_int(self.peek(ThemeKey::ActivityTheme)?) as u32)
    }

    pub fn is_dark(&self) -> Result<bool> {
        Ok(as_bool(self.peek(ThemeKey::IsDark)?))
    }

    pub fn primary_color(&self) -> Result<Color> {
        Ok(as_color(self.peek(ThemeKey::PrimaryColor)?))
    }

    pub fn accent_color(&self) -> Result<Color> {
        Ok(as_color(self.peek(ThemeKey::AccentColor)?))
    }

    pub fn primary_text_color(&self) -> Result<Color> {
        Ok(as_color(self.peek(ThemeKey::PrimaryTextColor)?))
    }

    pub fn secondary_text_color(&self) -> Result<Color> {
        Ok(as_color(self.peek(ThemeKey::SecondaryTextColor)?))
    }

    pub fn primary_text_inverse_color(&self) -> Result<Color> {
        Ok(as_color(self.peek(ThemeKey::PrimaryTextInverseColor)?))
    }

    pub fn secondary_text_inverse_color(&self) -> Result<Color> {
        Ok(as_color(self.peek(ThemeKey::SecondaryTextInverseColor)?))
    }

    pub fn window_bg_color(&self) -> Result<Color> {
        Ok(as_color(self.peek(ThemeKey::WindowBgColor)?))
    }

    pub fn status_bar_color(&self) -> Result<Color> {
        Ok(as_color(self.peek(ThemeKey::StatusBarColor)?))
    }

    pub fn nav_bar_color(&self) -> Result<Color> {
        Ok(as_color(self.peek(ThemeKey::NavBarColor)?))
    }

    pub fn light_status_bar_mode(&self) -> Result<AutoSwitchMode> {
        Ok(AutoSwitchMode::from_int(as_int(
            self.peek(ThemeKey::LightStatusMode)?,
        )))
    }

    // ========== Watchers ==========
    //
    // Subscribing delivers the current resolved value immediately, then
    // every committed change, deduplicated per observer.

    pub fn watch_activity_theme<F>(&self, mut f: F) -> Result<Subscription>
    where
        F: FnMut(u32) -> Result<()> + Send + 'static,
    {
        self.watch_key(ThemeKey::ActivityTheme, move |v| f(as_int(v) as u32))
    }

    pub fn watch_is_dark<F>(&self, mut f: F) -> Result<Subscription>
    where
        F: FnMut(bool) -> Result<()> + Send + 'static,
    {
        self.watch_key(ThemeKey::IsDark, move |v| f(as_bool(v)))
    }

    pub fn watch_primary_color<F>(&self, f: F) -> Result<Subscription>
    where
        F: FnMut(Color) -> Result<()> + Send + 'static,
    {
        self.watch_color(ThemeKey::PrimaryColor, f)
    }

    pub fn watch_accent_color<F>(&self, f: F) -> Result<Subscription>
    where
        F: FnMut(Color) -> Result<()> + Send + 'static,
    {
        self.watch_color(ThemeKey::AccentColor, f)
    }

    pub fn watch_primary_text_color<F>(&self, f: F) -> Result<Subscription>
    where
        F: FnMut(Color) -> Result<()> + Send + 'static,
    {
        self.watch_color(ThemeKey::PrimaryTextColor, f)
    }

    pub fn watch_secondary_text_color<F>(&self, f: F) -> Result<Subscription>
    where
        F: FnMut(Color) -> Result<()> + Send + 'static,
    {
        self.watch_color(ThemeKey::SecondaryTextColor, f)
    }

    pub fn watch_primary_text_inverse_color<F>(&self, f: F) -> Result<Subscription>
    where
        F: FnMut(Color) -> Result<()> + Send + 'static,
    {
        self.watch_color(ThemeKey::PrimaryTextInverseColor, f)
    }

    pub fn watch_secondary_text_inverse_color<F>(&self, f: F) -> Result<Subscription>
    where
        F: FnMut(Color) -> Result<()> + Send + 'static,
    {
        self.watch_color(ThemeKey::SecondaryTextInverseColor, f)
    }

    pub fn watch_window_bg_color<F>(&self, f: F) -> Result<Subscription>
    where
        F: FnMut(Color) -> Result<()> + Send + 'static,
    {
        self.watch_color(ThemeKey::WindowBgColor, f)
    }

    pub fn watch_status_bar_color<F>(&self, f: F) -> Result<Subscription>
    where
        F: FnMut(Color) -> Result<()> + Send + 'static,
    {
        self.watch_color(ThemeKey::StatusBarColor, f)
    }

    pub fn watch_nav_bar_color<F>(&self, f: F) -> Result<Subscription>
    where
        F: FnMut(Color) -> Result<()> + Send + 'static,
    {
        self.watch_color(ThemeKey::NavBarColor, f)
    }

    pub fn watch_light_status_bar_mode<F>(&self, mut f: F) -> Result<Subscription>
    where
        F: FnMut(AutoSwitchMode) -> Result<()> + Send + 'static,
    {
        self.watch_key(ThemeKey::LightStatusMode, move |v| {
            f(AutoSwitchMode::from_int(as_int(v)))
        })
    }

    // ========== Internals ==========

    fn stage(&self, key: ThemeKey, value: PrefValue) {
        tracing::trace!(?key, "staging theme write");
        self.inner.lock().unwrap().staged.insert(key, value);
    }

    fn peek(&self, key: ThemeKey) -> Result<PrefValue> {
        let inner = self.inner.lock().unwrap();
        let defaults = inner.defaults.as_ref().ok_or(ThemeError::NotAttached)?;
        Ok(resolve_value(&inner.prefs, defaults, key))
    }

    fn watch_color<F>(&self, key: ThemeKey, mut f: F) -> Result<Subscription>
    where
        F: FnMut(Color) -> Result<()> + Send + 'static,
    {
        self.watch_key(key, move |v| f(as_color(v)))
    }

    fn watch_key<F>(&self, key: ThemeKey, f: F) -> Result<Subscription>
    where
        F: FnMut(PrefValue) -> Result<()> + Send + 'static,
    {
        let callback: WatchCallback = Arc::new(Mutex::new(f));
        let (value, id, drain) = {
            let mut inner = self.inner.lock().unwrap();
            let defaults = inner.defaults.as_ref().ok_or(ThemeError::NotAttached)?;
            let value = resolve_value(&inner.prefs, defaults, key);
            let id = inner.next_sub_id;
            inner.next_sub_id += 1;
            inner.subscribers.insert(
                id,
                SubEntry {
                    key,
                    last: Some(value),
                    callback: callback.clone(),
                },
            );
            // Hold the dispatch flag across the initial delivery so a commit
            // made inside the observer queues instead of dispatching into
            // the observer's own locked callback
            let drain = !inner.dispatching;
            inner.dispatching = true;
            (value, id, drain)
        };

        // Continuous semantics: deliver the current value on subscribe,
        // outside the lock so the observer may re-enter the store.
        if let Err(e) = (*callback.lock().unwrap())(value) {
            tracing::error!(?key, error = %e, "theme subscriber failed on initial delivery");
            self.inner.lock().unwrap().remove_subscriber(id);
            if drain {
                if let Err(e) = self.dispatch_pending() {
                    tracing::error!(error = %e, "theme subscriber failed during subscribe");
                }
            }
            return Err(e);
        }
        if drain {
            self.dispatch_pending()?;
        }
        Ok(Subscription::new(Arc::downgrade(&self.inner), id))
    }

    /// Commit writes (the staged batch, extra direct writes, or both),
    /// persist, and push changed values to observers.
    ///
    /// When called from inside an observer callback the notifications are
    /// queued; the outermost dispatch loop delivers them after the current
    /// callback returns and reports their errors to its committer.
    fn commit_and_deliver(
        &self,
        take_staged: bool,
        direct: &[(ThemeKey, PrefValue)],
    ) -> Result<()> {
        {
            let mut inner = self.inner.lock().unwrap();

            let mut writes: Vec<(ThemeKey, PrefValue)> = Vec::new();
            if take_staged {
                // Fixed key order keeps delivery deterministic
                for key in ThemeKey::ALL {
                    if let Some(value) = inner.staged.remove(&key) {
                        writes.push((key, value));
                    }
                }
            }
            writes.extend_from_slice(direct);
            if writes.is_empty() {
                return Ok(());
            }

            let changed = inner.prefs.commit(&writes)?;
            let deliveries = collect_deliveries(&mut inner, &changed);
            inner.pending.extend(deliveries);
            if inner.dispatching {
                return Ok(());
            }
            inner.dispatching = true;
        }
        self.dispatch_pending()
    }

    /// Drain the pending queue with the store lock released around each
    /// callback. Observers are independent: a failure is logged and skipped,
    /// and the first error is returned once the queue is empty.
    fn dispatch_pending(&self) -> Result<()> {
        let mut first_err = None;
        loop {
            let (key, id, callback, value) = {
                let mut inner = self.inner.lock().unwrap();
                loop {
                    match inner.pending.pop_front() {
                        // Cancelled between enqueue and delivery
                        Some((_, id, _, _)) if !inner.subscribers.contains_key(&id) => continue,
                        Some(delivery) => break delivery,
                        None => {
                            inner.dispatching = false;
                            return match first_err {
                                Some(e) => Err(e),
                                None => Ok(()),
                            };
                        }
                    }
                }
            };

            tracing::trace!(?key, "delivering theme value");
            match (*callback.lock().unwrap())(value) {
                Ok(()) => {
                    let mut inner = self.inner.lock().unwrap();
                    if let Some(entry) = inner.subscribers.get_mut(&id) {
                        entry.last = Some(value);
                    }
                }
                Err(e) => {
                    tracing::error!(?key, error = %e, "theme subscriber failed");
                    if first_err.is_none() {
                        first_err = Some(e);
                    }
                }
            };
        }
    }
}

/// Gather the notifications a commit owes its observers, deduplicated against
/// each observer's last accepted value. The records themselves are updated by
/// the dispatch loop on success, not here.
fn collect_deliveries(inner: &mut StoreInner, changed: &[ThemeKey]) -> Vec<Delivery> {
    let StoreInner {
        prefs,
        defaults,
        subscribers,
        ..
    } = inner;
    // No deliveries while detached; observers re-subscribe on resume
    let Some(defaults) = defaults.as_ref() else {
        return Vec::new();
    };
    if subscribers.is_empty() {
        return Vec::new();
    }

    let mut out = Vec::new();
    for key in ThemeKey::ALL {
        if !changed.contains(&key) {
            continue;
        }
        let value = resolve_value(prefs, defaults, key);
        let mut ids: Vec<u64> = subscribers
            .iter()
            .filter(|(_, entry)| entry.key == key)
            .map(|(id, _)| *id)
            .collect();
        ids.sort_unstable();
        for id in ids {
            let entry = subscribers.get(&id).expect("subscriber id just listed");
            if entry.last != Some(value) {
                out.push((key, id, entry.callback.clone(), value));
            }
        }
    }
    out
}
