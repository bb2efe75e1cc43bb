//! Walks a headless screen through the attach/resume lifecycle and recolors
//! it from the theme store.
//!
//! Run with `RUST_LOG=tinct_theme=debug` to watch commits and deliveries.

use tinct_core::Color;
use tinct_platform::HeadlessScreen;
use tinct_theme::{AutoSwitchMode, ScreenBinder, ThemeStore, PREFS_FILE_NAME};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let dir = tempfile::tempdir()?;
    let store = ThemeStore::open(dir.path().join(PREFS_FILE_NAME))?;

    let mut binder = ScreenBinder::new(&store);
    binder.attach(HeadlessScreen::new())?;
    binder.resume()?;

    println!("first launch: {}", store.is_first_time()?);

    store.set_primary_color(Color::from_hex(0x00695C))?;
    store.set_status_bar_color_auto()?;
    store.set_nav_bar_color_auto()?;
    store.set_window_bg_color(Color::from_hex(0xFAFAFA));
    store.set_light_status_bar_mode(AutoSwitchMode::Auto);
    store.apply()?;

    let screen = binder.screen().expect("attached");
    for effect in screen.lock().unwrap().effects() {
        println!("applied: {effect:?}");
    }

    binder.pause();
    binder.destroy();
    Ok(())
}
