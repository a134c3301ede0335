//! Nightlight firmware — main entry point.
//!
//! Hexagonal wiring around a self-rearming one-shot timer:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  GpioLightPin     SystemClock      LogEventSink          │
//! │  (LightPin)       (Clock)          (EventSink)           │
//! │                                                          │
//! │  ────────────── Port Trait Boundary ──────────────       │
//! │                                                          │
//! │  ┌──────────────────────────────────────────────────┐    │
//! │  │        LightScheduler (pure state machine)       │    │
//! │  └──────────────────────────────────────────────────┘    │
//! │                                                          │
//! │  transition_timer (one-shot) ─▶ event queue ─▶ loop      │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::{info, warn};

use nightlight::adapters::gpio::GpioLightPin;
use nightlight::adapters::log_sink::LogEventSink;
use nightlight::adapters::time::SystemClock;
use nightlight::config::LightConfig;
use nightlight::drivers::transition_timer;
use nightlight::events::{self, Event};
use nightlight::ports::{Clock, LightPin};
use nightlight::scheduler::LightScheduler;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("nightlight v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration — validated before any pin state changes ──
    let config = LightConfig::default();
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("config rejected: {e}"))?;
    let window = config
        .window()
        .map_err(|e| anyhow::anyhow!("config rejected: {e}"))?;
    info!(
        "CONF | gpio={} window={}..{}{}",
        config.light_gpio,
        window.start(),
        window.end(),
        if window.wraps_midnight() {
            " (wraps midnight)"
        } else {
            ""
        }
    );

    // ── 3. Construct adapters ─────────────────────────────────
    let clock = SystemClock::new();
    if !clock.is_synced() {
        warn!("wall clock not synced; window is offset until NTP sets the time");
    }
    let mut pin = GpioLightPin::new(config.light_gpio);
    let mut sink = LogEventSink::new();
    let mut scheduler = LightScheduler::new(window);

    // ── 4. Initial transition + first timer ───────────────────
    transition_timer::init().map_err(|e| anyhow::anyhow!("{e}"))?;
    let wait = scheduler.start(clock.now(), &mut pin, &mut sink);
    transition_timer::arm(wait);

    info!("System ready. Entering event loop.");

    // ── 5. Event loop ─────────────────────────────────────────
    let mut shutdown = false;
    loop {
        // The timer callback pushes into the queue from the ESP timer
        // task; this loop is the single consumer. On simulation targets
        // the deadline is polled from the sleep tick instead.
        #[cfg(not(target_os = "espidf"))]
        {
            std::thread::sleep(std::time::Duration::from_secs(1));
            transition_timer::poll();
        }
        #[cfg(target_os = "espidf")]
        std::thread::sleep(std::time::Duration::from_millis(500));

        events::drain_events(|event| match event {
            Event::TransitionDue => {
                let wait = scheduler.on_transition_due(clock.now(), &mut pin, &mut sink);
                // Arm exactly one successor — on every path, or the
                // schedule stalls in its last state.
                transition_timer::arm(wait);
            }
            Event::Shutdown => {
                shutdown = true;
            }
        });

        if shutdown {
            transition_timer::stop();
            if let Err(e) = pin.deassert() {
                warn!("shutdown: could not release pin: {e}");
            }
            info!("shutdown requested; pending transition cancelled");
            break;
        }
    }

    Ok(())
}
