//! Hardware drivers. Each module carries a host-simulation fallback so the
//! crate builds and tests off-target.

pub mod transition_timer;
