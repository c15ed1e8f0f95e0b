//! [`InputInjector`](crate::application::InputInjector) implementations.
//!
//! `xdotool` is the production one; `recording` backs `--dry-run` and the
//! tests.

pub mod recording;
pub mod xdotool;

pub use recording::RecordingInjector;
pub use xdotool::{InjectionError, XdotoolInjector};
