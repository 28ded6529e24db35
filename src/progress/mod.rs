//! Progress widgets bound to fetches.
//!
//! - `controller` - [`ProgressBarController`], which owns the widget lifecycle
//! - `view` - The [`StatusView`] seam the controller draws through
//! - `timer` - [`HideTimer`], the cancellable delayed hide
//! - [`dom`] - An element tree following the page markup contract
//! - `terminal` - [`TerminalStatus`], indicatif rendering
//! - `style` - [`ProgressBarOpts`] for terminal bars

pub(crate) mod controller;
pub mod dom;
pub(crate) mod style;
pub(crate) mod terminal;
pub(crate) mod timer;
pub(crate) mod view;

pub use controller::{ProgressBarController, HIDE_DELAY};
pub use dom::{Document, DomBar, DomStatus};
pub use style::ProgressBarOpts;
pub use terminal::TerminalStatus;
pub use timer::HideTimer;
pub use view::StatusView;
