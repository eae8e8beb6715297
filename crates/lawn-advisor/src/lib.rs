//! Mowing advisory for the Lawn Enforcer.
//!
//! Turns a [`WeatherSnapshot`] into a GO / CAUTION / NO GO [`Verdict`] with
//! the reasons in the order the rules fired, and renders it as a terminal
//! panel.

pub mod conditions;
pub mod evaluator;
pub mod flavor;
pub mod panel;
pub mod profile;
pub mod report;
pub mod snapshot;

pub use conditions::{Assessment, GroundSource, GroundStatus, LeafStatus, PollenStatus};
pub use evaluator::{evaluate, Evaluator, MowStatus, Reason, RuleGroup, Verdict};
pub use flavor::{FixedFlavor, FlavorText, RandomFlavor};
pub use panel::render_panel;
pub use profile::RuleProfile;
pub use report::Report;
pub use snapshot::{ManualGround, ParseGroundError, WeatherSnapshot};
