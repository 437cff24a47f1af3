//! Core of the compliance control browser.
//!
//! The pipeline is record store → filter predicate → derived view → display
//! surface. [`Session`] owns the record store and the filter criteria and is
//! driven one [`ControlEvent`] at a time; every event re-renders the whole
//! view into a [`DisplaySurface`].

pub mod animate;
pub mod filter;
pub mod session;
pub mod surface;
pub mod view;

pub use animate::{ANIMATION_STEPS, ANIMATION_TICK, CounterAnimation};
pub use filter::{apply, matches_criteria, matches_search};
pub use session::{ControlEvent, Session, StartupStats};
pub use surface::{Counter, DisplaySurface, NullSurface, RecordingSurface};
pub use view::{Badge, Card, MappingRow, ResultsBody, View};
