//! Step-size control and track steppers for Helix.
//!
//! The [`Stepper`] trait defines the `&self` single-step advance over an
//! exclusively borrowed [`StepperState`], plus conversions of that state
//! to free ([`CurvilinearParameters`](helix_core::CurvilinearParameters))
//! and surface-bound ([`BoundParameters`](helix_core::BoundParameters))
//! track parameters.
//!
//! # Variants
//!
//! - [`StraightLineStepper`]: consumes the full constrained step, no
//!   error control
//! - [`RungeKuttaStepper`]: adaptive Runge-Kutta-Nyström integration in a
//!   [`MagneticField`]

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod constrained;
pub mod convert;
pub mod field;
pub mod runge_kutta;
pub mod state;
pub mod stepper;
pub mod straight_line;

pub use constrained::{ConstrainedStep, StepConstraint};
pub use field::{ConstantField, MagneticField, NullField};
pub use runge_kutta::{RungeKuttaConfig, RungeKuttaConfigError, RungeKuttaStepper};
pub use state::StepperState;
pub use stepper::Stepper;
pub use straight_line::StraightLineStepper;
