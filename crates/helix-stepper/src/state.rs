//! Mutable per-run stepper state.

use helix_core::{NavigationDirection, StateError, TrackParameters, Vector3};

use crate::constrained::{ConstrainedStep, StepConstraint};

/// Kinematic state advanced by a [`Stepper`](crate::Stepper).
///
/// Owned by a single propagation run and borrowed exclusively by the
/// stepper for each step.
#[derive(Clone, Debug)]
pub struct StepperState {
    pub(crate) position: Vector3,
    pub(crate) direction: Vector3,
    pub(crate) qop: f64,
    pub(crate) charge: f64,
    pub(crate) navigation_direction: NavigationDirection,
    pub(crate) path_length: f64,
    pub(crate) step_size: ConstrainedStep,
    pub(crate) steps: u64,
}

impl StepperState {
    /// State initialised from `params`.
    ///
    /// A finite, non-zero `initial_step` seeds the
    /// [`Accuracy`](StepConstraint::Accuracy) bound; otherwise the step
    /// starts unconstrained and the caller must assert a bound before the
    /// first step.
    pub fn new<P: TrackParameters + ?Sized>(
        params: &P,
        navigation_direction: NavigationDirection,
        initial_step: f64,
    ) -> Result<Self, StateError> {
        let position = params.position();
        let momentum = params.momentum();
        let charge = params.charge();
        if !position.iter().all(|v| v.is_finite()) {
            return Err(StateError::InvalidParameters {
                reason: format!("non-finite position {position:?}"),
            });
        }
        let p = momentum.norm();
        if !p.is_finite() || p <= 0.0 {
            return Err(StateError::InvalidParameters {
                reason: format!("momentum magnitude must be positive and finite, got {p}"),
            });
        }
        if !charge.is_finite() {
            return Err(StateError::InvalidParameters {
                reason: format!("non-finite charge {charge}"),
            });
        }

        let mut step_size = ConstrainedStep::new(navigation_direction);
        if initial_step.is_finite() && initial_step != 0.0 {
            step_size.update(StepConstraint::Accuracy, initial_step);
        }

        Ok(Self {
            position,
            direction: momentum / p,
            qop: params.qop(),
            charge,
            navigation_direction,
            path_length: 0.0,
            step_size,
            steps: 0,
        })
    }

    /// Current global position.
    pub fn position(&self) -> Vector3 {
        self.position
    }

    /// Current unit direction of the momentum.
    pub fn direction(&self) -> Vector3 {
        self.direction
    }

    /// Charge over momentum (`1/p` for neutral particles).
    pub fn qop(&self) -> f64 {
        self.qop
    }

    /// Charge in units of e.
    pub fn charge(&self) -> f64 {
        self.charge
    }

    /// Absolute momentum.
    pub fn absolute_momentum(&self) -> f64 {
        if self.charge == 0.0 {
            1.0 / self.qop.abs()
        } else {
            self.charge.abs() / self.qop.abs()
        }
    }

    /// Global momentum vector.
    pub fn momentum(&self) -> Vector3 {
        self.absolute_momentum() * self.direction
    }

    /// Direction the run is navigating in.
    pub fn navigation_direction(&self) -> NavigationDirection {
        self.navigation_direction
    }

    /// Signed path length accumulated so far.
    pub fn path_length(&self) -> f64 {
        self.path_length
    }

    /// Number of successful steps taken.
    pub fn step_count(&self) -> u64 {
        self.steps
    }

    /// The constrained step size.
    pub fn step_size(&self) -> &ConstrainedStep {
        &self.step_size
    }

    /// Mutable access for navigators and aborters asserting bounds.
    pub fn step_size_mut(&mut self) -> &mut ConstrainedStep {
        &mut self.step_size
    }

    /// Curvature factor of the equation of motion, `c · q/p`, or zero for
    /// neutral particles.
    pub(crate) fn curvature(&self) -> f64 {
        if self.charge == 0.0 {
            0.0
        } else {
            helix_core::units::BFIELD_CONVERSION * self.qop
        }
    }

    pub(crate) fn advance(&mut self, position: Vector3, direction: Vector3, h: f64) {
        self.position = position;
        self.direction = direction;
        self.path_length += h;
        self.steps += 1;
    }
}

impl TrackParameters for StepperState {
    fn position(&self) -> Vector3 {
        self.position
    }

    fn momentum(&self) -> Vector3 {
        StepperState::momentum(self)
    }

    fn charge(&self) -> f64 {
        self.charge
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helix_core::CurvilinearParameters;

    fn params(charge: f64) -> CurvilinearParameters {
        CurvilinearParameters::new(
            Vector3::new(1.0, 2.0, 3.0),
            Vector3::new(0.0, 0.0, 4.0),
            charge,
        )
    }

    #[test]
    fn initialises_from_parameters() {
        let s = StepperState::new(&params(-1.0), NavigationDirection::Forward, 10.0).unwrap();
        assert_eq!(s.position(), Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(s.direction(), Vector3::z());
        assert_eq!(s.qop(), -0.25);
        assert_eq!(s.absolute_momentum(), 4.0);
        assert_eq!(s.path_length(), 0.0);
        assert_eq!(s.step_size().value(), 10.0);
        assert_eq!(s.step_size().limiting_source(), Some(StepConstraint::Accuracy));
    }

    #[test]
    fn neutral_momentum_recovered() {
        let s = StepperState::new(&params(0.0), NavigationDirection::Backward, 1.0).unwrap();
        assert_eq!(s.curvature(), 0.0);
        assert!((s.momentum() - Vector3::new(0.0, 0.0, 4.0)).norm() < 1e-12);
        assert_eq!(s.step_size().value(), -1.0);
    }

    #[test]
    fn infinite_initial_step_leaves_step_unconstrained() {
        let s = StepperState::new(&params(1.0), NavigationDirection::Forward, f64::INFINITY).unwrap();
        assert!(!s.step_size().is_constrained());
    }

    #[test]
    fn rejects_zero_momentum() {
        let bad = CurvilinearParameters::new(Vector3::zeros(), Vector3::zeros(), 1.0);
        let err = StepperState::new(&bad, NavigationDirection::Forward, 1.0).unwrap_err();
        assert!(matches!(err, StateError::InvalidParameters { .. }));
    }

    #[test]
    fn rejects_non_finite_position() {
        let bad = CurvilinearParameters::new(
            Vector3::new(f64::NAN, 0.0, 0.0),
            Vector3::x(),
            1.0,
        );
        assert!(StepperState::new(&bad, NavigationDirection::Forward, 1.0).is_err());
    }
}
