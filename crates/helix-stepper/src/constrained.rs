//! A step size limited by several independently asserted bounds.
//!
//! [`ConstrainedStep`] keeps one optional bound per [`StepConstraint`]
//! source. The effective step is the tightest active bound, signed by the
//! navigation direction; sources never influence the sign.

use std::fmt;

use helix_core::NavigationDirection;

/// Who asserted a bound on the step size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StepConstraint {
    /// The stepper's own error control.
    Accuracy,
    /// Distance to a target surface.
    SurfaceDistance,
    /// A user-imposed limit (path limit, maximum step size).
    UserLimit,
    /// Distance to the next volume boundary.
    GeometryBoundary,
}

impl StepConstraint {
    /// All sources, in tie-break order.
    pub const ALL: [StepConstraint; 4] = [
        Self::Accuracy,
        Self::SurfaceDistance,
        Self::UserLimit,
        Self::GeometryBoundary,
    ];

    fn index(self) -> usize {
        match self {
            Self::Accuracy => 0,
            Self::SurfaceDistance => 1,
            Self::UserLimit => 2,
            Self::GeometryBoundary => 3,
        }
    }
}

impl fmt::Display for StepConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accuracy => write!(f, "accuracy"),
            Self::SurfaceDistance => write!(f, "surface distance"),
            Self::UserLimit => write!(f, "user limit"),
            Self::GeometryBoundary => write!(f, "geometry boundary"),
        }
    }
}

/// Signed step size with per-source upper bounds on its magnitude.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstrainedStep {
    bounds: [Option<f64>; 4],
    direction: NavigationDirection,
}

impl ConstrainedStep {
    /// Magnitude reported while no source is active.
    pub const UNCONSTRAINED: f64 = f64::MAX;

    /// An unconstrained step in `direction`.
    pub fn new(direction: NavigationDirection) -> Self {
        Self {
            bounds: [None; 4],
            direction,
        }
    }

    /// Assert that `source` now limits the step magnitude to `|bound|`,
    /// replacing any earlier bound from the same source.
    ///
    /// A NaN bound is ignored.
    pub fn update(&mut self, source: StepConstraint, bound: f64) {
        if bound.is_nan() {
            return;
        }
        self.bounds[source.index()] = Some(bound.abs());
    }

    /// Remove the bound asserted by `source`.
    pub fn release(&mut self, source: StepConstraint) {
        self.bounds[source.index()] = None;
    }

    /// Drop the bounds the navigator re-asserts on every step.
    pub fn release_navigation(&mut self) {
        self.release(StepConstraint::SurfaceDistance);
        self.release(StepConstraint::GeometryBoundary);
    }

    /// The bound currently asserted by `source`, as a magnitude.
    pub fn bound(&self, source: StepConstraint) -> Option<f64> {
        self.bounds[source.index()]
    }

    /// Effective step magnitude.
    pub fn magnitude(&self) -> f64 {
        self.bounds
            .iter()
            .flatten()
            .copied()
            .fold(Self::UNCONSTRAINED, f64::min)
    }

    /// Effective signed step: the tightest bound, signed by the navigation
    /// direction.
    pub fn value(&self) -> f64 {
        self.direction.sign() * self.magnitude()
    }

    /// The source whose bound is effective; ties go to the earlier source
    /// in [`StepConstraint::ALL`].
    pub fn limiting_source(&self) -> Option<StepConstraint> {
        let mut best: Option<(StepConstraint, f64)> = None;
        for source in StepConstraint::ALL {
            if let Some(bound) = self.bound(source) {
                match best {
                    Some((_, current)) if current <= bound => {}
                    _ => best = Some((source, bound)),
                }
            }
        }
        best.map(|(source, _)| source)
    }

    /// Whether any source is active.
    pub fn is_constrained(&self) -> bool {
        self.bounds.iter().any(Option::is_some)
    }

    /// Navigation direction carried by the sign of [`value`](Self::value).
    pub fn navigation_direction(&self) -> NavigationDirection {
        self.direction
    }
}

impl fmt::Display for ConstrainedStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.limiting_source() {
            Some(source) => write!(f, "{} ({source})", self.value()),
            None => write!(f, "unconstrained ({})", self.direction),
        }
    }
}
