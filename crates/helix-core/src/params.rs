//! Track-parameter representations.
//!
//! The propagation core accepts anything implementing [`TrackParameters`]
//! as a starting point and produces either [`CurvilinearParameters`]
//! (surface-independent) or [`BoundParameters`] (expressed in a specific
//! surface's local frame).

use crate::id::SurfaceId;
use crate::math::{self, Vector2, Vector3};

/// Minimal interface required to start a propagation run.
pub trait TrackParameters {
    /// Global position.
    fn position(&self) -> Vector3;

    /// Global momentum vector (GeV/c).
    fn momentum(&self) -> Vector3;

    /// Charge in units of e; zero for neutral particles.
    fn charge(&self) -> f64;

    /// Unit direction of the momentum.
    fn direction(&self) -> Vector3 {
        self.momentum().normalize()
    }

    /// Absolute momentum.
    fn absolute_momentum(&self) -> f64 {
        self.momentum().norm()
    }

    /// Transverse momentum.
    fn transverse_momentum(&self) -> f64 {
        math::perp(&self.momentum())
    }

    /// Charge over momentum; `1/p` for neutral particles.
    fn qop(&self) -> f64 {
        let p = self.absolute_momentum();
        if self.charge() == 0.0 {
            1.0 / p
        } else {
            self.charge() / p
        }
    }
}

/// Free track parameters in the curvilinear frame at the current position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurvilinearParameters {
    position: Vector3,
    momentum: Vector3,
    charge: f64,
}

impl CurvilinearParameters {
    /// Parameters from global position, momentum and charge.
    pub fn new(position: Vector3, momentum: Vector3, charge: f64) -> Self {
        Self {
            position,
            momentum,
            charge,
        }
    }

    /// Azimuthal angle of the momentum.
    pub fn phi(&self) -> f64 {
        math::phi(&self.momentum)
    }

    /// Polar angle of the momentum.
    pub fn theta(&self) -> f64 {
        math::theta(&self.momentum)
    }

    /// The curvilinear frame `(U, V, T)`: `T` along the momentum, `U`
    /// transverse to the global z axis, `V = T × U`.
    ///
    /// Falls back to the global x axis for `U` when the track runs
    /// parallel to z.
    pub fn frame(&self) -> (Vector3, Vector3, Vector3) {
        let t = self.direction();
        let z_cross = Vector3::z().cross(&t);
        let u = if z_cross.norm() < 1e-12 {
            Vector3::x()
        } else {
            z_cross.normalize()
        };
        let v = t.cross(&u);
        (u, v, t)
    }
}

impl TrackParameters for CurvilinearParameters {
    fn position(&self) -> Vector3 {
        self.position
    }

    fn momentum(&self) -> Vector3 {
        self.momentum
    }

    fn charge(&self) -> f64 {
        self.charge
    }
}

/// Track parameters bound to a surface: local 2D position plus global
/// direction angles and charge over momentum.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundParameters {
    surface: SurfaceId,
    local: Vector2,
    position: Vector3,
    momentum: Vector3,
    charge: f64,
}

impl BoundParameters {
    /// Bound parameters on `surface`.
    ///
    /// `local` must be the surface's local representation of `position`;
    /// producing it is the caller's (usually the stepper's) job.
    pub fn new(
        surface: SurfaceId,
        local: Vector2,
        position: Vector3,
        momentum: Vector3,
        charge: f64,
    ) -> Self {
        Self {
            surface,
            local,
            position,
            momentum,
            charge,
        }
    }

    /// Surface these parameters are expressed on.
    pub fn surface(&self) -> SurfaceId {
        self.surface
    }

    /// Local position on the surface.
    pub fn local(&self) -> Vector2 {
        self.local
    }

    /// Azimuthal angle of the momentum.
    pub fn phi(&self) -> f64 {
        math::phi(&self.momentum)
    }

    /// Polar angle of the momentum.
    pub fn theta(&self) -> f64 {
        math::theta(&self.momentum)
    }

    /// The five bound parameters `(loc0, loc1, φ, θ, q/p)`.
    pub fn as_array(&self) -> [f64; 5] {
        [
            self.local.x,
            self.local.y,
            self.phi(),
            self.theta(),
            self.qop(),
        ]
    }
}

impl TrackParameters for BoundParameters {
    fn position(&self) -> Vector3 {
        self.position
    }

    fn momentum(&self) -> Vector3 {
        self.momentum
    }

    fn charge(&self) -> f64 {
        self.charge
    }
}
