//! Conversion of a [`StepperState`] to track parameters.

use helix_core::units::ON_SURFACE_TOLERANCE;
use helix_core::{BoundParameters, ConversionError, CurvilinearParameters, Vector3};
use helix_surface::{BoundaryCheck, Surface, SurfaceKind};

use crate::state::StepperState;

/// Free parameters at the current position.
pub fn curvilinear(state: &StepperState) -> CurvilinearParameters {
    CurvilinearParameters::new(state.position(), state.momentum(), state.charge())
}

/// Parameters in `surface`'s local frame.
///
/// The state must sit on the surface within [`ON_SURFACE_TOLERANCE`],
/// bounds included; for line surfaces it must also be at the point of
/// closest approach to the line. Otherwise [`ConversionError::OffSurface`]
/// is returned.
pub fn bound(
    state: &StepperState,
    surface: &dyn Surface,
) -> Result<BoundParameters, ConversionError> {
    let position = state.position();
    let momentum = state.momentum();
    let off_surface = ConversionError::OffSurface {
        surface: surface.id(),
    };
    let check = BoundaryCheck::Tolerance {
        loc0: ON_SURFACE_TOLERANCE,
        loc1: ON_SURFACE_TOLERANCE,
    };
    if !surface.is_on_surface(&position, check)
        || !at_closest_approach(surface, &position, &state.direction())
    {
        return Err(off_surface);
    }
    let local = surface
        .global_to_local(&position, &momentum)
        .ok_or(off_surface)?;
    Ok(BoundParameters::new(
        surface.id(),
        local,
        position,
        momentum,
        state.charge(),
    ))
}

/// For line surfaces, whether the radial offset from the line is
/// perpendicular to `direction`. Always true for other kinds.
fn at_closest_approach(surface: &dyn Surface, position: &Vector3, direction: &Vector3) -> bool {
    match surface.kind() {
        SurfaceKind::Straw | SurfaceKind::Perigee => {
            let axis = surface.normal(position);
            let offset = position - surface.center();
            let radial = offset - offset.dot(&axis) * axis;
            radial.dot(direction).abs() <= ON_SURFACE_TOLERANCE
        }
        SurfaceKind::Plane | SurfaceKind::Disc | SurfaceKind::Cylinder => true,
    }
}
