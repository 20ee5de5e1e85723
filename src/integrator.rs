//! Fixed-step fourth-order Runge-Kutta integration of planar point-mass motion.
//!
//! The equations of motion are supplied through [`AccelerationLaw`]; the
//! device's Lorentz force is provided by [`LorentzForce`]. Step size is fixed so
//! that plate-crossing geometry is reproducible across parameter sweeps.

use crate::constants::EPSILON;
use crate::fields::{deflecting_field, magnetic_field};
use crate::math::{PhaseVector, Scalar, R2};
use crate::params::{ParticleVariant, SimulationParameters};

/// Position and velocity of the particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicState {
    /// Position `(x, y)`.
    pub position: R2,
    /// Velocity `(vx, vy)`.
    pub velocity: R2,
}

impl KinematicState {
    /// Creates a state from position and velocity components.
    #[must_use]
    pub fn new(x: Scalar, y: Scalar, vx: Scalar, vy: Scalar) -> Self {
        Self {
            position: R2::new(x, y),
            velocity: R2::new(vx, vy),
        }
    }

    /// Horizontal position.
    #[inline]
    #[must_use]
    pub fn x(&self) -> Scalar {
        self.position.x
    }

    /// Vertical position.
    #[inline]
    #[must_use]
    pub fn y(&self) -> Scalar {
        self.position.y
    }

    /// Magnitude of the velocity.
    #[must_use]
    pub fn speed(&self) -> Scalar {
        self.velocity.norm()
    }

    fn to_phase(self) -> PhaseVector {
        PhaseVector::new(self.position.x, self.position.y, self.velocity.x, self.velocity.y)
    }

    fn from_phase(v: &PhaseVector) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

/// Acceleration acting on the particle at a given state.
pub trait AccelerationLaw {
    /// Returns `(ax, ay)` for a particle at `position` moving with `velocity`.
    fn acceleration(&self, position: R2, velocity: R2) -> R2;
}

impl<F> AccelerationLaw for F
where
    F: Fn(R2, R2) -> R2,
{
    fn acceleration(&self, position: R2, velocity: R2) -> R2 {
        self(position, velocity)
    }
}

/// Planar Lorentz force of the device for one particle variant.
///
/// ```text
/// ax = qm · vy · Bz
/// ay = qm · (Ey − vx · Bz)
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LorentzForce<'a> {
    params: &'a SimulationParameters,
    charge_to_mass: Scalar,
    height: Scalar,
}

impl<'a> LorentzForce<'a> {
    /// Builds the force law for `variant` under `params`.
    #[must_use]
    pub fn new(params: &'a SimulationParameters, variant: ParticleVariant) -> Self {
        Self {
            params,
            charge_to_mass: params.charge_to_mass_ratio(variant),
            height: params.effective_height(),
        }
    }

    /// Charge-to-mass ratio `qm` used by this law.
    #[must_use]
    pub fn charge_to_mass(&self) -> Scalar {
        self.charge_to_mass
    }

    /// Launch state: just above the strip at the origin, moving straight up with
    /// the speed gained across the operating voltage (clamped at zero).
    #[must_use]
    pub fn initial_state(&self) -> KinematicState {
        let voltage = self.params.operating_voltage().max(0.0);
        let v0 = (2.0 * self.charge_to_mass * voltage).sqrt();
        KinematicState::new(0.0, EPSILON * self.params.length, 0.0, v0)
    }
}

impl AccelerationLaw for LorentzForce<'_> {
    fn acceleration(&self, position: R2, velocity: R2) -> R2 {
        let bz = magnetic_field(position.y, self.params.field_strength, self.height);
        let ey = deflecting_field(position.x, position.y, self.params, self.height);
        let qm = self.charge_to_mass;
        R2::new(qm * velocity.y * bz, qm * (ey - velocity.x * bz))
    }
}

fn derivative<A: AccelerationLaw + ?Sized>(law: &A, s: &PhaseVector) -> PhaseVector {
    let a = law.acceleration(R2::new(s[0], s[1]), R2::new(s[2], s[3]));
    PhaseVector::new(s[2], s[3], a.x, a.y)
}

/// Advances `state` by one classical RK4 step of size `dt`.
#[must_use]
pub fn rk4_step<A: AccelerationLaw + ?Sized>(
    law: &A,
    state: &KinematicState,
    dt: Scalar,
) -> KinematicState {
    let s = state.to_phase();
    let k1 = derivative(law, &s);
    let k2 = derivative(law, &(s + k1 * (0.5 * dt)));
    let k3 = derivative(law, &(s + k2 * (0.5 * dt)));
    let k4 = derivative(law, &(s + k3 * dt));
    let next = s + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (dt / 6.0);
    KinematicState::from_phase(&next)
}
