use std::f64::consts::PI;
use std::ops::{Add, Sub};

/// Four-momentum vector in natural units (c = 1), components in GeV.
///
/// p^μ = (E, p_x, p_y, p_z)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FourMomentum {
    pub e: f64,
    pub px: f64,
    pub py: f64,
    pub pz: f64,
}

impl FourMomentum {
    pub fn new(e: f64, px: f64, py: f64, pz: f64) -> Self {
        Self { e, px, py, pz }
    }

    /// Invariant mass squared: m² = E² - |p|²
    pub fn mass_squared(&self) -> f64 {
        self.e.powi(2) - self.p().powi(2)
    }

    /// Invariant mass. Spacelike vectors report 0.
    pub fn mass(&self) -> f64 {
        let m2 = self.mass_squared();
        if m2 >= 0.0 { m2.sqrt() } else { 0.0 }
    }

    /// Magnitude of the three-momentum.
    pub fn p(&self) -> f64 {
        (self.px.powi(2) + self.py.powi(2) + self.pz.powi(2)).sqrt()
    }

    /// Transverse momentum with respect to the beam (z) axis.
    pub fn pt(&self) -> f64 {
        self.px.hypot(self.py)
    }

    /// Azimuthal angle in (-π, π].
    pub fn phi(&self) -> f64 {
        self.py.atan2(self.px)
    }

    /// Polar angle with respect to the beam axis.
    pub fn theta(&self) -> f64 {
        self.pt().atan2(self.pz)
    }

    /// Pseudorapidity. Vectors along the beam axis map to ±∞, the null vector to 0.
    pub fn eta(&self) -> f64 {
        let pt = self.pt();
        if pt == 0.0 {
            return match self.pz {
                z if z > 0.0 => f64::INFINITY,
                z if z < 0.0 => f64::NEG_INFINITY,
                _ => 0.0,
            };
        }
        (self.pz / pt).asinh()
    }

    /// Angular distance in the (η, φ) plane.
    pub fn delta_r(&self, other: &FourMomentum) -> f64 {
        let deta = self.eta() - other.eta();
        let dphi = delta_phi(self.phi(), other.phi());
        deta.hypot(dphi)
    }
}

/// Difference of two azimuthal angles, folded into [-π, π].
pub fn delta_phi(a: f64, b: f64) -> f64 {
    let mut d = a - b;
    while d > PI {
        d -= 2.0 * PI;
    }
    while d < -PI {
        d += 2.0 * PI;
    }
    d
}

impl Add for FourMomentum {
    type Output = FourMomentum;

    fn add(self, rhs: FourMomentum) -> FourMomentum {
        FourMomentum::new(
            self.e + rhs.e,
            self.px + rhs.px,
            self.py + rhs.py,
            self.pz + rhs.pz,
        )
    }
}

impl Sub for FourMomentum {
    type Output = FourMomentum;

    fn sub(self, rhs: FourMomentum) -> FourMomentum {
        FourMomentum::new(
            self.e - rhs.e,
            self.px - rhs.px,
            self.py - rhs.py,
            self.pz - rhs.pz,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    #[test]
    fn mass_of_back_to_back_pair() {
        let a = FourMomentum::new(45.5, 0.0, 0.0, 45.5);
        let b = FourMomentum::new(45.5, 0.0, 0.0, -45.5);
        assert!(approx_eq((a + b).mass(), 91.0, 1e-9));
        assert!(approx_eq(a.mass(), 0.0, 1e-9));
    }

    #[test]
    fn spacelike_mass_is_zero() {
        let v = FourMomentum::new(1.0, 2.0, 0.0, 0.0);
        assert!(v.mass_squared() < 0.0);
        assert_eq!(v.mass(), 0.0);
    }

    #[test]
    fn transverse_quantities() {
        let v = FourMomentum::new(10.0, 3.0, 4.0, 0.0);
        assert!(approx_eq(v.pt(), 5.0, 1e-12));
        assert!(approx_eq(v.eta(), 0.0, 1e-12));
        assert!(approx_eq(v.theta(), PI / 2.0, 1e-12));
        assert!(approx_eq(v.phi(), 4.0_f64.atan2(3.0), 1e-12));
    }

    #[test]
    fn eta_on_beam_axis() {
        assert_eq!(FourMomentum::new(1.0, 0.0, 0.0, 1.0).eta(), f64::INFINITY);
        assert_eq!(FourMomentum::new(1.0, 0.0, 0.0, -1.0).eta(), f64::NEG_INFINITY);
        assert_eq!(FourMomentum::default().eta(), 0.0);
    }

    #[test]
    fn delta_phi_wraps_around() {
        let d = delta_phi(PI - 0.1, -PI + 0.1);
        assert!(approx_eq(d, -0.2, 1e-12));
    }

    #[test]
    fn delta_r_combines_eta_and_phi() {
        let a = FourMomentum::new(10.0, 10.0, 0.0, 0.0);
        let b = FourMomentum::new(10.0, 0.0, 10.0, 0.0);
        assert!(approx_eq(a.delta_r(&b), PI / 2.0, 1e-12));
    }

    #[test]
    fn subtraction_builds_recoil() {
        let beam = FourMomentum::new(240.0, 0.0, 0.0, 0.0);
        let z = FourMomentum::new(100.0, 20.0, 0.0, 0.0);
        let recoil = beam - z;
        assert_eq!(recoil, FourMomentum::new(140.0, -20.0, 0.0, 0.0));
    }
}
