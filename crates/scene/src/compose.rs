//! Model-transform composition for orbiting bodies.
//!
//! A body's world matrix is built in a fixed order, each stage applied in the
//! frame established by the previous ones:
//!
//! 1. parent transform (identity for planets, the planet matrix for its ring)
//! 2. orbit stage: incline the orbital plane about X, then translate onto the
//!    circular orbit
//! 3. local stage: lift (+90° about X, so the sphere's generated poles stand
//!    on the world vertical), axial tilt about Z, spin about Z, uniform scale
//!
//! The ordering is load-bearing. Tilting before the lift would tilt the orbit
//! instead of the spin axis; translating before the inclination would lift the
//! whole orbit ring off its plane.

use crate::bodies::OrbitBody;
use glam::{Mat4, Vec3};
use std::f32::consts::FRAC_PI_2;

/// Compose a body's world transform at `t` seconds of elapsed time.
///
/// Pure function of its inputs: angles come straight from `t` times the
/// body's constant rates, so there is no accumulated state and no drift.
pub fn compose(body: &OrbitBody, parent: Mat4, t: f32) -> Mat4 {
    let mut model = parent;

    // Orbit stage.
    if body.orbit_incl_deg != 0.0 {
        model *= Mat4::from_rotation_x(body.orbit_incl_deg.to_radians());
    }
    let orbit_angle = t * body.orbit_speed_deg.to_radians();
    model *= Mat4::from_translation(Vec3::new(
        orbit_angle.cos() * body.orbit_radius,
        0.0,
        orbit_angle.sin() * body.orbit_radius,
    ));

    // Local stage: lift, then tilt, then the daily spin, then size.
    model *= Mat4::from_rotation_x(FRAC_PI_2);
    if body.axial_tilt_deg != 0.0 {
        model *= Mat4::from_rotation_z(body.axial_tilt_deg.to_radians());
    }
    model *= Mat4::from_rotation_z(t * body.spin_deg.to_radians());
    model *= Mat4::from_scale(Vec3::splat(body.scale));

    model
}

/// Derive a ring's transform from its planet's fully composed matrix.
///
/// Undoing the lift (−90° about X) before scaling puts the annulus back flat
/// in the orbital reference plane while it keeps inheriting the planet's
/// orbital position, tilt and spin. Spin and tilt rotate about the ring's own
/// normal after the round trip, so the band stays flat no matter how fast the
/// planet turns.
pub fn ring_transform(planet: Mat4, ring_scale: f32) -> Mat4 {
    planet * Mat4::from_rotation_x(-FRAC_PI_2) * Mat4::from_scale(Vec3::splat(ring_scale))
}

/// Static transform for the sun: sits at the origin, lifted like the planets
/// so its texture poles are vertical, at a fixed scale.
pub fn sun_transform(scale: f32) -> Mat4 {
    Mat4::from_rotation_x(FRAC_PI_2) * Mat4::from_scale(Vec3::splat(scale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    fn test_body() -> OrbitBody {
        OrbitBody {
            name: "test",
            orbit_radius: 2.5,
            orbit_speed_deg: 20.0,
            axial_tilt_deg: 0.0,
            spin_deg: -80.0,
            scale: 0.25,
            orbit_incl_deg: 0.0,
            texture: "",
            ring: None,
        }
    }

    fn translation(m: Mat4) -> Vec3 {
        m.w_axis.truncate()
    }

    #[test]
    fn compose_is_deterministic() {
        let body = test_body();
        let a = compose(&body, Mat4::IDENTITY, 3.7);
        let b = compose(&body, Mat4::IDENTITY, 3.7);
        assert_eq!(a.to_cols_array(), b.to_cols_array());
    }

    #[test]
    fn starts_on_positive_x_axis() {
        let body = test_body();
        let model = compose(&body, Mat4::IDENTITY, 0.0);
        let pos = translation(model);
        assert!((pos - Vec3::new(2.5, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn half_period_reaches_opposite_side() {
        // 20°/s for 9 s = 180° of orbital angle.
        let body = test_body();
        let model = compose(&body, Mat4::IDENTITY, 9.0);
        let pos = translation(model);
        assert!((pos - Vec3::new(-2.5, 0.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn full_period_wraps_to_same_position() {
        let body = test_body();
        let period = 360.0 / body.orbit_speed_deg;
        let t = 4.2;
        let a = translation(compose(&body, Mat4::IDENTITY, t));
        let b = translation(compose(&body, Mat4::IDENTITY, t + period));
        assert!((a - b).length() < 1e-3);
    }

    #[test]
    fn inclination_rotates_orbit_plane_about_x() {
        let mut body = test_body();
        body.orbit_incl_deg = 90.0;
        // At a quarter period the flat orbit sits at (0, 0, r); a 90°
        // inclination about X folds that onto the Y axis.
        let quarter = 90.0 / body.orbit_speed_deg;
        let pos = translation(compose(&body, Mat4::IDENTITY, quarter));
        assert!(pos.x.abs() < 1e-3);
        assert!(pos.z.abs() < 1e-3);
        assert!((pos.y.abs() - 2.5).abs() < 1e-3);
    }

    #[test]
    fn uniform_scale_applies_last() {
        let body = test_body();
        let model = compose(&body, Mat4::IDENTITY, 0.0);
        // Basis vectors carry the uniform scale; translation does not.
        assert!((model.x_axis.truncate().length() - 0.25).abs() < 1e-5);
        assert!((model.y_axis.truncate().length() - 0.25).abs() < 1e-5);
        assert!((model.z_axis.truncate().length() - 0.25).abs() < 1e-5);
    }

    #[test]
    fn ring_stays_flat_under_planet_spin() {
        let mut body = test_body();
        body.axial_tilt_deg = 26.7;
        body.spin_deg = 150.0;
        for &t in &[0.0_f32, 0.31, 2.5, 7.9] {
            let planet = compose(&body, Mat4::IDENTITY, t);
            let ring = ring_transform(planet, 1.4);
            // The ring's local +Y (its surface normal) must stay the world
            // vertical regardless of spin angle.
            let y_basis = (ring * Vec4::new(0.0, 1.0, 0.0, 0.0)).truncate();
            let dir = y_basis.normalize();
            assert!(
                (dir - Vec3::Y).length() < 1e-4,
                "ring normal drifted at t={t}: {dir:?}"
            );
        }
    }

    #[test]
    fn ring_inherits_orbital_position() {
        let body = test_body();
        let t = 5.5;
        let planet = compose(&body, Mat4::IDENTITY, t);
        let ring = ring_transform(planet, 1.4);
        assert!((translation(ring) - translation(planet)).length() < 1e-5);
    }

    #[test]
    fn parent_transform_chains() {
        let body = test_body();
        let parent = Mat4::from_translation(Vec3::new(0.0, 3.0, 0.0));
        let pos = translation(compose(&body, parent, 0.0));
        assert!((pos - Vec3::new(2.5, 3.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn sun_sits_at_origin() {
        let model = sun_transform(0.5);
        assert_eq!(translation(model), Vec3::ZERO);
        assert!((model.x_axis.truncate().length() - 0.5).abs() < 1e-6);
    }
}
