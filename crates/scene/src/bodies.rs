//! Celestial-body descriptors and the built-in solar-system table.
//!
//! Every field is a session constant. Orbital and spin angles are recomputed
//! each frame from absolute elapsed time (see [`crate::compose`]); nothing
//! here is integrated or mutated.

/// Translucent ring attached to a planet (Saturn).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    /// Inner radius of the annulus mesh, in mesh units.
    pub inner_radius: f32,
    /// Outer radius of the annulus mesh, in mesh units.
    pub outer_radius: f32,
    /// Uniform scale applied on top of the owning planet's transform.
    pub scale: f32,
    /// Texture path, relative to the working directory.
    pub texture: &'static str,
}

/// One orbiting body: a planet on a circular, optionally inclined orbit
/// around the origin, spinning about its own (optionally tilted) axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitBody {
    pub name: &'static str,
    /// Orbit radius in world units. > 0.
    pub orbit_radius: f32,
    /// Orbital angular speed in degrees per second; sign gives direction.
    pub orbit_speed_deg: f32,
    /// Fixed tilt of the spin axis in degrees (0 = upright).
    pub axial_tilt_deg: f32,
    /// Axial spin rate in degrees per second; negative spins retrograde.
    pub spin_deg: f32,
    /// Uniform scale. > 0.
    pub scale: f32,
    /// Tilt of the orbital plane itself, in degrees (0 = reference plane).
    pub orbit_incl_deg: f32,
    /// Texture path, relative to the working directory.
    pub texture: &'static str,
    /// Ring attachment, if any.
    pub ring: Option<Ring>,
}

/// The eight planets, inner to outer. Radii, speeds and scales are stage
/// values chosen for a legible scene, not astronomical ones; tilts and
/// inclinations keep their real-world character (Venus spins backwards,
/// Uranus rolls on its side, Mercury's orbit is the most inclined).
pub fn solar_system() -> Vec<OrbitBody> {
    vec![
        OrbitBody {
            name: "Mercury",
            orbit_radius: 1.6,
            orbit_speed_deg: 47.0,
            axial_tilt_deg: 0.0,
            spin_deg: 6.0,
            scale: 0.08,
            orbit_incl_deg: 7.0,
            texture: "assets/mercury.jpg",
            ring: None,
        },
        OrbitBody {
            name: "Venus",
            orbit_radius: 2.2,
            orbit_speed_deg: 35.0,
            axial_tilt_deg: 177.4,
            spin_deg: -1.5,
            scale: 0.14,
            orbit_incl_deg: 3.4,
            texture: "assets/venus.jpg",
            ring: None,
        },
        OrbitBody {
            name: "Earth",
            orbit_radius: 3.0,
            orbit_speed_deg: 29.0,
            axial_tilt_deg: 23.4,
            spin_deg: 80.0,
            scale: 0.15,
            orbit_incl_deg: 0.0,
            texture: "assets/earth.jpg",
            ring: None,
        },
        OrbitBody {
            name: "Mars",
            orbit_radius: 3.8,
            orbit_speed_deg: 24.0,
            axial_tilt_deg: 25.2,
            spin_deg: 78.0,
            scale: 0.12,
            orbit_incl_deg: 1.9,
            texture: "assets/mars.jpg",
            ring: None,
        },
        OrbitBody {
            name: "Jupiter",
            orbit_radius: 5.2,
            orbit_speed_deg: 13.0,
            axial_tilt_deg: 3.1,
            spin_deg: 160.0,
            scale: 0.45,
            orbit_incl_deg: 1.3,
            texture: "assets/jupiter.jpg",
            ring: None,
        },
        OrbitBody {
            name: "Saturn",
            orbit_radius: 6.8,
            orbit_speed_deg: 9.7,
            axial_tilt_deg: 26.7,
            spin_deg: 150.0,
            scale: 0.38,
            orbit_incl_deg: 2.5,
            texture: "assets/saturn.jpg",
            ring: Some(Ring {
                inner_radius: 1.2,
                outer_radius: 2.2,
                scale: 1.0,
                texture: "assets/saturn_ring.png",
            }),
        },
        OrbitBody {
            name: "Uranus",
            orbit_radius: 8.2,
            orbit_speed_deg: 6.8,
            axial_tilt_deg: 97.8,
            spin_deg: 100.0,
            scale: 0.22,
            orbit_incl_deg: 0.8,
            texture: "assets/uranus.jpg",
            ring: None,
        },
        OrbitBody {
            name: "Neptune",
            orbit_radius: 9.5,
            orbit_speed_deg: 5.4,
            axial_tilt_deg: 28.3,
            spin_deg: 95.0,
            scale: 0.21,
            orbit_incl_deg: 1.8,
            texture: "assets/neptune.jpg",
            ring: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eight_planets_with_valid_constants() {
        let bodies = solar_system();
        assert_eq!(bodies.len(), 8);
        for body in &bodies {
            assert!(body.orbit_radius > 0.0, "{}: orbit radius", body.name);
            assert!(body.scale > 0.0, "{}: scale", body.name);
            assert!(body.orbit_speed_deg != 0.0, "{}: orbit speed", body.name);
        }
    }

    #[test]
    fn orbits_are_ordered_inner_to_outer() {
        let bodies = solar_system();
        for pair in bodies.windows(2) {
            assert!(pair[0].orbit_radius < pair[1].orbit_radius);
        }
    }

    #[test]
    fn exactly_one_ringed_planet() {
        let bodies = solar_system();
        let ringed: Vec<_> = bodies.iter().filter(|b| b.ring.is_some()).collect();
        assert_eq!(ringed.len(), 1);
        assert_eq!(ringed[0].name, "Saturn");
        let ring = ringed[0].ring.unwrap();
        assert!(ring.inner_radius > 0.0);
        assert!(ring.inner_radius < ring.outer_radius);
    }
}
