//! Perspective camera and orbit controls.

use std::f32::consts::{PI, TAU};

use super::math::Vec3;
use crate::constants::pole as consts;

/// A world-space ray with a unit direction.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Start point
    pub origin: Vec3,
    /// Unit length
    pub direction: Vec3,
}

/// Perspective camera state
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Viewport width over height
    pub aspect: f32,
    /// Near clip distance
    pub near: f32,
    /// Far clip distance
    pub far: f32,
    /// World position
    pub position: Vec3,

    // Derived by `update_projection` and `look_at`
    tan_half_fov: f32,
    right: Vec3,
    up: Vec3,
    forward: Vec3,
}

impl PerspectiveCamera {
    /// Camera at the origin looking down -Z.
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            fov,
            aspect,
            near,
            far,
            position: Vec3::ZERO,
            tan_half_fov: 1.0,
            right: Vec3::new(1.0, 0.0, 0.0),
            up: Vec3::UP,
            forward: Vec3::new(0.0, 0.0, -1.0),
        };
        camera.update_projection();
        camera
    }

    /// Recompute derived projection values after changing fov or aspect.
    pub fn update_projection(&mut self) {
        self.tan_half_fov = (self.fov.to_radians() * 0.5).tan();
    }

    /// Orient the camera towards `target`, keeping world Y up.
    pub fn look_at(&mut self, target: Vec3) {
        let forward = (target - self.position).normalize();
        let right = forward.cross(Vec3::UP).normalize();
        // Looking straight up or down: keep the previous right vector.
        let right = if right.len() < 1e-6 { self.right } else { right };
        self.forward = forward;
        self.right = right;
        self.up = right.cross(forward);
    }

    /// Ray through normalized device coordinates (x right, y up, both in -1..1).
    pub fn ray(&self, ndc_x: f32, ndc_y: f32) -> Ray {
        let sx = ndc_x * self.tan_half_fov * self.aspect;
        let sy = ndc_y * self.tan_half_fov;
        let direction = (self.forward + self.right * sx + self.up * sy).normalize();
        Ray {
            origin: self.position,
            direction,
        }
    }
}

/// Radius/polar/azimuth coordinates around the orbit target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    /// Distance from the target
    pub radius: f32,
    /// Polar angle from +Y
    pub phi: f32,
    /// Azimuth around +Y, measured from +Z towards +X
    pub theta: f32,
}

impl Spherical {
    fn from_offset(v: Vec3) -> Self {
        let radius = v.len();
        if radius == 0.0 {
            return Self { radius, phi: 0.0, theta: 0.0 };
        }
        Self {
            radius,
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
            theta: v.x.atan2(v.z),
        }
    }

    fn to_offset(self) -> Vec3 {
        let sin_phi = self.phi.sin();
        Vec3::new(
            self.radius * sin_phi * self.theta.sin(),
            self.radius * self.phi.cos(),
            self.radius * sin_phi * self.theta.cos(),
        )
    }
}

/// Orbit-style camera controls: damped, auto-rotating, zoom disabled.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    /// Point orbited around
    pub target: Vec3,
    /// Ease rotation out over several frames
    pub enable_damping: bool,
    /// Fraction of the pending rotation applied per frame
    pub damping_factor: f32,
    /// Whether dolly gestures are accepted
    pub enable_zoom: bool,
    /// Spin around the target on every update
    pub auto_rotate: bool,
    /// Auto-rotate speed; 2.0 is one orbit per 30 s at 60 fps
    pub auto_rotate_speed: f32,
    spherical: Spherical,
    delta_theta: f32,
    scale: f32,
}

impl OrbitControls {
    /// Controls orbiting `camera` around the origin.
    pub fn new(camera: &PerspectiveCamera) -> Self {
        let target = Vec3::ZERO;
        Self {
            target,
            enable_damping: true,
            damping_factor: consts::DAMPING_FACTOR,
            enable_zoom: false,
            auto_rotate: true,
            auto_rotate_speed: consts::AUTO_ROTATE_SPEED,
            spherical: Spherical::from_offset(camera.position - target),
            delta_theta: 0.0,
            scale: 1.0,
        }
    }

    /// Azimuth step per frame when auto-rotating at 60 fps.
    fn auto_rotation_angle(&self) -> f32 {
        TAU / 60.0 / 60.0 * self.auto_rotate_speed
    }

    /// Request a dolly by `factor` (>1 moves away). Refused while zoom is disabled.
    pub fn dolly(&mut self, factor: f32) -> bool {
        if !self.enable_zoom || factor <= 0.0 {
            return false;
        }
        self.scale *= factor;
        true
    }

    /// Advance one frame and reposition the camera.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) {
        if self.auto_rotate {
            self.delta_theta -= self.auto_rotation_angle();
        }

        if self.enable_damping {
            self.spherical.theta += self.delta_theta * self.damping_factor;
        } else {
            self.spherical.theta += self.delta_theta;
        }
        self.spherical.theta = (self.spherical.theta + PI).rem_euclid(TAU) - PI;
        self.spherical.phi = self.spherical.phi.clamp(1e-6, PI - 1e-6);
        self.spherical.radius = (self.spherical.radius * self.scale).max(1e-3);

        camera.position = self.target + self.spherical.to_offset();
        camera.look_at(self.target);

        if self.enable_damping {
            self.delta_theta *= 1.0 - self.damping_factor;
        } else {
            self.delta_theta = 0.0;
        }
        self.scale = 1.0;
    }

    /// Current orbit coordinates.
    pub const fn spherical(&self) -> Spherical {
        self.spherical
    }
}
