//! Decorative barber pole for the hero section.
//!
//! A [`BarberPole`] owns its whole scene: a textured cylinder, two lights,
//! a perspective camera with orbit controls and the framebuffer it renders
//! into. Pages create one, call [`BarberPole::update`] once per frame,
//! forward viewport changes to [`BarberPole::resize`] and
//! [`BarberPole::dispose`] it when they go away.

pub mod camera;
pub mod math;
pub mod render;
pub mod texture;

use camera::{OrbitControls, PerspectiveCamera};
use math::Vec3;
use render::{CylinderGeometry, Framebuffer, Mesh, PhongMaterial, Scene};
use texture::StripeTexture;

use crate::constants::pole as consts;
use crate::error::{Error, Result};

/// The hero animation: a rotating, scrolling striped cylinder.
#[derive(Debug)]
pub struct BarberPole {
    scene: Scene,
    camera: PerspectiveCamera,
    controls: OrbitControls,
    framebuffer: Framebuffer,
    frames: u64,
    disposed: bool,
}

impl BarberPole {
    /// Build the scene for a `width` x `height` pixel viewport.
    pub fn create(width: usize, height: usize) -> Result<Self> {
        check_viewport(width, height)?;

        let mut camera = PerspectiveCamera::new(
            consts::FOV_DEGREES,
            width as f32 / height as f32,
            consts::NEAR,
            consts::FAR,
        );
        let (cx, cy, cz) = consts::CAMERA_POSITION;
        camera.position = Vec3::new(cx, cy, cz);
        camera.look_at(Vec3::ZERO);
        let controls = OrbitControls::new(&camera);

        let (lx, ly, lz) = consts::LIGHT_POSITION;
        let scene = Scene {
            mesh: Mesh {
                geometry: CylinderGeometry {
                    radius: consts::RADIUS,
                    height: consts::HEIGHT,
                },
                material: PhongMaterial {
                    specular: consts::SPECULAR,
                    shininess: consts::SHININESS,
                    map: StripeTexture::barber(),
                },
                rotation_y: 0.0,
            },
            ambient: consts::AMBIENT_INTENSITY,
            directional: consts::DIRECTIONAL_INTENSITY,
            light_dir: Vec3::new(lx, ly, lz).normalize(),
        };

        tracing::debug!("Barber pole created at {}x{}", width, height);
        Ok(Self {
            scene,
            camera,
            controls,
            framebuffer: Framebuffer::new(width, height),
            frames: 0,
            disposed: false,
        })
    }

    /// Advance one frame: spin the mesh, scroll the stripes, move the
    /// camera and render.
    pub fn update(&mut self) {
        if self.disposed {
            return;
        }
        let mesh = &mut self.scene.mesh;
        mesh.rotation_y += consts::ROTATION_STEP;
        mesh.material.map.scroll(consts::SCROLL_STEP);

        self.controls.update(&mut self.camera);
        render::render(&self.scene, &self.camera, &mut self.framebuffer);
        self.frames += 1;
    }

    /// Match a new viewport size.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<()> {
        check_viewport(width, height)?;
        self.camera.aspect = width as f32 / height as f32;
        self.camera.update_projection();
        self.framebuffer.resize(width, height);
        Ok(())
    }

    /// Release the framebuffer; further updates do nothing.
    pub fn dispose(&mut self) {
        if !self.disposed {
            tracing::debug!("Barber pole disposed after {} frames", self.frames);
        }
        self.framebuffer = Framebuffer::default();
        self.disposed = true;
    }

    /// Whether `dispose` has run.
    pub const fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Last rendered frame.
    pub const fn frame(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Frames rendered so far.
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Mesh rotation about Y in radians.
    pub const fn rotation(&self) -> f32 {
        self.scene.mesh.rotation_y
    }

    /// Vertical texture offset.
    pub const fn stripe_offset(&self) -> f32 {
        self.scene.mesh.material.map.offset.1
    }

    /// Camera the pole is drawn through.
    pub const fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    /// Offer a zoom gesture to the controls; `false` means it was refused
    /// and should fall through (zoom is disabled on the hero pole).
    pub fn dolly(&mut self, factor: f32) -> bool {
        !self.disposed && self.controls.dolly(factor)
    }
}

impl Drop for BarberPole {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn check_viewport(width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::Render(format!(
            "viewport {width}x{height} has no area"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;

    #[test]
    fn create_rejects_empty_viewport() {
        assert!(matches!(BarberPole::create(0, 10), Err(Error::Render(_))));
        assert!(BarberPole::create(10, 0).is_err());
    }

    #[test]
    fn update_spins_and_scrolls() {
        let mut pole = BarberPole::create(40, 40).unwrap();
        pole.update();
        pole.update();
        assert!((pole.rotation() - 0.02).abs() < 1e-6);
        assert!((pole.stripe_offset() - 0.98).abs() < 1e-5);
        assert_eq!(pole.frames(), 2);
    }

    #[test]
    fn rendered_frame_has_pole_and_background() {
        let mut pole = BarberPole::create(60, 60).unwrap();
        pole.update();
        let frame = pole.frame();
        let covered = frame.coverage();
        assert!(covered > 0, "pole should cover some pixels");
        assert!(covered < 60 * 60, "background should stay transparent");
        // The pole is centred, the corners are empty.
        assert!(frame.get(30, 30).is_some());
        assert!(frame.get(0, 0).is_none());
    }

    #[test]
    fn resize_updates_aspect_and_buffer() {
        let mut pole = BarberPole::create(40, 20).unwrap();
        pole.resize(30, 30).unwrap();
        assert!((pole.camera().aspect - 1.0).abs() < 1e-6);
        pole.update();
        assert_eq!((pole.frame().width, pole.frame().height), (30, 30));
        assert!(pole.resize(0, 30).is_err());
    }

    #[test]
    fn dispose_stops_updates() {
        let mut pole = BarberPole::create(20, 20).unwrap();
        pole.update();
        pole.dispose();
        let rotation = pole.rotation();
        pole.update();
        assert!(pole.is_disposed());
        assert!((pole.rotation() - rotation).abs() < f32::EPSILON);
        assert_eq!(pole.frame().coverage(), 0);
    }

    #[test]
    fn zoom_gestures_fall_through() {
        let mut pole = BarberPole::create(20, 20).unwrap();
        assert!(!pole.dolly(1.2));
    }
}
