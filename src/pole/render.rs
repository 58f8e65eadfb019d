//! Ray-cast renderer for the pole scene.
//!
//! Each framebuffer pixel shoots one ray. Pixels that miss the mesh stay
//! transparent so the terminal background shows through.

use rayon::prelude::*;

use super::camera::{PerspectiveCamera, Ray};
use super::math::Vec3;
use super::texture::StripeTexture;

/// Transparent-background colour framebuffer
#[derive(Debug, Clone, Default)]
pub struct Framebuffer {
    /// Width in pixels
    pub width: usize,
    /// Height in pixels
    pub height: usize,
    pixels: Vec<Option<[u8; 3]>>,
}

impl Framebuffer {
    /// Fully transparent framebuffer.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![None; width * height],
        }
    }

    /// Change size, clearing pixels only when the size changes.
    pub fn resize(&mut self, width: usize, height: usize) {
        if self.width != width || self.height != height {
            self.width = width;
            self.height = height;
            self.pixels = vec![None; width * height];
        }
    }

    /// Pixel colour, or `None` where transparent or out of bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x]
        } else {
            None
        }
    }

    /// Number of pixels the mesh covered in the last render
    pub fn coverage(&self) -> usize {
        self.pixels.iter().filter(|p| p.is_some()).count()
    }
}

/// Phong-style material with a colour map
#[derive(Debug, Clone)]
pub struct PhongMaterial {
    /// Specular strength
    pub specular: f32,
    /// Specular exponent
    pub shininess: f32,
    /// Colour map
    pub map: StripeTexture,
}

/// Capped cylinder centred on the origin, axis along Y
#[derive(Debug, Clone, Copy)]
pub struct CylinderGeometry {
    /// Radius in world units
    pub radius: f32,
    /// Height along Y
    pub height: f32,
}

/// The single pole mesh
#[derive(Debug, Clone)]
pub struct Mesh {
    /// Cylinder shape
    pub geometry: CylinderGeometry,
    /// Surface material
    pub material: PhongMaterial,
    /// Rotation about Y in radians
    pub rotation_y: f32,
}

/// Mesh plus lights
#[derive(Debug, Clone)]
pub struct Scene {
    /// The pole
    pub mesh: Mesh,
    /// Ambient light intensity
    pub ambient: f32,
    /// Directional light intensity
    pub directional: f32,
    /// Unit vector from the scene towards the directional light
    pub light_dir: Vec3,
}

struct Hit {
    t: f32,
    normal: Vec3,
    u: f32,
    v: f32,
}

impl CylinderGeometry {
    /// Nearest intersection of an object-space ray within `(near, far)`.
    fn intersect(&self, ray: &Ray, near: f32, far: f32) -> Option<Hit> {
        let (o, d) = (ray.origin, ray.direction);
        let half = self.height * 0.5;
        let r = self.radius;
        let mut best: Option<Hit> = None;

        // Side wall: x^2 + z^2 = r^2
        let a = d.x.mul_add(d.x, d.z * d.z);
        if a > f32::EPSILON {
            let b = 2.0 * o.x.mul_add(d.x, o.z * d.z);
            let c = o.x.mul_add(o.x, o.z * o.z) - r * r;
            let disc = b.mul_add(b, -4.0 * a * c);
            if disc >= 0.0 {
                let sq = disc.sqrt();
                for t in [(-b - sq) / (2.0 * a), (-b + sq) / (2.0 * a)] {
                    if t <= near || t >= far {
                        continue;
                    }
                    let p = o + d * t;
                    if p.y.abs() <= half {
                        best = Some(Hit {
                            t,
                            normal: Vec3::new(p.x / r, 0.0, p.z / r),
                            u: (p.x.atan2(p.z) / std::f32::consts::TAU).rem_euclid(1.0),
                            v: (p.y + half) / self.height,
                        });
                        break;
                    }
                }
            }
        }

        // End caps
        if d.y.abs() > f32::EPSILON {
            for sign in [1.0f32, -1.0] {
                let t = (sign * half - o.y) / d.y;
                if t <= near || t >= far || best.as_ref().is_some_and(|h| h.t <= t) {
                    continue;
                }
                let p = o + d * t;
                if p.x.mul_add(p.x, p.z * p.z) <= r * r {
                    best = Some(Hit {
                        t,
                        normal: Vec3::new(0.0, sign, 0.0),
                        u: (p.z / r).mul_add(0.5, 0.5),
                        v: (p.x / r * sign).mul_add(0.5, 0.5),
                    });
                }
            }
        }

        best
    }
}

impl Scene {
    /// Shade one world-space ray; `None` is background.
    fn shade(&self, world: &Ray, near: f32, far: f32) -> Option<[u8; 3]> {
        let mesh = &self.mesh;
        // Work in mesh space: undo the mesh rotation on everything.
        let undo = -mesh.rotation_y;
        let ray = Ray {
            origin: world.origin.rotate_y(undo),
            direction: world.direction.rotate_y(undo),
        };
        let hit = mesh.geometry.intersect(&ray, near, far)?;

        let light = self.light_dir.rotate_y(undo);
        let view = -ray.direction;
        let n_dot_l = hit.normal.dot(light).max(0.0);
        let half_vec = (light + view).normalize();
        let n_dot_h = hit.normal.dot(half_vec).max(0.0);

        let material = &mesh.material;
        let diffuse = self.directional.mul_add(n_dot_l, self.ambient);
        let norm = (material.shininess + 2.0) / 8.0;
        let specular = material.specular
            * norm
            * n_dot_h.powf(material.shininess)
            * n_dot_l
            * self.directional;

        let texel = material.map.sample(hit.u, hit.v);
        Some(texel.map(|channel| {
            let lit = (f32::from(channel) / 255.0).mul_add(diffuse, specular);
            to_channel(lit)
        }))
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Render the scene into the framebuffer, one row per rayon task.
pub fn render(scene: &Scene, camera: &PerspectiveCamera, framebuffer: &mut Framebuffer) {
    let (width, height) = (framebuffer.width, framebuffer.height);
    if width == 0 || height == 0 {
        return;
    }
    let (w, h) = (width as f32, height as f32);

    framebuffer
        .pixels
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            let ndc_y = 1.0 - 2.0 * (y as f32 + 0.5) / h;
            for (x, pixel) in row.iter_mut().enumerate() {
                let ndc_x = 2.0 * (x as f32 + 0.5) / w - 1.0;
                let ray = camera.ray(ndc_x, ndc_y);
                *pixel = scene.shade(&ray, camera.near, camera.far);
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_ray(origin: Vec3, direction: Vec3) -> Ray {
        Ray {
            origin,
            direction: direction.normalize(),
        }
    }

    fn pole() -> CylinderGeometry {
        CylinderGeometry { radius: 0.5, height: 4.0 }
    }

    #[test]
    fn frontal_ray_hits_side_facing_camera() {
        let hit = pole()
            .intersect(&unit_ray(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0)), 0.1, 1000.0)
            .map(|h| (h.t, h.normal, h.u, h.v));
        let (t, normal, u, v) = hit.unwrap_or_default();
        assert!((t - 4.5).abs() < 1e-5);
        assert!((normal - Vec3::new(0.0, 0.0, 1.0)).len() < 1e-5);
        assert!(u.abs() < 1e-5);
        assert!((v - 0.5).abs() < 1e-5);
    }

    #[test]
    fn ray_above_pole_misses() {
        let hit = pole().intersect(
            &unit_ray(Vec3::new(0.0, 2.5, 5.0), Vec3::new(0.0, 0.0, -1.0)),
            0.1,
            1000.0,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn downward_ray_hits_top_cap() {
        let hit = pole()
            .intersect(&unit_ray(Vec3::new(0.1, 5.0, 0.0), Vec3::new(0.0, -1.0, 0.0)), 0.1, 1000.0)
            .map(|h| (h.t, h.normal.y));
        assert_eq!(hit.map(|(_, ny)| ny), Some(1.0));
        assert!(hit.is_some_and(|(t, _)| (t - 3.0).abs() < 1e-5));
    }

    #[test]
    fn far_plane_clips_hits() {
        let hit = pole().intersect(
            &unit_ray(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0)),
            0.1,
            4.0,
        );
        assert!(hit.is_none());
    }
}
