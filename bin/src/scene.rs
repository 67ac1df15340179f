//! Sphere Scene

use paint_core::color::Color;
use paint_core::common::*;
use paint_core::rng::RNG;
use painter::Shader;

/// Color of the lit sphere.
const SPHERE_COLOR: Color = Color::new(0.6, 0.7, 0.6);

/// Light arriving from everywhere.
const AMBIENT: Float = 0.1;

/// Sphere radius relative to the half extent of the largest screen axis.
const RADIUS: Float = 0.8;

/// Jitter of the light direction, giving a soft terminator.
const LIGHT_SPREAD: Float = 0.1;

/// A sphere in N + 1 dimensions seen along the extra axis through an
/// orthographic projection of the N-dimensional screen, lit by a directional
/// light.
pub struct SphereShader<const N: usize> {
    screen_size: [Int; N],

    /// Screen pixels per unit of world space.
    scale: Float,

    /// Direction to the light, N + 1 components.
    light_direction: Vec<Float>,
}

impl<const N: usize> SphereShader<N> {
    /// Create a new `SphereShader`.
    ///
    /// * `screen_size` - The screen size.
    pub fn new(screen_size: [Int; N]) -> Self {
        let max_size = screen_size.iter().copied().fold(1, max) as Float;

        // Light from the upper left, in front of the sphere.
        let mut light_direction = vec![0.0; N + 1];
        light_direction[0] = -0.4;
        light_direction[1] = 0.4;
        light_direction[N] = -0.8;
        normalize(&mut light_direction);

        Self {
            screen_size,
            scale: 0.5 * max_size,
            light_direction,
        }
    }
}

fn normalize(v: &mut [Float]) {
    let len = v.iter().map(|c| c * c).sum::<Float>().sqrt();
    v.iter_mut().for_each(|c| *c /= len);
}

impl<const N: usize> Shader<N> for SphereShader<N> {
    fn screen_size(&self) -> &[Int; N] {
        &self.screen_size
    }

    fn trace(&self, point: &[Float; N], rng: &mut RNG, ray_count: &mut i32) -> Result<Option<Color>, String> {
        // Primary ray along the extra axis.
        *ray_count += 1;

        let mut normal = vec![0.0; N + 1];
        let mut distance_squared = 0.0;
        for i in 0..N {
            let c = (point[i] - 0.5 * self.screen_size[i] as Float) / self.scale;
            normal[i] = c;
            distance_squared += c * c;
        }

        let radius_squared = RADIUS * RADIUS;
        if distance_squared >= radius_squared {
            return Ok(None);
        }
        normal[N] = -(radius_squared - distance_squared).sqrt();
        normal.iter_mut().for_each(|c| *c /= RADIUS);

        let mut light = self.light_direction.clone();
        light
            .iter_mut()
            .for_each(|c| *c += LIGHT_SPREAD * (2.0 * rng.uniform_float() - 1.0));
        normalize(&mut light);

        let mut color = SPHERE_COLOR * AMBIENT;
        let cosine: Float = normal.iter().zip(light.iter()).map(|(n, l)| n * l).sum();
        if cosine > 0.0 {
            // Shadow ray; a lone convex sphere never shadows itself.
            *ray_count += 1;
            color += SPHERE_COLOR * cosine;
        }

        Ok(Some(color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_hits_and_corner_misses() {
        let shader = SphereShader::new([64, 48]);
        let mut rng = RNG::new(0);
        let mut rays = 0;

        let center = shader.trace(&[32.0, 24.0], &mut rng, &mut rays).unwrap();
        assert!(center.is_some());

        let corner = shader.trace(&[0.0, 0.0], &mut rng, &mut rays).unwrap();
        assert!(corner.is_none());
    }

    #[test]
    fn rays_are_counted() {
        let shader = SphereShader::new([16, 16, 16]);
        let mut rng = RNG::new(1);

        let mut rays = 0;
        shader.trace(&[0.0, 0.0, 0.0], &mut rng, &mut rays).unwrap();
        assert_eq!(rays, 1);

        let mut rays = 0;
        shader.trace(&[8.0, 8.0, 8.0], &mut rng, &mut rays).unwrap();
        assert_eq!(rays, 2);
    }

    #[test]
    fn lit_side_is_brighter() {
        let shader = SphereShader::new([64, 64]);
        let mut rng = RNG::new(2);
        let mut rays = 0;

        let lit = shader.trace(&[16.0, 48.0], &mut rng, &mut rays).unwrap().unwrap();
        let dark = shader.trace(&[48.0, 16.0], &mut rng, &mut rays).unwrap().unwrap();
        assert!(lit.max_element() > dark.max_element());
    }
}
