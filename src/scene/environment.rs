//! Sky and terrain surfaces with a single in-flight crossfade.

use std::sync::Arc;

use crate::core::timer::Countdown;
use crate::error::{SceneError, SceneResult};
use crate::math::{smoothstep, Rgb};

/// Decoded RGBA8 texture as produced by the texture generator
#[derive(Debug, Clone, PartialEq)]
pub struct TextureImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl TextureImage {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> SceneResult<Self> {
        let expected = width as usize * height as usize * 4;
        if width == 0 || height == 0 || pixels.len() != expected {
            return Err(SceneError::render_target(format!(
                "texture {}x{} needs {} bytes, got {}",
                width,
                height,
                expected,
                pixels.len()
            )));
        }
        Ok(Self { width, height, pixels })
    }

    /// Single-color texture, handy for tests and placeholders
    pub fn solid(width: u32, height: u32, color: Rgb) -> SceneResult<Self> {
        let texel = [
            (color[0].clamp(0.0, 1.0) * 255.0).round() as u8,
            (color[1].clamp(0.0, 1.0) * 255.0).round() as u8,
            (color[2].clamp(0.0, 1.0) * 255.0).round() as u8,
            255,
        ];
        let pixels = texel
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        Self::new(width, height, pixels)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Nearest-neighbor lookup with wrapping UVs
    pub fn sample(&self, u: f32, v: f32) -> Rgb {
        let u = u.rem_euclid(1.0);
        let v = v.rem_euclid(1.0);
        let x = ((u * self.width as f32) as u32).min(self.width - 1);
        let y = ((v * self.height as f32) as u32).min(self.height - 1);
        let i = (y * self.width + x) as usize * 4;
        [
            self.pixels[i] as f32 / 255.0,
            self.pixels[i + 1] as f32 / 255.0,
            self.pixels[i + 2] as f32 / 255.0,
        ]
    }
}

/// A base color, optionally overridden by a texture
#[derive(Debug, Clone)]
pub struct Surface {
    pub color: Rgb,
    pub texture: Option<Arc<TextureImage>>,
}

impl Surface {
    pub fn new(color: Rgb, texture: Option<TextureImage>) -> Self {
        Self {
            color,
            texture: texture.map(Arc::new),
        }
    }

    pub fn color_at(&self, u: f32, v: f32) -> Rgb {
        match &self.texture {
            Some(texture) => texture.sample(u, v),
            None => self.color,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EnvironmentPair {
    pub sky: Surface,
    pub terrain: Surface,
    pub opacity: f32,
}

#[derive(Debug, Clone)]
pub struct Environment {
    current: Option<EnvironmentPair>,
    previous: Option<EnvironmentPair>,
    fade: Countdown,
    disposed: usize,
}

impl Environment {
    pub fn new(fade_duration: f32) -> Self {
        Self {
            current: None,
            previous: None,
            fade: Countdown::new(fade_duration),
            disposed: 0,
        }
    }

    /// Install a new sky/terrain pair.
    ///
    /// The first pair appears at full opacity. Later pairs fade in while the
    /// current one fades out; a pair still fading out when another arrives
    /// is dropped immediately and the interrupted pair restarts from opaque.
    pub fn set(&mut self, sky: Surface, terrain: Surface) {
        let mut incoming = EnvironmentPair {
            sky,
            terrain,
            opacity: 1.0,
        };

        let Some(mut outgoing) = self.current.take() else {
            self.current = Some(incoming);
            return;
        };

        if self.previous.take().is_some() {
            self.disposed += 1;
            log::debug!("environment crossfade interrupted, dropping oldest pair");
        }

        incoming.opacity = 0.0;
        outgoing.opacity = 1.0;
        self.previous = Some(outgoing);
        self.current = Some(incoming);
        self.fade.start();
    }

    /// Advance the crossfade with a smoothstep curve
    pub fn advance(&mut self, delta: f32) {
        if !self.fade.is_active() {
            return;
        }

        let done = self.fade.tick(delta);
        let eased = smoothstep(self.fade.progress());

        if let Some(current) = &mut self.current {
            current.opacity = eased;
        }
        if let Some(previous) = &mut self.previous {
            previous.opacity = 1.0 - eased;
        }

        if done {
            if let Some(current) = &mut self.current {
                current.opacity = 1.0;
            }
            if self.previous.take().is_some() {
                self.disposed += 1;
                log::debug!("environment crossfade complete");
            }
        }
    }

    pub fn is_crossfading(&self) -> bool {
        self.previous.is_some()
    }

    pub fn current(&self) -> Option<&EnvironmentPair> {
        self.current.as_ref()
    }

    pub fn previous(&self) -> Option<&EnvironmentPair> {
        self.previous.as_ref()
    }

    /// Pairs in draw order, oldest first
    pub fn layers(&self) -> impl Iterator<Item = &EnvironmentPair> {
        self.previous.iter().chain(self.current.iter())
    }

    pub fn disposed_count(&self) -> usize {
        self.disposed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface(c: f32) -> Surface {
        Surface::new([c, c, c], None)
    }

    #[test]
    fn first_environment_is_opaque() {
        let mut env = Environment::new(1.0);
        env.set(surface(0.1), surface(0.2));

        assert!(!env.is_crossfading());
        assert_eq!(env.current().unwrap().opacity, 1.0);
    }

    #[test]
    fn crossfade_sums_to_one_and_disposes() {
        let mut env = Environment::new(1.0);
        env.set(surface(0.1), surface(0.2));
        env.set(surface(0.5), surface(0.6));

        assert!(env.is_crossfading());
        for _ in 0..5 {
            env.advance(0.1);
            let sum = env.current().unwrap().opacity + env.previous().unwrap().opacity;
            assert!((sum - 1.0).abs() < 1e-5);
        }

        env.advance(1.0);
        assert!(!env.is_crossfading());
        assert_eq!(env.current().unwrap().opacity, 1.0);
        assert_eq!(env.disposed_count(), 1);
    }

    #[test]
    fn interrupted_fade_drops_oldest() {
        let mut env = Environment::new(1.0);
        env.set(surface(0.1), surface(0.1));
        env.set(surface(0.2), surface(0.2));
        env.advance(0.3);
        env.set(surface(0.3), surface(0.3));

        assert_eq!(env.layers().count(), 2);
        assert_eq!(env.disposed_count(), 1);
        assert_eq!(env.previous().unwrap().sky.color, [0.2; 3]);

        let sum = env.current().unwrap().opacity + env.previous().unwrap().opacity;
        assert!((sum - 1.0).abs() < 1e-5, "opacities sum to {}", sum);
        assert_eq!(env.previous().unwrap().opacity, 1.0);
    }

    #[test]
    fn texture_validation_and_sampling() {
        assert!(TextureImage::new(2, 2, vec![0; 15]).is_err());

        let texture = TextureImage::solid(4, 4, [1.0, 0.0, 0.0]).unwrap();
        assert_eq!(texture.sample(0.5, 1.5), [1.0, 0.0, 0.0]);

        let sky = Surface::new([0.0; 3], Some(texture));
        assert_eq!(sky.color_at(-0.25, 0.0), [1.0, 0.0, 0.0]);
    }
}
