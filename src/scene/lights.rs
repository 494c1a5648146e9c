use glam::Vec3;
use serde::Deserialize;

use crate::math::hex_to_linear;
use crate::types::LightingUniform;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct HemisphereLight {
    pub sky_color: u32,
    pub ground_color: u32,
    pub intensity: f32,
}

impl Default for HemisphereLight {
    fn default() -> Self {
        Self {
            sky_color: 0xffffff,
            ground_color: 0x000000,
            intensity: 1.0,
        }
    }
}

/// Light shining from `position` towards the origin
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct DirectionalLight {
    pub color: u32,
    pub intensity: f32,
    pub position: [f32; 3],
}

impl DirectionalLight {
    pub fn new(color: u32, intensity: f32, position: [f32; 3]) -> Self {
        Self {
            color,
            intensity,
            position,
        }
    }

    /// Unit vector from the origin towards the light
    pub fn direction(&self) -> Vec3 {
        Vec3::from_array(self.position)
            .try_normalize()
            .unwrap_or(Vec3::Y)
    }

    fn packed(&self) -> ([f32; 4], [f32; 4]) {
        let [r, g, b] = hex_to_linear(self.color);
        (self.direction().extend(self.intensity).to_array(), [r, g, b, 1.0])
    }
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self::new(0xffffff, 10.0, [0.0, 1.0, 0.0])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct AmbientLight {
    pub color: u32,
    pub intensity: f32,
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self {
            color: 0xffffff,
            intensity: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Lighting {
    pub hemisphere: HemisphereLight,
    pub key: DirectionalLight,
    pub fill: DirectionalLight,
    pub ambient: AmbientLight,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            hemisphere: HemisphereLight::default(),
            key: DirectionalLight::new(0xffffff, 10.0, [5.0, 10.0, 7.5]),
            fill: DirectionalLight::new(0xffffff, 10.0, [-5.0, -10.0, 2.0]),
            ambient: AmbientLight::default(),
        }
    }
}

/// Brushed-metal look applied to every mesh of the model
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Material {
    pub color: u32,
    pub metalness: f32,
    pub roughness: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: 0xe0d7c1,
            metalness: 0.9,
            roughness: 0.3,
        }
    }
}

impl Lighting {
    pub fn to_uniform(&self, material: &Material) -> LightingUniform {
        let [sr, sg, sb] = hex_to_linear(self.hemisphere.sky_color);
        let [gr, gg, gb] = hex_to_linear(self.hemisphere.ground_color);
        let [ar, ag, ab] = hex_to_linear(self.ambient.color);
        let [mr, mg, mb] = hex_to_linear(material.color);
        let (key_dir, key_color) = self.key.packed();
        let (fill_dir, fill_color) = self.fill.packed();

        LightingUniform {
            sky: [sr, sg, sb, self.hemisphere.intensity],
            ground: [gr, gg, gb, 0.0],
            ambient: [ar, ag, ab, self.ambient.intensity],
            key_dir,
            key_color,
            fill_dir,
            fill_color,
            base_color: [mr, mg, mb, material.metalness.clamp(0.0, 1.0)],
            surface: [material.roughness.clamp(0.04, 1.0), 0.0, 0.0, 0.0],
        }
    }
}
