//! Surface descriptions for the scene's meshes.
//!
//! A [`MaterialDesc`] is plain data: colour, specular response, opacity and
//! shadow flags. It is turned into a GPU uniform by
//! [`crate::data_structures::model::Material`].

/// How a surface reacts to the light rig.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shading {
    /// Ambient + diffuse + Blinn-Phong specular from every light.
    Phong,
    /// Flat colour, ignores lights and shadows.
    Unlit,
}

/// Default specular tint of a Phong surface that doesn't set one.
pub const DEFAULT_SPECULAR: u32 = 0x111111;
/// Default shininess of a Phong surface that doesn't set one.
pub const DEFAULT_SHININESS: f32 = 30.0;

#[derive(Clone, Debug, PartialEq)]
pub struct MaterialDesc {
    pub shading: Shading,
    pub color: u32,
    pub specular: u32,
    pub shininess: f32,
    pub opacity: f32,
    pub transparent: bool,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl MaterialDesc {
    pub fn phong(color: u32) -> Self {
        Self {
            shading: Shading::Phong,
            color,
            specular: DEFAULT_SPECULAR,
            shininess: DEFAULT_SHININESS,
            opacity: 1.0,
            transparent: false,
            cast_shadow: false,
            receive_shadow: false,
        }
    }

    pub fn unlit(color: u32) -> Self {
        Self {
            shading: Shading::Unlit,
            ..Self::phong(color)
        }
    }

    pub fn shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess;
        self
    }

    pub fn specular(mut self, specular: u32) -> Self {
        self.specular = specular;
        self
    }

    /// Makes the surface alpha-blended with the given opacity.
    pub fn translucent(mut self, opacity: f32) -> Self {
        self.transparent = true;
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn casts_shadow(mut self) -> Self {
        self.cast_shadow = true;
        self
    }

    pub fn receives_shadow(mut self) -> Self {
        self.receive_shadow = true;
        self
    }

    pub fn to_uniform(&self) -> MaterialUniform {
        let [r, g, b] = srgb_hex_to_linear(self.color);
        let [sr, sg, sb] = srgb_hex_to_linear(self.specular);
        let lit = match self.shading {
            Shading::Phong => 1.0,
            Shading::Unlit => 0.0,
        };
        MaterialUniform {
            color: [r, g, b, self.opacity],
            specular: [sr, sg, sb, self.shininess],
            flags: [lit, if self.receive_shadow { 1.0 } else { 0.0 }, 0.0, 0.0],
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    /// Linear rgb + opacity.
    pub color: [f32; 4],
    /// Linear rgb + shininess.
    pub specular: [f32; 4],
    /// x: lit, y: receives shadow.
    pub flags: [f32; 4],
}

/// Converts a `0xRRGGBB` sRGB colour into linear components in `[0, 1]`.
pub fn srgb_hex_to_linear(hex: u32) -> [f32; 3] {
    let channel = |shift: u32| {
        let c = ((hex >> shift) & 0xff) as f32 / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    [channel(16), channel(8), channel(0)]
}
