#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// values from 0 - 255
    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: (r as f32 / 255.),
            g: (g as f32 / 255.),
            b: (b as f32 / 255.),
            a: (a as f32 / 255.),
        }
    }

    /// Opaque grey, value from 0 - 255
    pub fn grey(value: u8) -> Self {
        Self::rgba(value, value, value, 255)
    }

    /// Quantized for the `Unorm8x4` instance attribute.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let to_byte = |channel: f32| (channel.clamp(0., 1.) * 255.).round() as u8;

        [to_byte(self.r), to_byte(self.g), to_byte(self.b), to_byte(self.a)]
    }
}

impl From<Color> for wgpu::Color {
    fn from(color: Color) -> Self {
        wgpu::Color {
            r: color.r as f64,
            g: color.g as f64,
            b: color.b as f64,
            a: color.a as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn bytes_round_trip_through_normalized() {
        assert_eq!(Color::rgba(200, 10, 0, 255).to_rgba8(), [200, 10, 0, 255]);
    }

    #[test]
    fn out_of_range_channels_clamp() {
        let color = Color {
            r: 1.5,
            g: -0.2,
            b: 0.5,
            a: -1.,
        };

        assert_eq!(color.to_rgba8(), [255, 0, 128, 0]);
    }
}
