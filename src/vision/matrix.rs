use crate::foundation::math::clamp_u8;

/// A 4x5 `feColorMatrix`: rows are R, G, B, A outputs; columns R, G, B, A inputs plus
/// a constant offset in normalized `[0, 1]` units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorMatrix(pub [[f32; 5]; 4]);

impl ColorMatrix {
    pub const IDENTITY: Self = Self([
        [1.0, 0.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 0.0, 1.0, 0.0],
    ]);

    /// Red and green collapse into one yellow channel (`0.4 R + 0.6 G`), blue passes.
    /// Green keeps the larger weight so luminance ordering survives.
    pub const DICHROMAT: Self = Self([
        [0.4, 0.6, 0.0, 0.0, 0.0],
        [0.4, 0.6, 0.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 0.0, 1.0, 0.0],
    ]);

    /// Apply to one straight-alpha pixel.
    pub fn apply(&self, px: [u8; 4]) -> [u8; 4] {
        let src = px.map(f32::from);
        let mut out = [0u8; 4];
        for (o, row) in out.iter_mut().zip(self.0.iter()) {
            let v = row[0] * src[0] + row[1] * src[1] + row[2] * src[2] + row[3] * src[3]
                + row[4] * 255.0;
            *o = clamp_u8(v);
        }
        out
    }

    /// The `values` attribute of an `feColorMatrix type="matrix"`.
    pub fn svg_values(&self) -> String {
        self.0
            .iter()
            .flat_map(|row| row.iter())
            .map(|v| format!("{v}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Per-channel linear slopes, as `feComponentTransfer` with `type="linear"`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChannelGain {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl ChannelGain {
    pub const NONE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    /// Lifts the merged yellow channel so the result does not look muddy.
    pub const YELLOW_LIFT: Self = Self {
        r: 1.05,
        g: 1.05,
        b: 1.0,
    };

    pub fn apply(&self, px: [u8; 4]) -> [u8; 4] {
        [
            clamp_u8(f32::from(px[0]) * self.r),
            clamp_u8(f32::from(px[1]) * self.g),
            clamp_u8(f32::from(px[2]) * self.b),
            px[3],
        ]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/vision/matrix.rs"]
mod tests;
