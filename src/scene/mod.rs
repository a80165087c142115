//! Scene selection and the fixed visual parameters each scene resolves to.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::foundation::color::Color;

/// The user's choice of setting for the owner's outfit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SceneSelector {
    Indoor,
    #[default]
    Casual,
    Sport,
    Fancy,
}

impl SceneSelector {
    pub const ALL: [SceneSelector; 4] = [Self::Indoor, Self::Casual, Self::Sport, Self::Fancy];

    /// Identifier used in prompts and serialized state.
    pub fn name(self) -> &'static str {
        match self {
            Self::Indoor => "INDOOR",
            Self::Casual => "CASUAL",
            Self::Sport => "SPORT",
            Self::Fancy => "FANCY",
        }
    }

    /// Button label shown to users.
    pub fn label(self) -> &'static str {
        match self {
            Self::Indoor => "COZY",
            Self::Casual => "CASUAL",
            Self::Sport => "ACTIVE",
            Self::Fancy => "FANCY",
        }
    }

    /// Parse a scene name or label; anything unrecognized is [`SceneSelector::Casual`].
    pub fn parse_lossy(s: &str) -> Self {
        match s.trim().to_ascii_uppercase().as_str() {
            "INDOOR" | "COZY" => Self::Indoor,
            "SPORT" | "ACTIVE" => Self::Sport,
            "FANCY" => Self::Fancy,
            _ => Self::Casual,
        }
    }
}

impl fmt::Display for SceneSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FootwearKind {
    Heels,
    Runners,
    Sneakers,
    Slippers,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SockHeight {
    Low,
    #[default]
    Mid,
    Frilly,
    None,
}

impl SockHeight {
    /// Unrecognized values draw the mid (crew) sock.
    pub fn parse_lossy(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Self::Low,
            "frilly" => Self::Frilly,
            "none" => Self::None,
            _ => Self::Mid,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PantLength {
    Short,
    Skirt,
    Cropped,
    #[default]
    Rolled,
}

impl PantLength {
    /// Unrecognized values draw rolled-up jeans.
    pub fn parse_lossy(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "short" => Self::Short,
            "skirt" => Self::Skirt,
            "cropped" => Self::Cropped,
            _ => Self::Rolled,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextureTag {
    Fluffy,
    Mesh,
    Shine,
    Canvas,
}

/// Everything the limb renderer needs to draw one scene's outfit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetBundle {
    pub footwear_kind: FootwearKind,
    pub pant_color: Color,
    pub pant_length: PantLength,
    pub shoe_primary: Color,
    pub shoe_secondary: Color,
    pub sole_color: Color,
    pub skin_tone: Color,
    pub sock_color: Color,
    pub sock_height: SockHeight,
    pub texture_tag: TextureTag,
}

impl AssetBundle {
    pub const DEFAULT_SKIN_TONE: Color = Color::hex(0xffdbac);

    pub fn with_skin_tone(self, skin_tone: Color) -> Self {
        Self { skin_tone, ..self }
    }
}

const INDOOR: AssetBundle = AssetBundle {
    footwear_kind: FootwearKind::Slippers,
    pant_color: Color::hex(0xfcd34d),
    pant_length: PantLength::Short,
    shoe_primary: Color::hex(0xf9a8d4),
    shoe_secondary: Color::WHITE,
    sole_color: Color::hex(0xfce7f3),
    skin_tone: AssetBundle::DEFAULT_SKIN_TONE,
    sock_color: Color::WHITE,
    sock_height: SockHeight::Low,
    texture_tag: TextureTag::Fluffy,
};

const SPORT: AssetBundle = AssetBundle {
    footwear_kind: FootwearKind::Runners,
    pant_color: Color::hex(0x374151),
    pant_length: PantLength::Cropped,
    shoe_primary: Color::hex(0xa3e635),
    shoe_secondary: Color::hex(0x166534),
    sole_color: Color::WHITE,
    skin_tone: AssetBundle::DEFAULT_SKIN_TONE,
    sock_color: Color::hex(0xe2e8f0),
    sock_height: SockHeight::Mid,
    texture_tag: TextureTag::Mesh,
};

const FANCY: AssetBundle = AssetBundle {
    footwear_kind: FootwearKind::Heels,
    pant_color: Color::hex(0xdb2777),
    pant_length: PantLength::Skirt,
    shoe_primary: Color::hex(0xdc2626),
    shoe_secondary: Color::hex(0x7f1d1d),
    sole_color: Color::BLACK,
    skin_tone: AssetBundle::DEFAULT_SKIN_TONE,
    // 0.9 alpha ruffle sock.
    sock_color: Color::WHITE.with_alpha(230),
    sock_height: SockHeight::Frilly,
    texture_tag: TextureTag::Shine,
};

const CASUAL: AssetBundle = AssetBundle {
    footwear_kind: FootwearKind::Sneakers,
    pant_color: Color::hex(0x60a5fa),
    pant_length: PantLength::Rolled,
    shoe_primary: Color::hex(0x3b82f6),
    shoe_secondary: Color::hex(0x1d4ed8),
    sole_color: Color::hex(0xf8fafc),
    skin_tone: AssetBundle::DEFAULT_SKIN_TONE,
    sock_color: Color::hex(0xfca5a5),
    sock_height: SockHeight::Mid,
    texture_tag: TextureTag::Canvas,
};

/// Resolve the outfit for a scene. Pure and total.
pub fn resolve(scene: SceneSelector) -> AssetBundle {
    match scene {
        SceneSelector::Indoor => INDOOR,
        SceneSelector::Casual => CASUAL,
        SceneSelector::Sport => SPORT,
        SceneSelector::Fancy => FANCY,
    }
}

/// Resolve from a free-form scene name; unknown names get the casual outfit.
pub fn resolve_named(scene: &str) -> AssetBundle {
    resolve(SceneSelector::parse_lossy(scene))
}

#[cfg(test)]
#[path = "../../tests/unit/scene/resolve.rs"]
mod tests;
