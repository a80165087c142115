//! DogView renders photos and videos the way a dog might see them.
//!
//! The pipeline is:
//!
//! - Resolve the selected [`SceneSelector`] to an outfit [`AssetBundle`]
//! - Draw the owner's feet for that outfit as SVG and rasterize it
//! - Run the media through the dichromatic [`VisionFilter`]
//! - Zoom toward the ground with the [`ViewTransform`] for the dog's [`SizeCategory`]
//! - Ask a generative model for the breed's size and a one-line dog thought, falling back
//!   to canned answers whenever it cannot help
//!
//! [`Session`] ties these together and keeps late model replies from overwriting newer
//! ones.
#![forbid(unsafe_code)]

pub mod ai;
pub mod animation;
pub mod compose;
pub mod config;
pub mod foundation;
pub mod media;
pub mod model;
pub mod overlay;
pub mod perspective;
pub mod scene;
pub mod session;
pub mod vision;

pub use crate::ai::{GeminiClient, GenerativeBackend, OfflineBackend, ScriptedBackend};
pub use crate::compose::{ComposeOptions, compose_dog_view};
pub use crate::config::{GeminiConfig, RenderSettings};
pub use crate::foundation::color::Color;
pub use crate::foundation::core::{Affine, BezPath, Canvas, Point, Rect, Vec2};
pub use crate::foundation::error::{DogViewError, DogViewResult};
pub use crate::media::{MediaAsset, MediaKind, VisualSample};
pub use crate::model::{BreedAnalysis, SizeCategory};
pub use crate::perspective::{ScaleTransition, ViewTransform};
pub use crate::scene::{AssetBundle, SceneSelector};
pub use crate::session::Session;
pub use crate::vision::VisionFilter;
