//! Generative-model adapters. Both adapters recover every remote failure locally, so
//! their public entry points cannot fail.

pub mod breed;
pub mod client;
pub mod thought;

pub use client::{
    GeminiClient, GenerateRequest, GenerativeBackend, OfflineBackend, Part, ScriptedBackend,
};
