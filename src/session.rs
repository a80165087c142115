//! One user's working state: the media on screen, the scene, the breed, and the two
//! in-flight model requests.
//!
//! Requests are split into `begin_*` (synchronous, issues a sequence number), an async
//! `run` on the returned job, and `apply_*`, which drops completions that a newer
//! request has superseded.

use std::time::Instant;

use crate::{
    ai::{
        breed,
        client::GenerativeBackend,
        thought::{self, ThoughtContext, ThoughtOrchestrator, ThoughtOutcome, ThoughtState},
    },
    foundation::error::DogViewError,
    media::{MediaAsset, VisualSample, build_visual_sample},
    model::{BreedAnalysis, SizeCategory},
    perspective::{ScaleTransition, ViewTransform},
    scene::{self, AssetBundle, SceneSelector},
};

/// Size shown before any breed has been classified.
pub const DEFAULT_VIEW_SIZE: SizeCategory = SizeCategory::Large;

#[derive(Debug)]
pub struct Session {
    media: Option<MediaAsset>,
    scene: SceneSelector,
    breed_input: String,
    analysis: Option<BreedAnalysis>,
    classify_seq: u64,
    classifying: bool,
    thought: ThoughtOrchestrator,
    view: ScaleTransition,
    feet_view: ScaleTransition,
    view_started: Instant,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            media: None,
            scene: SceneSelector::default(),
            breed_input: String::new(),
            analysis: None,
            classify_seq: 0,
            classifying: false,
            thought: ThoughtOrchestrator::default(),
            view: ScaleTransition::settled(ViewTransform::for_size(DEFAULT_VIEW_SIZE)),
            feet_view: ScaleTransition::settled(ViewTransform::overlay_for_size(DEFAULT_VIEW_SIZE)),
            view_started: Instant::now(),
        }
    }

    pub fn media(&self) -> Option<&MediaAsset> {
        self.media.as_ref()
    }

    pub fn scene(&self) -> SceneSelector {
        self.scene
    }

    pub fn bundle(&self) -> AssetBundle {
        scene::resolve(self.scene)
    }

    pub fn breed_input(&self) -> &str {
        &self.breed_input
    }

    pub fn analysis(&self) -> Option<&BreedAnalysis> {
        self.analysis.as_ref()
    }

    pub fn is_classifying(&self) -> bool {
        self.classifying
    }

    pub fn thought(&self) -> &ThoughtState {
        self.thought.state()
    }

    /// Size that drives the filter and perspective.
    pub fn effective_size(&self) -> SizeCategory {
        self.analysis
            .as_ref()
            .map_or(DEFAULT_VIEW_SIZE, |a| a.size_category)
    }

    /// Media zoom at `now`, mid-transition if the size recently changed.
    pub fn view_at(&self, now: Instant) -> ViewTransform {
        self.view.sample(now.saturating_duration_since(self.view_started))
    }

    pub fn feet_view_at(&self, now: Instant) -> ViewTransform {
        self.feet_view
            .sample(now.saturating_duration_since(self.view_started))
    }

    pub fn view_transition(&self) -> &ScaleTransition {
        &self.view
    }

    /// Replace the current media. Triggers a new caption.
    pub fn upload(&mut self, asset: MediaAsset) -> Option<ThoughtJob> {
        if let Some(old) = self.media.replace(asset) {
            tracing::debug!(name = %old.display_name, "releasing previous media");
        }
        self.begin_thought()
    }

    /// Switch outfits. A new caption is requested only when the scene actually changes.
    pub fn set_scene(&mut self, scene: SceneSelector) -> Option<ThoughtJob> {
        if scene == self.scene {
            return None;
        }
        self.scene = scene;
        self.begin_thought()
    }

    pub fn set_breed_input(&mut self, breed: impl Into<String>) {
        self.breed_input = breed.into();
    }

    /// Start classifying the typed breed. Blank input issues nothing.
    pub fn begin_classification(&mut self) -> Option<ClassifyJob> {
        let breed = self.breed_input.trim();
        if breed.is_empty() {
            return None;
        }
        self.classify_seq += 1;
        self.classifying = true;
        tracing::debug!(seq = self.classify_seq, breed, "classification requested");
        Some(ClassifyJob {
            seq: self.classify_seq,
            breed: breed.to_owned(),
        })
    }

    /// Record a classification and refresh the caption. Stale completions are ignored.
    pub fn apply_classification(&mut self, done: ClassifyCompletion) -> Option<ThoughtJob> {
        if done.seq != self.classify_seq {
            tracing::debug!(seq = done.seq, latest = self.classify_seq, "discarding stale classification");
            return None;
        }
        self.classifying = false;
        self.analysis = Some(done.analysis);
        self.retarget_view();
        self.begin_thought()
    }

    /// Issue a caption request for the current media, if any.
    pub fn begin_thought(&mut self) -> Option<ThoughtJob> {
        let media = self.media.clone()?;
        let seq = self.thought.begin();
        Some(ThoughtJob {
            seq,
            media,
            context: ThoughtContext::new(&self.breed_input, self.scene),
        })
    }

    /// User asked for another caption.
    pub fn regenerate(&mut self) -> Option<ThoughtJob> {
        self.begin_thought()
    }

    pub fn apply_thought(&mut self, done: ThoughtCompletion) -> bool {
        self.thought.complete(done.seq, done.outcome)
    }

    /// Back to a blank slate on the casual scene. In-flight results are discarded.
    pub fn reset(&mut self) {
        if let Some(old) = self.media.take() {
            tracing::debug!(name = %old.display_name, "releasing media on reset");
        }
        self.scene = SceneSelector::default();
        self.breed_input.clear();
        self.analysis = None;
        self.classify_seq += 1;
        self.classifying = false;
        self.thought.reset();
        self.retarget_view();
    }

    fn retarget_view(&mut self) {
        let now = Instant::now();
        let elapsed = now.saturating_duration_since(self.view_started);
        let size = self.effective_size();
        self.view = self.view.retarget(elapsed, ViewTransform::for_size(size));
        self.feet_view = self
            .feet_view
            .retarget(elapsed, ViewTransform::overlay_for_size(size));
        self.view_started = now;
    }
}

/// A pending breed classification.
#[derive(Clone, Debug)]
pub struct ClassifyJob {
    pub seq: u64,
    pub breed: String,
}

#[derive(Clone, Debug)]
pub struct ClassifyCompletion {
    pub seq: u64,
    pub analysis: BreedAnalysis,
}

impl ClassifyJob {
    pub async fn run(self, backend: &dyn GenerativeBackend) -> ClassifyCompletion {
        ClassifyCompletion {
            seq: self.seq,
            analysis: breed::classify(backend, &self.breed).await,
        }
    }
}

/// A pending caption request for one media snapshot.
#[derive(Clone, Debug)]
pub struct ThoughtJob {
    pub seq: u64,
    pub media: MediaAsset,
    pub context: ThoughtContext,
}

#[derive(Clone, Debug)]
pub struct ThoughtCompletion {
    pub seq: u64,
    pub outcome: ThoughtOutcome,
}

impl ThoughtJob {
    /// Build the visual sample off the executor, then ask for a caption. A sample that
    /// cannot be built is left out of the request.
    pub async fn run(self, backend: &dyn GenerativeBackend) -> ThoughtCompletion {
        let sample = sample_media(self.media.clone()).await;
        let context = self.context.with_sample(self.media.kind, sample);
        ThoughtCompletion {
            seq: self.seq,
            outcome: thought::generate_thought(backend, &context).await,
        }
    }
}

async fn sample_media(media: MediaAsset) -> Option<VisualSample> {
    let name = media.display_name.clone();
    let joined = tokio::task::spawn_blocking(move || build_visual_sample(&media))
        .await
        .map_err(|e| DogViewError::media(format!("sampling task failed: {e}")));
    match joined.and_then(|r| r) {
        Ok(sample) => Some(sample),
        Err(e) => {
            tracing::debug!(name = %name, error = %e, "no visual sample; captioning without it");
            None
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/session/transitions.rs"]
mod tests;
