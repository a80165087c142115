//! One-line "dog thought" captions and the request bookkeeping around them.

use rand::{Rng, seq::SliceRandom};

use crate::{
    ai::client::{GenerateRequest, GenerativeBackend, Part},
    media::{MediaKind, VisualSample},
    scene::SceneSelector,
};

pub const FALLBACK_THOUGHTS: [&str; 5] = [
    "Woof! I think I see a squirrel... wait, no, just a speck of dust.",
    "I have no idea what this is, but I probably want to eat it.",
    "Can we stop looking at this and go for a walk?",
    "Everything looks very yellow and very interesting today!",
    "Thinking about sausages... please hold.",
];

/// Shown while a caption is in flight.
pub const THINKING_INDICATOR: &str = "Sniffing around...";

pub const THOUGHT_TEMPERATURE: f64 = 1.2;
pub const THOUGHT_MAX_OUTPUT_TOKENS: u32 = 60;

const TRANSLATION_GUIDE: &str = "\
YOUR TASK:
Look at the image and translate the Human World into Dog World concepts.
Write a SINGLE-SENTENCE internal monologue reacting to the scene.

TRANSLATION GUIDE (Use these metaphors):
- Mountain -> \"The Giant Rock I Must Conquer\" or \"The Sky Pile\"
- City/Street -> \"The Loud Canyon\" or \"The Place With Many Smells\"
- Car -> \"The Vroom-Vroom Beast\" or \"The Window-Head-Stick-Out Machine\"
- Ocean/Lake -> \"The Infinite Water Bowl\"
- Sofa -> \"The Soft Forbidden Zone\"
- Human -> \"The Can Opener\" or \"My Two-Legged Pillow\"
- Cat -> \"The Sharp Alien\"
- Vacuum -> \"THE LOUD MONSTER\"

RULES:
1. Be specific to what is in the image. If you see a mountain, talk about the mountain.
2. Use humorous, simple, food/play-motivated dog logic.
3. NO generic \"I love my owner\" unless the owner is visible in the photo.
4. Keep it under 25 words.
5. Do not use quotes in the output.

EXAMPLES:
- (Mountain view) \"That Giant Sky Rock looks like the perfect place to pee on everything.\"
- (City street) \"So many metal beasts roaring, but I just want to sniff that lamp post.\"
- (Living room) \"The Soft Forbidden Zone is calling my name while the Human isn't looking.\"";

/// Everything a caption request is built from.
#[derive(Clone, Debug, PartialEq)]
pub struct ThoughtContext {
    pub breed: String,
    pub scene: SceneSelector,
    /// Kind of the media the sample came from; drives the prompt's framing.
    pub media_kind: Option<MediaKind>,
    pub sample: Option<VisualSample>,
}

impl ThoughtContext {
    pub fn new(breed: &str, scene: SceneSelector) -> Self {
        let breed = breed.trim();
        Self {
            breed: if breed.is_empty() { "Dog" } else { breed }.to_owned(),
            scene,
            media_kind: None,
            sample: None,
        }
    }

    pub fn with_sample(mut self, kind: MediaKind, sample: Option<VisualSample>) -> Self {
        self.media_kind = Some(kind);
        self.sample = sample;
        self
    }
}

pub fn thought_prompt(ctx: &ThoughtContext) -> String {
    let visual = match (ctx.media_kind, ctx.sample.is_some()) {
        (Some(MediaKind::Image), true) => "Analyze the contents of this image.",
        (Some(MediaKind::Video), true) => "Analyze this frame from the uploaded video.",
        _ => "",
    };
    format!(
        "You are a {breed} currently in a {scene} setting.\n{visual}\n\n{TRANSLATION_GUIDE}",
        breed = ctx.breed,
        scene = ctx.scene.name().to_lowercase(),
    )
}

pub fn thought_request(ctx: &ThoughtContext) -> GenerateRequest {
    let mut parts = Vec::with_capacity(2);
    if let Some(sample) = &ctx.sample {
        parts.push(Part::from(sample));
    }
    parts.push(Part::Text(thought_prompt(ctx)));
    GenerateRequest {
        parts,
        temperature: Some(THOUGHT_TEMPERATURE),
        max_output_tokens: Some(THOUGHT_MAX_OUTPUT_TOKENS),
        response_schema: None,
    }
}

pub fn pick_fallback<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    FALLBACK_THOUGHTS
        .choose(rng)
        .copied()
        .unwrap_or(FALLBACK_THOUGHTS[0])
}

pub fn random_fallback() -> &'static str {
    pick_fallback(&mut rand::thread_rng())
}

/// How a caption request ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ThoughtOutcome {
    Generated(String),
    Fallback(String),
}

impl ThoughtOutcome {
    pub fn text(&self) -> &str {
        match self {
            Self::Generated(t) | Self::Fallback(t) => t,
        }
    }
}

/// Ask for a caption. Never fails: errors and blank replies produce a random
/// fallback caption.
#[tracing::instrument(skip_all, fields(backend = backend.name(), breed = %ctx.breed, scene = %ctx.scene.name()))]
pub async fn generate_thought(backend: &dyn GenerativeBackend, ctx: &ThoughtContext) -> ThoughtOutcome {
    let reply = backend.generate(&thought_request(ctx)).await;
    let failure = match reply {
        Ok(text) => {
            let text = text.trim();
            if !text.is_empty() {
                return ThoughtOutcome::Generated(text.to_owned());
            }
            "empty reply".to_owned()
        }
        Err(e) => e.to_string(),
    };
    tracing::warn!(error = %failure, "dog thought failed; using a canned one");
    ThoughtOutcome::Fallback(random_fallback().to_owned())
}

/// Caption state as presented to the user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ThoughtState {
    #[default]
    Idle,
    Requesting {
        seq: u64,
    },
    Ready {
        text: String,
    },
    Failed {
        text: String,
    },
}

impl ThoughtState {
    pub fn is_requesting(&self) -> bool {
        matches!(self, Self::Requesting { .. })
    }

    /// Caption text, if one is on screen. Both real and fallback captions count.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Ready { text } | Self::Failed { text } => Some(text),
            Self::Idle | Self::Requesting { .. } => None,
        }
    }

    /// What the caption bubble shows.
    pub fn display(&self) -> &str {
        match self {
            Self::Requesting { .. } => THINKING_INDICATOR,
            other => other.text().unwrap_or(""),
        }
    }
}

/// Issues strictly increasing sequence numbers and only accepts the completion of the
/// most recent one.
#[derive(Clone, Debug, Default)]
pub struct ThoughtOrchestrator {
    latest: u64,
    state: ThoughtState,
}

impl ThoughtOrchestrator {
    pub fn state(&self) -> &ThoughtState {
        &self.state
    }

    /// Start a request; any in-flight one becomes stale.
    pub fn begin(&mut self) -> u64 {
        self.latest += 1;
        self.state = ThoughtState::Requesting { seq: self.latest };
        tracing::debug!(seq = self.latest, "thought requested");
        self.latest
    }

    /// Apply a completion. Returns `false` when it was superseded and ignored.
    pub fn complete(&mut self, seq: u64, outcome: ThoughtOutcome) -> bool {
        if seq != self.latest || !self.state.is_requesting() {
            tracing::debug!(seq, latest = self.latest, "discarding stale thought");
            return false;
        }
        self.state = match outcome {
            ThoughtOutcome::Generated(text) => ThoughtState::Ready { text },
            ThoughtOutcome::Fallback(text) => ThoughtState::Failed { text },
        };
        true
    }

    /// Back to idle; whatever is in flight will be discarded.
    pub fn reset(&mut self) {
        self.latest += 1;
        self.state = ThoughtState::Idle;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ai/thought.rs"]
mod tests;
