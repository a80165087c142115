use rand::{SeedableRng, rngs::StdRng};

use super::*;
use crate::{ai::client::ScriptedBackend, foundation::error::DogViewError};

fn jpeg_sample() -> VisualSample {
    VisualSample {
        mime: "image/jpeg".into(),
        data: "AAAA".into(),
        width: 4,
        height: 4,
    }
}

#[test]
fn empty_breed_becomes_dog() {
    assert_eq!(ThoughtContext::new("  ", SceneSelector::Casual).breed, "Dog");
    assert_eq!(ThoughtContext::new(" Pug ", SceneSelector::Casual).breed, "Pug");
}

#[test]
fn prompt_lowercases_scene_and_frames_media() {
    let ctx = ThoughtContext::new("Beagle", SceneSelector::Sport);
    let p = thought_prompt(&ctx);
    assert!(p.starts_with("You are a Beagle currently in a sport setting.\n\n"));
    assert!(p.contains("The Infinite Water Bowl"));

    let video = ctx.clone().with_sample(MediaKind::Video, Some(jpeg_sample()));
    assert!(thought_prompt(&video).contains("Analyze this frame from the uploaded video."));

    let image = ctx.clone().with_sample(MediaKind::Image, Some(jpeg_sample()));
    assert!(thought_prompt(&image).contains("Analyze the contents of this image."));

    // Failed sample extraction: no framing line, no image part.
    let dropped = ctx.with_sample(MediaKind::Video, None);
    assert!(!thought_prompt(&dropped).contains("Analyze"));
    assert!(!thought_request(&dropped).has_image());
}

#[test]
fn request_puts_image_first_with_creative_settings() {
    let ctx = ThoughtContext::new("Pug", SceneSelector::Fancy)
        .with_sample(MediaKind::Image, Some(jpeg_sample()));
    let req = thought_request(&ctx);
    assert!(matches!(req.parts[0], Part::InlineImage { .. }));
    assert!(matches!(req.parts[1], Part::Text(_)));
    assert_eq!(req.temperature, Some(1.2));
    assert_eq!(req.max_output_tokens, Some(60));
    assert!(req.response_schema.is_none());
}

#[test]
fn fallback_is_always_one_of_five() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        assert!(FALLBACK_THOUGHTS.contains(&pick_fallback(&mut rng)));
    }
    assert!(FALLBACK_THOUGHTS.contains(&random_fallback()));
}

#[tokio::test]
async fn generated_text_is_trimmed() {
    let backend = ScriptedBackend::new([Ok("  The Loud Canyon smells amazing.\n".into())]);
    let out = generate_thought(&backend, &ThoughtContext::new("", SceneSelector::Casual)).await;
    assert_eq!(
        out,
        ThoughtOutcome::Generated("The Loud Canyon smells amazing.".into())
    );
}

#[tokio::test]
async fn blank_or_failed_replies_fall_back() {
    let backend = ScriptedBackend::new([Ok("   ".into()), Err(DogViewError::remote("429"))]);
    let ctx = ThoughtContext::new("Pug", SceneSelector::Indoor);
    for _ in 0..2 {
        let out = generate_thought(&backend, &ctx).await;
        assert!(matches!(out, ThoughtOutcome::Fallback(_)));
        assert!(FALLBACK_THOUGHTS.contains(&out.text()));
    }
}

#[test]
fn orchestrator_keeps_only_the_latest() {
    let mut o = ThoughtOrchestrator::default();
    assert_eq!(o.state(), &ThoughtState::Idle);

    let first = o.begin();
    let second = o.begin();
    assert!(second > first);
    assert_eq!(o.state().display(), THINKING_INDICATOR);

    assert!(!o.complete(first, ThoughtOutcome::Generated("old".into())));
    assert!(o.state().is_requesting());

    assert!(o.complete(second, ThoughtOutcome::Generated("new".into())));
    assert_eq!(o.state().text(), Some("new"));

    // A duplicate completion of the same ticket is ignored.
    assert!(!o.complete(second, ThoughtOutcome::Generated("again".into())));
    assert_eq!(o.state().text(), Some("new"));
}

#[test]
fn fallback_outcome_is_failed_state() {
    let mut o = ThoughtOrchestrator::default();
    let seq = o.begin();
    o.complete(seq, ThoughtOutcome::Fallback(FALLBACK_THOUGHTS[2].into()));
    assert_eq!(
        o.state(),
        &ThoughtState::Failed {
            text: FALLBACK_THOUGHTS[2].into()
        }
    );
}

#[test]
fn reset_discards_in_flight() {
    let mut o = ThoughtOrchestrator::default();
    let seq = o.begin();
    o.reset();
    assert!(!o.complete(seq, ThoughtOutcome::Generated("late".into())));
    assert_eq!(o.state(), &ThoughtState::Idle);
    assert_eq!(o.state().display(), "");
}
