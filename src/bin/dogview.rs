use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use dogview::{
    Color, ComposeOptions, GeminiClient, GeminiConfig, GenerativeBackend, MediaAsset,
    OfflineBackend, RenderSettings, SceneSelector, ScaleTransition, Session, SizeCategory,
    ViewTransform, VisionFilter,
    ai::breed,
    compose::{compose_dog_view, compose_transition},
    media::load_display_image,
    overlay::{render_overlay, render_overlay_svg},
    perspective::describe,
    scene,
};
use image::RgbaImage;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "dogview", version, about = "See the world from dog height")]
struct Cli {
    #[command(flatten)]
    backend: BackendArgs,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one dog-view PNG from a photo or video.
    Render(RenderArgs),
    /// Render the perspective change between two sizes as a PNG sequence.
    Transition(TransitionArgs),
    /// Write the owner-feet overlay for a scene (SVG, or PNG by extension).
    Overlay(OverlayArgs),
    /// Print the SVG vision filter for a size.
    Filter(FilterArgs),
    /// Classify a breed by size.
    Classify(ClassifyArgs),
    /// Generate a dog thought for a photo or video.
    Thought(ThoughtArgs),
}

#[derive(Args, Debug)]
struct BackendArgs {
    /// Never call the model; use the built-in fallbacks.
    #[arg(long, global = true)]
    offline: bool,

    /// Gemini model name.
    #[arg(long, global = true, env = "DOGVIEW_MODEL")]
    model: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Input photo or video.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Breed to classify; its size drives the view.
    #[arg(long, default_value = "")]
    breed: String,

    /// Use this size instead of classifying.
    #[arg(long)]
    size: Option<SizeCategory>,

    #[arg(long, default_value = "CASUAL", value_parser = parse_scene)]
    scene: SceneSelector,

    /// Render the unfiltered human view.
    #[arg(long)]
    human: bool,

    #[arg(long)]
    no_feet: bool,

    #[arg(long)]
    no_vignette: bool,

    /// Skin tone for the feet, as `#rrggbb`.
    #[arg(long)]
    skin_tone: Option<Color>,

    /// JSON render settings; flags override it.
    #[arg(long)]
    settings: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct TransitionArgs {
    #[arg(long = "in")]
    in_path: PathBuf,

    #[arg(long)]
    from: SizeCategory,

    #[arg(long)]
    to: SizeCategory,

    #[arg(long, default_value_t = 30)]
    frames: u32,

    #[arg(long)]
    out_dir: PathBuf,

    #[arg(long, default_value = "CASUAL", value_parser = parse_scene)]
    scene: SceneSelector,

    #[arg(long)]
    settings: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct OverlayArgs {
    #[arg(long, default_value = "CASUAL", value_parser = parse_scene)]
    scene: SceneSelector,

    #[arg(long)]
    out: PathBuf,

    #[arg(long)]
    skin_tone: Option<Color>,

    /// Raster width when writing PNG.
    #[arg(long, default_value_t = 800)]
    width: u32,
}

#[derive(Args, Debug)]
struct FilterArgs {
    #[arg(long)]
    size: SizeCategory,

    #[arg(long, default_value = "dog-vision-filter")]
    id: String,
}

#[derive(Args, Debug)]
struct ClassifyArgs {
    #[arg(long)]
    breed: String,
}

#[derive(Args, Debug)]
struct ThoughtArgs {
    #[arg(long = "in")]
    in_path: PathBuf,

    #[arg(long, default_value = "")]
    breed: String,

    #[arg(long, default_value = "CASUAL", value_parser = parse_scene)]
    scene: SceneSelector,
}

fn parse_scene(s: &str) -> Result<SceneSelector, String> {
    Ok(SceneSelector::parse_lossy(s))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dogview=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args, make_backend(&cli.backend)?.as_ref()).await,
        Command::Transition(args) => cmd_transition(args).await,
        Command::Overlay(args) => cmd_overlay(args),
        Command::Filter(args) => {
            println!("{}", VisionFilter::for_size(args.size).to_svg_filter(&args.id));
            Ok(())
        }
        Command::Classify(args) => cmd_classify(args, make_backend(&cli.backend)?.as_ref()).await,
        Command::Thought(args) => cmd_thought(args, make_backend(&cli.backend)?.as_ref()).await,
    }
}

fn make_backend(args: &BackendArgs) -> anyhow::Result<Box<dyn GenerativeBackend>> {
    if args.offline {
        return Ok(Box::new(OfflineBackend));
    }
    let mut config = GeminiConfig::from_env();
    if let Some(model) = &args.model {
        config.model.clone_from(model);
    }
    if let Some(secs) = args.timeout_secs {
        config.timeout = Duration::from_secs(secs);
    }
    if config.api_key.is_none() {
        tracing::warn!("no GEMINI_API_KEY or API_KEY set; running offline");
        return Ok(Box::new(OfflineBackend));
    }
    Ok(Box::new(GeminiClient::new(config)?))
}

fn load_settings(path: Option<&Path>) -> anyhow::Result<RenderSettings> {
    Ok(match path {
        Some(p) => RenderSettings::load(p)?,
        None => RenderSettings::default(),
    })
}

async fn decode_still(asset: &MediaAsset) -> anyhow::Result<RgbaImage> {
    let asset = asset.clone();
    Ok(tokio::task::spawn_blocking(move || load_display_image(&asset)).await??)
}

fn write_png(path: &Path, img: &RgbaImage) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        img.as_raw(),
        img.width(),
        img.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}

async fn cmd_render(args: RenderArgs, backend: &dyn GenerativeBackend) -> anyhow::Result<()> {
    let mut settings = load_settings(args.settings.as_deref())?;
    settings.human_view |= args.human;
    settings.show_feet &= !args.no_feet;
    settings.vignette &= !args.no_vignette;
    if args.skin_tone.is_some() {
        settings.skin_tone = args.skin_tone;
    }

    let asset = MediaAsset::from_path(&args.in_path)?;
    let mut session = Session::new();
    session.set_scene(args.scene);
    session.set_breed_input(args.breed.as_str());

    if args.size.is_none()
        && let Some(job) = session.begin_classification()
    {
        let done = job.run(backend).await;
        session.apply_classification(done);
    }

    let still = decode_still(&asset).await?;
    let thought_job = session.upload(asset);

    let size = args.size.unwrap_or_else(|| session.effective_size());
    let opts = ComposeOptions::from_settings(&settings, size, session.bundle())?;
    let frame = tokio::task::spawn_blocking(move || compose_dog_view(&still, &opts)).await??;
    write_png(&args.out, &frame)?;

    if let Some(job) = thought_job {
        let done = job.run(backend).await;
        session.apply_thought(done);
    }

    println!("scene:       {}", session.scene().label());
    println!("size:        {size}");
    if let Some(a) = session.analysis() {
        println!("height:      {} cm", a.typical_height_cm);
        println!("reasoning:   {}", a.reasoning);
    }
    println!("perspective: {}", describe(size));
    println!("thought:     {}", session.thought().display());
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

async fn cmd_transition(args: TransitionArgs) -> anyhow::Result<()> {
    let settings = load_settings(args.settings.as_deref())?;
    let asset = MediaAsset::from_path(&args.in_path)?;
    let still = decode_still(&asset).await?;

    let opts = ComposeOptions::from_settings(&settings, args.to, scene::resolve(args.scene))?;
    let media = ScaleTransition::new(
        ViewTransform::for_size(args.from),
        ViewTransform::for_size(args.to),
    );
    let feet = ScaleTransition::new(
        ViewTransform::overlay_for_size(args.from),
        ViewTransform::overlay_for_size(args.to),
    );
    let frames = args.frames;
    let rendered = tokio::task::spawn_blocking(move || {
        compose_transition(&still, &opts, &media, &feet, frames)
    })
    .await??;

    for (i, frame) in rendered.iter().enumerate() {
        write_png(&args.out_dir.join(format!("frame_{i:04}.png")), frame)?;
    }
    eprintln!("wrote {} frames to {}", rendered.len(), args.out_dir.display());
    Ok(())
}

fn cmd_overlay(args: OverlayArgs) -> anyhow::Result<()> {
    let mut bundle = scene::resolve(args.scene);
    if let Some(skin) = args.skin_tone {
        bundle = bundle.with_skin_tone(skin);
    }

    let is_png = args
        .out
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("png"));
    if is_png {
        let width = args.width.max(2);
        let img = render_overlay(&bundle, width, width / 2)?;
        write_png(&args.out, &img)?;
    } else {
        std::fs::write(&args.out, render_overlay_svg(&bundle))
            .with_context(|| format!("write svg '{}'", args.out.display()))?;
    }
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

async fn cmd_classify(args: ClassifyArgs, backend: &dyn GenerativeBackend) -> anyhow::Result<()> {
    if args.breed.trim().is_empty() {
        anyhow::bail!("--breed must not be empty");
    }
    let analysis = breed::classify(backend, args.breed.trim()).await;
    println!("{}", serde_json::to_string_pretty(&analysis)?);
    Ok(())
}

async fn cmd_thought(args: ThoughtArgs, backend: &dyn GenerativeBackend) -> anyhow::Result<()> {
    let asset = MediaAsset::from_path(&args.in_path)?;
    let mut session = Session::new();
    session.set_scene(args.scene);
    session.set_breed_input(args.breed);
    if let Some(job) = session.upload(asset) {
        let done = job.run(backend).await;
        session.apply_thought(done);
    }
    println!("{}", session.thought().display());
    Ok(())
}
