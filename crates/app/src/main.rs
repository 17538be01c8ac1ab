//! Lumina - AI room redesign from the command line
//!
//! Loads a room photo, fetches design suggestions, runs one generation
//! and writes the result next to the input. Configuration comes from
//! `LUMINA_API_KEY` and `LUMINA_API_BASE`.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use lumina::{Session, SessionError, ingest};
use lumina_config::ServiceConfig;
use lumina_genai::RemoteGenAi;
use lumina_ipc::DesignStyle;
use tracing::info;
use tracing_subscriber::EnvFilter;

struct Args {
    image: PathBuf,
    prompt: String,
    style: DesignStyle,
}

fn parse_args() -> Option<Args> {
    let mut args = std::env::args().skip(1);
    let image = PathBuf::from(args.next()?);
    let mut prompt_words = Vec::new();
    let mut style = DesignStyle::Modern;

    while let Some(arg) = args.next() {
        if arg == "--style" {
            style = match args.next()?.to_lowercase().as_str() {
                "modern" => DesignStyle::Modern,
                "minimalist" => DesignStyle::Minimalist,
                "scandinavian" => DesignStyle::Scandinavian,
                "bohemian" => DesignStyle::Bohemian,
                "industrial" => DesignStyle::Industrial,
                "japandi" => DesignStyle::Japandi,
                "mid-century" | "mid-century-modern" => DesignStyle::MidCenturyModern,
                "luxury" => DesignStyle::Luxury,
                "cyberpunk" => DesignStyle::Cyberpunk,
                other => {
                    eprintln!("Unknown style: {other}");
                    return None;
                }
            };
        } else {
            prompt_words.push(arg);
        }
    }

    Some(Args {
        image,
        prompt: prompt_words.join(" "),
        style,
    })
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let Some(args) = parse_args() else {
        eprintln!("Usage: lumina <image> [--style <style>] [prompt...]");
        std::process::exit(2);
    };

    if let Err(err) = run(args).await {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), SessionError> {
    let config = ServiceConfig::from_env();
    let mut session = Session::new(RemoteGenAi::new(config));

    session.accept_image(ingest::load_image(&args.image)?)?;
    session.set_style(args.style);

    session.refresh_suggestions().await;
    for (i, suggestion) in session.suggestions().iter().enumerate() {
        println!("Suggestion {}: {}", i + 1, suggestion);
    }

    if args.prompt.is_empty() {
        // No instructions given: take the first suggestion, if any
        session.apply_suggestion(0);
    } else {
        session.set_prompt(args.prompt);
    }

    info!("Generating with style {}", session.style());
    session.generate().await?;

    let generated = session.reviewed_image()?.clone();
    let dir = args.image.parent().unwrap_or_else(|| std::path::Path::new("."));
    let timestamp_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64;
    let path = ingest::export_image(dir, &generated, timestamp_ms)?;

    println!("Saved {}", path.display());
    Ok(())
}
