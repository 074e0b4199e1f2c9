use std::{fs, process};

use anyhow::{Context, Result, bail};
use crossterm::terminal;

use lizard_demo::{
    config::DemoConfig,
    live::{Live, canvas_contract},
    player::Player,
    recorder,
    types::PlayablePresentation,
};

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

const RUN_USAGE: &str = "lizard-demo [run]";
const RECORD_USAGE: &str = "lizard-demo record <output.json> [frames]";
const PLAY_USAGE: &str = "lizard-demo play <recording.json>";

const DEFAULT_RECORD_FRAMES: usize = 300;

fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);

    match args.next().as_deref() {
        None | Some("run") => live(),
        Some("record") => {
            let output_path = args.next().context(RECORD_USAGE)?;
            let frames = match args.next() {
                Some(n) => n.parse().with_context(|| format!("Invalid frame count {n:?}"))?,
                None => DEFAULT_RECORD_FRAMES,
            };
            record(&output_path, frames)
        }
        Some("play") => {
            let path = args.next().context(PLAY_USAGE)?;
            play(&path)
        }
        _ => bail!(
            "Lizard demo: a procedurally animated lizard that follows the mouse\n\nUsage:\n  {RUN_USAGE}\n  {RECORD_USAGE}\n  {PLAY_USAGE}"
        ),
    }
}

fn live() -> Result<()> {
    let config = DemoConfig::load();
    let (w, h) = terminal::size().context("Failed to query terminal size")?;
    let mut live = Live::new(config, canvas_contract(w, h))?;
    live.run()
}

fn record(output_path: &str, frames: usize) -> Result<()> {
    let config = DemoConfig::load();
    let (w, h) = terminal::size().unwrap_or((80, 24));
    let presentation = recorder::record(&config, canvas_contract(w, h), frames)?;

    let output_json = serde_json::to_string(&presentation)?;
    fs::write(output_path, &output_json)
        .with_context(|| format!("Failed to write {output_path}"))?;

    eprintln!("Recorded {} frames -> {}", presentation.frames.len(), output_path);
    Ok(())
}

fn play(path: &str) -> Result<()> {
    let json = fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?;
    let presentation: PlayablePresentation =
        serde_json::from_str(&json).with_context(|| format!("Failed to parse {path}"))?;

    let mut player = Player::new(presentation);
    player.play()
}
