use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::color::hex;
use crate::types::Color;

// ---------------------------------------------------------------------------
// Build-time constants
// ---------------------------------------------------------------------------

/// Number of spine segments, head to tail tip.
pub const SEGMENT_COUNT: usize = 60;
/// World space is a fixed canvas; the terminal scales it to fit.
pub const WORLD_WIDTH: f64 = 1920.0;
pub const WORLD_HEIGHT: f64 = 1080.0;
pub const TARGET_FPS: u32 = 60;
pub const BG_COLOR: Color = hex(0x12100a);

// ---------------------------------------------------------------------------
// Runtime configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub fps: u32,
    /// Fixed seed for every random draw; `None` seeds from the OS.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// `#rrggbb`
    pub background: String,
    /// Draw the rock-tile floor and vignette.
    pub show_backdrop: bool,
    pub key_bindings: KeyBindings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub quit: String,
    pub alt_quit: String,
    pub pause: String,
    pub fullscreen: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        KeyBindings {
            quit: "Esc".into(),
            alt_quit: "q".into(),
            pause: "Space".into(),
            fullscreen: "F11".into(),
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoConfig {
            fps: TARGET_FPS,
            seed: None,
            background: BG_COLOR.to_hex(),
            show_backdrop: true,
            key_bindings: KeyBindings::default(),
        }
    }
}

impl DemoConfig {
    /// Read `~/.config/lizard-demo/config.json`. A missing file gives the
    /// defaults; an unreadable one is logged and also gives the defaults.
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => {
                log::debug!("loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("{e:#}; using defaults");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&json).with_context(|| format!("Invalid config {}", path.display()))
    }

    fn config_path() -> PathBuf {
        let home = std::env::var_os("HOME").map_or_else(|| PathBuf::from("."), PathBuf::from);
        home.join(".config").join("lizard-demo").join("config.json")
    }

    pub fn background_color(&self) -> Result<Color> {
        Color::from_hex(&self.background).context("Invalid background colour in config")
    }

    /// Ticks per second, never below 1.
    pub fn fps(&self) -> u32 {
        self.fps.max(1)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps() as f64)
    }

    /// The configured seed, or a fresh one.
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| rand::rng().random())
    }

    /// Independent generator number `stream` derived from `seed`.
    pub fn rng(seed: u64, stream: u64) -> ChaCha8Rng {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(stream);
        rng
    }
}

/// A parsed key binding such as `Esc`, `F11`, `q` or `Ctrl-c`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySpec {
    pub code: KeyCode,
    pub ctrl: bool,
}

impl KeySpec {
    pub fn parse(binding: &str) -> Option<KeySpec> {
        let (ctrl, name) = match binding.strip_prefix("Ctrl-") {
            Some(rest) => (true, rest),
            None => (false, binding),
        };
        let code = match name {
            "Esc" => KeyCode::Esc,
            "Space" => KeyCode::Char(' '),
            "Enter" => KeyCode::Enter,
            "Tab" => KeyCode::Tab,
            "Left" => KeyCode::Left,
            "Right" => KeyCode::Right,
            "Up" => KeyCode::Up,
            "Down" => KeyCode::Down,
            "Home" => KeyCode::Home,
            "End" => KeyCode::End,
            _ => match name.strip_prefix('F').and_then(|n| n.parse::<u8>().ok()) {
                Some(n) => KeyCode::F(n),
                None => {
                    let mut chars = name.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) => KeyCode::Char(c),
                        _ => return None,
                    }
                }
            },
        };
        Some(KeySpec { code, ctrl })
    }

    /// Plain bindings never fire with Ctrl or Alt held.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
        let alt = event.modifiers.contains(KeyModifiers::ALT);
        event.code == self.code && ctrl == self.ctrl && !alt
    }
}

/// Whether `event` triggers the binding string `binding` from config.
/// Unparseable bindings never match.
pub fn matches_binding(binding: &str, event: &KeyEvent) -> bool {
    KeySpec::parse(binding).is_some_and(|spec| spec.matches(event))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn partial_config_fills_defaults() {
        let cfg: DemoConfig = serde_json::from_str(r#"{"fps": 30, "seed": 7}"#).unwrap();
        assert_eq!(cfg.fps(), 30);
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.background_color().unwrap(), BG_COLOR);
        assert_eq!(cfg.key_bindings.quit, "Esc");
        assert!(cfg.show_backdrop);
    }

    #[test]
    fn bad_background_is_an_error() {
        let cfg = DemoConfig { background: "green".into(), ..Default::default() };
        assert!(cfg.background_color().is_err());
    }

    #[test]
    fn zero_fps_is_clamped() {
        let cfg = DemoConfig { fps: 0, ..Default::default() };
        assert_eq!(cfg.frame_interval(), Duration::from_secs(1));
    }

    #[test]
    fn streams_differ_for_same_seed() {
        let mut a = DemoConfig::rng(9, 0);
        let mut b = DemoConfig::rng(9, 1);
        let mut a2 = DemoConfig::rng(9, 0);
        let x: u64 = a.random();
        assert_ne!(x, b.random::<u64>());
        assert_eq!(x, a2.random::<u64>());
    }

    #[test]
    fn bindings_match_keys() {
        assert!(matches_binding("Esc", &key(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(matches_binding("q", &key(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(!matches_binding("q", &key(KeyCode::Char('q'), KeyModifiers::ALT)));
        assert!(matches_binding("Space", &key(KeyCode::Char(' '), KeyModifiers::NONE)));
        assert!(matches_binding("F11", &key(KeyCode::F(11), KeyModifiers::NONE)));
        assert!(matches_binding("Ctrl-c", &key(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!matches_binding("Ctrl-c", &key(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!matches_binding("quit", &key(KeyCode::Char('q'), KeyModifiers::NONE)));
    }

    #[test]
    fn parses_named_and_function_keys() {
        assert_eq!(KeySpec::parse("F11"), Some(KeySpec { code: KeyCode::F(11), ctrl: false }));
        assert_eq!(KeySpec::parse("Ctrl-q"), Some(KeySpec { code: KeyCode::Char('q'), ctrl: true }));
        assert_eq!(KeySpec::parse("F"), Some(KeySpec { code: KeyCode::Char('F'), ctrl: false }));
        assert_eq!(KeySpec::parse(""), None);
    }

    #[test]
    fn unreadable_file_is_an_error() {
        let missing = Path::new("/nonexistent/lizard-demo/config.json");
        assert!(DemoConfig::load_from(missing).is_err());
    }
}
