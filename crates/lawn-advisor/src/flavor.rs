//! Cosmetic text for the panel. Never part of a [`crate::Verdict`].

use rand::seq::SliceRandom;

const LOADING_MESSAGES: &[&str] = &[
    "Calibrating blade height...",
    "Consulting the sky...",
    "Interrogating the clouds...",
    "Scanning the sector for rogue dandelions...",
    "Warming up the radar...",
];

const GO_QUOTES: &[&str] = &[
    "Conditions optimal. Engines start.",
    "The grass fears you. Proceed.",
    "Stripes today, legend tomorrow.",
    "No excuses left. Go mow.",
    "Clear skies, sharp blades.",
];

pub trait FlavorText {
    /// Shown while fetching readings
    fn loading_message(&self) -> String;

    /// Shown under a GO verdict
    fn go_quote(&self) -> String;
}

/// Picks a random line each call.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomFlavor;

impl FlavorText for RandomFlavor {
    fn loading_message(&self) -> String {
        pick(LOADING_MESSAGES)
    }

    fn go_quote(&self) -> String {
        pick(GO_QUOTES)
    }
}

fn pick(lines: &[&str]) -> String {
    lines
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or_default()
        .to_string()
}

/// Always returns the same lines.
#[derive(Debug, Clone)]
pub struct FixedFlavor {
    pub loading: String,
    pub quote: String,
}

impl Default for FixedFlavor {
    fn default() -> Self {
        Self {
            loading: "Scanning...".to_string(),
            quote: GO_QUOTES[0].to_string(),
        }
    }
}

impl FlavorText for FixedFlavor {
    fn loading_message(&self) -> String {
        self.loading.clone()
    }

    fn go_quote(&self) -> String {
        self.quote.clone()
    }
}
