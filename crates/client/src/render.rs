//! Plain-text battle view.

use std::io::{self, Write};

use game_core::{CharacterView, DungeonBattleEnv, Observation, StepResult};
use runtime::{RunObserver, RunOutcome, RunReport};

/// One status line, e.g. `Kiwi         HP 150/150 MP  80/80`.
pub fn status_line(view: &CharacterView) -> String {
    let mut line = format!(
        "{:<12} HP {:>3}/{:<3} MP {:>3}/{:<3}",
        view.name, view.hp, view.max_hp, view.mp, view.max_mp
    );
    if !view.alive {
        line.push_str(" (down)");
    }
    line.trim_end().to_owned()
}

/// Party block then enemy block.
pub fn status_block(observation: &Observation) -> Vec<String> {
    let mut lines = vec!["[Party]".to_owned()];
    lines.extend(observation.players.iter().map(|view| format!("  {}", status_line(view))));
    lines.push("[Enemies]".to_owned());
    lines.extend(observation.enemies.iter().map(|view| format!("  {}", status_line(view))));
    lines
}

pub fn summary(report: &RunReport) -> String {
    let ending = match report.outcome {
        RunOutcome::Cleared => "dungeon cleared".to_owned(),
        RunOutcome::Defeated { floor } => format!("party defeated on floor {}", floor + 1),
        RunOutcome::Truncated { floor } => format!("turn limit reached on floor {}", floor + 1),
    };
    format!(
        "Result: {ending} | floors cleared: {} | turns: {} | total reward: {:.2}",
        report.floors_cleared, report.turns, report.total_reward
    )
}

/// Prints the battle as it unfolds.
///
/// Write failures are remembered and reported by [`finish`](Self::finish).
pub struct TextRenderer<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    fn write_lines<I>(&mut self, lines: I)
    where
        I: IntoIterator<Item = String>,
    {
        if self.error.is_some() {
            return;
        }
        for line in lines {
            if let Err(err) = writeln!(self.out, "{line}") {
                self.error = Some(err);
                return;
            }
        }
    }

    pub fn report(&mut self, report: &RunReport) {
        self.write_lines([String::new(), summary(report)]);
    }

    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> RunObserver for TextRenderer<W> {
    fn on_floor(&mut self, env: &mut DungeonBattleEnv) {
        let mut lines = vec![String::new()];
        lines.extend(env.drain_log());
        lines.extend(status_block(&env.observation()));
        self.write_lines(lines);
    }

    fn on_step(&mut self, env: &mut DungeonBattleEnv, result: &StepResult) {
        let mut lines = vec![format!(
            "-- turn {} (reward {:+.2}) --",
            result.observation.turn, result.reward
        )];
        lines.extend(env.drain_log());
        lines.extend(status_block(&result.observation));
        self.write_lines(lines);
    }
}
