//! Dungeon simulator binary.
//!
//! ```bash
//! # Heuristic party, built-in dungeon
//! cargo run -p dungeon-client
//!
//! # Train a Q-learning lead for 500 runs, keep the table, then play once
//! DUNGEON_AGENT=qlearning DUNGEON_TRAIN_EPISODES=500 \
//!     DUNGEON_QTABLE_PATH=target/qtable.json cargo run -p dungeon-client
//! ```

use anyhow::{Context, Result};
use dungeon_client::{TextRenderer, logging};
use runtime::{AgentKind, Runtime, RuntimeConfig};
use tracing::{info, warn};

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    dotenvy::dotenv().ok();
    let _guard = logging::init()?;

    let config = RuntimeConfig::from_env();
    let episodes = config.train_episodes;
    let mut runtime = Runtime::from_config(config).context("failed to start runtime")?;

    if episodes > 0 {
        if runtime.config().agent == AgentKind::QLearning {
            let report = runtime.train(episodes).context("training failed")?;
            println!(
                "Trained {} episodes: success rate {:.2}%, mean reward {:.2}, final epsilon {:.4}",
                report.episodes(),
                report.success_rate(),
                report.mean_reward(),
                report.final_epsilon
            );
        } else {
            warn!(agent = %runtime.config().agent, "DUNGEON_TRAIN_EPISODES ignored for non-learning agent");
        }
    }

    let mut renderer = TextRenderer::new(std::io::stdout().lock());
    let report = runtime.run_with(&mut renderer).context("dungeon run failed")?;
    renderer.report(&report);
    renderer.finish().context("failed to write battle log")?;

    info!(outcome = ?report.outcome, "run complete");
    Ok(())
}
