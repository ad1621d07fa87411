use crate::config::RewardConfig;
use crate::observation::BattleOutcome;

/// Facts about one step that feed the reward.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StepSummary {
    pub enemies_killed: usize,
    pub outcome: Option<BattleOutcome>,
    pub ended_on_player_action: bool,
    pub boss_in_roster: bool,
    pub living_players: usize,
    /// Cumulative party damage on the floor.
    pub damage_taken: u32,
}

/// Scalar reward for one step.
///
/// A battle decided by the player's own action earns a flat bonus (or
/// penalty). A wipe during the enemy phase earns the flat wipe-out value.
/// Everything else is kill credit, victory bonuses and the damage penalty.
pub fn shape_reward(config: &RewardConfig, summary: &StepSummary) -> f64 {
    if summary.ended_on_player_action {
        return match summary.outcome {
            Some(BattleOutcome::Victory) => config.finishing_blow,
            Some(BattleOutcome::Defeat) => config.self_defeat,
            None => 0.0,
        };
    }
    if summary.outcome == Some(BattleOutcome::Defeat) {
        return config.wipe_out;
    }

    let mut reward = summary.enemies_killed as f64 * config.kill;
    if summary.outcome == Some(BattleOutcome::Victory) {
        reward += config.victory;
        if summary.boss_in_roster {
            reward += config.boss_victory;
        }
        reward += summary.living_players as f64 * config.survivor;
    }
    reward - f64::from(summary.damage_taken) * config.damage_penalty
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ongoing_step_counts_kills_minus_damage() {
        let summary = StepSummary {
            enemies_killed: 2,
            damage_taken: 40,
            living_players: 2,
            ..StepSummary::default()
        };
        assert_eq!(shape_reward(&RewardConfig::default(), &summary), 18.0);
    }

    #[test]
    fn boss_victory_stacks_bonuses() {
        let summary = StepSummary {
            enemies_killed: 1,
            outcome: Some(BattleOutcome::Victory),
            boss_in_roster: true,
            living_players: 2,
            damage_taken: 100,
            ..StepSummary::default()
        };
        // 10 + 50 + 150 + 40 - 5
        assert_eq!(shape_reward(&RewardConfig::default(), &summary), 245.0);
    }

    #[test]
    fn wipe_out_replaces_everything() {
        let summary = StepSummary {
            enemies_killed: 3,
            outcome: Some(BattleOutcome::Defeat),
            damage_taken: 500,
            ..StepSummary::default()
        };
        assert_eq!(shape_reward(&RewardConfig::default(), &summary), -100.0);
    }

    #[test]
    fn battle_ended_by_player_is_flat() {
        let config = RewardConfig::default();
        let win = StepSummary {
            enemies_killed: 1,
            outcome: Some(BattleOutcome::Victory),
            ended_on_player_action: true,
            ..StepSummary::default()
        };
        assert_eq!(shape_reward(&config, &win), 100.0);

        let loss = StepSummary {
            outcome: Some(BattleOutcome::Defeat),
            ended_on_player_action: true,
            ..StepSummary::default()
        };
        assert_eq!(shape_reward(&config, &loss), -50.0);
    }
}
