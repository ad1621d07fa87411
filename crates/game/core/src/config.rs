/// Reward weights applied by the environment at the end of each step.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RewardConfig {
    /// Per enemy killed during the step.
    pub kill: f64,
    pub victory: f64,
    /// Extra victory bonus when the defeated roster contained a boss.
    pub boss_victory: f64,
    /// Per living party member on victory.
    pub survivor: f64,
    /// Multiplied by the party's cumulative damage taken on the floor.
    pub damage_penalty: f64,
    /// Flat reward for a party wipe, replacing everything else.
    pub wipe_out: f64,
    /// Flat reward when the player's own action wins the battle.
    pub finishing_blow: f64,
    /// Flat reward when the battle is lost on the player's own action.
    pub self_defeat: f64,
}

impl RewardConfig {
    pub const DEFAULT_KILL: f64 = 10.0;
    pub const DEFAULT_VICTORY: f64 = 50.0;
    pub const DEFAULT_BOSS_VICTORY: f64 = 150.0;
    pub const DEFAULT_SURVIVOR: f64 = 20.0;
    pub const DEFAULT_DAMAGE_PENALTY: f64 = 0.05;
    pub const DEFAULT_WIPE_OUT: f64 = -100.0;
    pub const DEFAULT_FINISHING_BLOW: f64 = 100.0;
    pub const DEFAULT_SELF_DEFEAT: f64 = -50.0;

    pub const fn new() -> Self {
        Self {
            kill: Self::DEFAULT_KILL,
            victory: Self::DEFAULT_VICTORY,
            boss_victory: Self::DEFAULT_BOSS_VICTORY,
            survivor: Self::DEFAULT_SURVIVOR,
            damage_penalty: Self::DEFAULT_DAMAGE_PENALTY,
            wipe_out: Self::DEFAULT_WIPE_OUT,
            finishing_blow: Self::DEFAULT_FINISHING_BLOW,
            self_defeat: Self::DEFAULT_SELF_DEFEAT,
        }
    }
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Environment tuning.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    pub rewards: RewardConfig,
    /// Steps per floor before `truncated` is raised. `None` never truncates.
    pub max_turns: Option<u32>,
}

impl BattleConfig {
    pub const fn new() -> Self {
        Self {
            rewards: RewardConfig::new(),
            max_turns: None,
        }
    }

    #[must_use]
    pub const fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = Some(max_turns);
        self
    }

    #[must_use]
    pub const fn with_rewards(mut self, rewards: RewardConfig) -> Self {
        self.rewards = rewards;
        self
    }
}
