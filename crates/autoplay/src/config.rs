use fivedice_core::GameConfig;

#[derive(Debug, Clone)]
pub struct AutoplayConfig {
    pub seed: u64,
    pub players: usize,
    /// Probability of trying to catch a live bonus token.
    pub catch_chance: f64,
    /// Smallest raw score worth spending the multiplier on.
    pub multiplier_threshold: u32,
    pub wager_opt_in: f64,
    pub game: GameConfig,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            seed: 0xC0FFEE,
            players: 2,
            catch_chance: 0.5,
            multiplier_threshold: 25,
            wager_opt_in: 0.5,
            game: GameConfig::default(),
        }
    }
}
