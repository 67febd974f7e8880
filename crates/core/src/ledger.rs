/// One-time score multiplier per player.
#[derive(Debug, Clone)]
pub struct BonusLedger {
    available: Vec<bool>,
}

impl BonusLedger {
    pub fn new(players: usize) -> Self {
        Self {
            available: vec![true; players],
        }
    }

    pub fn is_available(&self, player: usize) -> bool {
        self.available.get(player).copied().unwrap_or(false)
    }

    /// Returns true exactly once per player; unknown players are never available.
    pub fn try_consume(&mut self, player: usize) -> bool {
        match self.available.get_mut(player) {
            Some(flag) if *flag => {
                *flag = false;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consumes_once_per_player() {
        let mut ledger = BonusLedger::new(3);
        for player in 0..3 {
            assert!(ledger.is_available(player));
            assert!(ledger.try_consume(player));
            for _ in 0..4 {
                assert!(!ledger.try_consume(player));
            }
            assert!(!ledger.is_available(player));
        }
    }

    #[test]
    fn players_are_independent() {
        let mut ledger = BonusLedger::new(2);
        assert!(ledger.try_consume(1));
        assert!(ledger.is_available(0));
        assert!(ledger.try_consume(0));
    }

    #[test]
    fn unknown_player_is_unavailable() {
        let mut ledger = BonusLedger::new(1);
        assert!(!ledger.try_consume(5));
        assert!(!ledger.is_available(5));
    }
}
