//! Run outcome state machine

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    #[default]
    Playing,
    /// Player collided or ran out of lives
    Lost,
    /// Every obstacle cleared or winning score reached
    Won,
}

impl GamePhase {
    pub fn is_over(self) -> bool {
        self != GamePhase::Playing
    }

    /// Move to a terminal phase. Only valid from `Playing`; returns whether
    /// the transition happened.
    pub fn finish(&mut self, outcome: GamePhase) -> bool {
        if *self != GamePhase::Playing || outcome == GamePhase::Playing {
            return false;
        }
        log::info!("Run finished: {:?}", outcome);
        *self = outcome;
        true
    }
}
