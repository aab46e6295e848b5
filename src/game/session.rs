//! Session state machine and round controller
//!
//! Maintains:
//! - Score, round counter, and lives lost for one playthrough
//! - The non-repeating set of shown asset keys
//! - Phase transitions (NotStarted → InRound → RoundResolved → ...)
//! - Scheduled single-shot transitions with a stale-timer guard
//!
//! All mutation goes through `start`, `submit_choice`, `fire`, and
//! `reset`; the presentation layer only reads snapshots between events.

use std::error::Error;
use std::time::Duration;

use rand::Rng;
use rustc_hash::FxHashSet;

use crate::game::assets::AssetKey;
use crate::game::outcome::{FinalOutcome, OutcomeResolver};
use crate::game::sampler::PairSampler;

/// How long feedback stays visible before the next round begins
const ADVANCE_DELAY: Duration = Duration::from_millis(1200);
/// How long feedback stays visible before the end screen
const END_DELAY: Duration = Duration::from_millis(1000);

/// Session lifecycle phase
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Intro screen, nothing sampled yet
    NotStarted,
    /// A pair is on display, waiting for the player's pick
    InRound,
    /// A pick was accepted; feedback is showing and a transition is
    /// scheduled. Further picks are ignored (this phase is the lock).
    RoundResolved,
    /// Terminal: win or loss, final outcome available
    Ended,
}

/// The player's pick: left or right image
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Choice {
    Left,
    Right,
}

impl Choice {
    /// Position index into the current pair (0 = left, 1 = right)
    pub fn index(self) -> usize {
        match self {
            Choice::Left => 0,
            Choice::Right => 1,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Choice::Left),
            1 => Some(Choice::Right),
            _ => None,
        }
    }
}

/// Per-round feedback on the accepted pick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Incorrect,
}

impl Feedback {
    pub fn is_correct(self) -> bool {
        self == Feedback::Correct
    }

    pub fn message(self) -> &'static str {
        match self {
            Feedback::Correct => "✅ Correct! That one is the real photo.",
            Feedback::Incorrect => "❌ Wrong! That one was AI-generated.",
        }
    }
}

/// What a scheduled transition does when it fires
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionKind {
    /// Advance to the next round and sample a fresh pair
    NextRound,
    /// Terminate the session and resolve the final outcome
    EndSession,
}

/// A single-shot transition scheduled by `submit_choice`.
///
/// Carries the session epoch at scheduling time: a transition fired
/// after a reset no longer matches and is a defined no-op. At most one
/// transition is ever pending (the phase lock guarantees it).
#[derive(Clone, Copy, Debug)]
pub struct PendingTransition {
    pub kind: TransitionKind,
    /// How long feedback stays visible before the transition applies
    pub delay: Duration,
    epoch: u64,
}

/// Session tunables
#[derive(Clone, Debug)]
pub struct GameConfig {
    /// Rounds per session
    pub total_rounds: u32,
    /// Wrong picks allowed before elimination
    pub max_wrong: u32,
    /// Minimum score classified as a safe outcome
    pub safe_threshold: u32,
    /// Size of the REAL pool
    pub real_count: u32,
    /// Size of the FAKE pool
    pub fake_count: u32,
}

impl GameConfig {
    /// Check startup preconditions.
    ///
    /// Pool size >= round count is what bounds the sampler's rejection
    /// loop, so it is rejected here rather than surfaced mid-session.
    pub fn validate(&self) -> Result<(), Box<dyn Error>> {
        if self.total_rounds == 0 {
            return Err("total rounds must be at least 1".into());
        }
        if self.max_wrong == 0 {
            return Err("max wrong picks must be at least 1".into());
        }
        if self.real_count < self.total_rounds || self.fake_count < self.total_rounds {
            return Err(format!(
                "pool too small: {} rounds need at least {} images per pool (have {} real, {} fake)",
                self.total_rounds, self.total_rounds, self.real_count, self.fake_count
            )
            .into());
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            total_rounds: 10,
            max_wrong: 3,
            safe_threshold: 7,
            real_count: 10,
            fake_count: 10,
        }
    }
}

/// Read-only view handed to the presentation layer after every
/// transition.
#[derive(Clone, Debug)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub score: u32,
    pub round: u32,
    pub lives_remaining: u32,
    pub current_pair: Option<[AssetKey; 2]>,
    pub feedback_message: Option<&'static str>,
    pub final_outcome: Option<FinalOutcome>,
}

/// One complete playthrough: from start to win or loss.
#[derive(Clone, Debug)]
pub struct Session {
    config: GameConfig,
    sampler: PairSampler,
    resolver: OutcomeResolver,
    score: u32,
    round: u32,
    lives_lost: u32,
    used_keys: FxHashSet<AssetKey>,
    phase: Phase,
    current_pair: Option<[AssetKey; 2]>,
    last_feedback: Option<Feedback>,
    final_outcome: Option<FinalOutcome>,
    /// Bumped on reset; invalidates transitions scheduled before it
    epoch: u64,
}

impl Session {
    /// Create a fresh session. Fails if the config violates the
    /// pool-size precondition.
    pub fn new(config: GameConfig, resolver: OutcomeResolver) -> Result<Self, Box<dyn Error>> {
        config.validate()?;
        let sampler = PairSampler::new(config.real_count, config.fake_count);
        Ok(Session {
            config,
            sampler,
            resolver,
            score: 0,
            round: 1,
            lives_lost: 0,
            used_keys: FxHashSet::default(),
            phase: Phase::NotStarted,
            current_pair: None,
            last_feedback: None,
            final_outcome: None,
            epoch: 0,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn lives_lost(&self) -> u32 {
        self.lives_lost
    }

    pub fn lives_remaining(&self) -> u32 {
        self.config.max_wrong - self.lives_lost
    }

    pub fn total_rounds(&self) -> u32 {
        self.config.total_rounds
    }

    pub fn current_pair(&self) -> Option<[AssetKey; 2]> {
        self.current_pair
    }

    pub fn last_feedback(&self) -> Option<Feedback> {
        self.last_feedback
    }

    pub fn final_outcome(&self) -> Option<&FinalOutcome> {
        self.final_outcome.as_ref()
    }

    pub fn used_keys(&self) -> &FxHashSet<AssetKey> {
        &self.used_keys
    }

    /// Observable state for the presentation layer
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            score: self.score,
            round: self.round,
            lives_remaining: self.lives_remaining(),
            current_pair: self.current_pair,
            feedback_message: self.last_feedback.map(Feedback::message),
            final_outcome: self.final_outcome.clone(),
        }
    }

    /// Begin the session: enter round 1 with a fresh pair. No-op unless
    /// the session is in `NotStarted`.
    pub fn start(&mut self, rng: &mut impl Rng) {
        if self.phase != Phase::NotStarted {
            return;
        }
        self.round = 1;
        self.phase = Phase::InRound;
        self.begin_round(rng);
    }

    /// Sample the round's pair and record both keys as used.
    fn begin_round(&mut self, rng: &mut impl Rng) {
        let pair = self.sampler.sample(&self.used_keys, rng);
        for key in pair {
            self.used_keys.insert(key);
        }
        self.current_pair = Some(pair);
        self.last_feedback = None;
    }

    /// Apply the player's pick for the current round.
    ///
    /// Ignored (returns `None`) outside `InRound` — including while a
    /// previous pick's transition is still pending, which is what makes
    /// at most one pick count per round. On an accepted pick exactly one
    /// transition is scheduled: advance and termination are mutually
    /// exclusive.
    pub fn submit_choice(&mut self, choice: Choice) -> Option<PendingTransition> {
        if self.phase != Phase::InRound {
            return None;
        }
        let pair = self.current_pair?;

        let correct = pair[choice.index()].is_real();
        if correct {
            self.score += 1;
            self.last_feedback = Some(Feedback::Correct);
        } else {
            self.lives_lost += 1;
            self.last_feedback = Some(Feedback::Incorrect);
        }

        // Lock: no second pick until the transition fires
        self.phase = Phase::RoundResolved;

        let final_round = self.round >= self.config.total_rounds;
        let (kind, delay) = if correct && final_round {
            (TransitionKind::EndSession, END_DELAY)
        } else if self.lives_lost >= self.config.max_wrong {
            (TransitionKind::EndSession, END_DELAY)
        } else if !final_round {
            (TransitionKind::NextRound, ADVANCE_DELAY)
        } else {
            // Wrong pick on the final round with lives remaining: the
            // session still ends, scored as played
            (TransitionKind::EndSession, END_DELAY)
        };

        Some(PendingTransition {
            kind,
            delay,
            epoch: self.epoch,
        })
    }

    /// Apply a scheduled transition after its delay has elapsed.
    ///
    /// A transition from before a reset (epoch mismatch) or arriving in
    /// the wrong phase is a no-op.
    pub fn fire(&mut self, transition: PendingTransition, rng: &mut impl Rng) {
        if transition.epoch != self.epoch || self.phase != Phase::RoundResolved {
            return;
        }
        match transition.kind {
            TransitionKind::NextRound => {
                self.round += 1;
                self.phase = Phase::InRound;
                self.begin_round(rng);
            }
            TransitionKind::EndSession => {
                self.final_outcome = Some(self.resolver.resolve(self.score, rng));
                self.phase = Phase::Ended;
            }
        }
    }

    /// Clear all accumulated state and re-enter `NotStarted`.
    ///
    /// Bumps the epoch so a transition still pending from before the
    /// reset can never apply.
    pub fn reset(&mut self) {
        self.score = 0;
        self.round = 1;
        self.lives_lost = 0;
        self.used_keys.clear();
        self.phase = Phase::NotStarted;
        self.current_pair = None;
        self.last_feedback = None;
        self.final_outcome = None;
        self.epoch += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::outcome::{MessagePools, OutcomeClass};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn session() -> Session {
        session_with(GameConfig::default())
    }

    fn session_with(config: GameConfig) -> Session {
        let threshold = config.safe_threshold;
        let resolver = OutcomeResolver::new(MessagePools::defaults(), threshold);
        Session::new(config, resolver).unwrap()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(99)
    }

    /// Pick the real image if `correct`, the fake one otherwise.
    fn pick(session: &mut Session, correct: bool) -> Option<PendingTransition> {
        let pair = session.current_pair().unwrap();
        let real_side = if pair[0].is_real() {
            Choice::Left
        } else {
            Choice::Right
        };
        let choice = if correct {
            real_side
        } else {
            match real_side {
                Choice::Left => Choice::Right,
                Choice::Right => Choice::Left,
            }
        };
        session.submit_choice(choice)
    }

    #[test]
    fn test_start_enters_first_round() {
        let mut s = session();
        let mut rng = rng();
        assert_eq!(s.phase(), Phase::NotStarted);

        s.start(&mut rng);
        assert_eq!(s.phase(), Phase::InRound);
        assert_eq!(s.round(), 1);
        assert_eq!(s.used_keys().len(), 2);

        let pair = s.current_pair().unwrap();
        assert_eq!(pair.iter().filter(|k| k.is_real()).count(), 1);
    }

    #[test]
    fn test_correct_pick_updates_score_and_locks() {
        let mut s = session();
        let mut rng = rng();
        s.start(&mut rng);

        let t = pick(&mut s, true).unwrap();
        assert_eq!(s.score(), 1);
        assert_eq!(s.lives_lost(), 0);
        assert_eq!(s.phase(), Phase::RoundResolved);
        assert_eq!(s.last_feedback(), Some(Feedback::Correct));
        assert_eq!(t.kind, TransitionKind::NextRound);
    }

    #[test]
    fn test_wrong_pick_costs_a_life() {
        let mut s = session();
        let mut rng = rng();
        s.start(&mut rng);

        let t = pick(&mut s, false).unwrap();
        assert_eq!(s.score(), 0);
        assert_eq!(s.lives_lost(), 1);
        assert_eq!(s.lives_remaining(), 2);
        assert_eq!(s.last_feedback(), Some(Feedback::Incorrect));
        assert_eq!(t.kind, TransitionKind::NextRound);
    }

    #[test]
    fn test_second_pick_while_locked_is_ignored() {
        let mut s = session();
        let mut rng = rng();
        s.start(&mut rng);

        pick(&mut s, true).unwrap();
        let score = s.score();
        let lives = s.lives_lost();
        let round = s.round();

        assert!(s.submit_choice(Choice::Left).is_none());
        assert!(s.submit_choice(Choice::Right).is_none());
        assert_eq!(s.score(), score);
        assert_eq!(s.lives_lost(), lives);
        assert_eq!(s.round(), round);
    }

    #[test]
    fn test_pick_before_start_is_ignored() {
        let mut s = session();
        assert!(s.submit_choice(Choice::Left).is_none());
        assert_eq!(s.phase(), Phase::NotStarted);
    }

    #[test]
    fn test_used_keys_grow_by_two_per_round() {
        let mut s = session();
        let mut rng = rng();
        s.start(&mut rng);

        for round in 1..=5u32 {
            assert_eq!(s.used_keys().len(), 2 * round as usize);
            let t = pick(&mut s, true).unwrap();
            s.fire(t, &mut rng);
        }
        assert_eq!(s.round(), 6);
        assert_eq!(s.used_keys().len(), 12);
    }

    #[test]
    fn test_three_wrong_picks_end_in_loss() {
        let mut s = session();
        let mut rng = rng();
        s.start(&mut rng);

        for expected_lives in 1..=3u32 {
            let t = pick(&mut s, false).unwrap();
            assert_eq!(s.lives_lost(), expected_lives);
            if expected_lives < 3 {
                assert_eq!(t.kind, TransitionKind::NextRound);
                s.fire(t, &mut rng);
            } else {
                // Third miss terminates; it must not also advance
                assert_eq!(t.kind, TransitionKind::EndSession);
                s.fire(t, &mut rng);
            }
        }

        assert_eq!(s.phase(), Phase::Ended);
        assert_eq!(s.lives_lost(), 3);
        let outcome = s.final_outcome().unwrap();
        assert_eq!(outcome.score, 0);
        assert_eq!(outcome.class, OutcomeClass::Danger);
    }

    #[test]
    fn test_perfect_game_ends_in_safe_win() {
        let mut s = session();
        let mut rng = rng();
        s.start(&mut rng);

        for round in 1..=10u32 {
            assert_eq!(s.round(), round);
            let t = pick(&mut s, true).unwrap();
            if round < 10 {
                assert_eq!(t.kind, TransitionKind::NextRound);
            } else {
                assert_eq!(t.kind, TransitionKind::EndSession);
            }
            s.fire(t, &mut rng);
        }

        assert_eq!(s.phase(), Phase::Ended);
        assert_eq!(s.score(), 10);
        let outcome = s.final_outcome().unwrap();
        assert_eq!(outcome.score, 10);
        assert_eq!(outcome.class, OutcomeClass::Safe);
        assert!(!outcome.message.is_empty());
    }

    #[test]
    fn test_final_round_miss_ends_session() {
        let mut s = session();
        let mut rng = rng();
        s.start(&mut rng);

        for _ in 1..10 {
            let t = pick(&mut s, true).unwrap();
            s.fire(t, &mut rng);
        }
        assert_eq!(s.round(), 10);

        let t = pick(&mut s, false).unwrap();
        assert_eq!(t.kind, TransitionKind::EndSession);
        s.fire(t, &mut rng);

        assert_eq!(s.phase(), Phase::Ended);
        assert_eq!(s.lives_lost(), 1);
        // 9 correct picks clears the threshold
        assert_eq!(s.final_outcome().unwrap().class, OutcomeClass::Safe);
    }

    #[test]
    fn test_pick_after_end_is_ignored() {
        let mut s = session();
        let mut rng = rng();
        s.start(&mut rng);
        for _ in 0..3 {
            let t = pick(&mut s, false).unwrap();
            s.fire(t, &mut rng);
        }
        assert_eq!(s.phase(), Phase::Ended);
        assert!(s.submit_choice(Choice::Left).is_none());
        assert_eq!(s.lives_lost(), 3);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut s = session();
        let mut rng = rng();
        s.start(&mut rng);
        let t = pick(&mut s, true).unwrap();
        s.fire(t, &mut rng);

        s.reset();
        assert_eq!(s.phase(), Phase::NotStarted);
        assert_eq!(s.score(), 0);
        assert_eq!(s.round(), 1);
        assert_eq!(s.lives_lost(), 0);
        assert!(s.used_keys().is_empty());
        assert!(s.current_pair().is_none());
        assert!(s.last_feedback().is_none());
        assert!(s.final_outcome().is_none());
    }

    #[test]
    fn test_stale_transition_after_reset_is_noop() {
        let mut s = session();
        let mut rng = rng();
        s.start(&mut rng);

        let stale = pick(&mut s, false).unwrap();
        s.reset();
        s.fire(stale, &mut rng);

        assert_eq!(s.phase(), Phase::NotStarted);
        assert!(s.final_outcome().is_none());

        // The stale timer must not leak into the next playthrough either
        s.start(&mut rng);
        s.fire(stale, &mut rng);
        assert_eq!(s.phase(), Phase::InRound);
        assert_eq!(s.round(), 1);
    }

    #[test]
    fn test_pool_too_small_is_rejected() {
        let config = GameConfig {
            real_count: 5,
            ..GameConfig::default()
        };
        let resolver = OutcomeResolver::new(MessagePools::defaults(), 7);
        assert!(Session::new(config, resolver).is_err());
    }

    #[test]
    fn test_snapshot_tracks_state() {
        let mut s = session();
        let mut rng = rng();

        let snap = s.snapshot();
        assert_eq!(snap.phase, Phase::NotStarted);
        assert!(snap.current_pair.is_none());

        s.start(&mut rng);
        pick(&mut s, false);
        let snap = s.snapshot();
        assert_eq!(snap.phase, Phase::RoundResolved);
        assert_eq!(snap.lives_remaining, 2);
        assert_eq!(snap.feedback_message, Some(Feedback::Incorrect.message()));
    }
}
