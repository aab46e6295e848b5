//! Final outcome classification and message pools
//!
//! Features:
//! - Score threshold split into "safe" and "danger" message pools
//! - Uniform draw within the chosen pool
//! - Optional JSON pool file with built-in defaults as fallback

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use std::error::Error;
use std::fs;

/// Which side of the score threshold the session ended on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutcomeClass {
    /// Score at or above the safe threshold
    Safe,
    /// Score below the safe threshold
    Danger,
}

/// Final session result shown on the end screen
#[derive(Clone, Debug)]
pub struct FinalOutcome {
    pub score: u32,
    pub class: OutcomeClass,
    pub message: String,
}

/// Closing message pools, one per outcome class.
///
/// Pools are non-empty by construction: both the defaults and
/// file-loaded pools are validated.
#[derive(Clone, Debug, Deserialize)]
pub struct MessagePools {
    safe: Vec<String>,
    danger: Vec<String>,
}

impl MessagePools {
    /// Built-in message pools
    pub fn defaults() -> Self {
        MessagePools {
            safe: vec![
                "🎉 You are safe from the AI threat!".to_string(),
                "🛡️ You told the machines from reality. Impressive!".to_string(),
                "✅ You have an eye for the real thing!".to_string(),
            ],
            danger: vec![
                "⚠️ Careful, the AI almost had you!".to_string(),
                "😨 Real and fake are blurring. Stay sharp before the machines take over."
                    .to_string(),
                "🚨 The pace of AI progress is not to be ignored.".to_string(),
            ],
        }
    }

    /// Load pools from a JSON file: `{"safe": [...], "danger": [...]}`
    pub fn load(path: &str) -> Result<Self, Box<dyn Error>> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("cannot read message file {}: {}", path, e))?;
        Self::parse(&content)
    }

    fn parse(content: &str) -> Result<Self, Box<dyn Error>> {
        let pools: MessagePools = serde_json::from_str(content)?;
        if pools.safe.is_empty() || pools.danger.is_empty() {
            return Err("message pools must not be empty".into());
        }
        Ok(pools)
    }
}

impl Default for MessagePools {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Picks the closing message for a finished session.
#[derive(Clone, Debug)]
pub struct OutcomeResolver {
    pools: MessagePools,
    safe_threshold: u32,
}

impl OutcomeResolver {
    pub fn new(pools: MessagePools, safe_threshold: u32) -> Self {
        OutcomeResolver {
            pools,
            safe_threshold,
        }
    }

    /// Classify a final score (threshold inclusive: score == threshold
    /// is safe).
    pub fn classify(&self, score: u32) -> OutcomeClass {
        if score >= self.safe_threshold {
            OutcomeClass::Safe
        } else {
            OutcomeClass::Danger
        }
    }

    /// Resolve a final score into an outcome with a uniformly drawn
    /// message from the matching pool.
    pub fn resolve(&self, score: u32, rng: &mut impl Rng) -> FinalOutcome {
        let class = self.classify(score);
        let pool = match class {
            OutcomeClass::Safe => &self.pools.safe,
            OutcomeClass::Danger => &self.pools.danger,
        };
        // Pools are validated non-empty, so the draw always succeeds
        let message = pool.choose(rng).cloned().unwrap_or_default();

        FinalOutcome {
            score,
            class,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn resolver() -> OutcomeResolver {
        OutcomeResolver::new(MessagePools::defaults(), 7)
    }

    #[test]
    fn test_threshold_boundary() {
        let r = resolver();
        assert_eq!(r.classify(8), OutcomeClass::Safe);
        assert_eq!(r.classify(7), OutcomeClass::Safe);
        assert_eq!(r.classify(3), OutcomeClass::Danger);
        assert_eq!(r.classify(0), OutcomeClass::Danger);
    }

    #[test]
    fn test_resolve_draws_from_matching_pool() {
        let r = resolver();
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..20 {
            let safe = r.resolve(8, &mut rng);
            assert_eq!(safe.class, OutcomeClass::Safe);
            assert!(MessagePools::defaults().safe.contains(&safe.message));

            let danger = r.resolve(3, &mut rng);
            assert_eq!(danger.class, OutcomeClass::Danger);
            assert!(MessagePools::defaults().danger.contains(&danger.message));
        }
    }

    #[test]
    fn test_parse_valid_pools() {
        let pools =
            MessagePools::parse(r#"{"safe": ["well done"], "danger": ["watch out"]}"#).unwrap();
        let r = OutcomeResolver::new(pools, 7);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(r.resolve(10, &mut rng).message, "well done");
        assert_eq!(r.resolve(0, &mut rng).message, "watch out");
    }

    #[test]
    fn test_parse_rejects_empty_pool() {
        assert!(MessagePools::parse(r#"{"safe": [], "danger": ["x"]}"#).is_err());
        assert!(MessagePools::parse(r#"{"safe": ["x"], "danger": []}"#).is_err());
    }
}
