use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// Score deltas and ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRule {
    /// Points for a matched chord.
    #[serde(default = "default_hit_reward")]
    pub hit_reward: u32,
    /// Points lost on a wrong or empty strum.
    #[serde(default = "default_miss_penalty")]
    pub miss_penalty: u32,
    /// Upper bound of the score (five display digits).
    #[serde(default = "default_max_score")]
    pub max_score: u32,
}

fn default_hit_reward() -> u32 {
    10
}

fn default_miss_penalty() -> u32 {
    1
}

fn default_max_score() -> u32 {
    99_999
}

impl Default for ScoreRule {
    fn default() -> Self {
        Self {
            hit_reward: default_hit_reward(),
            miss_penalty: default_miss_penalty(),
            max_score: default_max_score(),
        }
    }
}

/// Engine tuning. Lane geometry and lane count are fixed and not configurable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub score: ScoreRule,
    /// Ticks a hit or miss flash stays visible to the renderer.
    #[serde(default = "default_flash_ticks")]
    pub flash_ticks: u8,
}

fn default_flash_ticks() -> u8 {
    8
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            score: ScoreRule::default(),
            flash_ticks: default_flash_ticks(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        let rule = &self.score;
        if rule.max_score == 0 {
            bail!("max_score must be positive");
        }
        if rule.hit_reward > rule.max_score {
            bail!(
                "hit_reward {} exceeds max_score {}",
                rule.hit_reward,
                rule.max_score
            );
        }
        if rule.miss_penalty > rule.max_score {
            bail!(
                "miss_penalty {} exceeds max_score {}",
                rule.miss_penalty,
                rule.max_score
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = EngineConfig::default();
        assert_eq!(config.score.hit_reward, 10);
        assert_eq!(config.score.miss_penalty, 1);
        assert_eq!(config.score.max_score, 99_999);
        assert_eq!(config.flash_ticks, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"score": {"hit_reward": 25}}"#).unwrap();
        assert_eq!(config.score.hit_reward, 25);
        assert_eq!(config.score.miss_penalty, 1);
        assert_eq!(config.flash_ticks, 8);
    }

    #[test]
    fn empty_json_is_default() {
        let config: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn rejects_zero_ceiling() {
        let config = EngineConfig {
            score: ScoreRule {
                max_score: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_reward_above_ceiling() {
        let config = EngineConfig {
            score: ScoreRule {
                hit_reward: 200,
                max_score: 100,
                ..Default::default()
            },
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("hit_reward"));
    }
}
