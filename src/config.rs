//! Game configuration: shuffle seed, draw rule and scheduler pacing.
//!
//! Pacing values only matter to whoever schedules the opponent; the engine
//! itself never waits.

use std::env;

pub const ENV_SEED: &str = "CRAZY_EIGHTS_SEED";
pub const ENV_DRAW_RULE: &str = "CRAZY_EIGHTS_DRAW_RULE";
pub const ENV_DELAY_MS: &str = "CRAZY_EIGHTS_DELAY_MS";
pub const ENV_STALL_DELAY_MS: &str = "CRAZY_EIGHTS_STALL_DELAY_MS";

/// What a successful draw does to the turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum DrawRule {
    /// The drawer keeps the turn and may play or draw again.
    #[default]
    KeepsTurn,
    /// Every successful draw passes the turn.
    EndsTurn,
}

impl DrawRule {
    pub fn label(self) -> &'static str {
        match self {
            DrawRule::KeepsTurn => "Draw keeps turn",
            DrawRule::EndsTurn => "Draw ends turn",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            DrawRule::KeepsTurn => DrawRule::EndsTurn,
            DrawRule::EndsTurn => DrawRule::KeepsTurn,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("{var}: expected an unsigned integer, got '{value}'")]
    InvalidNumber { var: &'static str, value: String },
    #[error("{var}: expected 'keep' or 'end', got '{value}'")]
    InvalidDrawRule { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct GameConfig {
    /// Fixed seed for reproducible deals; `None` draws one from the OS.
    pub seed: Option<u64>,
    pub draw_rule: DrawRule,
    /// Pause before the opponent's chosen action is applied.
    pub opponent_delay_ms: u64,
    /// Pause before a stalled participant is skipped.
    pub stall_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            draw_rule: DrawRule::default(),
            opponent_delay_ms: 1500,
            stall_delay_ms: 2000,
        }
    }
}

impl GameConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_draw_rule(mut self, rule: DrawRule) -> Self {
        self.draw_rule = rule;
        self
    }

    /// Zero delays, for tests and headless play.
    pub fn without_delays(mut self) -> Self {
        self.opponent_delay_ms = 0;
        self.stall_delay_ms = 0;
        self
    }

    /// Defaults overridden by `CRAZY_EIGHTS_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|k| env::var(k).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(v) = lookup(ENV_SEED) {
            cfg.seed = Some(parse_u64(ENV_SEED, &v)?);
        }
        if let Some(v) = lookup(ENV_DRAW_RULE) {
            cfg.draw_rule = match v.trim().to_ascii_lowercase().as_str() {
                "keep" | "keeps" => DrawRule::KeepsTurn,
                "end" | "ends" => DrawRule::EndsTurn,
                _ => return Err(ConfigError::InvalidDrawRule { var: ENV_DRAW_RULE, value: v }),
            };
        }
        if let Some(v) = lookup(ENV_DELAY_MS) {
            cfg.opponent_delay_ms = parse_u64(ENV_DELAY_MS, &v)?;
        }
        if let Some(v) = lookup(ENV_STALL_DELAY_MS) {
            cfg.stall_delay_ms = parse_u64(ENV_STALL_DELAY_MS, &v)?;
        }
        Ok(cfg)
    }
}

fn parse_u64(var: &'static str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber { var, value: value.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn default_pacing() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.draw_rule, DrawRule::KeepsTurn);
        assert_eq!(cfg.opponent_delay_ms, 1500);
        assert_eq!(cfg.stall_delay_ms, 2000);
    }

    #[test]
    fn env_overrides_apply() {
        let cfg = GameConfig::from_lookup(lookup(&[
            (ENV_SEED, "42"),
            (ENV_DRAW_RULE, "End"),
            (ENV_DELAY_MS, " 300 "),
            (ENV_STALL_DELAY_MS, "750"),
        ]))
        .unwrap();
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.draw_rule, DrawRule::EndsTurn);
        assert_eq!(cfg.opponent_delay_ms, 300);
        assert_eq!(cfg.stall_delay_ms, 750);

        let err = GameConfig::from_lookup(lookup(&[(ENV_STALL_DELAY_MS, "-1")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { var: ENV_STALL_DELAY_MS, .. }));
    }

    #[test]
    fn bad_env_values_are_reported() {
        let err = GameConfig::from_lookup(lookup(&[(ENV_SEED, "abc")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { var: ENV_SEED, .. }));
        let err = GameConfig::from_lookup(lookup(&[(ENV_DRAW_RULE, "sometimes")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDrawRule { .. }));
    }

    #[test]
    fn builders_compose() {
        let cfg =
            GameConfig::default().with_seed(9).with_draw_rule(DrawRule::EndsTurn).without_delays();
        assert_eq!(cfg.seed, Some(9));
        assert_eq!(cfg.draw_rule, DrawRule::EndsTurn);
        assert_eq!(cfg.opponent_delay_ms, 0);
        assert_eq!(cfg.stall_delay_ms, 0);
    }
}
