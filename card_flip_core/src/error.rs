use thiserror::Error;

/// 倍率表配置错误，只会在加载阶段出现。
/// 出现该错误时游戏不能开始。
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("multiplier table is empty")]
    EmptyTable,
    #[error("entry {index}: chance must be a positive finite number, got {chance}")]
    InvalidChance { index: usize, chance: f64 },
    #[error("entry {index}: value must be a non-negative finite number, got {value}")]
    InvalidValue { index: usize, value: f64 },
    /// 总权重为零，或累加后溢出为无穷大
    #[error("total weight must be a positive finite number, got {0}")]
    InvalidTotal(f64),
    #[error("malformed multiplier table: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ConfigurationError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value.to_string())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CardError {
    /// 打包的牌码超出 suit*16+rank 的合法范围
    #[error("invalid card code {0}")]
    InvalidCode(u8),
}

/// 调用方误用会话时的错误，不影响牌局状态。
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("no card at index {index} (hand holds {hand_size})")]
    NoSuchCard { index: usize, hand_size: usize },
    #[error("no hand has been dealt")]
    NoActiveRound,
    #[error("a hand has already been dealt, reset the game first")]
    RoundInProgress,
}
