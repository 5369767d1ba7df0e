use serde::{Deserialize, Serialize};

/// 可选下注额 (从小到大)
pub const BET_AMOUNTS: [f64; 9] = [0.1, 0.2, 0.5, 1.0, 2.0, 5.0, 10.0, 15.0, 20.0];

/// 默认下注档位，对应 1.00
pub const DEFAULT_BET_INDEX: usize = 3;

/// 下注选择器
///
/// 发牌后被锁定，锁定期间加减注都不生效。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetSelector {
    index: usize,
    locked: bool,
}

impl Default for BetSelector {
    fn default() -> Self {
        BetSelector { index: DEFAULT_BET_INDEX, locked: false }
    }
}

impl BetSelector {
    pub fn new() -> BetSelector {
        BetSelector::default()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> f64 {
        BET_AMOUNTS[self.index]
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// 加一档，返回下注额是否改变
    pub fn increase(&mut self) -> bool {
        if self.locked || self.index + 1 >= BET_AMOUNTS.len() {
            return false;
        }
        self.index += 1;
        true
    }

    /// 减一档，返回下注额是否改变
    pub fn decrease(&mut self) -> bool {
        if self.locked || self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    pub fn lock(&mut self) {
        self.locked = true;
    }
}
