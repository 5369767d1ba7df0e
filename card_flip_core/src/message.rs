use crate::card::CardFace;
use crate::round::RoundId;
use serde::{Deserialize, Serialize};

// --- 核心 -> 展示层 的事件 ---
// 展示层据此重绘牌面、弹出中奖信息。

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum RoundEvent {
    /// 发了一手新的背面朝上的牌，下注额已锁定
    HandDealt { round_id: RoundId, stake: f64 },

    /// 一张牌被翻开
    CardRevealed {
        index: usize,
        face: CardFace,
        multiplier: f64,
        /// 是否是这张牌第一次翻开 (即刚刚抽取了倍率)
        first_reveal: bool,
    },

    /// 一张牌被盖回，倍率保留
    CardConcealed { index: usize },

    /// 三张牌同时朝上，本局结束
    RoundConcluded(Payout),
}

/// 一局的结算结果
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Payout {
    pub round_id: RoundId,
    pub stake: f64,
    pub total_multiplier: f64,
    /// stake * total_multiplier
    pub payout: f64,
}

impl Payout {
    pub fn new(round_id: RoundId, stake: f64, total_multiplier: f64) -> Payout {
        Payout { round_id, stake, total_multiplier, payout: stake * total_multiplier }
    }
}
