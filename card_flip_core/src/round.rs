use crate::card::{Card, CardFace};
use crate::error::GameError;
use crate::message::{Payout, RoundEvent};
use crate::multiplier::MultiplierTable;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::{Builder, Uuid};

pub type RoundId = Uuid;

/// 每手固定三张牌
pub const HAND_SIZE: usize = 3;

pub type Hand = [Card; HAND_SIZE];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoundPhase {
    InProgress,
    /// 终态，只能通过重置游戏离开
    Concluded,
}

/// 一局 (Round)
///
/// 每次翻牌或盖牌后都重新检查一遍整手牌；三张同时朝上时结算并进入
/// [`RoundPhase::Concluded`]。结束后的所有操作都是空操作。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Round {
    id: RoundId,
    stake: f64,
    hand: Hand,
    phase: RoundPhase,
}

impl Round {
    /// 发一手新的背面朝上的牌。
    ///
    /// 牌局 id 同样取自传入的随机源，固定种子时整局（包括 id）都可以复现。
    pub fn new<R: Rng + ?Sized>(stake: f64, rng: &mut R) -> Round {
        Round {
            id: Builder::from_random_bytes(rng.random()).into_uuid(),
            stake,
            hand: [Card::face_down(); HAND_SIZE],
            phase: RoundPhase::InProgress,
        }
    }

    pub fn id(&self) -> RoundId {
        self.id
    }

    pub fn stake(&self) -> f64 {
        self.stake
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn card(&self, index: usize) -> Option<&Card> {
        self.hand.get(index)
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == RoundPhase::InProgress
    }

    fn check_index(index: usize) -> Result<(), GameError> {
        if index >= HAND_SIZE {
            return Err(GameError::NoSuchCard { index, hand_size: HAND_SIZE });
        }
        Ok(())
    }

    /// 点击一张牌：背面朝上则随机发一张牌面并翻开，否则盖回去。
    pub fn tap<R: Rng + ?Sized>(
        &mut self,
        index: usize,
        table: &MultiplierTable,
        rng: &mut R,
    ) -> Result<Vec<RoundEvent>, GameError> {
        Self::check_index(index)?;
        if self.hand[index].is_face_up() {
            self.conceal(index)
        } else {
            let face = CardFace::random(rng);
            self.reveal(index, face, table, rng)
        }
    }

    /// 以指定牌面翻开一张牌，随后检查是否结算
    pub fn reveal<R: Rng + ?Sized>(
        &mut self,
        index: usize,
        face: CardFace,
        table: &MultiplierTable,
        rng: &mut R,
    ) -> Result<Vec<RoundEvent>, GameError> {
        Self::check_index(index)?;
        if !self.is_active() {
            return Ok(vec![]);
        }

        let card = &mut self.hand[index];
        let first_reveal = !card.was_revealed();
        let multiplier = card.reveal(face, table, rng);
        debug!(round = %self.id, index, %face, multiplier, first_reveal, "card revealed");

        let mut events = vec![RoundEvent::CardRevealed { index, face, multiplier, first_reveal }];
        if let Some(payout) = self.evaluate() {
            events.push(RoundEvent::RoundConcluded(payout));
        }
        Ok(events)
    }

    pub fn conceal(&mut self, index: usize) -> Result<Vec<RoundEvent>, GameError> {
        Self::check_index(index)?;
        if !self.is_active() {
            return Ok(vec![]);
        }

        self.hand[index].conceal();
        debug!(round = %self.id, index, "card concealed");

        let mut events = vec![RoundEvent::CardConcealed { index }];
        if let Some(payout) = self.evaluate() {
            events.push(RoundEvent::RoundConcluded(payout));
        }
        Ok(events)
    }

    /// 三张牌全部朝上时的倍率之和
    pub fn total_multiplier(&self) -> Option<f64> {
        self.hand
            .iter()
            .map(|card| if card.is_face_up() { card.multiplier() } else { None })
            .sum()
    }

    /// 检查胜利条件。
    ///
    /// 仅在进行中且三张牌同时朝上时结算一次并返回结果；
    /// 已结束的牌局再次调用返回 `None`。
    pub fn evaluate(&mut self) -> Option<Payout> {
        if !self.is_active() {
            return None;
        }
        let total_multiplier = self.total_multiplier()?;
        self.phase = RoundPhase::Concluded;

        let payout = Payout::new(self.id, self.stake, total_multiplier);
        info!(
            round = %self.id,
            stake = self.stake,
            total_multiplier,
            payout = payout.payout,
            "round concluded"
        );
        Some(payout)
    }
}

// --- 单元测试 ---
