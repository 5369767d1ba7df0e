use crate::bet::BetSelector;
use crate::error::GameError;
use crate::message::{Payout, RoundEvent};
use crate::multiplier::MultiplierTable;
use crate::round::Round;
use rand::Rng;
use rand::rngs::StdRng;
use std::sync::Arc;
use tracing::info;

/// 一次游戏会话
///
/// 持有注入的倍率表和随机数源、下注选择器以及当前牌局。
/// 每次会话只能发一手牌，再玩一次需要先 [`Game::reset`]。
#[derive(Debug)]
pub struct Game<R = StdRng> {
    table: Arc<MultiplierTable>,
    rng: R,
    bet: BetSelector,
    round: Option<Round>,
    last_payout: Option<Payout>,
}

impl<R: Rng> Game<R> {
    pub fn new(table: Arc<MultiplierTable>, rng: R) -> Game<R> {
        Game {
            table,
            rng,
            bet: BetSelector::new(),
            round: None,
            last_payout: None,
        }
    }

    pub fn table(&self) -> &MultiplierTable {
        &self.table
    }

    pub fn bet(&self) -> &BetSelector {
        &self.bet
    }

    pub fn stake(&self) -> f64 {
        self.bet.current()
    }

    pub fn increase_bet(&mut self) -> bool {
        self.bet.increase()
    }

    pub fn decrease_bet(&mut self) -> bool {
        self.bet.decrease()
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn last_payout(&self) -> Option<&Payout> {
        self.last_payout.as_ref()
    }

    /// 锁定下注额并发一手新牌
    pub fn start(&mut self) -> Result<Vec<RoundEvent>, GameError> {
        if self.round.is_some() {
            return Err(GameError::RoundInProgress);
        }
        self.bet.lock();
        let round = Round::new(self.bet.current(), &mut self.rng);
        info!(round = %round.id(), stake = round.stake(), "hand dealt");

        let event = RoundEvent::HandDealt { round_id: round.id(), stake: round.stake() };
        self.round = Some(round);
        Ok(vec![event])
    }

    /// 点击第 `index` 张牌
    pub fn tap(&mut self, index: usize) -> Result<Vec<RoundEvent>, GameError> {
        let round = self.round.as_mut().ok_or(GameError::NoActiveRound)?;
        let events = round.tap(index, &self.table, &mut self.rng)?;

        for event in &events {
            if let RoundEvent::RoundConcluded(payout) = event {
                self.last_payout = Some(*payout);
            }
        }
        Ok(events)
    }

    /// 丢弃当前牌局，下注选择器回到默认状态
    pub fn reset(&mut self) {
        if let Some(round) = self.round.take() {
            info!(round = %round.id(), "game reset");
        }
        self.last_payout = None;
        self.bet = BetSelector::new();
    }
}

// --- 单元测试 ---
