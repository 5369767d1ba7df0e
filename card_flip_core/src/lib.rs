//! # 翻牌游戏核心逻辑库
//!
//! 这个 `core` crate 包含了翻牌下注游戏的核心状态管理：
//! 加权倍率抽样、单张牌的翻开/盖回，以及整手牌的胜利判定。
//! 它不做任何 I/O，倍率表和随机数源都由调用方注入，
//! 可以被任何上层应用 (终端客户端、倍率表服务) 复用。

mod bet;
mod card;
mod color;
mod error;
mod game;
mod message;
mod multiplier;
mod round;

pub use bet::*;

pub use card::*;

pub use color::*;

pub use error::*;

pub use game::*;

pub use message::*;

pub use multiplier::*;

pub use round::*;
