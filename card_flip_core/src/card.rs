use crate::error::CardError;
use crate::color::Rgb;
use crate::multiplier::{Multiplier, MultiplierTable};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
// --- 牌面定义 ---

/// 花色 (Suit)
/// 判别值与打包牌码中的 suit 段一致 (1..=4)
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
#[repr(u8)]
pub enum Suit {
    Spade = 1,   // 黑桃 ♠️
    Heart = 2,   // 红心 ♥️
    Club = 3,    // 梅花 ♣️
    Diamond = 4, // 方块 ♦️
}

/// 点数 (Rank)
/// 判别值即打包牌码中的 rank 段 (2..=14)，Ace 最大
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    Two = 2,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

pub const SUITS: [Suit; 4] = [Suit::Spade, Suit::Heart, Suit::Club, Suit::Diamond];

pub const RANKS: [Rank; 13] = [
    Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Six, Rank::Seven,
    Rank::Eight, Rank::Nine, Rank::Ten, Rank::Jack, Rank::Queen, Rank::King, Rank::Ace,
];

impl Suit {
    pub fn from_index(n: u8) -> Option<Suit> {
        SUITS.iter().copied().find(|s| *s as u8 == n)
    }
}

impl Rank {
    pub fn from_value(n: u8) -> Option<Rank> {
        RANKS.iter().copied().find(|r| *r as u8 == n)
    }
}

/// 一张翻开的牌面 (CardFace)
///
/// 取代打包的整数牌码 `suit*16+rank`；打包形式只在 [`CardFace::code`] 和
/// [`CardFace::from_code`] 中用于与外部交互。
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
pub struct CardFace {
    pub rank: Rank,
    pub suit: Suit,
}

impl CardFace {
    pub fn new(rank: Rank, suit: Suit) -> CardFace {
        CardFace { rank, suit }
    }

    /// 随机发一张牌面，每次翻牌独立抽取 (不同位置的牌允许重复)
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> CardFace {
        let suit = SUITS[rng.random_range(0..SUITS.len())];
        let rank = RANKS[rng.random_range(0..RANKS.len())];
        CardFace { rank, suit }
    }

    /// 打包牌码，永远非零。花色和点数都是枚举，打包结果必然合法。
    pub fn code(&self) -> u8 {
        (self.suit as u8) * 16 + self.rank as u8
    }

    /// 解包牌码。0 代表背面朝上，不是合法牌面。
    pub fn from_code(code: u8) -> Result<CardFace, CardError> {
        let suit = Suit::from_index(code / 16).ok_or(CardError::InvalidCode(code))?;
        let rank = Rank::from_value(code % 16).ok_or(CardError::InvalidCode(code))?;
        Ok(CardFace { rank, suit })
    }
}

impl TryFrom<u8> for CardFace {
    type Error = CardError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        CardFace::from_code(code)
    }
}

/// 手里的一张牌 (Card)
///
/// `face` 为 `None` 表示背面朝上 (牌码 0)。
/// `multiplier` 只在第一次翻开时抽取一次，之后即使盖回去也保持不变。
#[derive(Debug, Default, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct Card {
    face: Option<CardFace>,
    multiplier: Option<Multiplier>,
}

impl Card {
    /// 一张背面朝上、从未翻开过的牌
    pub fn face_down() -> Card {
        Card::default()
    }

    pub fn face(&self) -> Option<CardFace> {
        self.face
    }

    pub fn is_face_up(&self) -> bool {
        self.face.is_some()
    }

    /// 是否曾经被翻开过 (即是否已分配倍率)
    pub fn was_revealed(&self) -> bool {
        self.multiplier.is_some()
    }

    pub fn multiplier(&self) -> Option<f64> {
        self.multiplier.map(|m| m.value)
    }

    pub fn multiplier_color(&self) -> Option<Rgb> {
        self.multiplier.map(|m| m.color)
    }

    /// 打包牌码，背面朝上时为 0
    pub fn code(&self) -> u8 {
        self.face.map_or(0, |f| f.code())
    }

    /// 翻开这张牌并返回它的倍率。
    /// 只有第一次翻开时才会从倍率表里抽取。
    pub fn reveal<R: Rng + ?Sized>(&mut self, face: CardFace, table: &MultiplierTable, rng: &mut R) -> f64 {
        self.face = Some(face);
        self.multiplier.get_or_insert_with(|| table.draw_multiplier(rng)).value
    }

    /// 盖回去。倍率保留。
    pub fn conceal(&mut self) {
        self.face = None;
    }
}

// --- 实现辅助功能 ---

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            Suit::Spade => "♠️",
            Suit::Heart => "♥️",
            Suit::Club => "♣️",
            Suit::Diamond => "♦️",
        })
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "T",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        })
    }
}

impl fmt::Display for CardFace {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.suit, self.rank)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.face {
            Some(face) => write!(f, "{}", face),
            None => write!(f, "##"),
        }
    }
}

// --- 单元测试 ---
