use card_flip_core::{Card, Game, Payout, Rgb, RoundEvent, format_amount, format_multiplier};
use crossterm::style::{Color, Stylize};
use rand::Rng;

pub fn term_color(rgb: Rgb) -> Color {
    Color::Rgb { r: rgb.r, g: rgb.g, b: rgb.b }
}

/// 按倍率自带的颜色上色
fn colored_multiplier(value: f64, rgb: Rgb) -> String {
    format_multiplier(value).with(term_color(rgb)).bold().to_string()
}

/// 单张牌的显示：背面朝上只显示 `##`，朝上时显示牌面和倍率
pub fn render_card(index: usize, card: &Card) -> String {
    match (card.face(), card.multiplier(), card.multiplier_color()) {
        (Some(face), Some(value), Some(rgb)) => {
            format!("[{}] {:<4} {}", index + 1, face.to_string(), colored_multiplier(value, rgb))
        }
        _ => format!("[{}] ##", index + 1),
    }
}

pub fn render_table<R: Rng>(game: &Game<R>) -> String {
    let stake = format_amount(game.stake());
    let Some(round) = game.round() else {
        return format!("下注: {}  (输入 + / - 调整, play 发牌)", stake);
    };

    let mut lines = vec![format!("下注: {} (已锁定)", stake)];
    for (i, card) in round.hand().iter().enumerate() {
        lines.push(format!("  {}", render_card(i, card)));
    }
    match game.last_payout() {
        Some(payout) => lines.push(render_payout(payout)),
        None => lines.push("点击卡牌 (tap 1-3)".to_string()),
    }
    lines.join("\n")
}

/// 中奖弹窗
pub fn render_payout(payout: &Payout) -> String {
    format!(
        "*** TOTAL WIN: {} ***  ({} × {})  输入 reset 再来一局",
        format_amount(payout.payout).bold(),
        format_amount(payout.stake),
        format_multiplier(payout.total_multiplier),
    )
}

/// 单个事件的一行描述
pub fn describe_event(event: &RoundEvent) -> String {
    match event {
        RoundEvent::HandDealt { stake, .. } => format!("发牌完成，下注 {}", format_amount(*stake)),
        RoundEvent::CardRevealed { index, face, multiplier, first_reveal } => {
            let note = if *first_reveal { "" } else { " (倍率保持不变)" };
            format!("第 {} 张翻开: {} {}{}", index + 1, face, format_multiplier(*multiplier), note)
        }
        RoundEvent::CardConcealed { index } => format!("第 {} 张盖回", index + 1),
        RoundEvent::RoundConcluded(payout) => format!(
            "三张全部翻开，总倍率 {}，赢得 {}",
            format_multiplier(payout.total_multiplier),
            format_amount(payout.payout)
        ),
    }
}
