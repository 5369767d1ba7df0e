use card_flip_core::HAND_SIZE;

/// 终端里可以输入的命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// 加一档下注
    BetUp,
    /// 减一档下注
    BetDown,
    /// 发牌开始一局
    Play,
    /// 点击第 n 张牌 (0 起)
    Tap(usize),
    /// 重新显示牌桌
    Show,
    /// 重置游戏
    Reset,
    Help,
    Exit,
}

pub const HELP: &str = "\
可用命令:
  + / bet up        - 加注一档
  - / bet down      - 减注一档
  play              - 发牌 (下注额随即锁定)
  tap <1-3> / <1-3> - 点击一张牌：翻开或盖回
  show              - 显示牌桌
  reset             - 重置游戏
  help              - 显示帮助
  exit              - 退出";

pub fn parse_command(line: &str) -> Result<Command, String> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let command = match parts.as_slice() {
        ["+"] | ["bet", "up"] => Command::BetUp,
        ["-"] | ["bet", "down"] => Command::BetDown,
        ["play"] | ["deal"] => Command::Play,
        ["tap", n] | [n] if n.chars().all(|c| c.is_ascii_digit()) => Command::Tap(parse_card_number(n)?),
        ["tap"] => return Err("用法: tap <1-3>".to_string()),
        ["show"] => Command::Show,
        ["reset"] => Command::Reset,
        ["help"] | ["?"] => Command::Help,
        ["exit"] | ["quit"] => Command::Exit,
        _ => return Err(format!("未知命令: {}", line.trim())),
    };
    Ok(command)
}

// 用户输入从 1 开始编号
fn parse_card_number(n: &str) -> Result<usize, String> {
    match n.parse::<usize>() {
        Ok(n) if (1..=HAND_SIZE).contains(&n) => Ok(n - 1),
        _ => Err(format!("无效的牌号: {}，应为 1 到 {}", n, HAND_SIZE)),
    }
}
