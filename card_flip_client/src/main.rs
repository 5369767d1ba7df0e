mod command;
mod render;

use std::io::Write;
use std::sync::Arc;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use url::Url;

use card_flip_core::{Game, GameError, MultiplierTable, RoundEvent};
use command::{Command, HELP, parse_command};
use render::{describe_event, render_table};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 终端翻牌游戏客户端
#[derive(Parser, Debug)]
#[command(name = "card_flip_client", version, about = "Terminal card flip game")]
struct Cli {
    /// 倍率表服务地址
    #[arg(long, env = "CARD_FLIP_SERVER", default_value = "http://127.0.0.1:25917/")]
    server: Url,

    /// 随机数种子，用于复现一局
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // 日志写到 stderr，不干扰游戏输出
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    println!("正在获取倍率表: {}", cli.server);
    // 倍率表无效时游戏不能开始
    let table = match fetch_table(&cli.server).await {
        Ok(table) => table,
        Err(e) => {
            error!("无法加载倍率表: {}", e);
            return Err(e);
        }
    };
    info!(entries = table.entries().len(), "倍率表已加载");

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut game = Game::new(Arc::new(table), rng);

    let mut stdin = BufReader::new(tokio::io::stdin()).lines();

    println!("--- 翻牌游戏 ---");
    println!("{}", HELP);
    println!("{}", render_table(&game));

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = stdin.next_line().await? else {
            break;
        };
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };

        match command {
            Command::BetUp => {
                if !game.increase_bet() {
                    println!("下注额无法再增加");
                }
                println!("{}", render_table(&game));
            }
            Command::BetDown => {
                if !game.decrease_bet() {
                    println!("下注额无法再减少");
                }
                println!("{}", render_table(&game));
            }
            Command::Play => run_action(&mut game, |g| g.start()),
            Command::Tap(index) => run_action(&mut game, |g| g.tap(index)),
            Command::Show => println!("{}", render_table(&game)),
            Command::Reset => {
                game.reset();
                println!("游戏已重置");
                println!("{}", render_table(&game));
            }
            Command::Help => println!("{}", HELP),
            Command::Exit => break,
        }
    }

    println!("再见!");
    Ok(())
}

/// 执行一个游戏动作并打印产生的事件和牌桌
fn run_action<F>(game: &mut Game, action: F)
where
    F: FnOnce(&mut Game) -> Result<Vec<RoundEvent>, GameError>,
{
    match action(game) {
        Ok(events) => {
            for event in &events {
                println!("{}", describe_event(event));
            }
            println!("{}", render_table(game));
        }
        Err(e) => println!("操作无效: {}", e),
    }
}

/// 启动时从服务端获取并校验倍率表
async fn fetch_table(server: &Url) -> Result<MultiplierTable, BoxError> {
    let url = server.join("multipliers.json")?;
    let body = reqwest::get(url).await?.error_for_status()?.text().await?;
    Ok(MultiplierTable::from_json(&body)?)
}
