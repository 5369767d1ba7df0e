use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use card_flip_core::MultiplierTable;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

// 倍率表在启动时校验一次，之后只读共享
type SharedTable = Arc<MultiplierTable>;

/// 翻牌游戏倍率表服务
#[derive(Parser, Debug)]
#[command(name = "card_flip_server", version, about = "Serves the card flip multiplier table")]
struct Cli {
    /// 监听地址
    #[arg(long, env = "CARD_FLIP_ADDR", default_value = "0.0.0.0:25917")]
    addr: SocketAddr,

    /// 倍率表 JSON 文件；不指定时使用内置标准表
    #[arg(long, env = "CARD_FLIP_TABLE")]
    table: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("card_flip_server=info,card_flip_core=info,warn"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    // 倍率表无效时游戏不能开始
    let table = match load_table(cli.table.as_deref()).await {
        Ok(table) => table,
        Err(e) => {
            error!("倍率表无效，拒绝启动: {}", e);
            return Err(e);
        }
    };
    info!(entries = table.entries().len(), total_weight = table.total_weight(), "倍率表已加载");

    let app = router(Arc::new(table));

    let listener = tokio::net::TcpListener::bind(cli.addr).await?;
    info!("服务器正在监听 {}", cli.addr);
    axum::serve(listener, app).await?;
    Ok(())
}

fn router(table: SharedTable) -> Router {
    Router::new()
        .route("/multipliers.json", get(multipliers_handler))
        .with_state(table)
}

/// 读取并校验倍率表
async fn load_table(path: Option<&Path>) -> Result<MultiplierTable, BoxError> {
    let Some(path) = path else {
        info!("未指定倍率表文件，使用内置标准表");
        return Ok(MultiplierTable::standard());
    };
    let json = tokio::fs::read_to_string(path).await?;
    let table = MultiplierTable::from_json(&json)?;
    info!("已从 {} 读取倍率表", path.display());
    Ok(table)
}

async fn multipliers_handler(State(table): State<SharedTable>) -> Json<MultiplierTable> {
    debug!("发送倍率表");
    Json(table.as_ref().clone())
}

// --- 单元测试 ---
