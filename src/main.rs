use anyhow::{Context, Result, anyhow};
use clap::Parser;
use muis_chat::gui::run_gui;
use muis_chat::webhook_api::{
    SERVER_ERROR_FALLBACK, WebhookClient, WebhookConfig, reply_lines,
};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Rasa серверийн хаяг
    #[arg(long, default_value = "http://localhost:5005")]
    host: String,

    /// Вэбхүүкэд илгээх sender танигч
    #[arg(long, default_value = "user123")]
    sender: String,

    /// HTTP хүсэлтийн timeout (секунд)
    #[arg(long, default_value_t = 30)]
    timeout_seconds: u64,

    /// Цонхгүй, нэг зурвас илгээгээд хариуг хэвлэнэ
    #[arg(long, default_value_t = false)]
    cli: bool,

    /// Илгээх зурвас (өгвөл CLI горимоор ажиллана)
    message: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = WebhookConfig {
        host: args.host,
        sender: args.sender,
        timeout_seconds: args.timeout_seconds,
    };

    if args.cli || args.message.is_some() {
        let message = args
            .message
            .ok_or_else(|| anyhow!("CLI горим: илгээх зурвас өгөх шаардлагатай"))?;
        run_cli(config, &message)?;
    } else {
        run_gui(config)?;
    }

    Ok(())
}

fn run_cli(config: WebhookConfig, message: &str) -> Result<()> {
    let message = message.trim();
    if message.is_empty() {
        return Ok(());
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build the async runtime")?;
    let client = WebhookClient::new(config)?;

    match runtime.block_on(client.send_message(message)) {
        Ok(replies) => {
            for line in reply_lines(&replies) {
                println!("{line}");
            }
        }
        Err(err) => {
            log::warn!("webhook exchange failed: {err:#}");
            println!("{SERVER_ERROR_FALLBACK}");
        }
    }

    Ok(())
}
