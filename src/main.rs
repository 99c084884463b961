use std::ffi::OsString;
use std::sync::Arc;

use tdk::app::App;
use tdk::error::{AppError, AppResult};
use tdk::template::HttpPanelService;

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let base_url = parse_cli_base_url(std::env::args_os())?;

    let mut app = App::new()?;
    let service = HttpPanelService::connect(&base_url, app.config.service.request_timeout())?;

    app.run(Arc::new(service)).await
}

fn parse_cli_base_url<I>(mut args: I) -> AppResult<String>
where
    I: Iterator<Item = OsString>,
{
    let _program = args.next();
    let Some(raw) = args.next() else {
        return Err(AppError::invalid_argument("usage: tdk <service-base-url>"));
    };

    if args.next().is_some() {
        return Err(AppError::invalid_argument(
            "usage: tdk <service-base-url> (exactly one URL argument is required)",
        ));
    }

    raw.into_string()
        .map_err(|_| AppError::invalid_argument("service base URL must be valid UTF-8"))
}
