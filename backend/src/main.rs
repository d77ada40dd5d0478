use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use changelog_backend::{
    config::Config,
    db::connection::create_pool,
    models::PageRequest,
    repositories::ChangeLogOptions,
    services::ChangeLogReader,
    types::ContentTypeSlug,
};

const USAGE: &str = "usage: changelog-backend [CONTENT_TYPE|all] [PAGE] [PER_PAGE]";

fn mask_database_url(raw: &str) -> String {
    match url::Url::parse(raw) {
        Ok(mut parsed) => {
            if parsed.password().is_some() {
                let _ = parsed.set_password(Some("***"));
            }
            parsed.to_string()
        }
        Err(_) => "<unparseable>".into(),
    }
}

fn parse_page_arg(value: Option<String>, name: &str) -> anyhow::Result<Option<i64>> {
    value
        .map(|raw| {
            raw.parse::<i64>()
                .map_err(|_| anyhow::anyhow!("{} must be a number (got `{}`)\n{}", name, raw, USAGE))
        })
        .transpose()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "changelog_backend=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut args = std::env::args().skip(1);
    let content_type = args
        .next()
        .filter(|arg| !arg.eq_ignore_ascii_case("all"))
        .map(ContentTypeSlug::from);
    let page = parse_page_arg(args.next(), "PAGE")?;
    let per_page = parse_page_arg(args.next(), "PER_PAGE")?;

    let config = Config::load()?;
    tracing::info!(
        database_url = %mask_database_url(&config.database_url),
        changelog_table = %config.changelog_table,
        content_types = ?config.content_types,
        "Loaded configuration from environment/.env"
    );

    let pool = create_pool(&config).await?;
    let reader = ChangeLogReader::from_config(pool, &config)?;

    let result = reader
        .list_page(
            content_type,
            PageRequest { page, per_page },
            &ChangeLogOptions::default(),
        )
        .await?;
    tracing::info!(
        total = result.total,
        page = result.page,
        total_pages = result.total_pages(),
        "Fetched change-log page"
    );

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
