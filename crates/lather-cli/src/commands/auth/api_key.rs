use lather_auth::api_key;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthSetApiKeyArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct SetApiKeyResponse {
    stored: bool,
    source: &'static str,
}

#[derive(Serialize)]
struct ClearApiKeyResponse {
    cleared: bool,
    env_override: bool,
}

pub fn handle_set(args: &AuthSetApiKeyArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let source = api_key::store(&args.key, &ctx.data_dir)?;
    output(
        &SetApiKeyResponse {
            stored: true,
            source: source.as_str(),
        },
        flags.format,
    )
}

pub fn handle_clear(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    api_key::delete(&ctx.data_dir)?;
    let env_override = std::env::var("LATHER_VISION__API_KEY").is_ok_and(|key| !key.is_empty());
    if env_override {
        tracing::warn!("LATHER_VISION__API_KEY is still set and will keep supplying a key");
    }
    output(
        &ClearApiKeyResponse {
            cleared: true,
            env_override,
        },
        flags.format,
    )
}
