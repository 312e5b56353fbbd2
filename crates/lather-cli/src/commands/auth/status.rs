use lather_auth::api_key::{self, KeySource};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthStatusResponse {
    logged_in: bool,
    email: Option<String>,
    api_key_source: Option<&'static str>,
    note: Option<String>,
}

pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let email = ctx.credentials.current_identity()?;

    let api_key_source = api_key::detect_source(&ctx.data_dir)
        .map(KeySource::as_str)
        .or_else(|| ctx.config.vision.is_configured().then_some("config"));

    let note = api_key_source.is_none().then(|| {
        "no vision API key; run `lather auth set-api-key <key>` or set LATHER_VISION__API_KEY"
            .to_string()
    });

    output(
        &AuthStatusResponse {
            logged_in: email.is_some(),
            email,
            api_key_source,
            note,
        },
        flags.format,
    )
}
