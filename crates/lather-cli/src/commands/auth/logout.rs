use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct LogoutResponse {
    logged_out: bool,
    was: Option<String>,
}

pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let was = ctx.credentials.current_identity()?;
    ctx.credentials.logout()?;
    output(
        &LogoutResponse {
            logged_out: true,
            was,
        },
        flags.format,
    )
}
