use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthCredentialArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct LoginResponse<'a> {
    logged_in: bool,
    email: &'a str,
}

pub fn handle(args: &AuthCredentialArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if !ctx.credentials.login(&args.email, &args.password)? {
        anyhow::bail!("invalid e-mail or password");
    }
    output(
        &LoginResponse {
            logged_in: true,
            email: args.email.trim(),
        },
        flags.format,
    )
}
