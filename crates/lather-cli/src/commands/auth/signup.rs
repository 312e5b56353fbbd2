use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthCredentialArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct SignupResponse<'a> {
    created: bool,
    email: &'a str,
}

pub fn handle(args: &AuthCredentialArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if !ctx.credentials.sign_up(&args.email, &args.password)? {
        anyhow::bail!(
            "could not create account '{}' (e-mail needs an '@', password must not be empty, or the account already exists)",
            args.email
        );
    }
    output(
        &SignupResponse {
            created: true,
            email: args.email.trim(),
        },
        flags.format,
    )
}
