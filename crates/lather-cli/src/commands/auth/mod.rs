mod api_key;
mod login;
mod logout;
mod signup;
mod status;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthCommands;
use crate::context::AppContext;

/// Handle `lather auth <subcommand>`.
pub fn handle(action: &AuthCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        AuthCommands::Signup(args) => signup::handle(args, ctx, flags),
        AuthCommands::Login(args) => login::handle(args, ctx, flags),
        AuthCommands::Logout => logout::handle(ctx, flags),
        AuthCommands::Status => status::handle(ctx, flags),
        AuthCommands::SetApiKey(args) => api_key::handle_set(args, ctx, flags),
        AuthCommands::ClearApiKey => api_key::handle_clear(ctx, flags),
    }
}
