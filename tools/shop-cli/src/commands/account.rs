//! Sign-in, registration and session commands.

use anyhow::Result;
use dialoguer::{Input, Password};
use serde_json::json;
use shop_auth::{LoginRequest, RegisterRequest, Session};

use super::{LoginArgs, RegisterArgs};
use crate::context::Context;

fn prompt(value: Option<String>, label: &str, interactive: bool) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None if interactive => Ok(Input::<String>::new()
            .with_prompt(label)
            .allow_empty(true)
            .interact_text()?),
        None => Ok(String::new()),
    }
}

fn prompt_password(value: Option<String>, interactive: bool) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None if interactive => Ok(Password::new()
            .with_prompt("Password")
            .allow_empty_password(true)
            .interact()?),
        None => Ok(String::new()),
    }
}

/// Run the login command.
pub fn run_login(args: LoginArgs, ctx: &Context) -> Result<()> {
    let interactive = !ctx.output.is_json();
    let request = LoginRequest::new(
        prompt(args.email, "Email", interactive)?,
        prompt_password(args.password, interactive)?,
    );

    let app = ctx.storefront()?;
    let spinner = ctx.output.spinner("Signing in...");
    let result = app.login(&request);
    spinner.finish_and_clear();
    let session = result?;

    report_session(&session, "Signed in", ctx);
    Ok(())
}

/// Run the register command.
pub fn run_register(args: RegisterArgs, ctx: &Context) -> Result<()> {
    let interactive = !ctx.output.is_json();
    let request = RegisterRequest {
        name: prompt(args.name, "Full name", interactive)?,
        email: prompt(args.email, "Email", interactive)?,
        password: prompt_password(args.password, interactive)?,
        address: prompt(args.address, "Address", interactive)?,
        city: prompt(args.city, "City", interactive)?,
        postal_code: prompt(args.postal_code, "Postal code", interactive)?,
        country: prompt(args.country, "Country", interactive)?,
    };

    let app = ctx.storefront()?;
    let spinner = ctx.output.spinner("Creating account...");
    let result = app.register(&request);
    spinner.finish_and_clear();
    let session = result?;

    report_session(&session, "Account created", ctx);
    Ok(())
}

/// Run the logout command. Drops token, profile and cart.
pub fn run_logout(ctx: &Context) -> Result<()> {
    let mut app = ctx.storefront()?;
    app.logout()?;
    if ctx.output.is_json() {
        ctx.output.json(&json!({ "signedIn": false }));
    } else {
        ctx.output.success("Signed out");
    }
    Ok(())
}

/// Run the whoami command.
pub fn run_whoami(ctx: &Context) -> Result<()> {
    let app = ctx.storefront()?;
    let session = app.session()?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "signedIn": session.is_some(),
            "user": session.as_ref().map(|s| &s.user),
        }));
        return Ok(());
    }

    match session {
        Some(session) => {
            ctx.output.header("Account");
            ctx.output.kv("Name", session.user.display_name());
            ctx.output.kv("Email", &session.user.email);
            ctx.output.kv("Role", session.user.role.as_str());
        }
        None => ctx.output.info("Not signed in. Run `shop login`."),
    }
    Ok(())
}

fn report_session(session: &Session, verb: &str, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&json!({ "signedIn": true, "user": session.user }));
        return;
    }
    ctx.output
        .success(&format!("{} as {}", verb, session.user.display_name()));
    if session.is_admin() {
        ctx.output.info("Administrator access enabled. Run `shop admin` to manage products.");
    }
}
