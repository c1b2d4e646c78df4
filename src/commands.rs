// Built-in console commands.

use anyhow::{Context as _, Result};
use std::io::Write;
use tracing::debug;

use crate::registry::{CommandRegistry, Context, Flow};
use crate::render;
use crate::ui::with_spinner;

/// Register the built-in commands. Registration order is the `help` order.
pub fn register_builtins(reg: &mut CommandRegistry) {
    reg.register("help", "List all commands.", help);
    reg.register(
        "toot",
        "Publish a toot. ex: 'toot Hello World' will publish 'Hello World'.",
        toot,
    );
    reg.register("home", "Displays the Home timeline.", home);
    reg.register("public", "Displays the Public timeline.", public);
    reg.register("note", "Displays the Notifications timeline.", note);
    reg.register("quit", "Ends the program.", quit);
    reg.register("info", "Prints your user info.", info);
}

fn write_lines(out: &mut dyn Write, lines: &[String]) -> Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn help(ctx: &mut Context<'_>, _rest: &str) -> Result<Flow> {
    writeln!(ctx.out, "Commands:")?;
    for (name, description) in ctx.registry.list_all() {
        writeln!(ctx.out, "\t{name}\t{description}")?;
    }
    Ok(Flow::Continue)
}

fn toot(ctx: &mut Context<'_>, rest: &str) -> Result<Flow> {
    if rest.trim().is_empty() {
        writeln!(ctx.out, "Nothing to toot. Usage: toot <text>")?;
        return Ok(Flow::Continue);
    }
    let status = with_spinner("Publishing...", || ctx.session.client().post_status(rest))
        .context("Failed to publish toot")?;
    debug!(id = %status.id, "published status");
    writeln!(ctx.out, "Published: {rest}")?;
    Ok(Flow::Continue)
}

fn home(ctx: &mut Context<'_>, _rest: &str) -> Result<Flow> {
    let statuses = with_spinner("Loading home timeline...", || {
        ctx.session.client().home_timeline()
    })
    .context("Failed to load home timeline")?;
    write_lines(ctx.out, &render::timeline_lines(&statuses))?;
    Ok(Flow::Continue)
}

fn public(ctx: &mut Context<'_>, _rest: &str) -> Result<Flow> {
    let statuses = with_spinner("Loading public timeline...", || {
        ctx.session.client().public_timeline()
    })
    .context("Failed to load public timeline")?;
    write_lines(ctx.out, &render::timeline_lines(&statuses))?;
    Ok(Flow::Continue)
}

fn note(ctx: &mut Context<'_>, _rest: &str) -> Result<Flow> {
    let notes = with_spinner("Loading notifications...", || {
        ctx.session.client().notifications()
    })
    .context("Failed to load notifications")?;
    write_lines(ctx.out, &render::notifications_lines(&notes))?;
    Ok(Flow::Continue)
}

/// Any argument is ignored: `quit now` quits too.
fn quit(_ctx: &mut Context<'_>, _rest: &str) -> Result<Flow> {
    Ok(Flow::Quit)
}

fn info(ctx: &mut Context<'_>, _rest: &str) -> Result<Flow> {
    let account = with_spinner("Loading account...", || ctx.session.client().own_account())
        .context("Failed to load account")?;
    write_lines(ctx.out, &render::account_lines(&account))?;
    Ok(Flow::Continue)
}
