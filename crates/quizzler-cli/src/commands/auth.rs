//! Auth commands
//!
//! login, register, logout, whoami.

use std::io::{BufRead, Write};

use anyhow::{bail, Result};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{print_info, print_single, print_success};
use super::{format_timestamp, Context};

/// Session row for table display
#[derive(Debug, Serialize, Tabled)]
pub struct WhoamiRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Email")]
    pub email: String,
    #[tabled(rename = "Member Since")]
    pub created_at: String,
}

/// Whoami output; the token itself is never printed
#[derive(Debug, Serialize)]
struct WhoamiOutput {
    authenticated: bool,
    user: Option<quizzler_core::User>,
}

pub async fn login(ctx: &Context, email: &str, password: Option<String>) -> Result<()> {
    let password = resolve_password(password)?;
    let auth = ctx.client.login(email, &password).await?;
    print_success(&format!("Logged in as {}", display_email(&auth.user, email)), ctx.quiet);
    Ok(())
}

pub async fn register(ctx: &Context, email: &str, password: Option<String>) -> Result<()> {
    let password = resolve_password(password)?;
    let auth = ctx.client.register(email, &password).await?;
    print_success(
        &format!("Registered and logged in as {}", display_email(&auth.user, email)),
        ctx.quiet,
    );
    Ok(())
}

pub fn logout(ctx: &Context) -> Result<()> {
    let was_authenticated = ctx.session().is_authenticated();
    ctx.client.logout()?;
    if was_authenticated {
        print_success("Logged out", ctx.quiet);
    } else {
        print_info("Not logged in", ctx.quiet);
    }
    Ok(())
}

pub fn whoami(ctx: &Context) -> Result<()> {
    let session = ctx.session().session();
    let output = WhoamiOutput {
        authenticated: session.is_authenticated,
        user: session.user,
    };

    if !output.authenticated {
        if ctx.format == crate::output::OutputFormat::Json {
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            print_info("Not logged in", ctx.quiet);
        }
        return Ok(());
    }

    print_single(
        &output,
        |o| match &o.user {
            Some(user) => WhoamiRow {
                id: user.id.to_string(),
                email: user.email.clone(),
                created_at: format_timestamp(user.created_at),
            },
            None => WhoamiRow {
                id: "-".to_string(),
                email: "-".to_string(),
                created_at: "-".to_string(),
            },
        },
        ctx.format,
    )
}

fn display_email<'a>(user: &'a quizzler_core::User, fallback: &'a str) -> &'a str {
    if user.email.is_empty() {
        fallback
    } else {
        &user.email
    }
}

fn resolve_password(password: Option<String>) -> Result<String> {
    let password = match password {
        Some(p) => p,
        None => {
            eprint!("Password: ");
            std::io::stderr().flush()?;
            read_password(std::io::stdin().lock())?
        }
    };

    if password.is_empty() {
        bail!("Password is required");
    }
    Ok(password)
}

fn read_password(mut reader: impl BufRead) -> Result<String> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
