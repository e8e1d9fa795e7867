//! Authentication commands

use anyhow::Result;
use clap::Subcommand;

use crate::api::LoginParams;
use crate::cli::commands::{Connection, failure_message};
use crate::cli::output::{OutputFormat, print_error, print_formatted, print_success};
use crate::features::auth;
use crate::forms::{LoginValues, validate_login};
use crate::session::Session;
use crate::store::action::Fulfilled;
use crate::store::thunk;

#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Log in and store the session for later commands
    Login {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        /// Ask the backend for a long-lived session
        #[arg(long)]
        remember_me: bool,
    },

    /// Log out and forget the stored session
    Logout,

    /// Show the logged-in user
    Me,
}

pub async fn run(command: AuthCommands, format: OutputFormat, quiet: bool) -> Result<()> {
    match command {
        AuthCommands::Login {
            email,
            password,
            remember_me,
        } => {
            let values = LoginValues {
                email,
                password,
                remember_me,
            };
            login(values, quiet).await
        }
        AuthCommands::Logout => logout(quiet).await,
        AuthCommands::Me => me(format).await,
    }
}

async fn login(values: LoginValues, quiet: bool) -> Result<()> {
    let errors = validate_login(&values);
    if !errors.is_empty() {
        for (field, message) in &errors {
            print_error(&format!("{}: {}", field, message));
        }
        anyhow::bail!("Invalid credentials");
    }

    let mut conn = Connection::open()?;
    let thunk = auth::login(&conn.api, LoginParams::from(&values));

    match thunk::run(&mut conn.store, thunk).await {
        Ok(Fulfilled::LoggedIn(data)) => {
            let session = Session {
                token: data.token,
                user_id: Some(data.user_id),
            };
            session.save()?;
            print_success(&format!("Logged in as user {}", data.user_id), quiet);
            Ok(())
        }
        Ok(other) => anyhow::bail!("Unexpected login result: {:?}", other),
        Err(rejection) => {
            for field in rejection.fields_errors() {
                print_error(&format!("{}: {}", field.field, field.error));
            }
            anyhow::bail!(failure_message(&conn.store, &rejection))
        }
    }
}

async fn logout(quiet: bool) -> Result<()> {
    let mut conn = Connection::open()?;
    let thunk = auth::logout(&conn.api);
    conn.run(thunk).await?;

    Session::clear()?;
    print_success("Logged out", quiet);
    Ok(())
}

async fn me(format: OutputFormat) -> Result<()> {
    let mut conn = Connection::open()?;
    let thunk = auth::initialize_app(&conn.api);

    match conn.run(thunk).await {
        Ok(Fulfilled::Me(user)) => {
            print_formatted(&user, format, |u| {
                format!("{} <{}> (id {})", u.login, u.email, u.id)
            });
            Ok(())
        }
        Ok(other) => anyhow::bail!("Unexpected result: {:?}", other),
        Err(e) => Err(e.context("Not logged in")),
    }
}
