use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pixel_gate::core::config::Config;
use pixel_gate::core::startup::{build_app, App};
use pixel_gate::core::tracing_init::init_tracing;
use pixel_gate::models::session::CurrentUser;
use pixel_gate::stores::session_store::keys;
use pixel_gate::view::events::{LoginForm, RegisterForm, SubmitEvent, TermsChecks};
use pixel_gate::view::page::{Page, PageAnchors};
use pixel_gate::view::terminal::TerminalView;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Pixel Adventure entry flow: terms, login, registration and guest access
#[derive(Parser, Debug)]
#[command(author, version, about, disable_help_subcommand = true)]
struct Cli {
    /// Configuration file; built-in defaults are used when it does not exist
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Accept the terms of service
    Terms,
    /// Verify the stored session
    Status,
    /// Log in with an existing account
    Login { username: String, password: String },
    /// Create an account and log in
    Register {
        username: String,
        password: String,
        email: Option<String>,
    },
    /// Continue as a guest
    Guest,
    /// Validate a username and check availability
    Check { username: String },
    /// Score a password
    Strength { password: String },
    /// Show the help panel
    Help,
}

impl Command {
    /// Anchors of the page this command acts on
    fn anchors(&self) -> PageAnchors {
        match self {
            Command::Terms => PageAnchors {
                terms_box: true,
                login_box: false,
            },
            Command::Login { .. } | Command::Register { .. } | Command::Guest => PageAnchors {
                terms_box: false,
                login_box: true,
            },
            _ => PageAnchors::default(),
        }
    }

    /// Whether the command runs the page-load checks first
    fn loads_page(&self) -> bool {
        !matches!(
            self,
            Command::Check { .. } | Command::Strength { .. } | Command::Help
        )
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = if cli.config.exists() {
        Config::from_file(&cli.config).context(format!(
            "Failed to load configuration from '{}'",
            cli.config.display()
        ))?
    } else {
        Config::default()
    };

    init_tracing(&config.logging)?;

    // Single-threaded event loop
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build Tokio runtime")?;

    runtime.block_on(async_main(config, cli))
}

async fn async_main(config: Config, cli: Cli) -> Result<()> {
    info!(
        config_path = %cli.config.display(),
        base_url = %config.api.base_url,
        store = %config.storage.path.display(),
        "Pixel Adventure client starting"
    );

    let view = Arc::new(TerminalView::stdout());
    let app = build_app(config, view.clone())?;
    let command = cli.command;

    if command.loads_page() {
        app.controller.on_load(Page::detect(&command.anchors())).await;
        // Terms guard or an existing session already sent the player elsewhere
        if view.next_destination().is_some() {
            return Ok(());
        }
    }

    match command {
        Command::Terms => {
            let checks = TermsChecks {
                terms: true,
                data: true,
            };
            app.controller.on_terms_checkbox_change(checks);
            app.controller.proceed_to_login(checks);
        }
        Command::Status => status(&app),
        Command::Login { username, password } => {
            let form = LoginForm { username, password };
            app.controller
                .handle_login(&mut SubmitEvent::new(), &form)
                .await;
        }
        Command::Register {
            username,
            password,
            email,
        } => {
            let form = RegisterForm {
                username,
                email,
                confirm_password: password.clone(),
                password,
            };
            app.controller
                .handle_register(&mut SubmitEvent::new(), &form)
                .await;
        }
        Command::Guest => {
            app.controller.handle_guest();
        }
        Command::Check { username } => {
            if app.controller.on_username_input(&username).is_valid() {
                app.controller.on_username_blur(&username).await;
            }
        }
        Command::Strength { password } => {
            app.controller.on_password_input(&password);
        }
        Command::Help => app.controller.show_help(),
    }

    if let Err(e) = app.context.store.compact() {
        warn!(error = %e, "Failed to compact session store");
    }

    Ok(())
}

fn status(app: &App) {
    match app.context.current_user() {
        Some(CurrentUser::Member(session)) => {
            println!("logged in as {} ({})", session.username, session.role);
        }
        Some(CurrentUser::Guest(guest)) => {
            println!("playing as guest {}", guest.guest_name);
        }
        None => match app.context.store.get(keys::GUEST_NAME) {
            Some(name) if app.context.store.get(keys::IS_GUEST).as_deref() == Some("true") => {
                println!("playing as guest {}", name);
            }
            _ => println!("not logged in"),
        },
    }

    if let Some(date) = app
        .context
        .store
        .get(keys::TERMS_ACCEPTED)
        .filter(|v| !v.is_empty())
        .and(app.context.store.get(keys::TERMS_ACCEPTED_DATE))
    {
        println!("terms accepted {}", date);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_register_with_optional_email() {
        let cli = Cli::parse_from(["pixel-gate", "register", "bob", "Passw0rd", "bob@example.com"]);
        assert_eq!(cli.config, PathBuf::from("config.toml"));
        match cli.command {
            Command::Register { username, email, .. } => {
                assert_eq!(username, "bob");
                assert_eq!(email.as_deref(), Some("bob@example.com"));
            }
            other => panic!("Expected Register, got {:?}", other),
        }

        let cli = Cli::parse_from(["pixel-gate", "--config", "alt.toml", "register", "bob", "Passw0rd"]);
        assert_eq!(cli.config, PathBuf::from("alt.toml"));
        assert!(matches!(cli.command, Command::Register { email: None, .. }));
    }

    #[test]
    fn test_commands_map_to_pages() {
        let login = Command::Login {
            username: "bob".to_string(),
            password: "x".to_string(),
        };
        assert_eq!(Page::detect(&login.anchors()), Page::LoginRegister);
        assert_eq!(Page::detect(&Command::Terms.anchors()), Page::Terms);
        assert_eq!(Page::detect(&Command::Status.anchors()), Page::Splash);
        assert!(!Command::Help.loads_page());
        assert!(Command::Guest.loads_page());
    }

    #[test]
    fn test_help_is_a_command() {
        let cli = Cli::parse_from(["pixel-gate", "help"]);
        assert!(matches!(cli.command, Command::Help));
    }
}
