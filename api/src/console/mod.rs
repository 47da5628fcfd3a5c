//! Console transport: a menu-driven login flow over the same service the
//! HTTP layer uses
//!
//! The command dispatch is decoupled from terminal I/O so the console
//! behavior is testable without simulating stdin; only [`run`] touches
//! the terminal.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use otp_core::repositories::StateStore;
use otp_core::services::auth::AuthService;
use otp_shared::phone::is_valid_phone;

/// A parsed console action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Request a fresh verification code
    RequestCode,
    /// Submit a code for verification
    SubmitCode(String),
    /// Show whether this phone has completed a login
    Status,
    /// Leave the menu
    Exit,
}

/// Outcome of dispatching one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleOutcome {
    /// A code was issued (echoed since no SMS delivery exists)
    CodeIssued {
        code: String,
        resend_after_secs: i64,
    },
    /// The submitted code was accepted
    LoggedIn,
    /// Current login flag
    Status { logged_in: bool },
    /// The command was rejected; carries the user-facing message
    Rejected { message: String },
    /// Exit requested
    Exit,
}

/// Execute one console command against the auth service
pub async fn dispatch<S: StateStore>(
    service: &AuthService<S>,
    phone: &str,
    command: ConsoleCommand,
) -> ConsoleOutcome {
    match command {
        ConsoleCommand::Exit => ConsoleOutcome::Exit,
        ConsoleCommand::RequestCode => match service.request_code(phone).await {
            Ok(issued) => ConsoleOutcome::CodeIssued {
                code: issued.code,
                resend_after_secs: issued.resend_after_secs,
            },
            Err(error) => ConsoleOutcome::Rejected {
                message: error.to_string(),
            },
        },
        ConsoleCommand::SubmitCode(code) => match service.submit_code(phone, &code).await {
            Ok(()) => ConsoleOutcome::LoggedIn,
            Err(error) => ConsoleOutcome::Rejected {
                message: error.to_string(),
            },
        },
        ConsoleCommand::Status => match service.is_logged_in(phone).await {
            Ok(logged_in) => ConsoleOutcome::Status { logged_in },
            Err(error) => ConsoleOutcome::Rejected {
                message: error.to_string(),
            },
        },
    }
}

/// Interactive console loop
///
/// Prompts for a phone number once, then shows the menu until the user
/// logs in or exits. Mutations persist through the shared store exactly
/// as they do for HTTP requests.
pub async fn run<S: StateStore>(service: Arc<AuthService<S>>) -> io::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let phone = prompt(&mut lines, "Phone number: ")?;
    if !is_valid_phone(&phone) {
        println!("Invalid phone format: expected an 11-digit mobile number");
        return Ok(());
    }

    loop {
        println!("1: Submit code to log in");
        println!("2: Request a code");
        println!("3: Login status");
        println!("0: Exit");

        let choice = prompt(&mut lines, "> ")?;
        let command = match choice.as_str() {
            "0" => ConsoleCommand::Exit,
            "1" => {
                let code = prompt(&mut lines, "Code: ")?;
                ConsoleCommand::SubmitCode(code)
            }
            "2" => ConsoleCommand::RequestCode,
            "3" => ConsoleCommand::Status,
            _ => {
                println!("Unknown option");
                continue;
            }
        };

        match dispatch(&service, &phone, command).await {
            ConsoleOutcome::CodeIssued {
                code,
                resend_after_secs,
            } => {
                println!("Code sent: {code} (next request allowed in {resend_after_secs}s)");
            }
            ConsoleOutcome::LoggedIn => {
                println!("Login successful");
                return Ok(());
            }
            ConsoleOutcome::Status { logged_in } => {
                println!("Logged in: {logged_in}");
            }
            ConsoleOutcome::Rejected { message } => {
                println!("Rejected: {message}");
            }
            ConsoleOutcome::Exit => {
                println!("Bye");
                return Ok(());
            }
        }
    }
}

fn prompt<B: BufRead>(lines: &mut io::Lines<B>, text: &str) -> io::Result<String> {
    print!("{text}");
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(line?.trim().to_string()),
        None => Ok(String::new()),
    }
}
