// UI layer: provides the interactive dashboard using `dialoguer`.
// The menu blocks while a bulk run is active, so a run can never be
// started twice and logout is only reachable between runs.

use crate::api::{Account, ApiClient};
use crate::log::{ActionLog, Outcome, Stats};
use crate::orchestrator::Orchestrator;
use crate::pacing::Pacing;
use crate::session::{Session, TokenStore};
use anyhow::Result;
use crossterm::style::Stylize;
use dialoguer::{Input, Password, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::debug;

enum DashboardExit {
    Logout,
    Quit,
}

/// Main interactive loop. Tries to resume a persisted session first,
/// then alternates between the login menu and the dashboard until the
/// user quits.
pub fn main_menu(store: &TokenStore) -> Result<()> {
    let mut session = match Session::resume(store) {
        Ok(found) => found,
        Err(err) => {
            debug!("session resume failed: {:#}", err);
            println!("Your saved token no longer works, please login again.");
            None
        }
    };

    loop {
        let current = match session.take() {
            Some(current) => current,
            None => {
                let items = vec!["Login with a personal access token", "Exit"];
                match Select::new().items(&items).default(0).interact()? {
                    0 => match handle_login(store)? {
                        Some(new_session) => new_session,
                        None => continue,
                    },
                    _ => break,
                }
            }
        };

        match dashboard(&current)? {
            DashboardExit::Logout => current.logout(store)?,
            DashboardExit::Quit => break,
        }
    }
    Ok(())
}

/// Prompt for a token and try to establish a session with it. A failed
/// validation surfaces one generic message, mirroring what the API
/// reports for both bad tokens and network trouble.
fn handle_login(store: &TokenStore) -> Result<Option<Session>> {
    let token: String = Password::new()
        .with_prompt("GitHub personal access token")
        .interact()?;

    let spinner = spinner("Validating token...");
    match Session::establish(token, store) {
        Ok(session) => {
            spinner.finish_and_clear();
            println!("Welcome {}!", display_name(&session.account));
            Ok(Some(session))
        }
        Err(err) => {
            spinner.finish_and_clear();
            debug!("login failed: {:#}", err);
            println!("Invalid token or network error. Please check your token and try again.");
            Ok(None)
        }
    }
}

/// The authenticated dashboard: profile header, stat row and the
/// bulk-action menu. Returns when the user logs out or quits.
fn dashboard(session: &Session) -> Result<DashboardExit> {
    let mut orchestrator = Orchestrator::new(
        &session.api,
        session.account.login.clone(),
        Pacing::standard(),
    );

    loop {
        print_header(&session.account, orchestrator.stats());
        let items = vec![
            "Follow random users",
            "Unfollow non-followers",
            "Recent actions",
            "Logout",
            "Quit",
        ];
        match Select::new().items(&items).default(0).interact()? {
            0 => run_bulk_follow(&mut orchestrator)?,
            1 => run_unfollow(&mut orchestrator),
            2 => print_actions(orchestrator.log()),
            3 => return Ok(DashboardExit::Logout),
            _ => return Ok(DashboardExit::Quit),
        }
    }
}

fn run_bulk_follow(orchestrator: &mut Orchestrator<'_, ApiClient>) -> Result<()> {
    let count: usize = Input::new()
        .with_prompt("How many accounts to follow")
        .default(100)
        .interact_text()?;
    let filter: String = Input::new()
        .with_prompt("Search query (blank samples random queries)")
        .allow_empty(true)
        .interact_text()?;
    let filter = filter.trim().to_string();
    let filter = if filter.is_empty() { None } else { Some(filter) };

    // Spinner while discovery runs; the first progress tick swaps it
    // for a bar sized to the actual candidate list.
    let spinner = spinner("Discovering candidates...");
    let mut bar: Option<ProgressBar> = None;
    let summary = orchestrator.bulk_follow(count, filter.as_deref(), &mut |current, total| {
        if total == 0 {
            if let Some(bar) = bar.take() {
                bar.finish_and_clear();
            }
            return;
        }
        let bar = bar.get_or_insert_with(|| {
            spinner.finish_and_clear();
            progress_bar("Following", total)
        });
        bar.set_position(current as u64);
    });
    spinner.finish_and_clear();

    if summary.attempted == 0 {
        println!("No candidates found, nothing to do.");
    } else {
        println!(
            "Followed {} accounts ({} already followed, {} failed).",
            summary.done, summary.skipped, summary.failed
        );
    }
    Ok(())
}

fn run_unfollow(orchestrator: &mut Orchestrator<'_, ApiClient>) {
    let spinner = spinner("Collecting your following list...");
    let mut bar: Option<ProgressBar> = None;
    let result = orchestrator.unfollow_non_followers(&mut |current, total| {
        if total == 0 {
            if let Some(bar) = bar.take() {
                bar.finish_and_clear();
            }
            return;
        }
        let bar = bar.get_or_insert_with(|| {
            spinner.finish_and_clear();
            progress_bar("Checking", total)
        });
        bar.set_position(current as u64);
    });
    spinner.finish_and_clear();

    match result {
        Ok(summary) if summary.attempted == 0 => {
            println!("You are not following anyone yet.");
        }
        Ok(summary) => {
            println!(
                "Unfollowed {} of {} checked accounts ({} failed).",
                summary.done, summary.attempted, summary.failed
            );
        }
        Err(err) => println!("Could not fetch your following list: {}", err),
    }
}

fn print_header(account: &Account, stats: Stats) {
    println!();
    let name = display_name(account).to_string();
    println!("{} {}", name.bold(), format!("(@{})", account.login).dark_grey());
    if let Some(bio) = &account.bio {
        println!("{}", bio.clone().italic());
    }
    if let Some(created) = account.created_at {
        let line = format!(
            "{} public repos, joined {}",
            account.public_repos,
            created.format("%B %Y")
        );
        println!("{}", line.dark_grey());
    }
    println!(
        "{} {}   {} {}   {} {}   {} {}",
        "Following".cyan(),
        account.following,
        "Followers".cyan(),
        account.followers,
        "Auto-followed".green(),
        stats.followed,
        "Auto-unfollowed".red(),
        stats.unfollowed,
    );
    println!();
}

fn print_actions(log: &ActionLog) {
    if log.is_empty() {
        println!("No actions recorded yet.");
        return;
    }
    println!("Recent actions (newest first):");
    for record in log.iter() {
        let label = match record.outcome {
            Outcome::Done => "ok".green(),
            Outcome::Skipped => "skip".yellow(),
            Outcome::Failed => "fail".red(),
        };
        println!(
            "  {} {:<8} {:<4} {}",
            record.timestamp.format("%H:%M:%S").to_string().dark_grey(),
            record.kind.to_string(),
            label,
            record.login
        );
    }
}

fn display_name(account: &Account) -> &str {
    account.name.as_deref().unwrap_or(&account.login)
}

fn spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner.set_message(message);
    spinner
}

fn progress_bar(message: &'static str, total: usize) -> ProgressBar {
    let bar = ProgressBar::new(total as u64);
    bar.set_style(ProgressStyle::with_template("{msg} [{wide_bar}] {pos}/{len}").unwrap());
    bar.set_message(message);
    bar
}
