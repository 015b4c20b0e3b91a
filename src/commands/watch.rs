//! Watch command: the live dashboard.
//!
//! Keys (followed by Enter): `r` refresh, `a` all, `m` mine, `q` quit.

use super::models::WatchArgs;
use crate::output::render_dashboard;
use crate::poller::{
    DashboardView, FetchOutcome, PollEvent, Poller, StatsTracker, Trigger, TriggerHandle,
    ViewMode,
};
use crate::rpc::ChainReader;
use crate::utils::config::Settings;
use anyhow::{Context, Result};
use colored::*;
use log::{debug, info};
use std::io::BufRead;
use std::ops::ControlFlow;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Map one line of keyboard input to a trigger
pub fn parse_key(line: &str, current: &DashboardView) -> Option<Trigger> {
    match line.trim() {
        "r" => Some(Trigger::Refresh),
        "a" => Some(Trigger::SwitchView(DashboardView::new(
            ViewMode::All,
            current.viewer.clone(),
        ))),
        "m" => Some(Trigger::SwitchView(DashboardView::new(
            ViewMode::Mine,
            current.viewer.clone(),
        ))),
        "q" => Some(Trigger::Quit),
        _ => None,
    }
}

/// Execute the watch command; returns when the user quits
pub fn execute_watch(
    reader: Arc<dyn ChainReader>,
    settings: &Settings,
    args: WatchArgs,
) -> Result<()> {
    let view = args.view.view().context("Invalid --viewer address")?;
    if !view.is_fetchable() {
        anyhow::bail!("--mode mine needs an account (--viewer or SUI_ADDRESS)");
    }

    let interval = args
        .interval_secs
        .map(|s| Duration::from_secs(s.max(1)))
        .unwrap_or_else(|| settings.poll_interval());

    let mut poller = Poller::from_reader(
        reader,
        settings.distribution_event_type(),
        settings.history_limit,
        interval,
        view.clone(),
    );

    spawn_keyboard(poller.handle(), view).context("Failed to start keyboard listener")?;
    println!(
        "{}",
        "Keys: r = refresh, a = all, m = mine, q = quit".dimmed()
    );

    poller.run(|event, tracker| on_poll_event(event, tracker, settings));

    info!("Dashboard closed");
    Ok(())
}

fn on_poll_event(event: PollEvent, tracker: &StatsTracker, settings: &Settings) -> ControlFlow<()> {
    match event {
        PollEvent::FetchStarted(token) => debug!("Refreshing (#{})", token.value()),
        PollEvent::ViewChanged => {
            println!("{}", "Switching view...".dimmed());
        }
        PollEvent::Resolved(_, FetchOutcome::Committed) => {
            if let Some(snapshot) = tracker.snapshot() {
                println!("{}", render_dashboard(snapshot, settings));
            }
        }
        PollEvent::Resolved(_, FetchOutcome::Failed) => {
            let message = tracker.last_error().unwrap_or("unknown error");
            println!(
                "{} {}",
                "⚠️  Refresh failed, showing last data:".yellow(),
                message
            );
        }
        PollEvent::Resolved(_, FetchOutcome::Discarded) => {}
    }
    ControlFlow::Continue(())
}

/// Forward stdin lines as triggers until quit or EOF
fn spawn_keyboard(handle: TriggerHandle, initial: DashboardView) -> std::io::Result<()> {
    thread::Builder::new()
        .name("keyboard".to_string())
        .spawn(move || {
            let mut current = initial;
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                let Some(trigger) = parse_key(&line, &current) else {
                    continue;
                };
                if let Trigger::SwitchView(view) = &trigger {
                    if view.mode == ViewMode::Mine && view.viewer.is_none() {
                        println!("{}", "Connect an account (--viewer) to see your distributions".yellow());
                        continue;
                    }
                    current = view.clone();
                }
                let quit = trigger == Trigger::Quit;
                if !handle.send(trigger) || quit {
                    break;
                }
            }
        })?;
    Ok(())
}
