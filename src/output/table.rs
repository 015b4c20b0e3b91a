//! Terminal rendering for dashboards, feeds, and distribution objects.

use crate::aggregator::{role_of, viewer_amount, FeedItem, UserStats, ViewerRole};
use crate::parser::schema::{format_sui, mist_to_sui, DistributionEvent, EventDetails};
use crate::poller::{DashboardSnapshot, ViewMode};
use crate::recipients::{shorten_address, RecipientRow};
use crate::utils::config::Settings;
use colored::*;

const RULE: &str = "---------------------------------------------------";

/// Headline numbers of a snapshot
///
/// "Mine" swaps in the viewer's total involved and recipients reached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Headline {
    pub total: u64,
    pub recipients: usize,
    pub distributions: usize,
}

impl Headline {
    pub fn of(snapshot: &DashboardSnapshot) -> Self {
        let stats = &snapshot.stats;
        match (snapshot.view.mode, &snapshot.user_stats) {
            (ViewMode::Mine, Some(user)) => Self {
                total: user.total_involved(),
                recipients: user.recipients_reached,
                distributions: stats.total_distribution_count,
            },
            _ => Self {
                total: stats.total_amount_distributed,
                recipients: stats.unique_recipient_count,
                distributions: stats.total_distribution_count,
            },
        }
    }

    /// Average SUI per distribution, 0 for an empty window
    pub fn average_sui(&self) -> f64 {
        if self.distributions == 0 {
            return 0.0;
        }
        mist_to_sui(self.total) / self.distributions as f64
    }
}

/// Render a full dashboard for the terminal
pub fn render_dashboard(snapshot: &DashboardSnapshot, settings: &Settings) -> String {
    let mut out = String::new();

    out.push_str(&render_header(snapshot));
    if let Some(user) = &snapshot.user_stats {
        out.push_str(&render_user_summary(user));
    }
    out.push_str(&render_headline(snapshot));
    out.push_str(&render_history(snapshot, settings));

    out
}

fn render_header(snapshot: &DashboardSnapshot) -> String {
    let title = match snapshot.view.mode {
        ViewMode::All => "All Distributions",
        ViewMode::Mine => "My Distributions",
    };

    let mut out = String::new();
    out.push('\n');
    out.push_str(&title.bold().to_string());
    out.push('\n');
    out.push_str(RULE);
    out.push('\n');
    if let Some(viewer) = &snapshot.view.viewer {
        out.push_str(&format!("Account: {}\n", shorten_address(viewer)));
    }
    out.push_str(&format!(
        "Updated: {}\n",
        snapshot.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out.push_str(RULE);
    out.push('\n');
    out
}

fn render_user_summary(user: &UserStats) -> String {
    format!(
        "Sent:     {}\nReceived: {}\n\n",
        format!("{:.2} SUI", user.total_sent_sui()).red(),
        format!("+{:.2} SUI", user.total_received_sui()).green(),
    )
}

fn render_headline(snapshot: &DashboardSnapshot) -> String {
    let headline = Headline::of(snapshot);
    let (total_label, recipient_label) = match snapshot.view.mode {
        ViewMode::All => ("Total SUI Distributed", "Unique Recipients"),
        ViewMode::Mine => ("Total SUI Involved", "Recipients Reached"),
    };

    format!(
        "{:<24}{}\n{:<24}{}\n{:<24}{}\n{:<24}{:.2} SUI\n",
        total_label,
        format_sui(headline.total, 2).bold(),
        recipient_label,
        headline.recipients,
        "Total Distributions",
        headline.distributions,
        "Avg. Distribution Size",
        headline.average_sui(),
    )
}

fn render_history(snapshot: &DashboardSnapshot, settings: &Settings) -> String {
    let mut out = String::new();
    out.push_str("\nDistribution History:\n");

    let distributions = &snapshot.stats.distributions;
    if distributions.is_empty() {
        let hint = match snapshot.view.mode {
            ViewMode::All => "No distributions have been made yet.",
            ViewMode::Mine => "No distributions found. Start by creating your first distribution!",
        };
        out.push_str(&format!("  {}\n", hint.dimmed()));
        return out;
    }

    let viewer = match snapshot.view.mode {
        ViewMode::Mine => snapshot.view.viewer.as_deref(),
        ViewMode::All => None,
    };

    for event in distributions {
        out.push_str(&render_row(event, viewer, settings));
    }
    out
}

fn render_row(event: &DistributionEvent, viewer: Option<&str>, settings: &Settings) -> String {
    let name = if event.event_name.is_empty() {
        "(unnamed)"
    } else {
        event.event_name.as_str()
    };

    let mut row = format!(
        "  {}  {:<20} {:>12} SUI  {:>3} recipient(s) x {} SUI",
        event.timestamp.format("%Y-%m-%d %H:%M"),
        name,
        format_sui(event.total_amount, 2),
        event.recipients.len(),
        format_sui(event.amount_per_recipient, 4),
    );

    if let Some(role) = viewer.and_then(|v| role_of(event, v)) {
        let amount = mist_to_sui(viewer_amount(event, role));
        let cell = match role {
            ViewerRole::Distributor => format!("{:<11} -{:.2} SUI", role.label(), amount).red(),
            ViewerRole::Recipient => format!("{:<11} +{:.4} SUI", role.label(), amount).green(),
        };
        row.push_str(&format!("  {}", cell));
    }

    row.push_str(&format!("\n      {}\n", settings.explorer_link(&event.id).cyan()));
    row
}

/// Render the recent recipient ticker
pub fn render_feed(items: &[FeedItem]) -> String {
    if items.is_empty() {
        return format!("{}\n", "No recent distributions".dimmed());
    }

    items
        .iter()
        .map(|item| {
            format!(
                "{} received {} SUI\n",
                shorten_address(&item.address),
                format_sui(item.amount, 4).green()
            )
        })
        .collect()
}

/// Render one staged distribution object
pub fn render_event_details(details: &EventDetails) -> String {
    let status = if details.is_active {
        "Active".green()
    } else {
        "Completed".dimmed()
    };

    let mut out = String::new();
    out.push_str(&format!("{} [{}]\n", details.name.bold(), status));
    out.push_str(&format!("  ID:         {}\n", details.id));
    out.push_str(&format!("  Creator:    {}\n", details.creator));
    out.push_str(&format!(
        "  Deposited:  {} SUI\n",
        format_sui(details.total_deposited, 4)
    ));
    out.push_str(&format!(
        "  Distributed: {} SUI\n",
        format_sui(details.tokens_distributed(), 4)
    ));
    out.push_str(&format!("  Recipients: {}\n", details.recipients.len()));
    if let Some(created_at) = details.created_at {
        out.push_str(&format!("  Created:    {}\n", created_at.format("%Y-%m-%d %H:%M")));
    }
    out
}

/// Render a recipient list check, flagging invalid entries
pub fn render_recipient_check(rows: &[RecipientRow]) -> String {
    let mut out = String::new();
    for (i, row) in rows.iter().enumerate() {
        let mark = if row.is_valid { "✓".green() } else { "✗".red() };
        let amount = row
            .amount
            .as_deref()
            .map(|a| format!("  {} SUI", a))
            .unwrap_or_default();
        out.push_str(&format!("{:>4}. {} {}{}\n", i + 1, mark, row.address, amount));
    }

    let invalid = rows.iter().filter(|r| !r.is_valid).count();
    let summary = format!("{} recipient(s), {} invalid", rows.len(), invalid);
    out.push_str(&if invalid == 0 {
        summary.green().to_string()
    } else {
        summary.yellow().to_string()
    });
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poller::DashboardView;
    use chrono::{DateTime, Utc};

    const ME: &str = "0x00000000000000000000000000000000000000000000000000000000000000aa";

    fn event(distributor: &str, recipients: &[&str], total: u64, share: u64) -> DistributionEvent {
        DistributionEvent {
            id: "Dg1".to_string(),
            distributor: distributor.to_string(),
            event_name: "payroll".to_string(),
            total_amount: total,
            recipients: recipients.iter().map(|r| r.to_string()).collect(),
            amount_per_recipient: share,
            timestamp: DateTime::<Utc>::default(),
        }
    }

    #[test]
    fn test_headline_switches_on_mine() {
        let events = vec![
            event(ME, &["0xb", "0xc"], 4_000_000_000, 2_000_000_000),
            event("0xd", &[ME], 1_000_000_000, 1_000_000_000),
        ];

        let all = DashboardSnapshot::build(DashboardView::all(), &events);
        assert_eq!(
            Headline::of(&all),
            Headline { total: 5_000_000_000, recipients: 3, distributions: 2 }
        );

        let mine = DashboardSnapshot::build(DashboardView::mine(ME), &events);
        let headline = Headline::of(&mine);
        assert_eq!(headline.total, 5_000_000_000);
        assert_eq!(headline.recipients, 2);
        assert!((headline.average_sui() - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_empty_average_is_zero() {
        let snapshot = DashboardSnapshot::build(DashboardView::all(), &[]);
        assert_eq!(Headline::of(&snapshot).average_sui(), 0.0);
    }

    #[test]
    fn test_dashboard_shows_roles_and_links() {
        colored::control::set_override(false);
        let events = vec![event("0xd", &[ME], 1_000_000_000, 1_000_000_000)];
        let snapshot = DashboardSnapshot::build(DashboardView::mine(ME), &events);

        let text = render_dashboard(&snapshot, &Settings::default());
        assert!(text.contains("My Distributions"));
        assert!(text.contains("Recipient   +1.0000 SUI"));
        assert!(text.contains("https://testnet.suivision.xyz/txblock/Dg1"));
    }

    #[test]
    fn test_feed_rendering() {
        colored::control::set_override(false);
        let items = vec![FeedItem { address: ME.to_string(), amount: 1_250_000_000 }];
        assert_eq!(render_feed(&items), "0x0000...00aa received 1.2500 SUI\n");
    }
}
