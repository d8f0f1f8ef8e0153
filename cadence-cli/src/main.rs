use cadence_cli::{CliError, LogConfig, Result};
use cadence_client::{
    load_leaderboard, Backend, FeedController, InMemoryBackend, MemoryStore, RefreshOutcome,
};
use cadence_core::{
    Challenge, ChallengeKind, Frequency, Group, GroupId, GroupMember, ReportDraft, UserId,
};
use chrono::{Duration, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use tracing::info;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "cadence")]
#[command(version, about = "Cadence client core - group feed and leaderboard demo")]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Drive the home feed end-to-end against an in-memory backend
    Demo {
        /// Number of groups to seed
        #[arg(short = 'g', long, default_value_t = 4)]
        groups: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log = if cli.verbose { LogConfig::dev() } else { LogConfig::default() };
    log.init().map_err(CliError::InvalidConfig)?;

    match cli.command {
        Commands::Demo { groups } => run_demo(groups).await,
    }
}

async fn run_demo(group_count: u32) -> Result<()> {
    let backend = InMemoryBackend::new();
    let user = Uuid::new_v4();
    let ids = seed(&backend, user, group_count).await?;

    let mut feed = FeedController::new(backend.clone(), MemoryStore::new(), user);

    info!("Initial refresh (server fetch order, newest first)");
    refresh_and_print(&mut feed).await;

    if ids.len() >= 2 {
        info!("Moving the oldest group to the top");
        let mut order: Vec<GroupId> = feed.entries().iter().map(|e| e.group.id).collect();
        let last = order.pop().expect("at least two groups");
        order.insert(0, last);

        feed.begin_editing();
        feed.reorder(&order).await?;
        feed.finish_editing();
        refresh_and_print(&mut feed).await;

        info!("Hiding the group now at the bottom");
        let bottom = feed.entries().last().expect("non-empty feed").group.id;
        feed.begin_editing();
        feed.toggle_select(bottom)?;
        feed.hide_selected().await?;
        refresh_and_print(&mut feed).await;

        let hidden = backend
            .fetch_hidden_group_ids(user)
            .await
            .map_err(cadence_client::ClientError::from)?;
        info!("Server-side hidden set: {} group(s)", hidden.len());
    }

    if let Some(entry) = feed.entries().first() {
        if let Some(challenge) = entry.group.challenge.clone() {
            info!("Reporting progress on '{}'", challenge.name());
            let draft = ReportDraft::binary(challenge.id(), entry.group.id, user, true)
                .with_proof_text("done before breakfast".to_string())
                .map_err(cadence_client::ClientError::from)?;
            backend.submit_report(draft).await.map_err(cadence_client::ClientError::from)?;

            let history = backend
                .fetch_member_reports(challenge.id(), user)
                .await
                .map_err(cadence_client::ClientError::from)?;
            info!("{} report(s) on record for this challenge", history.len());
        }
    }

    if let Some(first) = ids.first() {
        info!("Leaderboard of the first seeded group:");
        let board = load_leaderboard(&backend, *first).await?;
        for standing in board {
            info!(
                "  {} {} - {} pts (streak {})",
                standing.rank,
                standing.member.display_name,
                standing.member.points,
                standing.member.streak
            );
        }
    }

    Ok(())
}

async fn refresh_and_print<C: cadence_client::Clock>(
    feed: &mut FeedController<InMemoryBackend, MemoryStore, C>,
) {
    match feed.refresh().await {
        RefreshOutcome::Updated => {}
        RefreshOutcome::Superseded => info!("refresh superseded"),
        RefreshOutcome::Failed { error, surface_notice } => {
            if surface_notice {
                info!("refresh failed: {}", error);
            }
            return;
        }
    }

    for entry in feed.entries() {
        let countdown = entry
            .countdown
            .map(|c| c.to_string())
            .unwrap_or_else(|| "no deadline".to_string());
        info!("  {:24} {:12} [{}]", entry.group.name, entry.rank.to_string(), countdown);
    }
}

async fn seed(backend: &InMemoryBackend, user: UserId, group_count: u32) -> Result<Vec<GroupId>> {
    let today = Utc::now().date_naive();
    let mut ids = Vec::new();

    for i in 0..group_count {
        let challenge = Challenge::new(
            format!("Challenge {}", i + 1),
            if i % 2 == 0 { ChallengeKind::Binary } else { ChallengeKind::Numeric },
            if i % 2 == 0 { Frequency::Daily } else { Frequency::Weekly },
        )?
        .with_dates(today, end_date(today, 7 + i as i64))?;

        let group = Group::new(format!("Group {}", i + 1), Utc::now() - Duration::hours(i as i64))
            .with_challenge(challenge);
        let group_id = group.id;
        ids.push(group_id);
        backend.add_group(group, &format!("invite-{}", i + 1)).await;

        backend
            .add_member(group_id, GroupMember { user_id: user, display_name: None, streak: i })
            .await;
        let rival = Uuid::new_v4();
        backend
            .add_member(
                group_id,
                GroupMember {
                    user_id: rival,
                    display_name: Some(format!("Rival {}", i + 1)),
                    streak: 1,
                },
            )
            .await;

        // Vary the standings: the user leads some groups, trails others,
        // and every third group has no reports from them at all.
        if i % 3 != 2 {
            backend.set_points(group_id, user, 10 + 10 * (i % 2)).await;
        }
        backend.set_points(group_id, rival, 20 - 10 * (i % 2)).await;
    }

    info!("Seeded {} groups for user {}", group_count, user);
    Ok(ids)
}

fn end_date(start: NaiveDate, days: i64) -> NaiveDate {
    start + Duration::days(days)
}
