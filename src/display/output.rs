use crate::analysis::{CandidatePool, Recommendation, ScoredComposition};
use crate::champions::{Champion, Localizer};
use crate::session::models::SessionPool;
use crate::session::SessionOrigin;
use colored::*;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct TeamRow {
    #[tabled(rename = "#")]
    rank: String,
    team: String,
    win_rate: String,
}

#[derive(Tabled)]
struct PoolRow {
    champion: String,
    display: String,
    status: String,
}

#[derive(Tabled)]
struct LookupRow {
    champion: String,
    display: String,
    key: String,
    icon: String,
}

fn team_rows(entries: &[ScoredComposition], localizer: &dyn Localizer) -> Vec<TeamRow> {
    entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| TeamRow {
            rank: format!("#{}", idx + 1),
            team: entry
                .composition
                .members()
                .iter()
                .map(|m| localizer.localize(m))
                .collect::<Vec<_>>()
                .join(", "),
            win_rate: format!("{:.1}%", entry.win_rate * 100.0),
        })
        .collect()
}

fn print_team_table(title: ColoredString, entries: &[ScoredComposition], localizer: &dyn Localizer) {
    println!("\n{}", title);
    println!("{}\n", "=".repeat(60).cyan());
    let mut table = Table::new(team_rows(entries, localizer));
    table.with(Style::rounded());
    println!("{}", table);
}

pub fn display_recommendation(recommendation: &Recommendation, localizer: &dyn Localizer) {
    match recommendation {
        Recommendation::Insufficient { pool_size } => {
            println!(
                "\n{}",
                format!(
                    "Insufficient champions: {} in pool, at least 5 needed to build a team",
                    pool_size
                )
                .yellow()
            );
        }
        Recommendation::Ranked(ranking) => {
            print_team_table(
                "🏆 Recommended Teams".bold().green(),
                &ranking.recommended,
                localizer,
            );
            print_team_table("💀 Teams to Avoid".bold().red(), &ranking.worst, localizer);

            if let Some(best) = ranking.recommended.first() {
                println!("\n{}", "Top Pick".bold().yellow());
                println!(
                    "  {:.1}% predicted win rate with {}",
                    best.win_rate * 100.0,
                    best.composition
                        .members()
                        .iter()
                        .map(|m| localizer.localize(m))
                        .collect::<Vec<_>>()
                        .join(", ")
                );
            }
            println!();
        }
    }
}

pub fn display_session(session: &SessionPool, origin: SessionOrigin, localizer: &dyn Localizer) {
    println!(
        "\n{}",
        format!("🎮 Champion Select ({})", origin).bold().cyan()
    );
    println!("{}\n", "=".repeat(60).cyan());

    let pool = session.candidate_pool();
    let mut rows = Vec::new();
    for (names, status) in [(&session.selected, "selected"), (&session.candidates, "bench")] {
        for name in names {
            let status = if pool.contains(name) {
                status.to_string()
            } else {
                "unresolved".red().to_string()
            };
            rows.push(PoolRow {
                champion: name.clone(),
                display: localizer.localize(name),
                status,
            });
        }
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
    println!("\n{} {} champions eligible\n", "•".cyan(), pool.len());
}

pub fn display_pool_summary(pool: &CandidatePool, localizer: &dyn Localizer) {
    let names: Vec<String> = pool.iter().map(|n| localizer.localize(n)).collect();
    display_info(&format!("Pool ({}): {}", pool.len(), names.join(", ")));
}

pub fn display_lookup(champion: &Champion) {
    let row = LookupRow {
        champion: champion.name.clone(),
        display: champion
            .display_name
            .clone()
            .unwrap_or_else(|| "-".to_string()),
        key: champion
            .key
            .map(|k| k.to_string())
            .unwrap_or_else(|| "-".to_string()),
        icon: champion
            .icon
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "-".to_string()),
    };
    let mut table = Table::new(vec![row]);
    table.with(Style::rounded());
    println!("{}", table);
}

pub fn display_no_data() {
    println!(
        "{}",
        "Waiting for champion select (no live, cached or local session)".yellow()
    );
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}
