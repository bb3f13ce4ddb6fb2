use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use hexaram::analysis::{
    CandidatePool, LocalRecommender, Recommender, RemoteRecommender, StatsTableScorer,
};
use hexaram::api::PredictionApiClient;
use hexaram::cache::SessionCache;
use hexaram::champions::{ChampionNormalizer, ChampionRegistry, Localizer};
use hexaram::config::Config;
use hexaram::display::output::{
    display_error, display_info, display_lookup, display_no_data, display_pool_summary,
    display_recommendation, display_session, display_success,
};
use hexaram::session::{LiveSessionClient, LocalSessionFile, SessionProvider};
use hexaram::watch::{LatestResult, RefreshEvent, Watcher};
use indicatif::ProgressBar;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

const LOCAL_SESSION_FILE: &str = "local_session.json";

#[derive(Parser, Debug)]
#[command(name = "hexaram", version)]
#[command(about = "Rank ARAM team compositions by predicted win rate", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Verbose logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Directory with champion_mapping.json and friends
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Prediction service base URL
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Game client lockfile
    #[arg(long, global = true)]
    lockfile: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank teams for the current champion pool
    Recommend {
        /// Use these champions instead of reading the session (comma separated)
        #[arg(short, long, value_delimiter = ',')]
        champions: Vec<String>,

        #[arg(long, value_enum, default_value = "auto")]
        source: SourceArg,

        #[arg(long, value_enum, default_value = "remote")]
        scorer: ScorerArg,

        /// Number of best/worst teams to show (default: 10)
        #[arg(short, long)]
        top: Option<usize>,
    },

    /// Keep polling champion select and re-rank when the pool changes
    Watch {
        /// Seconds between session polls
        #[arg(short, long, default_value = "3")]
        interval: u64,

        #[arg(long, value_enum, default_value = "auto")]
        source: SourceArg,

        #[arg(long, value_enum, default_value = "remote")]
        scorer: ScorerArg,

        #[arg(short, long)]
        top: Option<usize>,

        /// Stop after this many polls
        #[arg(long)]
        polls: Option<usize>,
    },

    /// Show the champion-select pool
    Session {
        #[arg(long, value_enum, default_value = "auto")]
        source: SourceArg,
    },

    /// Resolve a champion name, nickname, key or localized name
    Lookup { name: String },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SourceArg {
    /// Live client, then cached session, then local file
    Auto,
    Live,
    Local,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ScorerArg {
    /// Prediction service
    Remote,
    /// Offline per-champion stats table
    Table,
}

fn init_logging(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;
    Ok(())
}

fn main() {
    let args = Args::parse();

    if let Err(e) = init_logging(args.verbose) {
        display_error(&e.to_string());
    }

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = Config::from_env()?;
    if let Some(dir) = args.data_dir {
        config.stats_file = dir.join("champion_stats.json");
        config.data_dir = dir;
    }
    if let Some(base) = args.api_base {
        config.api_base = base;
    }
    if let Some(lockfile) = args.lockfile {
        config.lockfile_path = lockfile;
    }

    let registry = Arc::new(
        ChampionRegistry::load(&config.data_dir).context("loading champion reference data")?,
    );
    debug!(champions = registry.len(), "registry ready");

    match args.command {
        Command::Recommend {
            champions,
            source,
            scorer,
            top,
        } => {
            if let Some(k) = top {
                config.top_k = k;
            }
            config.validate()?;
            recommend(&config, registry, champions, source, scorer)
        }
        Command::Watch {
            interval,
            source,
            scorer,
            top,
            polls,
        } => {
            if let Some(k) = top {
                config.top_k = k;
            }
            config.validate()?;
            watch(&config, registry, source, scorer, interval, polls)
        }
        Command::Session { source } => {
            let provider = build_provider(&config, &registry, source)?;
            match provider.fetch() {
                Some((session, origin)) => display_session(&session, origin, &*registry),
                None => display_no_data(),
            }
            Ok(())
        }
        Command::Lookup { name } => {
            let normalizer = ChampionNormalizer::new(&registry);
            let canonical = normalizer.resolve_fuzzy(&name)?;
            if let Some(champion) = registry.get(&canonical) {
                display_lookup(champion);
            }
            Ok(())
        }
    }
}

fn build_provider(
    config: &Config,
    registry: &Arc<ChampionRegistry>,
    source: SourceArg,
) -> Result<SessionProvider> {
    let local = LocalSessionFile::new(
        config.data_dir.join(LOCAL_SESSION_FILE),
        Arc::clone(registry),
    );

    let provider = match source {
        SourceArg::Local => SessionProvider::new(config.cache_max_age_mins).with_local(local),
        SourceArg::Live | SourceArg::Auto => {
            let live = LiveSessionClient::new(config.lockfile_path.clone(), Arc::clone(registry))?;
            let provider = SessionProvider::new(config.cache_max_age_mins).with_live(live);
            if matches!(source, SourceArg::Auto) {
                provider
                    .with_cache(SessionCache::default_path())
                    .with_local(local)
            } else {
                provider
            }
        }
    };
    Ok(provider)
}

fn build_recommender(
    config: &Config,
    registry: &Arc<ChampionRegistry>,
    scorer: ScorerArg,
) -> Result<Arc<dyn Recommender>> {
    let localizer: Arc<dyn Localizer> = registry.clone();
    let recommender: Arc<dyn Recommender> = match scorer {
        ScorerArg::Remote => Arc::new(RemoteRecommender::new(
            PredictionApiClient::new(config),
            localizer,
            config.top_k,
        )),
        ScorerArg::Table => {
            let table = StatsTableScorer::load(&config.stats_file)
                .with_context(|| format!("loading {}", config.stats_file.display()))?;
            Arc::new(LocalRecommender::new(Arc::new(table), localizer, config.top_k))
        }
    };
    Ok(recommender)
}

fn recommend(
    config: &Config,
    registry: Arc<ChampionRegistry>,
    champions: Vec<String>,
    source: SourceArg,
    scorer: ScorerArg,
) -> Result<()> {
    let pool = if champions.is_empty() {
        let provider = build_provider(config, &registry, source)?;
        match provider.fetch() {
            Some((session, origin)) => {
                display_success(&format!("Session from {}", origin));
                session.candidate_pool()
            }
            None => {
                display_no_data();
                return Ok(());
            }
        }
    } else {
        let normalizer = ChampionNormalizer::new(&registry);
        let names = champions
            .iter()
            .map(|name| normalizer.resolve_fuzzy(name))
            .collect::<Result<Vec<_>, _>>()?;
        CandidatePool::from_names(names)
    };

    display_pool_summary(&pool, &*registry);
    let recommender = build_recommender(config, &registry, scorer)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_message("Scoring team compositions");
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = recommender.recommend(&pool);
    spinner.finish_and_clear();

    display_recommendation(&result?, &*registry);
    Ok(())
}

fn watch(
    config: &Config,
    registry: Arc<ChampionRegistry>,
    source: SourceArg,
    scorer: ScorerArg,
    interval: u64,
    polls: Option<usize>,
) -> Result<()> {
    let provider = Arc::new(build_provider(config, &registry, source)?);
    let recommender = build_recommender(config, &registry, scorer)?;

    let mut watcher = Watcher::new(provider, recommender, Duration::from_secs(interval.max(1)));
    if let Some(polls) = polls {
        watcher = watcher.max_polls(polls);
    }

    display_info("Watching champion select (Ctrl+C to stop)");
    let (events, handle) = watcher.spawn();
    let mut latest = LatestResult::default();

    for event in events {
        match latest.apply(event) {
            RefreshEvent::NoData => display_no_data(),
            RefreshEvent::Scoring { pool, origin } => {
                display_success(&format!("Pool changed ({})", origin));
                display_pool_summary(pool, &*registry);
            }
            RefreshEvent::Finished { recommendation, .. } => {
                display_recommendation(recommendation, &*registry);
            }
            RefreshEvent::Failed { error, .. } => {
                display_error(&format!("Recommendation failed: {}", error));
            }
        }
    }

    let _ = handle.join();
    Ok(())
}
