use std::env;
use std::error::Error;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::bail;
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tinyrand::StdRand;
use tracing::{debug, info};

use tipster::config::Config;
use tipster::file::ReadJsonFile;
use tipster::history;
use tipster::print::{tabulate_frequencies, tabulate_table, tabulate_user_summary};
use tipster::stats::{StatisticsCalculator, TendencyStatistics};
use tipster::store::{MatchStore, MemoryStore};
use tipster::table::{build_window, TableBuilder, TableWindow};
use tipster::vote::evaluate_top_match_votes;

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// file to source the season data from
    #[clap(short = 'f', long)]
    file: PathBuf,

    /// rule configuration file; defaults apply if omitted
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// matchday to evaluate; defaults to the latest finished one
    #[clap(short = 'm', long)]
    matchday: Option<u32>,

    /// table window: matchday, total, last-five, last-ten, second-half or final
    #[clap(short = 'w', long, default_value = "total")]
    window: String,

    /// print statistics for the given user
    #[clap(short = 'u', long)]
    user: Option<i64>,

    /// select the top match of the matchday following the evaluated one
    #[clap(long)]
    vote: bool,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if TableWindow::from_str(&self.window).is_err() {
            bail!("unsupported table window '{}'", self.window);
        }
        if self.matchday == Some(0) {
            bail!("matchdays are numbered from 1");
        }
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    if env::var("RUST_BACKTRACE").is_err() {
        env::set_var("RUST_BACKTRACE", "full")
    }
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    args.validate()?;
    debug!("args: {args:?}");

    let config = match &args.config {
        None => Config::default(),
        Some(path) => Config::read_json_file(path)?,
    };
    config.validate()?;

    let store = MemoryStore::from_json_file(&args.file)?;
    let season = store.season();
    let matchday = args.matchday.unwrap_or_else(|| store.latest_matchday());
    let window = TableWindow::from_str(&args.window)?;
    info!("season {season}, matchday {matchday}, {window} table");

    let (scores, matches) = history::load(&store, season, matchday, &config.rules);
    let season_scores = history::season_scores(&store, season, &config.season, &config.rules);
    let builder = TableBuilder::from_directory(&store);
    let rows = build_window(window, matchday, &scores, &season_scores, &builder, &config);
    info!("\n{}", Console::default().render(&tabulate_table(&rows)));

    if let Some(user_id) = args.user {
        let stats = TendencyStatistics::new(&scores, &matches, &config);
        let box_plot = stats.box_plot(user_id, matchday);
        let summary = tabulate_user_summary(
            stats.form(user_id, matchday),
            box_plot.as_ref(),
            stats.mean_points(user_id, matchday),
            stats.std_dev(user_id, matchday),
        );
        info!("{}:\n{}", builder.user_name(user_id), Console::default().render(&summary));

        let positions: Vec<_> = stats
            .position_history(user_id, matchday)
            .into_iter()
            .map(|position| position.map_or("-".to_string(), |position| position.to_string()))
            .collect();
        info!("positions: {}", positions.join(" "));

        let bets = stats.most_frequent_bets(user_id, matchday);
        info!("\n{}", Console::default().render(&tabulate_frequencies("Tip", &bets)));
        let results = stats.most_frequent_results(matchday);
        info!("\n{}", Console::default().render(&tabulate_frequencies("Result", &results)));
    }

    if args.vote {
        let candidates: Vec<_> = store
            .matches_by_matchday(season, matchday + 1)
            .into_iter()
            .map(|fixture| fixture.id)
            .collect();
        let votes = store.top_match_votes(season);
        match evaluate_top_match_votes(&votes, &candidates, &mut StdRand::default()) {
            Some(match_id) => info!("top match of matchday {}: {match_id}", matchday + 1),
            None => info!("no matches scheduled for matchday {}", matchday + 1),
        }
    }

    Ok(())
}
