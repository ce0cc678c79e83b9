use crate::infra::{build_prediction_service, load_catalogue, open_selection_store, BackendMode};
use clap::{Args, Subcommand, ValueEnum};
use college_predictor::config::AppConfig;
use college_predictor::error::AppError;
use college_predictor::telemetry::{self, LogTarget};
use college_predictor::workflows::prediction::{Catalogue, PredictionOutcome, ProfileSubmission};
use college_predictor::workflows::results::{
    FilterState, PageLink, ResultsBrowser, ResultsPage, SortDirection, SortKey, SortState,
};
use college_predictor::workflows::selection::{
    comparison_table, ComparisonTable, JsonFilePersistence, SelectionEntry, SelectionError,
    SelectionStore, COMPARE_CAPACITY,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum SortField {
    #[default]
    Match,
    AppliedCutoff,
    OpeningRank,
    ClosingRank,
}

impl From<SortField> for SortKey {
    fn from(value: SortField) -> Self {
        match value {
            SortField::Match => SortKey::MatchPercentage,
            SortField::AppliedCutoff => SortKey::AppliedCutoff,
            SortField::OpeningRank => SortKey::OpeningRank,
            SortField::ClosingRank => SortKey::ClosingRank,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct PredictArgs {
    /// JEE rank to predict for
    #[arg(long)]
    pub(crate) rank: String,
    /// Seat category (OPEN, OBC-NCL, SC, ST, EWS)
    #[arg(long, default_value = "OPEN")]
    pub(crate) category: String,
    /// Gender pool (Gender-Neutral or Female-only)
    #[arg(long, default_value = "Gender-Neutral")]
    pub(crate) gender: String,
    /// Institution type (IIT, NIT, IIIT, Other or Any)
    #[arg(long, default_value = "Any")]
    pub(crate) institution_type: String,
    /// Counselling year of the cutoff data
    #[arg(long, default_value = "2022")]
    pub(crate) year: String,
    /// Counselling round of the cutoff data
    #[arg(long, default_value = "1")]
    pub(crate) round: String,
    /// Only consider colleges in this state
    #[arg(long)]
    pub(crate) state: Option<String>,
    /// Only consider colleges in this region
    #[arg(long)]
    pub(crate) region: Option<String>,
    /// Narrow the printed results to one region
    #[arg(long)]
    pub(crate) filter_region: Option<String>,
    /// Narrow the printed results to one state
    #[arg(long)]
    pub(crate) filter_state: Option<String>,
    /// Field the printed results are ordered by
    #[arg(long, value_enum, default_value_t = SortField::Match)]
    pub(crate) sort: SortField,
    /// Order ascending instead of descending
    #[arg(long)]
    pub(crate) ascending: bool,
    /// Page of results to print
    #[arg(long, default_value_t = 1)]
    pub(crate) page: usize,
    /// Skip the remote prediction service and score the local catalogue only
    #[arg(long)]
    pub(crate) offline: bool,
}

impl PredictArgs {
    fn submission(&self) -> ProfileSubmission {
        ProfileSubmission {
            jee_rank: Some(self.rank.clone()),
            category: Some(self.category.clone()),
            gender: Some(self.gender.clone()),
            institution_type: Some(self.institution_type.clone()),
            year: Some(self.year.clone()),
            round: Some(self.round.clone()),
            state: self.state.clone(),
            region: self.region.clone(),
        }
    }

    fn sort_state(&self) -> SortState {
        let direction = if self.ascending {
            SortDirection::Ascending
        } else {
            SortDirection::Descending
        };
        SortState::new(self.sort.into(), direction)
    }
}

#[derive(Subcommand, Debug)]
pub(crate) enum SelectionCommand {
    /// Print saved favorites and the comparison list
    List,
    /// Save a catalogue college as a favorite
    Favorite { id: String },
    /// Remove a college from the favorites
    Unfavorite { id: String },
    /// Add a catalogue college to the comparison list
    Compare { id: String },
    /// Remove a college from the comparison list
    Uncompare { id: String },
    /// Empty the comparison list
    ClearCompare,
    /// Print the side-by-side comparison table
    Table,
}

fn init_cli_logging(config: &AppConfig) -> Result<(), AppError> {
    telemetry::init_with_target(&config.telemetry, LogTarget::Stderr)?;
    Ok(())
}

pub(crate) async fn run_predict(args: PredictArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    init_cli_logging(&config)?;

    let mode = if args.offline {
        BackendMode::Offline
    } else {
        BackendMode::Configured
    };
    let service = build_prediction_service(&config, mode)?;
    let outcome = service.predict(&args.submission()).await?;

    let mut browser = ResultsBrowser::new();
    browser.set_filter(FilterState::new(
        args.filter_region.clone(),
        args.filter_state.clone(),
    ));
    browser.set_sort(args.sort_state());
    browser.go_to_page(args.page);

    render_outcome(&outcome, &mut browser);
    Ok(())
}

fn render_outcome(outcome: &PredictionOutcome, browser: &mut ResultsBrowser) {
    println!("College predictions ({:?})", outcome.source);
    if let Some(notice) = &outcome.notice {
        println!("  note: {notice}");
    }

    if outcome.records.is_empty() {
        println!("  No colleges matched this profile.");
        return;
    }

    let page = browser.derive_and_clamp(&outcome.records);
    if page.total_filtered == 0 {
        println!(
            "  No colleges match the selected filters ({} results before filtering).",
            page.total_results
        );
        return;
    }

    render_page(&page);
}

fn render_page(page: &ResultsPage<'_>) {
    if page.is_filtered() {
        println!(
            "  Showing {} of {} results (filtered from {})",
            page.items.len(),
            page.total_filtered,
            page.total_results
        );
    } else {
        println!(
            "  Showing {} of {} results",
            page.items.len(),
            page.total_results
        );
    }

    for record in &page.items {
        let cutoff = record
            .applied_cutoff
            .map(|value| value.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  - [{}] {} | {} | {}, {} | match {}% ({}) | cutoff {} | {}",
            record.id,
            record.institute_name,
            record.branch,
            record.state,
            record.region,
            record.match_percentage,
            record.admission_chance.label(),
            cutoff,
            record.eligibility_status.label(),
        );
    }

    let window: Vec<String> = page
        .window
        .iter()
        .map(|link| match link {
            PageLink::Page(number) if *number == page.page => format!("[{number}]"),
            PageLink::Page(number) => number.to_string(),
            PageLink::Gap => "...".to_string(),
        })
        .collect();
    println!(
        "  Page {} of {}: {}",
        page.page,
        page.total_pages,
        window.join(" ")
    );
}

pub(crate) fn run_selection(command: SelectionCommand) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    init_cli_logging(&config)?;

    let mut store = open_selection_store(&config);
    let resolve = |id: &str| -> Result<SelectionEntry, AppError> {
        resolve_entry(&load_catalogue(&config)?, id)
    };

    let changed = match command {
        SelectionCommand::List => {
            render_selection(&store);
            return Ok(());
        }
        SelectionCommand::Table => {
            render_table(&comparison_table(store.compare_list()));
            return Ok(());
        }
        SelectionCommand::Favorite { id } => store.add_favorite(resolve(&id)?),
        SelectionCommand::Unfavorite { id } => store.remove_favorite(&id),
        SelectionCommand::Compare { id } => store.add_to_compare(resolve(&id)?)?,
        SelectionCommand::Uncompare { id } => store.remove_from_compare(&id),
        SelectionCommand::ClearCompare => store.clear_compare(),
    };

    if changed.changed() {
        // Write-through already happened; this only retries and reports a failed save.
        store.flush()?;
        println!("Selection updated.");
    } else {
        println!("Selection unchanged.");
    }
    render_selection(&store);
    Ok(())
}

fn resolve_entry(catalogue: &Catalogue, id: &str) -> Result<SelectionEntry, AppError> {
    catalogue
        .find(id)
        .map(SelectionEntry::from)
        .ok_or_else(|| SelectionError::UnknownOffering(id.to_string()).into())
}

fn render_selection(store: &SelectionStore<JsonFilePersistence>) {
    println!("Favorites ({})", store.favorites().len());
    for entry in store.favorites() {
        println!("  - [{}] {} | {}", entry.id, entry.institute_name, entry.branch);
    }
    println!(
        "Comparison list ({}/{})",
        store.compare_list().len(),
        COMPARE_CAPACITY
    );
    for entry in store.compare_list() {
        println!("  - [{}] {} | {}", entry.id, entry.institute_name, entry.branch);
    }
}

fn render_table(table: &ComparisonTable) {
    if table.is_empty() {
        println!("Comparison list is empty.");
        return;
    }

    let label_width = table
        .rows
        .iter()
        .map(|row| row.label.len())
        .max()
        .unwrap_or(0);
    for row in &table.rows {
        println!(
            "{:<label_width$} | {}",
            row.label,
            row.values.join(" | "),
            label_width = label_width
        );
    }
}
