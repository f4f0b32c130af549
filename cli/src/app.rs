use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use sintonia_catalog::{LocalCatalog, PlaylistFileWriter};
use sintonia_config::{SintoniaPaths, TomlConfigBackend};
use sintonia_core::ports::{CollectionSpec, TasteStore};
use sintonia_core::services::{PlaylistService, SelectionRules, TasteService};
use sintonia_core::taste::{PresenterFilter, TasteReport};
use sintonia_feed::{FeedConfig, FileFeed};
use sintonia_storage::FileTasteStore;
use tokio::signal;
use tracing::{info, warn};

use crate::args::{AnalyzeArgs, BuildArgs, Cli, FeedArgs, split_terms};
use crate::config::{Settings, matcher};
use crate::infrastructure::reporter::ConsoleReporter;

/// Resolved configuration plus the concrete adapters behind each port.
pub struct App {
  config_file: PathBuf,
  settings: Settings,
  store_path: PathBuf,
  catalog_path: PathBuf,
  output_dir: PathBuf,
}

impl App {
  pub fn bootstrap(cli: &Cli) -> Result<Self> {
    let paths = SintoniaPaths::detect().context("resolving sintonia directories")?;
    let backend = TomlConfigBackend::new(paths.clone());
    let settings = Settings::load(&backend).with_context(|| format!("loading {}", paths.config_file().display()))?;

    let store_path = cli.store.clone().unwrap_or_else(|| settings.storage.store_file(&paths));
    let catalog_path = cli.catalog.clone().unwrap_or_else(|| settings.catalog.catalog_file(&paths));
    let output_dir = cli.output_dir.clone().unwrap_or_else(|| settings.catalog.output_dir(&paths));

    info!(store = %store_path.display(), catalog = %catalog_path.display(), "configuration loaded");
    Ok(Self { config_file: paths.config_file(), settings, store_path, catalog_path, output_dir })
  }

  fn store(&self) -> FileTasteStore {
    FileTasteStore::new(&self.store_path)
  }

  fn catalog(&self) -> Result<Arc<LocalCatalog>> {
    let catalog = LocalCatalog::open(&self.catalog_path).context("opening catalog")?;
    Ok(Arc::new(catalog))
  }

  fn feed(&self, path: &Path, args: &FeedArgs) -> Result<FileFeed> {
    let config = feed_config(&self.settings.feed, args);
    FileFeed::open(path, config).with_context(|| format!("reading songs from {}", path.display()))
  }

  fn taste_service(&self, catalog: Arc<LocalCatalog>) -> Result<TasteService<Arc<LocalCatalog>, FileTasteStore>> {
    let taste = &self.settings.taste;
    let profile = taste.profile().context("invalid [taste] terms")?;
    let classifier = taste.classifier().context("invalid [taste] thresholds")?;
    Ok(TasteService::new(catalog, self.store(), profile, classifier))
  }

  pub async fn build(&self, args: BuildArgs) -> Result<()> {
    println!("Reading songs from {}...", args.songs_file.display());
    let feed = self.feed(&args.songs_file, &args.feed)?;
    let catalog = self.catalog()?;

    let exclude = match &args.exclude_genres {
      Some(raw) => matcher(&split_terms(raw)),
      None => self.settings.filter.exclusions(),
    };
    if !exclude.is_empty() {
      let terms: Vec<&str> = exclude.terms().iter().map(|t| t.as_str()).collect();
      println!("Excluding genres: {}", terms.join(", "));
    }

    let presenters = match presenter_filter(&args, &self.settings) {
      Some(filter) => {
        let gate = self.taste_service(catalog.clone())?.gate(filter)?;
        println!("Filtering presenters: {}", describe(filter));
        Some(gate)
      }
      None => None,
    };

    println!("\nSearching for tracks...");
    let service = PlaylistService::new(catalog, PlaylistFileWriter::new(&self.output_dir), ConsoleReporter);
    let assembly = service.assemble(&feed, &SelectionRules { exclude, presenters }).await?;

    if assembly.tracks.is_empty() {
      println!("No tracks found. Exiting.");
    } else {
      println!("\nCreating playlist '{}'...", args.name);
    }

    let spec = CollectionSpec { name: args.name, description: args.description, public: !args.private };
    let handle = service.publish(&assembly.track_ids(), &spec).await?;

    println!("\nPlaylist created successfully!");
    println!("Location: {}", handle.location);
    Ok(())
  }

  pub async fn analyze(&self, args: AnalyzeArgs) -> Result<()> {
    let feed = self.feed(&args.songs_file, &args.feed)?;
    let taste = self.taste_service(self.catalog()?)?;

    // Dropping `learn` before it returns means nothing was saved.
    let outcome = tokio::select! {
      outcome = taste.learn(&feed) => outcome?,
      _ = signal::ctrl_c() => {
        warn!("interrupted, taste store left untouched");
        bail!("interrupted before the taste store was saved");
      }
    };

    println!("Observed {} songs ({} without presenter)\n", outcome.observed, outcome.unattributed);
    print!("{}", TasteReport::build(&outcome.book, taste.classifier()));
    Ok(())
  }

  pub fn report(&self) -> Result<()> {
    let book = self.store().load()?;
    if book.is_empty() {
      println!("No presenters recorded yet. Run `sintonia analyze` first.");
      return Ok(());
    }
    let classifier = self.settings.taste.classifier().context("invalid [taste] thresholds")?;
    print!("{}", TasteReport::build(&book, &classifier));
    Ok(())
  }

  pub fn print_locations(&self) {
    println!("config:    {}", self.config_file.display());
    println!("store:     {}", self.store_path.display());
    println!("catalog:   {}", self.catalog_path.display());
    println!("playlists: {}", self.output_dir.display());
  }
}

fn feed_config(base: &FeedConfig, args: &FeedArgs) -> FeedConfig {
  FeedConfig {
    dedup: base.dedup && !args.keep_duplicates,
    limit: args.limit.unwrap_or(base.limit),
    title_case: base.title_case || args.title_case,
    title_suffixes: base.title_suffixes.clone(),
  }
}

/// Flags take precedence over `[filter]`; any presenter flag turns filtering on.
fn presenter_filter(args: &BuildArgs, settings: &Settings) -> Option<PresenterFilter> {
  if args.include_neutral {
    return Some(PresenterFilter::Tiers { include_neutral: true });
  }
  if let Some(n) = args.top_n {
    return Some(PresenterFilter::TopN(n));
  }
  match settings.filter.presenter_filter() {
    Some(filter) => Some(filter),
    None if args.filter_presenters => Some(PresenterFilter::default()),
    None => None,
  }
}

fn describe(filter: PresenterFilter) -> String {
  match filter {
    PresenterFilter::Tiers { include_neutral: false } => "preferred only".to_string(),
    PresenterFilter::Tiers { include_neutral: true } => "preferred and neutral".to_string(),
    PresenterFilter::TopN(n) => format!("top {n} by score"),
  }
}
