// crates/cli/src/main.rs
//! jobtrack command-line front end.
//!
//! Local commands work on the record file directly. `search` runs one online
//! search through the orchestrator, shows a spinner while it is in flight and
//! drains the foreground queue on this task until the outcome arrives.

mod render;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use jobtrack_core::{
    resume_archive, view, RecordStore, SearchField, SearchQuery, Settings, SortColumn, SortOrder,
    SortSpec,
};
use jobtrack_search::{foreground_queue, JoobleClient, Outcome, SearchOrchestrator};
use jobtrack_types::{parse_keywords, ExperienceLevel, IdentityKey, Record, Status};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "jobtrack", version, about = "Track job openings and search for new ones")]
struct Cli {
    /// Record file to use instead of the configured one.
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List tracked openings, optionally filtered and sorted.
    List {
        /// Field to match against.
        #[arg(long, default_value = "everywhere")]
        field: SearchField,
        /// Text to look for, or a status/experience label.
        #[arg(long, short, default_value = "")]
        query: String,
        #[arg(long, default_value = "title")]
        sort: SortColumn,
        #[arg(long)]
        desc: bool,
    },
    /// Track a new opening.
    Add(RecordArgs),
    /// Edit the opening identified by --title/--company.
    Update {
        #[arg(long)]
        title: String,
        #[arg(long)]
        company: String,
        #[command(flatten)]
        changes: UpdateArgs,
    },
    /// Stop tracking an opening.
    Delete {
        #[arg(long)]
        title: String,
        #[arg(long)]
        company: String,
    },
    /// Attach (or with --clear, detach) a résumé file.
    AttachResume {
        #[arg(long)]
        title: String,
        #[arg(long)]
        company: String,
        #[arg(required_unless_present = "clear")]
        file: Option<PathBuf>,
        #[arg(long)]
        clear: bool,
    },
    /// List every attached résumé, or open one by its row number.
    Resumes {
        #[arg(long, value_name = "N")]
        open: Option<usize>,
    },
    /// Search Jooble for openings not tracked yet. Ctrl-C cancels.
    Search {
        term: String,
        /// Add the new results to the record file.
        #[arg(long)]
        save: bool,
        /// Print the outcome as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Args)]
struct RecordArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    company: String,
    #[arg(long, default_value = "")]
    description: String,
    /// Comma-separated keywords.
    #[arg(long, default_value = "")]
    keywords: String,
    #[arg(long, default_value = "")]
    url: String,
    #[arg(long, default_value = "New")]
    status: Status,
    #[arg(long, default_value = "Unspecified")]
    experience: ExperienceLevel,
    #[arg(long, default_value = "")]
    notes: String,
}

impl RecordArgs {
    fn into_record(self) -> Record {
        Record::new(self.title.trim(), self.company.trim())
            .with_description(self.description)
            .with_keywords(parse_keywords(&self.keywords))
            .with_source_url(self.url)
            .with_status(self.status)
            .with_experience(self.experience)
            .with_notes(self.notes)
    }
}

#[derive(Debug, Default, Args)]
struct UpdateArgs {
    #[arg(long)]
    new_title: Option<String>,
    #[arg(long)]
    new_company: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    keywords: Option<String>,
    #[arg(long)]
    url: Option<String>,
    #[arg(long)]
    status: Option<Status>,
    #[arg(long)]
    experience: Option<ExperienceLevel>,
    #[arg(long)]
    notes: Option<String>,
}

impl UpdateArgs {
    fn apply(self, mut record: Record) -> Record {
        if let Some(title) = self.new_title {
            record.title = title.trim().to_string();
        }
        if let Some(company) = self.new_company {
            record.company = company.trim().to_string();
        }
        if let Some(description) = self.description {
            record.description = description;
        }
        if let Some(keywords) = self.keywords {
            record = record.with_keywords(parse_keywords(&keywords));
        }
        if let Some(url) = self.url {
            record.source_url = url;
        }
        if let Some(status) = self.status {
            record.status = status;
        }
        if let Some(level) = self.experience {
            record.experience_level = level;
        }
        if let Some(notes) = self.notes {
            record.notes = notes;
        }
        record
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn,jobtrack=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = Settings::load()?;
    let path = cli
        .data_file
        .or_else(|| settings.records_path())
        .context("no data directory available; pass --data-file")?;
    let store = RecordStore::open(&path).await?;

    match cli.command {
        Command::List { field, query, sort, desc } => {
            let matcher = SearchQuery::new(field, query).compile()?;
            let order = if desc { SortOrder::Descending } else { SortOrder::Ascending };
            let rows = view(&store.snapshot(), &matcher, SortSpec::new(sort, order));
            print!("{}", render::table(&rows));
            eprintln!("{} of {} openings", rows.len(), store.len());
        }
        Command::Add(args) => {
            let record = args.into_record();
            let title = record.title.clone();
            store.insert(record)?;
            store.save().await?;
            eprintln!("Added '{title}'");
        }
        Command::Update { title, company, changes } => {
            let key = IdentityKey::new(&title, &company);
            let Some(current) = store.find(&key) else {
                bail!("no opening '{title}' at '{company}'");
            };
            store.update(&key, changes.apply(current))?;
            store.save().await?;
            eprintln!("Updated '{title}'");
        }
        Command::Delete { title, company } => {
            if !store.delete(&IdentityKey::new(&title, &company)) {
                bail!("no opening '{title}' at '{company}'");
            }
            store.save().await?;
            eprintln!("Deleted '{title}'");
        }
        Command::AttachResume { title, company, file, clear } => {
            let key = IdentityKey::new(&title, &company);
            match file {
                Some(file) if !clear => store.attach_resume(&key, &file)?,
                _ => store.clear_resume(&key)?,
            }
            store.save().await?;
        }
        Command::Resumes { open } => {
            let archive = resume_archive(&store.snapshot());
            match open {
                None => {
                    print!("{}", render::resume_table(&archive));
                    eprintln!("{} résumés", archive.len());
                }
                Some(n) => {
                    let Some(entry) = n.checked_sub(1).and_then(|i| archive.get(i)) else {
                        bail!("no résumé #{n}; the archive has {}", archive.len());
                    };
                    open::that(&entry.path)
                        .with_context(|| format!("failed to open {}", entry.path))?;
                    eprintln!("Opened {}", entry.file_name);
                }
            }
        }
        Command::Search { term, save, json } => {
            run_search(&settings, store, &term, save, json).await?
        }
    }
    Ok(())
}

/// Machine-readable form of one finished search.
#[derive(Debug, Serialize)]
struct SearchReport<'a> {
    term: &'a str,
    status: String,
    #[serde(flatten)]
    outcome: &'a Outcome,
}

async fn run_search(
    settings: &Settings,
    store: RecordStore,
    term: &str,
    save: bool,
    json: bool,
) -> Result<()> {
    let client = JoobleClient::from_settings(settings)?;
    let (queue, mut foreground) = foreground_queue();
    let orchestrator = SearchOrchestrator::new(Arc::new(client), store.clone(), Arc::new(queue));

    let (tx, mut rx) = tokio::sync::oneshot::channel::<Outcome>();
    let handle = orchestrator.start(term, move |outcome| {
        let _ = tx.send(outcome);
    })?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("  {spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(format!("Searching online for '{term}'... (Ctrl-C to cancel)"));
    pb.enable_steady_tick(Duration::from_millis(100));

    let mut interrupted = false;
    let outcome = loop {
        tokio::select! {
            res = tokio::signal::ctrl_c(), if !interrupted => {
                interrupted = true;
                if let Err(e) = res {
                    tracing::warn!(error = %e, "failed to listen for Ctrl-C");
                    continue;
                }
                orchestrator.cancel();
                pb.set_message("Cancelling...");
            }
            ran = foreground.run_next() => {
                if let Ok(outcome) = rx.try_recv() {
                    break outcome;
                }
                if !ran {
                    bail!("search ended without an outcome");
                }
            }
        }
    };
    pb.finish_and_clear();
    handle.wait().await;

    if json {
        let report = SearchReport {
            term,
            status: outcome.status_line(term),
            outcome: &outcome,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        eprintln!("{}", outcome.status_line(term));
    }
    let Outcome::Results(records) = outcome else {
        return Ok(());
    };
    if records.is_empty() {
        return Ok(());
    }
    if !json {
        print!("{}", render::table(&records));
    }

    if save {
        let mut added = 0;
        for record in records {
            match store.insert(record) {
                Ok(()) => added += 1,
                Err(e) => tracing::warn!(error = %e, "not saving search result"),
            }
        }
        store.save().await?;
        eprintln!("Saved {added} new openings");
    }
    Ok(())
}
