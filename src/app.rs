use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::time::Instant;

use crate::cli::args::CliArgs;
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::model::{SortKey, TypeFilter};
use crate::output::{self, OutputFormat};
use crate::paginate::Paginator;
use crate::query::{self, QueryState};
use crate::store::{CatalogLoader, StoreOptions, DEFAULT_API_BASE, DEFAULT_LIMIT};

pub const DEFAULT_PAGE_SIZE: usize = 24;

fn print_banner() {
    const BANNER: &str = r#"
     _                _
  __| | _____  ____ _(_) _____      __
 / _` |/ _ \ \/ / _` | |/ _ \ \ /\ / /
| (_| |  __/>  <| (_| | |  __/\ V  V /
 \__,_|\___/_/\_\\__,_|_|\___| \_/\_/
"#;
    print!("{}", BANNER);
    println!(
        "       v{} - terminal Pokédex catalog viewer",
        env!("CARGO_PKG_VERSION")
    );
    println!();
}

fn format_kv_line(label: &str, value: &str) {
    println!(":: {:<10}: {}", label, value);
}

fn sort_key_label(sort_key: SortKey) -> &'static str {
    match sort_key {
        SortKey::IdAsc => "id-asc",
        SortKey::IdDesc => "id-desc",
        SortKey::ExpAsc => "base-exp-asc",
        SortKey::ExpDesc => "base-exp-desc",
    }
}

fn type_filter_label(filter: TypeFilter) -> &'static str {
    match filter {
        TypeFilter::All => "all",
        TypeFilter::Only(tag) => tag.as_str(),
    }
}

#[derive(Clone, Debug)]
struct RunConfig {
    api_base: String,
    limit: u32,
    page: usize,
    page_size: usize,
    timeout: usize,
    concurrency: usize,
    workers: usize,
    search: String,
    type_filter: TypeFilter,
    sort_key: SortKey,
    name: Option<String>,
    output: Option<String>,
    output_format: Option<String>,
    no_color: bool,
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let no_color = if args.color {
        false
    } else {
        args.no_color || cfg.no_color.unwrap_or(false)
    };

    let api_base = args
        .api_base
        .or(cfg.api_base)
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    let limit = args.limit.or(cfg.limit).unwrap_or(DEFAULT_LIMIT);
    let page = args.page.unwrap_or(1);
    let page_size = args
        .page_size
        .or(cfg.page_size)
        .unwrap_or(DEFAULT_PAGE_SIZE);
    let timeout = args.timeout.or(cfg.timeout).unwrap_or(10);
    let concurrency = args.concurrency.or(cfg.concurrency).unwrap_or(0);
    let workers = args.workers.or(cfg.workers).unwrap_or(10);

    let search = args.search.or(cfg.search).unwrap_or_default();
    let type_filter_raw = args.type_filter.or(cfg.type_filter);
    let type_filter = match type_filter_raw.as_deref() {
        Some(raw) => TypeFilter::parse(raw)
            .ok_or_else(|| format!("invalid type filter '{raw}' in config"))?,
        None => TypeFilter::All,
    };
    // unknown sort keys fall back to ascending id rather than erroring
    let sort_key = args
        .sort
        .or(cfg.sort)
        .as_deref()
        .and_then(SortKey::parse)
        .unwrap_or_default();

    let name = args.name.map(|n| n.trim().to_lowercase());
    let name = match name {
        Some(n) if n.is_empty() => None,
        other => other,
    };

    let output = args
        .output
        .or(cfg.output)
        .map(|p| config::expand_tilde_string(&p));
    let output_format = args.output_format.or(cfg.output_format);

    Ok(RunConfig {
        api_base,
        limit,
        page,
        page_size,
        timeout,
        concurrency,
        workers,
        search,
        type_filter,
        sort_key,
        name,
        output,
        output_format,
        no_color,
    })
}

async fn run_async(run: RunConfig) -> Result<(), String> {
    if run.no_color {
        colored::control::set_override(false);
    }
    print_banner();

    let options = StoreOptions {
        api_base: run.api_base.clone(),
        limit: run.limit,
        timeout_seconds: run.timeout,
        concurrency: run.concurrency,
    };
    let loader = Arc::new(CatalogLoader::new(options).map_err(|e| e.to_string())?);

    format_kv_line(
        "Source",
        &format!("{} limit={}", run.api_base, run.limit),
    );
    format_kv_line(
        "HTTP",
        &format!(
            "timeout={}s conc={} workers={}",
            run.timeout,
            if run.concurrency == 0 {
                "all".to_string()
            } else {
                run.concurrency.to_string()
            },
            run.workers
        ),
    );

    let now = Instant::now();

    if let Some(name) = run.name.as_deref() {
        format_kv_line("Record", name);
        println!();
        let pokemon = loader
            .fetch_by_name(name)
            .await
            .map_err(|e| format!("failed to fetch '{name}': {e}"))?;
        print!("{}", output::render_detail(&pokemon));
        println!();
        println!(
            ":: Completed :: lookup took {}s ::",
            now.elapsed().as_secs()
        );
        return Ok(());
    }

    format_kv_line(
        "Query",
        &format!(
            "search={} type={} sort={}",
            if run.search.is_empty() {
                "none"
            } else {
                run.search.as_str()
            },
            type_filter_label(run.type_filter),
            sort_key_label(run.sort_key)
        ),
    );
    format_kv_line(
        "Paging",
        &format!("page={} size={}", run.page, run.page_size),
    );
    println!();

    let pb = ProgressBar::new(run.limit as u64);
    pb.set_draw_target(ProgressDrawTarget::stderr());
    pb.enable_steady_tick(Duration::from_millis(200));
    pb.set_style(
        ProgressStyle::with_template(
            ":: Loading: [{pos}/{len}] :: {per_sec} :: Duration: [{elapsed_precise}] ::",
        )
        .map_err(|e| format!("failed to build progress bar style: {e}"))?
        .progress_chars(r#"#>-"#),
    );

    let mut progress_rx = loader.progress();
    let mut load_handle = {
        let loader = loader.clone();
        tokio::spawn(async move { loader.load().await })
    };

    let catalog = loop {
        tokio::select! {
            joined = &mut load_handle => {
                let catalog = joined
                    .map_err(|e| format!("load task failed: {e}"))?
                    .map_err(|e| e.to_string())?;
                break catalog;
            }
            changed = progress_rx.changed() => {
                if changed.is_ok() {
                    let progress = *progress_rx.borrow_and_update();
                    pb.set_length(progress.total.max(1) as u64);
                    pb.set_position(progress.loaded as u64);
                }
            }
        }
    };
    pb.finish_and_clear();

    format_kv_line(
        "Loaded",
        &format!("{}/{}", catalog.loaded(), catalog.total()),
    );
    if catalog.has_error() {
        println!("{}", output::render_incomplete_notice(catalog.failures()));
    }
    println!();

    let query = QueryState {
        search_term: run.search.clone(),
        selected_type: run.type_filter,
        sort_key: run.sort_key,
    };
    let filtered = query::apply(&catalog.records(), &query);

    let mut paginator = Paginator::new(filtered.len(), run.page_size);
    paginator.go_to_page(run.page);

    if filtered.is_empty() {
        println!("{}", output::render_empty_notice(&run.search));
    } else {
        print!("{}", output::render_listing(paginator.visible_slice(&filtered)));
        if let Some(controls) = output::render_pagination(&paginator) {
            println!();
            println!("{}", controls);
        }
    }

    if let Some(outfile_path) = run.output.as_ref() {
        let output_format = run
            .output_format
            .as_deref()
            .and_then(OutputFormat::parse)
            .or_else(|| output::infer_format_from_path(outfile_path))
            .unwrap_or(OutputFormat::Text);

        let rendered = match output_format {
            OutputFormat::Text => output::render_text(&filtered),
            OutputFormat::Json => output::render_json(&filtered),
        };

        let mut outfile = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(outfile_path)
            .await
            .map_err(|e| format!("failed to open output file: {e}"))?;
        outfile
            .write_all(&rendered)
            .await
            .map_err(|_| "failed to write output file".to_string())?;
    }

    println!();
    println!(
        ":: Completed :: load took {}s ::",
        now.elapsed().as_secs()
    );

    Ok(())
}

pub fn run_cli() -> Result<(), String> {
    let args = CliArgs::parse();

    let cfg = match args.config.clone() {
        Some(raw) => config::load_config(&config::expand_tilde(&raw), false)?,
        None => match config::default_config_path() {
            Some(path) => {
                // best-effort seed of a commented starter config
                let _ = config::ensure_default_config_file(&path);
                config::load_config(&path, true)?
            }
            None => ConfigFile::default(),
        },
    };

    let run = build_run_config(args, cfg)?;

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .worker_threads(run.workers)
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;

    rt.block_on(run_async(run))?;
    Ok(())
}
