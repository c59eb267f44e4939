use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "dexview",
    version,
    about = "terminal Pokédex catalog viewer",
    long_about = "Dexview fetches the first-generation Pokédex from the public PokéAPI and renders a searchable, filterable, paginated catalog in the terminal.\n\nExamples:\n  dexview\n  dexview --search pi --sort base-exp-desc\n  dexview --type water --page 2\n  dexview --name pikachu\n\nTip: Use --config to persist defaults and keep invocations short."
)]
pub struct CliArgs {
    #[arg(
        short = 's',
        long = "search",
        value_name = "PREFIX",
        help_heading = "Query",
        help = "Only show records whose name starts with this prefix (case-insensitive)."
    )]
    pub search: Option<String>,

    #[arg(
        short = 't',
        long = "type",
        value_name = "TYPE",
        help_heading = "Query",
        help = "Only show records of this type (e.g. water); 'all' disables the filter."
    )]
    pub type_filter: Option<String>,

    #[arg(
        long = "sort",
        value_name = "KEY",
        help_heading = "Query",
        help = "Sort key: id-asc, id-desc, base-exp-asc, base-exp-desc (unknown keys fall back to id-asc)."
    )]
    pub sort: Option<String>,

    #[arg(
        short = 'n',
        long = "name",
        value_name = "NAME",
        help_heading = "Query",
        help = "Show the detail view for a single record instead of the listing."
    )]
    pub name: Option<String>,

    #[arg(
        short = 'p',
        long = "page",
        value_name = "N",
        help_heading = "Paging",
        help = "Page to show (1-based; out-of-range values stay on page 1)."
    )]
    pub page: Option<usize>,

    #[arg(
        long = "page-size",
        value_name = "N",
        help_heading = "Paging",
        help = "Records per page."
    )]
    pub page_size: Option<usize>,

    #[arg(
        short = 'l',
        long = "limit",
        value_name = "N",
        help_heading = "Input",
        help = "How many base records to fetch from the listing endpoint."
    )]
    pub limit: Option<u32>,

    #[arg(
        long = "api-base",
        value_name = "URL",
        help_heading = "HTTP",
        help = "Base URL of the remote API."
    )]
    pub api_base: Option<String>,

    #[arg(
        short = 'T',
        long = "timeout",
        value_name = "SECONDS",
        help_heading = "HTTP",
        help = "Per-request timeout in seconds."
    )]
    pub timeout: Option<usize>,

    #[arg(
        short = 'c',
        long = "concurrency",
        value_name = "N",
        help_heading = "Performance",
        help = "Max in-flight detail fetches (0 = fire the whole collection at once)."
    )]
    pub concurrency: Option<usize>,

    #[arg(
        short = 'w',
        long = "workers",
        value_name = "N",
        help_heading = "Performance",
        help = "Number of runtime worker threads."
    )]
    pub workers: Option<usize>,

    #[arg(
        short = 'C',
        long = "config",
        value_name = "FILE",
        help_heading = "Input",
        help = "Path to config file (defaults to ~/.dexview/config.yml)."
    )]
    pub config: Option<String>,

    #[arg(
        short = 'o',
        long = "out",
        value_name = "FILE",
        help_heading = "Output",
        help = "Write the result to a file instead of stdout."
    )]
    pub output: Option<String>,

    #[arg(
        long = "out-format",
        value_name = "FORMAT",
        help_heading = "Output",
        help = "Output format (text or json)."
    )]
    pub output_format: Option<String>,

    #[arg(
        long = "no-color",
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[arg(
        long = "color",
        help_heading = "Output",
        help = "Enable colored output (overrides --no-color)."
    )]
    pub color: bool,
}
