//! tabview - Entry Point

use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tabview::model::AppError;
use tabview::query::SortDescriptor;
use tabview::view::{ColorConfig, InitialQuery, TableStyles};
use tracing::info;

/// tabview - browse JSON records as a searchable, sortable, paginated table
#[derive(Parser, Debug)]
#[command(name = "tabview")]
#[command(version)]
#[command(about = "Browse a JSON array or JSON Lines file as a searchable, sortable table")]
pub struct Args {
    /// Path to a JSON array or JSONL file (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Start with a search term applied
    #[arg(short, long)]
    pub search: Option<String>,

    /// Sort by a column, e.g. `age:desc`; repeat for tie-breakers.
    /// Only a trailing `:asc` or `:desc` is read as a direction
    #[arg(long, value_name = "COL[:asc|desc]")]
    pub sort: Vec<SortDescriptor>,

    /// Rows per page
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: Option<u32>,

    /// Start on this page (1-based)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: Option<u32>,

    /// Comma-separated columns to show, in order
    #[arg(long, value_delimiter = ',')]
    pub columns: Option<Vec<String>>,

    /// Print the page as plain text instead of starting the browser
    #[arg(long)]
    pub print: bool,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("tabview: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), AppError> {
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = tabview::config::load_config_with_precedence(args.config.clone())?;
        let merged = tabview::config::merge_config(config_file);
        let with_env = tabview::config::apply_env_overrides(merged);
        let page_size_override = args.page_size.map(|n| n as usize);
        tabview::config::apply_cli_overrides(with_env, page_size_override, args.columns.clone())
    };

    tabview::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let mut source = tabview::source::detect_input_source(args.file.clone())?;
    let loaded = source.load()?;

    let mut view = tabview::view::build_record_view(&loaded.records, &config)?;
    let query = InitialQuery {
        search: args.search.clone(),
        sort: args.sort.clone(),
        page: args.page.map(|n| n as usize),
    };
    query.apply(&mut view, &loaded.records);

    if args.print {
        tabview::view::print_page(&view, &loaded.records, &mut io::stdout().lock())?;
        return Ok(());
    }

    let styles = TableStyles::with_color_config(ColorConfig::from_env_and_args(args.no_color));
    tabview::view::run_with_source(source, loaded.records, view, styles)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tabview::query::SortDirection;

    #[test]
    fn test_help_does_not_error() {
        let result = Args::try_parse_from(["tabview", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["tabview", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_args_defaults() {
        let args = Args::parse_from(["tabview"]);
        assert_eq!(args.file, None);
        assert_eq!(args.search, None);
        assert!(args.sort.is_empty());
        assert_eq!(args.page_size, None);
        assert_eq!(args.page, None);
        assert_eq!(args.columns, None);
        assert!(!args.print);
        assert!(!args.no_color);
        assert_eq!(args.config, None);
    }

    #[test]
    fn test_file_path_populates_file_field() {
        let args = Args::parse_from(["tabview", "people.json"]);
        assert_eq!(args.file, Some(PathBuf::from("people.json")));
    }

    #[test]
    fn test_search_flag_short() {
        let args = Args::parse_from(["tabview", "-s", "alice"]);
        assert_eq!(args.search, Some("alice".to_string()));
    }

    #[test]
    fn test_sort_flag_repeats_with_direction() {
        let args = Args::parse_from(["tabview", "--sort", "age:desc", "--sort", "name"]);
        assert_eq!(
            args.sort,
            vec![
                SortDescriptor {
                    column_id: "age".to_string(),
                    direction: SortDirection::Desc,
                },
                SortDescriptor::asc("name"),
            ]
        );
    }

    #[test]
    fn test_sort_flag_keeps_colon_in_column_id() {
        let args = Args::parse_from(["tabview", "--sort", "meta:owner"]);
        assert_eq!(args.sort, vec![SortDescriptor::asc("meta:owner")]);
    }

    #[test]
    fn test_sort_flag_rejects_empty_column() {
        let result = Args::try_parse_from(["tabview", "--sort", ":desc"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_columns_split_on_commas() {
        let args = Args::parse_from(["tabview", "--columns", "name,email"]);
        assert_eq!(
            args.columns,
            Some(vec!["name".to_string(), "email".to_string()])
        );
    }

    #[test]
    fn test_page_size_zero_rejected() {
        let result = Args::try_parse_from(["tabview", "--page-size", "0"]);
        assert!(result.is_err(), "page size must be positive");
    }

    #[test]
    fn test_page_zero_rejected() {
        let result = Args::try_parse_from(["tabview", "--page", "0"]);
        assert!(result.is_err(), "pages are 1-based");
    }

    #[test]
    fn test_print_and_page_flags() {
        let args = Args::parse_from(["tabview", "--print", "--page", "3", "--page-size", "20"]);
        assert!(args.print);
        assert_eq!(args.page, Some(3));
        assert_eq!(args.page_size, Some(20));
    }
}
