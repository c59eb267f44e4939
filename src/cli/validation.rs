use crate::cli::args::CliArgs;
use crate::model::{TypeFilter, ALL_TYPE_TAGS};
use crate::output::OutputFormat;

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if let Some(page) = args.page {
        if page == 0 {
            return Err("invalid --page, pages are numbered from 1".to_string());
        }
    }
    if let Some(page_size) = args.page_size {
        if page_size == 0 {
            return Err("invalid --page-size, expected positive integer".to_string());
        }
    }
    if let Some(limit) = args.limit {
        if limit == 0 {
            return Err("invalid --limit, expected positive integer".to_string());
        }
    }
    if let Some(raw) = args.type_filter.as_deref() {
        if TypeFilter::parse(raw).is_none() {
            let known = ALL_TYPE_TAGS
                .iter()
                .map(|t| t.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(format!(
                "invalid --type '{raw}', expected 'all' or one of: {known}"
            ));
        }
    }
    if let Some(raw) = args.output_format.as_deref() {
        if OutputFormat::parse(raw).is_none() {
            return Err(format!("invalid --out-format '{raw}', expected text or json"));
        }
    }
    Ok(())
}
