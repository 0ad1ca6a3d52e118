use catalog_core::RawParams;

use crate::commands::common::{
    describe_source, format_entry_lines, format_window_header, open_search, SearchContext,
};
use crate::error::CliError;

pub async fn run_search(
    params: &RawParams,
    as_json: bool,
    context: &SearchContext,
) -> Result<(), CliError> {
    for line in search_lines(params, as_json, context).await? {
        println!("{line}");
    }
    Ok(())
}

/// Run one search and render its output lines.
pub async fn search_lines(
    params: &RawParams,
    as_json: bool,
    context: &SearchContext,
) -> Result<Vec<String>, CliError> {
    let mut search = open_search(context)?;
    search.set_params(params).await;

    if search.loading_error() {
        return Err(CliError::CatalogUnavailable {
            location: describe_source(&context.source),
            reason: search
                .last_error()
                .unwrap_or("unknown error")
                .to_string(),
        });
    }

    if as_json {
        return Ok(vec![serde_json::to_string_pretty(search.window())?]);
    }

    let mut lines = vec![format_window_header(search.window(), search.state())];
    lines.extend(format_entry_lines(search.results()));
    Ok(lines)
}
