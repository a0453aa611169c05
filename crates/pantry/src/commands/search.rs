//! Fuzzy name search.

use pantry_core::{CatalogConfig, CatalogSource, QueryClient, ResultController};

use crate::cli::SearchArgs;
use crate::error::CliError;
use crate::output::Printer;

pub async fn handle<S: CatalogSource>(
    client: QueryClient<S>,
    catalog: &CatalogConfig,
    args: SearchArgs,
    printer: &Printer,
) -> Result<(), CliError> {
    let text = args.text.trim();
    if text.is_empty() {
        return Err(CliError::Validation {
            field: "text".into(),
            reason: "search text must not be empty".into(),
        });
    }

    let mut controller = ResultController::new(client, &catalog.default_category)
        .with_sort_order(args.paging.sort.into());
    let first = controller.set_search_text(text);

    super::run_listing(controller, first, args.paging.pages, printer).await
}
