//! Category browsing.

use pantry_core::{CatalogConfig, CatalogSource, QueryClient, ResultController};

use crate::cli::BrowseArgs;
use crate::error::CliError;
use crate::output::Printer;

pub async fn handle<S: CatalogSource>(
    client: QueryClient<S>,
    catalog: &CatalogConfig,
    args: BrowseArgs,
    printer: &Printer,
) -> Result<(), CliError> {
    let category = args
        .category
        .unwrap_or_else(|| catalog.default_category.clone());

    let mut controller = ResultController::new(client, &catalog.default_category)
        .with_sort_order(args.paging.sort.into());
    let first = controller
        .select_category(&category)
        .ok_or_else(|| CliError::Validation {
            field: "category".into(),
            reason: "must not be empty".into(),
        })?;

    super::run_listing(controller, first, args.paging.pages, printer).await
}
