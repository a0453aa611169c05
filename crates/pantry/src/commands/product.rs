//! Product detail view.

use pantry_core::{CatalogSource, Fetched, QueryClient};

use crate::cli::ProductArgs;
use crate::error::CliError;
use crate::output::{self, Printer};

pub async fn handle<S: CatalogSource>(
    client: &QueryClient<S>,
    args: ProductArgs,
    printer: &Printer,
) -> Result<(), CliError> {
    let product = match client.fetch_by_identifier(args.identifier.trim()).await {
        Fetched::Data(Some(product)) => product,
        Fetched::Data(None) => return Err(CliError::product_not_found(&args.identifier)),
        Fetched::Failed(reason) => return Err(CliError::ServiceUnavailable { reason }),
    };

    let out = output::render_single(
        printer.format,
        &product,
        |p| super::detail(p, printer.color),
        |p| p.identifier.clone(),
    )?;
    printer.print(&out);
    Ok(())
}
