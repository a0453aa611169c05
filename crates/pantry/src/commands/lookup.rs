//! Barcode lookup through the result controller.

use pantry_core::{CatalogConfig, CatalogSource, QueryClient, ResultController};

use crate::cli::LookupArgs;
use crate::error::CliError;
use crate::output::{self, Printer};

use super::ProductRow;

pub async fn handle<S: CatalogSource>(
    client: QueryClient<S>,
    catalog: &CatalogConfig,
    args: LookupArgs,
    printer: &Printer,
) -> Result<(), CliError> {
    let barcode = args.barcode.trim();
    if barcode.is_empty() {
        return Err(CliError::Validation {
            field: "barcode".into(),
            reason: "must not be empty".into(),
        });
    }

    let mut controller = ResultController::new(client, &catalog.default_category);
    let request = controller.set_barcode(barcode);
    controller.run(request).await;

    let state = controller.state();
    if let Some(reason) = &state.last_error {
        return Err(CliError::ServiceUnavailable {
            reason: reason.clone(),
        });
    }
    let Some(product) = &state.single_barcode_result else {
        return Err(CliError::product_not_found(barcode));
    };

    let out = output::render_list(
        printer.format,
        std::slice::from_ref(product),
        |p| ProductRow::from(p),
        |p| p.identifier.clone(),
    )?;
    printer.print(&out);
    printer.note(&format!("Full record: pantry product {}", product.identifier));
    Ok(())
}
