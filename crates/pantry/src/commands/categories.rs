//! Category names.

use pantry_core::{CatalogSource, Fetched, QueryClient};
use tabled::Tabled;

use crate::error::CliError;
use crate::output::{self, Printer};

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    name: String,
}

pub async fn handle<S: CatalogSource>(
    client: &QueryClient<S>,
    printer: &Printer,
) -> Result<(), CliError> {
    let names = match client.list_category_names().await {
        Fetched::Data(names) => names,
        Fetched::Failed(reason) => return Err(CliError::ServiceUnavailable { reason }),
    };

    let out = output::render_list(
        printer.format,
        &names,
        |name| CategoryRow { name: name.clone() },
        String::clone,
    )?;
    printer.print(&out);
    printer.note(&format!("{} categories", names.len()));
    Ok(())
}
