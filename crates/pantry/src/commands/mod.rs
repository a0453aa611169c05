//! Command dispatch: bridges CLI args -> core queries -> output formatting.

pub mod browse;
pub mod categories;
pub mod config_cmd;
pub mod lookup;
pub mod product;
pub mod search;

use pantry_core::{
    CatalogConfig, CatalogSource, FetchRequest, Product, QueryClient, ResultController,
};
use tabled::Tabled;

use crate::cli::{Command, OutputFormat};
use crate::error::CliError;
use crate::output::{self, Printer};

/// Dispatch a catalog-bound command to the appropriate handler.
pub async fn dispatch<S: CatalogSource>(
    cmd: Command,
    client: QueryClient<S>,
    catalog: &CatalogConfig,
    printer: &Printer,
) -> Result<(), CliError> {
    match cmd {
        Command::Browse(args) => browse::handle(client, catalog, args, printer).await,
        Command::Search(args) => search::handle(client, catalog, args, printer).await,
        Command::Lookup(args) => lookup::handle(client, catalog, args, printer).await,
        Command::Product(args) => product::handle(&client, args, printer).await,
        Command::Categories => categories::handle(&client, printer).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}

// ── Product rendering ───────────────────────────────────────────────

#[derive(Tabled)]
pub(crate) struct ProductRow {
    #[tabled(rename = "Barcode")]
    barcode: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Brands")]
    brands: String,
    #[tabled(rename = "Quantity")]
    quantity: String,
    #[tabled(rename = "Grade")]
    grade: String,
}

impl From<&Product> for ProductRow {
    fn from(p: &Product) -> Self {
        Self {
            barcode: p.identifier.clone(),
            name: p.name.clone().unwrap_or_default(),
            brands: p.brands.clone().unwrap_or_default(),
            quantity: p.quantity.clone().unwrap_or_default(),
            grade: p.grade_or_empty().to_uppercase(),
        }
    }
}

/// Every field of a product, one per line.
pub(crate) fn detail(p: &Product, color: bool) -> String {
    let key = |name: &str| output::label(&format!("{:<22}", format!("{name}:")), color);
    let field = |name: &str, value: Option<&str>| format!("{}{}", key(name), value.unwrap_or("-"));
    let grade = p
        .nutrition_grade
        .as_deref()
        .map_or_else(|| "-".into(), |g| output::paint_grade(g, color));

    [
        field("Barcode", Some(p.identifier.as_str())),
        field("Name", p.name.as_deref()),
        field("Brands", p.brands.as_deref()),
        field("Quantity", p.quantity.as_deref()),
        format!("{}{grade}", key("Nutri-Score")),
        field("Categories", p.categories.as_deref()),
        field("Ingredients", p.ingredients_text.as_deref()),
        field("Manufacturing places", p.manufacturing_places.as_deref()),
        field("Origins", p.origins.as_deref()),
        field("Labels", p.labels.as_deref()),
        field("Stores", p.stores.as_deref()),
        field("Countries", p.countries.as_deref()),
        field("Image", p.image_url.as_deref()),
    ]
    .join("\n")
}

// ── Paged listings ──────────────────────────────────────────────────

/// Apply `first`, then keep loading until `pages` pages are in or the
/// listing runs dry, and print the accumulated products.
///
/// A failed first page is an error; a failed later page keeps what was
/// already loaded and reports the failure on stderr.
pub(crate) async fn run_listing<S: CatalogSource>(
    mut controller: ResultController<S>,
    first: FetchRequest,
    pages: u32,
    printer: &Printer,
) -> Result<(), CliError> {
    controller.run(first).await;
    while controller.page() < pages {
        let Some(request) = controller.load_more() else {
            break;
        };
        controller.run(request).await;
    }

    let view = controller.view();
    let results = &view.results;
    if let Some(reason) = &results.last_error {
        if results.accumulated_products.is_empty() {
            return Err(CliError::ServiceUnavailable {
                reason: reason.clone(),
            });
        }
        eprintln!("warning: page {} could not be loaded: {reason}", view.page);
    }

    let out = match printer.format {
        OutputFormat::Json | OutputFormat::JsonCompact | OutputFormat::Yaml => {
            output::render_structured(printer.format, &*view)?
        }
        other => output::render_list(
            other,
            &results.accumulated_products,
            |p| ProductRow::from(p),
            |p| p.identifier.clone(),
        )?,
    };
    printer.print(&out);

    let more = if view.can_load_more {
        format!(", more with --pages {}", view.page + 1)
    } else {
        String::new()
    };
    printer.note(&format!(
        "{} products, {} page(s){more}",
        results.accumulated_products.len(),
        view.page
    ));
    Ok(())
}
