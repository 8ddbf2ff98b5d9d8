pub mod crosscutting;
pub mod energy;
pub mod finance;
pub mod food;
pub mod prediction;
pub mod session;

use crate::config::catalog::{Catalog, PredictionSpec};

/// The compiled-in catalog: every CSV source the dashboards ingest, in the
/// order the pages list them.
pub fn builtin_catalog() -> Catalog {
    let mut datasets = Vec::new();
    datasets.extend(food::datasets());
    datasets.extend(energy::datasets());
    datasets.extend(finance::datasets());

    Catalog {
        datasets,
        prediction: PredictionSpec {
            resource: "crisis_predictions.csv".to_string(),
        },
    }
}
