use crate::config::catalog::{DatasetSpec, FieldSpec};

/// Brent, Dubai and Urals benchmark spot prices. The Urals column carries
/// literal "NA" gaps.
pub fn oil_benchmarks_spec() -> DatasetSpec {
    DatasetSpec::new(
        "energy_oil",
        "plot_3a1.csv",
        vec![
            FieldSpec::plain("europe"),
            FieldSpec::plain("middleeast"),
            FieldSpec::plain("russia"),
        ],
    )
}

pub fn oil_regional_spec() -> DatasetSpec {
    DatasetSpec::new(
        "energy_oil_regions",
        "plot_3b1.csv",
        vec![
            FieldSpec::plain("asia"),
            FieldSpec::plain("europe"),
            FieldSpec::plain("us"),
        ],
    )
}

pub fn datasets() -> Vec<DatasetSpec> {
    vec![oil_benchmarks_spec(), oil_regional_spec()]
}
