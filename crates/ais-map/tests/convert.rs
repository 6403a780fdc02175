use std::path::{Path, PathBuf};

use proptest::prelude::*;
use tempfile::TempDir;

use ais_catalog::{AssetType, MappingCatalog};
use ais_ingest::{IngestError, parse_table};
use ais_map::{FieldValueMapper, MapError, convert_file, generate_template};

fn default_catalog() -> MappingCatalog {
    MappingCatalog::embedded_default().expect("embedded catalog parses")
}

fn write_gbk(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, encoding_rs::GBK.encode(text).0).unwrap();
    path
}

#[test]
fn converts_gbk_file_end_to_end() {
    let dir = TempDir::new().unwrap();
    let input = write_gbk(
        dir.path(),
        "assets.csv",
        "设备名称,类别,状态,制造商\n联想笔记本,笔记本电脑,在用,戴尔\n",
    );
    let output = dir.path().join("assets_converted.csv");

    let report = convert_file(&default_catalog(), &input, &output, AssetType::Assets).unwrap();

    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "Item Name,Category,Status,Manufacturer\n联想笔记本,Laptop,Deployed,Dell\n"
    );
    assert_eq!(report.columns, 4);
    assert_eq!(report.data_rows, 1);
    assert_eq!(report.log.converted_count(), 4);
    assert_eq!(report.delimiter, ',');
}

#[test]
fn converts_semicolon_file_to_commas() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("assets.csv");
    std::fs::write(&input, "设备名称;类别\n\"A, B\";笔记本电脑\n").unwrap();
    let output = dir.path().join("out.csv");

    let report = convert_file(&default_catalog(), &input, &output, AssetType::Assets).unwrap();

    assert_eq!(report.delimiter, ';');
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "Item Name,Category\n\"A, B\",Laptop\n"
    );
}

#[test]
fn empty_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("empty.csv");
    std::fs::write(&input, "").unwrap();

    let result = convert_file(
        &default_catalog(),
        &input,
        &dir.path().join("out.csv"),
        AssetType::Assets,
    );

    assert!(matches!(result, Err(MapError::Ingest(IngestError::EmptyInput))));
}

#[test]
fn templates_convert_back_to_canonical_headers() {
    let catalog = default_catalog();
    let dir = TempDir::new().unwrap();

    for asset_type in AssetType::ALL {
        let template = dir.path().join(format!("{asset_type}_template.csv"));
        let converted = dir.path().join(format!("{asset_type}_converted.csv"));
        generate_template(&catalog, asset_type, &template).unwrap();

        let report = convert_file(&catalog, &template, &converted, asset_type).unwrap();

        let expected: Vec<String> = catalog
            .field_table(asset_type)
            .unwrap()
            .iter()
            .map(|(_, canonical)| canonical.to_string())
            .collect();
        let text = std::fs::read_to_string(&converted).unwrap();
        let table = parse_table(&text).unwrap();
        assert_eq!(table.header(), expected.as_slice(), "{asset_type}");
        assert!(report.log.unmatched.is_empty(), "{asset_type}");
    }
}

#[test]
fn template_sample_values_are_translated() {
    let catalog = default_catalog();
    let dir = TempDir::new().unwrap();
    let template = dir.path().join("assets_template.csv");
    let converted = dir.path().join("assets_converted.csv");
    generate_template(&catalog, AssetType::Assets, &template).unwrap();

    convert_file(&catalog, &template, &converted, AssetType::Assets).unwrap();

    let text = std::fs::read_to_string(&converted).unwrap();
    let table = parse_table(&text).unwrap();
    let cell = |field: &str| {
        let index = table.header().iter().position(|h| h == field).unwrap();
        table.data_rows()[0][index].clone()
    };
    assert_eq!(cell("Category"), "Laptop");
    assert_eq!(cell("Status"), "Ready to Deploy");
    assert_eq!(cell("Item Name"), "示例设备名称");
}

proptest! {
    #[test]
    fn cells_past_the_header_are_untouched(extra in proptest::collection::vec("[ a-z在用戴尔]{0,6}", 1..4)) {
        let catalog = default_catalog();
        let table = parse_table("状态,类别\n在用,笔记本电脑\n").unwrap();
        let mapper = FieldValueMapper::new(&catalog);
        let header = mapper.map(&table, AssetType::Assets).rows[0].clone();

        let mut row = vec!["在用".to_string(), "笔记本电脑".to_string()];
        row.extend(extra.iter().cloned());
        let mapped = mapper.map_row(&header, &row);

        prop_assert_eq!(&mapped[..2], &["Deployed".to_string(), "Laptop".to_string()]);
        prop_assert_eq!(&mapped[2..], extra.as_slice());
    }
}
