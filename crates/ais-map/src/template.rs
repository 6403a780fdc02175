//! Import templates in the source language.

use std::path::{Path, PathBuf};

use ais_catalog::{AssetType, MappingCatalog};
use ais_ingest::write_table;
use serde::Serialize;

use crate::error::{MapError, Result};

/// Summary of a written template.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateReport {
    pub output: PathBuf,
    pub asset_type: AssetType,
    pub headers: Vec<String>,
}

/// Illustrative cell for a canonical field.
pub fn sample_value(canonical_field: &str) -> &'static str {
    match canonical_field {
        "Category" => "笔记本电脑",
        "Item Name" => "示例设备名称",
        "Company" => "示例公司",
        "Location" => "办公室",
        "Manufacturer" => "戴尔",
        "Status" => "可部署",
        _ => "示例数据",
    }
}

/// Writes a header row of source-language field names for `asset_type`, in
/// catalog order, followed by one example row.
pub fn generate_template(
    catalog: &MappingCatalog,
    asset_type: AssetType,
    output: &Path,
) -> Result<TemplateReport> {
    let table = catalog
        .field_table(asset_type)
        .filter(|table| !table.is_empty())
        .ok_or(MapError::NoMappings { asset_type })?;

    let headers: Vec<String> = table.source_headers().map(str::to_string).collect();
    let sample: Vec<String> = table
        .iter()
        .map(|(_, canonical)| sample_value(canonical).to_string())
        .collect();
    write_table(output, &[headers.clone(), sample])?;

    tracing::info!(
        output = %output.display(),
        %asset_type,
        fields = headers.len(),
        "template written"
    );
    Ok(TemplateReport {
        output: output.to_path_buf(),
        asset_type,
        headers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sample_values() {
        assert_eq!(sample_value("Category"), "笔记本电脑");
        assert_eq!(sample_value("Status"), "可部署");
        assert_eq!(sample_value("Serial"), "示例数据");
    }

    #[test]
    fn test_template_follows_catalog_order() {
        let catalog = MappingCatalog::from_json_str(
            r#"{"field_mappings": {"assets": {"设备名称": "Item Name", "类别": "Category", "序列号": "Serial"}}}"#,
            "inline",
        )
        .unwrap();
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("template.csv");

        let report = generate_template(&catalog, AssetType::Assets, &output).unwrap();

        assert_eq!(report.headers, vec!["设备名称", "类别", "序列号"]);
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "设备名称,类别,序列号\n示例设备名称,笔记本电脑,示例数据\n"
        );
    }

    #[test]
    fn test_type_without_mappings() {
        let catalog = MappingCatalog::from_json_str(
            r#"{"field_mappings": {"users": {}}}"#,
            "inline",
        )
        .unwrap();
        let dir = TempDir::new().unwrap();

        for asset_type in [AssetType::Users, AssetType::Licenses] {
            let result = generate_template(&catalog, asset_type, &dir.path().join("t.csv"));
            assert!(matches!(result, Err(MapError::NoMappings { .. })));
        }
    }
}
