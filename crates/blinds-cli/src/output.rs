//! Output formatting for CLI results: table for humans, JSON for scripts.

use blinds_core::Module;
use comfy_table::{Cell, ContentArrangement, Table};
use serde_json::json;

/// Formats a module list as a table, or as a JSON document when `json`.
pub fn render_modules(modules: &[Module], json: bool) -> String {
    if json {
        let output = json!({
            "modules": modules,
            "count": modules.len(),
        });
        return serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string());
    }

    if modules.is_empty() {
        return "No modules found.".to_string();
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["IP", "ID", "Photoresistance", "Servo position"]);

    for module in modules {
        table.add_row(vec![
            Cell::new(module.address),
            Cell::new(format!("{:#06x}", module.id)),
            Cell::new(module.photoresistance),
            Cell::new(module.servo_position),
        ]);
    }

    format!("{}\n\nFound {} module(s)", table, modules.len())
}

/// Formats a single module as one line, or as a JSON document when `json`.
pub fn render_module(module: &Module, json: bool) -> String {
    if json {
        serde_json::to_string_pretty(module).unwrap_or_else(|_| "{}".to_string())
    } else {
        format!(
            "IP: {}, ID: {:#06x}, Photoresistance: {}, Servo position: {}",
            module.address, module.id, module.photoresistance, module.servo_position
        )
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_module() -> Module {
        Module::new("192.168.1.50".parse().unwrap(), 0x1234, 0x56, 0x78)
    }

    #[test]
    fn test_render_modules_table_contains_hex_id_and_address() {
        // Arrange / Act
        let rendered = render_modules(&[sample_module()], false);

        // Assert
        assert!(rendered.contains("192.168.1.50"));
        assert!(rendered.contains("0x1234"));
        assert!(rendered.contains("Found 1 module(s)"));
    }

    #[test]
    fn test_render_modules_empty_table_reports_none_found() {
        assert_eq!(render_modules(&[], false), "No modules found.");
    }

    #[test]
    fn test_render_modules_json_round_trips() {
        // Arrange / Act
        let rendered = render_modules(&[sample_module()], true);
        let value: serde_json::Value = serde_json::from_str(&rendered).expect("valid JSON");

        // Assert
        assert_eq!(value["count"], 1);
        assert_eq!(value["modules"][0]["address"], "192.168.1.50");
        assert_eq!(value["modules"][0]["id"], 0x1234);
    }

    #[test]
    fn test_render_module_single_line_matches_scan_output_fields() {
        let rendered = render_module(&sample_module(), false);
        assert_eq!(
            rendered,
            "IP: 192.168.1.50, ID: 0x1234, Photoresistance: 86, Servo position: 120"
        );
    }

    #[test]
    fn test_render_module_json_is_flat_object() {
        let rendered = render_module(&sample_module(), true);
        let value: serde_json::Value = serde_json::from_str(&rendered).expect("valid JSON");
        assert_eq!(value["servo_position"], 0x78);
    }
}
