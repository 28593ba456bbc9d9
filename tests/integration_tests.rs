//! Integration tests for ticketml markup rendering and printing

use pretty_assertions::assert_eq;
use std::rc::Rc;
use ticketml::{
    compile, layout, render_lines, render_rows, Children, ConvertContext, DeviceError,
    BoxSetting, DeviceSettings, FontSetting, HashContext, HashNode, LayoutOptions, MemoryTarget,
    PrintDevice, PrintStatus, PrintTarget, Printer, Props, RenderError, TreeCompiler,
};

fn lines(markup: &str) -> Vec<String> {
    render_lines(markup, &LayoutOptions::default()).unwrap()
}

// ============================================================================
// Compiler
// ============================================================================

mod compiler {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_same_context_returns_cached_tree() {
        let compiler = TreeCompiler::new("<table><tr><td>a</td></tr></table>").unwrap();
        let first = compiler.run();
        let second = compiler.run();
        assert!(Rc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_other_context_recompiles() {
        let compiler = TreeCompiler::new("<tr><td>a</td></tr>").unwrap();
        let ctx_a: Rc<dyn ConvertContext> = Rc::new(HashContext);
        let ctx_b: Rc<dyn ConvertContext> = Rc::new(HashContext);

        let a1 = compiler.run_with(&ctx_a);
        let a2 = compiler.run_with(&ctx_a);
        assert!(Rc::ptr_eq(&a1, &a2));

        let b = compiler.run_with(&ctx_b);
        assert!(!Rc::ptr_eq(&a1, &b));
        assert_eq!(a1, b);
    }

    #[test]
    fn test_unrecognized_tags_dropped() {
        let tree = compile("<table><tr><td>a</td><img>b</img></tr><foo>x</foo></table>").unwrap();
        let table = &tree[0];
        assert_eq!(table.children.nodes().len(), 1);
        let row = &table.children.nodes()[0];
        assert_eq!(row.children.nodes().len(), 1);
        assert_eq!(row.children.nodes()[0].children, Children::Text("a".to_string()));
    }

    #[test]
    fn test_props_parsed_in_order() {
        let tree = compile("<td width=\"5\" fontSize=\"24\">x</td>").unwrap();
        let keys: Vec<&str> = tree[0].props.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["width", "fontSize"]);
        assert_eq!(tree[0].prop("width"), Some("5"));
    }

    #[test]
    fn test_custom_context_observes_nodes() {
        struct Upper;
        impl ConvertContext for Upper {
            fn convert(&self, node_type: &str, props: Props, children: Children) -> Option<HashNode> {
                Some(HashNode::new(node_type.to_uppercase(), props, children))
            }
        }

        let compiler = TreeCompiler::new("<tr><td>a</td></tr>").unwrap();
        let ctx: Rc<dyn ConvertContext> = Rc::new(Upper);
        let tree = compiler.run_with(&ctx);
        assert_eq!(tree[0].node_type, "TR");
        assert_eq!(tree[0].children.nodes()[0].node_type, "TD");
    }

    #[test]
    fn test_construction_errors() {
        let empty: Vec<&str> = Vec::new();
        assert!(matches!(
            TreeCompiler::with_vocabulary("<td>x</td>", empty),
            Err(RenderError::EmptyVocabulary)
        ));
        assert!(matches!(
            TreeCompiler::from_bytes(&[0x3c, 0xff, 0xfe]),
            Err(RenderError::InvalidInput { .. })
        ));
    }
}

// ============================================================================
// Layout properties
// ============================================================================

mod layout_properties {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_wrap_count_and_round_trip() {
        let alphabet = "abcdefghijklmnopqrstuvwxyz";
        for len in 1..=alphabet.len() {
            for width in 1..=7 {
                let text = &alphabet[..len];
                let markup = format!("<tr><td width=\"{}\">{}</td></tr>", width, text);
                let out = lines(&markup);

                assert_eq!(out.len(), len.div_ceil(width), "len {} width {}", len, width);
                for line in &out {
                    assert_eq!(line.chars().count(), width);
                }
                let joined: String = out.iter().map(|l| l.trim_end()).collect();
                assert_eq!(joined, text);
            }
        }
    }

    #[test]
    fn test_rows_follow_tallest_column() {
        let out = lines(
            "<tr><td width=\"2\">aaaa</td><td width=\"2\">bbbbbb</td><td width=\"2\">c</td></tr>",
        );
        assert_eq!(
            out,
            vec!["aa  bb  c ", "aa  bb    ", "    bb    "]
        );
    }

    #[test]
    fn test_exhausted_auto_column_is_empty() {
        let out = lines("<tr><td width=\"2\">aaaa</td><td width=\"auto\">x</td></tr>");
        assert_eq!(out, vec!["aa  x", "aa  "]);
    }

    #[test]
    fn test_no_trailing_blank_row() {
        let out = lines("<tr><td width=\"3\">abcdef</td></tr>");
        assert_eq!(out, vec!["abc", "def"]);
    }

    #[test]
    fn test_table_shorthand_matches_explicit() {
        let options = LayoutOptions::default();
        let short = layout("<table fontSize=\"20\">hi</table>", &options).unwrap();
        let explicit =
            layout("<table fontSize=\"20\"><tr><td>hi</td></tr></table>", &options).unwrap();
        assert_eq!(short, explicit);
    }

    #[test]
    fn test_row_shorthand_matches_explicit() {
        let options = LayoutOptions::default();
        let short = layout("<tr lineHeight=\"40\">hi</tr>", &options).unwrap();
        let explicit = layout("<tr lineHeight=\"40\"><td>hi</td></tr>", &options).unwrap();
        assert_eq!(short, explicit);
    }

    #[test]
    fn test_layout_leaves_tree_untouched() {
        let tree = compile("<table><tr><td width=\"2\">abcd</td></tr></table>").unwrap();
        let before = tree.as_ref().clone();
        let _ = ticketml::TableLayoutEngine::new(LayoutOptions::default()).pretreat(&tree);
        assert_eq!(*tree, before);
    }
}

// ============================================================================
// End-to-end rendering
// ============================================================================

mod end_to_end {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fixed_and_auto_columns() {
        let root = layout(
            "<table><tr><td>id</td><td width=\"auto\">name</td></tr></table>",
            &LayoutOptions::default(),
        )
        .unwrap();
        let row = &root.node_list[0].node_list[0];
        assert_eq!(row.to_array(), vec!["id        ", "  ", "name"]);
        assert_eq!(
            lines("<table><tr><td>id</td><td width=\"auto\">name</td></tr></table>"),
            vec!["id          name"]
        );
    }

    #[test]
    fn test_hello_world_with_sibling() {
        let out = lines("<tr><td width=\"5\">HelloWorld</td><td width=\"3\">ab</td></tr>");
        assert_eq!(out, vec!["Hello  ab ", "World     "]);
    }

    #[test]
    fn test_nested_table_in_cell() {
        let out = lines(
            "<tr><td width=\"auto\"><table><tr><td width=\"3\">ab</td><td width=\"3\">cd</td></tr></table></td><td width=\"auto\">z</td></tr>",
        );
        assert_eq!(out, vec!["ab   cd   z"]);
    }

    #[test]
    fn test_nested_table_in_default_cell() {
        let out = lines(
            "<table><tr><td><table><tr><td>abc</td><td>def</td></tr></table></td></tr></table>",
        );
        assert_eq!(out, vec!["abc         def       "]);
    }

    #[test]
    fn test_huge_width_does_not_panic() {
        let out = std::panic::catch_unwind(|| {
            lines("<tr><td width=\"18446744073709551615\">x</td></tr>")
        });
        assert_eq!(out.ok(), Some(vec!["x         ".to_string()]));
    }

    #[test]
    fn test_props_inherit_from_table() {
        let rows = render_rows(
            "<table fontSize=\"20\"><tr><td>a</td></tr><tr fontSize=\"40\"><td>b</td></tr><tr><td>c</td></tr></table>",
            &LayoutOptions::default(),
        )
        .unwrap();
        let sizes: Vec<_> = rows
            .iter()
            .map(|r| r.props.get("fontSize").cloned())
            .collect();
        assert_eq!(
            sizes,
            vec![
                Some("20".to_string()),
                Some("40".to_string()),
                Some("20".to_string())
            ]
        );
    }

    #[test]
    fn test_custom_options() {
        let options = LayoutOptions::new().with_col_width(4).with_border_width(1);
        let out = render_lines("<tr><td>abcdef</td><td>x</td></tr>", &options).unwrap();
        assert_eq!(out, vec!["abcd x   ", "ef       "]);
    }

    #[test]
    fn test_text_outside_tags_discarded() {
        assert!(lines("receipt").is_empty());
        assert_eq!(lines("<tr>lost<td>kept</td></tr>"), vec!["kept      "]);
    }
}

// ============================================================================
// Printing
// ============================================================================

mod printing {
    use super::*;
    use pretty_assertions::assert_eq;

    struct FailingTarget;

    impl PrintTarget for FailingTarget {
        fn add_single_text(&mut self, _: &str, _: &FontSetting, _: &BoxSetting) -> Result<(), DeviceError> {
            Ok(())
        }

        fn print(&mut self) -> Result<(), DeviceError> {
            Err(DeviceError::PrintFailed("paper out".to_string()))
        }
    }

    fn printer() -> Printer<MemoryTarget> {
        let device = PrintDevice::new(MemoryTarget::new(), DeviceSettings::default());
        Printer::new(device, LayoutOptions::default())
    }

    #[test]
    fn test_commands_stack_vertically() {
        let mut printer = printer();
        let status = printer
            .print_markup(
                "<table><tr><td width=\"auto\">a</td></tr><tr lineHeight=\"50\"><td width=\"auto\">b</td></tr><tr fontSize=\"20\"><td width=\"auto\">c</td></tr></table>",
            )
            .unwrap();
        assert_eq!(status, PrintStatus::Printed(3));

        let batch = &printer.device().target().batches[0];
        let boxes: Vec<(u32, u32)> = batch.iter().map(|c| (c.line_box.y, c.line_box.height)).collect();
        assert_eq!(boxes, vec![(0, 30), (30, 50), (80, 20)]);
        assert_eq!(batch[2].font.font_size, 20);
        assert_eq!(batch[0].font.font_name, "宋体");
    }

    #[test]
    fn test_device_line_height_setting() {
        let settings = DeviceSettings {
            line_height: Some(36),
            ..DeviceSettings::default()
        };
        let device = PrintDevice::new(MemoryTarget::new(), settings);
        let mut printer = Printer::new(device, LayoutOptions::default());
        printer.print_markup("<tr><td>a</td></tr><tr><td>b</td></tr>").unwrap();

        let ys: Vec<u32> = printer.device().target().batches[0]
            .iter()
            .map(|c| c.line_box.y)
            .collect();
        assert_eq!(ys, vec![0, 36]);
    }

    #[test]
    fn test_each_print_is_one_batch() {
        let mut printer = printer();
        printer.print_markup("<tr><td>a</td></tr>").unwrap();
        printer.print_markup("<tr><td>b</td></tr>").unwrap();

        let target = printer.device().target();
        assert_eq!(target.batches.len(), 2);
        assert_eq!(target.batches[1][0].line_box.y, 0);
    }

    #[test]
    fn test_failing_target_cleans_up() {
        let device = PrintDevice::new(FailingTarget, DeviceSettings::default());
        let mut printer = Printer::new(device, LayoutOptions::default());
        let status = printer.print_markup("<tr><td>a</td></tr><tr><td>b</td></tr>").unwrap();

        assert_eq!(status, PrintStatus::Failed);
        assert!(printer.device().commands().is_empty());
        assert_eq!(printer.device().cursor().y, 0);
    }

    #[test]
    fn test_markup_without_tags_prints_nothing() {
        let mut printer = printer();
        assert_eq!(printer.print_markup("no tags").unwrap(), PrintStatus::Empty);
        assert!(printer.device().target().batches.is_empty());
    }

    #[test]
    fn test_boxed_target() {
        let target: Box<dyn PrintTarget> = Box::new(MemoryTarget::new());
        let device = PrintDevice::new(target, DeviceSettings::default());
        let mut printer = Printer::new(device, LayoutOptions::default());
        let status = printer.print_markup("<tr><td>a</td></tr>").unwrap();
        assert_eq!(status, PrintStatus::Printed(1));
    }
}

// ============================================================================
// Configuration
// ============================================================================

#[cfg(feature = "config")]
mod config {
    use super::*;
    use pretty_assertions::assert_eq;
    use ticketml::RenderConfig;

    #[test]
    fn test_config_drives_rendering() {
        let config = RenderConfig::from_toml_str(
            "[layout]\ncol_width = 4\nborder_width = 0\n\n[device]\nfont_size = 24\n",
        )
        .unwrap();
        let out = render_lines("<tr><td>ab</td><td>cd</td></tr>", &config.layout).unwrap();
        assert_eq!(out, vec!["ab  cd  "]);

        let device = PrintDevice::new(MemoryTarget::new(), config.device.clone());
        let mut printer = Printer::new(device, config.layout.clone());
        printer.print_markup("<tr><td>a</td></tr>").unwrap();
        assert_eq!(printer.device().target().batches[0][0].font.font_size, 24);
    }
}

// ============================================================================
// Diagnostics
// ============================================================================

mod diagnostics {
    use ticketml::diagnostics::{check_markup, format_diagnostics, DiagnosticLevel};

    #[test]
    fn test_clean_receipt() {
        let result = check_markup(
            "<table fontSize=\"24\">\n  <tr><td width=\"8\">Coffee</td><td width=\"auto\">3.50</td></tr>\n</table>",
        );
        assert!(result.is_empty(), "{}", format_diagnostics(&result, false));
    }

    #[test]
    fn test_reports_dropped_content() {
        let result = check_markup("<table><tr><td>a</td><span>b</span></tr>\n<tr><td width=\"-1\">c</td>");
        let levels: Vec<DiagnosticLevel> = result.diagnostics.iter().map(|d| d.level).collect();
        assert!(levels.contains(&DiagnosticLevel::Warning));
        assert!(result.has_errors());
        assert_eq!(result.warnings, 2);
    }
}
