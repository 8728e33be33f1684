use projmodel::parser::{Diagnostic, Severity};
use projmodel::tree::node::{FileType, Node, NodeKind, ProductType};

/// Indented text rendering of a project tree.
pub fn render(tree: &Node) -> String {
    let mut out = String::new();
    render_node(tree, 0, &mut out);
    out
}

fn render_node(node: &Node, depth: usize, out: &mut String) {
    let label = match node.kind {
        NodeKind::ProjectRoot => "project",
        NodeKind::Target(ProductType::App) => "app",
        NodeKind::Target(ProductType::Lib) => "lib",
        NodeKind::Group => "group",
        NodeKind::SourceGroup => "sources",
        NodeKind::Folder => "folder",
        NodeKind::File(FileType::Source) => "source",
        NodeKind::File(FileType::Header) => "header",
        NodeKind::File(FileType::Project) => "project file",
        NodeKind::File(FileType::Unknown) => "file",
    };

    out.push_str(&format!(
        "{}{} [{}] ({})\n",
        "  ".repeat(depth),
        node.display_name,
        label,
        node.path.display()
    ));

    for child in &node.children {
        render_node(child, depth + 1, out);
    }
}

pub fn render_diagnostic(diagnostic: &Diagnostic) -> String {
    let severity = match diagnostic.severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Unknown => "unknown",
    };

    let mut location = String::new();
    if let Some(file) = &diagnostic.file {
        location.push_str(&file.display().to_string());

        if let Some(line) = diagnostic.line {
            location.push_str(&format!(":{}", line));

            if let Some(column) = diagnostic.column {
                location.push_str(&format!(":{}", column));
            }
        }

        location.push_str(": ");
    }

    format!("{}{}: {}", location, severity, diagnostic.message)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use projmodel::parser::{Diagnostic, Severity};
    use projmodel::tree::node;
    use projmodel::tree::node::FileType;

    #[test]
    fn renders_each_node_on_its_own_line() {
        let mut tree = node::project_root("/proj");
        let mut folder = node::source_group_folder("/proj/src", "Source Files").unwrap();
        folder.add_child(node::file_leaf("/proj/src/main.cpp", FileType::Source));
        tree.add_child(folder);

        let rendered = super::render(&tree);

        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(3, lines.len());
        assert_eq!("proj [project] (/proj)", lines[0]);
        assert_eq!("  Source Files [sources] (/proj/src)", lines[1]);
        assert_eq!("    main.cpp [source] (/proj/src/main.cpp)", lines[2]);
    }

    #[test]
    fn renders_a_full_diagnostic_location() {
        let diagnostic = Diagnostic {
            file: Some(PathBuf::from("/src/main.cpp")),
            line: Some(12),
            column: Some(3),
            severity: Severity::Error,
            message: "boom".to_string(),
            fatal: true,
        };

        assert_eq!(
            "/src/main.cpp:12:3: error: boom",
            super::render_diagnostic(&diagnostic)
        );
    }

    #[test]
    fn renders_a_diagnostic_without_a_location() {
        let diagnostic = Diagnostic {
            file: None,
            line: None,
            column: None,
            severity: Severity::Warning,
            message: "something odd".to_string(),
            fatal: false,
        };

        assert_eq!(
            "warning: something odd",
            super::render_diagnostic(&diagnostic)
        );
    }
}
