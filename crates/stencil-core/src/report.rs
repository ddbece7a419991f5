//! Directory-structure rendering for the end-of-run report

use std::fs;
use std::io;
use std::path::Path;

/// Entries never shown in the report.
const SKIPPED: &[&str] = &[".git"];

/// Render the layout under `root` as a connector tree, directories before
/// files, names sorted within each group.
pub fn render_tree(root: &Path) -> io::Result<String> {
    let name = root
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string());

    let mut out = String::new();
    out.push_str(&name);
    out.push('\n');
    render_children(root, "", &mut out)?;
    Ok(out)
}

fn render_children(dir: &Path, prefix: &str, out: &mut String) -> io::Result<()> {
    let mut entries: Vec<(bool, String)> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if SKIPPED.contains(&name.as_str()) {
            continue;
        }
        entries.push((entry.file_type()?.is_dir(), name));
    }
    entries.sort_by(|a, b| (!a.0).cmp(&(!b.0)).then_with(|| a.1.cmp(&b.1)));

    let count = entries.len();
    for (index, (is_dir, name)) in entries.iter().enumerate() {
        let last = index + 1 == count;
        out.push_str(prefix);
        out.push_str(if last { "└── " } else { "├── " });
        out.push_str(name);
        out.push('\n');

        if *is_dir {
            let child_prefix = format!("{prefix}{}", if last { "    " } else { "│   " });
            render_children(&dir.join(name), &child_prefix, out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_directories_first_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("demo");
        std::fs::create_dir_all(root.join("src")).unwrap();
        std::fs::write(root.join("src/index.js"), "").unwrap();
        std::fs::write(root.join("package.json"), "{}").unwrap();
        std::fs::write(root.join("README.md"), "").unwrap();

        let rendered = render_tree(&root).unwrap();

        let expected = "\
demo
├── src
│   └── index.js
├── README.md
└── package.json
";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn skips_version_control_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("demo");
        std::fs::create_dir_all(root.join(".git/objects")).unwrap();
        std::fs::write(root.join("package.json"), "{}").unwrap();

        let rendered = render_tree(&root).unwrap();

        assert!(!rendered.contains(".git"));
        assert!(rendered.contains("package.json"));
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();

        assert!(render_tree(&dir.path().join("absent")).is_err());
    }
}
