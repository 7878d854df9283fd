//! Rendering catalog lists for the command line.

use crate::client::{Catalog, path_id};

/// Render catalogs as a markdown list, one entry per line.
pub fn format_catalogs(title: &str, catalogs: &[Catalog]) -> String {
    let mut output = format!("# {title}\n\n");
    if catalogs.is_empty() {
        output.push_str("No subjects found.\n");
        return output;
    }

    output.push_str(&format!("**Subjects:** {}\n\n", catalogs.len()));
    for catalog in catalogs {
        output.push_str(&format!("- `{}` {}", path_id(&catalog.path), catalog.name));
        if let Some(desc) = &catalog.path_desc {
            output.push_str(&format!(" ({desc})"));
        }
        output.push('\n');
    }
    output
}
