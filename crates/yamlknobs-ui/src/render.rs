use std::fmt::Write as _;

use crate::control::ControlHandle;

const INDENT: &str = "  ";

/// Plain-text outline of a control tree, one control per line.
///
/// Containers print their summary; a titled child is introduced by a
/// `title:` line and indented below it. Leaves print `[Kind] summary`.
pub fn render_tree(root: &ControlHandle) -> String {
    let mut out = String::new();
    render(root, 0, &mut out);
    out
}

fn render(control: &ControlHandle, depth: usize, out: &mut String) {
    let indent = INDENT.repeat(depth);
    let kind = control.kind();
    if !kind.is_container() {
        let _ = writeln!(out, "{indent}[{kind}] {}", control.borrow().summary());
        return;
    }

    let _ = writeln!(out, "{indent}{}", control.borrow().summary());
    for (i, child) in control.children().iter().enumerate() {
        match control.title(i) {
            Some(title) => {
                let _ = writeln!(out, "{indent}{INDENT}{title}:");
                render(child, depth + 2, out);
            }
            None => render(child, depth + 1, out),
        }
    }
}
