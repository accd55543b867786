use crate::annotation::is_annotation;
use crate::value::{NodeRef, Value};

/// Remove every annotation key from `node` and from all mappings below it.
///
/// Descends into nested mappings and into mapping elements of sequences.
/// Keys are collected first and removed once the node has been fully
/// visited. Returns the number of keys removed; a second call returns 0.
pub fn strip_annotations(node: &NodeRef) -> usize {
    let mut doomed = Vec::new();
    let mut children = Vec::new();

    for (key, value) in node.borrow().iter() {
        if is_annotation(key) {
            doomed.push(key.to_string());
            continue;
        }
        match value {
            Value::Map(child) => children.push(child.clone()),
            Value::Seq(items) => children.extend(items.iter().filter_map(Value::as_node).cloned()),
            _ => {}
        }
    }

    let mut removed = children.iter().map(strip_annotations).sum::<usize>();

    let mut node = node.borrow_mut();
    for key in &doomed {
        if node.remove(key).is_some() {
            removed += 1;
        }
    }
    log::debug!("stripped {} annotation key(s)", doomed.len());
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;

    const ANNOTATED: &str = r#"
gain: 3
gain-widget: {type: IntSlider, args: {min: 0, max: 10}}
stages:
  - name: a
    name-widget: {type: Text}
  - plain
nested:
  deep:
    flag: true
    flag-widget: {type: Checkbox}
"#;

    #[test]
    fn removes_annotations_at_every_depth() {
        let doc = Document::parse_str(ANNOTATED).unwrap();
        assert_eq!(strip_annotations(doc.root()), 3);
        let expected = Document::parse_str(
            "gain: 3\nstages:\n  - name: a\n  - plain\nnested:\n  deep:\n    flag: true\n",
        )
        .unwrap();
        assert_eq!(doc, expected);
    }

    #[test]
    fn second_pass_is_a_no_op() {
        let doc = Document::parse_str(ANNOTATED).unwrap();
        strip_annotations(doc.root());
        let once = doc.to_string().unwrap();
        assert_eq!(strip_annotations(doc.root()), 0);
        assert_eq!(doc.to_string().unwrap(), once);
    }

    #[test]
    fn unannotated_document_is_unchanged() {
        let src = "a: 1\nb:\n  c: [1, 2]\n  d: {e: f}\n";
        let doc = Document::parse_str(src).unwrap();
        assert_eq!(strip_annotations(doc.root()), 0);
        assert_eq!(doc, Document::parse_str(src).unwrap());
    }

    #[test]
    fn annotation_values_are_not_descended() {
        let doc = Document::parse_str("x-widget:\n  inner-widget: 1\n").unwrap();
        assert_eq!(strip_annotations(doc.root()), 1);
        assert!(doc.root().borrow().is_empty());
    }
}
