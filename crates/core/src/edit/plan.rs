use crate::error::{Error, Result};
use serde::Serialize;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// One text splice against a file's original text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SourceEdit {
    Insert { offset: usize, text: String },
    Replace { range: Range<usize>, text: String },
    Remove { range: Range<usize> },
}

impl SourceEdit {
    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        SourceEdit::Insert {
            offset,
            text: text.into(),
        }
    }

    pub fn replace(range: Range<usize>, text: impl Into<String>) -> Self {
        SourceEdit::Replace {
            range,
            text: text.into(),
        }
    }

    pub fn remove(range: Range<usize>) -> Self {
        SourceEdit::Remove { range }
    }

    /// The original bytes this edit consumes (empty for inserts)
    pub fn range(&self) -> Range<usize> {
        match self {
            SourceEdit::Insert { offset, .. } => *offset..*offset,
            SourceEdit::Replace { range, .. } | SourceEdit::Remove { range } => range.clone(),
        }
    }

    fn text(&self) -> &str {
        match self {
            SourceEdit::Insert { text, .. } | SourceEdit::Replace { text, .. } => text,
            SourceEdit::Remove { .. } => "",
        }
    }
}

/// Ordered edits against the original text of one file.
///
/// Offsets always refer to the original text, so a plan can be inspected
/// and replayed. Edits touching the same bytes are rejected on apply.
/// Inserts at the same offset keep the order they were added in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditPlan {
    path: PathBuf,
    edits: Vec<SourceEdit>,
}

impl EditPlan {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            edits: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn edits(&self) -> &[SourceEdit] {
        &self.edits
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn push(&mut self, edit: SourceEdit) {
        self.edits.push(edit);
    }

    pub fn extend(&mut self, edits: impl IntoIterator<Item = SourceEdit>) {
        self.edits.extend(edits);
    }

    /// Produce the edited text. `original` is left untouched.
    pub fn apply(&self, original: &str) -> Result<String> {
        let mut ordered: Vec<&SourceEdit> = self.edits.iter().collect();
        // Stable: equal start offsets keep insertion order
        ordered.sort_by_key(|edit| edit.range().start);

        let mut out = String::with_capacity(original.len());
        let mut cursor = 0;
        for edit in ordered {
            let range = edit.range();
            if range.start > range.end || range.end > original.len() {
                return Err(self.error(format!(
                    "edit {range:?} is outside the file ({} bytes)",
                    original.len()
                )));
            }
            if !original.is_char_boundary(range.start) || !original.is_char_boundary(range.end) {
                return Err(self.error(format!("edit {range:?} splits a character")));
            }
            if range.start < cursor {
                return Err(self.error(format!("edit {range:?} overlaps a previous edit")));
            }
            out.push_str(&original[cursor..range.start]);
            out.push_str(edit.text());
            cursor = range.end;
        }
        out.push_str(&original[cursor..]);
        Ok(out)
    }

    fn error(&self, message: String) -> Error {
        Error::Edit {
            path: self.path.clone(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TEXT: &str = "const a = 1;\nconst b = 2;\n";

    #[test]
    fn test_apply_in_offset_order() {
        let mut plan = EditPlan::new("/app/a.ts");
        plan.push(SourceEdit::replace(23..24, "3"));
        plan.push(SourceEdit::insert(0, "// header\n"));
        plan.push(SourceEdit::insert(0, "// second\n"));
        assert_eq!(
            plan.apply(TEXT).unwrap(),
            "// header\n// second\nconst a = 1;\nconst b = 3;\n"
        );
    }

    #[test]
    fn test_remove() {
        let mut plan = EditPlan::new("/app/a.ts");
        plan.push(SourceEdit::remove(0..13));
        assert_eq!(plan.apply(TEXT).unwrap(), "const b = 2;\n");
    }

    #[test]
    fn test_empty_plan_is_identity() {
        assert_eq!(EditPlan::new("/app/a.ts").apply(TEXT).unwrap(), TEXT);
    }

    #[test]
    fn test_overlapping_edits_are_rejected() {
        let mut plan = EditPlan::new("/app/a.ts");
        plan.push(SourceEdit::replace(0..10, "let x"));
        plan.push(SourceEdit::remove(6..12));
        assert!(matches!(plan.apply(TEXT), Err(Error::Edit { .. })));

        let mut inside = EditPlan::new("/app/a.ts");
        inside.push(SourceEdit::remove(0..10));
        inside.push(SourceEdit::insert(5, "x"));
        assert!(matches!(inside.apply(TEXT), Err(Error::Edit { .. })));
    }

    #[test]
    fn test_insert_at_range_boundaries_is_allowed() {
        let mut plan = EditPlan::new("/app/a.ts");
        plan.push(SourceEdit::replace(6..7, "x"));
        plan.push(SourceEdit::insert(7, "y"));
        assert_eq!(plan.apply("const a = 1;").unwrap(), "const xy = 1;");
    }

    #[test]
    fn test_out_of_bounds_is_rejected() {
        let mut plan = EditPlan::new("/app/a.ts");
        plan.push(SourceEdit::insert(TEXT.len() + 1, "x"));
        assert!(matches!(plan.apply(TEXT), Err(Error::Edit { .. })));
    }
}
