//! Column alignment for table formats.

use console::Alignment;
use console::measure_text_width;
use console::pad_str;

/// Minimum width of an aligned column, padding included.
const MIN_COLUMN_WIDTH: usize = 10;

/// Spaces added after the widest cell of a column.
const COLUMN_PADDING: usize = 3;

/// Aligns tab-separated cells into columns.
///
/// Every cell followed by a tab belongs to a column and is padded to the
/// column width; the last cell of each line is written as-is. Widths are
/// display widths, so wide characters line up.
pub fn align(lines: &[String]) -> String {
    let rows: Vec<Vec<&str>> = lines
        .iter()
        .flat_map(|line| line.split('\n'))
        .map(|line| line.split('\t').collect())
        .collect();

    let mut widths: Vec<usize> = Vec::new();
    for cells in &rows {
        for (column, cell) in cells.iter().take(cells.len().saturating_sub(1)).enumerate() {
            let width = (measure_text_width(cell) + COLUMN_PADDING).max(MIN_COLUMN_WIDTH);
            match widths.get_mut(column) {
                Some(current) => *current = (*current).max(width),
                None => widths.push(width),
            }
        }
    }

    let mut out = String::new();
    for cells in &rows {
        let last = cells.len().saturating_sub(1);
        for (column, cell) in cells.iter().enumerate() {
            if column == last {
                out.push_str(cell);
            } else {
                out.push_str(&pad_str(cell, widths[column], Alignment::Left, None));
            }
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(input: &[&str]) -> Vec<String> {
        input.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_single_column_is_untouched() {
        assert_eq!(align(&lines(&["NAME", "a", "b"])), "NAME\na\nb\n");
    }

    #[test]
    fn test_minimum_width() {
        assert_eq!(
            align(&lines(&["REPOSITORY\tTAG", "app\tv1"])),
            "REPOSITORY   TAG\napp          v1\n"
        );
        assert_eq!(align(&lines(&["A\tB", "c\td"])), "A         B\nc         d\n");
    }

    #[test]
    fn test_widest_cell_sets_width() {
        let out = align(&lines(&[
            "REPOSITORY\tTAG",
            "registry.example.com/team/app\tv10",
        ]));
        assert_eq!(
            out,
            "REPOSITORY                      TAG\n\
             registry.example.com/team/app   v10\n"
        );
    }

    #[test]
    fn test_wide_characters() {
        let out = align(&lines(&["名前名前名前\tx", "a\ty"]));
        // Six wide characters occupy twelve columns.
        assert_eq!(out, "名前名前名前   x\na              y\n");
    }

    #[test]
    fn test_embedded_newlines_are_separate_lines() {
        assert_eq!(align(&lines(&["a\tb\nc\td"])), "a         b\nc         d\n");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(align(&[]), "");
    }
}
