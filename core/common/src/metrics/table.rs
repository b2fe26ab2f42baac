//! 表示用のテーブル（罫線付きのプレーンテキスト）

use std::fmt;

/// タイトル・列名・行からなる表示用テーブル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableView {
    pub fn new(title: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            title: title.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// 行を追加する。列数に満たないセルは空文字、超えた分は捨てる
    pub fn push_row(&mut self, mut cells: Vec<String>) {
        cells.resize(self.columns.len(), String::new());
        self.rows.push(cells);
    }

    /// 各列の表示幅（列名とセルの最大文字数）
    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, c)| {
                self.rows
                    .iter()
                    .map(|r| r[i].chars().count())
                    .chain(std::iter::once(c.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }
}

fn border(widths: &[usize], left: char, mid: char, right: char) -> String {
    let inner: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{}{}{}", left, inner.join(&mid.to_string()), right)
}

fn line(cells: &[String], widths: &[usize]) -> String {
    let inner: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(c, w)| format!(" {}{} ", c, " ".repeat(w - c.chars().count())))
        .collect();
    format!("│{}│", inner.join("│"))
}

impl fmt::Display for TableView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();
        let total: usize = widths.iter().map(|w| w + 3).sum::<usize>() + 1;
        let title_len = self.title.chars().count();
        let pad = total.saturating_sub(title_len) / 2;
        writeln!(f, "{}{}", " ".repeat(pad), self.title)?;
        writeln!(f, "{}", border(&widths, '┌', '┬', '┐'))?;
        writeln!(f, "{}", line(&self.columns, &widths))?;
        writeln!(f, "{}", border(&widths, '├', '┼', '┤'))?;
        for row in &self.rows {
            writeln!(f, "{}", line(row, &widths))?;
        }
        write!(f, "{}", border(&widths, '└', '┴', '┘'))
    }
}
