use std::fmt;

use super::grid::ExportGrid;

pub const ACTION_LABEL: &str = "📤 未出力データをスプレッドシートへ出力";
pub const PASSWORD_PROMPT: &str = "管理者パスワードを入力してください。";
pub const PASSWORD_MISMATCH: &str = "パスワードが間違っています。";
pub const LOGIN_OK: &str = "管理者ログインOKです。";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The store had no record with `exported = false`. Nothing was written or marked.
    NothingToExport,
    Exported { count: usize },
}

impl ExportOutcome {
    pub fn exported_count(&self) -> usize {
        match self {
            ExportOutcome::NothingToExport => 0,
            ExportOutcome::Exported { count } => *count,
        }
    }
}

impl fmt::Display for ExportOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportOutcome::NothingToExport => write!(f, "未出力データはありません。"),
            ExportOutcome::Exported { count } => write!(
                f,
                "✅ {} 件のデータを出力し、exported=true に更新しました。",
                count
            ),
        }
    }
}

/// What a run would append, for `--dry-run`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportPreview {
    pub record_count: usize,
    pub grid: ExportGrid,
}

impl fmt::Display for ExportPreview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.record_count == 0 {
            return write!(f, "{}", ExportOutcome::NothingToExport);
        }

        writeln!(f, "{} 件のデータが出力対象です。", self.record_count)?;
        writeln!(f, "{}", self.grid.header().join("\t"))?;
        for row in self.grid.rows() {
            let cells = row
                .iter()
                .map(|cell| match cell {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>();
            writeln!(f, "{}", cells.join("\t"))?;
        }
        Ok(())
    }
}
