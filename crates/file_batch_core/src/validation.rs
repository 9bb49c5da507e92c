/// Per-file classification produced while scanning a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileCheck {
    Valid,
    Empty,
    /// Size metadata could not be read.
    Unreadable(String),
}

impl FileCheck {
    pub fn from_content_length(content_length: u64) -> Self {
        if content_length == 0 {
            Self::Empty
        } else {
            Self::Valid
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidationVerdict {
    pub total_files: usize,
    pub valid_files: usize,
    pub empty_files: usize,
    pub error_files: usize,
}

impl ValidationVerdict {
    pub fn from_checks<'a>(checks: impl IntoIterator<Item = &'a FileCheck>) -> Self {
        let mut verdict = Self::default();
        for check in checks {
            verdict.total_files += 1;
            match check {
                FileCheck::Valid => verdict.valid_files += 1,
                FileCheck::Empty => verdict.empty_files += 1,
                FileCheck::Unreadable(_) => verdict.error_files += 1,
            }
        }
        verdict
    }

    pub fn is_valid(&self) -> bool {
        self.empty_files == 0 && self.error_files == 0
    }
}
