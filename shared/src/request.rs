//! Request types shared by list endpoints

/// Page query parameter (one-based in the URL, default: 1)
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: Option<u32>,
}

impl PageQuery {
    /// Zero-based page index
    pub fn index(&self) -> u32 {
        self.page.unwrap_or(1).saturating_sub(1)
    }
}

/// Offset for a zero-based page index
pub fn offset(index: u32, size: u32) -> i64 {
    i64::from(index) * i64::from(size)
}
