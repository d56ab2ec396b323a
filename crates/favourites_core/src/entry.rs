pub type EntryId = u64;

/// One bookmarked website as last reported by the remote source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: EntryId,
    pub link: String,
    pub name: String,
    pub icon: String,
    pub desc: String,
    pub order: i32,
    pub visible: bool,
    pub user_id: u64,
}

impl Entry {
    /// Builds an entry with empty metadata; mostly useful for tests and hosts
    /// that only know the id, link and name.
    pub fn new(id: EntryId, link: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            link: link.into(),
            name: name.into(),
            icon: String::new(),
            desc: String::new(),
            order: 0,
            visible: true,
            user_id: 0,
        }
    }

    /// Name shown in the list: the stored name, else the link's host, else the raw link.
    pub fn display_name(&self) -> String {
        let name = self.name.trim();
        if !name.is_empty() {
            return name.to_string();
        }
        url::Url::parse(self.link.trim())
            .ok()
            .and_then(|parsed| parsed.host_str().map(ToOwned::to_owned))
            .unwrap_or_else(|| self.link.clone())
    }
}
