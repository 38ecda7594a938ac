#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub group_id: String,
}

/// An account together with the name of its group, for pickers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountChoice {
    pub id: String,
    pub name: String,
    pub group_name: Option<String>,
}

impl AccountChoice {
    /// "Main Bank Account (Bank Accounts)"
    pub fn label(&self) -> String {
        match &self.group_name {
            Some(group) => format!("{} ({group})", self.name),
            None => self.name.clone(),
        }
    }
}
