//! Edit configuration

/// Which insert operations the legality oracle offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertPolicy {
    /// Inserting a row or column is always offered
    #[default]
    Always,
    /// Only offer an insert whose new boundary does not cut through a spanned cell
    Unsplit,
}

/// Options controlling grid construction and edit legality
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditOptions {
    /// Which inserts are offered
    /// Default: `InsertPolicy::Always`
    pub insert_policy: InsertPolicy,

    /// Reject row spans that leave their row-group, and never merge
    /// vertically across a row-group boundary
    /// Default: true
    pub confine_to_row_groups: bool,
}

impl Default for EditOptions {
    fn default() -> Self {
        Self {
            insert_policy: InsertPolicy::Always,
            confine_to_row_groups: true,
        }
    }
}

impl EditOptions {
    /// Create new options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat the whole table as one section and offer every insert
    pub fn permissive() -> Self {
        Self {
            insert_policy: InsertPolicy::Always,
            confine_to_row_groups: false,
        }
    }

    /// Respect row-groups and only offer inserts that keep spans whole
    pub fn strict() -> Self {
        Self {
            insert_policy: InsertPolicy::Unsplit,
            confine_to_row_groups: true,
        }
    }
}
