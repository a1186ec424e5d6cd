//! Logs protected from unconditional deletion

use crate::layout::{LOG_LINK_LAYER, LOG_POWER_EVENT, LOG_UNLOCK_SCHEDULE};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Immutable set of full log paths the retention enforcer only deletes when
/// they outgrow the size cap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WhitelistSet {
    paths: HashSet<PathBuf>,
}

impl WhitelistSet {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// Link-layer, power-event and unlock-schedule logs
    pub fn default_set() -> Self {
        Self::new([LOG_LINK_LAYER, LOG_POWER_EVENT, LOG_UNLOCK_SCHEDULE])
    }

    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.paths.contains(path.as_ref())
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }
}

impl<P: Into<PathBuf>> FromIterator<P> for WhitelistSet {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_set() {
        let whitelist = WhitelistSet::default_set();
        assert_eq!(whitelist.len(), 3);
        assert!(whitelist.contains("/var/log/japp/edotensei/link_layer.log"));
        assert!(whitelist.contains("/var/log/japp/edotensei/power_event.log"));
        assert!(whitelist.contains("/var/log/japp/edotensei/unlock_schedule.log"));
        assert!(!whitelist.contains("/var/log/japp/app.log"));
    }

    #[test]
    fn test_membership_ignores_redundant_separators() {
        let whitelist = WhitelistSet::default_set();
        let joined = Path::new("/var/log/japp/edotensei/").join("link_layer.log");
        assert!(whitelist.contains(joined));
        assert!(whitelist.contains("/var/log/japp//edotensei/link_layer.log"));
    }
}
