//! Per-view load state.
//!
//! Every view walks `Unloaded -> Loading -> {Populated, Empty, ErrorLogged}` exactly
//! once per mount. There is no transition back to `Loading`; remounting the view
//! creates a fresh state.

use crate::error::Error;

#[derive(Clone, Debug, PartialEq)]
pub enum LoadState<T> {
    Unloaded,
    Loading,
    Populated(T),
    Empty,
    /// The read failed; the error went to the log, the view renders as empty.
    ErrorLogged,
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Unloaded
    }
}

impl<T> LoadState<T> {
    /// Enter `Loading`. Returns `false` (and changes nothing) unless the state was `Unloaded`.
    pub fn begin(&mut self) -> bool {
        if matches!(self, LoadState::Unloaded) {
            *self = LoadState::Loading;
            true
        } else {
            false
        }
    }

    /// Still waiting for the first result.
    pub fn is_pending(&self) -> bool {
        matches!(self, LoadState::Unloaded | LoadState::Loading)
    }

    /// Settle a single-record read. Errors are logged under `what`.
    pub fn from_item(result: Result<T, Error>, what: &str) -> Self {
        match result {
            Ok(item) => LoadState::Populated(item),
            Err(e) => {
                tracing::error!("Error fetching {}: {}", what, e);
                LoadState::ErrorLogged
            }
        }
    }

    pub fn get(&self) -> Option<&T> {
        match self {
            LoadState::Populated(item) => Some(item),
            _ => None,
        }
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        match self {
            LoadState::Populated(item) => Some(item),
            _ => None,
        }
    }
}

impl<E> LoadState<Vec<E>> {
    /// Settle a list read: an empty list is `Empty`, errors are logged under `what`.
    pub fn from_list(result: Result<Vec<E>, Error>, what: &str) -> Self {
        match result {
            Ok(items) if items.is_empty() => LoadState::Empty,
            Ok(items) => LoadState::Populated(items),
            Err(e) => {
                tracing::error!("Error fetching {}: {}", what, e);
                LoadState::ErrorLogged
            }
        }
    }

    /// Items to render; empty unless `Populated`.
    pub fn items(&self) -> &[E] {
        match self {
            LoadState::Populated(items) => items,
            _ => &[],
        }
    }

    /// Append a freshly created row at the end of the list.
    pub fn push(&mut self, item: E) {
        match self {
            LoadState::Populated(items) => items.push(item),
            _ => *self = LoadState::Populated(vec![item]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_is_entered_once() {
        let mut state = LoadState::<Vec<u8>>::default();
        assert!(state.is_pending());
        assert!(state.begin());
        assert_eq!(state, LoadState::Loading);
        assert!(!state.begin());

        state = LoadState::from_list(Ok(vec![1]), "numbers");
        assert!(!state.begin());
        assert!(!state.is_pending());
    }

    #[test]
    fn test_list_outcomes() {
        assert_eq!(LoadState::<Vec<u8>>::from_list(Ok(vec![]), "n"), LoadState::Empty);
        assert_eq!(
            LoadState::<Vec<u8>>::from_list(Err(Error::Backend("boom".into())), "n"),
            LoadState::ErrorLogged
        );

        let mut failed = LoadState::<Vec<u8>>::ErrorLogged;
        assert!(failed.items().is_empty());
        failed.push(7);
        assert_eq!(failed.items(), &[7]);
    }

    #[test]
    fn test_item_outcomes() {
        let mut state = LoadState::from_item(Ok("profile".to_string()), "profile");
        state.get_mut().unwrap().push('!');
        assert_eq!(state.get().map(String::as_str), Some("profile!"));

        let failed = LoadState::<String>::from_item(Err(Error::NotFound), "profile");
        assert_eq!(failed, LoadState::ErrorLogged);
        assert!(failed.get().is_none());
    }
}
