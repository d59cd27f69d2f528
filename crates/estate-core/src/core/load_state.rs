/// Loading state of a remote resource.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState<T> {
    /// Nothing requested yet
    #[default]
    Idle,
    /// Request in flight
    Loading,
    Loaded(T),
    /// Request failed; holds the message shown in place of the data
    Error(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadState::Loaded(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LoadState::Error(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_state_accessors() {
        let idle: LoadState<u32> = LoadState::default();
        assert_eq!(idle, LoadState::Idle);
        assert!(idle.data().is_none());

        let loaded = LoadState::Loaded(5);
        assert!(loaded.is_loaded());
        assert_eq!(loaded.data(), Some(&5));

        let failed: LoadState<u32> = LoadState::Error("boom".to_string());
        assert!(failed.is_error());
        assert_eq!(failed.error(), Some("boom"));
        assert!(!failed.is_loading());
    }
}
