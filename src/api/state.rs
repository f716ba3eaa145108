use crate::clients::StoreClient;

/// Static build metadata included in health responses.
#[derive(Clone, Debug)]
pub struct BuildInfo {
    pub service: &'static str,
    pub version: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            service: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// Handle shared across all axum handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub store: StoreClient,
    pub build: BuildInfo,
}

impl AppState {
    pub fn new(store: StoreClient) -> Self {
        Self {
            store,
            build: BuildInfo::default(),
        }
    }
}
