// App state for the Axum server
use around_repository::PostStoreService;

#[derive(Clone)]
pub struct AppState {
    pub store: PostStoreService,
    /// Radius applied when a search omits `range`, in kilometres.
    pub default_distance_km: f64,
}
