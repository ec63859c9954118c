use std::sync::Arc;

use axum::extract::FromRef;

use crate::resolver::Resolver;

#[derive(Clone)]
pub struct WeatherGateState {
    pub resolver: Arc<Resolver>,
}

impl FromRef<WeatherGateState> for Arc<Resolver> {
    fn from_ref(state: &WeatherGateState) -> Arc<Resolver> {
        state.resolver.clone()
    }
}
