//! Shared test helpers: one-shot scripted providers and orchestrators
//! with short deadlines.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use storyforge_core::{Prompt, ProviderError, Shape};
use storyforge_providers::retry::RetryPolicy;
use storyforge_providers::{AttemptSpec, AuthMode, Orchestrator, Provider};

/// A provider exposing a single attempt that always returns the same
/// scripted result.
pub(crate) struct OneShotProvider {
    name: &'static str,
    model: String,
    result: Mutex<Result<String, ProviderError>>,
}

#[async_trait]
impl Provider for OneShotProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    fn attempts(&self, _shape: Shape) -> Vec<AttemptSpec> {
        vec![AttemptSpec {
            model: self.model.clone(),
            auth: AuthMode::Bearer,
            endpoint: "http://scripted".to_string(),
        }]
    }

    async fn call(
        &self,
        _prompt: &Prompt,
        _shape: Shape,
        _attempt: &AttemptSpec,
    ) -> Result<String, ProviderError> {
        self.result.lock().unwrap().clone()
    }
}

pub(crate) fn one_shot_provider(
    name: &'static str,
    model: &str,
    result: Result<String, ProviderError>,
) -> Arc<dyn Provider> {
    Arc::new(OneShotProvider {
        name,
        model: model.to_string(),
        result: Mutex::new(result),
    })
}

pub(crate) fn orchestrator_with(providers: Vec<Arc<dyn Provider>>) -> Orchestrator {
    Orchestrator::new(
        providers,
        RetryPolicy {
            max_retries: 1,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(10),
        },
        false,
        Duration::from_secs(60),
    )
}
