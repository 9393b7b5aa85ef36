use quantra_core::DataProvider;
use std::sync::Arc;

#[must_use]
pub fn get_provider() -> Arc<dyn DataProvider> {
    if let Ok(base_url) = std::env::var("QUANTRA_EXAMPLES_API_URL") {
        let config = quantra_types::ApiConfig {
            base_url,
            ..quantra_types::ApiConfig::default()
        };
        Arc::new(quantra_api::DataClient::new(config).expect("valid API configuration"))
    } else {
        println!("--- (Using Mock Provider; set QUANTRA_EXAMPLES_API_URL for a live run) ---");
        Arc::new(quantra_mock::MockProvider::new())
    }
}
