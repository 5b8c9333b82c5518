use crate::completion::{CompletionClient, HttpCompletion};
use crate::config::AppConfig;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub completion: Arc<dyn CompletionClient>,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let completion =
            Arc::new(HttpCompletion::new(&config.completion)?) as Arc<dyn CompletionClient>;

        Ok(Self { config, completion })
    }

    pub fn from_parts(config: Arc<AppConfig>, completion: Arc<dyn CompletionClient>) -> Self {
        Self { config, completion }
    }

    pub fn fake() -> Self {
        use crate::completion::{CompletionError, CompletionRequest};
        use async_trait::async_trait;
        use serde_json::{json, Value};

        #[derive(Clone)]
        struct FakeCompletion;
        #[async_trait]
        impl CompletionClient for FakeCompletion {
            async fn complete(
                &self,
                _request: CompletionRequest,
            ) -> Result<Value, CompletionError> {
                Ok(json!({
                    "assumptions": { "mealsPerDay": 4, "notes": "Assumed moderate activity." },
                    "dailyTargets": { "calories": 2000, "protein": 150, "carbs": 200, "fat": 70 },
                    "meals": [
                        {
                            "name": "Greek yogurt bowl",
                            "mealType": "breakfast",
                            "description": "Greek yogurt with berries and oats.",
                            "portionGuidance": "1 cup yogurt, 1/2 cup berries, 1/3 cup oats.",
                            "estimatedMacros": { "calories": 450, "protein": 35, "carbs": 50, "fat": 12 },
                            "swapOptions": ["Cottage cheese bowl"]
                        },
                        {
                            "name": "Chicken rice bowl",
                            "mealType": "lunch",
                            "description": "Grilled chicken with rice and vegetables.",
                            "portionGuidance": "6 oz chicken, 1 cup rice, 1 cup vegetables.",
                            "estimatedMacros": { "calories": 600, "protein": 50, "carbs": 65, "fat": 15 },
                            "swapOptions": ["Turkey rice bowl", "Tofu rice bowl"]
                        },
                        {
                            "name": "Salmon and potatoes",
                            "mealType": "dinner",
                            "description": "Baked salmon with roasted potatoes and greens.",
                            "portionGuidance": "5 oz salmon, 8 oz potatoes, side salad.",
                            "estimatedMacros": { "calories": 650, "protein": 45, "carbs": 60, "fat": 28 },
                            "swapOptions": ["Baked cod with rice"]
                        },
                        {
                            "name": "Protein shake",
                            "mealType": "snack",
                            "description": "Whey protein shake with a banana.",
                            "portionGuidance": "1 scoop whey, 1 medium banana, water.",
                            "estimatedMacros": { "calories": 300, "protein": 28, "carbs": 30, "fat": 4 },
                            "swapOptions": []
                        }
                    ],
                    "notes": "Drink water with every meal."
                }))
            }
        }

        let config = Arc::new(AppConfig {
            completion: crate::config::CompletionConfig {
                api_key: "test".into(),
                base_url: "http://localhost:1".into(),
                model: "test-model".into(),
                timeout_secs: 1,
            },
        });

        let completion = Arc::new(FakeCompletion) as Arc<dyn CompletionClient>;
        Self { config, completion }
    }
}
