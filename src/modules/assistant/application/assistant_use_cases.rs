use std::sync::Arc;

use crate::assistant::application::use_cases::ask_assistant::IAskAssistantUseCase;

#[derive(Clone)]
pub struct AssistantUseCases {
    pub ask: Arc<dyn IAskAssistantUseCase + Send + Sync>,
}
