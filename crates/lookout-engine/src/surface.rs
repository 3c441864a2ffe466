use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::stats::ChartData;

/// Guard for destructive gestures. Production wires this to a real prompt;
/// headless runs use [`AutoConfirm`].
#[async_trait]
pub trait ConfirmPrompt: Send + Sync {
    /// Returns `true` when the operator accepts the action.
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Accepts every prompt.
pub struct AutoConfirm;

#[async_trait]
impl ConfirmPrompt for AutoConfirm {
    async fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Replays a scripted sequence of answers and records the prompts it saw.
/// Once the script runs out, every further prompt is declined.
#[derive(Default)]
pub struct ScriptedConfirm {
    answers: Mutex<VecDeque<bool>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedConfirm {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

#[async_trait]
impl ConfirmPrompt for ScriptedConfirm {
    async fn confirm(&self, prompt: &str) -> bool {
        self.prompts.lock().push(prompt.to_string());
        self.answers.lock().pop_front().unwrap_or(false)
    }
}

/// Sink for chart updates. The engine hands over derived bucket data; how it
/// gets drawn is the surface's business.
pub trait ChartSurface: Send + Sync {
    fn render(&self, data: &ChartData);
}

/// Discards every chart update.
pub struct NullChartSurface;

impl ChartSurface for NullChartSurface {
    fn render(&self, _data: &ChartData) {}
}

/// Keeps every chart update it receives, in order.
#[derive(Default)]
pub struct RecordingCharts {
    rendered: Mutex<Vec<ChartData>>,
}

impl RecordingCharts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rendered(&self) -> Vec<ChartData> {
        self.rendered.lock().clone()
    }
}

impl ChartSurface for RecordingCharts {
    fn render(&self, data: &ChartData) {
        self.rendered.lock().push(data.clone());
    }
}
