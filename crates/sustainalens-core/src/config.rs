use crate::composite::CompositeWeights;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub weights: CompositeWeights,
    /// Score records on the rayon pool. Output order is the same either way.
    pub parallel: bool,
}

impl EngineConfig {
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weights: CompositeWeights::DEFAULT,
            parallel: true,
        }
    }
}
