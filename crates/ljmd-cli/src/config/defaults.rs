use ljmd::engine::config::Strategy;

pub struct DefaultsConfig {
    pub sigma: f32,
    pub epsilon: f32,
    pub cutoff: f32,
    pub density: f32,
    pub strategy: Strategy,
    pub evaluations: usize,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            sigma: 1.0,
            epsilon: 1.0,
            cutoff: 2.5,
            density: 0.8442,
            strategy: Strategy::default(),
            evaluations: 1,
        }
    }
}
