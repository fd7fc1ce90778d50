mod input;

pub use input::AnalysisInput;
