pub mod activity;
pub mod medical;
pub mod symptoms;

pub use activity::ActivityAnalysis;
pub use medical::MedicalAnalysis;
pub use symptoms::SymptomAnalysis;
