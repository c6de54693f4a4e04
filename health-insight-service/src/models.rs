use prompt_flow::{Language, ModelOutput};
use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned, de::Error as _};
use serde_json::Value;

/// Placeholder written into prompts for absent or blank fields
pub const NOT_PROVIDED: &str = "Not provided";

/// Accept a JSON string or number as free text; anything else reads as absent.
fn loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(text)) => Some(text),
        Some(Value::Number(number)) => Some(number.to_string()),
        Some(Value::Bool(flag)) => Some(flag.to_string()),
        _ => None,
    })
}

/// Minutes as a JSON number or numeric string. Fractions are rounded.
fn loose_minutes<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let minutes = match &value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    match minutes {
        Some(m) if m.is_finite() && m >= 0.0 && m <= u32::MAX as f64 => Ok(m.round() as u32),
        _ => Err(D::Error::custom(format!("invalid duration: {}", value))),
    }
}

/// Typed view over a raw `additionalInfo` value. Anything that is not an
/// object reads as empty.
fn info_view<T: DeserializeOwned + Default>(raw: &Option<Value>) -> T {
    raw.as_ref()
        .and_then(|value| T::deserialize(value).ok())
        .unwrap_or_default()
}

/// Prompt rendering for an optional field
pub fn or_not_provided(value: &Option<String>) -> &str {
    match value.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => text,
        _ => NOT_PROVIDED,
    }
}

/// Requests that carry a target language
pub trait Localized {
    fn language(&self) -> Language;
}

// ---------------------------------------------------------------------------
// Activity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityInput {
    #[serde(
        rename = "type",
        default,
        deserialize_with = "loose_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,
    /// Minutes per session
    #[serde(deserialize_with = "loose_minutes")]
    pub duration: u32,
    /// 1-10 scale, free text
    #[serde(
        default,
        deserialize_with = "loose_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub intensity: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifestyleInfo {
    #[serde(default, deserialize_with = "loose_text")]
    pub diet: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub sleep_hours: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub health_goals: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRequest {
    pub activity: ActivityInput,
    #[serde(default, deserialize_with = "loose_text")]
    pub age: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub fitness_level: Option<String>,
    /// Echoed back untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<Value>,
    #[serde(default, deserialize_with = "prompt_flow::language::lenient")]
    pub language: Language,
}

impl ActivityRequest {
    pub fn lifestyle(&self) -> LifestyleInfo {
        info_view(&self.additional_info)
    }
}

impl Localized for ActivityRequest {
    fn language(&self) -> Language {
        self.language
    }
}

/// Model-authored part of an activity analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecommendation {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub benefits: Vec<String>,
    pub duration: String,
    pub intensity: String,
    pub health_improvements: String,
}

impl ModelOutput for ActivityRecommendation {
    fn validate(&self) -> Result<(), String> {
        if self.kind.trim().is_empty() {
            return Err("activity type is empty".to_string());
        }
        if self.description.trim().is_empty() {
            return Err("description is empty".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayActivity {
    pub name: String,
    pub minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityResponse {
    #[serde(flatten)]
    pub recommendation: ActivityRecommendation,
    pub image_path: String,
    pub weekly_data: Vec<DayActivity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<Value>,
}

// ---------------------------------------------------------------------------
// Medical
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalHistoryInfo {
    #[serde(default, deserialize_with = "loose_text")]
    pub medical_history: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub current_medications: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub allergies: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRequest {
    /// Data URL of the uploaded test image; opaque to the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<Value>,
    #[serde(default, deserialize_with = "prompt_flow::language::lenient")]
    pub language: Language,
}

impl MedicalRequest {
    pub fn history(&self) -> MedicalHistoryInfo {
        info_view(&self.additional_info)
    }
}

impl Localized for MedicalRequest {
    fn language(&self) -> Language {
        self.language
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub name: String,
    pub value: f64,
    #[serde(alias = "normal")]
    pub normal_range: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareRecommendations {
    pub diet: String,
    pub lifestyle: String,
    pub activities: String,
}

/// Model-authored part of a medical analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalReport {
    pub summary: String,
    #[serde(alias = "data")]
    pub results: Vec<TestResult>,
    pub recommendations: CareRecommendations,
    pub risk_level: RiskLevel,
    pub next_steps: String,
}

impl ModelOutput for MedicalReport {
    fn validate(&self) -> Result<(), String> {
        if self.summary.trim().is_empty() {
            return Err("summary is empty".to_string());
        }
        if let Some(result) = self.results.iter().find(|r| !r.value.is_finite()) {
            return Err(format!("value for {} is not a finite number", result.name));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub date: String,
    pub cholesterol: u32,
    pub blood_sugar: u32,
    pub blood_pressure: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalResponse {
    #[serde(flatten)]
    pub report: MedicalReport,
    pub trends: Vec<TrendPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<Value>,
}

// ---------------------------------------------------------------------------
// Symptoms
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomRequest {
    /// Selected symptom ids, e.g. `fever`, `sore-throat`
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub age: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub gender: Option<String>,
    /// Duration bucket such as `1-3` or `15+`
    #[serde(default, deserialize_with = "loose_text")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<Value>,
    #[serde(default, deserialize_with = "prompt_flow::language::lenient")]
    pub language: Language,
}

impl SymptomRequest {
    pub fn history(&self) -> MedicalHistoryInfo {
        info_view(&self.additional_info)
    }
}

impl Localized for SymptomRequest {
    fn language(&self) -> Language {
        self.language
    }
}

/// Model-authored part of a symptom analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomAssessment {
    pub name: String,
    pub description: String,
    pub risk_level: RiskLevel,
    pub recommendations: Vec<String>,
    pub symptoms: Vec<String>,
    pub when_to_seek_help: String,
}

impl ModelOutput for SymptomAssessment {
    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("condition name is empty".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomResponse {
    #[serde(flatten)]
    pub assessment: SymptomAssessment,
    pub image_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
