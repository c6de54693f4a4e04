//! Client-side form state for the three analysis panels.
//!
//! Each panel keeps every input in one form struct, turns it into the request
//! shape at submit time, and records the outcome in a [`FormView`]. `submit`
//! takes `&mut self`, so a panel never has two requests in flight.

use prompt_flow::{Language, LanguageContext};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    client::AnalysisClient,
    error::ClientError,
    models::{
        ActivityInput, ActivityRequest, ActivityResponse, DayActivity, LifestyleInfo,
        MedicalHistoryInfo, MedicalRequest, MedicalResponse, RiskLevel, SymptomRequest,
        SymptomResponse,
    },
    upload::UploadedImage,
};

/// View state shared by every panel
#[derive(Debug, Clone, PartialEq)]
pub struct FormView<T> {
    pub is_loading: bool,
    pub error: Option<String>,
    pub result: Option<T>,
    pub is_submitted: bool,
}

impl<T> Default for FormView<T> {
    fn default() -> Self {
        Self {
            is_loading: false,
            error: None,
            result: None,
            is_submitted: false,
        }
    }
}

impl<T> FormView<T> {
    fn begin(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    fn finish(&mut self, outcome: Result<T, ClientError>, error_message: &str) {
        match outcome {
            Ok(result) => {
                self.result = Some(result);
                self.is_submitted = true;
            }
            Err(e) => {
                warn!(error = %e, "Analysis submission failed");
                self.error = Some(error_message.to_string());
            }
        }
        self.is_loading = false;
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn info_value<T: Serialize>(info: &T) -> Option<Value> {
    serde_json::to_value(info).ok()
}

pub fn risk_label<'a>(risk: RiskLevel, ctx: &'a LanguageContext) -> &'a str {
    match risk {
        RiskLevel::Low => ctx.t("risk.low"),
        RiskLevel::Medium => ctx.t("risk.medium"),
        RiskLevel::High => ctx.t("risk.high"),
    }
}

// ---------------------------------------------------------------------------
// Activity
// ---------------------------------------------------------------------------

pub const FITNESS_LEVELS: [&str; 3] = ["beginner", "intermediate", "advanced"];

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityForm {
    pub activity_type: String,
    pub duration: u32,
    pub intensity: u8,
    pub age: String,
    pub gender: String,
    pub fitness_level: String,
    pub diet: String,
    pub sleep_hours: String,
    pub health_goals: String,
}

impl Default for ActivityForm {
    fn default() -> Self {
        Self {
            activity_type: String::new(),
            duration: 30,
            intensity: 5,
            age: String::new(),
            gender: String::new(),
            fitness_level: String::new(),
            diet: String::new(),
            sleep_hours: String::new(),
            health_goals: String::new(),
        }
    }
}

impl ActivityForm {
    pub fn to_request(&self, language: Language) -> ActivityRequest {
        ActivityRequest {
            activity: ActivityInput {
                kind: non_empty(&self.activity_type),
                duration: self.duration,
                intensity: Some(self.intensity.to_string()),
            },
            age: non_empty(&self.age),
            gender: non_empty(&self.gender),
            fitness_level: non_empty(&self.fitness_level),
            additional_info: info_value(&LifestyleInfo {
                diet: non_empty(&self.diet),
                sleep_hours: non_empty(&self.sleep_hours),
                health_goals: non_empty(&self.health_goals),
            }),
            language,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ActivityMonitor {
    pub form: ActivityForm,
    pub view: FormView<ActivityResponse>,
}

impl ActivityMonitor {
    /// Does nothing until an activity type has been entered
    pub async fn submit(&mut self, client: &AnalysisClient, ctx: &LanguageContext) {
        if self.form.activity_type.trim().is_empty() {
            debug!("Activity type missing, submission skipped");
            return;
        }

        self.view.begin();
        let request = self.form.to_request(ctx.language());
        let outcome = client.analyze_activity(&request).await;
        self.view.finish(outcome, ctx.t("activity.error"));
    }

    pub fn weekly_data(&self) -> &[DayActivity] {
        self.view
            .result
            .as_ref()
            .map(|r| r.weekly_data.as_slice())
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Medical
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MedicalForm {
    pub image: Option<UploadedImage>,
    pub medical_history: String,
    pub current_medications: String,
    pub allergies: String,
}

impl MedicalForm {
    /// `None` until an image has been attached
    pub fn to_request(&self, language: Language) -> Option<MedicalRequest> {
        let image = self.image.as_ref()?;
        Some(MedicalRequest {
            image_data: Some(image.data_url.clone()),
            additional_info: history_info(
                &self.medical_history,
                &self.current_medications,
                &self.allergies,
            ),
            language,
        })
    }
}

fn history_info(history: &str, medications: &str, allergies: &str) -> Option<Value> {
    info_value(&MedicalHistoryInfo {
        medical_history: non_empty(history),
        current_medications: non_empty(medications),
        allergies: non_empty(allergies),
    })
}

#[derive(Debug, Clone, Default)]
pub struct MedicalTranslator {
    pub form: MedicalForm,
    pub view: FormView<MedicalResponse>,
}

impl MedicalTranslator {
    /// Does nothing while no image is attached. Otherwise the previous
    /// result is cleared before the request goes out.
    pub async fn submit(&mut self, client: &AnalysisClient, ctx: &LanguageContext) {
        let Some(request) = self.form.to_request(ctx.language()) else {
            return;
        };

        self.view.begin();
        self.view.result = None;
        self.view.is_submitted = false;

        let outcome = client.analyze_medical(&request).await;
        self.view.finish(outcome, ctx.t("medical.error"));
    }
}

// ---------------------------------------------------------------------------
// Symptoms
// ---------------------------------------------------------------------------

/// Checklist entries: symptom id and its label key
pub const COMMON_SYMPTOMS: [(&str, &str); 8] = [
    ("fever", "symptoms.fever"),
    ("cough", "symptoms.cough"),
    ("headache", "symptoms.headache"),
    ("sore-throat", "symptoms.soreThroat"),
    ("fatigue", "symptoms.fatigue"),
    ("body-ache", "symptoms.bodyAche"),
    ("runny-nose", "symptoms.runnyNose"),
    ("difficulty-breathing", "symptoms.breathingDifficulty"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationBucket {
    OneToThreeDays,
    FourToSevenDays,
    OneToTwoWeeks,
    OverTwoWeeks,
}

impl DurationBucket {
    pub const ALL: [DurationBucket; 4] = [
        DurationBucket::OneToThreeDays,
        DurationBucket::FourToSevenDays,
        DurationBucket::OneToTwoWeeks,
        DurationBucket::OverTwoWeeks,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DurationBucket::OneToThreeDays => "1-3",
            DurationBucket::FourToSevenDays => "4-7",
            DurationBucket::OneToTwoWeeks => "8-14",
            DurationBucket::OverTwoWeeks => "15+",
        }
    }

    pub fn label_key(&self) -> &'static str {
        match self {
            DurationBucket::OneToThreeDays => "symptoms.duration.1-3",
            DurationBucket::FourToSevenDays => "symptoms.duration.4-7",
            DurationBucket::OneToTwoWeeks => "symptoms.duration.8-14",
            DurationBucket::OverTwoWeeks => "symptoms.duration.15+",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymptomOption {
    pub id: &'static str,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub name: String,
    pub value: u8,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymptomForm {
    selected: Vec<String>,
    pub age: String,
    pub gender: String,
    pub duration: Option<DurationBucket>,
    pub medical_history: String,
    pub current_medications: String,
    pub allergies: String,
}

impl SymptomForm {
    /// Select `id`, or deselect it if already selected. Selection order is kept.
    pub fn toggle(&mut self, id: &str) {
        if let Some(position) = self.selected.iter().position(|s| s == id) {
            self.selected.remove(position);
        } else {
            self.selected.push(id.to_string());
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn options(ctx: &LanguageContext) -> Vec<SymptomOption> {
        COMMON_SYMPTOMS
            .iter()
            .map(|&(id, key)| SymptomOption {
                id,
                label: ctx.t(key).to_string(),
            })
            .collect()
    }

    /// One bar per common symptom: 1 when selected, 0 otherwise
    pub fn chart(&self, ctx: &LanguageContext) -> Vec<ChartPoint> {
        COMMON_SYMPTOMS
            .iter()
            .map(|&(id, key)| ChartPoint {
                name: ctx.t(key).to_string(),
                value: u8::from(self.is_selected(id)),
            })
            .collect()
    }

    pub fn to_request(&self, language: Language) -> SymptomRequest {
        SymptomRequest {
            symptoms: self.selected.clone(),
            age: non_empty(&self.age),
            gender: non_empty(&self.gender),
            duration: self.duration.map(|d| d.as_str().to_string()),
            additional_info: history_info(
                &self.medical_history,
                &self.current_medications,
                &self.allergies,
            ),
            language,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SymptomChecker {
    pub form: SymptomForm,
    pub view: FormView<SymptomResponse>,
}

impl SymptomChecker {
    /// Does nothing while no symptom is selected
    pub async fn submit(&mut self, client: &AnalysisClient, ctx: &LanguageContext) {
        if self.form.selected.is_empty() {
            debug!("No symptoms selected, submission skipped");
            return;
        }

        self.view.begin();
        let request = self.form.to_request(ctx.language());
        let outcome = client.analyze_symptoms(&request).await;
        self.view.finish(outcome, ctx.t("symptoms.error"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prompt_flow::InMemoryPreferenceStorage;
    use std::sync::Arc;

    async fn context(language: Language) -> LanguageContext {
        let storage = Arc::new(InMemoryPreferenceStorage::new());
        let mut ctx = crate::translations::language_context(storage).await.unwrap();
        ctx.set_language(language).await.unwrap();
        ctx
    }

    #[test]
    fn test_toggle_keeps_order() {
        let mut form = SymptomForm::default();
        form.toggle("cough");
        form.toggle("fever");
        form.toggle("headache");
        form.toggle("fever");

        assert_eq!(form.selected(), ["cough", "headache"]);
        assert!(!form.is_selected("fever"));
    }

    #[test]
    fn test_symptom_request_assembly() {
        let mut form = SymptomForm {
            age: "52".to_string(),
            duration: Some(DurationBucket::OverTwoWeeks),
            allergies: "  ".to_string(),
            ..Default::default()
        };
        form.toggle("sore-throat");

        let request = form.to_request(Language::En);
        assert_eq!(request.symptoms, vec!["sore-throat"]);
        assert_eq!(request.age.as_deref(), Some("52"));
        assert_eq!(request.gender, None);
        assert_eq!(request.duration.as_deref(), Some("15+"));
        assert_eq!(request.history().allergies, None);
        assert_eq!(request.language, Language::En);
    }

    #[tokio::test]
    async fn test_chart_marks_selected() {
        let ctx = context(Language::En).await;
        let mut form = SymptomForm::default();
        form.toggle("fatigue");

        let chart = form.chart(&ctx);
        assert_eq!(chart.len(), COMMON_SYMPTOMS.len());
        assert_eq!(chart[4].name, "Fatigue");
        assert_eq!(chart[4].value, 1);
        assert_eq!(chart.iter().map(|p| p.value as u32).sum::<u32>(), 1);
    }

    #[tokio::test]
    async fn test_options_are_localized() {
        let ctx = context(Language::Km).await;
        let options = SymptomForm::options(&ctx);
        assert_eq!(options[0].id, "fever");
        assert_eq!(options[0].label, "គ្រុនក្តៅ");

        for bucket in DurationBucket::ALL {
            assert_ne!(ctx.t(bucket.label_key()), bucket.label_key());
        }
    }

    #[test]
    fn test_activity_form_defaults() {
        let form = ActivityForm::default();
        let request = form.to_request(Language::Km);

        assert_eq!(request.activity.duration, 30);
        assert_eq!(request.activity.intensity.as_deref(), Some("5"));
        assert_eq!(request.activity.kind, None);
        assert_eq!(request.language, Language::Km);
    }

    #[test]
    fn test_medical_form_requires_image() {
        let mut form = MedicalForm {
            medical_history: "Asthma".to_string(),
            ..Default::default()
        };
        assert!(form.to_request(Language::En).is_none());

        form.image = Some(UploadedImage::from_bytes("scan.png", &[0x89, 0x50, 0x4E, 0x47]));
        let request = form.to_request(Language::En).unwrap();
        assert_eq!(request.image_data.as_deref(), Some("data:image/png;base64,iVBORw=="));
        assert_eq!(request.history().medical_history.as_deref(), Some("Asthma"));
    }

    #[tokio::test]
    async fn test_risk_label() {
        let ctx = context(Language::En).await;
        assert_eq!(risk_label(RiskLevel::High, &ctx), "High risk");
    }

    #[test]
    fn test_fitness_levels_have_labels() {
        let translations = crate::translations::builtin().unwrap();
        for level in FITNESS_LEVELS {
            let key = format!("activity.fitnessLevel.{}", level);
            assert_ne!(translations.lookup(Language::En, &key), key);
        }
    }
}
