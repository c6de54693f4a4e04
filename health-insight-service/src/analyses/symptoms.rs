use prompt_flow::{Analysis, Language};

use crate::models::{
    NOT_PROVIDED, RiskLevel, SymptomAssessment, SymptomRequest, SymptomResponse, or_not_provided,
};

pub const SYMPTOMS_MAX_TOKENS: u64 = 1500;
pub const SYMPTOMS_IMAGE_PATH: &str = "/placeholder.svg?text=Medical+Condition&width=400&height=300";

/// Most likely condition for a set of selected symptoms
pub struct SymptomAnalysis;

impl Analysis for SymptomAnalysis {
    type Request = SymptomRequest;
    type Output = SymptomAssessment;
    type Response = SymptomResponse;

    fn id(&self) -> &str {
        "analyze-symptoms"
    }

    fn max_tokens(&self) -> u64 {
        SYMPTOMS_MAX_TOKENS
    }

    fn prompt(&self, request: &SymptomRequest, language: Language) -> String {
        let target = language.display_name();
        let info = request.history();
        let symptoms = if request.symptoms.is_empty() {
            NOT_PROVIDED.to_string()
        } else {
            request.symptoms.join(", ")
        };

        format!(
            "You are a medical AI assistant that analyzes symptoms in {target} language.

Patient information:
- Age: {age}
- Gender: {gender}
- Symptom duration (days): {duration}
- Symptoms: {symptoms}
- Medical history: {history}
- Current medications: {medications}
- Allergies: {allergies}

Write a medical analysis in {target} language that includes:
1. The most likely condition for these symptoms
2. A risk level assessment (low, medium, high)
3. Detailed recommendations
4. When to seek medical attention

Respond with ONLY this JSON object and no other text:
{{
  \"name\": \"Condition name in {target}\",
  \"description\": \"Detailed description in {target}\",
  \"riskLevel\": \"low|medium|high\",
  \"recommendations\": [\"recommendation in {target}\", \"...\"],
  \"symptoms\": [\"matching symptom in {target}\"],
  \"whenToSeekHelp\": \"When to see a doctor in {target}\"
}}

Always include a medical disclaimer and advise consulting a healthcare professional.",
            age = or_not_provided(&request.age),
            gender = or_not_provided(&request.gender),
            duration = or_not_provided(&request.duration),
            history = or_not_provided(&info.medical_history),
            medications = or_not_provided(&info.current_medications),
            allergies = or_not_provided(&info.allergies),
        )
    }

    fn fallback(&self, request: &SymptomRequest, language: Language) -> SymptomAssessment {
        fallback_assessment(&request.symptoms, language)
    }

    fn finalize(
        &self,
        request: SymptomRequest,
        _language: Language,
        output: SymptomAssessment,
    ) -> SymptomResponse {
        SymptomResponse {
            assessment: output,
            image_path: SYMPTOMS_IMAGE_PATH.to_string(),
            additional_info: request.additional_info,
        }
    }
}

/// Static "common cold" assessment echoing the selected symptom ids
pub fn fallback_assessment(symptoms: &[String], language: Language) -> SymptomAssessment {
    let (name, description, recommendations, when_to_seek_help) = match language {
        Language::En => (
            "Common Cold",
            "A common cold is caused by viral infection. It can heal naturally within 7-10 days. Please note: This analysis is for informational purposes only.",
            [
                "Get adequate rest",
                "Drink plenty of fluids",
                "Use pain relievers if necessary",
                "Keep body warm",
            ],
            "Consult with a doctor if symptoms worsen or don't improve within 7-10 days",
        ),
        Language::Km => (
            "ផ្តាសាយធម្មតា",
            "ជំងឺផ្តាសាយធម្មតាបណ្តាលមកពីមេរោគវីរុស។ វាអាចជាសះស្បើយដោយខ្លួនឯងក្នុងរយៈពេល 7-10 ថ្ងៃ។ សូមចាំថា៖ ការវិភាគនេះគ្រាន់តែជាការណែនាំប៉ុណ្ណោះ។",
            [
                "សម្រាកឱ្យបានគ្រប់គ្រាន់",
                "ផឹកទឹកច្រើន",
                "ប្រើថ្នាំបំបាត់ការឈឺចាប់បើចាំបាច់",
                "រក្សាកម្តៅរាងកាយឱ្យនៅក្តៅល្មម",
            ],
            "ពិគ្រោះជាមួយវេជ្ជបណ្ឌិតប្រសិនបើសញ្ញាអាការៈធ្ងន់ធ្ងរឡើង ឬមិនប្រសើរឡើងក្នុងរយៈពេល 7-10 ថ្ងៃ",
        ),
    };

    SymptomAssessment {
        name: name.to_string(),
        description: description.to_string(),
        risk_level: RiskLevel::Low,
        recommendations: recommendations.iter().map(|r| r.to_string()).collect(),
        symptoms: symptoms.to_vec(),
        when_to_seek_help: when_to_seek_help.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(symptoms: &[&str]) -> SymptomRequest {
        SymptomRequest {
            symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
            age: Some("29".to_string()),
            gender: Some("female".to_string()),
            duration: Some("4-7".to_string()),
            additional_info: None,
            language: Language::En,
        }
    }

    #[test]
    fn test_prompt_lists_symptom_ids() {
        let prompt = SymptomAnalysis.prompt(&request(&["fever", "cough"]), Language::En);
        assert!(prompt.contains("- Symptoms: fever, cough"));
        assert!(prompt.contains("- Symptom duration (days): 4-7"));
        assert!(prompt.contains("- Allergies: Not provided"));
    }

    #[test]
    fn test_prompt_without_symptoms() {
        let prompt = SymptomAnalysis.prompt(&request(&[]), Language::Km);
        assert!(prompt.contains("- Symptoms: Not provided"));
        assert!(prompt.contains("in Khmer language"));
    }

    #[test]
    fn test_fallback_echoes_symptoms() {
        let req = request(&["fever", "cough"]);
        let assessment = SymptomAnalysis.fallback(&req, Language::En);

        assert_eq!(assessment.name, "Common Cold");
        assert_eq!(assessment.risk_level, RiskLevel::Low);
        assert_eq!(assessment.symptoms, vec!["fever", "cough"]);
        assert_eq!(assessment.recommendations.len(), 4);

        let khmer = SymptomAnalysis.fallback(&req, Language::Km);
        assert_eq!(khmer.name, "ផ្តាសាយធម្មតា");
        assert_eq!(khmer.symptoms, assessment.symptoms);
    }
}
