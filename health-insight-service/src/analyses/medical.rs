use prompt_flow::{Analysis, Language};
use tracing::debug;

use crate::models::{
    CareRecommendations, MedicalReport, MedicalRequest, MedicalResponse, RiskLevel, TestResult,
    TrendPoint, or_not_provided,
};

pub const MEDICAL_MAX_TOKENS: u64 = 2000;

/// Explains a medical test from the patient's text fields.
///
/// The uploaded image is accepted but not forwarded to the model.
pub struct MedicalAnalysis;

impl Analysis for MedicalAnalysis {
    type Request = MedicalRequest;
    type Output = MedicalReport;
    type Response = MedicalResponse;

    fn id(&self) -> &str {
        "analyze-medical"
    }

    fn max_tokens(&self) -> u64 {
        MEDICAL_MAX_TOKENS
    }

    fn prompt(&self, request: &MedicalRequest, language: Language) -> String {
        debug!(
            image_bytes = request.image_data.as_ref().map_or(0, String::len),
            "Medical image received, not included in prompt"
        );

        let target = language.display_name();
        let info = request.history();

        format!(
            "You are a medical AI assistant that explains medical test results in {target} language.

Patient information:
- Medical history: {history}
- Current medications: {medications}
- Allergies: {allergies}

Write a comprehensive analysis in {target} language that includes:
1. A summary of the medical test results
2. The key values and what they mean
3. Recommendations for diet, lifestyle and activities
4. A risk assessment and next steps

Respond with ONLY this JSON object and no other text:
{{
  \"summary\": \"Summary in {target}\",
  \"results\": [
    {{\"name\": \"Test name in {target}\", \"value\": 0, \"normalRange\": \"Normal range in {target}\"}}
  ],
  \"recommendations\": {{
    \"diet\": \"Diet recommendations in {target}\",
    \"lifestyle\": \"Lifestyle recommendations in {target}\",
    \"activities\": \"Activity recommendations in {target}\"
  }},
  \"riskLevel\": \"low|medium|high\",
  \"nextSteps\": \"Next steps in {target}\"
}}

\"value\" must be a number. Keep the analysis realistic and medically sound, and state in the summary that it is for informational purposes only and that the patient should consult a healthcare professional.",
            history = or_not_provided(&info.medical_history),
            medications = or_not_provided(&info.current_medications),
            allergies = or_not_provided(&info.allergies),
        )
    }

    fn fallback(&self, _request: &MedicalRequest, language: Language) -> MedicalReport {
        fallback_report(language)
    }

    fn finalize(
        &self,
        request: MedicalRequest,
        _language: Language,
        output: MedicalReport,
    ) -> MedicalResponse {
        MedicalResponse {
            report: output,
            trends: quarterly_trends(),
            additional_info: request.additional_info,
        }
    }
}

fn result(name: &str, value: f64, normal_range: &str) -> TestResult {
    TestResult {
        name: name.to_string(),
        value,
        normal_range: normal_range.to_string(),
    }
}

/// Continuation lines carry a ten-space indent
const FALLBACK_SUMMARY_EN: &str = concat!(
    "Your medical test results show:\n",
    "          - Cholesterol and blood sugar levels are normal\n",
    "          - Blood pressure is slightly elevated but not concerning\n",
    "          - Overall health indicators are good\n",
    "          \n",
    "          Please note: This analysis is for informational purposes only. Please consult with a healthcare professional for proper medical care.",
);

const FALLBACK_SUMMARY_KM: &str = concat!(
    "លទ្ធផលវេជ្ជបញ្ជារបស់អ្នកបង្ហាញថា៖\n",
    "          - កម្រិតគូឡេស្តេរ៉ូល និងជាតិស្ករក្នុងឈាមធម្មតា\n",
    "          - សម្ពាធឈាមខ្ពស់បន្តិច ប៉ុន្តែមិនគួរឱ្យព្រួយបារម្ភទេ\n",
    "          - សូចនាករសុខភាពទូទៅល្អ\n",
    "          \n",
    "          សូមចាំថា៖ ការវិភាគនេះគ្រាន់តែជាការណែនាំប៉ុណ្ណោះ។ សូមពិគ្រោះជាមួយវេជ្ជបណ្ឌិតសម្រាប់ការថែទាំសុខភាពពិតប្រាកដ។",
);

pub fn fallback_report(language: Language) -> MedicalReport {
    match language {
        Language::En => MedicalReport {
            summary: FALLBACK_SUMMARY_EN.to_string(),
            results: vec![
                result("Cholesterol", 180.0, "< 200 mg/dL"),
                result("Blood Sugar", 95.0, "< 100 mg/dL"),
                result("Blood Pressure", 130.0, "< 120/80 mmHg"),
            ],
            recommendations: CareRecommendations {
                diet: "Consume foods rich in fruits and vegetables\nReduce salt and processed food intake\nIncrease consumption of fish and whole grains".to_string(),
                lifestyle: "Get adequate sleep (7-9 hours per night)\nManage stress through meditation or yoga\nAvoid smoking and reduce alcohol consumption".to_string(),
                activities: "Exercise for at least 30 minutes, 5 days a week\nWalk at least 10,000 steps daily\nEngage in physical activities you enjoy".to_string(),
            },
            risk_level: RiskLevel::Low,
            next_steps: "Monitor health regularly and consult with a doctor if you have any concerns".to_string(),
        },
        Language::Km => MedicalReport {
            summary: FALLBACK_SUMMARY_KM.to_string(),
            results: vec![
                result("គូឡេស្តេរ៉ូល", 180.0, "< 200 mg/dL"),
                result("ជាតិស្ករក្នុងឈាម", 95.0, "< 100 mg/dL"),
                result("សម្ពាធឈាម", 130.0, "< 120/80 mmHg"),
            ],
            recommendations: CareRecommendations {
                diet: "បរិភោគអាហារសម្បូរផ្លែឈើ និងបន្លែ\nកាត់បន្ថយការបរិភោគអំបិល និងអាហារកែច្នៃ\nបង្កើនការបរិភោគត្រី និងគ្រាប់ធញ្ញជាតិពេញ".to_string(),
                lifestyle: "គេងឱ្យបានគ្រប់គ្រាន់ (7-9 ម៉ោងក្នុងមួយយប់)\nគ្រប់គ្រងភាពតានតឹងតាមរយៈការធ្វើសមាធិ ឬយូហ្គា\nជៀសវាងការជក់បារី និងកាត់បន្ថយការផឹកគ្រឿងស្រវឹង".to_string(),
                activities: "ធ្វើលំហាត់ប្រាណរយៈពេល 30 នាទីយ៉ាងតិច 5 ថ្ងៃក្នុងមួយសប្តាហ៍\nដើរយ៉ាងតិច 10,000 ជំហានក្នុងមួយថ្ងៃ\nចូលរួមសកម្មភាពកាយសម្បទាដែលអ្នកចូលចិត្ត".to_string(),
            },
            risk_level: RiskLevel::Low,
            next_steps: "តាមដានសុខភាពជាទៀងទាត់ និងពិគ្រោះជាមួយវេជ្ជបណ្ឌិតប្រសិនបើមានការព្រួយបារម្ភ".to_string(),
        },
    }
}

/// Fixed quarterly history attached to every medical response
pub fn quarterly_trends() -> Vec<TrendPoint> {
    [
        ("2023-01", 190, 98, 128),
        ("2023-04", 185, 97, 129),
        ("2023-07", 182, 96, 130),
        ("2023-10", 180, 95, 130),
    ]
    .into_iter()
    .map(|(date, cholesterol, blood_sugar, blood_pressure)| TrendPoint {
        date: date.to_string(),
        cholesterol,
        blood_sugar,
        blood_pressure,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prompt_excludes_image_data() {
        let request = MedicalRequest {
            image_data: Some("data:image/png;base64,SECRETPIXELS".to_string()),
            additional_info: Some(json!({
                "medicalHistory": "Type 2 diabetes",
                "allergies": ""
            })),
            language: Language::Km,
        };

        let prompt = MedicalAnalysis.prompt(&request, Language::Km);
        assert!(!prompt.contains("SECRETPIXELS"));
        assert!(prompt.contains("- Medical history: Type 2 diabetes"));
        assert!(prompt.contains("- Current medications: Not provided"));
        assert!(prompt.contains("- Allergies: Not provided"));
        assert!(prompt.contains("in Khmer language"));
    }

    #[test]
    fn test_trends_are_fixed() {
        let trends = quarterly_trends();
        assert_eq!(trends.len(), 4);
        assert_eq!(trends[0].date, "2023-01");
        assert_eq!(trends[3].cholesterol, 180);
        assert_eq!(trends[3].blood_sugar, 95);
        assert_eq!(trends[2].blood_pressure, 130);
    }

    #[test]
    fn test_fallback_is_low_risk_in_both_languages() {
        for language in Language::ALL {
            let report = fallback_report(language);
            assert_eq!(report.risk_level, RiskLevel::Low);
            assert_eq!(report.results.len(), 3);
            assert_eq!(report.results[0].value, 180.0);
        }
        assert_eq!(fallback_report(Language::En).results[1].name, "Blood Sugar");
    }

    #[test]
    fn test_fallback_summary_keeps_indented_lines() {
        let summary = fallback_report(Language::En).summary;
        assert!(summary.starts_with("Your medical test results show:\n          - Cholesterol"));
        assert!(summary.contains("are good\n          \n          Please note:"));

        let khmer = fallback_report(Language::Km).summary;
        assert_eq!(khmer.lines().count(), 6);
        assert!(khmer.lines().skip(1).all(|line| line.starts_with("          ")));
    }
}
