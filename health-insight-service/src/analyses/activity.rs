use prompt_flow::{Analysis, Language};
use rand::Rng;

use crate::models::{
    ActivityRecommendation, ActivityRequest, ActivityResponse, DayActivity, NOT_PROVIDED,
    or_not_provided,
};

pub const ACTIVITY_MAX_TOKENS: u64 = 1500;
pub const ACTIVITY_IMAGE_PATH: &str =
    "/placeholder.svg?text=Activity+Recommendation&width=400&height=300";

const WEEKDAYS_EN: [&str; 5] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];
const WEEKDAYS_KM: [&str; 5] = [
    "ថ្ងៃច័ន្ទ",
    "ថ្ងៃអង្គារ",
    "ថ្ងៃពុធ",
    "ថ្ងៃព្រហស្បតិ៍",
    "ថ្ងៃសុក្រ",
];

/// Days whose bar always shows the requested duration
const PINNED_DAYS: [usize; 2] = [1, 4];

/// Personalized activity recommendation
pub struct ActivityAnalysis;

impl Analysis for ActivityAnalysis {
    type Request = ActivityRequest;
    type Output = ActivityRecommendation;
    type Response = ActivityResponse;

    fn id(&self) -> &str {
        "analyze-activity"
    }

    fn max_tokens(&self) -> u64 {
        ACTIVITY_MAX_TOKENS
    }

    fn prompt(&self, request: &ActivityRequest, language: Language) -> String {
        let target = language.display_name();
        let info = request.lifestyle();
        let intensity = match or_not_provided(&request.activity.intensity) {
            NOT_PROVIDED => NOT_PROVIDED.to_string(),
            level => format!("{}/10", level),
        };

        format!(
            "You are a fitness and health AI assistant that gives activity recommendations in {target} language.

User information:
- Age: {age}
- Gender: {gender}
- Fitness level: {fitness}
- Current activity: {kind}
- Duration: {duration} minutes
- Intensity: {intensity}
- Diet: {diet}
- Sleep hours: {sleep}
- Health goals: {goals}

Give personalized fitness recommendations in {target} language covering:
1. The recommended activity type
2. Benefits of that activity
3. Optimal duration and intensity
4. Expected health improvements

Respond with ONLY this JSON object and no other text:
{{
  \"type\": \"Activity type in {target}\",
  \"description\": \"Description in {target}\",
  \"benefits\": [\"benefit in {target}\", \"...\"],
  \"duration\": \"Recommended duration in {target}\",
  \"intensity\": \"Recommended intensity in {target}\",
  \"healthImprovements\": \"Expected improvements in {target}\"
}}

Keep the recommendations realistic and safe for this user's profile.",
            age = or_not_provided(&request.age),
            gender = or_not_provided(&request.gender),
            fitness = or_not_provided(&request.fitness_level),
            kind = or_not_provided(&request.activity.kind),
            duration = request.activity.duration,
            diet = or_not_provided(&info.diet),
            sleep = or_not_provided(&info.sleep_hours),
            goals = or_not_provided(&info.health_goals),
        )
    }

    fn fallback(&self, _request: &ActivityRequest, language: Language) -> ActivityRecommendation {
        fallback_recommendation(language)
    }

    fn finalize(
        &self,
        request: ActivityRequest,
        language: Language,
        output: ActivityRecommendation,
    ) -> ActivityResponse {
        let weekly_data = weekly_activity(request.activity.duration, language, &mut rand::rng());

        ActivityResponse {
            recommendation: output,
            image_path: ACTIVITY_IMAGE_PATH.to_string(),
            weekly_data,
            additional_info: request.additional_info,
        }
    }
}

pub fn fallback_recommendation(language: Language) -> ActivityRecommendation {
    match language {
        Language::En => ActivityRecommendation {
            kind: "Walking".to_string(),
            description: "Walking is an excellent exercise for heart health and calorie burning. It's suitable for people of all ages and fitness levels.".to_string(),
            benefits: vec![
                "Strengthens heart health".to_string(),
                "Reduces blood cholesterol".to_string(),
                "Increases energy".to_string(),
                "Reduces stress".to_string(),
            ],
            duration: "30-60 minutes per day".to_string(),
            intensity: "Moderate".to_string(),
            health_improvements: "Regular walking can help improve heart health, reduce risk of diabetes, and enhance mood.".to_string(),
        },
        Language::Km => ActivityRecommendation {
            kind: "ការដើរ".to_string(),
            description: "ការដើរជាលំហាត់ប្រាណដ៏ល្អសម្រាប់សុខភាពបេះដូង និងការដុតកាឡូរី។ វាសមស្របសម្រាប់មនុស្សគ្រប់វ័យ និងកម្រិតសមត្ថភាព។".to_string(),
            benefits: vec![
                "ពង្រឹងសុខភាពបេះដូង".to_string(),
                "កាត់បន្ថយជាតិខ្លាញ់ក្នុងឈាម".to_string(),
                "បង្កើនថាមពល".to_string(),
                "កាត់បន្ថយភាពតានតឹង".to_string(),
            ],
            duration: "30-60 នាទីក្នុងមួយថ្ងៃ".to_string(),
            intensity: "មធ្យម".to_string(),
            health_improvements: "ការដើរជាទៀងទាត់អាចជួយកែលម្អសុខភាពបេះដូង កាត់បន្ថយហានិភ័យនៃជំងឺទឹកនោមផ្អែម និងបង្កើនអារម្មណ៍ល្អ។".to_string(),
        },
    }
}

/// Five localized weekday bars. Tuesday and Friday show `duration`, the
/// other days a random 20-59 minutes.
pub fn weekly_activity<R: Rng + ?Sized>(
    duration: u32,
    language: Language,
    rng: &mut R,
) -> Vec<DayActivity> {
    let names = match language {
        Language::En => WEEKDAYS_EN,
        Language::Km => WEEKDAYS_KM,
    };

    names
        .iter()
        .enumerate()
        .map(|(index, name)| DayActivity {
            name: name.to_string(),
            minutes: if PINNED_DAYS.contains(&index) {
                duration
            } else {
                rng.random_range(20..60)
            },
        })
        .collect()
}
