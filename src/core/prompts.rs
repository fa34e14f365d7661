use crate::catalog::requirements::{expertise_profile_for_key, platform_format_for_key};
use crate::domain::model::GenerationRequest;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([a-z_]+)\}").expect("placeholder pattern is valid"));

const RESEARCH_TEMPLATE: &str = "Conduct thorough research on the topic {topic}. Focus on collecting key points, \
relevant statistics, and critical insights to form a strong foundation for the report.";

const WRITING_TEMPLATE: &str = "Using the research findings, create content about {topic} for {social_platform}. \
The content should be appropriate for a {expertise_level} audience with a {tone} tone.\n\n\
IMPORTANT FORMATTING RULES:\n\
- DO NOT use any markdown formatting (no asterisks, underscores, or other symbols)\n\
- For emphasis, use CAPS or simply regular text\n\
- Numbers should be written plainly without any special formatting\n\n\
{platform_format}\n\n\
{expertise_description}\n\n\
Ensure the content is engaging, accurate, and matches the platform's style.";

const IMAGE_TEMPLATE: &str = "Create a single background image for a {social_platform} post about {topic} \
targeting {expertise_level} audience.\n\n\
Image requirements:\n\
- Extremely subtle and minimal background designs\n\
- NO human figures, hands, or detailed objects\n\
- Focus on abstract patterns, gentle gradients, or simple geometric shapes\n\
- Ensure high text readability with clean, uncluttered compositions\n\
- Use muted colors that won't compete with text overlays\n\
- Color scheme based on complexity level:\n  \
* Beginner: Soft, warm gradients (blues, warm grays)\n  \
* Intermediate: Professional, neutral tones (navy, slate, subtle gold)\n  \
* Advanced: Rich, deep colors (dark blues, burgundy, charcoal)\n\n\
Additional guidelines:\n\
- Maintain 30% or less visual complexity\n\
- Ensure patterns are subtle enough to read white or black text clearly\n\
- Avoid any text or symbols in the images";

pub const RESEARCH_EXPECTED_OUTPUT: &str =
    "A comprehensive list of data points and insights about {topic}.";
pub const WRITING_EXPECTED_OUTPUT: &str = "Platform-native content formatted for {social_platform}";
pub const IMAGE_EXPECTED_OUTPUT: &str = "Path to the generated background image.";

const FALLBACK_TONE: &str = "neutral";

/// 三個階段的提示詞
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSet {
    pub research: String,
    pub writing: String,
    pub image: String,
}

/// 把 `{name}` 換成對應的值；找不到的佔位符原樣保留
pub fn interpolate(template: &str, vars: &HashMap<&str, &str>) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| match vars.get(&caps[1]) {
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

pub struct PromptAssembler;

impl PromptAssembler {
    pub fn assemble(request: &GenerationRequest) -> PromptSet {
        PromptSet {
            research: Self::research_prompt(&request.topic),
            writing: Self::writing_prompt(
                &request.topic,
                request.platform.as_str(),
                request.expertise.as_str(),
            ),
            image: Self::image_prompt(request),
        }
    }

    pub fn research_prompt(topic: &str) -> String {
        interpolate(RESEARCH_TEMPLATE, &HashMap::from([("topic", topic)]))
    }

    /// 以字串鍵組出寫作提示詞。
    ///
    /// 目錄裡查不到的平台或程度不會報錯：格式區段留空、語氣退回 `neutral`，
    /// 並記一筆 warn 日誌。
    pub fn writing_prompt(topic: &str, platform_key: &str, expertise_key: &str) -> String {
        let platform_format = platform_format_for_key(platform_key).unwrap_or_else(|| {
            tracing::warn!(
                "⚠️ No format rules for platform '{}', using an empty format section",
                platform_key
            );
            ""
        });

        let (tone, description) = match expertise_profile_for_key(expertise_key) {
            Some(profile) => (profile.tone, profile.description),
            None => {
                tracing::warn!(
                    "⚠️ No expertise profile for '{}', falling back to a {} tone",
                    expertise_key,
                    FALLBACK_TONE
                );
                (FALLBACK_TONE, "")
            }
        };

        let vars = HashMap::from([
            ("topic", topic),
            ("social_platform", platform_key),
            ("expertise_level", expertise_key),
            ("tone", tone),
            ("platform_format", platform_format),
            ("expertise_description", description),
        ]);
        interpolate(WRITING_TEMPLATE, &vars)
    }

    pub fn image_prompt(request: &GenerationRequest) -> String {
        let inputs = request.inputs();
        interpolate(IMAGE_TEMPLATE, &inputs.as_map())
    }
}
