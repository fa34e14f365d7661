//! 各平台的格式要求與各專業程度的語氣設定。
//!
//! 兩張表都是編譯期常數，執行期間不會被修改。

use crate::domain::model::{ExpertiseLevel, Platform};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpertiseProfile {
    pub description: &'static str,
    pub tone: &'static str,
}

const LINKEDIN_FORMAT: &str = "Format requirements for LinkedIn:\n\
- NO asterisks or markdown formatting\n\
- For emphasis, use CAPS or simple text\n\
- Professional tone with clear section headers\n\
- Use line breaks for readability\n\
- Include relevant emojis sparingly\n\
\nExample format:\n\
MARKET INSIGHTS 📊\n\
Here's what you need to know...\n\
\nKey Statistics:\n\
• Point 1\n\
• Point 2\n\
\n#Hashtag1 #Hashtag2";

const TWITTER_FORMAT: &str = "Format requirements for Twitter:\n\
- Create a thread of 5-7 tweets\n\
- Each tweet must be under 280 characters\n\
- Use numbers for thread sequence\n\
- Include relevant emojis\n\
- End with call-to-action\n\
- Add hashtags to final tweet";

const INSTAGRAM_FORMAT: &str = "Format requirements for Instagram carousel:\n\
- Create 5-7 slides\n\
- One main point per slide\n\
- Start with hook slide\n\
- End with call-to-action\n\
- Use emojis for visual appeal\n\
- Short, punchy sentences\n\
- Hashtags in comment block";

pub fn platform_format(platform: Platform) -> &'static str {
    match platform {
        Platform::Linkedin => LINKEDIN_FORMAT,
        Platform::Twitter => TWITTER_FORMAT,
        Platform::Instagram => INSTAGRAM_FORMAT,
    }
}

pub fn expertise_profile(level: ExpertiseLevel) -> ExpertiseProfile {
    match level {
        ExpertiseLevel::Beginner => ExpertiseProfile {
            description: "Explain concepts simply, use analogies, avoid jargon",
            tone: "educational and supportive",
        },
        ExpertiseLevel::Intermediate => ExpertiseProfile {
            description: "Balance technical detail with practical application",
            tone: "practical and analytical",
        },
        ExpertiseLevel::Advanced => ExpertiseProfile {
            description: "Focus on complex analysis, assume strong background knowledge",
            tone: "technical and sophisticated",
        },
    }
}

/// 以字串鍵查詢平台格式；未知的鍵回傳 `None`
pub fn platform_format_for_key(key: &str) -> Option<&'static str> {
    key.parse::<Platform>().ok().map(platform_format)
}

pub fn expertise_profile_for_key(key: &str) -> Option<ExpertiseProfile> {
    key.parse::<ExpertiseLevel>().ok().map(expertise_profile)
}
