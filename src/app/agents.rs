use crate::core::prompts::interpolate;
use crate::domain::model::TaskInputs;

/// 代理人的角色設定，組成 LLM 的 system prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentProfile {
    pub role: &'static str,
    pub goal: &'static str,
    pub backstory: &'static str,
}

impl AgentProfile {
    pub fn system_prompt(&self, inputs: &TaskInputs) -> String {
        let goal = interpolate(self.goal, &inputs.as_map());
        format!(
            "You are {}. {}\n\nYour personal goal is: {}",
            self.role, self.backstory, goal
        )
    }
}

pub const RESEARCHER: AgentProfile = AgentProfile {
    role: "Researcher",
    goal: "Gather detailed and relevant information about {topic}.",
    backstory: "A skilled and inquisitive researcher, adept at diving deep into topics \
and pulling out critical insights that are accurate and comprehensive. \
Prioritizes authoritative sources and cross-references information.",
};

pub const WRITER: AgentProfile = AgentProfile {
    role: "Writer",
    goal: "Create content about {topic} tailored for {expertise_level} audience on {social_platform}.",
    backstory: "An expert content creator who specializes in adapting complex topics for different \
audiences and social media platforms. Skilled at creating engaging content that \
matches each platform's unique style and requirements.",
};

pub const IMAGE_DESIGNER: AgentProfile = AgentProfile {
    role: "Image Designer",
    goal: "Create subtle, text-friendly background images for social media content",
    backstory: "An expert in creating minimalist, professional background designs \
that enhance readability and maintain visual hierarchy. Specializes in \
subtle patterns, gradients, and abstract compositions that complement \
text overlays without competing for attention.",
};
